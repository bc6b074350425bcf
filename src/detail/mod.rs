// Gateway module for the country detail page - follows the Train Station Pattern
// All external access must go through this gateway

mod controller;

pub use controller::{DetailController, DetailState};
