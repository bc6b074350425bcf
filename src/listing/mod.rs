// Gateway module for the country listing - follows the Train Station Pattern
// All external access must go through this gateway

mod controller;
mod state;

pub use controller::ListingController;
pub use state::{ActiveQuery, ListingError, ListingState};
