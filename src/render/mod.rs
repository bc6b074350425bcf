// Gateway module for terminal rendering - follows the Train Station Pattern
// All external access must go through this gateway

mod format;
mod views;

pub use format::{format_population, join_or_dash};
pub use views::{country_card, country_detail, favorites_page, listing};
