// Gateway module for the remote country directory - follows the Train Station Pattern
// All external access must go through this gateway

mod client;
mod traits;
mod types;

pub use client::RestCountriesClient;
pub use traits::CountryDirectory;
#[cfg(test)]
pub use traits::MockCountryDirectory;
pub use types::{Country, CountryName, Currency, Flags};
