pub mod app;
pub mod cli;
pub mod constants;
pub mod detail;
pub mod directory;
pub mod listing;
pub mod render;
pub mod runtime;
pub mod session;
pub mod state;
pub mod utils;

pub use app::{load_config, AppContext, Config};
pub use directory::{Country, CountryDirectory, RestCountriesClient};
pub use listing::{ListingController, ListingState};
pub use session::{FavoriteEntry, SessionStore};
pub use utils::AtlasError;
