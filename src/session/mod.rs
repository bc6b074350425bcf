/// Session management module - Gateway

mod cookies;
mod credentials;
mod store;
mod types;

pub use cookies::{CookieJar, FileCookieJar, MemoryCookieJar, StoredCookie};
pub use credentials::{Credential, CredentialTable};
pub use store::SessionStore;
pub use types::{AuthCheck, FavoriteEntry, LoginOutcome, Session};
