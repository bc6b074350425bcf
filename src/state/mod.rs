// Gateway module for page-lifetime state - follows the Train Station Pattern
// All external access must go through this gateway

mod auth;
mod favorites;

pub use auth::{AuthState, AuthStatus, User};
pub use favorites::FavoritesState;

use parking_lot::Mutex;
use std::sync::Arc;

use crate::session::SessionStore;

/// Session store shared by the auth and favorites holders
pub type SharedSessionStore = Arc<Mutex<SessionStore>>;
