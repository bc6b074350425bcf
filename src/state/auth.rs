use anyhow::Result;
use tracing::debug;

use super::SharedSessionStore;
use crate::session::LoginOutcome;

/// The logged-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
}

/// Authentication as seen by the rest of the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// The stored session has not been checked yet
    Loading,
    Anonymous,
    Authenticated(User),
}

/// Holds the current user for the lifetime of one application run
pub struct AuthState {
    store: SharedSessionStore,
    status: AuthStatus,
}

impl AuthState {
    /// New holder in the `Loading` state; call [`AuthState::initialize`] next
    pub fn new(store: SharedSessionStore) -> Self {
        Self {
            store,
            status: AuthStatus::Loading,
        }
    }

    /// Restore the user from the stored session
    pub fn initialize(&mut self) {
        let check = self.store.lock().check_auth();
        self.status = match check.username {
            Some(username) if check.is_authenticated => AuthStatus::Authenticated(User { username }),
            _ => AuthStatus::Anonymous,
        };
        debug!("Auth initialized: {:?}", self.status);
    }

    pub fn status(&self) -> &AuthStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == AuthStatus::Loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    pub fn user(&self) -> Option<&User> {
        match &self.status {
            AuthStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// On failure the current state is left untouched
    pub fn login(&mut self, username: &str, password: &str) -> Result<LoginOutcome> {
        let outcome = self.store.lock().login(username, password)?;
        if let LoginOutcome::Success { username } = &outcome {
            self.status = AuthStatus::Authenticated(User {
                username: username.clone(),
            });
        }
        Ok(outcome)
    }

    /// The in-memory user is cleared even if the cookies could not be removed
    pub fn logout(&mut self) -> Result<()> {
        let result = self.store.lock().logout();
        self.status = AuthStatus::Anonymous;
        result.map_err(Into::into)
    }
}
