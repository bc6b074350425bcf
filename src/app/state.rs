use anyhow::Result;
use chrono::Duration;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

use crate::app::Config;
use crate::directory::{CountryDirectory, RestCountriesClient};
use crate::session::{CookieJar, FileCookieJar, LoginOutcome, MemoryCookieJar, SessionStore};
use crate::state::{AuthState, FavoritesState, SharedSessionStore};

/// Everything one application run shares: created at startup, dropped at exit
pub struct AppContext {
    /// Configuration
    pub config: Config,
    /// Remote country directory
    pub directory: Arc<dyn CountryDirectory>,
    /// Cookie-backed session store
    pub store: SharedSessionStore,
    /// Current user
    pub auth: AuthState,
    /// Current user's favorites
    pub favorites: FavoritesState,
}

impl AppContext {
    /// Build the context from configuration.
    ///
    /// `ephemeral` keeps cookies in memory so nothing touches the disk.
    pub fn new(config: Config, ephemeral: bool) -> Result<Self> {
        let directory = Arc::new(RestCountriesClient::new(
            &config.directory.base_url,
            config.directory.timeout_secs,
        )?);

        let jar: Box<dyn CookieJar> = if ephemeral {
            Box::new(MemoryCookieJar::new())
        } else {
            let path = config.session.cookie_path()?;
            info!("Using cookie jar at {}", path.display());
            Box::new(FileCookieJar::new(path))
        };

        Ok(Self::with_parts(config, directory, jar))
    }

    /// Assemble a context from ready-made parts and run the initial auth check
    pub fn with_parts(
        config: Config,
        directory: Arc<dyn CountryDirectory>,
        jar: Box<dyn CookieJar>,
    ) -> Self {
        let store = SessionStore::new(jar, config.credentials.clone())
            .with_lifetime(Duration::hours(config.session.lifetime_hours));
        let store: SharedSessionStore = Arc::new(Mutex::new(store));

        let mut auth = AuthState::new(store.clone());
        let mut favorites = FavoritesState::new(store.clone());
        auth.initialize();
        favorites.sync(&auth);

        Self {
            config,
            directory,
            store,
            auth,
            favorites,
        }
    }

    /// Log in and bring the favorites in line with the new user
    pub fn login(&mut self, username: &str, password: &str) -> Result<LoginOutcome> {
        let outcome = self.auth.login(username, password)?;
        self.favorites.sync(&self.auth);
        Ok(outcome)
    }

    /// Log out and forget the favorites
    pub fn logout(&mut self) -> Result<()> {
        let result = self.auth.logout();
        self.favorites.sync(&self.auth);
        result
    }

    /// Star state for a country card: `None` when nobody is logged in
    pub fn favorite_marker(&self, code: &str) -> Option<bool> {
        self.auth
            .is_authenticated()
            .then(|| self.favorites.contains(code))
    }
}
