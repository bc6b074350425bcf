use anyhow::Result;
use tracing::debug;

use super::{AuthState, SharedSessionStore};
use crate::directory::Country;
use crate::session::FavoriteEntry;

/// In-memory mirror of the stored favorites, gated on authentication
pub struct FavoritesState {
    store: SharedSessionStore,
    favorites: Vec<FavoriteEntry>,
    /// Authentication seen by the last sync
    seen_authenticated: Option<bool>,
}

impl FavoritesState {
    pub fn new(store: SharedSessionStore) -> Self {
        Self {
            store,
            favorites: Vec::new(),
            seen_authenticated: None,
        }
    }

    /// Follow an authentication transition.
    ///
    /// Becoming authenticated reloads from the store, becoming anonymous clears
    /// the in-memory list only. Nothing happens while auth is still loading.
    pub fn sync(&mut self, auth: &AuthState) {
        if auth.is_loading() {
            return;
        }
        let authenticated = auth.is_authenticated();
        if self.seen_authenticated == Some(authenticated) {
            return;
        }
        self.seen_authenticated = Some(authenticated);

        self.favorites = if authenticated {
            self.store.lock().favorites()
        } else {
            Vec::new()
        };
        debug!("Favorites synced: {} entries", self.favorites.len());
    }

    pub fn list(&self) -> &[FavoriteEntry] {
        &self.favorites
    }

    pub fn contains(&self, code: &str) -> bool {
        self.favorites.iter().any(|fav| fav.cca3 == code)
    }

    pub fn add(&mut self, auth: &AuthState, country: &Country) -> Result<()> {
        if !auth.is_authenticated() {
            return Ok(());
        }
        self.favorites = self.store.lock().add_favorite(FavoriteEntry::from(country))?;
        Ok(())
    }

    pub fn remove(&mut self, auth: &AuthState, code: &str) -> Result<()> {
        if !auth.is_authenticated() {
            return Ok(());
        }
        self.favorites = self.store.lock().remove_favorite(code)?;
        Ok(())
    }

    /// Add or remove `country`; returns whether it is a favorite afterwards
    pub fn toggle(&mut self, auth: &AuthState, country: &Country) -> Result<bool> {
        if self.contains(&country.cca3) {
            self.remove(auth, &country.cca3)?;
        } else {
            self.add(auth, country)?;
        }
        Ok(self.contains(&country.cca3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FAVORITES_COOKIE;
    use crate::directory::{CountryName, Flags};
    use crate::session::{CredentialTable, MemoryCookieJar, SessionStore};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn country(code: &str, name: &str) -> Country {
        Country {
            cca3: code.to_string(),
            name: CountryName {
                common: name.to_string(),
                official: name.to_string(),
            },
            capital: vec![],
            region: "Europe".to_string(),
            subregion: None,
            population: 10,
            flags: Flags::default(),
            languages: Default::default(),
            currencies: Default::default(),
            borders: vec![],
            tld: vec![],
        }
    }

    fn setup() -> (SharedSessionStore, AuthState, FavoritesState) {
        let store = Arc::new(Mutex::new(SessionStore::new(
            Box::new(MemoryCookieJar::new()),
            CredentialTable::default(),
        )));
        let mut auth = AuthState::new(store.clone());
        auth.initialize();
        let favorites = FavoritesState::new(store.clone());
        (store, auth, favorites)
    }

    #[test]
    fn test_mutations_are_noops_when_anonymous() {
        let (store, auth, mut favorites) = setup();
        favorites.sync(&auth);

        favorites.add(&auth, &country("DEU", "Germany")).unwrap();
        favorites.remove(&auth, "DEU").unwrap();
        assert!(favorites.list().is_empty());
        assert_eq!(store.lock().jar().get(FAVORITES_COOKIE), None);
    }

    #[test]
    fn test_sync_waits_for_auth_check() {
        let store = Arc::new(Mutex::new(SessionStore::new(
            Box::new(MemoryCookieJar::new()),
            CredentialTable::default(),
        )));
        store.lock().login("user1", "password1").unwrap();
        store
            .lock()
            .add_favorite(FavoriteEntry::from(&country("FRA", "France")))
            .unwrap();

        let mut auth = AuthState::new(store.clone());
        let mut favorites = FavoritesState::new(store);
        favorites.sync(&auth);
        assert!(favorites.list().is_empty());

        auth.initialize();
        favorites.sync(&auth);
        assert!(favorites.contains("FRA"));
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let (_store, mut auth, mut favorites) = setup();
        auth.login("user1", "password1").unwrap();
        favorites.sync(&auth);

        let peru = country("PER", "Peru");
        assert!(favorites.toggle(&auth, &peru).unwrap());
        assert!(favorites.contains("PER"));
        assert!(!favorites.toggle(&auth, &peru).unwrap());
        assert!(!favorites.contains("PER"));
    }

    #[test]
    fn test_logout_then_other_user_starts_empty() {
        let (store, mut auth, mut favorites) = setup();
        auth.login("user1", "password1").unwrap();
        favorites.sync(&auth);
        favorites.add(&auth, &country("DEU", "Germany")).unwrap();
        favorites.add(&auth, &country("FRA", "France")).unwrap();
        assert_eq!(favorites.list().len(), 2);

        auth.logout().unwrap();
        favorites.sync(&auth);
        assert!(favorites.list().is_empty());
        assert_eq!(store.lock().jar().get(FAVORITES_COOKIE), None);

        auth.login("user2", "password2").unwrap();
        favorites.sync(&auth);
        assert!(favorites.list().is_empty());
    }
}
