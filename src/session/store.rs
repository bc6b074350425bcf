use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use super::cookies::CookieJar;
use super::credentials::CredentialTable;
use super::types::{AuthCheck, FavoriteEntry, LoginOutcome, Session};
use crate::constants::{
    FAVORITES_COOKIE, MSG_INVALID_CREDENTIALS, SESSION_COOKIE, SESSION_LIFETIME_HOURS,
};
use crate::utils::SessionError;

/// Session and favorites persistence on top of a cookie jar.
///
/// Both cookies expire `lifetime` after their last write. Every favorites
/// mutation rewrites the entire list, so the list can never outgrow what one
/// cookie holds (see [`crate::constants::MAX_COOKIE_BYTES`]).
pub struct SessionStore {
    jar: Box<dyn CookieJar>,
    credentials: CredentialTable,
    lifetime: Duration,
}

impl SessionStore {
    pub fn new(jar: Box<dyn CookieJar>, credentials: CredentialTable) -> Self {
        Self {
            jar,
            credentials,
            lifetime: Duration::hours(SESSION_LIFETIME_HOURS),
        }
    }

    /// Override the one-day session lifetime
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn jar(&self) -> &dyn CookieJar {
        self.jar.as_ref()
    }

    fn expiry(&self) -> DateTime<Utc> {
        Utc::now() + self.lifetime
    }

    /// Check credentials and, on a match, write a fresh session cookie
    pub fn login(&mut self, username: &str, password: &str) -> Result<LoginOutcome, SessionError> {
        let Some(username) = self.credentials.verify(username, password).map(str::to_string) else {
            info!("Rejected login attempt for '{}'", username);
            return Ok(LoginOutcome::Failure {
                message: MSG_INVALID_CREDENTIALS.to_string(),
            });
        };

        let session = Session {
            username: username.clone(),
            is_authenticated: true,
            timestamp: Utc::now().timestamp_millis(),
        };
        let value = serde_json::to_string(&session)?;
        self.jar.set(SESSION_COOKIE, &value, self.expiry())?;

        info!("Logged in as '{}'", username);
        Ok(LoginOutcome::Success { username })
    }

    /// Drop the session and the favorites list
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.jar.remove(SESSION_COOKIE)?;
        self.jar.remove(FAVORITES_COOKIE)?;
        Ok(())
    }

    /// Read the session cookie. Never fails: anything unusable means logged out.
    pub fn check_auth(&mut self) -> AuthCheck {
        self.check_auth_at(Utc::now())
    }

    fn check_auth_at(&mut self, now: DateTime<Utc>) -> AuthCheck {
        let Some(raw) = self.jar.get(SESSION_COOKIE) else {
            return AuthCheck::anonymous();
        };

        let session: Session = match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(err) => {
                warn!("Error parsing session data: {}", err);
                return AuthCheck::anonymous();
            }
        };

        let elapsed = now.timestamp_millis() - session.timestamp;
        if elapsed > self.lifetime.num_milliseconds() {
            info!("Session for '{}' expired", session.username);
            if let Err(err) = self.jar.remove(SESSION_COOKIE) {
                warn!("Could not delete expired session: {}", err);
            }
            return AuthCheck::anonymous();
        }

        AuthCheck::authenticated(session.username)
    }

    /// Stored favorites; a missing or malformed cookie reads as an empty list
    pub fn favorites(&self) -> Vec<FavoriteEntry> {
        let Some(raw) = self.jar.get(FAVORITES_COOKIE) else {
            return Vec::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!("Ignoring malformed favorites data: {}", err);
            Vec::new()
        })
    }

    /// Append `entry` unless its code is already present
    pub fn add_favorite(&mut self, entry: FavoriteEntry) -> Result<Vec<FavoriteEntry>, SessionError> {
        let mut favorites = self.favorites();
        if favorites.iter().any(|fav| fav.cca3 == entry.cca3) {
            return Ok(favorites);
        }

        favorites.push(entry);
        self.write_favorites(&favorites)?;
        Ok(favorites)
    }

    /// Remove every entry with `code`; the list is written back even if unchanged
    pub fn remove_favorite(&mut self, code: &str) -> Result<Vec<FavoriteEntry>, SessionError> {
        let mut favorites = self.favorites();
        favorites.retain(|fav| fav.cca3 != code);
        self.write_favorites(&favorites)?;
        Ok(favorites)
    }

    fn write_favorites(&mut self, favorites: &[FavoriteEntry]) -> Result<(), SessionError> {
        let value = serde_json::to_string(favorites)?;
        self.jar.set(FAVORITES_COOKIE, &value, self.expiry())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{CountryName, Flags};
    use crate::session::MemoryCookieJar;
    use pretty_assertions::assert_eq;

    fn store() -> SessionStore {
        SessionStore::new(Box::new(MemoryCookieJar::new()), CredentialTable::default())
    }

    fn entry(code: &str, name: &str) -> FavoriteEntry {
        FavoriteEntry {
            name: CountryName {
                common: name.to_string(),
                official: name.to_string(),
            },
            cca3: code.to_string(),
            flags: Flags::default(),
            capital: vec![],
            population: 1,
            region: "Europe".to_string(),
        }
    }

    #[test]
    fn test_valid_logins_authenticate() {
        for (user, pass) in [("user1", "password1"), ("user2", "password2")] {
            let mut store = store();
            let outcome = store.login(user, pass).unwrap();
            assert_eq!(
                outcome,
                LoginOutcome::Success {
                    username: user.to_string()
                }
            );
            assert_eq!(store.check_auth(), AuthCheck::authenticated(user));
        }
    }

    #[test]
    fn test_invalid_login_writes_nothing() {
        let mut store = store();
        for (user, pass) in [("user1", "password2"), ("nobody", "password1"), ("", "")] {
            let outcome = store.login(user, pass).unwrap();
            assert_eq!(
                outcome,
                LoginOutcome::Failure {
                    message: "Invalid credentials".to_string()
                }
            );
        }
        assert_eq!(store.jar().get(SESSION_COOKIE), None);
        assert_eq!(store.check_auth(), AuthCheck::anonymous());
    }

    #[test]
    fn test_failed_login_keeps_existing_session() {
        let mut store = store();
        store.login("user1", "password1").unwrap();
        store.login("user2", "wrong").unwrap();
        assert_eq!(store.check_auth(), AuthCheck::authenticated("user1"));
    }

    #[test]
    fn test_expired_session_is_deleted() {
        let mut jar = MemoryCookieJar::new();
        let stale = Session {
            username: "user1".to_string(),
            is_authenticated: true,
            timestamp: (Utc::now() - Duration::hours(25)).timestamp_millis(),
        };
        jar.set(
            SESSION_COOKIE,
            &serde_json::to_string(&stale).unwrap(),
            Utc::now() + Duration::hours(1),
        )
        .unwrap();

        let mut store = SessionStore::new(Box::new(jar), CredentialTable::default());
        assert_eq!(store.check_auth(), AuthCheck::anonymous());
        assert_eq!(store.jar().get(SESSION_COOKIE), None);
    }

    #[test]
    fn test_session_just_inside_window_is_valid() {
        let mut store = store();
        store.login("user2", "password2").unwrap();
        let later = Utc::now() + Duration::hours(23);
        assert_eq!(store.check_auth_at(later), AuthCheck::authenticated("user2"));
    }

    #[test]
    fn test_unparsable_session_fails_open() {
        let mut jar = MemoryCookieJar::new();
        jar.set(SESSION_COOKIE, "{not json", Utc::now() + Duration::hours(1))
            .unwrap();
        let mut store = SessionStore::new(Box::new(jar), CredentialTable::default());
        assert_eq!(store.check_auth(), AuthCheck::anonymous());
    }

    #[test]
    fn test_add_favorite_is_idempotent() {
        let mut store = store();
        store.add_favorite(entry("DEU", "Germany")).unwrap();
        let favorites = store.add_favorite(entry("DEU", "Germany")).unwrap();
        assert_eq!(favorites, vec![entry("DEU", "Germany")]);
        assert_eq!(store.favorites().len(), 1);
    }

    #[test]
    fn test_remove_absent_favorite_is_noop() {
        let mut store = store();
        store.add_favorite(entry("FRA", "France")).unwrap();
        let favorites = store.remove_favorite("XYZ").unwrap();
        assert_eq!(favorites, vec![entry("FRA", "France")]);
    }

    #[test]
    fn test_add_then_remove_round_trip() {
        let mut store = store();
        store.add_favorite(entry("JPN", "Japan")).unwrap();
        store.remove_favorite("JPN").unwrap();
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn test_favorites_keep_insertion_order() {
        let mut store = store();
        store.add_favorite(entry("PER", "Peru")).unwrap();
        store.add_favorite(entry("CHL", "Chile")).unwrap();
        store.add_favorite(entry("ARG", "Argentina")).unwrap();
        let codes: Vec<_> = store.favorites().into_iter().map(|f| f.cca3).collect();
        assert_eq!(codes, vec!["PER", "CHL", "ARG"]);
    }

    #[test]
    fn test_malformed_favorites_read_as_empty() {
        let mut jar = MemoryCookieJar::new();
        jar.set(FAVORITES_COOKIE, "[{\"broken\":", Utc::now() + Duration::hours(1))
            .unwrap();
        let mut store = SessionStore::new(Box::new(jar), CredentialTable::default());
        assert!(store.favorites().is_empty());

        // A later add starts over from the empty list
        let favorites = store.add_favorite(entry("ITA", "Italy")).unwrap();
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_logout_clears_both_cookies() {
        let mut store = store();
        store.login("user1", "password1").unwrap();
        store.add_favorite(entry("DEU", "Germany")).unwrap();

        store.logout().unwrap();
        assert_eq!(store.jar().get(SESSION_COOKIE), None);
        assert_eq!(store.jar().get(FAVORITES_COOKIE), None);

        // Logging out twice is harmless
        store.logout().unwrap();
    }

    #[test]
    fn test_favorites_are_capped_by_cookie_size() {
        let mut store = store();
        let mut added = 0;
        let err = loop {
            let code = format!("C{:03}", added);
            match store.add_favorite(entry(&code, &"n".repeat(40))) {
                Ok(_) => added += 1,
                Err(err) => break err,
            }
        };
        assert!(matches!(err, SessionError::CookieTooLarge { .. }));
        // The rejected write left the previous list intact
        assert_eq!(store.favorites().len(), added);
    }
}
