use serde::{Deserialize, Serialize};

use crate::directory::{Country, CountryName, Flags};

/// Authenticated-user record stored in the session cookie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    pub is_authenticated: bool,
    /// Creation time, milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// Simplified projection of a [`Country`] kept in the favorites cookie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub name: CountryName,
    pub cca3: String,
    pub flags: Flags,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub region: String,
}

impl From<&Country> for FavoriteEntry {
    fn from(country: &Country) -> Self {
        Self {
            name: country.name.clone(),
            cca3: country.cca3.clone(),
            flags: country.flags.clone(),
            capital: country.capital.clone(),
            population: country.population,
            region: country.region.clone(),
        }
    }
}

/// Favorites are rendered with the same card as listed countries
impl From<&FavoriteEntry> for Country {
    fn from(entry: &FavoriteEntry) -> Self {
        Self {
            cca3: entry.cca3.clone(),
            name: entry.name.clone(),
            capital: entry.capital.clone(),
            region: entry.region.clone(),
            subregion: None,
            population: entry.population,
            flags: entry.flags.clone(),
            languages: Default::default(),
            currencies: Default::default(),
            borders: Vec::new(),
            tld: Vec::new(),
        }
    }
}

/// Result of a login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success { username: String },
    Failure { message: String },
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Result of checking the stored session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthCheck {
    pub is_authenticated: bool,
    pub username: Option<String>,
}

impl AuthCheck {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(username: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            username: Some(username.into()),
        }
    }
}
