use anyhow::Result;
use std::sync::Arc;
use tracing::error;

use crate::constants::{MSG_COUNTRY_NOT_FOUND, MSG_DETAIL_FAILED};
use crate::directory::{Country, CountryDirectory};
use crate::state::{AuthState, FavoritesState};

/// What the detail page currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Ready(Box<Country>),
    Error(String),
}

/// Loads one country by code and toggles it in the favorites
pub struct DetailController {
    directory: Arc<dyn CountryDirectory>,
    state: DetailState,
}

impl DetailController {
    pub fn new(directory: Arc<dyn CountryDirectory>) -> Self {
        Self {
            directory,
            state: DetailState::Loading,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn country(&self) -> Option<&Country> {
        match &self.state {
            DetailState::Ready(country) => Some(&**country),
            _ => None,
        }
    }

    /// Fetch `code`, replacing whatever was loaded before
    pub async fn mount(&mut self, code: &str) {
        self.state = DetailState::Loading;

        self.state = match self.directory.by_code(code).await {
            Ok(countries) => match countries.into_iter().next() {
                Some(country) => DetailState::Ready(Box::new(country)),
                None => DetailState::Error(MSG_COUNTRY_NOT_FOUND.to_string()),
            },
            Err(err) => {
                error!("Error fetching country details for '{}': {}", code, err);
                DetailState::Error(MSG_DETAIL_FAILED.to_string())
            }
        };
    }

    /// Toggle the loaded country in the favorites; `None` when nothing is loaded
    pub fn toggle_favorite(
        &self,
        auth: &AuthState,
        favorites: &mut FavoritesState,
    ) -> Result<Option<bool>> {
        match self.country() {
            Some(country) => Ok(Some(favorites.toggle(auth, country)?)),
            None => Ok(None),
        }
    }
}
