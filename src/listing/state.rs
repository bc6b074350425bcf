use thiserror::Error;

use crate::constants::{MSG_LOAD_FAILED, MSG_NO_CRITERIA_MATCH};
use crate::directory::Country;

/// What the listing page currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ListingState {
    Loading,
    Ready(Vec<Country>),
    Error(ListingError),
}

/// Why the listing page shows a message instead of countries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    #[error("{}", MSG_LOAD_FAILED)]
    FetchFailed,

    #[error("No countries found matching \"{term}\"")]
    SearchFailed { term: String },

    #[error("No countries found in region \"{region}\"")]
    RegionFailed { region: String },

    /// The local language filter matched nothing; the data itself is fine
    #[error("No countries found with language \"{language}\"")]
    NoLanguageMatch { language: String },
}

impl ListingError {
    /// Retrying re-runs a local filter rather than network I/O
    pub fn retry_is_local(&self) -> bool {
        matches!(self, Self::NoLanguageMatch { .. })
    }
}

/// The single filter currently applied. Filters do not compose: applying
/// one replaces whatever was active before.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActiveQuery {
    #[default]
    All,
    Search(String),
    Region(String),
    Language(String),
}

impl ActiveQuery {
    pub fn region(&self) -> Option<&str> {
        match self {
            Self::Region(region) => Some(region),
            _ => None,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match self {
            Self::Language(language) => Some(language),
            _ => None,
        }
    }

    /// Message for a successful query that matched nothing
    pub fn empty_message(&self) -> String {
        match self {
            Self::Search(term) => format!("No countries found matching \"{}\"", term),
            _ => MSG_NO_CRITERIA_MATCH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ListingError::FetchFailed.to_string(),
            "Failed to load countries. Please try again later."
        );
        assert_eq!(
            ListingError::RegionFailed {
                region: "Oceania".to_string()
            }
            .to_string(),
            "No countries found in region \"Oceania\""
        );
    }

    #[test]
    fn test_only_language_misses_retry_locally() {
        assert!(ListingError::NoLanguageMatch {
            language: "klingon".to_string()
        }
        .retry_is_local());
        assert!(!ListingError::SearchFailed {
            term: "x".to_string()
        }
        .retry_is_local());
        assert!(!ListingError::FetchFailed.retry_is_local());
    }

    #[test]
    fn test_empty_message_names_search_term() {
        assert_eq!(
            ActiveQuery::Search("Nonexistent".to_string()).empty_message(),
            "No countries found matching \"Nonexistent\""
        );
        assert_eq!(
            ActiveQuery::Region("Asia".to_string()).empty_message(),
            "No countries found matching your criteria."
        );
    }
}
