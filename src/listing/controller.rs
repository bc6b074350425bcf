use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error};

use super::state::{ActiveQuery, ListingError, ListingState};
use crate::constants::LIST_FIELDS;
use crate::directory::{Country, CountryDirectory};
use crate::utils::DirectoryError;

struct Inner {
    /// Bumped by every action; responses from older actions are dropped
    generation: u64,
    /// Full list from the last successful list-all
    canonical: Vec<Country>,
    state: ListingState,
    query: ActiveQuery,
}

/// Drives the country listing: list-all, search, region and language filters.
///
/// Methods take `&self` so that a newer action can start while an older
/// request is still in flight; whichever action started last decides what is
/// displayed.
pub struct ListingController {
    directory: Arc<dyn CountryDirectory>,
    inner: Mutex<Inner>,
}

impl ListingController {
    pub fn new(directory: Arc<dyn CountryDirectory>) -> Self {
        Self {
            directory,
            inner: Mutex::new(Inner {
                generation: 0,
                canonical: Vec::new(),
                state: ListingState::Loading,
                query: ActiveQuery::All,
            }),
        }
    }

    pub fn state(&self) -> ListingState {
        self.inner.lock().state.clone()
    }

    pub fn query(&self) -> ActiveQuery {
        self.inner.lock().query.clone()
    }

    /// Countries currently displayed; empty unless the state is `Ready`
    pub fn displayed(&self) -> Vec<Country> {
        match &self.inner.lock().state {
            ListingState::Ready(countries) => countries.clone(),
            _ => Vec::new(),
        }
    }

    /// Canonical set as last fetched by [`ListingController::mount`]
    pub fn canonical(&self) -> Vec<Country> {
        self.inner.lock().canonical.clone()
    }

    /// Start a new action: invalidate older ones and record the query
    fn begin(&self, query: ActiveQuery, loading: bool) -> u64 {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.query = query;
        if loading {
            inner.state = ListingState::Loading;
        }
        inner.generation
    }

    /// Apply `update` unless a newer action started meanwhile
    fn finish(&self, generation: u64, update: impl FnOnce(&mut Inner)) -> bool {
        let mut inner = self.inner.lock();
        if inner.generation != generation {
            debug!(
                "Discarding stale response (generation {} < {})",
                generation, inner.generation
            );
            return false;
        }
        update(&mut inner);
        true
    }

    fn restore_canonical(&self, query: ActiveQuery) {
        let generation = self.begin(query, false);
        self.finish(generation, |inner| {
            inner.state = ListingState::Ready(inner.canonical.clone());
        });
    }

    /// Fetch the canonical set
    pub async fn mount(&self) {
        let generation = self.begin(ActiveQuery::All, true);
        let result = self.directory.all(LIST_FIELDS).await;

        self.finish(generation, |inner| match result {
            Ok(countries) => {
                debug!("Loaded {} countries", countries.len());
                inner.canonical = countries.clone();
                inner.state = ListingState::Ready(countries);
            }
            Err(err) => {
                error!("Error fetching countries: {}", err);
                inner.state = ListingState::Error(ListingError::FetchFailed);
            }
        });
    }

    /// Search by name. An empty term restores the canonical set locally.
    pub async fn search(&self, term: &str) {
        if term.is_empty() {
            self.restore_canonical(ActiveQuery::All);
            return;
        }

        let generation = self.begin(ActiveQuery::Search(term.to_string()), true);
        let result = self.directory.search_by_name(term).await;
        self.apply_remote(generation, result, || ListingError::SearchFailed {
            term: term.to_string(),
        });
    }

    /// Filter by region. Replaces any language filter.
    pub async fn filter_by_region(&self, region: &str) {
        if region.is_empty() {
            self.restore_canonical(ActiveQuery::All);
            return;
        }

        let generation = self.begin(ActiveQuery::Region(region.to_string()), true);
        let result = self.directory.by_region(region).await;
        self.apply_remote(generation, result, || ListingError::RegionFailed {
            region: region.to_string(),
        });
    }

    /// Filter the canonical set by spoken language without touching the network
    pub fn filter_by_language(&self, language: &str) {
        if language.is_empty() {
            self.restore_canonical(ActiveQuery::All);
            return;
        }

        let generation = self.begin(ActiveQuery::Language(language.to_string()), false);
        self.finish(generation, |inner| {
            let matches: Vec<Country> = inner
                .canonical
                .iter()
                .filter(|country| country.speaks(language))
                .cloned()
                .collect();

            inner.state = if matches.is_empty() {
                ListingState::Error(ListingError::NoLanguageMatch {
                    language: language.to_string(),
                })
            } else {
                ListingState::Ready(matches)
            };
        });
    }

    /// Drop every filter and show the canonical set again
    pub fn clear_filters(&self) {
        self.restore_canonical(ActiveQuery::All);
    }

    fn apply_remote(
        &self,
        generation: u64,
        result: Result<Vec<Country>, DirectoryError>,
        on_error: impl FnOnce() -> ListingError,
    ) {
        self.finish(generation, |inner| match result {
            Ok(countries) => inner.state = ListingState::Ready(countries),
            Err(err) => {
                let listing_error = on_error();
                error!("{}: {}", listing_error, err);
                inner.state = ListingState::Error(listing_error);
            }
        });
    }
}
