use async_trait::async_trait;

use super::types::Country;
use crate::utils::DirectoryError;

/// Read-only access to a country directory service
///
/// Every call answers with a list; the by-code lookup answers with at most one
/// element.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryDirectory: Send + Sync {
    /// List every country, projected onto a comma-separated field list
    /// (empty means no projection)
    async fn all(&self, fields: &str) -> Result<Vec<Country>, DirectoryError>;

    /// Search by (partial) name. "Not found" is an empty list, not an error.
    async fn search_by_name(&self, term: &str) -> Result<Vec<Country>, DirectoryError>;

    /// List the countries of one region
    async fn by_region(&self, region: &str) -> Result<Vec<Country>, DirectoryError>;

    /// Fetch one country by its alpha-3 code
    async fn by_code(&self, code: &str) -> Result<Vec<Country>, DirectoryError>;
}
