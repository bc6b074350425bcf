use anyhow::{Context as _, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

use super::traits::CountryDirectory;
use super::types::Country;
use crate::utils::DirectoryError;

/// `CountryDirectory` backed by the REST Countries HTTP API
pub struct RestCountriesClient {
    client: Client,
    base_url: Url,
}

impl RestCountriesClient {
    /// Create a client for `base_url`. A zero timeout keeps reqwest's default.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid directory base url: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Directory base url cannot carry paths: {}", base_url);
        }

        let mut builder = Client::builder();
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Base url followed by the given path segments, each percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url, DirectoryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DirectoryError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, DirectoryError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| DirectoryError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| DirectoryError::Transport {
                url: url.to_string(),
                source,
            })?;
        serde_json::from_str(&body).map_err(|source| DirectoryError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl CountryDirectory for RestCountriesClient {
    async fn all(&self, fields: &str) -> Result<Vec<Country>, DirectoryError> {
        let mut url = self.endpoint(&["all"])?;
        if !fields.is_empty() {
            url.set_query(Some(&format!("fields={}", fields)));
        }
        self.get(url).await.inspect_err(|err| {
            error!("Error fetching all countries: {}", err);
        })
    }

    async fn search_by_name(&self, term: &str) -> Result<Vec<Country>, DirectoryError> {
        let url = self.endpoint(&["name", term])?;
        match self.get(url).await {
            Err(err) if err.status() == Some(StatusCode::NOT_FOUND.as_u16()) => {
                debug!("No countries named '{}'", term);
                Ok(Vec::new())
            }
            Err(err) => {
                error!("Error searching countries by name: {}", err);
                Err(err)
            }
            ok => ok,
        }
    }

    async fn by_region(&self, region: &str) -> Result<Vec<Country>, DirectoryError> {
        let url = self.endpoint(&["region", region])?;
        self.get(url).await.inspect_err(|err| {
            error!("Error fetching countries by region: {}", err);
        })
    }

    async fn by_code(&self, code: &str) -> Result<Vec<Country>, DirectoryError> {
        let url = self.endpoint(&["alpha", code])?;
        self.get(url).await.inspect_err(|err| {
            error!("Error fetching country by code: {}", err);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RestCountriesClient {
        RestCountriesClient::new("https://restcountries.com/v3.1", 0).unwrap()
    }

    #[test]
    fn test_endpoint_paths() {
        let client = client();
        assert_eq!(
            client.endpoint(&["alpha", "DEU"]).unwrap().as_str(),
            "https://restcountries.com/v3.1/alpha/DEU"
        );
        assert_eq!(
            client.endpoint(&["region", "Europe"]).unwrap().as_str(),
            "https://restcountries.com/v3.1/region/Europe"
        );
    }

    #[test]
    fn test_endpoint_encodes_search_terms() {
        let url = client().endpoint(&["name", "south sudan/x"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://restcountries.com/v3.1/name/south%20sudan%2Fx"
        );
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let client = RestCountriesClient::new("http://localhost:8080/v3.1/", 5).unwrap();
        assert_eq!(
            client.endpoint(&["all"]).unwrap().as_str(),
            "http://localhost:8080/v3.1/all"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(RestCountriesClient::new("not a url", 0).is_err());
        assert!(RestCountriesClient::new("mailto:someone@example.com", 0).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) on localhost is closed in practically every environment
        let client = RestCountriesClient::new("http://127.0.0.1:9", 2).unwrap();
        let err = client.by_region("Europe").await.unwrap_err();
        assert!(matches!(err, DirectoryError::Transport { .. }));
        assert_eq!(err.status(), None);
    }
}
