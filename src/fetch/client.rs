//! HTTP-backed [`Fetcher`] implementation.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, instrument, warn};
use url::Url;

use super::constants::{DEFAULT_BASE_URL, FETCH_TIMEOUT_SECS};
use super::error::FetchError;
use super::Fetcher;
use crate::user_agent;

/// Settings for [`HttpFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Location resource paths are appended to.
    pub base_url: String,
    /// Bound on one request, connect through body.
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
        }
    }
}

/// Fetches sheets with a single bounded GET per call.
///
/// No retries and no backoff: a failed attempt is reported once and the
/// caller decides what to do with it.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    /// Creates a fetcher for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = build_client(config.timeout)?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Base location this fetcher targets.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins the base location and a resource path into a request URL.
    ///
    /// Plain `{base}/{path}` concatenation, so a base with its own path
    /// segment keeps it.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] when the result is not an http(s) URL.
    pub fn resource_url(&self, resource_path: &str) -> Result<Url, FetchError> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            resource_path.trim_start_matches('/')
        );
        let url = Url::parse(&joined).map_err(|_| FetchError::invalid_url(&joined))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::invalid_url(joined));
        }
        Ok(url)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip(self), fields(base = %self.base_url))]
    async fn fetch(&self, resource_path: &str) -> Result<String, FetchError> {
        let url = self.resource_url(resource_path)?;
        debug!(url = %url, "Fetching sheet");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url.as_str(), status.as_u16()));
        }

        // Charset declared by the server is ignored; sheets are always UTF-8.
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(url.as_str(), e))?;
        let text = String::from_utf8_lossy(&body).into_owned();

        debug!(url = %url, bytes = body.len(), "Sheet fetched");
        Ok(text)
    }
}

fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    match try_build_client(timeout, false) {
        Ok(client) => Ok(client),
        Err(BuildClientFailure::Panic) => {
            // Some sandboxed environments panic when querying system proxy
            // settings; retry without the system lookup.
            warn!("HTTP client hit system proxy panic; retrying without system proxy lookup");
            match try_build_client(timeout, true) {
                Ok(client) => Ok(client),
                Err(BuildClientFailure::Panic) => Err(FetchError::ClientBuild {
                    reason: "client construction panicked".to_string(),
                }),
                Err(BuildClientFailure::Build(error)) => Err(FetchError::ClientBuild {
                    reason: error.to_string(),
                }),
            }
        }
        Err(BuildClientFailure::Build(error)) => Err(FetchError::ClientBuild {
            reason: error.to_string(),
        }),
    }
}

enum BuildClientFailure {
    Panic,
    Build(reqwest::Error),
}

fn try_build_client(
    timeout: Duration,
    disable_system_proxy_lookup: bool,
) -> Result<Client, BuildClientFailure> {
    catch_unwind(AssertUnwindSafe(move || {
        let mut builder = base_builder(timeout);
        if disable_system_proxy_lookup {
            builder = builder.no_proxy();
        }
        builder.build().map_err(BuildClientFailure::Build)
    }))
    .map_err(|_| BuildClientFailure::Panic)?
}

fn base_builder(timeout: Duration) -> ClientBuilder {
    Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .user_agent(user_agent::default_user_agent())
        .gzip(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fetcher(base: &str) -> HttpFetcher {
        HttpFetcher::new(&FetchConfig {
            base_url: base.to_string(),
            ..FetchConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_fetch_config_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.base_url, "https://hiquiz.co.kr");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_resource_url_concatenates_base_and_path() {
        let url = fetcher("https://hiquiz.co.kr").resource_url("kkong.csv").unwrap();
        assert_eq!(url.as_str(), "https://hiquiz.co.kr/kkong.csv");
    }

    #[test]
    fn test_resource_url_keeps_base_path_segment() {
        let url = fetcher("http://example.com/data/")
            .resource_url("/garo.csv")
            .unwrap();
        assert_eq!(url.as_str(), "http://example.com/data/garo.csv");
    }

    #[test]
    fn test_resource_url_rejects_non_http_base() {
        let err = fetcher("ftp://example.com").resource_url("a.csv").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));

        let err = fetcher("not a base").resource_url("a.csv").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }
}
