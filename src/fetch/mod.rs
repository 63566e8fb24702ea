//! Retrieval of raw sheet text.
//!
//! # Overview
//!
//! - [`Fetcher`] - Async trait the aggregator fetches through
//! - [`HttpFetcher`] - Single-attempt GET against `{base}/{resource_path}`
//!   with a bounded timeout, decoding the body as UTF-8 whatever the
//!   response declares
//! - [`FetchError`] - Typed transport failure, scoped to one source
//!
//! # Example
//!
//! ```no_run
//! use quizdl_core::fetch::{FetchConfig, Fetcher, HttpFetcher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = HttpFetcher::new(&FetchConfig::default())?;
//! let text = fetcher.fetch("kkong.csv").await?;
//! println!("{} bytes", text.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod error;

pub use client::{FetchConfig, HttpFetcher};
pub use constants::{DEFAULT_BASE_URL, FETCH_TIMEOUT_SECS};
pub use error::FetchError;

use async_trait::async_trait;

/// Source of raw sheet text, addressed by resource path.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Retrieves the full text behind `resource_path`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] for any transport, timeout or status failure.
    async fn fetch(&self, resource_path: &str) -> Result<String, FetchError>;
}
