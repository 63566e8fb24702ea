//! Quiz Downloader Core Library
//!
//! Fetches published quiz question sheets, normalizes them into uniform
//! question/answer records despite inconsistent source formatting, and
//! persists the result for later lookup.
//!
//! # Architecture
//!
//! Data flows leaf-first through these modules:
//! - [`source`] - Ordered registry of remote sheets
//! - [`fetch`] - Single bounded GET per sheet, typed failures
//! - [`parser`] - Tabular parse with a positional fallback
//! - [`aggregate`] - Sequential fetch-and-parse across all sources
//! - [`persist`] - JSON and CSV writers, JSON read-back
//! - [`search`] - Case-insensitive keyword lookup over an aggregate

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod fetch;
pub mod parser;
pub mod persist;
pub mod record;
pub mod search;
pub mod source;

mod user_agent;

// Re-export commonly used types
pub use aggregate::{
    AggregateObserver, AggregateResult, Aggregator, DEFAULT_PACING, SourceRecords, TracingObserver,
};
pub use fetch::{FetchConfig, FetchError, Fetcher, HttpFetcher};
pub use parser::{ParseOutcome, ParseStrategy, parse_questions};
pub use persist::{OutputFormat, PersistError, read_aggregate, write_aggregate, write_records};
pub use record::QuestionRecord;
pub use search::search;
pub use source::{SourceDescriptor, SourceError, SourceRegistry};
