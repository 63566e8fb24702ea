//! Fetch-and-parse runs across registered sources.
//!
//! The [`Aggregator`] walks a [`SourceRegistry`] in order, one source at a
//! time: fetch, parse, record. A failed fetch costs only that source, which
//! is recorded with no records; the run always completes.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use quizdl_core::aggregate::Aggregator;
//! use quizdl_core::fetch::{FetchConfig, HttpFetcher};
//! use quizdl_core::source::SourceRegistry;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = HttpFetcher::new(&FetchConfig::default())?;
//! let aggregator = Aggregator::new(Arc::new(fetcher));
//! let result = aggregator.run_all(&SourceRegistry::builtin()).await;
//! println!("{} questions", result.total_count());
//! # Ok(())
//! # }
//! ```

mod observer;
mod result;

pub use observer::{AggregateObserver, TracingObserver};
pub use result::{AggregateResult, SourceRecords};

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, SubsecRound};
use tracing::{debug, info, instrument};

use crate::fetch::{FetchError, Fetcher};
use crate::parser::{ParseOutcome, parse_questions};
use crate::source::{SourceDescriptor, SourceError, SourceRegistry};

/// Default pause between consecutive sources (politeness toward the host).
pub const DEFAULT_PACING: Duration = Duration::from_millis(500);

/// Sequential fetch-and-parse driver.
#[derive(Clone)]
pub struct Aggregator {
    fetcher: Arc<dyn Fetcher>,
    observer: Arc<dyn AggregateObserver>,
    pacing: Duration,
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("pacing", &self.pacing)
            .finish_non_exhaustive()
    }
}

impl Aggregator {
    /// Creates an aggregator with tracing progress and default pacing.
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            observer: Arc::new(TracingObserver),
            pacing: DEFAULT_PACING,
        }
    }

    /// Replaces the progress observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn AggregateObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Sets the pause between sources; `Duration::ZERO` disables it.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Pause between consecutive sources.
    #[must_use]
    pub fn pacing(&self) -> Duration {
        self.pacing
    }

    /// Fetches and parses one source, reporting to the observer.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] if the sheet could not be retrieved.
    #[instrument(skip(self, source), fields(source = %source.key))]
    pub async fn run_source(&self, source: &SourceDescriptor) -> Result<ParseOutcome, FetchError> {
        self.observer.on_source_started(source);
        match self.fetcher.fetch(&source.resource_path).await {
            Ok(raw) => {
                let outcome = parse_questions(&raw, source);
                debug!(
                    records = outcome.len(),
                    skipped = outcome.skipped,
                    strategy = %outcome.strategy,
                    "Source parsed"
                );
                self.observer.on_source_completed(source, outcome.len());
                Ok(outcome)
            }
            Err(error) => {
                self.observer.on_source_failed(source, &error);
                Err(error)
            }
        }
    }

    /// Runs every source in registry order.
    ///
    /// Fetch failures are recovered as empty record lists and listed in
    /// [`AggregateResult::failed_sources`].
    pub async fn run_all(&self, registry: &SourceRegistry) -> AggregateResult {
        let mut result = AggregateResult::new(Local::now().trunc_subsecs(0));

        for (index, source) in registry.iter().enumerate() {
            if index > 0 && !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }
            self.collect(&mut result, source).await;
        }

        info!(
            sources = result.source_count(),
            failed = result.failed_sources().len(),
            total = result.total_count(),
            "Aggregation complete"
        );
        result
    }

    /// Runs the single source picked by key or 1-based index.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnknownSourceKey`] if the selection matches no
    /// source; fetch failures are recovered as in [`run_all`](Self::run_all).
    pub async fn run_selected(
        &self,
        registry: &SourceRegistry,
        selection: &str,
    ) -> Result<AggregateResult, SourceError> {
        let source = registry.select(selection)?;
        let mut result = AggregateResult::new(Local::now().trunc_subsecs(0));
        self.collect(&mut result, source).await;
        Ok(result)
    }

    async fn collect(&self, result: &mut AggregateResult, source: &SourceDescriptor) {
        match self.run_source(source).await {
            Ok(outcome) => result.push(source.key.clone(), outcome.into_records()),
            Err(_) => result.push_failed(source.key.clone()),
        }
    }
}
