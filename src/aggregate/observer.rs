//! Progress events emitted while aggregating.

use tracing::{info, warn};

use crate::fetch::FetchError;
use crate::source::SourceDescriptor;

/// Receives per-source progress from the [`Aggregator`](super::Aggregator).
///
/// All methods default to no-ops so sinks implement only what they show.
pub trait AggregateObserver: Send + Sync {
    /// A source is about to be fetched.
    fn on_source_started(&self, _source: &SourceDescriptor) {}

    /// A source was fetched and parsed into `count` records.
    fn on_source_completed(&self, _source: &SourceDescriptor, _count: usize) {}

    /// A source could not be fetched; it contributes no records.
    fn on_source_failed(&self, _source: &SourceDescriptor, _error: &FetchError) {}
}

/// Reports progress as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl AggregateObserver for TracingObserver {
    fn on_source_started(&self, source: &SourceDescriptor) {
        info!(source = %source.key, game = %source.display_name, "Downloading");
    }

    fn on_source_completed(&self, source: &SourceDescriptor, count: usize) {
        info!(source = %source.key, records = count, "Download complete");
    }

    fn on_source_failed(&self, source: &SourceDescriptor, error: &FetchError) {
        warn!(source = %source.key, error = %error, "Download failed");
    }
}
