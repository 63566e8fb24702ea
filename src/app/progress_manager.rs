//! Progress UI (spinner) for download runs.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use quizdl_core::{AggregateObserver, FetchError, SourceDescriptor};
use tracing::warn;

/// Spinner that follows the aggregator source by source.
///
/// Failures are printed above the spinner so they stay visible after it
/// is cleared.
#[derive(Debug, Clone)]
pub(crate) struct SpinnerObserver {
    spinner: ProgressBar,
}

impl SpinnerObserver {
    pub(crate) fn start(total: usize) -> Self {
        let spinner = ProgressBar::new(u64::try_from(total).unwrap_or(u64::MAX));
        spinner.set_style(
            ProgressStyle::with_template("{spinner} [{pos}/{len}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self { spinner }
    }

    pub(crate) fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl AggregateObserver for SpinnerObserver {
    fn on_source_started(&self, source: &SourceDescriptor) {
        self.spinner
            .set_message(format!("Downloading {}...", source.display_name));
    }

    fn on_source_completed(&self, source: &SourceDescriptor, count: usize) {
        self.spinner.inc(1);
        self.spinner
            .set_message(format!("{}: {count} questions", source.display_name));
    }

    fn on_source_failed(&self, source: &SourceDescriptor, error: &FetchError) {
        self.spinner.inc(1);
        self.spinner.suspend(|| {
            warn!(source = %source.key, error = %error, "Download failed");
        });
    }
}
