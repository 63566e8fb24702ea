//! Download command handlers: fetch sources and save question files.

use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use quizdl_core::persist::per_source_path;
use quizdl_core::{
    AggregateResult, Aggregator, HttpFetcher, OutputFormat, SourceRegistry, TracingObserver,
    write_aggregate, write_records,
};
use tracing::{debug, info, warn};

use crate::ProcessExit;
use crate::app::config_runtime::Settings;
use crate::app::exit_handler::determine_exit_outcome;
use crate::app::progress_manager::SpinnerObserver;
use crate::app::terminal;
use crate::cli::{AllArgs, GameArgs};
use crate::output;

pub(crate) async fn run_all_command(
    settings: &Settings,
    registry: &SourceRegistry,
    args: &AllArgs,
) -> Result<ProcessExit> {
    let format = args.format.unwrap_or(settings.format);
    info!(sources = registry.len(), %format, "Downloading all games");

    let spinner = spinner_for(settings, registry.len());
    let aggregator = build_aggregator(settings, spinner.as_ref())?;
    let aggregate = aggregator.run_all(registry).await;
    if let Some(spinner) = &spinner {
        spinner.finish();
    }

    let written = save_per_source(settings, registry, &aggregate, format)?;

    if let Some(combined) = &args.combined {
        let path = settings.output_dir.join(combined);
        write_aggregate(&aggregate, &path)
            .with_context(|| format!("Failed to write combined file '{}'", path.display()))?;
        info!(path = %path.display(), total = aggregate.total_count(), "Combined file saved");
    }

    if !settings.is_quiet() {
        output::print_lines(&output::summary_lines(registry, &aggregate, &written));
    }

    let failed = aggregate.failed_sources().len();
    let succeeded = aggregate.source_count().saturating_sub(failed);
    Ok(determine_exit_outcome(succeeded, failed))
}

pub(crate) async fn run_game_command(
    settings: &Settings,
    registry: &SourceRegistry,
    args: &GameArgs,
) -> Result<ProcessExit> {
    let format = args.format.unwrap_or(settings.format);
    let source = registry.select(&args.selection)?;
    info!(source = %source.key, game = %source.display_name, "Downloading game");

    let spinner = spinner_for(settings, 1);
    let aggregator = build_aggregator(settings, spinner.as_ref())?;
    let aggregate = aggregator.run_selected(registry, &source.key).await?;
    if let Some(spinner) = &spinner {
        spinner.finish();
    }

    let written = save_per_source(settings, registry, &aggregate, format)?;
    if !settings.is_quiet() {
        output::print_lines(&output::summary_lines(registry, &aggregate, &written));
    }

    if !aggregate.failed_sources().is_empty() {
        return Ok(ProcessExit::Failure);
    }
    if written.is_empty() {
        warn!(source = %source.key, "No questions could be recovered from the sheet");
        return Ok(ProcessExit::Failure);
    }
    Ok(ProcessExit::Success)
}

fn build_aggregator(settings: &Settings, spinner: Option<&SpinnerObserver>) -> Result<Aggregator> {
    let fetcher = HttpFetcher::new(&settings.fetch_config())?;
    let aggregator = Aggregator::new(Arc::new(fetcher)).with_pacing(settings.pacing);
    Ok(match spinner {
        Some(spinner) => aggregator.with_observer(Arc::new(spinner.clone())),
        None => aggregator.with_observer(Arc::new(TracingObserver)),
    })
}

fn spinner_for(settings: &Settings, total: usize) -> Option<SpinnerObserver> {
    let use_spinner = terminal::should_use_spinner(
        io::stderr().is_terminal(),
        settings.is_quiet(),
        terminal::is_dumb_terminal(),
    );
    use_spinner.then(|| SpinnerObserver::start(total))
}

/// Saves one file per source that produced records; returns `(key, path)` pairs.
fn save_per_source(
    settings: &Settings,
    registry: &SourceRegistry,
    aggregate: &AggregateResult,
    format: OutputFormat,
) -> Result<Vec<(String, PathBuf)>> {
    let mut written = Vec::new();
    for entry in aggregate.per_source() {
        if entry.records.is_empty() {
            debug!(source = %entry.key, "Nothing to save");
            continue;
        }
        if written.is_empty() {
            fs::create_dir_all(&settings.output_dir).with_context(|| {
                format!(
                    "Failed to create output directory '{}'",
                    settings.output_dir.display()
                )
            })?;
        }

        let source = registry.get(&entry.key)?;
        let path = per_source_path(&settings.output_dir, &entry.key, format);
        write_records(
            &entry.records,
            &source.display_name,
            aggregate.captured_at(),
            &path,
            format,
        )
        .with_context(|| format!("Failed to save '{}'", path.display()))?;
        info!(source = %entry.key, records = entry.records.len(), path = %path.display(), "Saved");
        written.push((entry.key.clone(), path));
    }
    Ok(written)
}
