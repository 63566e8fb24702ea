//! Search command handler: keyword lookup over saved question files.

use anyhow::{Context, Result};
use quizdl_core::persist::read_aggregate_files;
use tracing::debug;

use crate::cli::SearchArgs;
use crate::output;

pub(crate) fn run_search_command(args: &SearchArgs) -> Result<()> {
    let aggregate = read_aggregate_files(&args.files)
        .context("Failed to load saved questions for search")?;
    debug!(
        files = args.files.len(),
        questions = aggregate.total_count(),
        "Loaded saved questions"
    );

    let hits = quizdl_core::search(&aggregate, &args.keyword);
    output::print_lines(&output::search_lines(&args.keyword, &hits));
    Ok(())
}
