//! CLI output formatting and display helpers.
//!
//! Builders return lines so they can be tested without capturing stdout.

use std::path::PathBuf;

use quizdl_core::{AggregateResult, QuestionRecord, SourceRegistry};

/// Numbered menu of sources, e.g. `1. 꽁꽁 (kkong)`.
pub(crate) fn list_lines(registry: &SourceRegistry) -> Vec<String> {
    registry
        .iter()
        .enumerate()
        .map(|(index, source)| {
            format!("{}. {} ({})", index + 1, source.display_name, source.key)
        })
        .collect()
}

/// Per-source outcome lines followed by a total.
///
/// `written` pairs a source key with the file saved for it.
pub(crate) fn summary_lines(
    registry: &SourceRegistry,
    aggregate: &AggregateResult,
    written: &[(String, PathBuf)],
) -> Vec<String> {
    let mut lines = Vec::with_capacity(aggregate.source_count() + 1);
    for entry in aggregate.per_source() {
        let name = registry
            .get(&entry.key)
            .map_or(entry.key.as_str(), |source| source.display_name.as_str());
        let line = if aggregate.failed_sources().contains(&entry.key) {
            format!("✗ {name} ({}): download failed", entry.key)
        } else if let Some((_, path)) = written.iter().find(|(key, _)| *key == entry.key) {
            format!(
                "✓ {name} ({}): {} → {}",
                entry.key,
                questions(entry.records.len()),
                path.display()
            )
        } else {
            format!("- {name} ({}): no questions found", entry.key)
        };
        lines.push(line);
    }

    let failed = aggregate.failed_sources().len();
    lines.push(format!(
        "Total: {} from {} of {} games",
        questions(aggregate.total_count()),
        aggregate.source_count().saturating_sub(failed),
        aggregate.source_count()
    ));
    lines
}

fn questions(count: usize) -> String {
    let noun = if count == 1 { "question" } else { "questions" };
    format!("{count} {noun}")
}

/// One line per hit, then a count.
pub(crate) fn search_lines(keyword: &str, hits: &[&QuestionRecord]) -> Vec<String> {
    if hits.is_empty() {
        return vec![format!("No questions found containing '{keyword}'.")];
    }
    let mut lines: Vec<String> = hits.iter().map(ToString::to_string).collect();
    let noun = if hits.len() == 1 { "match" } else { "matches" };
    lines.push(format!("{} {noun} for '{keyword}'", hits.len()));
    lines
}

pub(crate) fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
