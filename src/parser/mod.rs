//! Dual-strategy parsing of raw sheet text into [`QuestionRecord`]s.
//!
//! Sheets are published as tab-delimited text with a `Question`/`Answer`
//! header, but exports are not always clean. Parsing therefore runs in two
//! tiers:
//!
//! 1. **Tabular** - rows under the header, columns picked by name.
//! 2. **Positional** - only when the tabular pass yields no records at all,
//!    each line is split at its last whitespace run into question and answer.
//!
//! Parsing never fails. Rows or lines that cannot produce a record are
//! dropped and counted in [`ParseOutcome::skipped`].
//!
//! # Example
//!
//! ```
//! use quizdl_core::parser::{parse_questions, ParseStrategy};
//! use quizdl_core::source::SourceDescriptor;
//!
//! let source = SourceDescriptor::new("kkong", "꽁꽁", "kkong.csv");
//! let outcome = parse_questions("대한민국의 수도는? 서울", &source);
//!
//! assert_eq!(outcome.strategy, ParseStrategy::Positional);
//! assert_eq!(outcome.records[0].question, "대한민국의 수도는?");
//! assert_eq!(outcome.records[0].answer, "서울");
//! ```

mod positional;
mod tabular;

use std::fmt;

use tracing::{debug, instrument};

use crate::record::QuestionRecord;
use crate::source::SourceDescriptor;

/// Which strategy produced the kept records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// Header-addressed tab-delimited rows.
    Tabular,
    /// Last-whitespace line split, used after an empty tabular pass.
    Positional,
}

impl fmt::Display for ParseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tabular => write!(f, "tabular"),
            Self::Positional => write!(f, "positional"),
        }
    }
}

/// Records and drop count from one strategy pass.
#[derive(Debug, Default)]
pub(crate) struct StrategyOutput {
    pub(crate) records: Vec<QuestionRecord>,
    pub(crate) skipped: usize,
}

/// Result of parsing one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Records in sheet order.
    pub records: Vec<QuestionRecord>,
    /// Strategy whose output was kept.
    pub strategy: ParseStrategy,
    /// Rows or lines that strategy dropped.
    pub skipped: usize,
}

impl ParseOutcome {
    /// Number of parsed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing was parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the outcome, keeping only the records.
    #[must_use]
    pub fn into_records(self) -> Vec<QuestionRecord> {
        self.records
    }
}

/// Parses raw sheet text for `source`.
///
/// The positional fallback runs only when the tabular pass emits zero
/// records; a tabular pass that skips some rows but keeps one is final.
#[instrument(skip(raw, source), fields(source = %source.key, raw_len = raw.len()))]
#[must_use]
pub fn parse_questions(raw: &str, source: &SourceDescriptor) -> ParseOutcome {
    let game = source.display_name.as_str();

    let primary = tabular::parse(raw, game);
    if !primary.records.is_empty() {
        debug!(
            records = primary.records.len(),
            skipped = primary.skipped,
            "Tabular parse succeeded"
        );
        return ParseOutcome {
            records: primary.records,
            strategy: ParseStrategy::Tabular,
            skipped: primary.skipped,
        };
    }

    let fallback = positional::parse(raw, game);
    debug!(
        records = fallback.records.len(),
        skipped = fallback.skipped,
        tabular_skipped = primary.skipped,
        "Tabular parse empty; used positional fallback"
    );
    ParseOutcome {
        records: fallback.records,
        strategy: ParseStrategy::Positional,
        skipped: fallback.skipped,
    }
}
