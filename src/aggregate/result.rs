//! Aggregated records across sources.

use chrono::{DateTime, Local};

use crate::record::QuestionRecord;

/// Records produced for one source key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecords {
    /// Registry key of the source.
    pub key: String,
    /// Records in parse order.
    pub records: Vec<QuestionRecord>,
}

/// Result of one aggregation pass.
///
/// The total is always derived from the per-source lists; there is no
/// stored count to drift out of sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateResult {
    per_source: Vec<SourceRecords>,
    captured_at: DateTime<Local>,
    failed: Vec<String>,
}

impl AggregateResult {
    /// Creates an empty result stamped with `captured_at`.
    #[must_use]
    pub fn new(captured_at: DateTime<Local>) -> Self {
        Self {
            per_source: Vec::new(),
            captured_at,
            failed: Vec::new(),
        }
    }

    /// Builds a result from already-collected per-source lists.
    #[must_use]
    pub fn from_parts(per_source: Vec<SourceRecords>, captured_at: DateTime<Local>) -> Self {
        Self {
            per_source,
            captured_at,
            failed: Vec::new(),
        }
    }

    /// Appends records for `key`, or extends the list if `key` is already present.
    pub fn push(&mut self, key: impl Into<String>, records: Vec<QuestionRecord>) {
        let key = key.into();
        if let Some(existing) = self.per_source.iter_mut().find(|entry| entry.key == key) {
            existing.records.extend(records);
        } else {
            self.per_source.push(SourceRecords { key, records });
        }
    }

    /// Records an empty entry for a source whose fetch failed.
    pub fn push_failed(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.push(key.clone(), Vec::new());
        self.failed.push(key);
    }

    /// Per-source record lists in aggregation order.
    #[must_use]
    pub fn per_source(&self) -> &[SourceRecords] {
        &self.per_source
    }

    /// Records for one source key.
    #[must_use]
    pub fn records_for(&self, key: &str) -> Option<&[QuestionRecord]> {
        self.per_source
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.records.as_slice())
    }

    /// Every record, source by source, in position order.
    pub fn records(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.per_source.iter().flat_map(|entry| entry.records.iter())
    }

    /// Sum of all per-source record counts.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.per_source.iter().map(|entry| entry.records.len()).sum()
    }

    /// Wall-clock start of the aggregation.
    #[must_use]
    pub fn captured_at(&self) -> DateTime<Local> {
        self.captured_at
    }

    /// Keys of sources whose fetch failed during this pass.
    #[must_use]
    pub fn failed_sources(&self) -> &[String] {
        &self.failed
    }

    /// Number of sources in the result.
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.per_source.len()
    }
}
