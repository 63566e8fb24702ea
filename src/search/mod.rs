//! Keyword lookup over aggregated records.
//!
//! A linear scan, source by source: a record matches when the keyword is a
//! case-insensitive substring of its question. Answers are not searched,
//! results are not ranked and duplicates across sources are all returned.

use crate::aggregate::AggregateResult;
use crate::record::QuestionRecord;

/// Returns every record whose question contains `keyword`, ignoring case.
///
/// An empty keyword matches every record.
///
/// # Example
///
/// ```
/// use chrono::Local;
/// use quizdl_core::aggregate::AggregateResult;
/// use quizdl_core::record::QuestionRecord;
/// use quizdl_core::search::search;
///
/// let mut aggregate = AggregateResult::new(Local::now());
/// let record = QuestionRecord::new(1, "Whales are mammals", "O", "OX,XO").unwrap();
/// aggregate.push("oxxo", vec![record]);
///
/// assert_eq!(search(&aggregate, "WHALE").len(), 1);
/// assert!(search(&aggregate, "dolphin").is_empty());
/// ```
#[must_use]
pub fn search<'a>(aggregate: &'a AggregateResult, keyword: &str) -> Vec<&'a QuestionRecord> {
    let needle = keyword.to_lowercase();
    aggregate
        .records()
        .filter(|record| record.question.to_lowercase().contains(&needle))
        .collect()
}
