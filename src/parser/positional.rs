//! Fallback strategy: split each line at its last whitespace run.
//!
//! Recovers payloads whose tab delimiters were lost upstream. The answer is
//! assumed to be the single trailing token, so a multi-word answer loses
//! all but its last word to the question.

use super::StrategyOutput;
use crate::record::QuestionRecord;

/// Splits a line into `(left, right)` at its last whitespace run.
///
/// Returns `None` when the trimmed line has no interior whitespace.
pub(crate) fn split_at_last_whitespace(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    let (pos, ch) = line.char_indices().rev().find(|(_, c)| c.is_whitespace())?;
    let left = line[..pos].trim_end();
    let right = &line[pos + ch.len_utf8()..];
    (!left.is_empty() && !right.is_empty()).then_some((left, right))
}

/// Extracts one record per splittable line.
///
/// Ids are line positions starting at 1 over the trimmed payload;
/// unsplittable lines are dropped but still consume their position.
pub(crate) fn parse(text: &str, game: &str) -> StrategyOutput {
    let mut output = StrategyOutput::default();
    let text = text.trim();
    if text.is_empty() {
        return output;
    }

    for (index, line) in text.split('\n').enumerate() {
        let record = split_at_last_whitespace(line)
            .and_then(|(question, answer)| QuestionRecord::new(index + 1, question, answer, game));
        match record {
            Some(record) => output.records.push(record),
            None => output.skipped += 1,
        }
    }
    output
}
