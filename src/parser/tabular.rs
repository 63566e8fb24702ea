//! Primary strategy: tab-delimited rows under a header row.
//!
//! The reader follows spreadsheet export quoting: a field that opens with
//! `"` runs to the matching close quote and may hold tabs and newlines,
//! `""` inside it is a literal quote. A quote anywhere else is plain text.

use std::mem::take;

use super::StrategyOutput;
use crate::record::QuestionRecord;

const QUESTION_COLUMN: &str = "Question";
const ANSWER_COLUMN: &str = "Answer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Start,
    Unquoted,
    Quoted,
    AfterQuote,
}

/// Splits tab-delimited text into rows of fields.
///
/// The first line is always the header row, even when blank (it then has
/// no columns). Later blank lines produce no row. A leading byte-order
/// mark is dropped.
pub(crate) fn read_rows(text: &str) -> Vec<Vec<String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut state = FieldState::Start;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if state == FieldState::Quoted {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    state = FieldState::AfterQuote;
                }
            } else {
                field.push(ch);
            }
            continue;
        }

        match ch {
            '"' if state == FieldState::Start => state = FieldState::Quoted,
            '\t' => {
                row.push(take(&mut field));
                state = FieldState::Start;
            }
            '\r' | '\n' => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                let blank_line = state == FieldState::Start && row.is_empty();
                if !blank_line {
                    row.push(take(&mut field));
                    rows.push(take(&mut row));
                } else if rows.is_empty() {
                    rows.push(Vec::new());
                }
                state = FieldState::Start;
            }
            _ => {
                field.push(ch);
                state = FieldState::Unquoted;
            }
        }
    }

    // Flush a trailing row without a line terminator, even inside an
    // unterminated quote.
    if !(state == FieldState::Start && row.is_empty()) {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Extracts records from the `Question`/`Answer` columns.
///
/// Ids are data-row positions starting at 1; rows with a blank question
/// are dropped but still consume their position.
pub(crate) fn parse(text: &str, game: &str) -> StrategyOutput {
    let mut rows = read_rows(text).into_iter();
    let Some(header) = rows.next() else {
        return StrategyOutput::default();
    };

    // Later duplicates of a column name win, as with a name-keyed row map.
    let question_col = header.iter().rposition(|name| name == QUESTION_COLUMN);
    let answer_col = header.iter().rposition(|name| name == ANSWER_COLUMN);
    let cell = |row: &[String], col: Option<usize>| -> String {
        col.and_then(|index| row.get(index))
            .cloned()
            .unwrap_or_default()
    };

    let mut output = StrategyOutput::default();
    for (index, row) in rows.enumerate() {
        let question = cell(&row, question_col);
        let answer = cell(&row, answer_col);
        match QuestionRecord::new(index + 1, &question, &answer, game) {
            Some(record) => output.records.push(record),
            None => output.skipped += 1,
        }
    }
    output
}
