//! Normalized question/answer record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One question/answer pair with its provenance.
///
/// `id` is the 1-based position within the parse pass that produced it, so
/// it is unique within one source's records but not across sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Positional id within the source's parse pass.
    pub id: usize,
    /// Trimmed, never-empty question text.
    pub question: String,
    /// Trimmed answer text; may be empty.
    pub answer: String,
    /// Display name of the game the record came from.
    pub game: String,
}

impl QuestionRecord {
    /// Creates a record, trimming question and answer.
    ///
    /// Returns `None` when the question is empty after trimming.
    #[must_use]
    pub fn new(id: usize, question: &str, answer: &str, game: impl Into<String>) -> Option<Self> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }
        Some(Self {
            id,
            question: question.to_string(),
            answer: answer.trim().to_string(),
            game: game.into(),
        })
    }
}

impl fmt::Display for QuestionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} #{}] {} → {}", self.game, self.id, self.question, self.answer)
    }
}
