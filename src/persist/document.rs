//! Structured (JSON) document shapes.
//!
//! Field order is fixed by declaration order, and `serde_json` leaves
//! non-ASCII text unescaped, so Korean questions round-trip verbatim.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::aggregate::SourceRecords;
use crate::record::QuestionRecord;

/// On-disk format of `downloaded_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One source's records with their envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Display name of the game.
    pub game: String,
    /// Number of entries in `questions`.
    pub total_questions: usize,
    /// Local capture time, `YYYY-MM-DD HH:MM:SS`.
    pub downloaded_at: String,
    /// Records in parse order.
    pub questions: Vec<QuestionRecord>,
}

/// Every source's records keyed by source key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedDocument {
    /// Sum of all per-source record counts.
    pub total_questions: usize,
    /// Local capture time, `YYYY-MM-DD HH:MM:SS`.
    pub downloaded_at: String,
    /// Source key → records, in aggregation order.
    pub games: GamesMap,
}

/// Either document shape, told apart by the `games` field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StoredDocument {
    /// Combined aggregate document.
    Combined(CombinedDocument),
    /// Single-source document.
    Source(SourceDocument),
}

/// Ordered `key → records` map.
///
/// Kept as a list so document order survives a read without relying on an
/// order-preserving map type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GamesMap(pub Vec<SourceRecords>);

impl Serialize for GamesMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.key, &entry.records)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for GamesMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GamesVisitor;

        impl<'de> Visitor<'de> for GamesVisitor {
            type Value = GamesMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of source key to question list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, records)) =
                    access.next_entry::<String, Vec<QuestionRecord>>()?
                {
                    entries.push(SourceRecords { key, records });
                }
                Ok(GamesMap(entries))
            }
        }

        deserializer.deserialize_map(GamesVisitor)
    }
}

/// Borrowing twin of [`SourceDocument`] used when writing.
#[derive(Serialize)]
pub(crate) struct SourceDocumentRef<'a> {
    pub(crate) game: &'a str,
    pub(crate) total_questions: usize,
    pub(crate) downloaded_at: String,
    pub(crate) questions: &'a [QuestionRecord],
}

/// Borrowing twin of [`CombinedDocument`] used when writing.
#[derive(Serialize)]
pub(crate) struct CombinedDocumentRef<'a> {
    pub(crate) total_questions: usize,
    pub(crate) downloaded_at: String,
    pub(crate) games: GamesRef<'a>,
}

pub(crate) struct GamesRef<'a>(pub(crate) &'a [SourceRecords]);

impl Serialize for GamesRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(&entry.key, &entry.records)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(id: usize, question: &str, game: &str) -> QuestionRecord {
        QuestionRecord::new(id, question, "a", game).unwrap()
    }

    #[test]
    fn test_games_map_keeps_document_order() {
        let json = r#"{"zeta":[],"alpha":[{"id":1,"question":"q","answer":"a","game":"g"}]}"#;
        let games: GamesMap = serde_json::from_str(json).unwrap();
        let keys: Vec<_> = games.0.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
        assert_eq!(games.0[1].records[0].question, "q");
    }

    #[test]
    fn test_games_ref_serializes_as_object() {
        let entries = vec![
            SourceRecords {
                key: "b".to_string(),
                records: vec![record(1, "q", "B")],
            },
            SourceRecords {
                key: "a".to_string(),
                records: vec![],
            },
        ];
        let json = serde_json::to_string(&GamesRef(&entries)).unwrap();
        assert_eq!(
            json,
            r#"{"b":[{"id":1,"question":"q","answer":"a","game":"B"}],"a":[]}"#
        );
    }

    #[test]
    fn test_stored_document_detects_shape() {
        let source = r#"{"game":"꽁꽁","total_questions":0,"downloaded_at":"2024-01-02 03:04:05","questions":[]}"#;
        assert!(matches!(
            serde_json::from_str::<StoredDocument>(source).unwrap(),
            StoredDocument::Source(_)
        ));

        let combined = r#"{"total_questions":0,"downloaded_at":"2024-01-02 03:04:05","games":{}}"#;
        assert!(matches!(
            serde_json::from_str::<StoredDocument>(combined).unwrap(),
            StoredDocument::Combined(_)
        ));
    }
}
