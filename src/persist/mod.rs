//! Writing question files and reading them back.
//!
//! Two interchangeable encodings:
//!
//! - **Structured** ([`OutputFormat::Json`]) - pretty JSON with a
//!   `game` / `total_questions` / `downloaded_at` / `questions` envelope, or
//!   the combined form with a `games` map instead of `game` + `questions`.
//! - **Tabular** ([`OutputFormat::Csv`]) - BOM-prefixed comma-separated rows
//!   under an `id,question,answer,game` header.
//!
//! Writes create or truncate the destination and flush before returning.
//! There is no atomic replace.

mod document;
mod error;
mod tabular;

pub use document::{CombinedDocument, GamesMap, SourceDocument, StoredDocument, TIMESTAMP_FORMAT};
pub use error::PersistError;

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::aggregate::AggregateResult;
use crate::record::QuestionRecord;
use document::{CombinedDocumentRef, GamesRef, SourceDocumentRef};

/// File naming suffix for per-source outputs (`kkong_questions.json`).
const PER_SOURCE_SUFFIX: &str = "_questions";

/// Encoding for written question files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Hierarchical JSON document.
    #[default]
    Json,
    /// Comma-separated rows with a UTF-8 byte-order mark.
    Csv,
}

impl OutputFormat {
    /// File extension without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" | "structured" => Ok(Self::Json),
            "csv" | "tabular" => Ok(Self::Csv),
            other => Err(format!("unknown format '{other}' (expected json or csv)")),
        }
    }
}

/// Conventional per-source file path, e.g. `out/kkong_questions.csv`.
#[must_use]
pub fn per_source_path(dir: &Path, key: &str, format: OutputFormat) -> PathBuf {
    dir.join(format!("{key}{PER_SOURCE_SUFFIX}.{}", format.extension()))
}

/// Formats a capture time the way documents store it.
#[must_use]
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Writes one source's records to `path` in `format`.
///
/// `game` and `downloaded_at` only appear in the structured envelope.
///
/// # Errors
///
/// Returns [`PersistError`] if the file cannot be created, written or flushed.
#[instrument(skip_all, fields(game = %game, format = %format, records = records.len(), path = %path.display()))]
pub fn write_records(
    records: &[QuestionRecord],
    game: &str,
    downloaded_at: DateTime<Local>,
    path: &Path,
    format: OutputFormat,
) -> Result<(), PersistError> {
    match format {
        OutputFormat::Json => write_json(
            path,
            &SourceDocumentRef {
                game,
                total_questions: records.len(),
                downloaded_at: format_timestamp(downloaded_at),
                questions: records,
            },
        ),
        OutputFormat::Csv => {
            let writer = BufWriter::new(create(path)?);
            tabular::write_records(writer, records).map_err(|e| PersistError::io(path, e))?;
            debug!("Tabular file written");
            Ok(())
        }
    }
}

/// Writes every source of `aggregate` into one combined structured document.
///
/// # Errors
///
/// Returns [`PersistError`] if the file cannot be created, written or flushed.
#[instrument(skip_all, fields(total = aggregate.total_count(), path = %path.display()))]
pub fn write_aggregate(aggregate: &AggregateResult, path: &Path) -> Result<(), PersistError> {
    write_json(
        path,
        &CombinedDocumentRef {
            total_questions: aggregate.total_count(),
            downloaded_at: format_timestamp(aggregate.captured_at()),
            games: GamesRef(aggregate.per_source()),
        },
    )
}

/// Reads a structured document of either shape.
///
/// # Errors
///
/// Returns [`PersistError`] if the file cannot be opened or is not a
/// question document.
pub fn read_document(path: &Path) -> Result<StoredDocument, PersistError> {
    let file = File::open(path).map_err(|e| PersistError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| PersistError::json(path, e))
}

/// Reads a combined document back into an [`AggregateResult`].
///
/// A single-source document is accepted too; its key comes from the file
/// name (`kkong_questions.json` → `kkong`).
///
/// # Errors
///
/// Returns [`PersistError`] on IO, decode or timestamp errors.
pub fn read_aggregate(path: &Path) -> Result<AggregateResult, PersistError> {
    let mut aggregate = None;
    merge_document(&mut aggregate, path)?;
    Ok(aggregate.unwrap_or_else(|| AggregateResult::new(Local::now())))
}

/// Reads several documents into one aggregate, in argument order.
///
/// The capture time is taken from the first document.
///
/// # Errors
///
/// Returns [`PersistError`] for the first file that fails to load.
pub fn read_aggregate_files(paths: &[PathBuf]) -> Result<AggregateResult, PersistError> {
    let mut aggregate = None;
    for path in paths {
        merge_document(&mut aggregate, path)?;
    }
    Ok(aggregate.unwrap_or_else(|| AggregateResult::new(Local::now())))
}

fn merge_document(
    aggregate: &mut Option<AggregateResult>,
    path: &Path,
) -> Result<(), PersistError> {
    let (downloaded_at, entries) = match read_document(path)? {
        StoredDocument::Combined(doc) => (
            doc.downloaded_at,
            doc.games
                .0
                .into_iter()
                .map(|entry| (entry.key, entry.records))
                .collect::<Vec<_>>(),
        ),
        StoredDocument::Source(doc) => (
            doc.downloaded_at,
            vec![(key_from_path(path), doc.questions)],
        ),
    };

    let captured_at = parse_timestamp(path, &downloaded_at)?;
    let target = aggregate.get_or_insert_with(|| AggregateResult::new(captured_at));
    for (key, records) in entries {
        target.push(key, records);
    }
    debug!(path = %path.display(), total = target.total_count(), "Document loaded");
    Ok(())
}

fn key_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.strip_suffix(PER_SOURCE_SUFFIX)
        .map_or_else(|| stem.clone(), str::to_string)
}

fn parse_timestamp(path: &Path, value: &str) -> Result<DateTime<Local>, PersistError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .ok()
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .ok_or_else(|| PersistError::InvalidTimestamp {
            path: path.to_path_buf(),
            value: value.to_string(),
        })
}

fn create(path: &Path) -> Result<File, PersistError> {
    File::create(path).map_err(|e| PersistError::io(path, e))
}

fn write_json<T: Serialize>(path: &Path, document: &T) -> Result<(), PersistError> {
    let mut writer = BufWriter::new(create(path)?);
    serde_json::to_writer_pretty(&mut writer, document).map_err(|e| PersistError::json(path, e))?;
    writer.flush().map_err(|e| PersistError::io(path, e))?;
    debug!(path = %path.display(), "Structured file written");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use tempfile::TempDir;

    fn stamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).earliest().unwrap()
    }

    fn records(game: &str) -> Vec<QuestionRecord> {
        vec![
            QuestionRecord::new(1, "대한민국의 수도는?", "서울", game).unwrap(),
            QuestionRecord::new(3, "고래는 포유류다", "O", game).unwrap(),
        ]
    }

    #[test]
    fn test_output_format_parse_and_display() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("tabular".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }

    #[test]
    fn test_per_source_path() {
        let path = per_source_path(Path::new("out"), "kkong", OutputFormat::Json);
        assert_eq!(path, Path::new("out").join("kkong_questions.json"));
    }

    #[test]
    fn test_write_records_json_envelope_keeps_non_ascii() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kkong_questions.json");
        write_records(&records("꽁꽁"), "꽁꽁", stamp(), &path, OutputFormat::Json).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("대한민국의 수도는?"), "non-ASCII must not be escaped");
        assert!(!text.contains("\\u"), "no unicode escapes expected");
        assert!(text.starts_with("{\n  \"game\": \"꽁꽁\",\n  \"total_questions\": 2,"));
        assert!(text.contains("\"downloaded_at\": \"2024-05-06 07:08:09\""));

        let game_pos = text.find("\"game\"").unwrap();
        let questions_pos = text.find("\"questions\"").unwrap();
        assert!(game_pos < questions_pos);
    }

    #[test]
    fn test_write_records_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("oxxo_questions.csv");
        write_records(&records("OX,XO"), "OX,XO", stamp(), &path, OutputFormat::Csv).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "\u{feff}id,question,answer,game\r\n\
             1,대한민국의 수도는?,서울,\"OX,XO\"\r\n\
             3,고래는 포유류다,O,\"OX,XO\"\r\n"
        );
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garo_questions.json");
        std::fs::write(&path, "x".repeat(10_000)).unwrap();
        write_records(&[], "가로세로", stamp(), &path, OutputFormat::Json).unwrap();

        let doc = read_document(&path).unwrap();
        assert!(matches!(doc, StoredDocument::Source(d) if d.total_questions == 0));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("a.json");
        let err = write_records(&[], "g", stamp(), &path, OutputFormat::Json).unwrap_err();
        assert!(matches!(err, PersistError::Io { .. }));
    }

    #[test]
    fn test_aggregate_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("all_questions.json");

        let mut aggregate = AggregateResult::new(stamp());
        aggregate.push("garo", records("가로세로"));
        aggregate.push_failed("oxxo");
        aggregate.push("kkong", records("꽁꽁"));
        write_aggregate(&aggregate, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"total_questions\": 4,"));

        let restored = read_aggregate(&path).unwrap();
        assert_eq!(restored.total_count(), aggregate.total_count());
        assert_eq!(restored.per_source(), aggregate.per_source());
        assert_eq!(restored.captured_at(), stamp());
    }

    #[test]
    fn test_read_aggregate_files_merges_per_source_documents() {
        let dir = TempDir::new().unwrap();
        let kkong = per_source_path(dir.path(), "kkong", OutputFormat::Json);
        let garo = per_source_path(dir.path(), "garo", OutputFormat::Json);
        write_records(&records("꽁꽁"), "꽁꽁", stamp(), &kkong, OutputFormat::Json).unwrap();
        write_records(&records("가로세로"), "가로세로", Local::now(), &garo, OutputFormat::Json)
            .unwrap();

        let aggregate = read_aggregate_files(&[kkong, garo]).unwrap();
        let keys: Vec<_> = aggregate.per_source().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["kkong", "garo"]);
        assert_eq!(aggregate.total_count(), 4);
        assert_eq!(aggregate.captured_at().hour(), 7);
    }

    #[test]
    fn test_read_rejects_bad_timestamp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"total_questions":0,"downloaded_at":"yesterday","games":{}}"#,
        )
        .unwrap();
        assert!(matches!(
            read_aggregate(&path),
            Err(PersistError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_read_rejects_non_question_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("other.json");
        std::fs::write(&path, r#"{"hello":"world"}"#).unwrap();
        assert!(matches!(read_document(&path), Err(PersistError::Json { .. })));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_document(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, PersistError::Io { .. }));
    }

    #[test]
    fn test_key_from_path() {
        assert_eq!(key_from_path(Path::new("/x/ollao_questions.json")), "ollao");
        assert_eq!(key_from_path(Path::new("custom.json")), "custom");
    }
}
