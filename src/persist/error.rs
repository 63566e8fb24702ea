//! Error types for the persist module.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing or reading question files.
#[derive(Debug, Error)]
pub enum PersistError {
    /// File system error opening, writing or reading a file.
    #[error("IO error on {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Structured document could not be encoded or decoded.
    #[error("JSON error in {path}: {source}")]
    Json {
        /// The file being written or read.
        path: PathBuf,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// `downloaded_at` is not a `YYYY-MM-DD HH:MM:SS` local timestamp.
    #[error("invalid downloaded_at '{value}' in {path}")]
    InvalidTimestamp {
        /// The file being read.
        path: PathBuf,
        /// The offending value.
        value: String,
    },
}

impl PersistError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a JSON error.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persist_error_io_display() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let msg = PersistError::io("/tmp/kkong_questions.json", io_error).to_string();
        assert!(msg.contains("/tmp/kkong_questions.json"), "Expected path in: {msg}");
        assert!(msg.contains("access denied"), "Expected cause in: {msg}");
    }

    #[test]
    fn test_persist_error_timestamp_display() {
        let msg = PersistError::InvalidTimestamp {
            path: PathBuf::from("all.json"),
            value: "yesterday".to_string(),
        }
        .to_string();
        assert!(msg.contains("'yesterday'"));
        assert!(msg.contains("all.json"));
    }
}
