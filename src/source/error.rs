//! Error types for source registry lookups.

use thiserror::Error;

/// Errors that can occur when addressing a registered source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The requested key is not present in the registry.
    #[error("unknown source '{key}'\n  Suggestion: Run `quizdl list` to see available sources")]
    UnknownSourceKey {
        /// The key that was requested.
        key: String,
    },

    /// A numbered selection fell outside the registry.
    #[error("source index {index} is out of range (1..={len})")]
    IndexOutOfRange {
        /// The 1-based index that was requested.
        index: usize,
        /// Number of registered sources.
        len: usize,
    },

    /// Two descriptors share a key while building a registry.
    #[error("duplicate source key '{key}'")]
    DuplicateKey {
        /// The repeated key.
        key: String,
    },
}

impl SourceError {
    /// Creates an unknown-key error.
    #[must_use]
    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownSourceKey { key: key.into() }
    }
}
