//! Registry of remote question sheets.
//!
//! A [`SourceRegistry`] is an ordered, immutable list of [`SourceDescriptor`]s.
//! Order matters: it drives aggregation order, output order and the numbered
//! selection used by `quizdl game <INDEX>`.
//!
//! # Example
//!
//! ```
//! use quizdl_core::source::SourceRegistry;
//!
//! let registry = SourceRegistry::builtin();
//! assert_eq!(registry.len(), 4);
//! assert_eq!(registry.get("oxxo").unwrap().display_name, "OX,XO");
//! ```

mod error;

pub use error::SourceError;

use std::collections::HashSet;

use serde::Serialize;

/// Built-in sheets published by the quiz site, in menu order.
const BUILTIN_SOURCES: [(&str, &str, &str); 4] = [
    ("kkong", "꽁꽁", "kkong.csv"),
    ("ollao", "올라올라(꼬로록)", "questions.csv"),
    ("oxxo", "OX,XO", "oxxo.csv"),
    ("garo", "가로세로", "garo.csv"),
];

/// One remote question sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceDescriptor {
    /// Short identifier, unique within a registry.
    pub key: String,
    /// Human-readable game name stamped onto every record.
    pub display_name: String,
    /// Path appended to the base location to fetch the sheet.
    pub resource_path: String,
}

impl SourceDescriptor {
    /// Creates a new descriptor.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        resource_path: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            resource_path: resource_path.into(),
        }
    }
}

/// Ordered collection of sources with unique keys.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<SourceDescriptor>,
}

impl SourceRegistry {
    /// Builds a registry, rejecting duplicate keys.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::DuplicateKey`] if two descriptors share a key.
    pub fn new(sources: Vec<SourceDescriptor>) -> Result<Self, SourceError> {
        let mut seen = HashSet::new();
        for source in &sources {
            if !seen.insert(source.key.as_str()) {
                return Err(SourceError::DuplicateKey {
                    key: source.key.clone(),
                });
            }
        }
        Ok(Self { sources })
    }

    /// Registry with no sources.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The four sheets the quiz site publishes.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            sources: BUILTIN_SOURCES
                .iter()
                .map(|(key, name, path)| SourceDescriptor::new(*key, *name, *path))
                .collect(),
        }
    }

    /// Looks up a source by key.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnknownSourceKey`] when no source has this key.
    pub fn get(&self, key: &str) -> Result<&SourceDescriptor, SourceError> {
        self.sources
            .iter()
            .find(|source| source.key == key)
            .ok_or_else(|| SourceError::unknown_key(key))
    }

    /// Looks up a source by its 1-based position.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::IndexOutOfRange`] for `0` or indexes past the end.
    pub fn by_index(&self, index: usize) -> Result<&SourceDescriptor, SourceError> {
        index
            .checked_sub(1)
            .and_then(|position| self.sources.get(position))
            .ok_or(SourceError::IndexOutOfRange {
                index,
                len: self.sources.len(),
            })
    }

    /// Resolves a user selection that is either a key or a 1-based index.
    ///
    /// Keys take precedence, so a source literally keyed `"2"` is still reachable.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnknownSourceKey`] when the selection matches neither.
    pub fn select(&self, selection: &str) -> Result<&SourceDescriptor, SourceError> {
        let selection = selection.trim();
        if let Ok(source) = self.get(selection) {
            return Ok(source);
        }
        match selection.parse::<usize>() {
            Ok(index) => self
                .by_index(index)
                .map_err(|_| SourceError::unknown_key(selection)),
            Err(_) => Err(SourceError::unknown_key(selection)),
        }
    }

    /// Iterates sources in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &SourceDescriptor> {
        self.sources.iter()
    }

    /// Number of registered sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns true if no sources are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl<'a> IntoIterator for &'a SourceRegistry {
    type Item = &'a SourceDescriptor;
    type IntoIter = std::slice::Iter<'a, SourceDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_order_is_menu_order() {
        let keys: Vec<_> = SourceRegistry::builtin()
            .iter()
            .map(|s| s.key.clone())
            .collect();
        assert_eq!(keys, ["kkong", "ollao", "oxxo", "garo"]);
    }

    #[test]
    fn test_builtin_ollao_uses_shared_questions_sheet() {
        let registry = SourceRegistry::builtin();
        let ollao = registry.get("ollao").unwrap();
        assert_eq!(ollao.resource_path, "questions.csv");
        assert_eq!(ollao.display_name, "올라올라(꼬로록)");
    }

    #[test]
    fn test_get_unknown_key_returns_error() {
        let err = SourceRegistry::builtin().get("nope").unwrap_err();
        assert_eq!(err, SourceError::unknown_key("nope"));
    }

    #[test]
    fn test_by_index_is_one_based() {
        let registry = SourceRegistry::builtin();
        assert_eq!(registry.by_index(1).unwrap().key, "kkong");
        assert_eq!(registry.by_index(4).unwrap().key, "garo");
        assert!(matches!(
            registry.by_index(0),
            Err(SourceError::IndexOutOfRange { index: 0, len: 4 })
        ));
        assert!(registry.by_index(5).is_err());
    }

    #[test]
    fn test_select_accepts_key_or_index() {
        let registry = SourceRegistry::builtin();
        assert_eq!(registry.select("garo").unwrap().key, "garo");
        assert_eq!(registry.select(" 3 ").unwrap().key, "oxxo");
        assert_eq!(
            registry.select("7").unwrap_err(),
            SourceError::unknown_key("7")
        );
        assert_eq!(
            registry.select("bogus").unwrap_err(),
            SourceError::unknown_key("bogus")
        );
    }

    #[test]
    fn test_select_prefers_key_over_index() {
        let registry = SourceRegistry::new(vec![
            SourceDescriptor::new("a", "A", "a.csv"),
            SourceDescriptor::new("1", "One", "one.csv"),
        ])
        .unwrap();
        assert_eq!(registry.select("1").unwrap().display_name, "One");
        assert_eq!(registry.select("2").unwrap().display_name, "One");
    }

    #[test]
    fn test_new_rejects_duplicate_keys() {
        let result = SourceRegistry::new(vec![
            SourceDescriptor::new("a", "A", "a.csv"),
            SourceDescriptor::new("a", "Again", "b.csv"),
        ]);
        assert_eq!(
            result.unwrap_err(),
            SourceError::DuplicateKey {
                key: "a".to_string()
            }
        );
    }

    #[test]
    fn test_empty_registry() {
        let registry = SourceRegistry::empty();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.get("kkong").is_err());
    }
}
