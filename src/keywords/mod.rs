//! Keyword catalog for interoperability-difficulty terms
//!
//! Matching is literal: every entry is searched case-insensitively in the
//! text, either anywhere (`substring`) or only as a whole word (`token`).
//! No regex or stemming: what counts as a match defines the difficulty
//! taxonomy, so changes to it go through config.

mod defaults;

pub use defaults::DEFAULT_KEYWORDS;

use memchr::memmem::Finder;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How a keyword literal is located in text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Anywhere in the text, including inside longer words
    #[default]
    Substring,
    /// Only when not surrounded by word characters
    Token,
}

/// A single catalog term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordEntry {
    /// The literal to match; also the keyword's identity
    pub literal: String,
    /// Optional display label for reports
    pub label: Option<String>,
    pub mode: MatchMode,
}

impl KeywordEntry {
    pub fn new(literal: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
            label: None,
            mode: MatchMode::Substring,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Label if set, literal otherwise
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.literal)
    }
}

/// Per-keyword occurrence counts for one text blob.
///
/// Holds only keywords with at least one occurrence, as
/// `(catalog index, occurrences)` in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordMatches {
    hits: Vec<(usize, usize)>,
}

impl KeywordMatches {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Total occurrences across all keywords
    pub fn total(&self) -> usize {
        self.hits.iter().map(|(_, n)| n).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.hits.iter().copied()
    }
}

/// Ordered set of unique keywords with precompiled searchers
#[derive(Debug, Clone)]
pub struct KeywordCatalog {
    entries: Vec<KeywordEntry>,
    finders: Vec<Finder<'static>>,
    seen: HashSet<String>,
}

impl Default for KeywordCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl KeywordCatalog {
    /// Empty catalog
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            finders: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Catalog holding the built-in vocabulary
    pub fn with_defaults() -> Self {
        Self::from_literals(DEFAULT_KEYWORDS.iter().copied())
    }

    pub fn from_literals<I, S>(literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_entries(literals.into_iter().map(KeywordEntry::new))
    }

    /// Build from entries; later duplicates of a literal are dropped
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = KeywordEntry>,
    {
        let mut catalog = Self::empty();
        for entry in entries {
            catalog.insert(entry);
        }
        catalog
    }

    /// Append an entry. Returns `false` when the literal is blank or
    /// already present (compared case-insensitively).
    pub fn insert(&mut self, entry: KeywordEntry) -> bool {
        let folded = entry.literal.trim().to_lowercase();
        if folded.is_empty() || !self.seen.insert(folded.clone()) {
            return false;
        }
        self.finders
            .push(Finder::new(folded.as_bytes()).into_owned());
        self.entries.push(KeywordEntry {
            literal: entry.literal.trim().to_string(),
            ..entry
        });
        true
    }

    /// Drop every entry whose literal is in `literals` (case-insensitive)
    pub fn remove_all<S: AsRef<str>>(&mut self, literals: &[S]) {
        let drop: HashSet<String> = literals
            .iter()
            .map(|l| l.as_ref().trim().to_lowercase())
            .collect();
        let kept: Vec<KeywordEntry> = std::mem::take(&mut self.entries)
            .into_iter()
            .filter(|e| !drop.contains(&e.literal.to_lowercase()))
            .collect();
        *self = Self::from_entries(kept);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&KeywordEntry> {
        self.entries.get(index)
    }

    /// Entries in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &KeywordEntry> {
        self.entries.iter()
    }

    /// Count occurrences of every keyword in `text`.
    ///
    /// Overlapping occurrences each count. Blank text matches nothing.
    pub fn matches(&self, text: &str) -> KeywordMatches {
        if text.trim().is_empty() {
            return KeywordMatches::default();
        }
        let haystack = text.to_lowercase();
        let hits = self
            .entries
            .iter()
            .zip(&self.finders)
            .enumerate()
            .filter_map(|(idx, (entry, finder))| {
                let n = count_occurrences(&haystack, finder, entry.mode);
                (n > 0).then_some((idx, n))
            })
            .collect();
        KeywordMatches { hits }
    }
}

fn count_occurrences(haystack: &str, finder: &Finder<'_>, mode: MatchMode) -> usize {
    let bytes = haystack.as_bytes();
    let needle_len = finder.needle().len();
    let mut count = 0;
    let mut pos = 0;
    while pos < bytes.len() {
        let Some(offset) = finder.find(&bytes[pos..]) else {
            break;
        };
        let start = pos + offset;
        let end = start + needle_len;
        if mode == MatchMode::Substring || is_token_boundary(haystack, start, end) {
            count += 1;
        }
        // Step one byte so overlapping occurrences are seen
        pos = start + 1;
    }
    count
}

/// A needle that starts on a char boundary can only match on one, so the
/// slices below never split a character.
fn is_token_boundary(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack
        .get(..start)
        .and_then(|s| s.chars().next_back());
    let after = haystack.get(end..).and_then(|s| s.chars().next());
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literals(catalog: &KeywordCatalog, m: &KeywordMatches) -> Vec<String> {
        m.iter()
            .map(|(i, _)| catalog.get(i).unwrap().literal.clone())
            .collect()
    }

    #[test]
    fn test_case_insensitive_match() {
        let catalog = KeywordCatalog::from_literals(["FFI", "JNI"]);
        let m = catalog.matches("We rely on ffi and jni, mostly FFI.");
        assert_eq!(m.total(), 3);
        assert_eq!(literals(&catalog, &m), vec!["FFI", "JNI"]);
    }

    #[test]
    fn test_blank_text_matches_nothing() {
        let catalog = KeywordCatalog::from_literals(["FFI"]);
        assert!(catalog.matches("").is_empty());
        assert!(catalog.matches("   \n\t").is_empty());
    }

    #[test]
    fn test_overlapping_occurrences_count() {
        let catalog = KeywordCatalog::from_literals(["nan"]);
        assert_eq!(catalog.matches("nanan").total(), 2);
        assert_eq!(catalog.matches("banana").total(), 1);
    }

    #[test]
    fn test_keywords_checked_independently() {
        // "ffi" also occurs inside "ffi binding"; both entries count
        let catalog = KeywordCatalog::from_literals(["ffi binding", "ffi"]);
        let m = catalog.matches("an FFI binding");
        assert_eq!(m.total(), 2);
        assert_eq!(literals(&catalog, &m), vec!["ffi binding", "ffi"]);
    }

    #[test]
    fn test_token_mode_requires_word_boundaries() {
        let catalog = KeywordCatalog::from_entries([KeywordEntry::new("nan").with_mode(MatchMode::Token)]);
        assert_eq!(catalog.matches("banana nano").total(), 0);
        assert_eq!(catalog.matches("uses NAN, not nan_x").total(), 1);
        assert_eq!(catalog.matches("nan").total(), 1);
    }

    #[test]
    fn test_token_mode_with_unicode_neighbours() {
        let catalog = KeywordCatalog::from_entries([KeywordEntry::new("ffi").with_mode(MatchMode::Token)]);
        assert_eq!(catalog.matches("éffi").total(), 0);
        assert_eq!(catalog.matches("→ffi←").total(), 1);
    }

    #[test]
    fn test_duplicates_dropped_case_insensitively() {
        let catalog = KeywordCatalog::from_literals(["FFI", "ffi", " Ffi ", "JNI", ""]);
        assert_eq!(catalog.len(), 2);
        let names: Vec<_> = catalog.iter().map(|e| e.literal.as_str()).collect();
        assert_eq!(names, vec!["FFI", "JNI"]);
    }

    #[test]
    fn test_default_catalog_is_unique_and_nonempty() {
        let catalog = KeywordCatalog::with_defaults();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.len(), DEFAULT_KEYWORDS.len());
    }

    #[test]
    fn test_default_catalog_finds_quoted_extern() {
        let catalog = KeywordCatalog::with_defaults();
        let m = catalog.matches(r#"declared as extern "C" in the header"#);
        assert!(literals(&catalog, &m).contains(&"extern \"C\"".to_string()));
    }

    #[test]
    fn test_remove_all() {
        let mut catalog = KeywordCatalog::from_literals(["FFI", "JNI", "SWIG"]);
        catalog.remove_all(&["jni"]);
        let names: Vec<_> = catalog.iter().map(|e| e.literal.as_str()).collect();
        assert_eq!(names, vec!["FFI", "SWIG"]);
        assert!(catalog.matches("JNI").is_empty());
    }

    #[test]
    fn test_display_name_prefers_label() {
        let entry = KeywordEntry::new("P/Invoke").with_label("Platform Invoke");
        assert_eq!(entry.display_name(), "Platform Invoke");
        assert_eq!(KeywordEntry::new("JNI").display_name(), "JNI");
    }
}
