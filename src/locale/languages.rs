//! Ordered language table.
//!
//! # Responsibilities
//! - Hold configured languages in declaration order
//! - Map URL segments (alias or code) to canonical codes and back
//! - Find the first entry whose segment prefixes a path
//!
//! # Design Decisions
//! - First match wins; declaration order is the tie-break, so `en_us` must
//!   precede `en`
//! - Matching is case-sensitive
//! - Segment uniqueness is checked once at construction

use std::collections::HashSet;

use serde::Serialize;

use crate::locale::error::LocaleError;
use crate::routing::matcher::strip_segment_prefix;

/// One configured language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleEntry {
    code: String,
    alias: Option<String>,
}

impl LocaleEntry {
    /// A language addressed in URLs by its own code.
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            alias: None,
        }
    }

    /// A language addressed in URLs by `alias` instead of its code.
    pub fn aliased(alias: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            alias: Some(alias.into()),
        }
    }

    /// Canonical locale code.
    pub fn locale(&self) -> &str {
        &self.code
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The path segment that selects this entry.
    pub fn segment(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.code)
    }
}

/// A path that starts with a configured language segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatch<'a> {
    pub entry: &'a LocaleEntry,
    /// Remainder of the path after the segment, always starting with `/`.
    pub rest: &'a str,
}

/// Validated, immutable list of configured languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocaleSpec {
    entries: Vec<LocaleEntry>,
}

impl LocaleSpec {
    pub fn new(entries: Vec<LocaleEntry>) -> Result<Self, LocaleError> {
        if entries.is_empty() {
            return Err(LocaleError::EmptySpec);
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            let segment = entry.segment();
            if segment.is_empty() || segment.contains('/') || entry.code.is_empty() {
                return Err(LocaleError::InvalidSegment(segment.to_string()));
            }
            if !seen.insert(segment) {
                return Err(LocaleError::DuplicateSegment(segment.to_string()));
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[LocaleEntry] {
        &self.entries
    }

    /// Whether `code` is a configured canonical locale code.
    pub fn contains(&self, code: &str) -> bool {
        self.entries.iter().any(|e| e.code == code)
    }

    /// Distinct canonical codes in declaration order.
    pub fn locales(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !codes.contains(&entry.locale()) {
                codes.push(entry.locale());
            }
        }
        codes
    }

    /// URL segment for `code`: the alias of the first entry declaring it,
    /// the code itself otherwise.
    pub fn segment_for<'a>(&'a self, code: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|e| e.code == code)
            .map(LocaleEntry::segment)
            .unwrap_or(code)
    }

    /// First entry whose segment prefixes `path` on a segment boundary.
    pub fn match_prefix<'a>(&'a self, path: &'a str) -> Option<PrefixMatch<'a>> {
        self.entries.iter().find_map(|entry| {
            strip_segment_prefix(path, entry.segment()).map(|rest| PrefixMatch { entry, rest })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> LocaleSpec {
        LocaleSpec::new(vec![
            LocaleEntry::code("en_us"),
            LocaleEntry::code("en"),
            LocaleEntry::aliased("deutsch", "de"),
        ])
        .unwrap()
    }

    #[test]
    fn test_more_specific_entry_listed_first_wins() {
        let spec = spec();
        let m = spec.match_prefix("/en_us/foo").unwrap();
        assert_eq!(m.entry.locale(), "en_us");
        assert_eq!(m.rest, "/foo");
    }

    #[test]
    fn test_prefix_must_end_on_segment_boundary() {
        let spec = spec();
        assert!(spec.match_prefix("/eng/foo").is_none());
        assert!(spec.match_prefix("/english").is_none());
        assert_eq!(spec.match_prefix("/en").unwrap().rest, "/");
    }

    #[test]
    fn test_alias_is_the_matchable_segment() {
        let spec = spec();
        let m = spec.match_prefix("/deutsch/page").unwrap();
        assert_eq!(m.entry.locale(), "de");
        assert!(spec.match_prefix("/de/page").is_none());
        assert_eq!(spec.segment_for("de"), "deutsch");
        assert_eq!(spec.segment_for("en"), "en");
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(spec().match_prefix("/EN/foo").is_none());
    }

    #[test]
    fn test_duplicate_segments_rejected() {
        let err = LocaleSpec::new(vec![
            LocaleEntry::code("de"),
            LocaleEntry::aliased("de", "de_at"),
        ])
        .unwrap_err();
        assert_eq!(err, LocaleError::DuplicateSegment("de".into()));
    }

    #[test]
    fn test_invalid_segments_rejected() {
        assert_eq!(LocaleSpec::new(vec![]).unwrap_err(), LocaleError::EmptySpec);
        assert!(matches!(
            LocaleSpec::new(vec![LocaleEntry::code("en/us")]),
            Err(LocaleError::InvalidSegment(_))
        ));
        assert!(matches!(
            LocaleSpec::new(vec![LocaleEntry::aliased("", "en")]),
            Err(LocaleError::InvalidSegment(_))
        ));
    }

    #[test]
    fn test_locales_are_distinct_in_order() {
        let spec = LocaleSpec::new(vec![
            LocaleEntry::aliased("deutsch", "de"),
            LocaleEntry::code("de"),
            LocaleEntry::code("fr"),
        ])
        .unwrap();
        assert_eq!(spec.locales(), vec!["de", "fr"]);
        assert!(spec.contains("fr"));
        assert!(!spec.contains("deutsch"));
    }
}
