//! Path segment matching and splicing.
//!
//! # Responsibilities
//! - Match a leading path segment (case-sensitive, boundary-aware)
//! - Strip the application base path from incoming paths
//! - Splice a segment immediately after the base path in outgoing URLs
//!
//! # Design Decisions
//! - A segment only matches when followed by `/` or end of path, so `en`
//!   never matches inside `/eng`
//! - Empty base path and `/` both mean "application at the root"

/// Strip a leading `/segment` from `path`.
///
/// Returns the remainder, which always starts with `/` (a bare `/segment`
/// yields `/`). Returns `None` when `segment` is not a whole leading segment.
pub fn strip_segment_prefix<'a>(path: &'a str, segment: &str) -> Option<&'a str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let rest = trimmed.strip_prefix(segment)?;
    if rest.is_empty() {
        Some("/")
    } else if rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

fn is_root(base_path: &str) -> bool {
    base_path.is_empty() || base_path == "/"
}

/// Path relative to the application base path, always starting with `/`.
///
/// Returns `None` for paths outside the base path.
pub fn strip_base_path<'a>(path: &'a str, base_path: &str) -> Option<&'a str> {
    if is_root(base_path) {
        return Some(if path.is_empty() { "/" } else { path });
    }
    match path.strip_prefix(base_path)? {
        "" => Some("/"),
        rest if rest.starts_with('/') => Some(rest),
        _ => None,
    }
}

/// Insert `/segment` right after `base_path` in `url`.
///
/// `url` is a base-path-prefixed path with optional query, as produced by the
/// route table or taken from the request line.
pub fn splice_segment(base_path: &str, url: &str, segment: &str) -> String {
    if is_root(base_path) {
        if url.starts_with('/') {
            return format!("/{segment}{url}");
        }
        return format!("/{segment}/{url}");
    }

    match url.strip_prefix(base_path) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('?') => {
            format!("{base_path}/{segment}{rest}")
        }
        _ => {
            let rest = url.strip_prefix('/').unwrap_or(url);
            format!("{base_path}/{segment}/{rest}")
        }
    }
}

/// Prefix a base-path-relative path with the base path.
pub fn join_base_path(base_path: &str, path: &str) -> String {
    if is_root(base_path) {
        path.to_string()
    } else if path == "/" {
        base_path.to_string()
    } else {
        format!("{base_path}{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_segment_prefix() {
        assert_eq!(strip_segment_prefix("/en/foo", "en"), Some("/foo"));
        assert_eq!(strip_segment_prefix("/en", "en"), Some("/"));
        assert_eq!(strip_segment_prefix("/en/", "en"), Some("/"));
        assert_eq!(strip_segment_prefix("/eng/foo", "en"), None);
        assert_eq!(strip_segment_prefix("/foo/en", "en"), None);
        assert_eq!(strip_segment_prefix("en/foo", "en"), Some("/foo"));
    }

    #[test]
    fn test_strip_base_path() {
        assert_eq!(strip_base_path("/app/en/foo", "/app"), Some("/en/foo"));
        assert_eq!(strip_base_path("/app", "/app"), Some("/"));
        assert_eq!(strip_base_path("/application", "/app"), None);
        assert_eq!(strip_base_path("/other", "/app"), None);
        assert_eq!(strip_base_path("/foo", ""), Some("/foo"));
        assert_eq!(strip_base_path("", ""), Some("/"));
    }

    #[test]
    fn test_splice_at_root() {
        assert_eq!(splice_segment("", "/foo?x=1", "de"), "/de/foo?x=1");
        assert_eq!(splice_segment("/", "/", "de"), "/de/");
    }

    #[test]
    fn test_splice_after_base_path() {
        assert_eq!(splice_segment("/app", "/app/foo", "de"), "/app/de/foo");
        assert_eq!(splice_segment("/app", "/app?x=1", "de"), "/app/de?x=1");
        assert_eq!(splice_segment("/app", "/app", "de"), "/app/de");
        assert_eq!(splice_segment("/app", "/other", "de"), "/app/de/other");
    }

    #[test]
    fn test_join_base_path() {
        assert_eq!(join_base_path("", "/foo"), "/foo");
        assert_eq!(join_base_path("/app", "/foo"), "/app/foo");
        assert_eq!(join_base_path("/app", "/"), "/app");
    }
}
