//! Accept-Language parsing.
//!
//! Produces the client's requested languages, most preferred first, in the
//! same lowercase/underscore form used for configured locale codes
//! (`en-US` → `en_us`).

use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::HeaderMap;

/// Requested locale codes ordered by descending quality.
///
/// Wildcards and ranges whose quality is zero, malformed, or outside
/// `(0, 1]` are dropped before ordering. Equal qualities keep header order.
pub fn preferred_languages(headers: &HeaderMap) -> Vec<String> {
    let header = headers
        .get_all(ACCEPT_LANGUAGE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter(|range| is_acceptable(range))
        .collect::<Vec<_>>()
        .join(",");
    if header.is_empty() {
        return Vec::new();
    }

    let mut languages: Vec<String> = Vec::new();
    for tag in accept_language::parse(&header) {
        let tag = canonical_tag(&tag);
        if !languages.contains(&tag) {
            languages.push(tag);
        }
    }
    languages
}

fn is_acceptable(range: &str) -> bool {
    let mut parts = range.split(';');
    let tag = parts.next().unwrap_or_default().trim();
    if tag.is_empty() || tag == "*" {
        return false;
    }
    // NaN fails both comparisons
    parts
        .filter_map(|param| param.trim().strip_prefix("q="))
        .all(|q| matches!(q.trim().parse::<f32>(), Ok(q) if q > 0.0 && q <= 1.0))
}

/// `en-US` → `en_us`.
pub fn canonical_tag(tag: &str) -> String {
    tag.trim().to_ascii_lowercase().replace('-', "_")
}
