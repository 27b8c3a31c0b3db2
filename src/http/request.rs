//! Request inspection.
//!
//! # Responsibilities
//! - Split the request target into path info, query and request URI
//! - Read the request ID assigned by the request-id layer
//! - Rewrite the request URI to the locale-stripped path
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing (outermost layer)
//! - Path info is always relative to the configured base path

use axum::http::uri::PathAndQuery;
use axum::http::{HeaderMap, Uri};

use crate::locale::LocaleRequest;
use crate::routing::matcher::{join_base_path, strip_base_path};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// The request ID, or `"unknown"` when the layer did not run.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Where a request points, relative to the application base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    /// Path info, starting with `/`.
    pub path: String,
    /// Query string without `?`.
    pub query: String,
    /// Path and query as received.
    pub request_uri: String,
}

impl RequestTarget {
    /// Returns `None` when the URI lies outside `base_path`.
    pub fn from_uri(uri: &Uri, base_path: &str) -> Option<Self> {
        let path = strip_base_path(uri.path(), base_path)?;
        Some(Self {
            path: path.to_string(),
            query: uri.query().unwrap_or_default().to_string(),
            request_uri: uri
                .path_and_query()
                .map(PathAndQuery::as_str)
                .unwrap_or_else(|| uri.path())
                .to_string(),
        })
    }

    pub fn as_locale_request(&self) -> LocaleRequest<'_> {
        LocaleRequest {
            path: &self.path,
            query: &self.query,
            request_uri: &self.request_uri,
        }
    }
}

/// `uri` with its path replaced by `base_path + clean_path`, query kept.
pub fn rewrite_uri(uri: &Uri, base_path: &str, clean_path: &str) -> Option<Uri> {
    let mut target = join_base_path(base_path, clean_path);
    if let Some(query) = uri.query() {
        target.push('?');
        target.push_str(query);
    }

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(target.as_str()).ok()?);
    Uri::from_parts(parts).ok()
}
