//! Error types for the locale core.

use thiserror::Error;

use crate::routing::router::RouteError;

/// Errors raised by locale configuration and link construction.
///
/// Resolution itself never fails: an unmatched path, a missing session value
/// or an unknown negotiated language all fall back to the default locale.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("no languages configured")]
    EmptySpec,

    #[error("language segment '{0}' is configured more than once")]
    DuplicateSegment(String),

    #[error("invalid language segment '{0}': must be non-empty and contain no '/'")]
    InvalidSegment(String),

    #[error("default locale '{0}' is not among the configured languages")]
    UnknownDefault(String),

    /// A link was requested for a locale that is not configured.
    #[error("locale '{0}' is not configured")]
    UnknownLocale(String),

    #[error(transparent)]
    Route(#[from] RouteError),
}
