//! Inbound locale resolution.
//!
//! # Responsibilities
//! - Detect a language segment at the start of the request path
//! - Fall back to persisted, negotiated and default locales, in that order
//! - Decide whether the request must be redirected, and how
//! - Persist an explicitly selected locale
//!
//! # Precedence
//! ```text
//! path prefix ──match──▶ persist ──▶ default & !redirect_default ? 301 unprefixed : serve
//!      │
//!   no match
//!      ▼
//! session / cookie ──▶ Accept-Language ──▶ default
//!      │
//!      ▼
//! default & !redirect_default ? serve unprefixed : 302 to /<segment><request-uri>
//! ```
//!
//! # Design Decisions
//! - Resolution never fails; unknown signal values are discarded
//! - A prefixed default locale redirects permanently (301); fallback
//!   redirects are temporary (302)
//! - [`RequestLocale`] memoizes the outcome so side effects happen once

use std::sync::{Arc, OnceLock};

use serde::Serialize;

use crate::locale::config::LocaleConfig;
use crate::locale::state::{LocaleSignals, LANGUAGE_KEY};
use crate::routing::matcher::{join_base_path, splice_segment};

/// Where the effective locale came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleSource {
    PathPrefix,
    Persisted,
    Negotiated,
    Default,
}

impl LocaleSource {
    pub fn as_str(self) -> &'static str {
        match self {
            LocaleSource::PathPrefix => "path_prefix",
            LocaleSource::Persisted => "persisted",
            LocaleSource::Negotiated => "negotiated",
            LocaleSource::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectKind {
    Permanent,
    Temporary,
}

impl RedirectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RedirectKind::Permanent => "permanent",
            RedirectKind::Temporary => "temporary",
        }
    }
}

/// A redirect the caller must issue instead of routing the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub location: String,
    pub kind: RedirectKind,
}

/// Outcome of resolving one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLocale {
    pub locale: String,
    /// Path info with the language segment removed.
    pub clean_path: String,
    pub source: LocaleSource,
    pub redirect: Option<Redirect>,
}

/// The parts of a request the resolver reads.
#[derive(Debug, Clone, Copy)]
pub struct LocaleRequest<'a> {
    /// Path relative to the base path, starting with `/`.
    pub path: &'a str,
    /// Query string without the leading `?`.
    pub query: &'a str,
    /// Path and query exactly as requested, including the base path.
    pub request_uri: &'a str,
}

#[derive(Debug, Clone)]
pub struct LocaleResolver {
    config: Arc<LocaleConfig>,
}

impl LocaleResolver {
    pub fn new(config: Arc<LocaleConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LocaleConfig {
        &self.config
    }

    /// Resolve the effective locale of a request.
    ///
    /// Writes the session value and language cookie when a language segment
    /// is present and persistence is enabled. Call through [`RequestLocale`]
    /// to guarantee this happens once per request.
    pub fn resolve(&self, request: &LocaleRequest<'_>, signals: &LocaleSignals<'_>) -> ResolvedLocale {
        let config = &*self.config;

        if let Some(found) = config.languages.match_prefix(request.path) {
            let locale = found.entry.locale().to_string();
            let clean_path = found.rest.to_string();

            if config.persist_language {
                signals.persisted.set(LANGUAGE_KEY, &locale);
                if let Some(lifetime) = config.cookie_lifetime {
                    signals.cookies.set(LANGUAGE_KEY, &locale, lifetime);
                }
            }

            let redirect = (!config.redirect_default && locale == config.default_locale).then(|| Redirect {
                location: with_query(join_base_path(&config.base_path, &clean_path), request.query),
                kind: RedirectKind::Permanent,
            });

            tracing::debug!(
                locale = %locale,
                clean_path = %clean_path,
                redirect = redirect.is_some(),
                "Locale from path prefix"
            );

            return ResolvedLocale {
                locale,
                clean_path,
                source: LocaleSource::PathPrefix,
                redirect,
            };
        }

        let candidate = self
            .persisted_locale(signals)
            .map(|locale| (locale, LocaleSource::Persisted))
            .or_else(|| self.negotiated_locale(signals).map(|locale| (locale, LocaleSource::Negotiated)))
            .filter(|(locale, _)| *locale != config.default_locale);

        let (locale, source) = match candidate {
            Some(found) => found,
            None if !config.redirect_default => {
                return ResolvedLocale {
                    locale: config.default_locale.clone(),
                    clean_path: request.path.to_string(),
                    source: LocaleSource::Default,
                    redirect: None,
                };
            }
            None => (config.default_locale.clone(), LocaleSource::Default),
        };

        let segment = config.languages.segment_for(&locale);
        let location = splice_segment(&config.base_path, request.request_uri, segment);

        tracing::debug!(
            locale = %locale,
            source = source.as_str(),
            location = %location,
            "Locale from request signals, redirecting"
        );

        ResolvedLocale {
            clean_path: request.path.to_string(),
            locale,
            source,
            redirect: Some(Redirect {
                location,
                kind: RedirectKind::Temporary,
            }),
        }
    }

    fn persisted_locale(&self, signals: &LocaleSignals<'_>) -> Option<String> {
        if !self.config.persist_language {
            return None;
        }
        let value = signals
            .persisted
            .get(LANGUAGE_KEY)
            .or_else(|| signals.cookies.get(LANGUAGE_KEY))?;

        if self.config.languages.contains(&value) {
            Some(value)
        } else {
            tracing::debug!(locale = %value, "Discarding unconfigured persisted locale");
            None
        }
    }

    fn negotiated_locale(&self, signals: &LocaleSignals<'_>) -> Option<String> {
        if !self.config.detect_language {
            return None;
        }
        signals
            .preferred
            .iter()
            .find(|code| self.config.languages.contains(code))
            .cloned()
    }
}

fn with_query(mut url: String, query: &str) -> String {
    if !query.is_empty() {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// Per-request memo of the resolution outcome.
///
/// Created once per request and dropped with it.
#[derive(Debug, Default)]
pub struct RequestLocale {
    resolved: OnceLock<Arc<ResolvedLocale>>,
}

impl RequestLocale {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve on first call; later calls return the same value without
    /// touching the signals again.
    pub fn resolve(
        &self,
        resolver: &LocaleResolver,
        request: &LocaleRequest<'_>,
        signals: &LocaleSignals<'_>,
    ) -> Arc<ResolvedLocale> {
        self.resolved
            .get_or_init(|| Arc::new(resolver.resolve(request, signals)))
            .clone()
    }
}
