//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Language table integrity (unique segments, default configured)
//! - Validate value ranges and formats (base path, timeouts, addresses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no languages configured")]
    NoLanguages,

    #[error("invalid language segment '{0}'")]
    InvalidSegment(String),

    #[error("language segment '{0}' is configured more than once")]
    DuplicateSegment(String),

    #[error("default locale '{0}' is not among the configured languages")]
    UnknownDefaultLocale(String),

    #[error("language_param must not be empty")]
    EmptyLanguageParam,

    #[error("base_path '{0}' must be empty or start with '/' and not end with '/'")]
    InvalidBasePath(String),

    #[error("route '{name}' pattern '{pattern}' must start with '/'")]
    InvalidRoutePattern { name: String, pattern: String },

    #[error("route '{0}' is defined more than once")]
    DuplicateRoute(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("session {0} must be greater than zero")]
    ZeroSessionSetting(&'static str),

    #[error("invalid address '{0}'")]
    InvalidAddress(String),
}

/// Check an `AppConfig` for semantic errors.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let locale = &config.locale;

    if locale.languages.is_empty() {
        errors.push(ValidationError::NoLanguages);
    }

    let mut segments = HashSet::new();
    for language in &locale.languages {
        let segment = language.segment();
        if segment.is_empty() || segment.contains('/') || language.code().is_empty() {
            errors.push(ValidationError::InvalidSegment(segment.to_string()));
        } else if !segments.insert(segment) {
            errors.push(ValidationError::DuplicateSegment(segment.to_string()));
        }
    }

    if !locale.languages.iter().any(|l| l.code() == locale.default_locale) {
        errors.push(ValidationError::UnknownDefaultLocale(locale.default_locale.clone()));
    }

    if locale.language_param.is_empty() {
        errors.push(ValidationError::EmptyLanguageParam);
    }

    let base = &locale.base_path;
    if !base.is_empty() && (!base.starts_with('/') || base.ends_with('/')) {
        errors.push(ValidationError::InvalidBasePath(base.clone()));
    }

    let mut names = HashSet::new();
    for route in &config.routes {
        if !route.pattern.starts_with('/') {
            errors.push(ValidationError::InvalidRoutePattern {
                name: route.name.clone(),
                pattern: route.pattern.clone(),
            });
        }
        if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRoute(route.name.clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.session.ttl_secs == 0 {
        errors.push(ValidationError::ZeroSessionSetting("ttl_secs"));
    }
    if config.session.sweep_interval_secs == 0 {
        errors.push(ValidationError::ZeroSessionSetting("sweep_interval_secs"));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress(config.listener.bind_address.clone()));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress(config.observability.metrics_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{LanguageConfig, RouteConfig};

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&AppConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AppConfig::default();
        config.locale.languages = vec![
            LanguageConfig::Code("de".into()),
            LanguageConfig::Alias {
                alias: "de".into(),
                code: "de_at".into(),
            },
            LanguageConfig::Code("a/b".into()),
        ];
        config.locale.base_path = "app/".into();
        config.routes.push(RouteConfig {
            name: "r".into(),
            pattern: "page".into(),
        });
        config.routes.push(RouteConfig {
            name: "r".into(),
            pattern: "/page".into(),
        });
        config.timeouts.request_secs = 0;
        config.session.sweep_interval_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::DuplicateSegment("de".into()),
                ValidationError::InvalidSegment("a/b".into()),
                ValidationError::UnknownDefaultLocale("en".into()),
                ValidationError::InvalidBasePath("app/".into()),
                ValidationError::InvalidRoutePattern {
                    name: "r".into(),
                    pattern: "page".into()
                },
                ValidationError::DuplicateRoute("r".into()),
                ValidationError::ZeroTimeout,
                ValidationError::ZeroSessionSetting("sweep_interval_secs"),
            ]
        );
    }

    #[test]
    fn test_bad_bind_address() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "localhost".into();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::InvalidAddress("localhost".into())])
        );
    }
}
