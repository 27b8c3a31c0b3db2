//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Language table and locale policy.
    pub locale: LocaleSettings,

    /// Session cookie settings.
    pub session: SessionConfig,

    /// Named routes used for link generation.
    pub routes: Vec<RouteConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// A configured language: a bare code, or a URL alias for a code.
///
/// ```toml
/// languages = ["en_us", "en", { alias = "deutsch", code = "de" }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LanguageConfig {
    Code(String),
    Alias { alias: String, code: String },
}

impl LanguageConfig {
    /// The path segment selecting this language.
    pub fn segment(&self) -> &str {
        match self {
            LanguageConfig::Code(code) => code,
            LanguageConfig::Alias { alias, .. } => alias,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            LanguageConfig::Code(code) => code,
            LanguageConfig::Alias { code, .. } => code,
        }
    }
}

/// Locale detection and URL policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocaleSettings {
    /// Ordered language table; more specific entries first.
    pub languages: Vec<LanguageConfig>,

    /// Locale served without a URL segment.
    pub default_locale: String,

    /// Remember an explicitly selected locale in the session and a cookie.
    pub persist_language: bool,

    /// Redirect unprefixed requests to the default locale's segment instead
    /// of serving them directly.
    pub redirect_default: bool,

    /// Use Accept-Language when nothing is persisted.
    pub detect_language: bool,

    /// Language cookie lifetime in seconds (0 disables the cookie).
    pub language_cookie_lifetime_secs: u64,

    /// Link parameter that overrides the current locale.
    pub language_param: String,

    /// Application base path ("" for the root, else "/sub/dir").
    pub base_path: String,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            languages: vec![LanguageConfig::Code("en".to_string())],
            default_locale: "en".to_string(),
            persist_language: true,
            redirect_default: false,
            detect_language: false,
            language_cookie_lifetime_secs: 31_536_000, // 1 year
            language_param: "language".to_string(),
            base_path: String::new(),
        }
    }
}

/// Session cookie configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session id.
    pub cookie_name: String,

    /// Idle time in seconds after which a session expires.
    pub ttl_secs: u64,

    /// How often expired sessions are removed, in seconds.
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "locale_session".to_string(),
            ttl_secs: 86400,
            sweep_interval_secs: 60,
        }
    }
}

/// Named route pattern.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier used when building links.
    pub name: String,

    /// Path pattern with `{param}` placeholders, relative to the base path.
    pub pattern: String,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_language_table() {
        let config: AppConfig = toml::from_str(
            r#"
            [locale]
            languages = ["en_us", "en", { alias = "deutsch", code = "de" }]
            default_locale = "en"
            detect_language = true

            [[routes]]
            name = "page.show"
            pattern = "/page/{slug}"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.locale.languages,
            vec![
                LanguageConfig::Code("en_us".into()),
                LanguageConfig::Code("en".into()),
                LanguageConfig::Alias {
                    alias: "deutsch".into(),
                    code: "de".into()
                },
            ]
        );
        assert!(config.locale.detect_language);
        assert!(config.locale.persist_language);
        assert_eq!(config.routes[0].pattern, "/page/{slug}");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }
}
