//! Runtime locale settings derived from the validated application config.

use std::time::Duration;

use crate::config::{LanguageConfig, LocaleSettings};
use crate::locale::error::LocaleError;
use crate::locale::languages::{LocaleEntry, LocaleSpec};

/// Immutable settings read by the resolver and the URL builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    pub languages: LocaleSpec,
    pub default_locale: String,
    pub persist_language: bool,
    pub redirect_default: bool,
    pub detect_language: bool,
    /// `None` disables the language cookie.
    pub cookie_lifetime: Option<Duration>,
    /// `""` when the application is served from the root.
    pub base_path: String,
    /// Link parameter that overrides the current locale.
    pub language_param: String,
}

impl LocaleConfig {
    /// Settings with the given languages and default; every flag at its
    /// configuration default.
    pub fn new(languages: LocaleSpec, default_locale: impl Into<String>) -> Result<Self, LocaleError> {
        let default_locale = default_locale.into();
        if !languages.contains(&default_locale) {
            return Err(LocaleError::UnknownDefault(default_locale));
        }
        let defaults = LocaleSettings::default();
        Ok(Self {
            languages,
            default_locale,
            persist_language: defaults.persist_language,
            redirect_default: defaults.redirect_default,
            detect_language: defaults.detect_language,
            cookie_lifetime: cookie_lifetime(defaults.language_cookie_lifetime_secs),
            base_path: defaults.base_path,
            language_param: defaults.language_param,
        })
    }

    pub fn from_settings(settings: &LocaleSettings) -> Result<Self, LocaleError> {
        let entries = settings
            .languages
            .iter()
            .map(|language| match language {
                LanguageConfig::Code(code) => LocaleEntry::code(code.clone()),
                LanguageConfig::Alias { alias, code } => LocaleEntry::aliased(alias.clone(), code.clone()),
            })
            .collect();
        let languages = LocaleSpec::new(entries)?;

        let mut config = Self::new(languages, settings.default_locale.clone())?;
        config.persist_language = settings.persist_language;
        config.redirect_default = settings.redirect_default;
        config.detect_language = settings.detect_language;
        config.cookie_lifetime = cookie_lifetime(settings.language_cookie_lifetime_secs);
        config.base_path = settings.base_path.trim_end_matches('/').to_string();
        config.language_param = settings.language_param.clone();
        Ok(config)
    }
}

fn cookie_lifetime(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings() {
        let settings = LocaleSettings {
            languages: vec![
                LanguageConfig::Code("en".into()),
                LanguageConfig::Alias {
                    alias: "deutsch".into(),
                    code: "de".into(),
                },
            ],
            default_locale: "en".into(),
            language_cookie_lifetime_secs: 0,
            base_path: "/app/".into(),
            ..LocaleSettings::default()
        };

        let config = LocaleConfig::from_settings(&settings).unwrap();
        assert_eq!(config.languages.segment_for("de"), "deutsch");
        assert_eq!(config.cookie_lifetime, None);
        assert_eq!(config.base_path, "/app");
        assert!(config.persist_language);
    }

    #[test]
    fn test_default_must_be_configured() {
        let languages = LocaleSpec::new(vec![LocaleEntry::code("de")]).unwrap();
        assert_eq!(
            LocaleConfig::new(languages, "en").unwrap_err(),
            LocaleError::UnknownDefault("en".into())
        );
    }
}
