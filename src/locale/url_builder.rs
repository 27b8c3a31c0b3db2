//! Outbound URL construction.
//!
//! # Responsibilities
//! - Generate the locale-agnostic URL through the route table
//! - Splice the language segment after the base path
//! - Omit the segment for the default locale unless forced
//!
//! # Design Decisions
//! - The current locale is always passed in explicitly, never read from
//!   process state
//! - An explicit override always produces a segment, even for the default
//!   locale; following such a link persists the choice before the resolver
//!   redirects to the unprefixed URL
//! - Overriding with an unconfigured locale is a programming error and is
//!   reported, not ignored

use std::sync::Arc;

use crate::locale::config::LocaleConfig;
use crate::locale::error::LocaleError;
use crate::routing::matcher::splice_segment;
use crate::routing::router::{RouteParams, UrlGenerator};

#[derive(Clone)]
pub struct LocaleUrlBuilder {
    config: Arc<LocaleConfig>,
    router: Arc<dyn UrlGenerator>,
}

impl std::fmt::Debug for LocaleUrlBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleUrlBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LocaleUrlBuilder {
    pub fn new(config: Arc<LocaleConfig>, router: Arc<dyn UrlGenerator>) -> Self {
        Self { config, router }
    }

    pub fn config(&self) -> &LocaleConfig {
        &self.config
    }

    /// Build a URL for `route`.
    ///
    /// The effective locale is `override_locale`, else the value of the
    /// language parameter in `params`, else `current_locale`. The language
    /// parameter never reaches the route table.
    pub fn build(
        &self,
        route: &str,
        mut params: RouteParams,
        override_locale: Option<&str>,
        current_locale: &str,
    ) -> Result<String, LocaleError> {
        let config = &*self.config;

        let from_params = params.remove(&config.language_param);
        let forced = override_locale.map(str::to_owned).or(from_params);
        if let Some(locale) = &forced {
            if !config.languages.contains(locale) {
                return Err(LocaleError::UnknownLocale(locale.clone()));
            }
        }
        let locale = forced.as_deref().unwrap_or(current_locale);

        let url = self.router.generate(route, &params)?;

        if forced.is_none() && !config.redirect_default && locale == config.default_locale {
            return Ok(url);
        }

        let segment = config.languages.segment_for(locale);
        Ok(splice_segment(&config.base_path, &url, segment))
    }

    /// Bind the builder to one request's effective locale.
    pub fn for_locale(&self, locale: impl Into<String>) -> LocaleLinks {
        LocaleLinks {
            builder: self.clone(),
            locale: locale.into(),
        }
    }
}

/// Link builder carrying the current request's locale.
#[derive(Debug, Clone)]
pub struct LocaleLinks {
    builder: LocaleUrlBuilder,
    locale: String,
}

impl LocaleLinks {
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Query key that selects a locale when building links.
    pub fn language_param(&self) -> &str {
        &self.builder.config().language_param
    }

    /// Configured locale codes, in declaration order.
    pub fn locales(&self) -> Vec<&str> {
        self.builder.config().languages.locales()
    }

    /// URL in the current locale.
    pub fn url(&self, route: &str, params: RouteParams) -> Result<String, LocaleError> {
        self.builder.build(route, params, None, &self.locale)
    }

    /// URL forced into `locale`, e.g. for a language switcher.
    pub fn url_for(&self, route: &str, params: RouteParams, locale: &str) -> Result<String, LocaleError> {
        self.builder.build(route, params, Some(locale), &self.locale)
    }
}
