//! Locale resolution and localized URL construction.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     LocaleSettings (config file)
//!     → config.rs (LocaleConfig, validated LocaleSpec)
//!     → shared via Arc by resolver and builder
//!
//! Per request:
//!     path info + query + request URI
//!     + session / cookie / Accept-Language (state.rs traits)
//!     → resolver.rs (once, memoized in RequestLocale)
//!     → ResolvedLocale { locale, clean_path, source, redirect }
//!
//! Link generation:
//!     route + params + current locale
//!     → url_builder.rs
//!     → URL that resolves back to the same locale
//! ```
//!
//! # Design Decisions
//! - Pure synchronous computation, O(number of languages)
//! - No global "current language"; the locale travels with the request
//! - Storage is behind traits owned by the HTTP adapter

pub mod config;
pub mod error;
pub mod resolver;
pub mod languages;
pub mod state;
pub mod url_builder;

pub use config::LocaleConfig;
pub use error::LocaleError;
pub use resolver::{
    LocaleRequest, LocaleResolver, LocaleSource, Redirect, RedirectKind, RequestLocale, ResolvedLocale,
};
pub use languages::{LocaleEntry, LocaleSpec};
pub use state::{CookieStore, LocaleSignals, PersistedLocaleState, LANGUAGE_KEY};
pub use url_builder::{LocaleLinks, LocaleUrlBuilder};
