//! Locale-aware URL routing.
//!
//! Detects the request language from a URL segment, session, cookie or
//! Accept-Language, strips the segment before routing, and puts it back into
//! every generated link.

// Core
pub mod locale;
pub mod routing;

// Service
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use locale::{LocaleResolver, LocaleUrlBuilder, ResolvedLocale};
