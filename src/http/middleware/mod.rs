//! HTTP middleware.

pub mod locale;

pub use locale::{locale_middleware, LocaleState};
