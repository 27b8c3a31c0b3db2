//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → LocaleConfig / RouteTable built once at startup
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is fixed for the process lifetime; no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::AppConfig;
pub use schema::LanguageConfig;
pub use schema::ListenerConfig;
pub use schema::LocaleSettings;
pub use schema::ObservabilityConfig;
pub use schema::RouteConfig;
pub use schema::SessionConfig;
pub use validation::ValidationError;
