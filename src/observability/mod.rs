//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! locale middleware / server lifecycle produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (resolution, redirect and persistence counters)
//!
//! Consumers:
//!     → stdout (fmt layer, filtered by RUST_LOG or config)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) attached to every locale log event
//! - Metrics are cheap (atomic increments) and no-ops without a recorder

pub mod logging;
pub mod metrics;
