//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound (per request):
//!     request path
//!     → matcher.rs (strip base path, match language segment on a boundary)
//!     → locale resolver
//!
//! Outbound (link generation):
//!     route name + params
//!     → router.rs (expand pattern, append query, prefix base path)
//!     → matcher.rs (splice language segment after base path)
//! ```
//!
//! # Design Decisions
//! - Route table compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Inbound stripping and outbound splicing share one notion of "segment"
//!   so generated links always resolve back to their locale

pub mod matcher;
pub mod router;

pub use router::{RouteError, RouteParams, RouteTable, UrlGenerator, PAGE_SHOW_ROUTE};
