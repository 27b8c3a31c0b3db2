//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build locale core → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or Shutdown::trigger → Stop accepting → Drain requests → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener starts last (traffic only when ready)

pub mod shutdown;

pub use shutdown::Shutdown;
