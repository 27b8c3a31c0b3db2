//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → middleware/locale.rs
//!         request.rs (path info, query, request URI)
//!         cookies.rs + session.rs (persisted locale)
//!         negotiation.rs (Accept-Language)
//!         → locale resolver
//!         → redirect, or rewrite URI to the clean path
//!     → handlers.rs (locale-agnostic routes, localized links)
//!     → Set-Cookie flushed onto the response
//! ```

pub mod cookies;
pub mod handlers;
pub mod middleware;
pub mod negotiation;
pub mod request;
pub mod server;
pub mod session;

pub use request::{RequestTarget, X_REQUEST_ID};
pub use server::HttpServer;
pub use session::{SessionStore, SessionSweeper};
