//! Locale router service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────▶ request id ─▶ trace ─▶ timeout ─▶ locale middleware ─┐
//!                                                                          │
//!              ┌───────────────────────────────────────────────────────────┘
//!              ▼
//!     ┌────────────────┐  match   ┌──────────────────┐
//!     │ LocaleResolver │ ───────▶ │ rewrite URI to   │ ─▶ page routes ─▶ LocaleUrlBuilder
//!     │ prefix/session │          │ clean path       │                   (localized links)
//!     │ cookie/accept  │          └──────────────────┘
//!     └───────┬────────┘
//!             │ redirect
//!             ▼
//!     301 / 302 + Set-Cookie
//! ```
//!
//! Configuration is read from the file named by the first argument or by
//! `LOCALE_ROUTER_CONFIG`; defaults are used when neither is given.

use std::path::PathBuf;

use tokio::net::TcpListener;

use locale_router::config::{load_config, AppConfig};
use locale_router::observability::{logging, metrics};
use locale_router::{HttpServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("LOCALE_ROUTER_CONFIG").ok())
        .map(PathBuf::from);

    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    logging::init(&config.observability.log_level);
    tracing::info!("locale-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = ?config_path,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
