//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the locale core (resolver, URL builder) from configuration
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, locale)
//! - Serve until Ctrl+C or a shutdown broadcast
//! - Run the session sweeper alongside the server

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::handlers::{echo_page, health, show_page};
use crate::http::middleware::{locale_middleware, LocaleState};
use crate::http::session::{SessionStore, SessionSweeper};
use crate::locale::{LocaleConfig, LocaleError, LocaleResolver, LocaleUrlBuilder};
use crate::routing::{RouteTable, PAGE_SHOW_ROUTE};

/// HTTP server for the localized application.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    sessions: Arc<SessionStore>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails when the language table is inconsistent.
    pub fn new(config: AppConfig) -> Result<Self, LocaleError> {
        let locale_config = Arc::new(LocaleConfig::from_settings(&config.locale)?);

        let routes = RouteTable::from_config(&locale_config.base_path, &config.routes);

        let sessions = Arc::new(SessionStore::new(Duration::from_secs(config.session.ttl_secs)));
        let state = LocaleState {
            resolver: LocaleResolver::new(locale_config.clone()),
            builder: LocaleUrlBuilder::new(locale_config.clone(), Arc::new(routes)),
            sessions: sessions.clone(),
            session_cookie: Arc::from(config.session.cookie_name.as_str()),
        };

        tracing::info!(
            languages = ?locale_config.languages.locales(),
            default_locale = %locale_config.default_locale,
            base_path = %locale_config.base_path,
            persist_language = locale_config.persist_language,
            redirect_default = locale_config.redirect_default,
            detect_language = locale_config.detect_language,
            "Locale routing configured"
        );

        let router = Self::build_router(&config, &locale_config.base_path, state);
        Ok(Self {
            router,
            config,
            sessions,
        })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The locale middleware wraps the page router as a fallback service so
    /// it runs before route matching and can rewrite the URI.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, base_path: &str, state: LocaleState) -> Router {
        let pages = Router::new()
            .route("/", get(echo_page))
            .route(PAGE_SHOW_ROUTE.1, get(show_page))
            .fallback(echo_page);
        let pages = if base_path.is_empty() {
            pages
        } else {
            Router::new().nest(base_path, pages)
        };

        let localized = Router::new()
            .fallback_service(pages)
            .layer(middleware::from_fn_with_state(state, locale_middleware));

        Router::new()
            .route("/health", get(health))
            .fallback_service(localized)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The assembled router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the server until Ctrl+C or `shutdown` fires.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let sweeper = SessionSweeper::new(
            self.sessions.clone(),
            Duration::from_secs(self.config.session.sweep_interval_secs),
        );
        let sweeper = tokio::spawn(sweeper.run(shutdown.resubscribe()));

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = shutdown.recv() => {}
                }
                tracing::info!("Shutdown signal received");
            })
            .await?;

        sweeper.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
