//! Metrics collection and exposition.
//!
//! # Metrics
//! - `locale_resolutions_total` (counter): resolutions by source
//! - `locale_redirects_total` (counter): redirects by kind
//! - `locale_persist_writes_total` (counter): session/cookie writes
//!
//! # Design Decisions
//! - Prometheus exporter only installed when enabled in config
//! - Recording without an installed recorder is a no-op

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::locale::{LocaleSource, RedirectKind};

/// Install the Prometheus recorder with an HTTP scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_resolution(source: LocaleSource) {
    counter!("locale_resolutions_total", "source" => source.as_str()).increment(1);
}

pub fn record_redirect(kind: RedirectKind) {
    counter!("locale_redirects_total", "kind" => kind.as_str()).increment(1);
}

pub fn record_persist_write() {
    counter!("locale_persist_writes_total").increment(1);
}
