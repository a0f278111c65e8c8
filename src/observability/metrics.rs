//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_resolutions_total` (counter): resolver outcomes by `outcome` (matched, failed)
//! - `router_activations_total` (counter): route manager activations
//! - `router_active_views` (gauge): views matched by the last activation
//! - `router_pattern_cache_lookups_total` (counter): cache lookups by `result` (hit, miss)
//! - `router_pattern_cache_size` (gauge): compiled patterns held by the cache

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

pub fn record_resolution(matched: bool) {
    let outcome = if matched { "matched" } else { "failed" };
    ::metrics::counter!("router_resolutions_total", "outcome" => outcome).increment(1);
}

pub fn record_activation(active_views: usize) {
    ::metrics::counter!("router_activations_total").increment(1);
    ::metrics::gauge!("router_active_views").set(active_views as f64);
}

pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    ::metrics::counter!("router_pattern_cache_lookups_total", "result" => result).increment(1);
}

pub fn record_cache_size(size: usize) {
    ::metrics::gauge!("router_pattern_cache_size").set(size as f64);
}
