//! Prometheus metrics endpoint
//!
//! Exposes application metrics in Prometheus format for monitoring.

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    // Force initialization of the lazy static
    let _ = &*PROMETHEUS_HANDLE;

    register_metrics();
}

/// Register all custom metrics
fn register_metrics() {
    metrics::describe_counter!(
        "hookgate_requests_total",
        "Total number of requests processed by the forwarding pipeline"
    );
    metrics::describe_counter!(
        "hookgate_token_renewals_total",
        "Total number of identity token renewals"
    );
    metrics::describe_histogram!(
        "hookgate_request_duration_seconds",
        "Forwarding duration in seconds"
    );
}

/// Prometheus metrics endpoint handler
///
/// Returns metrics in Prometheus text format for scraping.
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Record a forwarded request
pub fn record_request(status: &str, duration_secs: f64) {
    metrics::counter!("hookgate_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("hookgate_request_duration_seconds").record(duration_secs);
}

/// Record an identity token renewal
pub fn record_token_renewal() {
    metrics::counter!("hookgate_token_renewals_total").increment(1);
}
