//! Logging and metrics initialization

use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

/// Initialize tracing/logging
pub fn init_tracing(verbose: bool, format: LogFormat) {
    let filter = if verbose {
        EnvFilter::new("spamguard=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("spamguard=info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init(),
    }
}

/// Install the Prometheus recorder and return the handle used by `/metrics`
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "spamguard_requests_total",
        "Total number of requests by endpoint"
    );
    metrics::describe_counter!(
        "spamguard_predictions_total",
        "Total number of predictions by label"
    );
    metrics::describe_histogram!(
        "spamguard_inference_latency_us",
        metrics::Unit::Microseconds,
        "Classification latency in microseconds"
    );
    metrics::describe_counter!("spamguard_errors_total", "Total number of errors by type");

    info!("Metrics exporter initialized");
    Ok(handle)
}
