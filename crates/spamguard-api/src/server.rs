//! Server startup and the deploy command

use anyhow::{Context, Result};
use spamguard_classifiers::{deploy_artifacts, SpamClassifier};
use std::net::SocketAddr;
use std::path::Path;
use tokio::signal;
use tracing::{error, info, warn};

use crate::cli::ServeArgs;
use crate::config::ServiceConfig;
use crate::routes::create_router;
use crate::state::AppState;
use crate::telemetry;

/// Load the model, bind the listener and serve until a shutdown signal
pub async fn serve(args: ServeArgs) -> Result<()> {
    let config = ServiceConfig::load(&args.config, &args)?;
    telemetry::init_tracing(args.verbose, config.logging.format);

    info!("Starting SpamGuard API v{}", crate::controllers::VERSION);
    info!(
        models_dir = %config.model.artifacts.models_dir.display(),
        api_prefix = %config.api_prefix,
        "Configuration loaded"
    );

    let metrics_handle = telemetry::init_metrics()?;

    let mut classifier = SpamClassifier::new(config.model.artifacts.clone());
    if let Err(e) = classifier.load() {
        if config.model.require_loaded {
            return Err(e).context("Model artifacts could not be loaded");
        }
        warn!(error = %e, "Starting without a model, predictions will answer 503");
    }

    let state = AppState::new(classifier, metrics_handle);
    let app = create_router(state, &config);

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.bind_address()))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("SpamGuard listening on http://{}", addr);

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Copy training artifacts into the configured models directory
pub fn deploy_models(
    source: &Path,
    config_path: &str,
    target: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let config = ServiceConfig::from_file(config_path)?;
    telemetry::init_tracing(verbose, config.logging.format);

    let mut artifacts = config.model.artifacts;
    if let Some(target) = target {
        artifacts.models_dir = target.to_path_buf();
    }

    info!(
        source = %source.display(),
        target = %artifacts.models_dir.display(),
        "Deploying model artifacts"
    );
    let report = deploy_artifacts(source, &artifacts)?;

    for (name, bytes) in &report.copied {
        info!(file = %name, size_kb = *bytes as f64 / 1024.0, "Copied");
    }
    for name in &report.missing {
        warn!(file = %name, "Not found in source directory");
    }

    if report.is_complete() {
        info!(
            files = report.copied.len(),
            total_bytes = report.total_bytes(),
            "Deployment complete"
        );
    } else {
        error!(
            missing = report.missing.len(),
            "Deployment incomplete, train the model first"
        );
    }
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
