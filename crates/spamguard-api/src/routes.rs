//! HTTP routes and handlers

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use spamguard_core::{ClassificationRequest, ClassificationResult, HealthStatus, ModelInfo};
use std::time::Instant;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};
use tracing::{debug, info, info_span};
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::controllers;
use crate::error::AppError;
use crate::state::AppState;

/// Build the router.
///
/// Health and metrics live at the root; model info and predictions are
/// mounted under `api_prefix` (merged at the root when the prefix is empty).
pub fn create_router(state: AppState, config: &ServiceConfig) -> Router {
    let api = Router::new()
        .route("/model/info", get(model_info))
        .route("/predict", post(predict));

    let router = Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics));

    let router = if config.api_prefix.is_empty() {
        router.merge(api)
    } else {
        router.nest(&config.api_prefix, api)
    };

    router
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    metrics::counter!("spamguard_requests_total", "endpoint" => "health").increment(1);
    Json(controllers::get_health_status(&state.classifier))
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

async fn model_info(State(state): State<AppState>) -> Json<ModelInfo> {
    metrics::counter!("spamguard_requests_total", "endpoint" => "model_info").increment(1);
    Json(controllers::get_model_info(&state.classifier))
}

async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<ClassificationRequest>, JsonRejection>,
) -> Result<Json<ClassificationResult>, AppError> {
    metrics::counter!("spamguard_requests_total", "endpoint" => "predict").increment(1);

    let request_id = Uuid::new_v4();
    let span = info_span!("predict", %request_id);

    span.in_scope(|| -> Result<Json<ClassificationResult>, AppError> {
        let Json(request) = payload?;
        debug!(
            chars = request.message.chars().count(),
            threshold = request.threshold,
            "Prediction request received"
        );

        let start = Instant::now();
        let result = controllers::classify_email(&state.classifier, request)?;
        let latency_us = start.elapsed().as_micros() as f64;

        metrics::histogram!("spamguard_inference_latency_us").record(latency_us);
        metrics::counter!(
            "spamguard_predictions_total",
            "label" => result.prediction.as_str()
        )
        .increment(1);

        info!(
            prediction = %result.prediction,
            confidence = result.confidence,
            latency_us,
            "Classified message"
        );
        Ok(Json(result))
    })
}

async fn fallback() -> AppError {
    AppError::NotFound
}
