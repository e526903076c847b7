//! Axum REST API handlers

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::service::{ClassifierService, ClassifyError};

use super::dto::*;
use super::upload::{read_upload, UploadError};

/// Upload size cap shared by both server variants.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Application state shared across handlers
pub struct AppState {
    pub service: Arc<ClassifierService>,
    pub upload_dir: PathBuf,
    pub start_time: Instant,
    pub requests_served: AtomicU64,
}

/// Create the JSON API router
pub fn create_rest_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Upload page and classification
        .route("/", get(index_handler))
        .route("/predict", post(predict_handler))
        // System endpoints
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        // Browser assets for the upload page
        .nest_service("/static", ServeDir::new("static"))
        // Middleware
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the upload page
async fn index_handler() -> Result<Html<String>, (StatusCode, Json<ErrorResponse>)> {
    let page = tokio::fs::read_to_string("static/index.html").await.map_err(|e| {
        error!("Failed to read upload page: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Upload page is unavailable", "PAGE_UNAVAILABLE")),
        )
    })?;

    Ok(Html(page))
}

/// Classify an uploaded image
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<PredictResponse>, (StatusCode, Json<ErrorResponse>)> {
    let start = Instant::now();
    state.requests_served.fetch_add(1, Ordering::Relaxed);

    let upload = read_upload(&mut multipart)
        .await
        .map_err(upload_error_response)?;

    let prediction = state
        .service
        .predict(&upload.data)
        .await
        .map_err(classify_error_response)?;

    let inference_time_ms = start.elapsed().as_millis() as u64;
    info!(
        "Classified {} as {} ({:.1}%) in {}ms",
        upload.filename,
        prediction.label.as_str(),
        prediction.confidence,
        inference_time_ms
    );

    Ok(Json(PredictResponse {
        prediction: prediction.label.as_str().to_string(),
        confidence: prediction.confidence,
        raw_score: prediction.raw_score,
        inference_time_ms,
    }))
}

/// Health check
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let health = state.service.health();

    Json(HealthResponse {
        healthy: health.healthy,
        version: health.version,
        model_loaded: health.model_loaded,
    })
}

/// Metrics
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        requests_served: state.requests_served.load(Ordering::Relaxed),
        model_loaded: state.service.is_ready(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

fn upload_error_response(e: UploadError) -> (StatusCode, Json<ErrorResponse>) {
    let code = match &e {
        UploadError::Multipart(_) => "MULTIPART_ERROR",
        UploadError::Read(_) => "READ_ERROR",
        UploadError::MissingFile => "MISSING_FILE",
        UploadError::EmptyFilename => "EMPTY_FILENAME",
    };
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(&e.to_string(), code)))
}

fn classify_error_response(e: ClassifyError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &e {
        ClassifyError::ModelNotLoaded => (StatusCode::SERVICE_UNAVAILABLE, "MODEL_NOT_LOADED"),
        ClassifyError::InvalidImage(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_IMAGE"),
        ClassifyError::Inference(_) => {
            error!("Classification failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "INFERENCE_FAILED")
        }
    };
    (status, Json(ErrorResponse::new(&e.to_string(), code)))
}
