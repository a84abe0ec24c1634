//! HTTP request handlers.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, info_span};
use uuid::Uuid;
use vocalis_types::PredictionResult;

use super::ApiState;
use crate::error::PredictError;

/// Build all API routes.
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health_check))
}

/// Run one prediction.
///
/// The body is taken as raw bytes so that requests without a JSON
/// `Content-Type` are still accepted.
async fn predict(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<Json<PredictionResult>, PredictError> {
    let request_id = Uuid::new_v4();
    info_span!("predict", %request_id).in_scope(|| {
        state.service.predict(&body).map(Json).inspect_err(|e| {
            if let PredictError::Internal(cause) = e {
                error!(
                    error = %cause,
                    body = %String::from_utf8_lossy(&body),
                    "prediction failed"
                );
            }
        })
    })
}

/// Returns model readiness, version and uptime.
async fn health_check(State(state): State<ApiState>) -> (StatusCode, Json<serde_json::Value>) {
    let uptime_secs = state.started_at.elapsed().as_secs();
    match state.service.store().ready() {
        Some(model) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ok",
                "model_loaded": true,
                "classifier": model.classifier_kind(),
                "loaded_at": model.loaded_at().to_rfc3339(),
                "version": env!("CARGO_PKG_VERSION"),
                "uptime_secs": uptime_secs
            })),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "status": "unavailable",
                "model_loaded": false,
                "version": env!("CARGO_PKG_VERSION"),
                "uptime_secs": uptime_secs
            })),
        ),
    }
}
