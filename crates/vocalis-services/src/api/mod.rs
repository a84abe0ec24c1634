//! HTTP API for the prediction service.
//!
//! Exposes `POST /predict` and `GET /health` behind a CORS layer so the
//! browser front end can call it from another origin.

pub mod handlers;

use std::sync::Arc;
use std::time::Instant;

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::PredictError;
use crate::predict::PredictionService;

/// Shared state accessible by all API handlers.
#[derive(Clone)]
pub struct ApiState {
    /// The prediction pipeline and its model store.
    pub service: Arc<PredictionService>,
    /// When the server was started, for uptime reporting.
    pub started_at: Instant,
}

impl ApiState {
    pub fn new(service: PredictionService) -> Self {
        Self {
            service: Arc::new(service),
            started_at: Instant::now(),
        }
    }
}

/// Build the API router with all routes.
///
/// An empty `cors_origins` allows any origin.
pub fn build_router(state: ApiState, cors_origins: &[String]) -> Router {
    let cors = if cors_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(handlers::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body())).into_response()
    }
}
