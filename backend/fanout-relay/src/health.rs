use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - status plus current stream subscriber count
pub async fn health_check(State(state): State<AppState>) -> Response {
    let status = if state.shutdown.is_shutdown() {
        "shutting_down"
    } else {
        "healthy"
    };
    let subscribers = state.broadcaster.subscriber_count().await;

    let health = json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "subscribers": subscribers,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - liveness probe
pub async fn liveness_check() -> Response {
    (StatusCode::OK, "OK").into_response()
}
