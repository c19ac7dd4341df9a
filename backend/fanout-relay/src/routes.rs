use crate::{AppState, health, stream};

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};

/// Raw heartbeat stream endpoint
pub const STREAM_PATH: &str = "/v1/heartbeats/stream";

/// Build the relay router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(STREAM_PATH, get(stream::handler))
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .with_state(state)
        // Public stream: any origin may connect
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
