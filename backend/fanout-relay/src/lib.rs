pub mod app_state;
pub mod error;
pub mod health;
pub mod heartbeat;
pub mod heartbeat_source;
pub mod logger;
pub mod metrics_exporter;
pub mod routes;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod stream;

#[cfg(test)]
mod tests;

pub use app_state::AppState;
pub use error::{RelayError, Result};
pub use heartbeat::Heartbeat;
pub use heartbeat_source::HeartbeatSource;
pub use routes::{STREAM_PATH, build_router};
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
