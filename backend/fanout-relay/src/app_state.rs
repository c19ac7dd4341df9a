use crate::{Heartbeat, ShutdownCoordinator};

use fanout_core::Broadcaster;

/// Shared state for the relay's HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub broadcaster: Broadcaster<Heartbeat>,
    pub shutdown: ShutdownCoordinator,
}

impl AppState {
    pub fn new(broadcaster: Broadcaster<Heartbeat>, shutdown: ShutdownCoordinator) -> Self {
        Self {
            broadcaster,
            shutdown,
        }
    }
}
