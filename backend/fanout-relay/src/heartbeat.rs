use serde::{Deserialize, Serialize};

/// Liveness beacon emitted by a node and streamed to every connected client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heartbeat {
    pub node_name: String,
    /// Increases by one per heartbeat since boot
    pub counter: u64,
    /// Unix time in milliseconds
    pub timestamp: i64,
    /// Unix time in milliseconds when the node started
    pub boot_timestamp: i64,
    pub version: String,
}
