use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Per-subscriber queue capacity constraints
pub const MIN_QUEUE_CAPACITY: usize = 1;
pub const MAX_QUEUE_CAPACITY: usize = 10000;
pub const DEFAULT_QUEUE_CAPACITY: usize = 50;

// Subscriber identity draw range and retry budget
pub const DEFAULT_ID_SPACE: u64 = 1_000_000;
pub const MAX_ID_SPACE: u64 = 10_000_000;
pub const DEFAULT_MAX_ID_DRAW_ATTEMPTS: u32 = 16;
pub const MAX_MAX_ID_DRAW_ATTEMPTS: u32 = 1024;

pub const DEFAULT_METRICS_PREFIX: &str = "fanout";

/// Fan-out broadcaster settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BroadcastConfig {
    /// Default queue capacity handed to new subscribers
    pub queue_capacity: usize,
    /// Subscriber ids are drawn from `[0, id_space)`
    pub id_space: u64,
    /// Random draws tried before falling back to a linear probe
    pub max_id_draw_attempts: u32,
    /// Prefix for every metric key the broadcaster records
    pub metrics_prefix: String,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            id_space: DEFAULT_ID_SPACE,
            max_id_draw_attempts: DEFAULT_MAX_ID_DRAW_ATTEMPTS,
            metrics_prefix: String::from(DEFAULT_METRICS_PREFIX),
        }
    }
}

impl BroadcastConfig {
    /// Validate all fields are within acceptable ranges.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.queue_capacity < MIN_QUEUE_CAPACITY || self.queue_capacity > MAX_QUEUE_CAPACITY {
            return Err(ConfigError::broadcast(format!(
                "broadcast.queue_capacity must be {}-{}, got {}",
                MIN_QUEUE_CAPACITY, MAX_QUEUE_CAPACITY, self.queue_capacity
            )));
        }

        if self.id_space == 0 || self.id_space > MAX_ID_SPACE {
            return Err(ConfigError::broadcast(format!(
                "broadcast.id_space must be 1-{}, got {}",
                MAX_ID_SPACE, self.id_space
            )));
        }

        if self.max_id_draw_attempts == 0 || self.max_id_draw_attempts > MAX_MAX_ID_DRAW_ATTEMPTS
        {
            return Err(ConfigError::broadcast(format!(
                "broadcast.max_id_draw_attempts must be 1-{}, got {}",
                MAX_MAX_ID_DRAW_ATTEMPTS, self.max_id_draw_attempts
            )));
        }

        if self.metrics_prefix.trim().is_empty() {
            return Err(ConfigError::broadcast(
                "broadcast.metrics_prefix cannot be empty",
            ));
        }

        Ok(())
    }
}
