use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const DEFAULT_RELAY_HOST: &str = "127.0.0.1";
pub const DEFAULT_RELAY_PORT: u16 = 7070;
pub const DEFAULT_METRICS_PORT: u16 = 9090;
pub const DEFAULT_NODE_NAME: &str = "fanout-node";

// Heartbeat interval constraints (milliseconds)
pub const MIN_HEARTBEAT_INTERVAL_MS: u64 = 10;
pub const MAX_HEARTBEAT_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_HEARTBEAT_INTERVAL_MS: u64 = 1000;

/// Heartbeat relay settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub host: String,
    /// Port 0 lets the OS pick
    pub port: u16,
    /// Prometheus exporter port (0 = disabled)
    pub metrics_port: u16,
    pub heartbeat_interval_ms: u64,
    /// Name stamped on every heartbeat
    pub node_name: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_RELAY_HOST),
            port: DEFAULT_RELAY_PORT,
            metrics_port: DEFAULT_METRICS_PORT,
            heartbeat_interval_ms: DEFAULT_HEARTBEAT_INTERVAL_MS,
            node_name: String::from(DEFAULT_NODE_NAME),
        }
    }
}

impl RelayConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::relay("relay.host cannot be empty"));
        }

        if self.metrics_port != 0 && self.metrics_port == self.port {
            return Err(ConfigError::relay(format!(
                "relay.metrics_port ({}) must differ from relay.port",
                self.metrics_port
            )));
        }

        if self.heartbeat_interval_ms < MIN_HEARTBEAT_INTERVAL_MS
            || self.heartbeat_interval_ms > MAX_HEARTBEAT_INTERVAL_MS
        {
            return Err(ConfigError::relay(format!(
                "relay.heartbeat_interval_ms must be {}-{}, got {}",
                MIN_HEARTBEAT_INTERVAL_MS, MAX_HEARTBEAT_INTERVAL_MS, self.heartbeat_interval_ms
            )));
        }

        if self.node_name.trim().is_empty() {
            return Err(ConfigError::relay("relay.node_name cannot be empty"));
        }

        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Prometheus exporter address, if enabled.
    pub fn metrics_addr(&self) -> Option<String> {
        (self.metrics_port != 0).then(|| format!("{}:{}", self.host, self.metrics_port))
    }
}
