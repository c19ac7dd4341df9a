mod broadcast_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod relay_config;

#[cfg(test)]
mod tests;

pub use broadcast_config::{
    BroadcastConfig, DEFAULT_ID_SPACE, DEFAULT_MAX_ID_DRAW_ATTEMPTS, DEFAULT_METRICS_PREFIX,
    DEFAULT_QUEUE_CAPACITY, MAX_ID_SPACE, MAX_MAX_ID_DRAW_ATTEMPTS, MAX_QUEUE_CAPACITY,
    MIN_QUEUE_CAPACITY,
};
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use relay_config::{
    DEFAULT_HEARTBEAT_INTERVAL_MS, DEFAULT_METRICS_PORT, DEFAULT_NODE_NAME, DEFAULT_RELAY_HOST,
    DEFAULT_RELAY_PORT, MAX_HEARTBEAT_INTERVAL_MS, MIN_HEARTBEAT_INTERVAL_MS, RelayConfig,
};

const CONFIG_DIR_ENV: &str = "FANOUT_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".fanout";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
