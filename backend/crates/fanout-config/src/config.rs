use crate::{
    BroadcastConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, LoggingConfig, RelayConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub broadcast: BroadcastConfig,
    pub logging: LoggingConfig,
    pub relay: RelayConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for FANOUT_CONFIG_DIR env var, else use ./.fanout/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply FANOUT_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Parse a TOML string without touching the filesystem or environment.
    pub fn from_toml_str(contents: &str) -> ConfigErrorResult<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::Toml {
            path: PathBuf::from(CONFIG_FILE_NAME),
            source: e,
        })
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: FANOUT_CONFIG_DIR env var > ./.fanout/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.broadcast.validate()?;
        self.logging.validate()?;
        self.relay.validate()?;
        Ok(())
    }

    /// Absolute path of the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref file) => {
                let log_dir = Self::config_dir()?.join(&self.logging.dir);
                Ok(Some(log_dir.join(file)))
            }
            None => Ok(None),
        }
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  broadcast: capacity={}, id_space={}, draws={}, metrics={}",
            self.broadcast.queue_capacity,
            self.broadcast.id_space,
            self.broadcast.max_id_draw_attempts,
            self.broadcast.metrics_prefix
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
        info!(
            "  relay: {} (metrics: {}), heartbeat every {}ms as '{}'",
            self.relay.bind_addr(),
            self.relay
                .metrics_addr()
                .unwrap_or_else(|| String::from("disabled")),
            self.relay.heartbeat_interval_ms,
            self.relay.node_name
        );
    }

    fn apply_env_overrides(&mut self) {
        // Broadcast
        Self::apply_env_parse(
            "FANOUT_QUEUE_CAPACITY",
            &mut self.broadcast.queue_capacity,
        );
        Self::apply_env_parse("FANOUT_ID_SPACE", &mut self.broadcast.id_space);
        Self::apply_env_parse(
            "FANOUT_MAX_ID_DRAW_ATTEMPTS",
            &mut self.broadcast.max_id_draw_attempts,
        );
        Self::apply_env_string(
            "FANOUT_METRICS_PREFIX",
            &mut self.broadcast.metrics_prefix,
        );

        // Logging
        Self::apply_env_parse("FANOUT_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("FANOUT_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("FANOUT_LOG_FILE", &mut self.logging.file);
        Self::apply_env_string("FANOUT_LOG_DIR", &mut self.logging.dir);

        // Relay
        Self::apply_env_string("FANOUT_RELAY_HOST", &mut self.relay.host);
        Self::apply_env_parse("FANOUT_RELAY_PORT", &mut self.relay.port);
        Self::apply_env_parse(
            "FANOUT_RELAY_METRICS_PORT",
            &mut self.relay.metrics_port,
        );
        Self::apply_env_parse(
            "FANOUT_HEARTBEAT_INTERVAL_MS",
            &mut self.relay.heartbeat_interval_ms,
        );
        Self::apply_env_string("FANOUT_NODE_NAME", &mut self.relay.node_name);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
