use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Config error: {0}")]
    Config(#[from] fanout_config::ConfigError),

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("Metrics exporter error: {message}")]
    Exporter { message: String },

    #[error("Failed to encode heartbeat: {source} {location}")]
    Encode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Stream transport error: {source} {location}")]
    Transport {
        #[source]
        source: axum::Error,
        location: ErrorLocation,
    },
}

impl From<serde_json::Error> for RelayError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Encode {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<axum::Error> for RelayError {
    #[track_caller]
    fn from(source: axum::Error) -> Self {
        Self::Transport {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
