use crate::error::{RelayError, Result as RelayResult};

use std::fmt::Display;
use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::{LevelFilter, Record, info};

/// Crates whose per-frame chatter would drown out subscriber lifecycle lines
const NOISY_TARGETS: &[&str] = &["hyper", "hyper_util", "tungstenite", "tokio_tungstenite"];

/// Where log records go
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LogOutput {
    File(PathBuf),
    ColoredStdout,
    PlainStdout,
}

impl LogOutput {
    /// A log file wins over stdout; colour only applies to stdout
    pub(crate) fn select(log_file: Option<PathBuf>, colored: bool) -> Self {
        match log_file {
            Some(path) => Self::File(path),
            None if colored => Self::ColoredStdout,
            None => Self::PlainStdout,
        }
    }
}

/// Initialize the fern logger for the relay.
///
/// Every line carries an RFC 3339 timestamp and the record's origin:
/// `file:line` in debug builds, the module target in release builds.
/// Transport crates are capped at `warn` so per-subscriber lines stay readable.
pub fn initialize(
    log_level: fanout_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> RelayResult<()> {
    let level_filter = log_level.0;
    let output = LogOutput::select(log_file, colored);

    let mut base_dispatch = Dispatch::new().level(level_filter);
    for target in NOISY_TARGETS {
        base_dispatch = base_dispatch.level_for(*target, dependency_level(level_filter));
    }

    let dispatch = match &output {
        LogOutput::File(log_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)
                .map_err(|e| RelayError::Logger {
                    message: format!("Failed to open log file {}: {}", log_path.display(), e),
                })?;

            Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!("{}", format_line(record.level(), message, record)))
                })
                .chain(file)
        }
        LogOutput::ColoredStdout => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);

            Dispatch::new()
                .format(move |out, message, record| {
                    let level = colors.color(record.level());
                    out.finish(format_args!("{}", format_line(level, message, record)))
                })
                .chain(std::io::stdout())
        }
        LogOutput::PlainStdout => Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!("{}", format_line(record.level(), message, record)))
            })
            .chain(std::io::stdout()),
    };

    base_dispatch
        .chain(dispatch)
        .apply()
        .map_err(|e| RelayError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    match output {
        LogOutput::File(path) => info!(
            "Logger initialized: level={:?}, file={}",
            level_filter,
            path.display()
        ),
        LogOutput::ColoredStdout | LogOutput::PlainStdout => {
            info!("Logger initialized: level={:?}, stdout", level_filter)
        }
    }

    Ok(())
}

pub(crate) fn format_line(level: impl Display, message: impl Display, record: &Record) -> String {
    format!(
        "[{date} - {level}] {message} [{origin}]",
        date = humantime::format_rfc3339(SystemTime::now()),
        origin = origin(record),
    )
}

pub(crate) fn origin(record: &Record) -> String {
    if cfg!(debug_assertions) {
        format!(
            "{}:{}",
            record.file().unwrap_or("unknown"),
            record.line().unwrap_or(0)
        )
    } else {
        record.target().to_string()
    }
}

/// Transport crates never log below `warn`, and never above the global level
pub(crate) fn dependency_level(level: LevelFilter) -> LevelFilter {
    level.min(LevelFilter::Warn)
}
