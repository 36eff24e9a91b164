//! Logger setup.
//!
//! The binary owns the subscriber; the library only emits `tracing`
//! events. Configuration is explicit: level, sink and line format.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[value(alias = "critical")]
    #[serde(alias = "critical")]
    Error,
    #[default]
    #[value(alias = "warning")]
    #[serde(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Level selected by `-v` counts; `None` keeps the configured level.
    pub fn from_verbosity(verbosity: u8) -> Option<Self> {
        match verbosity {
            0 => None,
            1 => Some(Self::Info),
            2 => Some(Self::Debug),
            _ => Some(Self::Trace),
        }
    }

    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Where log lines go. Standard output is reserved for telemetry unless
/// explicitly chosen here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSink {
    #[default]
    Stderr,
    Stdout,
    File,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub sink: LogSink,
    pub file: Option<PathBuf>,
    pub format: LogFormat,
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. For the file
/// sink the returned guard must be held until exit so buffered lines are
/// flushed.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>, CliError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_directive()));

    let (writer, guard) = match config.sink {
        LogSink::Stderr => (BoxMakeWriter::new(std::io::stderr), None),
        LogSink::Stdout => (BoxMakeWriter::new(std::io::stdout), None),
        LogSink::File => {
            let path = config.file.as_ref().ok_or_else(|| CliError::Configuration {
                message: "log sink 'file' requires log_file".into(),
            })?;
            let file_name = path.file_name().ok_or_else(|| CliError::Configuration {
                message: format!("log_file '{}' has no file name", path.display()),
            })?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(config.sink != LogSink::File && config.format == LogFormat::Text)
        .with_writer(writer);

    let installed = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| CliError::Logging {
        message: e.to_string(),
    })?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_overrides_only_when_given() {
        assert_eq!(LogLevel::from_verbosity(0), None);
        assert_eq!(LogLevel::from_verbosity(1), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_verbosity(9), Some(LogLevel::Trace));
    }

    #[test]
    fn accepts_python_level_names() {
        assert_eq!(LogLevel::from_str("WARNING", true), Ok(LogLevel::Warn));
        assert_eq!(LogLevel::from_str("CRITICAL", true), Ok(LogLevel::Error));
        assert_eq!(LogLevel::from_str("info", true), Ok(LogLevel::Info));
    }

    #[test]
    fn file_sink_requires_a_path() {
        let config = LogConfig {
            sink: LogSink::File,
            ..LogConfig::default()
        };
        assert!(matches!(init(&config), Err(CliError::Configuration { .. })));
    }
}
