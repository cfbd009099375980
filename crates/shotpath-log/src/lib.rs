//! Logging infrastructure for shotpath.

use std::io;
use std::path::PathBuf;

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Logging configuration.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Log file path (if file logging enabled).
    pub file_path: Option<PathBuf>,
    /// Include source location.
    pub source_location: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON structured format.
    Json,
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        let level = std::env::var("SHOTPATH_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
            .and_then(|v| LogLevel::parse(&v));
        if let Some(level) = level {
            config.level = level;
        }

        if let Ok(format) = std::env::var("SHOTPATH_LOG_FORMAT") {
            config.format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "compact" => LogFormat::Compact,
                _ => LogFormat::Pretty,
            };
        }

        if let Ok(file_path) = std::env::var("SHOTPATH_LOG_FILE") {
            config.file_path = Some(PathBuf::from(file_path));
        }

        if let Ok(source) = std::env::var("SHOTPATH_LOG_SOURCE") {
            config.source_location = source == "1" || source.to_lowercase() == "true";
        }

        config
    }
}

/// Initialize logging with the given configuration.
pub fn init(config: LogConfig) -> Result<(), LogError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));
    let registry = tracing_subscriber::registry().with(filter);

    let init_error = |e: tracing_subscriber::util::TryInitError| LogError::InitError(e.to_string());

    let file = match &config.file_path {
        Some(path) => Some(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?,
        ),
        None => None,
    };

    match (config.format, file) {
        (LogFormat::Pretty, None) => registry
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init()
            .map_err(init_error),
        (LogFormat::Pretty, Some(file)) => registry
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .with(fmt::layer().with_writer(file).with_ansi(false))
            .try_init()
            .map_err(init_error),
        (LogFormat::Compact, None) => registry
            .with(fmt::layer().compact().with_ansi(true))
            .try_init()
            .map_err(init_error),
        (LogFormat::Compact, Some(file)) => registry
            .with(fmt::layer().compact().with_ansi(true))
            .with(fmt::layer().compact().with_writer(file).with_ansi(false))
            .try_init()
            .map_err(init_error),
        (LogFormat::Json, None) => registry
            .with(fmt::layer().json())
            .try_init()
            .map_err(init_error),
        (LogFormat::Json, Some(file)) => registry
            .with(fmt::layer().json())
            .with(fmt::layer().json().with_writer(file))
            .try_init()
            .map_err(init_error),
    }
}

/// Logging errors.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to initialize logging: {0}")]
    InitError(String),

    #[error("failed to open log file: {0}")]
    FileError(#[from] io::Error),
}

/// Convenience macros re-exported from tracing.
pub use tracing::{debug, error, info, trace, warn};

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("Warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("invalid"), None);
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.file_path.is_none());
        assert!(!config.source_location);
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("SHOTPATH_LOG_LEVEL", "debug");
        env::set_var("SHOTPATH_LOG_FORMAT", "json");
        env::set_var("SHOTPATH_LOG_FILE", "/tmp/shotpath-test.log");

        let config = LogConfig::from_env();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file_path, Some(PathBuf::from("/tmp/shotpath-test.log")));

        env::remove_var("SHOTPATH_LOG_LEVEL");
        env::remove_var("SHOTPATH_LOG_FORMAT");
        env::remove_var("SHOTPATH_LOG_FILE");
    }

    #[test]
    fn test_rust_log_fallback() {
        env::remove_var("SHOTPATH_LOG_LEVEL");
        env::set_var("RUST_LOG", "warn");

        let config = LogConfig::from_env();
        assert_eq!(config.level, LogLevel::Warn);

        env::remove_var("RUST_LOG");
    }
}
