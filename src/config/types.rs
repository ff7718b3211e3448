//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and configuration.

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Application configuration, parsed from the command line.
///
/// Scans themselves are requested per-connection through the `/scan`
/// endpoint; this struct only carries process-wide settings.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "page_recon",
    version,
    about = "Streams web page reconnaissance: referenced hosts, trust classification, image inventory, and OCR-extracted domains"
)]
pub struct Config {
    /// Host to bind the scan server to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,

    /// Minimum log level to display (overrides RUST_LOG)
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log output format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// User-Agent header for page and image fetches
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// HTTP fetch timeout in seconds
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Path to the tesseract binary used for OCR
    #[arg(long, default_value = "tesseract")]
    pub tesseract_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config::parse_from::<_, &str>([])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.timeout_seconds, DEFAULT_FETCH_TIMEOUT_SECS);
        assert_eq!(config.tesseract_path, "tesseract");
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::parse_from([
            "page_recon",
            "--port",
            "9100",
            "--tesseract-path",
            "/opt/tesseract/bin/tesseract",
        ]);
        assert_eq!(config.port, 9100);
        assert_eq!(config.tesseract_path, "/opt/tesseract/bin/tesseract");
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
    }
}
