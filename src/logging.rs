// Logging setup for embedders of the notification layer
//
// Thin initialization helper over the `log` facade. Supports a plain text
// format with YYYY-MM-DD HH:mm:ss timestamps and a JSON-line format with an
// extensible entry structure. Embedders that already install their own
// logger can skip this module entirely; the layer only uses `log` macros
// internally.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::Local;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}. Valid options: text, json", s)),
        }
    }
}

/// JSON log entry structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLogEntry {
    pub timestamp: String,
    pub level: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            format: LogFormat::Text,
        }
    }
}

fn format_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Initialize the global logger with the given configuration.
///
/// Fails if a logger is already installed.
pub fn init_logger(config: LogConfig) -> Result<()> {
    let format = config.format;
    env_logger::Builder::new()
        .filter_level(config.level)
        .format(move |buf, record| {
            let timestamp = format_timestamp();
            match format {
                LogFormat::Text => {
                    writeln!(buf, "{} [{}] {}", timestamp, record.level(), record.args())
                }
                LogFormat::Json => {
                    let entry = JsonLogEntry {
                        timestamp: timestamp.clone(),
                        level: record.level().to_string(),
                        message: record.args().to_string(),
                        detail: None,
                    };
                    match serde_json::to_string(&entry) {
                        Ok(line) => writeln!(buf, "{}", line),
                        // fall back to text rather than lose the record
                        Err(_) => {
                            writeln!(buf, "{} [{}] {}", timestamp, record.level(), record.args())
                        }
                    }
                }
            }
        })
        .try_init()
        .context("Failed to set global logger")
}

/// Convert string to LevelFilter
pub fn parse_log_level(level_str: &str) -> Result<LevelFilter> {
    match level_str.to_lowercase().as_str() {
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        "off" => Ok(LevelFilter::Off),
        _ => Err(anyhow::anyhow!(
            "Invalid log level: {}. Valid levels: error, warn, info, debug, trace, off",
            level_str
        )),
    }
}
