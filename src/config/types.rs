//! Configuration structures.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Persisted-settings backend selection
    #[serde(default)]
    pub settings: SettingsConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Settings store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Path of the YAML settings file holding the ban list and mode flag.
    /// When unset, settings live in memory only and bans do not survive a
    /// restart.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (overridden by `RUST_LOG` when set)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON-formatted logs
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
