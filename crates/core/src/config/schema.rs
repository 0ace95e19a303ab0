//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigSchema {
    /// Nearest-location matching
    #[serde(default)]
    pub matcher: MatcherConfig,

    /// Crop calendar
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Nearest-location matching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Largest accepted distance between a query and its matched record
    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: f64,

    /// Location catalog file (JSON or TOML); the built-in catalog is used when unset
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_distance_km: default_max_distance_km(),
            catalog_path: None,
        }
    }
}

fn default_max_distance_km() -> f64 {
    150.0
}

/// Crop calendar configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalendarConfig {
    /// Season table file (JSON or TOML); the built-in table is used when unset
    #[serde(default)]
    pub seasons_path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
