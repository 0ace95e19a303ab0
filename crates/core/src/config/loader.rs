//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use crate::validation::Validator;
use std::path::{Path, PathBuf};

/// Half the Earth's circumference on a 6371 km sphere; no two points are farther apart.
pub const MAX_SURFACE_DISTANCE_KM: f64 = 20_015.1;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults.
    ///
    /// An explicit `path` must exist. Without one, the standard locations are
    /// searched and defaults are used if none is present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        let config = Self {
            schema,
            path: config_path,
        };
        config.validate()?;

        tracing::debug!(path = ?config.path, "Configuration loaded");
        Ok(config)
    }

    /// Parse configuration from TOML text without touching the filesystem.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config = Self {
            schema: toml::from_str(content)?,
            path: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges the schema cannot express.
    pub fn validate(&self) -> Result<()> {
        let matcher = &self.schema.matcher;
        let logging = &self.schema.logging;

        Validator::new()
            .finite("matcher.max_distance_km", matcher.max_distance_km)
            .range(
                "matcher.max_distance_km",
                matcher.max_distance_km,
                0.0,
                MAX_SURFACE_DISTANCE_KM,
            )
            .one_of("logging.level", &logging.level.to_ascii_lowercase(), LOG_LEVELS)
            .validate()
            .to_result()
            .map_err(|e| {
                let err = Error::new(ErrorCode::ConfigValidationError, e.message);
                match &self.path {
                    Some(path) => err.with_context(path.display().to_string()),
                    None => err,
                }
            })
    }

    /// Location catalog file, resolved against the configuration file's directory.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.schema
            .matcher
            .catalog_path
            .as_deref()
            .map(|p| self.resolve(p))
    }

    /// Season table file, resolved against the configuration file's directory.
    pub fn seasons_path(&self) -> Option<PathBuf> {
        self.schema
            .calendar
            .seasons_path
            .as_deref()
            .map(|p| self.resolve(p))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match self.path.as_deref().and_then(Path::parent) {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = ["greenbyte.toml", ".greenbyte.toml", ".config/greenbyte.toml"];

    candidates
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path.display(), e))
            .with_source(e)
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::new(
            ErrorCode::ConfigParseError,
            format!("Failed to parse config file {}: {}", path.display(), e),
        )
        .with_suggestion("Allowed sections are [matcher], [calendar] and [logging]")
        .with_source(e)
    })
}
