//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Latitude or longitude outside the valid range
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Coordinate text could not be parsed
    #[error("Invalid coordinate format: {0}")]
    InvalidFormat(String),

    /// Matching threshold is negative or not a number
    #[error("Invalid distance threshold: {0}")]
    InvalidThreshold(f64),

    /// Catalog content is structurally wrong
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Catalog file could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Error code for integration with greenbyte-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid coordinate values
    InvalidCoordinate = 10001,
    /// Unparseable coordinate text
    InvalidFormat = 10002,
    /// Invalid matching threshold
    InvalidThreshold = 10003,
    /// Invalid catalog content
    InvalidCatalog = 10004,
    /// Catalog file I/O
    Io = 10005,
    /// JSON or TOML parsing error
    Parsing = 10006,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::InvalidFormat(_) => GeoErrorCode::InvalidFormat,
            GeoError::InvalidThreshold(_) => GeoErrorCode::InvalidThreshold,
            GeoError::InvalidCatalog(_) => GeoErrorCode::InvalidCatalog,
            GeoError::Io { .. } => GeoErrorCode::Io,
            GeoError::JsonError(_) | GeoError::TomlError(_) => GeoErrorCode::Parsing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            GeoError::InvalidCoordinate("x".into()).code() as u32,
            10001
        );
        assert_eq!(GeoError::InvalidThreshold(-1.0).code(), GeoErrorCode::InvalidThreshold);
    }

    #[test]
    fn test_error_display() {
        let err = GeoError::InvalidThreshold(f64::NAN);
        assert!(err.to_string().starts_with("Invalid distance threshold"));
    }
}
