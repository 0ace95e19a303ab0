//! Error types for the calendar crate.

use thiserror::Error;

/// Result type alias for calendar operations.
pub type Result<T> = std::result::Result<T, CalendarError>;

/// Errors that can occur while building or querying crop calendars.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// Month index outside 0..=11
    #[error("Invalid month index {0}: expected 0 (January) to 11 (December)")]
    InvalidMonth(u8),

    /// Unrecognised month name
    #[error("Invalid month name: {0}")]
    InvalidMonthName(String),

    /// Season entry is structurally wrong
    #[error("Invalid crop season: {0}")]
    InvalidSeason(String),

    /// Two entries share a crop name
    #[error("Duplicate crop in calendar: {0}")]
    DuplicateCrop(String),

    /// Season file could not be read
    #[error("Failed to read season table {path}: {source}")]
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
/// Range: 11xxx for calendar errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarErrorCode {
    /// Month index out of range
    InvalidMonth = 11001,
    /// Unknown month name
    InvalidMonthName = 11002,
    /// Invalid season entry
    InvalidSeason = 11003,
    /// Duplicate crop name
    DuplicateCrop = 11004,
    /// Season file I/O
    Io = 11005,
    /// JSON or TOML parsing error
    Parsing = 11006,
}

impl CalendarError {
    /// Returns the error code for this error.
    pub fn code(&self) -> CalendarErrorCode {
        match self {
            CalendarError::InvalidMonth(_) => CalendarErrorCode::InvalidMonth,
            CalendarError::InvalidMonthName(_) => CalendarErrorCode::InvalidMonthName,
            CalendarError::InvalidSeason(_) => CalendarErrorCode::InvalidSeason,
            CalendarError::DuplicateCrop(_) => CalendarErrorCode::DuplicateCrop,
            CalendarError::Io { .. } => CalendarErrorCode::Io,
            CalendarError::JsonError(_) | CalendarError::TomlError(_) => CalendarErrorCode::Parsing,
        }
    }
}
