//! Structured errors for configuration and input checks
//!
//! Each [`Error`] carries a numeric [`ErrorCode`], an optional note on where
//! it happened and an optional hint for fixing it. [`Error::to_report`]
//! turns it into a serializable [`ErrorReport`] for `--json` output.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Configuration could not be read
    ConfigError = 3000,
    /// An explicitly named configuration file is missing
    ConfigNotFound = 3001,
    /// Configuration text is not valid TOML or has unknown keys
    ConfigParseError = 3002,
    /// Configuration values are out of range
    ConfigValidationError = 3003,
    /// User input failed validation
    ValidationError = 6000,
}

impl ErrorCode {
    /// Numeric code
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Human-readable category
    pub fn category(self) -> &'static str {
        match self {
            ErrorCode::ConfigError
            | ErrorCode::ConfigNotFound
            | ErrorCode::ConfigParseError
            | ErrorCode::ConfigValidationError => "Configuration",
            ErrorCode::ValidationError => "Validation",
        }
    }

    /// Process exit code for a command that fails with this error
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCode::ValidationError => exit_codes::VALIDATION_ERROR,
            _ => exit_codes::CONFIG_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Error with code, location note and fix hint
#[derive(Error, Debug)]
pub struct Error {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Where the error happened, e.g. the configuration file
    pub context: Option<String>,
    /// How to fix it
    pub suggestion: Option<String>,
    /// Underlying cause
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(context) = &self.context {
            write!(f, "\n  Context: {context}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {suggestion}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Configuration could not be read
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// An explicitly requested configuration file is missing
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a greenbyte.toml file or use --config to specify a path")
    }

    /// Note where the error happened
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a fix hint
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach the underlying cause
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Serializable form for JSON output
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code.to_string(),
            category: self.code.category(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(ToString::to_string),
        }
    }
}

/// Serializable error report
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    /// Code as `E3001`
    pub code: String,
    /// Code category
    pub category: &'static str,
    /// Human-readable message
    pub message: String,
    /// Where the error happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// How to fix it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Underlying cause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for the `greenbyte` binary
#[allow(missing_docs)]
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const VALIDATION_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    /// No known location lies within the distance threshold
    pub const NO_MATCH: i32 = 4;
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {err}"))
            .with_source(err)
    }
}
