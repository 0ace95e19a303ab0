//! Fluent validation for configuration values and coordinate input
//!
//! Checks are chained on a [`Validator`]; every failing check is recorded so
//! one pass reports all bad fields at once.
//!
//! ```rust
//! use greenbyte_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .finite("latitude", 12.97)
//!     .range("latitude", 12.97, -90.0, 90.0)
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use crate::error::{Error, ErrorCode, Result};
use std::fmt;

/// A failed or suspicious field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Dotted field name, e.g. `matcher.max_distance_km`
    pub field: String,
    /// What is wrong with it
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of a validation pass
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    errors: Vec<Issue>,
    warnings: Vec<Issue>,
}

impl ValidationResult {
    /// True when no check failed; warnings do not count
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failed checks in the order they ran
    pub fn errors(&self) -> &[Issue] {
        &self.errors
    }

    /// Non-blocking findings
    pub fn warnings(&self) -> &[Issue] {
        &self.warnings
    }

    /// Fold every failure into one `ValidationError`
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            return Ok(());
        }
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        Err(Error::new(
            ErrorCode::ValidationError,
            format!("Validation failed: {}", messages.join("; ")),
        ))
    }
}

/// Fluent validator builder
#[derive(Debug, Default)]
pub struct Validator {
    result: ValidationResult,
}

impl Validator {
    /// Start an empty pass
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(mut self, failed: bool, field: &str, message: impl FnOnce() -> String) -> Self {
        if failed {
            self.result.errors.push(Issue {
                field: field.to_string(),
                message: message(),
            });
        }
        self
    }

    /// `value` must be one of `allowed`
    #[must_use]
    pub fn one_of(self, field: &str, value: &str, allowed: &[&str]) -> Self {
        self.fail(!allowed.contains(&value), field, || {
            format!("'{value}' is not one of: {}", allowed.join(", "))
        })
    }

    /// `value` must lie in `min..=max`
    ///
    /// NaN compares false against both bounds and passes; pair with
    /// [`Validator::finite`] for floats.
    #[must_use]
    pub fn range<T: PartialOrd + fmt::Display>(self, field: &str, value: T, min: T, max: T) -> Self {
        let out_of_range = value < min || value > max;
        self.fail(out_of_range, field, || format!("Must be between {min} and {max}"))
    }

    /// `value` must be neither NaN nor infinite
    #[must_use]
    pub fn finite(self, field: &str, value: f64) -> Self {
        self.fail(!value.is_finite(), field, || {
            format!("Must be a finite number, got {value}")
        })
    }

    /// Record a warning when `condition` holds
    #[must_use]
    pub fn warn_if(mut self, field: &str, condition: bool, message: &str) -> Self {
        if condition {
            self.result.warnings.push(Issue {
                field: field.to_string(),
                message: message.to_string(),
            });
        }
        self
    }

    /// Finish the pass
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

/// Validate a latitude/longitude pair before it reaches the matcher.
///
/// Both fields are checked so a form can flag every bad input at once.
pub fn validate_coordinate(latitude: f64, longitude: f64) -> ValidationResult {
    Validator::new()
        .finite("latitude", latitude)
        .range("latitude", latitude, -90.0, 90.0)
        .finite("longitude", longitude)
        .range("longitude", longitude, -180.0, 180.0)
        .warn_if(
            "coordinate",
            latitude == 0.0 && longitude == 0.0,
            "Coordinate is (0, 0); the location may not have been set",
        )
        .validate()
}
