//! # Error Types
//!
//! Structured error types for wingbox_core. Configuration problems are caught
//! by `validate()` before any computation starts; numeric degeneracies abort
//! the run that produced them instead of letting NaN reach the deflection and
//! twist arrays.
//!
//! ## Example
//!
//! ```rust
//! use wingbox_core::errors::{WingBoxError, WingBoxResult};
//!
//! fn validate_thickness(t_m: f64) -> WingBoxResult<()> {
//!     if t_m <= 0.0 {
//!         return Err(WingBoxError::invalid_input(
//!             "t_sheet_hor",
//!             t_m.to_string(),
//!             "Thickness must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_thickness(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for wingbox operations
pub type WingBoxResult<T> = Result<T, WingBoxError>;

/// Structured error type for wing-box analysis.
///
/// Each variant carries enough context to point at the offending input field
/// or station without re-running the calculation.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum WingBoxError {
    /// An input value is invalid (non-positive, out of range, not finite)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A stringer schedule is malformed
    #[error("Invalid stringer schedule '{schedule}': {reason}")]
    InvalidSchedule { schedule: String, reason: String },

    /// Two per-station arrays that must match in length do not
    #[error("Length mismatch for '{field}': expected {expected} stations, got {actual}")]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    /// A computed section quantity is zero, negative or not finite
    #[error("Numeric degeneracy: {quantity} = {value} at station {station}")]
    NumericDegeneracy {
        quantity: String,
        station: usize,
        value: f64,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl WingBoxError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        WingBoxError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidSchedule error
    pub fn invalid_schedule(schedule: impl Into<String>, reason: impl Into<String>) -> Self {
        WingBoxError::InvalidSchedule {
            schedule: schedule.into(),
            reason: reason.into(),
        }
    }

    /// Create a LengthMismatch error
    pub fn length_mismatch(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        WingBoxError::LengthMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Create a NumericDegeneracy error
    pub fn numeric_degeneracy(quantity: impl Into<String>, station: usize, value: f64) -> Self {
        WingBoxError::NumericDegeneracy {
            quantity: quantity.into(),
            station,
            value,
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        WingBoxError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        WingBoxError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        WingBoxError::Internal {
            message: message.into(),
        }
    }

    /// Configuration errors are rejected before any computation starts
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            WingBoxError::InvalidInput { .. }
                | WingBoxError::InvalidSchedule { .. }
                | WingBoxError::LengthMismatch { .. }
        )
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, WingBoxError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            WingBoxError::InvalidInput { .. } => "INVALID_INPUT",
            WingBoxError::InvalidSchedule { .. } => "INVALID_SCHEDULE",
            WingBoxError::LengthMismatch { .. } => "LENGTH_MISMATCH",
            WingBoxError::NumericDegeneracy { .. } => "NUMERIC_DEGENERACY",
            WingBoxError::FileError { .. } => "FILE_ERROR",
            WingBoxError::FileLocked { .. } => "FILE_LOCKED",
            WingBoxError::SerializationError { .. } => "SERIALIZATION_ERROR",
            WingBoxError::VersionMismatch { .. } => "VERSION_MISMATCH",
            WingBoxError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

/// Reject values that are not strictly positive and finite.
pub(crate) fn require_positive(field: &str, value: f64) -> WingBoxResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(WingBoxError::invalid_input(
            field,
            value.to_string(),
            "Must be positive and finite",
        ));
    }
    Ok(())
}

/// Reject values outside the closed interval [0, 1].
pub(crate) fn require_fraction(field: &str, value: f64) -> WingBoxResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(WingBoxError::invalid_input(
            field,
            value.to_string(),
            "Must be a fraction between 0 and 1",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = WingBoxError::numeric_degeneracy("torsional_constant", 12, -0.5);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("NumericDegeneracy"));
        let roundtrip: WingBoxError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            WingBoxError::invalid_schedule("top", "empty").error_code(),
            "INVALID_SCHEDULE"
        );
        assert_eq!(
            WingBoxError::length_mismatch("pitching_moment", 500, 499).error_code(),
            "LENGTH_MISMATCH"
        );
    }

    #[test]
    fn test_configuration_classification() {
        assert!(WingBoxError::invalid_input("span_m", "-1", "neg").is_configuration_error());
        assert!(!WingBoxError::numeric_degeneracy("I", 0, 0.0).is_configuration_error());
    }

    #[test]
    fn test_require_helpers() {
        assert!(require_positive("t", 0.001).is_ok());
        assert!(require_positive("t", 0.0).is_err());
        assert!(require_positive("t", f64::NAN).is_err());
        assert!(require_fraction("f", 1.0).is_ok());
        assert!(require_fraction("f", 1.2).is_err());
    }
}
