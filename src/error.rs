//! Error types for the Late Fee Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading settings,
//! evaluating lateness, and recording attendance.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the Late Fee Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use late_fee_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No active late fee settings are available.
    #[error("Late fee settings not configured: {message}")]
    ConfigurationError {
        /// A description of what was missing.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A settings value was present but could not be accepted.
    #[error("Invalid settings field '{field}': {message}")]
    InvalidSettings {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No attendance record exists with the given id.
    #[error("Attendance record not found: {id}")]
    AttendanceNotFound {
        /// The id that was looked up.
        id: Uuid,
    },

    /// The employee already has an open attendance record for the day.
    #[error("Employee '{employee_id}' already clocked in on {date}")]
    AlreadyClockedIn {
        /// The employee attempting to clock in.
        employee_id: String,
        /// The date of the open record.
        date: NaiveDate,
    },

    /// The employee has no open attendance record for the day to close.
    #[error("No active clock-in found for employee '{employee_id}' on {date}")]
    NoOpenAttendance {
        /// The employee attempting to clock out.
        employee_id: String,
        /// The day being clocked out of.
        date: NaiveDate,
    },

    /// The attendance record carries no late fee.
    #[error("Attendance record {id} has no late fee")]
    NoLateFee {
        /// The attendance record id.
        id: Uuid,
    },

    /// The late fee on the attendance record was already paid.
    #[error("Late fee for attendance record {id} is already paid")]
    FeeAlreadyPaid {
        /// The attendance record id.
        id: Uuid,
    },
}

impl EngineError {
    /// Builds the error raised when no active settings record exists.
    pub fn no_active_settings() -> Self {
        EngineError::ConfigurationError {
            message: "no active late fee settings record".to_string(),
        }
    }

    /// Builds an [`EngineError::InvalidSettings`] for the given field.
    pub fn invalid_settings(field: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidSettings {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
