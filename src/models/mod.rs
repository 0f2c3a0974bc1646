//! Core data models for the Late Fee Engine.
//!
//! This module contains the settings snapshot the engine evaluates against,
//! the results it produces, and the attendance records its collaborators keep.

mod attendance;
mod lateness;
mod settings;

pub use attendance::{
    AttendanceRecord, AttendanceStatus, DEFAULT_PAYMENT_METHOD, LateFeePayment, LateFeeSummary,
};
pub use lateness::{AuditStep, LateFeeAssessment, LatenessResult};
pub use settings::{
    DEFAULT_FIXED_FEE_AMOUNT, DEFAULT_GRACE_PERIOD_MINUTES, DEFAULT_PER_MINUTE_FEE,
    DEFAULT_SHIFT_START_HOUR, FeeType, LateFeeSettings, MAX_FEE_AMOUNT, ShiftStart,
};
