//! Minutes-late calculation.
//!
//! Lateness is measured against the shift start on the same calendar day as
//! the clock-in, and the grace period is removed entirely from the result.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::LateFeeSettings;

/// Calculates how many fee-relevant minutes late a clock-in is.
///
/// # Arguments
///
/// * `clock_in` - When the employee clocked in
/// * `settings` - The active settings snapshot, or `None` if none exists
///
/// # Returns
///
/// - `0` if the clock-in is at or before the shift start
/// - `0` if the clock-in is late by no more than the grace period (inclusive)
/// - otherwise the whole minutes late minus the grace period
///
/// Returns [`EngineError::ConfigurationError`] if `settings` is `None`.
///
/// # Example
///
/// ```
/// use late_fee_engine::calculation::compute_minutes_late;
/// use late_fee_engine::models::LateFeeSettings;
/// use chrono::NaiveDateTime;
///
/// // 08:00 start, 10 minute grace
/// let settings = LateFeeSettings::default();
///
/// let at = NaiveDateTime::parse_from_str("2026-01-15 08:10:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(compute_minutes_late(at, Some(&settings)).unwrap(), 0);
///
/// let at = NaiveDateTime::parse_from_str("2026-01-15 08:11:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(compute_minutes_late(at, Some(&settings)).unwrap(), 1);
/// ```
pub fn compute_minutes_late(
    clock_in: NaiveDateTime,
    settings: Option<&LateFeeSettings>,
) -> EngineResult<u32> {
    let settings = settings.ok_or_else(EngineError::no_active_settings)?;

    let expected = settings.shift_start.on(clock_in.date());
    if clock_in <= expected {
        debug!(%clock_in, %expected, "Clock-in at or before shift start");
        return Ok(0);
    }

    // Within one calendar day, so this always fits in u32.
    let raw_minutes = ((clock_in - expected).num_seconds() / 60) as u32;
    let grace = settings.grace_period_minutes;

    if raw_minutes <= grace {
        debug!(raw_minutes, grace, "Late within grace period");
        return Ok(0);
    }

    let minutes_late = raw_minutes - grace;
    debug!(raw_minutes, grace, minutes_late, "Late after grace period");
    Ok(minutes_late)
}
