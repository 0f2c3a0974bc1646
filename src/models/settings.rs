//! Late fee settings model and related types.
//!
//! This module defines [`LateFeeSettings`], the normalised [`ShiftStart`]
//! time-of-day, and the closed [`FeeType`] pricing strategy.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Shift start hour used when no settings have been saved yet.
pub const DEFAULT_SHIFT_START_HOUR: u32 = 8;

/// Grace period used when no settings have been saved yet.
pub const DEFAULT_GRACE_PERIOD_MINUTES: u32 = 10;

/// Fixed fee used when no settings have been saved yet (50.00).
pub const DEFAULT_FIXED_FEE_AMOUNT: Decimal = Decimal::from_parts(5000, 0, 0, false, 2);

/// Per-minute fee used when no settings have been saved yet (5.00).
pub const DEFAULT_PER_MINUTE_FEE: Decimal = Decimal::from_parts(500, 0, 0, false, 2);

/// Largest accepted fixed or per-minute fee (1,000,000.00).
///
/// Keeps `per_minute_fee * minutes_late` well inside `Decimal` range for any
/// `u32` number of minutes.
pub const MAX_FEE_AMOUNT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 2);

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// The official start of a shift as an hour and minute of the day.
///
/// Seconds are never carried: every stored representation is normalised
/// to whole minutes when it is loaded.
///
/// # Example
///
/// ```
/// use late_fee_engine::models::ShiftStart;
///
/// let start: ShiftStart = "08:30:45".parse().unwrap();
/// assert_eq!(start.hour(), 8);
/// assert_eq!(start.minute(), 30);
/// assert_eq!(start.to_string(), "08:30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShiftStart(NaiveTime);

impl ShiftStart {
    /// Creates a shift start from an hour (0-23) and minute (0-59).
    pub fn new(hour: u32, minute: u32) -> EngineResult<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| {
                EngineError::invalid_settings(
                    "shift_start",
                    format!("{}:{:02} is not a valid time of day", hour, minute),
                )
            })
    }

    /// Creates a shift start from a duration in seconds since midnight.
    ///
    /// SQL `TIME` columns are commonly surfaced as durations; the seconds
    /// component is dropped.
    pub fn from_seconds(seconds: i64) -> EngineResult<Self> {
        if !(0..SECONDS_PER_DAY).contains(&seconds) {
            return Err(EngineError::invalid_settings(
                "shift_start",
                format!("{} seconds is outside a single day", seconds),
            ));
        }
        let hour = (seconds / 3600) as u32;
        let minute = ((seconds % 3600) / 60) as u32;
        Self::new(hour, minute)
    }

    /// Returns the hour of the day (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute of the hour (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Returns the shift start as a [`NaiveTime`] with zero seconds.
    pub fn as_time(&self) -> NaiveTime {
        self.0
    }

    /// Combines the shift start with a calendar date.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.0)
    }
}

impl Default for ShiftStart {
    fn default() -> Self {
        Self(NaiveTime::MIN + chrono::Duration::hours(DEFAULT_SHIFT_START_HOUR as i64))
    }
}

impl fmt::Display for ShiftStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ShiftStart {
    type Err = EngineError;

    /// Parses `HH:MM` or `HH:MM:SS`; seconds are discarded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            EngineError::invalid_settings(
                "shift_start",
                format!("'{}' is not in HH:MM or HH:MM:SS form", s),
            )
        };

        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid());
        }

        let hour = parts[0].parse::<u32>().map_err(|_| invalid())?;
        let minute = parts[1].parse::<u32>().map_err(|_| invalid())?;
        if let Some(seconds) = parts.get(2) {
            let seconds = seconds.parse::<u32>().map_err(|_| invalid())?;
            if seconds > 59 {
                return Err(invalid());
            }
        }

        Self::new(hour, minute)
    }
}

impl TryFrom<String> for ShiftStart {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ShiftStart> for String {
    fn from(value: ShiftStart) -> Self {
        value.to_string()
    }
}

/// The pricing strategy used to turn minutes late into a fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    /// A flat charge per late instance.
    #[default]
    Fixed,
    /// A charge for every minute late after the grace period.
    PerMinute,
    /// A bracketed charge looked up from the minutes late.
    Tiered,
}

impl FeeType {
    /// Returns the stored string form of the fee type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeType::Fixed => "fixed",
            FeeType::PerMinute => "per_minute",
            FeeType::Tiered => "tiered",
        }
    }
}

impl fmt::Display for FeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeeType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(FeeType::Fixed),
            "per_minute" => Ok(FeeType::PerMinute),
            "tiered" => Ok(FeeType::Tiered),
            other => Err(EngineError::invalid_settings(
                "fee_type",
                format!("unknown fee type '{}'", other),
            )),
        }
    }
}

/// The late fee configuration evaluated against every clock-in.
///
/// Exactly one settings record is active at a time; the engine only ever
/// sees an already-fetched snapshot of it.
///
/// # Example
///
/// ```
/// use late_fee_engine::models::{FeeType, LateFeeSettings};
/// use rust_decimal::Decimal;
///
/// let settings = LateFeeSettings::default();
/// assert_eq!(settings.shift_start.to_string(), "08:00");
/// assert_eq!(settings.grace_period_minutes, 10);
/// assert_eq!(settings.fee_type, FeeType::Fixed);
/// assert_eq!(settings.fixed_fee_amount, Decimal::new(5000, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LateFeeSettings {
    /// The time of day against which lateness is measured.
    pub shift_start: ShiftStart,
    /// Minutes after the shift start during which arrival is not late.
    pub grace_period_minutes: u32,
    /// The pricing strategy.
    pub fee_type: FeeType,
    /// Flat charge used by [`FeeType::Fixed`].
    pub fixed_fee_amount: Decimal,
    /// Per-minute charge used by [`FeeType::PerMinute`].
    pub per_minute_fee: Decimal,
}

impl LateFeeSettings {
    /// Checks that monetary amounts lie within `0..=MAX_FEE_AMOUNT`.
    pub fn validate(&self) -> EngineResult<()> {
        check_amount("fixed_fee_amount", self.fixed_fee_amount)?;
        check_amount("per_minute_fee", self.per_minute_fee)
    }
}

fn check_amount(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount < Decimal::ZERO {
        return Err(EngineError::invalid_settings(
            field,
            format!("must not be negative, got {}", amount),
        ));
    }
    if amount > MAX_FEE_AMOUNT {
        return Err(EngineError::invalid_settings(
            field,
            format!("must not exceed {}, got {}", MAX_FEE_AMOUNT, amount),
        ));
    }
    Ok(())
}

impl Default for LateFeeSettings {
    fn default() -> Self {
        Self {
            shift_start: ShiftStart::default(),
            grace_period_minutes: DEFAULT_GRACE_PERIOD_MINUTES,
            fee_type: FeeType::default(),
            fixed_fee_amount: DEFAULT_FIXED_FEE_AMOUNT,
            per_minute_fee: DEFAULT_PER_MINUTE_FEE,
        }
    }
}
