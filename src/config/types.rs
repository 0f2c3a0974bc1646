//! Stored settings types.
//!
//! This module contains the loosely-typed shape settings take in storage and
//! the normalisation that turns it into a [`LateFeeSettings`] snapshot.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::EngineResult;
use crate::models::{
    DEFAULT_FIXED_FEE_AMOUNT, DEFAULT_GRACE_PERIOD_MINUTES, DEFAULT_PER_MINUTE_FEE, FeeType,
    LateFeeSettings, ShiftStart,
};

/// A shift start as it may appear in storage.
///
/// SQL `TIME` columns arrive either as text or as a duration since
/// midnight; both are accepted here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StoredShiftStart {
    /// Seconds since midnight.
    Seconds(i64),
    /// `HH:MM` or `HH:MM:SS`.
    Text(String),
}

impl StoredShiftStart {
    /// Normalises the stored value to a [`ShiftStart`].
    pub fn normalize(&self) -> EngineResult<ShiftStart> {
        match self {
            StoredShiftStart::Seconds(seconds) => ShiftStart::from_seconds(*seconds),
            StoredShiftStart::Text(text) => text.parse(),
        }
    }
}

/// A settings record as deserialised from storage.
///
/// Every field is optional; missing fields take the defaults the settings
/// screen seeds a fresh installation with.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLateFeeSettings {
    /// The shift start in any stored representation.
    #[serde(default, alias = "standard_shift_start")]
    pub shift_start: Option<StoredShiftStart>,
    /// Grace period in minutes.
    #[serde(default)]
    pub grace_period_minutes: Option<u32>,
    /// Fee type as stored text.
    #[serde(default)]
    pub fee_type: Option<String>,
    /// Flat charge for the fixed fee type.
    #[serde(default)]
    pub fixed_fee_amount: Option<Decimal>,
    /// Per-minute charge for the per-minute fee type.
    #[serde(default)]
    pub per_minute_fee: Option<Decimal>,
}

impl RawLateFeeSettings {
    /// Normalises and validates the stored record.
    ///
    /// Unknown fee types and unparseable shift starts are rejected here so
    /// that the calculation never sees them.
    pub fn normalize(&self) -> EngineResult<LateFeeSettings> {
        let shift_start = match &self.shift_start {
            Some(stored) => stored.normalize()?,
            None => ShiftStart::default(),
        };

        let fee_type = match &self.fee_type {
            Some(text) => text.parse::<FeeType>()?,
            None => FeeType::default(),
        };

        let settings = LateFeeSettings {
            shift_start,
            grace_period_minutes: self
                .grace_period_minutes
                .unwrap_or(DEFAULT_GRACE_PERIOD_MINUTES),
            fee_type,
            fixed_fee_amount: self.fixed_fee_amount.unwrap_or(DEFAULT_FIXED_FEE_AMOUNT),
            per_minute_fee: self.per_minute_fee.unwrap_or(DEFAULT_PER_MINUTE_FEE),
        };

        settings.validate()?;
        Ok(settings)
    }
}
