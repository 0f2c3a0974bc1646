//! Late fee pricing.
//!
//! Converts fee-relevant minutes late into a monetary charge using the
//! strategy selected by the settings.
//!
//! ## Tiered Pricing
//!
//! | Minutes late | Fee    |
//! |--------------|--------|
//! | 1-10         | 0.00   |
//! | 11-30        | 25.00  |
//! | 31-60        | 50.00  |
//! | 61-120       | 100.00 |
//! | 121+         | 200.00 |
//!
//! The free band applies on top of the grace period, which has already been
//! subtracted from the minutes late.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{FeeType, LateFeeSettings};

/// Tier upper bounds (inclusive, in minutes late) and the fee charged.
pub const LATE_FEE_TIERS: [(u32, Decimal); 4] = [
    (10, Decimal::from_parts(0, 0, 0, false, 2)),
    (30, Decimal::from_parts(2500, 0, 0, false, 2)),
    (60, Decimal::from_parts(5000, 0, 0, false, 2)),
    (120, Decimal::from_parts(10000, 0, 0, false, 2)),
];

/// Fee charged above the last tier bound.
pub const TIERED_MAX_FEE: Decimal = Decimal::from_parts(20000, 0, 0, false, 2);

/// Looks up the tiered fee for the given minutes late.
///
/// # Example
///
/// ```
/// use late_fee_engine::calculation::tiered_fee;
/// use rust_decimal::Decimal;
///
/// assert_eq!(tiered_fee(45), Decimal::new(5000, 2));
/// assert_eq!(tiered_fee(121), Decimal::new(20000, 2));
/// ```
pub fn tiered_fee(minutes_late: u32) -> Decimal {
    LATE_FEE_TIERS
        .iter()
        .find(|(upper, _)| minutes_late <= *upper)
        .map(|(_, fee)| *fee)
        .unwrap_or(TIERED_MAX_FEE)
}

/// Calculates the late fee for the given minutes late.
///
/// # Arguments
///
/// * `minutes_late` - Fee-relevant minutes late (after the grace period)
/// * `settings` - The active settings snapshot
///
/// # Returns
///
/// `0.00` when `minutes_late` is 0, whatever the fee type. Otherwise:
/// - [`FeeType::Fixed`]: `fixed_fee_amount`
/// - [`FeeType::PerMinute`]: `per_minute_fee * minutes_late`
/// - [`FeeType::Tiered`]: see [`tiered_fee`]
///
/// Amounts are taken as given; [`LateFeeSettings::validate`] bounds them.
/// A per-minute product that would overflow saturates at `Decimal::MAX`.
///
/// # Example
///
/// ```
/// use late_fee_engine::calculation::compute_fee;
/// use late_fee_engine::models::{FeeType, LateFeeSettings};
/// use rust_decimal::Decimal;
///
/// let settings = LateFeeSettings {
///     fee_type: FeeType::PerMinute,
///     ..LateFeeSettings::default()
/// };
/// assert_eq!(compute_fee(7, &settings), Decimal::new(3500, 2));
/// ```
pub fn compute_fee(minutes_late: u32, settings: &LateFeeSettings) -> Decimal {
    if minutes_late == 0 {
        return Decimal::new(0, 2);
    }

    let fee = match settings.fee_type {
        FeeType::Fixed => settings.fixed_fee_amount,
        FeeType::PerMinute => settings
            .per_minute_fee
            .checked_mul(Decimal::from(minutes_late))
            .unwrap_or(Decimal::MAX),
        FeeType::Tiered => tiered_fee(minutes_late),
    };

    debug!(minutes_late, fee_type = %settings.fee_type, %fee, "Late fee calculated");
    fee
}
