//! Attendance, payment, and fee summary models.
//!
//! These records belong to the attendance recorder and payment ledger;
//! the engine itself never reads or writes them.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment method recorded when none is given.
pub const DEFAULT_PAYMENT_METHOD: &str = "Cash";

/// High-level status of an attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Clocked in on time (or no late fee data was available).
    #[default]
    Present,
    /// Clocked in after the grace period.
    Late,
    /// Did not clock in.
    Absent,
}

/// One employee's attendance for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The calendar day of the clock-in.
    pub date: NaiveDate,
    /// When the employee clocked in.
    pub clock_in: NaiveDateTime,
    /// When the employee clocked out, if they have.
    pub clock_out: Option<NaiveDateTime>,
    /// The attendance status.
    pub status: AttendanceStatus,
    /// Minutes late after the grace period.
    pub minutes_late: u32,
    /// The late fee charged for this clock-in.
    pub late_fee_amount: Decimal,
    /// Whether the late fee has been paid.
    pub late_fee_paid: bool,
}

impl AttendanceRecord {
    /// Opens a new record at the given clock-in instant.
    pub fn open(employee_id: &str, clock_in: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            date: clock_in.date(),
            clock_in,
            clock_out: None,
            status: AttendanceStatus::Present,
            minutes_late: 0,
            late_fee_amount: Decimal::ZERO,
            late_fee_paid: false,
        }
    }

    /// Returns true while the employee has not clocked out.
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Returns true if the record carries a late fee.
    pub fn has_late_fee(&self) -> bool {
        self.late_fee_amount > Decimal::ZERO
    }

    /// Returns true if the record carries a late fee that is still owed.
    pub fn has_unpaid_fee(&self) -> bool {
        self.has_late_fee() && !self.late_fee_paid
    }
}

/// A payment settling the late fee of one attendance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LateFeePayment {
    /// Unique identifier for the payment.
    pub id: Uuid,
    /// The attendance record the payment settles.
    pub attendance_id: Uuid,
    /// The employee who paid.
    pub employee_id: String,
    /// The amount paid.
    pub amount_paid: Decimal,
    /// The day the payment was made.
    pub payment_date: NaiveDate,
    /// How the fee was paid (e.g. "Cash").
    pub payment_method: String,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

/// Late fee totals for one employee.
///
/// # Example
///
/// ```
/// use late_fee_engine::models::LateFeeSummary;
///
/// let summary = LateFeeSummary::from_records(std::iter::empty());
/// assert_eq!(summary.total_late_instances, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LateFeeSummary {
    /// Number of records with a late fee.
    pub total_late_instances: u32,
    /// Sum of all late fees.
    pub total_late_fees: Decimal,
    /// Sum of paid late fees.
    pub total_paid: Decimal,
    /// Sum of unpaid late fees.
    pub total_unpaid: Decimal,
}

impl LateFeeSummary {
    /// Aggregates the late fees of the given records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> Self {
        records
            .into_iter()
            .filter(|r| r.has_late_fee())
            .fold(Self::default(), |mut summary, record| {
                summary.total_late_instances += 1;
                summary.total_late_fees += record.late_fee_amount;
                if record.late_fee_paid {
                    summary.total_paid += record.late_fee_amount;
                } else {
                    summary.total_unpaid += record.late_fee_amount;
                }
                summary
            })
    }
}
