//! Attendance recording and late fee payment tracking.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::assess;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AttendanceStatus, DEFAULT_PAYMENT_METHOD, LateFeeAssessment,
    LateFeePayment, LateFeeSummary,
};
use crate::store::SettingsStore;

use super::clock::{Clock, SystemClock};

/// Message returned when no active settings exist at clock-in.
pub const SETTINGS_NOT_CONFIGURED: &str = "Late fee settings not configured";

/// The outcome of a clock-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockInOutcome {
    /// The stored attendance record.
    pub record: AttendanceRecord,
    /// The late fee assessment, or `None` if no settings were available.
    pub assessment: Option<LateFeeAssessment>,
    /// A short human-readable summary.
    pub message: String,
}

impl ClockInOutcome {
    /// Returns true if late fee data was attached to the record.
    pub fn has_fee_data(&self) -> bool {
        self.assessment.is_some()
    }
}

#[derive(Debug, Default)]
struct Ledger {
    records: Vec<AttendanceRecord>,
    payments: Vec<LateFeePayment>,
}

/// Records clock-ins, attaches late fees, and tracks their payment.
///
/// Missing settings never block a clock-in: the attendance is stored
/// without fee data and the condition is logged.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use late_fee_engine::attendance::AttendanceRecorder;
/// use late_fee_engine::models::{AttendanceStatus, LateFeeSettings};
/// use late_fee_engine::store::InMemorySettingsStore;
/// use chrono::NaiveDateTime;
///
/// let store = Arc::new(InMemorySettingsStore::with_settings(LateFeeSettings::default())?);
/// let recorder = AttendanceRecorder::new(store);
///
/// let at = NaiveDateTime::parse_from_str("2026-01-15 08:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let outcome = recorder.clock_in("emp_001", at)?;
///
/// assert_eq!(outcome.record.status, AttendanceStatus::Late);
/// assert_eq!(outcome.record.minutes_late, 20);
/// assert_eq!(outcome.message, "Late by 20 minutes. Fee: 50.00");
/// # Ok::<(), late_fee_engine::error::EngineError>(())
/// ```
pub struct AttendanceRecorder {
    store: Arc<dyn SettingsStore>,
    clock: Box<dyn Clock>,
    ledger: Mutex<Ledger>,
}

impl AttendanceRecorder {
    /// Creates a recorder reading settings from `store` and using the system clock.
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self::with_clock(store, SystemClock)
    }

    /// Creates a recorder with an explicit clock.
    pub fn with_clock(store: Arc<dyn SettingsStore>, clock: impl Clock + 'static) -> Self {
        Self {
            store,
            clock: Box::new(clock),
            ledger: Mutex::new(Ledger::default()),
        }
    }

    fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clocks an employee in at the current time.
    pub fn clock_in_now(&self, employee_id: &str) -> EngineResult<ClockInOutcome> {
        self.clock_in(employee_id, self.clock.now())
    }

    /// Clocks an employee in at `at` and attaches any late fee.
    ///
    /// Fails with [`EngineError::AlreadyClockedIn`] if the employee has an
    /// open record for the same day.
    pub fn clock_in(&self, employee_id: &str, at: NaiveDateTime) -> EngineResult<ClockInOutcome> {
        let mut ledger = self.ledger();

        let date = at.date();
        if ledger
            .records
            .iter()
            .any(|r| r.employee_id == employee_id && r.date == date && r.is_open())
        {
            return Err(EngineError::AlreadyClockedIn {
                employee_id: employee_id.to_string(),
                date,
            });
        }

        let mut record = AttendanceRecord::open(employee_id, at);
        let snapshot = self.store.get_active();

        let (assessment, message) = match assess(at, snapshot.as_ref()) {
            Ok(assessment) => {
                let result = &assessment.result;
                let message = if result.is_late() {
                    record.status = AttendanceStatus::Late;
                    record.minutes_late = result.minutes_late;
                    record.late_fee_amount = result.fee_amount;
                    format!(
                        "Late by {} minutes. Fee: {:.2}",
                        result.minutes_late, result.fee_amount
                    )
                } else {
                    "On time".to_string()
                };
                (Some(assessment), message)
            }
            Err(err @ EngineError::ConfigurationError { .. }) => {
                warn!(
                    employee_id = %employee_id,
                    attendance_id = %record.id,
                    error = %err,
                    "Recording attendance without late fee data"
                );
                (None, SETTINGS_NOT_CONFIGURED.to_string())
            }
            Err(err) => return Err(err),
        };

        info!(
            employee_id = %employee_id,
            attendance_id = %record.id,
            clock_in = %at,
            minutes_late = record.minutes_late,
            late_fee = %record.late_fee_amount,
            "Clock-in recorded"
        );

        ledger.records.push(record.clone());
        Ok(ClockInOutcome {
            record,
            assessment,
            message,
        })
    }

    /// Clocks an employee out at `at`, closing their open record for that day.
    ///
    /// A record left open on an earlier day is not closed.
    pub fn clock_out(&self, employee_id: &str, at: NaiveDateTime) -> EngineResult<AttendanceRecord> {
        let mut ledger = self.ledger();

        let date = at.date();
        let record = ledger
            .records
            .iter_mut()
            .rev()
            .find(|r| r.employee_id == employee_id && r.date == date && r.is_open())
            .ok_or_else(|| EngineError::NoOpenAttendance {
                employee_id: employee_id.to_string(),
                date,
            })?;

        record.clock_out = Some(at);
        info!(employee_id = %employee_id, attendance_id = %record.id, clock_out = %at, "Clock-out recorded");
        Ok(record.clone())
    }

    /// Marks the late fee on an attendance record as paid.
    ///
    /// The payment is dated with the recorder's clock. `payment_method`
    /// defaults to "Cash".
    pub fn mark_fee_paid(
        &self,
        attendance_id: Uuid,
        payment_method: Option<&str>,
        notes: &str,
    ) -> EngineResult<LateFeePayment> {
        let payment_date = self.clock.now().date();
        let mut ledger = self.ledger();

        let record = ledger
            .records
            .iter_mut()
            .find(|r| r.id == attendance_id)
            .ok_or(EngineError::AttendanceNotFound { id: attendance_id })?;

        if !record.has_late_fee() {
            return Err(EngineError::NoLateFee { id: attendance_id });
        }
        if record.late_fee_paid {
            return Err(EngineError::FeeAlreadyPaid { id: attendance_id });
        }

        record.late_fee_paid = true;
        let payment = LateFeePayment {
            id: Uuid::new_v4(),
            attendance_id,
            employee_id: record.employee_id.clone(),
            amount_paid: record.late_fee_amount,
            payment_date,
            payment_method: payment_method.unwrap_or(DEFAULT_PAYMENT_METHOD).to_string(),
            notes: notes.to_string(),
        };

        info!(
            attendance_id = %attendance_id,
            employee_id = %payment.employee_id,
            amount = %payment.amount_paid,
            method = %payment.payment_method,
            "Late fee paid"
        );

        ledger.payments.push(payment.clone());
        Ok(payment)
    }

    /// Returns the attendance record with the given id.
    pub fn record(&self, attendance_id: Uuid) -> Option<AttendanceRecord> {
        self.ledger()
            .records
            .iter()
            .find(|r| r.id == attendance_id)
            .cloned()
    }

    /// Returns all records carrying a late fee for an employee, newest first.
    pub fn late_fees(&self, employee_id: &str) -> Vec<AttendanceRecord> {
        self.collect_newest_first(|r| r.employee_id == employee_id && r.has_late_fee())
    }

    /// Returns the unpaid late fees for an employee, newest first.
    pub fn unpaid_fees(&self, employee_id: &str) -> Vec<AttendanceRecord> {
        self.collect_newest_first(|r| r.employee_id == employee_id && r.has_unpaid_fee())
    }

    /// Returns unpaid late fees across all employees, newest first.
    pub fn all_unpaid_fees(&self) -> Vec<AttendanceRecord> {
        self.collect_newest_first(AttendanceRecord::has_unpaid_fee)
    }

    /// Summarises the late fees of one employee.
    pub fn employee_summary(&self, employee_id: &str) -> LateFeeSummary {
        let ledger = self.ledger();
        LateFeeSummary::from_records(
            ledger.records.iter().filter(|r| r.employee_id == employee_id),
        )
    }

    /// Summarises every employee with at least one late fee, highest total first.
    pub fn fee_summaries(&self) -> Vec<(String, LateFeeSummary)> {
        let ledger = self.ledger();

        let mut employee_ids: Vec<&str> = ledger
            .records
            .iter()
            .map(|r| r.employee_id.as_str())
            .collect();
        employee_ids.sort_unstable();
        employee_ids.dedup();

        let mut summaries: Vec<(String, LateFeeSummary)> = employee_ids
            .into_iter()
            .map(|id| {
                let summary = LateFeeSummary::from_records(
                    ledger.records.iter().filter(|r| r.employee_id == id),
                );
                (id.to_string(), summary)
            })
            .filter(|(_, summary)| summary.total_late_instances > 0)
            .collect();

        summaries.sort_by(|a, b| b.1.total_late_fees.cmp(&a.1.total_late_fees));
        summaries
    }

    /// Returns every recorded payment, oldest first.
    pub fn payments(&self) -> Vec<LateFeePayment> {
        self.ledger().payments.clone()
    }

    /// Returns the total of all unpaid late fees.
    pub fn total_unpaid(&self) -> Decimal {
        self.ledger()
            .records
            .iter()
            .filter(|r| r.has_unpaid_fee())
            .map(|r| r.late_fee_amount)
            .sum()
    }

    fn collect_newest_first(&self, keep: impl Fn(&AttendanceRecord) -> bool) -> Vec<AttendanceRecord> {
        let mut records: Vec<AttendanceRecord> = self
            .ledger()
            .records
            .iter()
            .filter(|r| keep(r))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.clock_in.cmp(&a.clock_in));
        records
    }
}
