//! Lateness result models.
//!
//! This module contains the [`LatenessResult`] produced for every clock-in
//! evaluation and the [`AuditStep`] trail that explains it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The lateness determination for a single clock-in.
///
/// Created fresh for every evaluation and never stored by the engine;
/// the attendance recorder copies its values onto its own records.
///
/// # Example
///
/// ```
/// use late_fee_engine::models::LatenessResult;
/// use rust_decimal::Decimal;
///
/// let result = LatenessResult::new(7, Decimal::new(3500, 2));
/// assert!(result.is_late());
/// assert!(!LatenessResult::on_time().is_late());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatenessResult {
    /// Minutes late after the grace period; 0 means on time.
    pub minutes_late: u32,
    /// The monetary penalty for this clock-in.
    pub fee_amount: Decimal,
}

impl LatenessResult {
    /// Creates a result from minutes late and the fee charged.
    pub fn new(minutes_late: u32, fee_amount: Decimal) -> Self {
        Self {
            minutes_late,
            fee_amount,
        }
    }

    /// Creates the result for an on-time arrival.
    pub fn on_time() -> Self {
        Self::new(0, Decimal::new(0, 2))
    }

    /// Returns true if the clock-in counts as late.
    pub fn is_late(&self) -> bool {
        self.minutes_late > 0
    }
}

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A lateness result together with the audit steps that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LateFeeAssessment {
    /// The lateness determination.
    pub result: LatenessResult,
    /// Audit steps in the order they were applied.
    pub audit_steps: Vec<AuditStep>,
}
