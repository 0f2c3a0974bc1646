//! Clock-in evaluation.
//!
//! This module composes minutes-late and fee calculation into the single
//! entry point collaborators call at clock-in time.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, FeeType, LateFeeAssessment, LateFeeSettings, LatenessResult};

use super::{compute_fee, compute_minutes_late};

/// Evaluates a clock-in against the active settings.
///
/// Either both minutes late and fee are computed, or the call fails with
/// [`EngineError::ConfigurationError`] because no settings were supplied, or
/// with [`EngineError::InvalidSettings`] if an amount is out of range.
///
/// # Example
///
/// ```
/// use late_fee_engine::calculation::evaluate;
/// use late_fee_engine::models::LateFeeSettings;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let settings = LateFeeSettings::default();
/// let at = NaiveDateTime::parse_from_str("2026-01-15 08:25:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let result = evaluate(at, Some(&settings)).unwrap();
/// assert_eq!(result.minutes_late, 15);
/// assert_eq!(result.fee_amount, Decimal::new(5000, 2));
/// assert!(result.is_late());
/// ```
pub fn evaluate(
    clock_in: NaiveDateTime,
    settings: Option<&LateFeeSettings>,
) -> EngineResult<LatenessResult> {
    let settings = settings.ok_or_else(EngineError::no_active_settings)?;
    settings.validate()?;

    let minutes_late = compute_minutes_late(clock_in, Some(settings))?;
    let fee_amount = compute_fee(minutes_late, settings);

    Ok(LatenessResult::new(minutes_late, fee_amount))
}

/// Evaluates a clock-in and records how the result was reached.
///
/// Produces the same [`LatenessResult`] as [`evaluate`] along with one
/// audit step for the minutes-late rule and one for the fee rule.
pub fn assess(
    clock_in: NaiveDateTime,
    settings: Option<&LateFeeSettings>,
) -> EngineResult<LateFeeAssessment> {
    let settings = settings.ok_or_else(EngineError::no_active_settings)?;
    let result = evaluate(clock_in, Some(settings))?;

    let expected = settings.shift_start.on(clock_in.date());
    let minutes_step = AuditStep {
        step_number: 1,
        rule_id: "minutes_late".to_string(),
        rule_name: "Minutes Late".to_string(),
        input: serde_json::json!({
            "clock_in": clock_in.to_string(),
            "shift_start": settings.shift_start.to_string(),
            "grace_period_minutes": settings.grace_period_minutes
        }),
        output: serde_json::json!({
            "minutes_late": result.minutes_late,
            "is_late": result.is_late()
        }),
        reasoning: minutes_reasoning(clock_in, expected, settings, &result),
    };

    let fee_step = AuditStep {
        step_number: 2,
        rule_id: "late_fee".to_string(),
        rule_name: "Late Fee".to_string(),
        input: serde_json::json!({
            "minutes_late": result.minutes_late,
            "fee_type": settings.fee_type.as_str(),
            "fixed_fee_amount": settings.fixed_fee_amount.to_string(),
            "per_minute_fee": settings.per_minute_fee.to_string()
        }),
        output: serde_json::json!({
            "fee_amount": result.fee_amount.to_string()
        }),
        reasoning: fee_reasoning(settings, &result),
    };

    Ok(LateFeeAssessment {
        result,
        audit_steps: vec![minutes_step, fee_step],
    })
}

fn minutes_reasoning(
    clock_in: NaiveDateTime,
    expected: NaiveDateTime,
    settings: &LateFeeSettings,
    result: &LatenessResult,
) -> String {
    if clock_in <= expected {
        format!(
            "Clocked in at {} - on or before shift start {}",
            clock_in.time(),
            settings.shift_start
        )
    } else if !result.is_late() {
        format!(
            "Clocked in at {} - within {} minute grace period after {}",
            clock_in.time(),
            settings.grace_period_minutes,
            settings.shift_start
        )
    } else {
        format!(
            "Clocked in at {} - {} minutes late after {} minute grace period",
            clock_in.time(),
            result.minutes_late,
            settings.grace_period_minutes
        )
    }
}

fn fee_reasoning(settings: &LateFeeSettings, result: &LatenessResult) -> String {
    if !result.is_late() {
        return "Not late - no fee".to_string();
    }

    match settings.fee_type {
        FeeType::Fixed => format!("Fixed fee of ${}", settings.fixed_fee_amount),
        FeeType::PerMinute => format!(
            "{} minutes x ${} = ${}",
            result.minutes_late, settings.per_minute_fee, result.fee_amount
        ),
        FeeType::Tiered if result.fee_amount == Decimal::ZERO => format!(
            "{} minutes falls in the free tier - no fee",
            result.minutes_late
        ),
        FeeType::Tiered => format!(
            "{} minutes falls in the ${} tier",
            result.minutes_late, result.fee_amount
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftStart;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn settings(fee_type: FeeType) -> LateFeeSettings {
        LateFeeSettings {
            shift_start: ShiftStart::new(8, 0).unwrap(),
            grace_period_minutes: 10,
            fee_type,
            fixed_fee_amount: dec("50.00"),
            per_minute_fee: dec("5.00"),
        }
    }

    #[test]
    fn test_on_time_clock_in_has_no_fee() {
        let result = evaluate(make_datetime("2026-01-15 07:58:00"), Some(&settings(FeeType::Fixed)))
            .unwrap();
        assert_eq!(result, LatenessResult::on_time());
    }

    #[test]
    fn test_within_grace_has_no_fee() {
        let result = evaluate(make_datetime("2026-01-15 08:10:00"), Some(&settings(FeeType::Fixed)))
            .unwrap();
        assert_eq!(result.minutes_late, 0);
        assert_eq!(result.fee_amount, dec("0.00"));
        assert!(!result.is_late());
    }

    #[test]
    fn test_fixed_fee_applied_after_grace() {
        let result = evaluate(make_datetime("2026-01-15 08:11:00"), Some(&settings(FeeType::Fixed)))
            .unwrap();
        assert_eq!(result.minutes_late, 1);
        assert_eq!(result.fee_amount, dec("50.00"));
        assert!(result.is_late());
    }

    #[test]
    fn test_per_minute_fee_applied_after_grace() {
        let result = evaluate(
            make_datetime("2026-01-15 08:17:00"),
            Some(&settings(FeeType::PerMinute)),
        )
        .unwrap();
        assert_eq!(result.minutes_late, 7);
        assert_eq!(result.fee_amount, dec("35.00"));
    }

    #[test]
    fn test_tiered_free_band_stacks_with_grace() {
        // 20 raw minutes, 10 after grace: late but inside the free tier.
        let result = evaluate(make_datetime("2026-01-15 08:20:00"), Some(&settings(FeeType::Tiered)))
            .unwrap();
        assert_eq!(result.minutes_late, 10);
        assert_eq!(result.fee_amount, dec("0.00"));
        assert!(result.is_late());
    }

    #[test]
    fn test_tiered_fee_applied() {
        // 55 raw minutes, 45 after grace
        let result = evaluate(make_datetime("2026-01-15 08:55:00"), Some(&settings(FeeType::Tiered)))
            .unwrap();
        assert_eq!(result.minutes_late, 45);
        assert_eq!(result.fee_amount, dec("50.00"));
    }

    #[test]
    fn test_evaluate_without_settings_fails() {
        let result = evaluate(make_datetime("2026-01-15 09:00:00"), None);
        assert!(matches!(result, Err(EngineError::ConfigurationError { .. })));
    }

    #[test]
    fn test_evaluate_rejects_out_of_range_rate_instead_of_overflowing() {
        let s = LateFeeSettings {
            per_minute_fee: Decimal::MAX,
            ..settings(FeeType::PerMinute)
        };
        let result = evaluate(make_datetime("2026-01-15 08:12:00"), Some(&s));
        assert!(matches!(
            result,
            Err(EngineError::InvalidSettings { ref field, .. }) if field == "per_minute_fee"
        ));
    }

    #[test]
    fn test_evaluate_rejects_negative_rate() {
        let s = LateFeeSettings {
            per_minute_fee: dec("-5.00"),
            ..settings(FeeType::PerMinute)
        };
        let result = assess(make_datetime("2026-01-15 08:17:00"), Some(&s));
        assert!(matches!(result, Err(EngineError::InvalidSettings { .. })));
    }

    #[test]
    fn test_assess_matches_evaluate() {
        let s = settings(FeeType::PerMinute);
        let at = make_datetime("2026-01-15 08:40:00");
        let assessment = assess(at, Some(&s)).unwrap();
        assert_eq!(assessment.result, evaluate(at, Some(&s)).unwrap());
    }

    #[test]
    fn test_assess_records_two_ordered_steps() {
        let assessment = assess(
            make_datetime("2026-01-15 08:17:00"),
            Some(&settings(FeeType::PerMinute)),
        )
        .unwrap();

        assert_eq!(assessment.audit_steps.len(), 2);
        let minutes_step = &assessment.audit_steps[0];
        assert_eq!(minutes_step.step_number, 1);
        assert_eq!(minutes_step.rule_id, "minutes_late");
        assert_eq!(minutes_step.input["shift_start"].as_str().unwrap(), "08:00");
        assert_eq!(minutes_step.output["minutes_late"].as_u64().unwrap(), 7);
        assert!(minutes_step.reasoning.contains("7 minutes late"));

        let fee_step = &assessment.audit_steps[1];
        assert_eq!(fee_step.step_number, 2);
        assert_eq!(fee_step.rule_id, "late_fee");
        assert_eq!(fee_step.input["fee_type"].as_str().unwrap(), "per_minute");
        assert_eq!(fee_step.output["fee_amount"].as_str().unwrap(), "35.00");
        assert_eq!(fee_step.reasoning, "7 minutes x $5.00 = $35.00");
    }

    #[test]
    fn test_assess_reasoning_for_grace_period() {
        let assessment = assess(
            make_datetime("2026-01-15 08:05:00"),
            Some(&settings(FeeType::Fixed)),
        )
        .unwrap();
        assert!(assessment.audit_steps[0].reasoning.contains("grace period"));
        assert_eq!(assessment.audit_steps[1].reasoning, "Not late - no fee");
    }

    #[test]
    fn test_assess_reasoning_for_tiered_free_band() {
        let assessment = assess(
            make_datetime("2026-01-15 08:15:00"),
            Some(&settings(FeeType::Tiered)),
        )
        .unwrap();
        assert!(assessment.audit_steps[1].reasoning.contains("free tier"));
    }

    #[test]
    fn test_assess_without_settings_fails() {
        let result = assess(make_datetime("2026-01-15 09:00:00"), None);
        assert!(matches!(result, Err(EngineError::ConfigurationError { .. })));
    }
}
