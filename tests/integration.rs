//! Integration tests for the Late Fee Engine.
//!
//! This test suite covers:
//! - The documented clock-in scenarios
//! - Fee pricing for every fee type
//! - Loading settings from YAML and evaluating against them
//! - Clock-in recording, degradation without settings, and fee payment

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use late_fee_engine::attendance::{AttendanceRecorder, FixedClock, SETTINGS_NOT_CONFIGURED};
use late_fee_engine::calculation::{compute_fee, compute_minutes_late, evaluate};
use late_fee_engine::config::SettingsLoader;
use late_fee_engine::error::EngineError;
use late_fee_engine::models::{AttendanceStatus, FeeType, LateFeeSettings, ShiftStart};
use late_fee_engine::store::{InMemorySettingsStore, SettingsStore};

// =============================================================================
// Test Helpers
// =============================================================================

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn settings(fee_type: FeeType) -> LateFeeSettings {
    LateFeeSettings {
        shift_start: ShiftStart::new(8, 0).unwrap(),
        grace_period_minutes: 10,
        fee_type,
        fixed_fee_amount: decimal("50.00"),
        per_minute_fee: decimal("5.00"),
    }
}

fn recorder(store: Arc<InMemorySettingsStore>) -> AttendanceRecorder {
    AttendanceRecorder::with_clock(store, FixedClock(at("2026-01-20 09:00:00")))
}

// =============================================================================
// Clock-in Scenarios
// =============================================================================

#[test]
fn test_scenario_1_one_second_inside_grace_is_on_time() {
    let s = settings(FeeType::Fixed);
    assert_eq!(compute_minutes_late(at("2026-01-15 08:09:59"), Some(&s)).unwrap(), 0);
}

#[test]
fn test_scenario_2_grace_boundary_is_on_time() {
    let s = settings(FeeType::Fixed);
    assert_eq!(compute_minutes_late(at("2026-01-15 08:10:00"), Some(&s)).unwrap(), 0);
}

#[test]
fn test_scenario_3_one_minute_past_grace() {
    let s = settings(FeeType::Fixed);
    assert_eq!(compute_minutes_late(at("2026-01-15 08:11:00"), Some(&s)).unwrap(), 1);
}

#[test]
fn test_scenario_4_fixed_fee_is_flat() {
    let s = settings(FeeType::Fixed);
    assert_eq!(compute_fee(1, &s), decimal("50.00"));
    assert_eq!(compute_fee(200, &s), decimal("50.00"));
}

#[test]
fn test_scenario_5_per_minute_fee() {
    let s = settings(FeeType::PerMinute);
    assert_eq!(compute_fee(7, &s), decimal("35.00"));
}

#[test]
fn test_scenario_6_tiered_fee() {
    let s = settings(FeeType::Tiered);
    assert_eq!(compute_fee(45, &s), decimal("50.00"));
}

#[test]
fn test_tiered_boundaries() {
    let s = settings(FeeType::Tiered);
    let expected = [
        (10, "0.00"),
        (11, "25.00"),
        (30, "25.00"),
        (31, "50.00"),
        (60, "50.00"),
        (61, "100.00"),
        (120, "100.00"),
        (121, "200.00"),
    ];
    for (minutes, fee) in expected {
        assert_eq!(compute_fee(minutes, &s), decimal(fee), "{} minutes", minutes);
    }
}

#[test]
fn test_evaluate_without_settings_is_configuration_error() {
    let result = evaluate(at("2026-01-15 09:00:00"), None);
    assert!(matches!(result, Err(EngineError::ConfigurationError { .. })));
}

#[test]
fn test_evaluate_end_to_end_per_fee_type() {
    // 08:40 is 40 raw minutes, 30 after grace
    let clock_in = at("2026-01-15 08:40:00");

    let fixed = evaluate(clock_in, Some(&settings(FeeType::Fixed))).unwrap();
    assert_eq!((fixed.minutes_late, fixed.fee_amount), (30, decimal("50.00")));

    let per_minute = evaluate(clock_in, Some(&settings(FeeType::PerMinute))).unwrap();
    assert_eq!(
        (per_minute.minutes_late, per_minute.fee_amount),
        (30, decimal("150.00"))
    );

    let tiered = evaluate(clock_in, Some(&settings(FeeType::Tiered))).unwrap();
    assert_eq!((tiered.minutes_late, tiered.fee_amount), (30, decimal("25.00")));
}

// =============================================================================
// Settings Loading
// =============================================================================

#[test]
fn test_loaded_settings_evaluate_like_defaults() {
    let loaded = SettingsLoader::load("./config/late_fee/settings.yaml")
        .expect("Failed to load settings")
        .into_settings();
    assert_eq!(loaded, LateFeeSettings::default());

    let result = evaluate(at("2026-01-15 08:11:00"), Some(&loaded)).unwrap();
    assert_eq!(result.minutes_late, 1);
    assert_eq!(result.fee_amount, decimal("50.00"));
}

#[test]
fn test_duration_shift_start_is_normalized() {
    // 09:00:30 stored as a TIME duration; the seconds are dropped.
    let loaded = SettingsLoader::from_yaml_str(
        "shift_start: 32430\ngrace_period_minutes: 0\nfee_type: per_minute\nper_minute_fee: \"2.50\"\n",
    )
    .unwrap()
    .into_settings();

    let result = evaluate(at("2026-01-15 09:04:00"), Some(&loaded)).unwrap();
    assert_eq!(result.minutes_late, 4);
    assert_eq!(result.fee_amount, decimal("10.00"));
}

#[test]
fn test_unknown_fee_type_never_reaches_engine() {
    let result = SettingsLoader::from_yaml_str("fee_type: per_hour\n");
    assert!(matches!(result, Err(EngineError::InvalidSettings { .. })));
}

// =============================================================================
// Attendance Recording
// =============================================================================

#[test]
fn test_clock_in_uses_active_settings_at_call_time() {
    let store = Arc::new(InMemorySettingsStore::with_settings(settings(FeeType::Fixed)).unwrap());
    let recorder = recorder(Arc::clone(&store));

    let first = recorder.clock_in("emp_001", at("2026-01-15 08:17:00")).unwrap();
    assert_eq!(first.record.late_fee_amount, decimal("50.00"));

    store.replace_active(settings(FeeType::PerMinute)).unwrap();
    let second = recorder.clock_in("emp_002", at("2026-01-15 08:17:00")).unwrap();
    assert_eq!(second.record.late_fee_amount, decimal("35.00"));

    // Earlier records keep the fee they were charged.
    assert_eq!(
        recorder.record(first.record.id).unwrap().late_fee_amount,
        decimal("50.00")
    );
}

#[test]
fn test_clock_in_without_settings_degrades_then_recovers() {
    let store = Arc::new(InMemorySettingsStore::new());
    let recorder = recorder(Arc::clone(&store));

    let degraded = recorder.clock_in("emp_001", at("2026-01-15 09:30:00")).unwrap();
    assert_eq!(degraded.message, SETTINGS_NOT_CONFIGURED);
    assert!(degraded.assessment.is_none());
    assert_eq!(degraded.record.status, AttendanceStatus::Present);

    assert!(store.ensure_default());
    let recovered = recorder.clock_in("emp_002", at("2026-01-15 09:30:00")).unwrap();
    assert_eq!(recovered.record.status, AttendanceStatus::Late);
    assert_eq!(recovered.record.minutes_late, 80);
    assert_eq!(recovered.message, "Late by 80 minutes. Fee: 50.00");
}

#[test]
fn test_tiered_free_band_marks_late_without_fee() {
    let store = Arc::new(InMemorySettingsStore::with_settings(settings(FeeType::Tiered)).unwrap());
    let recorder = recorder(store);

    let outcome = recorder.clock_in("emp_001", at("2026-01-15 08:18:00")).unwrap();
    assert_eq!(outcome.record.status, AttendanceStatus::Late);
    assert_eq!(outcome.record.minutes_late, 8);
    assert_eq!(outcome.record.late_fee_amount, decimal("0.00"));
    assert!(recorder.unpaid_fees("emp_001").is_empty());
}

#[test]
fn test_assessment_audit_trail_is_attached() {
    let store = Arc::new(InMemorySettingsStore::with_settings(settings(FeeType::Tiered)).unwrap());
    let recorder = recorder(store);

    let outcome = recorder.clock_in("emp_001", at("2026-01-15 09:05:00")).unwrap();
    let assessment = outcome.assessment.expect("settings were configured");
    assert_eq!(assessment.result.minutes_late, 55);
    assert_eq!(assessment.audit_steps.len(), 2);
    assert_eq!(
        assessment.audit_steps[1].reasoning,
        "55 minutes falls in the $50.00 tier"
    );
}

#[test]
fn test_payment_flow_updates_summary() {
    let store = Arc::new(InMemorySettingsStore::with_settings(settings(FeeType::Fixed)).unwrap());
    let recorder = recorder(store);

    let monday = recorder.clock_in("emp_001", at("2026-01-12 08:30:00")).unwrap();
    recorder.clock_out("emp_001", at("2026-01-12 17:00:00")).unwrap();
    recorder.clock_in("emp_001", at("2026-01-13 08:45:00")).unwrap();

    let before = recorder.employee_summary("emp_001");
    assert_eq!(before.total_late_instances, 2);
    assert_eq!(before.total_unpaid, decimal("100.00"));

    let payment = recorder
        .mark_fee_paid(monday.record.id, Some("Bank transfer"), "January")
        .unwrap();
    assert_eq!(payment.amount_paid, decimal("50.00"));
    assert_eq!(payment.payment_method, "Bank transfer");

    let after = recorder.employee_summary("emp_001");
    assert_eq!(after.total_paid, decimal("50.00"));
    assert_eq!(after.total_unpaid, decimal("50.00"));
    assert_eq!(after.total_late_fees, before.total_late_fees);
}
