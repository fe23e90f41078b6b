//! Integration tests for the payroll engine HTTP API.
//!
//! This test suite covers:
//! - Per-entry hours (rounding, minimum shift, breaks, tiers, differentials)
//! - Weekly reconciliation
//! - Payroll conversion
//! - Named policies
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    AppState::from_dir("./config/policies").expect("Failed to load policies")
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_entry(entry: Value) -> (StatusCode, Value) {
    post_json(
        create_router_for_test(),
        "/entries/calculate",
        json!({ "entry": entry }),
    )
    .await
}

async fn post_week(entries: Vec<Value>) -> (StatusCode, Value) {
    post_json(
        create_router_for_test(),
        "/weeks/calculate",
        json!({ "entries": entries }),
    )
    .await
}

async fn post_payroll(body: Value) -> (StatusCode, Value) {
    post_json(create_router_for_test(), "/payroll/calculate", body).await
}

fn create_entry(id: &str, clock_in: &str, clock_out: &str) -> Value {
    json!({
        "id": id,
        "worker_id": "worker_001",
        "clock_in": clock_in,
        "clock_out": clock_out
    })
}

fn create_entry_with_break(
    id: &str,
    clock_in: &str,
    clock_out: &str,
    break_start: &str,
    break_end: &str,
) -> Value {
    json!({
        "id": id,
        "worker_id": "worker_001",
        "clock_in": clock_in,
        "clock_out": clock_out,
        "break_start": break_start,
        "break_end": break_end
    })
}

/// One entry per listed day in January 2026, 06:00 UTC for `minutes`.
fn create_daily_entries(days: &[u32], minutes: i64) -> Vec<Value> {
    days.iter()
        .map(|day| {
            let clock_in = chrono::DateTime::parse_from_rfc3339(&format!(
                "2026-01-{day:02}T06:00:00Z"
            ))
            .unwrap();
            let clock_out = clock_in + chrono::Duration::minutes(minutes);
            create_entry(
                &format!("entry_{day:02}"),
                &clock_in.to_rfc3339(),
                &clock_out.to_rfc3339(),
            )
        })
        .collect()
}

fn assert_decimal(result: &Value, field: &str, expected: &str) {
    let actual = result[field]
        .as_str()
        .unwrap_or_else(|| panic!("field '{}' missing or not a string: {}", field, result));
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {} {}, got {}",
        field,
        expected,
        actual
    );
}

fn assert_error_code(status: StatusCode, result: &Value, code: &str) {
    assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", result);
    assert_eq!(result["code"], code, "body: {}", result);
}

// =============================================================================
// SECTION 1: Entry Calculation
// =============================================================================

#[tokio::test]
async fn test_weekday_8_5h_nets_8_regular() {
    // Tuesday 09:00-17:30, implied 30 minute break
    let (status, result) = post_entry(create_entry(
        "entry_001",
        "2026-01-13T09:00:00Z",
        "2026-01-13T17:30:00Z",
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "gross_hours", "8.5");
    assert_decimal(&result, "break_hours", "0.5");
    assert_eq!(result["break_source"], "policy");
    assert_decimal(&result, "net_hours", "8");
    assert_decimal(&result, "regular_hours", "8");
    assert_decimal(&result, "overtime_hours", "0");
    assert_decimal(&result, "double_time_hours", "0");
    assert_eq!(result["shift_differential"]["kind"], "standard");
}

#[tokio::test]
async fn test_duration_rounds_to_quarter_hour() {
    // 7h 07m rounds down to 7h, then loses the 30 minute break
    let (status, result) = post_entry(create_entry(
        "entry_001",
        "2026-01-13T09:00:00Z",
        "2026-01-13T16:07:00Z",
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "recorded_hours", "7");
    assert_decimal(&result, "net_hours", "6.5");
}

#[tokio::test]
async fn test_ten_minute_shift_floored_to_minimum() {
    let (status, result) = post_entry(create_entry(
        "entry_001",
        "2026-01-13T09:00:00Z",
        "2026-01-13T09:10:00Z",
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "recorded_hours", "0.25");
    assert_decimal(&result, "gross_hours", "2");
    assert_eq!(result["break_source"], "none");
    assert_decimal(&result, "net_hours", "2");
}

#[tokio::test]
async fn test_recorded_20_minute_break_wins_over_policy_break() {
    let (status, result) = post_entry(create_entry_with_break(
        "entry_001",
        "2026-01-13T09:00:00Z",
        "2026-01-13T17:00:00Z",
        "2026-01-13T12:00:00Z",
        "2026-01-13T12:20:00Z",
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["break_source"], "recorded");
    assert!(result["break_hours"].as_str().unwrap().starts_with("0.333"));
    assert!(result["net_hours"].as_str().unwrap().starts_with("7.666"));
}

#[tokio::test]
async fn test_14_5h_shift_reaches_double_time() {
    let (status, result) = post_entry(create_entry(
        "entry_001",
        "2026-01-13T06:00:00Z",
        "2026-01-13T20:30:00Z",
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "net_hours", "14");
    assert_decimal(&result, "regular_hours", "8");
    assert_decimal(&result, "overtime_hours", "4");
    assert_decimal(&result, "double_time_hours", "2");
}

#[tokio::test]
async fn test_saturday_shift_has_weekend_multipliers() {
    let (status, result) = post_entry(create_entry(
        "entry_001",
        "2026-01-17T09:00:00Z",
        "2026-01-17T17:00:00Z",
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["shift_differential"]["kind"], "weekend");
    assert_decimal(&result["multipliers"], "regular", "1.25");
    assert_decimal(&result["multipliers"], "overtime", "1.875");
    assert_decimal(&result["multipliers"], "double_time", "2.5");
}

#[tokio::test]
async fn test_weekday_night_shift_has_night_multipliers() {
    let (status, result) = post_entry(create_entry(
        "entry_001",
        "2026-01-13T22:00:00Z",
        "2026-01-14T06:30:00Z",
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["shift_differential"]["kind"], "night");
    assert_decimal(&result["multipliers"], "regular", "1.15");
    assert_decimal(&result, "regular_hours", "8");
}

#[tokio::test]
async fn test_recorded_offset_does_not_change_classification() {
    // 09:00 at +10:00 is Monday 23:00 UTC, a night shift under the standard policy
    let (status, result) = post_entry(create_entry(
        "entry_001",
        "2026-01-13T09:00:00+10:00",
        "2026-01-13T17:00:00+10:00",
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["shift_differential"]["kind"], "night");
}

#[tokio::test]
async fn test_entry_audit_trail_is_ordered() {
    let (status, result) = post_entry(create_entry(
        "entry_001",
        "2026-01-13T09:00:00Z",
        "2026-01-13T17:00:00Z",
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    let steps = result["audit_steps"].as_array().unwrap();
    let rule_ids: Vec<&str> = steps
        .iter()
        .map(|step| step["rule_id"].as_str().unwrap())
        .collect();
    assert_eq!(
        rule_ids,
        vec![
            "duration_rounding",
            "minimum_shift_floor",
            "break_deduction",
            "daily_tiering",
            "shift_differential"
        ]
    );
}

#[tokio::test]
async fn test_same_entry_gives_identical_results() {
    let entry = create_entry_with_break(
        "entry_001",
        "2026-01-16T07:52:00Z",
        "2026-01-16T19:11:00Z",
        "2026-01-16T12:00:00Z",
        "2026-01-16T12:41:00Z",
    );

    let (_, first) = post_entry(entry.clone()).await;
    let (_, second) = post_entry(entry).await;

    assert_eq!(first, second);
}

// =============================================================================
// SECTION 2: Weekly Reconciliation
// =============================================================================

#[tokio::test]
async fn test_two_6h_days_are_all_regular() {
    let (status, result) = post_week(create_daily_entries(&[12, 13], 390)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["week"]["year"], 2026);
    assert_eq!(result["week"]["week"], 3);
    assert_decimal(&result, "total_hours", "12");
    assert_decimal(&result, "regular_hours", "12");
    assert_decimal(&result, "overtime_hours", "0");
}

#[tokio::test]
async fn test_six_7h_days_give_40_regular_and_2_overtime() {
    let (status, result) = post_week(create_daily_entries(&[12, 13, 14, 15, 16, 17], 450)).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "total_hours", "42");
    assert_decimal(&result, "regular_hours", "40");
    assert_decimal(&result, "overtime_hours", "2");
    assert_decimal(&result, "double_time_hours", "0");

    let allocations = result["allocations"].as_array().unwrap();
    assert_eq!(allocations.len(), 6);
    assert_decimal(&allocations[5], "regular_hours", "5");
    assert_decimal(&allocations[5], "accumulated_regular_hours", "40");
}

#[tokio::test]
async fn test_week_keeps_daily_double_time() {
    let mut entries = create_daily_entries(&[12, 13, 14, 15, 16], 510);
    entries.push(create_entry(
        "entry_17",
        "2026-01-17T06:00:00Z",
        "2026-01-17T20:30:00Z",
    ));

    let (status, result) = post_week(entries).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "regular_hours", "40");
    assert_decimal(&result, "overtime_hours", "12");
    assert_decimal(&result, "double_time_hours", "2");
}

#[tokio::test]
async fn test_long_day_within_weekly_headroom_is_regular() {
    // 10 net hours carry 2 daily overtime hours, absorbed by the weekly headroom
    let (status, result) = post_week(create_daily_entries(&[12], 630)).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["allocations"][0]["entry"], "overtime_hours", "2");
    assert_decimal(&result, "regular_hours", "10");
    assert_decimal(&result, "overtime_hours", "0");
}

#[tokio::test]
async fn test_week_allocations_are_chronological() {
    let mut entries = create_daily_entries(&[12, 13, 14], 480);
    entries.reverse();

    let (status, result) = post_week(entries).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = result["allocations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["entry"]["entry_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["entry_12", "entry_13", "entry_14"]);
}

#[tokio::test]
async fn test_week_spanning_two_iso_weeks_rejected() {
    let (status, result) = post_week(create_daily_entries(&[16, 19], 480)).await;

    assert_error_code(status, &result, "MIXED_WEEKS");
}

#[tokio::test]
async fn test_week_with_open_entry_rejected() {
    let mut entries = create_daily_entries(&[12, 13], 480);
    entries.push(json!({
        "id": "open",
        "worker_id": "worker_001",
        "clock_in": "2026-01-14T06:00:00Z"
    }));

    let (status, result) = post_week(entries).await;

    assert_error_code(status, &result, "INCOMPLETE_ENTRY");
    assert!(result["message"].as_str().unwrap().contains("open"));
}

#[tokio::test]
async fn test_empty_week_rejected() {
    let (status, result) = post_week(vec![]).await;

    assert_error_code(status, &result, "NO_ENTRIES");
}

// =============================================================================
// SECTION 3: Payroll
// =============================================================================

/// Five 8 net hour weekdays plus 5 net hours on Thursday evening: 40 + 5.
fn forty_five_hour_week() -> Vec<Value> {
    let mut entries = create_daily_entries(&[12, 13, 14, 15, 16], 510);
    entries.push(create_entry(
        "entry_extra",
        "2026-01-15T15:00:00Z",
        "2026-01-15T20:30:00Z",
    ));
    entries
}

#[tokio::test]
async fn test_payroll_40_plus_5_at_10() {
    let (status, result) = post_payroll(json!({
        "worker_id": "worker_001",
        "hourly_rate": "10.00",
        "entries": forty_five_hour_week()
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["hours"], "regular_hours", "40");
    assert_decimal(&result["hours"], "overtime_hours", "5");
    assert_decimal(&result, "regular_pay", "400");
    assert_decimal(&result, "overtime_pay", "75");
    assert_decimal(&result, "double_time_pay", "0");
    assert_decimal(&result, "gross_pay", "475");
    assert_eq!(result["first_shift_date"], "2026-01-12");
    assert_eq!(result["last_shift_date"], "2026-01-16");
}

#[tokio::test]
async fn test_payroll_ignores_other_workers() {
    let mut entries = forty_five_hour_week();
    entries.push(json!({
        "id": "someone_else",
        "worker_id": "worker_002",
        "clock_in": "2026-01-13T06:00:00Z",
        "clock_out": "2026-01-13T20:00:00Z"
    }));

    let (status, result) = post_payroll(json!({
        "worker_id": "worker_001",
        "hourly_rate": "10",
        "entries": entries
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "gross_pay", "475");
}

#[tokio::test]
async fn test_payroll_pay_period_filters_entries() {
    let (status, result) = post_payroll(json!({
        "worker_id": "worker_001",
        "hourly_rate": "10",
        "entries": forty_five_hour_week(),
        "pay_period": {"start_date": "2026-01-12", "end_date": "2026-01-14"}
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["hours"], "regular_hours", "24");
    assert_decimal(&result, "gross_pay", "240");
}

#[tokio::test]
async fn test_payroll_spans_multiple_weeks() {
    let mut entries = create_daily_entries(&[12, 13, 14, 15, 16], 510);
    entries.extend(create_daily_entries(&[19, 20], 510));

    let (status, result) = post_payroll(json!({
        "worker_id": "worker_001",
        "hourly_rate": "20",
        "entries": entries
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["weeks"].as_array().unwrap().len(), 2);
    assert_decimal(&result["hours"], "regular_hours", "56");
    assert_decimal(&result, "gross_pay", "1120");
}

#[tokio::test]
async fn test_payroll_entry_rate_override() {
    let mut entries = create_daily_entries(&[13, 14], 510);
    entries[0]["hourly_rate"] = json!("25.00");

    let (status, result) = post_payroll(json!({
        "worker_id": "worker_001",
        "hourly_rate": "20",
        "entries": entries
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "regular_pay", "360");
}

#[tokio::test]
async fn test_payroll_rounds_each_bucket_to_cents() {
    let (status, result) = post_payroll(json!({
        "worker_id": "worker_001",
        "hourly_rate": "10.333",
        "entries": create_daily_entries(&[13], 510)
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "regular_pay", "82.66");
}

#[tokio::test]
async fn test_payroll_reports_holiday_and_sick_hours() {
    let mut entries = create_daily_entries(&[1, 2, 5], 510);
    entries[1]["tags"] = json!(["sick"]);

    let (status, result) = post_payroll(json!({
        "worker_id": "worker_001",
        "hourly_rate": "10",
        "entries": entries
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["category_hours"], "holiday_hours", "8");
    assert_decimal(&result["category_hours"], "sick_hours", "8");
    assert_decimal(&result, "gross_pay", "240");
}

#[tokio::test]
async fn test_payroll_negative_rate_rejected() {
    let (status, result) = post_payroll(json!({
        "worker_id": "worker_001",
        "hourly_rate": "-10",
        "entries": forty_five_hour_week()
    }))
    .await;

    assert_error_code(status, &result, "INVALID_RATE");
}

#[tokio::test]
async fn test_payroll_reversed_period_rejected() {
    let (status, result) = post_payroll(json!({
        "worker_id": "worker_001",
        "hourly_rate": "10",
        "entries": forty_five_hour_week(),
        "pay_period": {"start_date": "2026-01-25", "end_date": "2026-01-12"}
    }))
    .await;

    assert_error_code(status, &result, "INVALID_PERIOD");
}

// =============================================================================
// SECTION 4: Named Policies
// =============================================================================

/// Four 8 net hour weekdays, then a Friday night shift netting 9.5 hours.
fn week_ending_in_night_shift() -> Vec<Value> {
    let mut entries = create_daily_entries(&[12, 13, 14, 15], 510);
    // Friday 21:30 UTC (22:30 at UTC+1) to 07:30 UTC
    entries.push(create_entry(
        "night_001",
        "2026-01-16T21:30:00Z",
        "2026-01-17T07:30:00Z",
    ));
    entries
}

#[tokio::test]
async fn test_night_premium_policy_compounds_all_tiers() {
    let (status, result) = post_payroll(json!({
        "worker_id": "worker_001",
        "hourly_rate": "20",
        "entries": week_ending_in_night_shift(),
        "policy": "night_premium"
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["hours"], "regular_hours", "40");
    assert_decimal(&result["hours"], "overtime_hours", "1.5");
    // 32 x 20 + 8 x 20 x 1.20, and 1.5 x 20 x 1.5 x 1.20
    assert_decimal(&result, "regular_pay", "832");
    assert_decimal(&result, "overtime_pay", "54");
    assert_decimal(&result, "gross_pay", "886");
}

#[tokio::test]
async fn test_standard_policy_differential_is_informational() {
    let (status, result) = post_payroll(json!({
        "worker_id": "worker_001",
        "hourly_rate": "20",
        "entries": week_ending_in_night_shift()
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    let allocations = result["weeks"][0]["allocations"].as_array().unwrap();
    let night = allocations.last().unwrap();
    assert_eq!(night["entry"]["shift_differential"]["kind"], "night");
    assert_decimal(night, "regular_hours", "8");
    assert_decimal(night, "overtime_hours", "1.5");
    assert_decimal(&result, "regular_pay", "800");
    assert_decimal(&result, "overtime_pay", "45");
    assert_decimal(&result, "gross_pay", "845");
}

#[tokio::test]
async fn test_single_night_shift_within_headroom_is_regular() {
    let (status, result) = post_payroll(json!({
        "worker_id": "worker_001",
        "hourly_rate": "20",
        "entries": [create_entry("night_001", "2026-01-13T21:30:00Z", "2026-01-14T07:30:00Z")],
        "policy": "night_premium"
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["hours"], "regular_hours", "9.5");
    assert_decimal(&result["hours"], "overtime_hours", "0");
    // 9.5 x 20 x 1.20
    assert_decimal(&result, "gross_pay", "228");
}

#[tokio::test]
async fn test_night_premium_policy_uses_later_break_threshold() {
    // 5.5 hours is under the 6 hour threshold of the night premium policy
    let (status, result) = post_json(
        create_router_for_test(),
        "/entries/calculate",
        json!({
            "entry": create_entry("entry_001", "2026-01-13T09:00:00Z", "2026-01-13T14:30:00Z"),
            "policy": "night_premium"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["break_source"], "none");
    assert_decimal(&result, "net_hours", "5.5");
}

#[tokio::test]
async fn test_unknown_policy_rejected() {
    let (status, result) = post_json(
        create_router_for_test(),
        "/weeks/calculate",
        json!({
            "entries": create_daily_entries(&[12], 480),
            "policy": "does_not_exist"
        }),
    )
    .await;

    assert_error_code(status, &result, "POLICY_NOT_FOUND");
}

// =============================================================================
// SECTION 5: Error Cases
// =============================================================================

#[tokio::test]
async fn test_open_entry_rejected() {
    let (status, result) = post_entry(json!({
        "id": "entry_001",
        "worker_id": "worker_001",
        "clock_in": "2026-01-13T09:00:00Z"
    }))
    .await;

    assert_error_code(status, &result, "INCOMPLETE_ENTRY");
}

#[tokio::test]
async fn test_clock_out_before_clock_in_rejected() {
    let (status, result) = post_entry(create_entry(
        "entry_001",
        "2026-01-13T17:00:00Z",
        "2026-01-13T09:00:00Z",
    ))
    .await;

    assert_error_code(status, &result, "INVALID_INTERVAL");
}

#[tokio::test]
async fn test_zero_length_entry_rejected() {
    let (status, result) = post_entry(create_entry(
        "entry_001",
        "2026-01-13T09:00:00Z",
        "2026-01-13T09:00:00Z",
    ))
    .await;

    assert_error_code(status, &result, "INVALID_INTERVAL");
}

#[tokio::test]
async fn test_break_outside_shift_rejected() {
    let (status, result) = post_entry(create_entry_with_break(
        "entry_001",
        "2026-01-13T09:00:00Z",
        "2026-01-13T17:00:00Z",
        "2026-01-13T16:45:00Z",
        "2026-01-13T17:15:00Z",
    ))
    .await;

    assert_error_code(status, &result, "INVALID_INTERVAL");
}

#[tokio::test]
async fn test_half_recorded_break_rejected() {
    let (status, result) = post_entry(json!({
        "id": "entry_001",
        "worker_id": "worker_001",
        "clock_in": "2026-01-13T09:00:00Z",
        "clock_out": "2026-01-13T17:00:00Z",
        "break_start": "2026-01-13T12:00:00Z"
    }))
    .await;

    assert_error_code(status, &result, "INVALID_INTERVAL");
}

#[tokio::test]
async fn test_shift_over_24h_rejected() {
    let (status, result) = post_entry(create_entry(
        "entry_001",
        "2026-01-13T09:00:00Z",
        "2026-01-14T09:30:00Z",
    ))
    .await;

    assert_error_code(status, &result, "INVALID_INTERVAL");
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payroll/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}
