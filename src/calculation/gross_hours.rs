//! Gross hours derivation.
//!
//! This module rounds a shift's recorded duration to the policy granularity
//! and applies the minimum-shift floor.

use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::Policy;
use crate::models::{AuditStep, ClosedShift};

/// The result of deriving gross hours for a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossHoursResult {
    /// The recorded duration rounded to the policy granularity.
    pub recorded_hours: Decimal,
    /// The rounded duration after the minimum-shift floor.
    pub gross_hours: Decimal,
    /// Audit steps for the rounding and the floor, in that order.
    pub audit_steps: Vec<AuditStep>,
}

/// Converts a duration to decimal hours, to the second.
pub(crate) fn hours_from_duration(duration: Duration) -> Decimal {
    Decimal::from(duration.num_seconds()) / Decimal::from(3600)
}

/// Rounds a duration to the nearest multiple of `granularity_minutes`.
///
/// Rounding is half up: a duration exactly halfway between two multiples
/// rounds to the larger one. Returns whole minutes.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::round_to_granularity;
/// use chrono::Duration;
///
/// // 7h 07m rounds down to 7h 00m, 7h 08m rounds up to 7h 15m
/// assert_eq!(round_to_granularity(Duration::minutes(427), 15), 420);
/// assert_eq!(round_to_granularity(Duration::minutes(428), 15), 435);
/// // exactly halfway rounds up
/// assert_eq!(round_to_granularity(Duration::seconds(450), 15), 15);
/// ```
pub fn round_to_granularity(duration: Duration, granularity_minutes: i64) -> i64 {
    let unit_seconds = granularity_minutes * 60;
    let seconds = duration.num_seconds();
    let units = (seconds + unit_seconds / 2).div_euclid(unit_seconds);
    units * granularity_minutes
}

/// Derives gross hours for a validated shift.
///
/// 1. The recorded duration is rounded to `round_to_nearest_minutes`.
/// 2. The result is raised to `minimum_shift_hours` if it falls short.
///
/// # Arguments
///
/// * `shift` - The validated shift
/// * `policy` - The shift policy
/// * `step_number` - The step number of the first audit step
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_gross_hours;
/// use payroll_engine::config::STANDARD_POLICY;
/// use payroll_engine::models::ClosedShift;
/// use chrono::DateTime;
/// use rust_decimal::Decimal;
///
/// // A 10 minute shift is floored to the 2 hour minimum.
/// let shift = ClosedShift {
///     clock_in: DateTime::parse_from_rfc3339("2026-01-13T09:00:00Z").unwrap(),
///     clock_out: DateTime::parse_from_rfc3339("2026-01-13T09:10:00Z").unwrap(),
///     recorded_break: None,
/// };
///
/// let result = calculate_gross_hours(&shift, &STANDARD_POLICY, 1);
/// assert_eq!(result.recorded_hours, Decimal::new(25, 2));
/// assert_eq!(result.gross_hours, Decimal::from(2));
/// ```
pub fn calculate_gross_hours(
    shift: &ClosedShift,
    policy: &Policy,
    step_number: u32,
) -> GrossHoursResult {
    let granularity = policy.round_to_nearest_minutes();
    let duration = shift.duration();
    let rounded_minutes = round_to_granularity(duration, granularity);
    let recorded_hours = Decimal::from(rounded_minutes) / Decimal::from(60);

    let rounding_step = AuditStep {
        step_number,
        rule_id: "duration_rounding".to_string(),
        rule_name: "Duration Rounding".to_string(),
        policy_ref: "round_to_nearest_minutes".to_string(),
        input: serde_json::json!({
            "duration_seconds": duration.num_seconds(),
            "granularity_minutes": granularity
        }),
        output: serde_json::json!({
            "rounded_minutes": rounded_minutes,
            "recorded_hours": recorded_hours.normalize().to_string()
        }),
        reasoning: format!(
            "{} recorded minutes rounded half up to the nearest {} minutes: {} minutes",
            duration.num_minutes(),
            granularity,
            rounded_minutes
        ),
    };

    let minimum = policy.minimum_shift_hours();
    let gross_hours = recorded_hours.max(minimum);

    let reasoning = if gross_hours > recorded_hours {
        format!(
            "{} hours is under the {} hour minimum shift, paid as {} hours",
            recorded_hours.normalize(),
            minimum.normalize(),
            gross_hours.normalize()
        )
    } else {
        format!(
            "{} hours meets the {} hour minimum shift",
            recorded_hours.normalize(),
            minimum.normalize()
        )
    };

    let floor_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "minimum_shift_floor".to_string(),
        rule_name: "Minimum Shift Floor".to_string(),
        policy_ref: "minimum_shift_hours".to_string(),
        input: serde_json::json!({
            "recorded_hours": recorded_hours.normalize().to_string(),
            "minimum_shift_hours": minimum.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_hours": gross_hours.normalize().to_string()
        }),
        reasoning,
    };

    GrossHoursResult {
        recorded_hours,
        gross_hours,
        audit_steps: vec![rounding_step, floor_step],
    }
}
