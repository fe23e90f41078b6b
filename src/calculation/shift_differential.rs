//! Shift differential detection.
//!
//! This module classifies a shift as weekend, night, or standard from its
//! clock-in time and derives the tier rate multipliers.
//!
//! Classification uses the clock-in time converted to the policy timezone.
//! Weekend takes precedence over night.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{Policy, ShiftDifferentials};
use crate::models::{AuditStep, RateMultipliers, ShiftDifferential, ShiftKind};

/// The premium decided for a shift and the resulting tier multipliers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDifferentialResult {
    /// The premium kind and multiplier.
    pub differential: ShiftDifferential,
    /// Tier multipliers scaled by the premium.
    pub multipliers: RateMultipliers,
    /// The audit step recording the classification.
    pub audit_step: AuditStep,
}

/// Returns true if `hour` falls inside the night window `[start, end)`.
///
/// The window wraps midnight when `start > end`. A window with
/// `start == end` is empty.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::is_night_hour;
///
/// assert!(is_night_hour(22, 20, 6));
/// assert!(is_night_hour(5, 20, 6));
/// assert!(!is_night_hour(6, 20, 6));
/// assert!(!is_night_hour(19, 20, 6));
/// ```
pub fn is_night_hour(hour: u32, start: u32, end: u32) -> bool {
    if start < end {
        hour >= start && hour < end
    } else if start > end {
        hour >= start || hour < end
    } else {
        false
    }
}

fn classify(local: &DateTime<FixedOffset>, differentials: &ShiftDifferentials) -> ShiftDifferential {
    match local.weekday() {
        Weekday::Sat | Weekday::Sun => ShiftDifferential {
            kind: ShiftKind::Weekend,
            multiplier: differentials.weekend_multiplier,
        },
        _ if is_night_hour(
            local.hour(),
            differentials.night_start_hour,
            differentials.night_end_hour,
        ) =>
        {
            ShiftDifferential {
                kind: ShiftKind::Night,
                multiplier: differentials.night_multiplier,
            }
        }
        _ => ShiftDifferential {
            kind: ShiftKind::Standard,
            multiplier: Decimal::ONE,
        },
    }
}

/// Determines the shift differential for a clock-in instant.
///
/// The returned multipliers are the policy's tier multipliers scaled
/// uniformly by the premium; how payroll uses them is governed by
/// [`crate::config::DifferentialApplication`].
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::get_shift_differential;
/// use payroll_engine::config::STANDARD_POLICY;
/// use payroll_engine::models::ShiftKind;
/// use chrono::DateTime;
/// use rust_decimal::Decimal;
///
/// // Saturday 2026-01-17
/// let clock_in = DateTime::parse_from_rfc3339("2026-01-17T09:00:00Z").unwrap();
/// let result = get_shift_differential(&clock_in, &STANDARD_POLICY, 1);
///
/// assert_eq!(result.differential.kind, ShiftKind::Weekend);
/// assert_eq!(result.multipliers.regular, Decimal::new(125, 2));
/// assert_eq!(result.multipliers.overtime, Decimal::new(1875, 3));
/// ```
pub fn get_shift_differential(
    clock_in: &DateTime<FixedOffset>,
    policy: &Policy,
    step_number: u32,
) -> ShiftDifferentialResult {
    let local = clock_in.with_timezone(&policy.timezone());
    let differentials = policy.shift_differentials();
    let differential = classify(&local, differentials);

    let multipliers = RateMultipliers {
        regular: differential.multiplier,
        overtime: policy.overtime_multiplier() * differential.multiplier,
        double_time: policy.double_time_multiplier() * differential.multiplier,
    };

    let reasoning = match differential.kind {
        ShiftKind::Weekend => format!(
            "Clock-in on {:?} is a weekend shift: x{}",
            local.weekday(),
            differential.multiplier.normalize()
        ),
        ShiftKind::Night => format!(
            "Clock-in at {:02}:00 falls in the {:02}:00-{:02}:00 night window: x{}",
            local.hour(),
            differentials.night_start_hour,
            differentials.night_end_hour,
            differential.multiplier.normalize()
        ),
        ShiftKind::Standard => format!(
            "Clock-in on {:?} at {:02}:{:02} is a standard shift",
            local.weekday(),
            local.hour(),
            local.minute()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "shift_differential".to_string(),
        rule_name: "Shift Differential".to_string(),
        policy_ref: "shift_differentials".to_string(),
        input: serde_json::json!({
            "local_clock_in": local.to_rfc3339(),
            "weekday": format!("{:?}", local.weekday())
        }),
        output: serde_json::json!({
            "kind": differential.kind,
            "multiplier": differential.multiplier.normalize().to_string(),
            "regular_multiplier": multipliers.regular.normalize().to_string(),
            "overtime_multiplier": multipliers.overtime.normalize().to_string(),
            "double_time_multiplier": multipliers.double_time.normalize().to_string()
        }),
        reasoning,
    };

    ShiftDifferentialResult {
        differential,
        multipliers,
        audit_step,
    }
}
