//! Break deduction.
//!
//! This module decides how many unpaid break hours are deducted from a
//! shift's gross hours, and derives the resulting net hours.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::gross_hours::hours_from_duration;
use crate::config::Policy;
use crate::models::{AuditStep, BreakInterval, BreakSource};

/// The break deducted from a shift and the resulting net hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakDeduction {
    /// Break hours deducted.
    pub break_hours: Decimal,
    /// Where the deduction came from.
    pub source: BreakSource,
    /// Gross minus break, never negative.
    pub net_hours: Decimal,
    /// The audit step recording the deduction.
    pub audit_step: AuditStep,
}

/// Determines the break deduction for a shift.
///
/// A recorded break always wins and is deducted at its exact length.
/// Otherwise, a shift whose gross hours reach `break_deduction_after_hours`
/// gets the policy's implied break. Net hours are clamped at zero, so a
/// break longer than the floored gross never produces negative hours.
///
/// # Arguments
///
/// * `gross_hours` - Gross hours after rounding and the minimum-shift floor
/// * `recorded_break` - The worker's recorded break, if any
/// * `policy` - The shift policy
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_break_deduction;
/// use payroll_engine::config::STANDARD_POLICY;
/// use payroll_engine::models::BreakSource;
/// use rust_decimal::Decimal;
///
/// // 8 hours reaches the 4 hour threshold, so the 30 minute break applies
/// let result = calculate_break_deduction(Decimal::from(8), None, &STANDARD_POLICY, 1);
/// assert_eq!(result.break_hours, Decimal::new(5, 1));
/// assert_eq!(result.source, BreakSource::Policy);
/// assert_eq!(result.net_hours, Decimal::new(75, 1));
///
/// // 3 hours is under the threshold
/// let result = calculate_break_deduction(Decimal::from(3), None, &STANDARD_POLICY, 1);
/// assert_eq!(result.break_hours, Decimal::ZERO);
/// assert_eq!(result.source, BreakSource::None);
/// ```
pub fn calculate_break_deduction(
    gross_hours: Decimal,
    recorded_break: Option<&BreakInterval>,
    policy: &Policy,
    step_number: u32,
) -> BreakDeduction {
    let threshold = policy.break_deduction_after_hours();

    let (break_hours, source, reasoning) = match recorded_break {
        Some(interval) => {
            let hours = hours_from_duration(interval.duration());
            let reasoning = format!(
                "Recorded break of {} hours deducted",
                hours.round_dp(4).normalize()
            );
            (hours, BreakSource::Recorded, reasoning)
        }
        None if gross_hours >= threshold => {
            let hours = policy.break_duration_hours();
            let reasoning = format!(
                "No break recorded; {} gross hours reaches the {} hour threshold, {} minute break deducted",
                gross_hours.normalize(),
                threshold.normalize(),
                policy.break_duration_minutes()
            );
            (hours, BreakSource::Policy, reasoning)
        }
        None => {
            let reasoning = format!(
                "No break recorded; {} gross hours is under the {} hour threshold",
                gross_hours.normalize(),
                threshold.normalize()
            );
            (Decimal::ZERO, BreakSource::None, reasoning)
        }
    };

    let net_hours = (gross_hours - break_hours).max(Decimal::ZERO);

    let audit_step = AuditStep {
        step_number,
        rule_id: "break_deduction".to_string(),
        rule_name: "Break Deduction".to_string(),
        policy_ref: "break_deduction_after_hours, break_duration_minutes".to_string(),
        input: serde_json::json!({
            "gross_hours": gross_hours.normalize().to_string(),
            "recorded_break": recorded_break.is_some(),
            "threshold_hours": threshold.normalize().to_string()
        }),
        output: serde_json::json!({
            "break_hours": break_hours.normalize().to_string(),
            "break_source": source,
            "net_hours": net_hours.normalize().to_string()
        }),
        reasoning,
    };

    BreakDeduction {
        break_hours,
        source,
        net_hours,
        audit_step,
    }
}
