//! Daily hour tiering.
//!
//! This module splits one entry's net hours into regular, overtime, and
//! double-time tiers using the policy's daily thresholds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::Policy;
use crate::models::AuditStep;

/// Net hours split into the three daily tiers.
///
/// The tiers always sum to the net hours they were split from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTiers {
    /// Hours up to the daily overtime threshold.
    pub regular_hours: Decimal,
    /// Hours between the overtime and double-time thresholds.
    pub overtime_hours: Decimal,
    /// Hours beyond the double-time threshold.
    pub double_time_hours: Decimal,
    /// The audit step recording this split.
    pub audit_step: AuditStep,
}

/// Splits net hours into daily tiers.
///
/// - regular = min(net, overtime threshold)
/// - overtime = min(net, double-time threshold) - overtime threshold, at least zero
/// - double-time = net - double-time threshold, at least zero
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::split_daily_tiers;
/// use payroll_engine::config::STANDARD_POLICY;
/// use rust_decimal::Decimal;
///
/// // 14 net hours: 8 regular, 4 overtime, 2 double-time
/// let tiers = split_daily_tiers(Decimal::from(14), &STANDARD_POLICY, 1);
/// assert_eq!(tiers.regular_hours, Decimal::from(8));
/// assert_eq!(tiers.overtime_hours, Decimal::from(4));
/// assert_eq!(tiers.double_time_hours, Decimal::from(2));
/// ```
pub fn split_daily_tiers(net_hours: Decimal, policy: &Policy, step_number: u32) -> DailyTiers {
    let overtime_threshold = policy.overtime_after_hours_per_day();
    let double_time_threshold = policy.double_time_after_hours_per_day();

    let regular_hours = net_hours.min(overtime_threshold);
    let overtime_hours =
        (net_hours.min(double_time_threshold) - overtime_threshold).max(Decimal::ZERO);
    let double_time_hours = (net_hours - double_time_threshold).max(Decimal::ZERO);

    let reasoning = if double_time_hours > Decimal::ZERO {
        format!(
            "{} net hours exceeds the {} hour double-time threshold: {} regular, {} overtime, {} double-time",
            net_hours.normalize(),
            double_time_threshold.normalize(),
            regular_hours.normalize(),
            overtime_hours.normalize(),
            double_time_hours.normalize()
        )
    } else if overtime_hours > Decimal::ZERO {
        format!(
            "{} net hours exceeds the {} hour overtime threshold: {} regular, {} overtime",
            net_hours.normalize(),
            overtime_threshold.normalize(),
            regular_hours.normalize(),
            overtime_hours.normalize()
        )
    } else {
        format!(
            "{} net hours is within the {} hour overtime threshold: all regular",
            net_hours.normalize(),
            overtime_threshold.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "daily_tiering".to_string(),
        rule_name: "Daily Hour Tiering".to_string(),
        policy_ref: "overtime_after_hours_per_day, double_time_after_hours_per_day".to_string(),
        input: serde_json::json!({
            "net_hours": net_hours.normalize().to_string(),
            "overtime_threshold": overtime_threshold.normalize().to_string(),
            "double_time_threshold": double_time_threshold.normalize().to_string()
        }),
        output: serde_json::json!({
            "regular_hours": regular_hours.normalize().to_string(),
            "overtime_hours": overtime_hours.normalize().to_string(),
            "double_time_hours": double_time_hours.normalize().to_string()
        }),
        reasoning,
    };

    DailyTiers {
        regular_hours,
        overtime_hours,
        double_time_hours,
        audit_step,
    }
}
