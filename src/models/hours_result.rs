//! Hours result models.
//!
//! This module contains the per-entry [`EntryHoursResult`] and the per-week
//! [`WeeklyHoursResult`], together with the audit step type both carry.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single step in an entry's audit trail.
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
    /// The policy field(s) that drove this rule.
    pub policy_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Where an entry's break deduction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakSource {
    /// The worker recorded an explicit break.
    Recorded,
    /// The policy implied an unpaid break for a long shift.
    Policy,
    /// No break was deducted.
    None,
}

/// The premium category of a shift, decided by its clock-in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftKind {
    /// Clocked in on a Saturday or Sunday.
    Weekend,
    /// Clocked in on a weekday during night hours.
    Night,
    /// Any other shift.
    Standard,
}

impl std::fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShiftKind::Weekend => write!(f, "Weekend"),
            ShiftKind::Night => write!(f, "Night"),
            ShiftKind::Standard => write!(f, "Standard"),
        }
    }
}

/// The premium applied to a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDifferential {
    /// Why the premium applies.
    pub kind: ShiftKind,
    /// The multiplier (1.0 for a standard shift).
    pub multiplier: Decimal,
}

/// Pay-rate multipliers for each hour tier of one entry.
///
/// Each tier multiplier is already scaled by the shift differential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateMultipliers {
    /// Multiplier for regular hours.
    pub regular: Decimal,
    /// Multiplier for overtime hours.
    pub overtime: Decimal,
    /// Multiplier for double-time hours.
    pub double_time: Decimal,
}

/// The hours breakdown for one completed time entry.
///
/// Created fresh on every call; recomputed, never mutated, when an entry changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryHoursResult {
    /// The ID of the entry.
    pub entry_id: String,
    /// The worker who recorded the entry.
    pub worker_id: String,
    /// Clock-in instant, copied from the entry.
    pub clock_in: DateTime<FixedOffset>,
    /// Recorded duration rounded to the policy granularity.
    pub recorded_hours: Decimal,
    /// Rounded duration after the minimum-shift floor.
    pub gross_hours: Decimal,
    /// Break hours deducted.
    pub break_hours: Decimal,
    /// Where the break deduction came from.
    pub break_source: BreakSource,
    /// Gross minus break, never negative.
    pub net_hours: Decimal,
    /// Net hours up to the daily overtime threshold.
    pub regular_hours: Decimal,
    /// Net hours between the daily overtime and double-time thresholds.
    pub overtime_hours: Decimal,
    /// Net hours beyond the daily double-time threshold.
    pub double_time_hours: Decimal,
    /// The premium decided by the clock-in time.
    pub shift_differential: ShiftDifferential,
    /// Tier multipliers scaled by the shift differential.
    pub multipliers: RateMultipliers,
    /// The entry's hourly-rate override, if any.
    pub hourly_rate_override: Option<Decimal>,
    /// Tags copied from the entry.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Rule applications in order.
    pub audit_steps: Vec<AuditStep>,
}

/// An ISO 8601 week identifier.
///
/// Week-numbering years differ from calendar years around 1 January;
/// 2027-01-01 belongs to 2026-W53.
///
/// # Example
///
/// ```
/// use payroll_engine::models::IsoWeekKey;
///
/// let key = IsoWeekKey { year: 2026, week: 3 };
/// assert_eq!(key.to_string(), "2026-W03");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IsoWeekKey {
    /// ISO week-numbering year.
    pub year: i32,
    /// ISO week number (1-53).
    pub week: u32,
}

impl std::fmt::Display for IsoWeekKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// How one entry's net hours landed in the weekly buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryAllocation {
    /// The entry's own daily result.
    pub entry: EntryHoursResult,
    /// Hours allocated to the weekly regular bucket.
    pub regular_hours: Decimal,
    /// Hours allocated to the weekly overtime bucket.
    pub overtime_hours: Decimal,
    /// Hours allocated to the weekly double-time bucket.
    pub double_time_hours: Decimal,
    /// Weekly regular hours accumulated after this entry.
    pub accumulated_regular_hours: Decimal,
}

/// The reconciled hours for one worker in one ISO week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHoursResult {
    /// The week the entries clocked in during.
    pub week: IsoWeekKey,
    /// Total net hours across the week's entries.
    pub total_hours: Decimal,
    /// Weekly regular hours.
    pub regular_hours: Decimal,
    /// Weekly overtime hours.
    pub overtime_hours: Decimal,
    /// Weekly double-time hours.
    pub double_time_hours: Decimal,
    /// Per-entry allocations in chronological order.
    pub allocations: Vec<EntryAllocation>,
}
