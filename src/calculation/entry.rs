//! Entry calculation.
//!
//! This module runs the full per-entry pipeline: validation, rounding, the
//! minimum-shift floor, break deduction, daily tiering, and the shift
//! differential.

use tracing::debug;

use super::break_deduction::calculate_break_deduction;
use super::daily_tiering::split_daily_tiers;
use super::gross_hours::{calculate_gross_hours, hours_from_duration};
use super::shift_differential::get_shift_differential;
use crate::config::Policy;
use crate::error::{EngineError, EngineResult};
use crate::models::{EntryHoursResult, TimeEntry};

/// Calculates the hours breakdown for one completed time entry.
///
/// # Errors
///
/// - [`EngineError::IncompleteEntry`] if the entry has no clock-out
/// - [`EngineError::InvalidInterval`] if the intervals are malformed, or the
///   recorded shift is longer than `maximum_shift_hours`
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_entry;
/// use payroll_engine::config::STANDARD_POLICY;
/// use payroll_engine::models::{BreakSource, TimeEntry};
/// use chrono::DateTime;
/// use rust_decimal::Decimal;
///
/// // Tuesday 09:00-19:00 with no recorded break
/// let entry = TimeEntry {
///     id: "entry_001".to_string(),
///     worker_id: "worker_001".to_string(),
///     clock_in: DateTime::parse_from_rfc3339("2026-01-13T09:00:00Z").unwrap(),
///     clock_out: Some(DateTime::parse_from_rfc3339("2026-01-13T19:00:00Z").unwrap()),
///     break_start: None,
///     break_end: None,
///     hourly_rate: None,
///     tags: vec![],
/// };
///
/// let result = calculate_entry(&entry, &STANDARD_POLICY).unwrap();
/// assert_eq!(result.gross_hours, Decimal::from(10));
/// assert_eq!(result.break_source, BreakSource::Policy);
/// assert_eq!(result.net_hours, Decimal::new(95, 1));
/// assert_eq!(result.regular_hours, Decimal::from(8));
/// assert_eq!(result.overtime_hours, Decimal::new(15, 1));
/// ```
pub fn calculate_entry(entry: &TimeEntry, policy: &Policy) -> EngineResult<EntryHoursResult> {
    let shift = entry.closed_shift()?;

    let shift_hours = hours_from_duration(shift.duration());
    if shift_hours > policy.maximum_shift_hours() {
        return Err(EngineError::InvalidInterval {
            entry_id: entry.id.clone(),
            message: format!(
                "shift of {} hours exceeds the {} hour maximum",
                shift_hours.round_dp(2).normalize(),
                policy.maximum_shift_hours().normalize()
            ),
        });
    }

    let gross = calculate_gross_hours(&shift, policy, 1);
    let mut audit_steps = gross.audit_steps;
    let next_step = audit_steps.len() as u32 + 1;

    let deduction = calculate_break_deduction(
        gross.gross_hours,
        shift.recorded_break.as_ref(),
        policy,
        next_step,
    );
    audit_steps.push(deduction.audit_step);

    let tiers = split_daily_tiers(deduction.net_hours, policy, next_step + 1);
    audit_steps.push(tiers.audit_step);

    let differential = get_shift_differential(&shift.clock_in, policy, next_step + 2);
    audit_steps.push(differential.audit_step);

    debug!(
        entry_id = %entry.id,
        gross_hours = %gross.gross_hours,
        net_hours = %deduction.net_hours,
        shift_kind = %differential.differential.kind,
        "Calculated entry hours"
    );

    Ok(EntryHoursResult {
        entry_id: entry.id.clone(),
        worker_id: entry.worker_id.clone(),
        clock_in: entry.clock_in,
        recorded_hours: gross.recorded_hours,
        gross_hours: gross.gross_hours,
        break_hours: deduction.break_hours,
        break_source: deduction.source,
        net_hours: deduction.net_hours,
        regular_hours: tiers.regular_hours,
        overtime_hours: tiers.overtime_hours,
        double_time_hours: tiers.double_time_hours,
        shift_differential: differential.differential,
        multipliers: differential.multipliers,
        hourly_rate_override: entry.hourly_rate,
        tags: entry.tags.clone(),
        audit_steps,
    })
}
