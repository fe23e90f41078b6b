//! Weekly reconciliation.
//!
//! This module combines one worker's entries for a single ISO week into
//! weekly regular, overtime, and double-time totals.
//!
//! Entries are processed chronologically. Each entry offers its net hours to
//! the weekly regular bucket until the weekly cap is reached; the rest keep
//! the entry's daily double-time first and are otherwise overtime. Hours
//! within weekly headroom are never paid as daily overtime, and no entry
//! contributes more than its net hours.

use rust_decimal::Decimal;
use tracing::debug;

use super::entry::calculate_entry;
use super::week_grouping::iso_week_key;
use crate::config::Policy;
use crate::error::{EngineError, EngineResult};
use crate::models::{EntryAllocation, EntryHoursResult, IsoWeekKey, TimeEntry, WeeklyHoursResult};

/// Reconciles one worker's entries for a single ISO week.
///
/// An entry that crosses midnight into the next ISO week is attributed
/// entirely to the week it clocked in during; its hours are not split at
/// the week boundary.
///
/// # Errors
///
/// - [`EngineError::NoEntries`] if `entries` is empty
/// - [`EngineError::MixedWeeks`] if the entries clock in during different ISO weeks
/// - Any error from [`calculate_entry`]; open entries are rejected, not skipped
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_week;
/// use payroll_engine::config::STANDARD_POLICY;
/// use payroll_engine::models::TimeEntry;
/// use chrono::DateTime;
/// use rust_decimal::Decimal;
///
/// // Two Tuesday/Wednesday shifts of 6.5 recorded hours, 6 net each
/// let entries: Vec<TimeEntry> = ["2026-01-13", "2026-01-14"]
///     .iter()
///     .enumerate()
///     .map(|(i, day)| TimeEntry {
///         id: format!("entry_{i}"),
///         worker_id: "worker_001".to_string(),
///         clock_in: DateTime::parse_from_rfc3339(&format!("{day}T09:00:00Z")).unwrap(),
///         clock_out: Some(DateTime::parse_from_rfc3339(&format!("{day}T15:30:00Z")).unwrap()),
///         break_start: None,
///         break_end: None,
///         hourly_rate: None,
///         tags: vec![],
///     })
///     .collect();
///
/// let week = calculate_week(&entries, &STANDARD_POLICY).unwrap();
/// assert_eq!(week.regular_hours, Decimal::from(12));
/// assert_eq!(week.overtime_hours, Decimal::ZERO);
/// ```
pub fn calculate_week(entries: &[TimeEntry], policy: &Policy) -> EngineResult<WeeklyHoursResult> {
    let first = entries.first().ok_or(EngineError::NoEntries)?;
    let week = iso_week_key(&first.clock_in, policy);

    if let Some(other) = entries
        .iter()
        .map(|entry| iso_week_key(&entry.clock_in, policy))
        .find(|key| *key != week)
    {
        return Err(EngineError::MixedWeeks {
            expected: week.to_string(),
            found: other.to_string(),
        });
    }

    reconcile_entries(week, entries.iter().collect(), policy)
}

/// Calculates and reconciles entries already known to share `week`.
pub(crate) fn reconcile_entries(
    week: IsoWeekKey,
    mut entries: Vec<&TimeEntry>,
    policy: &Policy,
) -> EngineResult<WeeklyHoursResult> {
    entries.sort_by(|a, b| a.clock_in.cmp(&b.clock_in).then_with(|| a.id.cmp(&b.id)));

    let results = entries
        .into_iter()
        .map(|entry| calculate_entry(entry, policy))
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(reconcile_week(week, results, policy))
}

/// Folds chronologically ordered entry results into weekly buckets.
pub(crate) fn reconcile_week(
    week: IsoWeekKey,
    results: Vec<EntryHoursResult>,
    policy: &Policy,
) -> WeeklyHoursResult {
    let cap = policy.weekly_regular_cap();

    let allocations: Vec<EntryAllocation> = results
        .into_iter()
        .scan(Decimal::ZERO, |accumulated, entry| {
            let headroom = (cap - *accumulated).max(Decimal::ZERO);
            let regular_hours = entry.net_hours.min(headroom);
            let remainder = entry.net_hours - regular_hours;
            let double_time_hours = entry.double_time_hours.min(remainder);
            let overtime_hours = remainder - double_time_hours;
            *accumulated += regular_hours;

            Some(EntryAllocation {
                regular_hours,
                overtime_hours,
                double_time_hours,
                accumulated_regular_hours: *accumulated,
                entry,
            })
        })
        .collect();

    let mut total_hours = Decimal::ZERO;
    let mut regular_hours = Decimal::ZERO;
    let mut overtime_hours = Decimal::ZERO;
    let mut double_time_hours = Decimal::ZERO;
    for allocation in &allocations {
        total_hours += allocation.entry.net_hours;
        regular_hours += allocation.regular_hours;
        overtime_hours += allocation.overtime_hours;
        double_time_hours += allocation.double_time_hours;
    }

    debug!(
        week = %week,
        entries = allocations.len(),
        total_hours = %total_hours,
        regular_hours = %regular_hours,
        overtime_hours = %overtime_hours,
        double_time_hours = %double_time_hours,
        "Reconciled week"
    );

    WeeklyHoursResult {
        week,
        total_hours,
        regular_hours,
        overtime_hours,
        double_time_hours,
        allocations,
    }
}
