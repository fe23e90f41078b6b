//! Payroll conversion.
//!
//! This module turns one worker's time entries into pay: entries are grouped
//! by ISO week, each week is reconciled, and the reconciled buckets are priced
//! at the worker's hourly rate (or an entry's override) and the policy's tier
//! multipliers.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use super::week_grouping::group_by_week;
use super::weekly::reconcile_entries;
use crate::config::{DifferentialApplication, Policy};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CategoryHours, EntryAllocation, HoursBreakdown, PayPeriod, PayrollResult, RateMultipliers,
    TimeEntry,
};

/// Entries carrying this tag (any case) count toward sick hours.
pub const SICK_TAG: &str = "sick";

/// New Year's Day and Christmas Day.
fn is_public_holiday(date: NaiveDate) -> bool {
    matches!((date.month(), date.day()), (1, 1) | (12, 25))
}

fn is_sick(allocation: &EntryAllocation) -> bool {
    allocation
        .entry
        .tags
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(SICK_TAG))
}

/// Rounds a pay amount to cents, midpoint away from zero.
fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn check_rate(rate: Decimal, what: &str) -> EngineResult<()> {
    if rate < Decimal::ZERO {
        return Err(EngineError::InvalidRate {
            message: format!("{} {} must not be negative", what, rate),
        });
    }
    Ok(())
}

/// The multipliers payroll applies to one entry's buckets.
fn pay_multipliers(allocation: &EntryAllocation, policy: &Policy) -> RateMultipliers {
    let differential = allocation.entry.shift_differential.multiplier;
    match policy.differential_application() {
        DifferentialApplication::Informational => RateMultipliers {
            regular: Decimal::ONE,
            overtime: policy.overtime_multiplier(),
            double_time: policy.double_time_multiplier(),
        },
        DifferentialApplication::RegularOnly => RateMultipliers {
            regular: differential,
            overtime: policy.overtime_multiplier(),
            double_time: policy.double_time_multiplier(),
        },
        DifferentialApplication::AllTiers => allocation.entry.multipliers,
    }
}

/// Calculates payroll for one worker.
///
/// Entries recorded by other workers are ignored. Each entry is attributed
/// to the ISO week it clocked in during, even when the shift runs past
/// midnight into the next week.
///
/// - regular pay = regular hours x rate x regular multiplier
/// - overtime pay = overtime hours x rate x `overtime_multiplier`
/// - double-time pay = double-time hours x rate x `double_time_multiplier`
///
/// How the shift differential enters these products is set by the policy's
/// [`DifferentialApplication`]. Each pay bucket is rounded to cents and gross
/// pay is the sum of the rounded buckets.
///
/// Hours on entries clocking in on 1 January or 25 December are reported as
/// holiday hours, and hours on other entries tagged [`SICK_TAG`] as sick
/// hours. Both are breakdowns of hours already paid.
///
/// # Errors
///
/// - [`EngineError::InvalidRate`] if `hourly_rate` or an entry's override is negative
/// - Any error from weekly reconciliation for the worker's entries
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_payroll;
/// use payroll_engine::config::STANDARD_POLICY;
/// use payroll_engine::models::TimeEntry;
/// use chrono::DateTime;
/// use rust_decimal::Decimal;
///
/// // 14.5 recorded hours on a Tuesday nets 14, all inside the weekly regular headroom
/// let entry = TimeEntry {
///     id: "entry_001".to_string(),
///     worker_id: "worker_001".to_string(),
///     clock_in: DateTime::parse_from_rfc3339("2026-01-13T06:00:00Z").unwrap(),
///     clock_out: Some(DateTime::parse_from_rfc3339("2026-01-13T20:30:00Z").unwrap()),
///     break_start: None,
///     break_end: None,
///     hourly_rate: None,
///     tags: vec![],
/// };
///
/// let payroll = calculate_payroll("worker_001", &[entry], Decimal::from(20), &STANDARD_POLICY).unwrap();
/// assert_eq!(payroll.hours.regular_hours, Decimal::from(14));
/// assert_eq!(payroll.regular_pay, Decimal::from(280));
/// assert_eq!(payroll.overtime_pay, Decimal::ZERO);
/// assert_eq!(payroll.gross_pay, Decimal::from(280));
/// ```
pub fn calculate_payroll(
    worker_id: &str,
    entries: &[TimeEntry],
    hourly_rate: Decimal,
    policy: &Policy,
) -> EngineResult<PayrollResult> {
    let worker_entries: Vec<&TimeEntry> = entries
        .iter()
        .filter(|entry| entry.worker_id == worker_id)
        .collect();
    price_entries(worker_id, worker_entries, hourly_rate, policy)
}

/// Calculates payroll for one worker over an inclusive pay period.
///
/// Only entries whose clock-in date, in the policy timezone, falls within
/// `period` are paid. Everything else behaves as [`calculate_payroll`].
///
/// # Errors
///
/// - [`EngineError::InvalidPeriod`] if the period ends before it starts
/// - Any error [`calculate_payroll`] returns
pub fn calculate_payroll_for_period(
    worker_id: &str,
    entries: &[TimeEntry],
    hourly_rate: Decimal,
    period: &PayPeriod,
    policy: &Policy,
) -> EngineResult<PayrollResult> {
    period.validate()?;
    let tz = policy.timezone();
    let worker_entries: Vec<&TimeEntry> = entries
        .iter()
        .filter(|entry| entry.worker_id == worker_id)
        .filter(|entry| period.contains_date(entry.clock_in.with_timezone(&tz).date_naive()))
        .collect();
    price_entries(worker_id, worker_entries, hourly_rate, policy)
}

fn price_entries(
    worker_id: &str,
    entries: Vec<&TimeEntry>,
    hourly_rate: Decimal,
    policy: &Policy,
) -> EngineResult<PayrollResult> {
    check_rate(hourly_rate, "hourly rate")?;
    for entry in &entries {
        if let Some(rate) = entry.hourly_rate {
            check_rate(rate, &format!("hourly rate override on entry '{}'", entry.id))?;
        }
    }

    let tz = policy.timezone();
    let first_shift_date = entries
        .iter()
        .map(|entry| entry.clock_in.with_timezone(&tz).date_naive())
        .min();
    let last_shift_date = entries
        .iter()
        .map(|entry| entry.clock_in.with_timezone(&tz).date_naive())
        .max();

    let weeks = group_by_week(entries, policy)
        .into_iter()
        .map(|(week, week_entries)| reconcile_entries(week, week_entries, policy))
        .collect::<EngineResult<Vec<_>>>()?;

    let mut hours = HoursBreakdown::default();
    let mut category_hours = CategoryHours::default();
    let mut regular_pay = Decimal::ZERO;
    let mut overtime_pay = Decimal::ZERO;
    let mut double_time_pay = Decimal::ZERO;

    for allocation in weeks.iter().flat_map(|week| &week.allocations) {
        let rate = allocation.entry.hourly_rate_override.unwrap_or(hourly_rate);
        let multipliers = pay_multipliers(allocation, policy);

        hours.regular_hours += allocation.regular_hours;
        hours.overtime_hours += allocation.overtime_hours;
        hours.double_time_hours += allocation.double_time_hours;

        let allocated_hours =
            allocation.regular_hours + allocation.overtime_hours + allocation.double_time_hours;
        if is_public_holiday(allocation.entry.clock_in.with_timezone(&tz).date_naive()) {
            category_hours.holiday_hours += allocated_hours;
        } else if is_sick(allocation) {
            category_hours.sick_hours += allocated_hours;
        }

        regular_pay += allocation.regular_hours * rate * multipliers.regular;
        overtime_pay += allocation.overtime_hours * rate * multipliers.overtime;
        double_time_pay += allocation.double_time_hours * rate * multipliers.double_time;
    }

    let regular_pay = round_to_cents(regular_pay);
    let overtime_pay = round_to_cents(overtime_pay);
    let double_time_pay = round_to_cents(double_time_pay);
    let gross_pay = regular_pay + overtime_pay + double_time_pay;

    debug!(
        worker_id = %worker_id,
        weeks = weeks.len(),
        total_hours = %hours.total_hours(),
        gross_pay = %gross_pay,
        "Calculated payroll"
    );

    Ok(PayrollResult {
        worker_id: worker_id.to_string(),
        hourly_rate,
        regular_pay,
        overtime_pay,
        double_time_pay,
        gross_pay,
        hours,
        category_hours,
        first_shift_date,
        last_shift_date,
        weeks,
    })
}
