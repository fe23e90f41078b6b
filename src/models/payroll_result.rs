//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] returned by the payroll
//! converter, and the [`HoursBreakdown`] and [`CategoryHours`] it carries for
//! auditability.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::WeeklyHoursResult;

/// Reconciled hours summed across every week in a payroll run.
///
/// # Example
///
/// ```
/// use payroll_engine::models::HoursBreakdown;
/// use rust_decimal::Decimal;
///
/// let hours = HoursBreakdown {
///     regular_hours: Decimal::from(40),
///     overtime_hours: Decimal::from(5),
///     double_time_hours: Decimal::ZERO,
/// };
/// assert_eq!(hours.total_hours(), Decimal::from(45));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursBreakdown {
    /// Regular hours.
    pub regular_hours: Decimal,
    /// Overtime hours.
    pub overtime_hours: Decimal,
    /// Double-time hours.
    pub double_time_hours: Decimal,
}

impl HoursBreakdown {
    /// Sum of all three buckets.
    pub fn total_hours(&self) -> Decimal {
        self.regular_hours + self.overtime_hours + self.double_time_hours
    }
}

/// Paid hours broken out by entry category.
///
/// Informational only: these hours are already counted in the
/// [`HoursBreakdown`] and priced like any other hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryHours {
    /// Hours on entries that clocked in on a public holiday.
    pub holiday_hours: Decimal,
    /// Hours on entries tagged `sick` that did not fall on a holiday.
    pub sick_hours: Decimal,
}

/// The payroll figures for one worker over the supplied entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The worker the payroll is for.
    pub worker_id: String,
    /// The worker's base hourly rate.
    pub hourly_rate: Decimal,
    /// Pay for regular hours, rounded to cents.
    pub regular_pay: Decimal,
    /// Pay for overtime hours, rounded to cents.
    pub overtime_pay: Decimal,
    /// Pay for double-time hours, rounded to cents.
    pub double_time_pay: Decimal,
    /// Sum of the three pay buckets.
    pub gross_pay: Decimal,
    /// The underlying hours.
    pub hours: HoursBreakdown,
    /// Holiday and sick hours within `hours`.
    pub category_hours: CategoryHours,
    /// Local date of the earliest clock-in, if any entries were paid.
    pub first_shift_date: Option<NaiveDate>,
    /// Local date of the latest clock-in, if any entries were paid.
    pub last_shift_date: Option<NaiveDate>,
    /// One reconciled result per ISO week, in week order.
    pub weeks: Vec<WeeklyHoursResult>,
}
