//! Calculation logic for the payroll engine.
//!
//! This module contains the per-entry pipeline (duration rounding, the
//! minimum-shift floor, break deduction, daily tiering, and shift
//! differentials), ISO week grouping, weekly reconciliation, and payroll
//! conversion.

mod break_deduction;
mod daily_tiering;
mod entry;
mod gross_hours;
mod payroll;
mod shift_differential;
mod week_grouping;
mod weekly;

pub use break_deduction::{BreakDeduction, calculate_break_deduction};
pub use daily_tiering::{DailyTiers, split_daily_tiers};
pub use entry::calculate_entry;
pub use gross_hours::{GrossHoursResult, calculate_gross_hours, round_to_granularity};
pub use payroll::{SICK_TAG, calculate_payroll, calculate_payroll_for_period};
pub use shift_differential::{ShiftDifferentialResult, get_shift_differential, is_night_hour};
pub use week_grouping::{group_by_week, iso_week_key};
pub use weekly::calculate_week;
