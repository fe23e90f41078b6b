//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod hours_result;
mod pay_period;
mod payroll_result;
mod time_entry;

pub use hours_result::{
    AuditStep, BreakSource, EntryAllocation, EntryHoursResult, IsoWeekKey, RateMultipliers,
    ShiftDifferential, ShiftKind, WeeklyHoursResult,
};
pub use pay_period::PayPeriod;
pub use payroll_result::{CategoryHours, HoursBreakdown, PayrollResult};
pub use time_entry::{BreakInterval, ClosedShift, TimeEntry};
