//! ISO week grouping.
//!
//! Weeks run Monday to Sunday in the policy timezone and are keyed by the ISO
//! 8601 week-numbering year and week number.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, FixedOffset};

use crate::config::Policy;
use crate::models::{IsoWeekKey, TimeEntry};

/// Returns the ISO week containing `instant` in the policy timezone.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::iso_week_key;
/// use payroll_engine::config::STANDARD_POLICY;
/// use payroll_engine::models::IsoWeekKey;
/// use chrono::DateTime;
///
/// // Friday 2027-01-01 belongs to the last ISO week of 2026
/// let instant = DateTime::parse_from_rfc3339("2027-01-01T10:00:00Z").unwrap();
/// assert_eq!(
///     iso_week_key(&instant, &STANDARD_POLICY),
///     IsoWeekKey { year: 2026, week: 53 }
/// );
/// ```
pub fn iso_week_key(instant: &DateTime<FixedOffset>, policy: &Policy) -> IsoWeekKey {
    let week = instant.with_timezone(&policy.timezone()).iso_week();
    IsoWeekKey {
        year: week.year(),
        week: week.week(),
    }
}

/// Groups entries by the ISO week of their clock-in.
///
/// Entry order within each week is preserved.
pub fn group_by_week<'a, I>(entries: I, policy: &Policy) -> BTreeMap<IsoWeekKey, Vec<&'a TimeEntry>>
where
    I: IntoIterator<Item = &'a TimeEntry>,
{
    let mut weeks: BTreeMap<IsoWeekKey, Vec<&'a TimeEntry>> = BTreeMap::new();
    for entry in entries {
        weeks
            .entry(iso_week_key(&entry.clock_in, policy))
            .or_default()
            .push(entry);
    }
    weeks
}
