//! Time entry model and related types.
//!
//! This module defines the [`TimeEntry`] record produced by the clock-in
//! layer, and the [`ClosedShift`] view the calculators work from.

use chrono::{DateTime, Duration, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A recorded break inside a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakInterval {
    /// When the break started.
    pub start: DateTime<FixedOffset>,
    /// When the break ended.
    pub end: DateTime<FixedOffset>,
}

impl BreakInterval {
    /// Returns the length of the break.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// A validated, clocked-out shift.
///
/// Obtained from [`TimeEntry::closed_shift`]; holding one guarantees that
/// clock-out is after clock-in and that any break lies inside the shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedShift {
    /// Clock-in instant.
    pub clock_in: DateTime<FixedOffset>,
    /// Clock-out instant.
    pub clock_out: DateTime<FixedOffset>,
    /// The recorded break, if any.
    pub recorded_break: Option<BreakInterval>,
}

impl ClosedShift {
    /// Returns the recorded duration of the shift.
    pub fn duration(&self) -> Duration {
        self.clock_out - self.clock_in
    }
}

/// A single clock-in/clock-out record for a worker.
///
/// Timestamps are offset-aware; calendar classification uses the offset
/// configured on the policy, never the offset the timestamp was recorded in.
///
/// # Example
///
/// ```
/// use payroll_engine::models::TimeEntry;
///
/// let json = r#"{
///     "id": "entry_001",
///     "worker_id": "worker_001",
///     "clock_in": "2026-01-13T09:00:00+00:00",
///     "clock_out": "2026-01-13T17:00:00+00:00"
/// }"#;
///
/// let entry: TimeEntry = serde_json::from_str(json).unwrap();
/// assert!(!entry.is_open());
/// assert!(entry.tags.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// The worker who recorded the entry.
    pub worker_id: String,
    /// Clock-in instant.
    pub clock_in: DateTime<FixedOffset>,
    /// Clock-out instant; absent while the worker is still clocked in.
    #[serde(default)]
    pub clock_out: Option<DateTime<FixedOffset>>,
    /// Start of the recorded break.
    #[serde(default)]
    pub break_start: Option<DateTime<FixedOffset>>,
    /// End of the recorded break.
    #[serde(default)]
    pub break_end: Option<DateTime<FixedOffset>>,
    /// Overrides the worker's hourly rate for this entry.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// Free-form tags (e.g. "remote", "sick").
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TimeEntry {
    /// Returns true while the entry has no clock-out.
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Validates the entry's intervals and returns the closed shift.
    ///
    /// # Errors
    ///
    /// - [`EngineError::IncompleteEntry`] if there is no clock-out
    /// - [`EngineError::InvalidInterval`] if clock-out is not after clock-in,
    ///   if only one break endpoint is present, if the break ends before it
    ///   starts, or if the break falls outside the shift
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::error::EngineError;
    /// use payroll_engine::models::TimeEntry;
    /// use chrono::DateTime;
    ///
    /// let entry = TimeEntry {
    ///     id: "entry_001".to_string(),
    ///     worker_id: "worker_001".to_string(),
    ///     clock_in: DateTime::parse_from_rfc3339("2026-01-13T09:00:00Z").unwrap(),
    ///     clock_out: None,
    ///     break_start: None,
    ///     break_end: None,
    ///     hourly_rate: None,
    ///     tags: vec![],
    /// };
    ///
    /// assert!(matches!(
    ///     entry.closed_shift(),
    ///     Err(EngineError::IncompleteEntry { .. })
    /// ));
    /// ```
    pub fn closed_shift(&self) -> EngineResult<ClosedShift> {
        let clock_out = self.clock_out.ok_or_else(|| EngineError::IncompleteEntry {
            entry_id: self.id.clone(),
        })?;

        if clock_out <= self.clock_in {
            return Err(self.invalid_interval(format!(
                "clock-out {} must be after clock-in {}",
                clock_out, self.clock_in
            )));
        }

        let recorded_break = match (self.break_start, self.break_end) {
            (None, None) => None,
            (Some(start), Some(end)) => {
                if end <= start {
                    return Err(self.invalid_interval(format!(
                        "break end {} must be after break start {}",
                        end, start
                    )));
                }
                if start < self.clock_in || end > clock_out {
                    return Err(self.invalid_interval(format!(
                        "break {} to {} falls outside the shift {} to {}",
                        start, end, self.clock_in, clock_out
                    )));
                }
                Some(BreakInterval { start, end })
            }
            (Some(_), None) => {
                return Err(self.invalid_interval("break has a start but no end"));
            }
            (None, Some(_)) => {
                return Err(self.invalid_interval("break has an end but no start"));
            }
        };

        Ok(ClosedShift {
            clock_in: self.clock_in,
            clock_out,
            recorded_break,
        })
    }

    fn invalid_interval(&self, message: impl Into<String>) -> EngineError {
        EngineError::InvalidInterval {
            entry_id: self.id.clone(),
            message: message.into(),
        }
    }
}
