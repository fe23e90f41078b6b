//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition the calculators, the policy loader and the API can hit.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Calculation errors are all-or-nothing: no partial result is ever
/// returned alongside one of these.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::IncompleteEntry {
///     entry_id: "entry_001".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Time entry 'entry_001' has no clock-out and cannot be calculated"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// An open entry (no clock-out) was passed to a calculation.
    #[error("Time entry '{entry_id}' has no clock-out and cannot be calculated")]
    IncompleteEntry {
        /// The ID of the open entry.
        entry_id: String,
    },

    /// The shift or break interval of an entry is malformed.
    #[error("Invalid interval in time entry '{entry_id}': {message}")]
    InvalidInterval {
        /// The ID of the offending entry.
        entry_id: String,
        /// A description of what made the interval invalid.
        message: String,
    },

    /// A policy failed validation at construction time.
    #[error("Invalid policy: {message}")]
    InvalidPolicy {
        /// A description of the violated rule.
        message: String,
    },

    /// A weekly calculation was requested for an empty entry list.
    #[error("No time entries supplied for weekly calculation")]
    NoEntries,

    /// Entries passed to a weekly calculation fall in different ISO weeks.
    #[error("Time entries span multiple ISO weeks: expected {expected}, found {found}")]
    MixedWeeks {
        /// The week of the first entry supplied.
        expected: String,
        /// The first differing week encountered.
        found: String,
    },

    /// An hourly rate was unusable for payroll conversion.
    #[error("Invalid hourly rate: {message}")]
    InvalidRate {
        /// A description of the problem.
        message: String,
    },

    /// A pay period had its end before its start.
    #[error("Invalid pay period: {message}")]
    InvalidPeriod {
        /// A description of the problem.
        message: String,
    },

    /// Policy file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Policy file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
