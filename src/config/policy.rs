//! Shift policy types.
//!
//! A [`Policy`] is the immutable rule set for a pay period. It is built from
//! a [`PolicySettings`] (the raw, deserializable form) and validated exactly
//! once, at construction. Calculations never re-validate a policy.

use chrono::{FixedOffset, Offset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// How the shift differential multiplier is applied when converting hours to pay.
///
/// # Example
///
/// ```
/// use payroll_engine::config::DifferentialApplication;
///
/// let mode: DifferentialApplication = serde_json::from_str("\"all_tiers\"").unwrap();
/// assert_eq!(mode, DifferentialApplication::AllTiers);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferentialApplication {
    /// The differential is reported per entry but never changes pay.
    #[default]
    Informational,
    /// The differential scales the regular tier only.
    RegularOnly,
    /// The differential compounds with the overtime and double-time multipliers.
    AllTiers,
}

/// Night and weekend premium configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDifferentials {
    /// Multiplier for shifts clocked in on Saturday or Sunday.
    pub weekend_multiplier: Decimal,
    /// Multiplier for weekday shifts clocked in during night hours.
    pub night_multiplier: Decimal,
    /// First hour (inclusive) of the night window.
    pub night_start_hour: u32,
    /// Hour (exclusive) at which the night window ends.
    pub night_end_hour: u32,
}

impl Default for ShiftDifferentials {
    fn default() -> Self {
        STANDARD_SHIFT_DIFFERENTIALS
    }
}

/// The raw policy settings as they appear in a policy file.
///
/// Hours are decimals, minutes are integers. The supplemented fields
/// (maximum shift, tier multipliers, differentials, timezone) default to the
/// standard policy values when omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySettings {
    /// Nominal working hours in a day.
    pub standard_hours_per_day: Decimal,
    /// Nominal working hours in a week.
    pub standard_hours_per_week: Decimal,
    /// Net hours in one entry after which overtime applies.
    pub overtime_after_hours_per_day: Decimal,
    /// Net hours in one week after which overtime applies.
    pub overtime_after_hours_per_week: Decimal,
    /// Net hours in one entry after which double-time applies.
    pub double_time_after_hours_per_day: Decimal,
    /// Floor applied to any single entry's gross hours.
    pub minimum_shift_hours: Decimal,
    /// Gross hours at or beyond which an unrecorded break is deducted.
    pub break_deduction_after_hours: Decimal,
    /// Length of the implied unpaid break.
    pub break_duration_minutes: i64,
    /// Rounding granularity for the recorded shift duration.
    pub round_to_nearest_minutes: i64,
    /// Longest recorded shift accepted as valid.
    #[serde(default = "default_maximum_shift_hours")]
    pub maximum_shift_hours: Decimal,
    /// Pay multiplier for overtime hours.
    #[serde(default = "default_overtime_multiplier")]
    pub overtime_multiplier: Decimal,
    /// Pay multiplier for double-time hours.
    #[serde(default = "default_double_time_multiplier")]
    pub double_time_multiplier: Decimal,
    /// Night and weekend premiums.
    #[serde(default)]
    pub shift_differentials: ShiftDifferentials,
    /// How premiums combine with the tier multipliers in payroll.
    #[serde(default)]
    pub differential_application: DifferentialApplication,
    /// Offset from UTC used for calendar-day, night and week classification.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

fn default_maximum_shift_hours() -> Decimal {
    STANDARD_SETTINGS.maximum_shift_hours
}

fn default_overtime_multiplier() -> Decimal {
    STANDARD_SETTINGS.overtime_multiplier
}

fn default_double_time_multiplier() -> Decimal {
    STANDARD_SETTINGS.double_time_multiplier
}

const HOURS_IN_DAY: Decimal = Decimal::from_parts(24, 0, 0, false, 0);
const MINUTES_IN_DAY: i64 = 24 * 60;

const STANDARD_SHIFT_DIFFERENTIALS: ShiftDifferentials = ShiftDifferentials {
    weekend_multiplier: Decimal::from_parts(125, 0, 0, false, 2),
    night_multiplier: Decimal::from_parts(115, 0, 0, false, 2),
    night_start_hour: 20,
    night_end_hour: 6,
};

const STANDARD_SETTINGS: PolicySettings = PolicySettings {
    standard_hours_per_day: Decimal::from_parts(8, 0, 0, false, 0),
    standard_hours_per_week: Decimal::from_parts(40, 0, 0, false, 0),
    overtime_after_hours_per_day: Decimal::from_parts(8, 0, 0, false, 0),
    overtime_after_hours_per_week: Decimal::from_parts(40, 0, 0, false, 0),
    double_time_after_hours_per_day: Decimal::from_parts(12, 0, 0, false, 0),
    minimum_shift_hours: Decimal::from_parts(2, 0, 0, false, 0),
    break_deduction_after_hours: Decimal::from_parts(4, 0, 0, false, 0),
    break_duration_minutes: 30,
    round_to_nearest_minutes: 15,
    maximum_shift_hours: HOURS_IN_DAY,
    overtime_multiplier: Decimal::from_parts(15, 0, 0, false, 1),
    double_time_multiplier: Decimal::from_parts(2, 0, 0, false, 0),
    shift_differentials: STANDARD_SHIFT_DIFFERENTIALS,
    differential_application: DifferentialApplication::Informational,
    utc_offset_minutes: 0,
};

/// The standard policy.
///
/// 8h/day, 40h/week, overtime after 8h/day or 40h/week, double-time after
/// 12h/day, 2h minimum shift, 30-minute break after 4h, rounding to the
/// nearest 15 minutes, classification in UTC.
///
/// # Example
///
/// ```
/// use payroll_engine::config::STANDARD_POLICY;
/// use rust_decimal::Decimal;
///
/// assert_eq!(STANDARD_POLICY.overtime_after_hours_per_day(), Decimal::from(8));
/// assert_eq!(STANDARD_POLICY.round_to_nearest_minutes(), 15);
/// ```
pub const STANDARD_POLICY: Policy = Policy {
    settings: STANDARD_SETTINGS,
};

/// A validated, immutable shift policy.
///
/// The only way to obtain a `Policy` besides [`STANDARD_POLICY`] is
/// [`Policy::new`] (or deserialization, which calls it).
///
/// # Example
///
/// ```
/// use payroll_engine::config::{Policy, STANDARD_POLICY};
/// use rust_decimal::Decimal;
///
/// let mut settings = STANDARD_POLICY.settings();
/// settings.double_time_after_hours_per_day = Decimal::from(6);
///
/// assert!(Policy::new(settings).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "PolicySettings", try_from = "PolicySettings")]
pub struct Policy {
    settings: PolicySettings,
}

impl Policy {
    /// Validates the settings and builds a policy.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPolicy`] if the daily thresholds are not
    /// monotonic, the double-time threshold exceeds 24 hours, the rounding
    /// granularity is not positive, or any other field is out of range.
    pub fn new(settings: PolicySettings) -> EngineResult<Self> {
        validate(&settings)?;
        Ok(Self { settings })
    }

    /// Returns a copy of the raw settings.
    pub fn settings(&self) -> PolicySettings {
        self.settings
    }

    /// Nominal working hours in a day.
    pub fn standard_hours_per_day(&self) -> Decimal {
        self.settings.standard_hours_per_day
    }

    /// Nominal working hours in a week.
    pub fn standard_hours_per_week(&self) -> Decimal {
        self.settings.standard_hours_per_week
    }

    /// Daily overtime threshold.
    pub fn overtime_after_hours_per_day(&self) -> Decimal {
        self.settings.overtime_after_hours_per_day
    }

    /// Weekly overtime threshold.
    pub fn overtime_after_hours_per_week(&self) -> Decimal {
        self.settings.overtime_after_hours_per_week
    }

    /// Daily double-time threshold.
    pub fn double_time_after_hours_per_day(&self) -> Decimal {
        self.settings.double_time_after_hours_per_day
    }

    /// Minimum paid shift length.
    pub fn minimum_shift_hours(&self) -> Decimal {
        self.settings.minimum_shift_hours
    }

    /// Gross hours at which the implied break starts to apply.
    pub fn break_deduction_after_hours(&self) -> Decimal {
        self.settings.break_deduction_after_hours
    }

    /// Length of the implied break in minutes.
    pub fn break_duration_minutes(&self) -> i64 {
        self.settings.break_duration_minutes
    }

    /// Length of the implied break in hours.
    pub fn break_duration_hours(&self) -> Decimal {
        Decimal::from(self.settings.break_duration_minutes) / Decimal::from(60)
    }

    /// Rounding granularity in minutes (always positive).
    pub fn round_to_nearest_minutes(&self) -> i64 {
        self.settings.round_to_nearest_minutes
    }

    /// Longest recorded shift accepted as valid.
    pub fn maximum_shift_hours(&self) -> Decimal {
        self.settings.maximum_shift_hours
    }

    /// Pay multiplier for overtime hours.
    pub fn overtime_multiplier(&self) -> Decimal {
        self.settings.overtime_multiplier
    }

    /// Pay multiplier for double-time hours.
    pub fn double_time_multiplier(&self) -> Decimal {
        self.settings.double_time_multiplier
    }

    /// Night and weekend premiums.
    pub fn shift_differentials(&self) -> &ShiftDifferentials {
        &self.settings.shift_differentials
    }

    /// How premiums combine with the tier multipliers in payroll.
    pub fn differential_application(&self) -> DifferentialApplication {
        self.settings.differential_application
    }

    /// The regular-hours cap applied across a whole week.
    ///
    /// Regular hours can exceed neither the standard week nor the weekly
    /// overtime threshold.
    pub fn weekly_regular_cap(&self) -> Decimal {
        self.settings
            .standard_hours_per_week
            .min(self.settings.overtime_after_hours_per_week)
    }

    /// The offset used for calendar classification.
    pub fn timezone(&self) -> FixedOffset {
        self.settings
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }
}

impl TryFrom<PolicySettings> for Policy {
    type Error = EngineError;

    fn try_from(settings: PolicySettings) -> EngineResult<Self> {
        Self::new(settings)
    }
}

impl From<Policy> for PolicySettings {
    fn from(policy: Policy) -> Self {
        policy.settings
    }
}

impl Default for Policy {
    fn default() -> Self {
        STANDARD_POLICY
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidPolicy {
        message: message.into(),
    }
}

fn validate(s: &PolicySettings) -> EngineResult<()> {
    let thresholds = [
        ("standard_hours_per_day", s.standard_hours_per_day),
        ("standard_hours_per_week", s.standard_hours_per_week),
        ("overtime_after_hours_per_day", s.overtime_after_hours_per_day),
        ("overtime_after_hours_per_week", s.overtime_after_hours_per_week),
        ("double_time_after_hours_per_day", s.double_time_after_hours_per_day),
        ("minimum_shift_hours", s.minimum_shift_hours),
        ("break_deduction_after_hours", s.break_deduction_after_hours),
    ];
    if let Some((name, value)) = thresholds.iter().find(|(_, v)| *v < Decimal::ZERO) {
        return Err(invalid(format!("{} must not be negative, got {}", name, value)));
    }

    if s.overtime_after_hours_per_day > s.double_time_after_hours_per_day {
        return Err(invalid(format!(
            "overtime_after_hours_per_day ({}) must not exceed double_time_after_hours_per_day ({})",
            s.overtime_after_hours_per_day, s.double_time_after_hours_per_day
        )));
    }
    if s.double_time_after_hours_per_day > HOURS_IN_DAY {
        return Err(invalid(format!(
            "double_time_after_hours_per_day ({}) must not exceed 24",
            s.double_time_after_hours_per_day
        )));
    }
    if s.round_to_nearest_minutes <= 0 {
        return Err(invalid(format!(
            "round_to_nearest_minutes must be positive, got {}",
            s.round_to_nearest_minutes
        )));
    }
    if s.round_to_nearest_minutes > MINUTES_IN_DAY {
        return Err(invalid(format!(
            "round_to_nearest_minutes must not exceed {}, got {}",
            MINUTES_IN_DAY, s.round_to_nearest_minutes
        )));
    }
    if s.break_duration_minutes < 0 {
        return Err(invalid(format!(
            "break_duration_minutes must not be negative, got {}",
            s.break_duration_minutes
        )));
    }
    if s.maximum_shift_hours <= Decimal::ZERO {
        return Err(invalid(format!(
            "maximum_shift_hours must be positive, got {}",
            s.maximum_shift_hours
        )));
    }

    let multipliers = [
        ("overtime_multiplier", s.overtime_multiplier),
        ("double_time_multiplier", s.double_time_multiplier),
        ("weekend_multiplier", s.shift_differentials.weekend_multiplier),
        ("night_multiplier", s.shift_differentials.night_multiplier),
    ];
    if let Some((name, value)) = multipliers.iter().find(|(_, v)| *v <= Decimal::ZERO) {
        return Err(invalid(format!("{} must be positive, got {}", name, value)));
    }

    let differentials = &s.shift_differentials;
    if differentials.night_start_hour > 23 || differentials.night_end_hour > 23 {
        return Err(invalid(format!(
            "night hours must be within 0..=23, got {}..{}",
            differentials.night_start_hour, differentials.night_end_hour
        )));
    }

    let offset_is_valid = s
        .utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .is_some();
    if !offset_is_valid {
        return Err(invalid(format!(
            "utc_offset_minutes must be within +/-24 hours, got {}",
            s.utc_offset_minutes
        )));
    }

    Ok(())
}
