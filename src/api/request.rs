//! Request types for the payroll engine API.
//!
//! This module defines the JSON request bodies for the `/entries/calculate`,
//! `/weeks/calculate`, and `/payroll/calculate` endpoints. Time entries are
//! accepted in their model form.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{PayPeriod, TimeEntry};

/// Request body for `/entries/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryCalculationRequest {
    /// The entry to calculate.
    pub entry: TimeEntry,
    /// Name of the policy to apply; the default policy when omitted.
    #[serde(default)]
    pub policy: Option<String>,
}

/// Request body for `/weeks/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekCalculationRequest {
    /// One worker's entries for a single ISO week.
    pub entries: Vec<TimeEntry>,
    /// Name of the policy to apply; the default policy when omitted.
    #[serde(default)]
    pub policy: Option<String>,
}

/// Request body for `/payroll/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollCalculationRequest {
    /// The worker to pay.
    pub worker_id: String,
    /// The worker's base hourly rate.
    pub hourly_rate: Decimal,
    /// Time entries; entries for other workers are ignored.
    pub entries: Vec<TimeEntry>,
    /// Restricts payroll to entries clocking in during this period.
    #[serde(default)]
    pub pay_period: Option<PayPeriod>,
    /// Name of the policy to apply; the default policy when omitted.
    #[serde(default)]
    pub policy: Option<String>,
}
