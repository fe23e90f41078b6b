//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for calculating entry hours,
//! weekly reconciliation, and payroll.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EntryCalculationRequest, PayrollCalculationRequest, WeekCalculationRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::{AppState, STANDARD_POLICY_NAME};
