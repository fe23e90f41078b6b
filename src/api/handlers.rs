//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_entry, calculate_payroll, calculate_payroll_for_period, calculate_week,
};
use crate::config::Policy;
use crate::error::EngineResult;

use super::request::{EntryCalculationRequest, PayrollCalculationRequest, WeekCalculationRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/entries/calculate", post(calculate_entry_handler))
        .route("/weeks/calculate", post(calculate_week_handler))
        .route("/payroll/calculate", post(calculate_payroll_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Resolves the requested policy or produces a 400 response.
fn resolve_policy<'a>(
    state: &'a AppState,
    name: Option<&str>,
    correlation_id: Uuid,
) -> Result<&'a Policy, Response> {
    state.policy(name).ok_or_else(|| {
        let name = name.unwrap_or_default();
        warn!(correlation_id = %correlation_id, policy = %name, "Policy not found");
        json_response(StatusCode::BAD_REQUEST, ApiError::policy_not_found(name))
    })
}

/// Turns a calculation outcome into a response, logging either way.
fn calculation_response<T: Serialize>(
    result: EngineResult<T>,
    correlation_id: Uuid,
    start_time: Instant,
) -> Response {
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, body)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /entries/calculate.
///
/// Returns the hours breakdown for a single entry.
async fn calculate_entry_handler(
    State(state): State<AppState>,
    payload: Result<Json<EntryCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing entry calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };
    let policy = match resolve_policy(&state, request.policy.as_deref(), correlation_id) {
        Ok(policy) => policy,
        Err(response) => return response,
    };

    info!(
        correlation_id = %correlation_id,
        entry_id = %request.entry.id,
        worker_id = %request.entry.worker_id,
        "Calculating entry"
    );
    let start_time = Instant::now();
    calculation_response(
        calculate_entry(&request.entry, policy),
        correlation_id,
        start_time,
    )
}

/// Handler for POST /weeks/calculate.
///
/// Returns the reconciled hours for one worker's week.
async fn calculate_week_handler(
    State(state): State<AppState>,
    payload: Result<Json<WeekCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing week calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };
    let policy = match resolve_policy(&state, request.policy.as_deref(), correlation_id) {
        Ok(policy) => policy,
        Err(response) => return response,
    };

    info!(
        correlation_id = %correlation_id,
        entries_count = request.entries.len(),
        "Calculating week"
    );
    let start_time = Instant::now();
    calculation_response(
        calculate_week(&request.entries, policy),
        correlation_id,
        start_time,
    )
}

/// Handler for POST /payroll/calculate.
///
/// Returns the payroll for one worker, optionally limited to a pay period.
async fn calculate_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };
    let policy = match resolve_policy(&state, request.policy.as_deref(), correlation_id) {
        Ok(policy) => policy,
        Err(response) => return response,
    };

    info!(
        correlation_id = %correlation_id,
        worker_id = %request.worker_id,
        entries_count = request.entries.len(),
        "Calculating payroll"
    );
    let start_time = Instant::now();
    let result = match &request.pay_period {
        Some(period) => calculate_payroll_for_period(
            &request.worker_id,
            &request.entries,
            request.hourly_rate,
            period,
            policy,
        ),
        None => calculate_payroll(
            &request.worker_id,
            &request.entries,
            request.hourly_rate,
            policy,
        ),
    };
    calculation_response(result, correlation_id, start_time)
}
