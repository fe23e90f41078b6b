//! Response types for the payroll engine API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a policy not found error response.
    pub fn policy_not_found(name: &str) -> Self {
        Self::with_details(
            "POLICY_NOT_FOUND",
            format!("Policy not found: {}", name),
            format!("No policy named '{}' is loaded", name),
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::IncompleteEntry { .. } => Self::bad_request(ApiError::with_details(
                "INCOMPLETE_ENTRY",
                message,
                "Clock out the entry before calculating it",
            )),
            EngineError::InvalidInterval { .. } => Self::bad_request(ApiError::with_details(
                "INVALID_INTERVAL",
                message,
                "The entry's timestamps must be corrected",
            )),
            EngineError::NoEntries => Self::bad_request(ApiError::new("NO_ENTRIES", message)),
            EngineError::MixedWeeks { .. } => {
                Self::bad_request(ApiError::new("MIXED_WEEKS", message))
            }
            EngineError::InvalidRate { .. } => {
                Self::bad_request(ApiError::new("INVALID_RATE", message))
            }
            EngineError::InvalidPeriod { .. } => {
                Self::bad_request(ApiError::new("INVALID_PERIOD", message))
            }
            EngineError::InvalidPolicy { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid policy", message),
            },
            EngineError::ConfigNotFound { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::ConfigParseError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration parse error", message),
            },
        }
    }
}
