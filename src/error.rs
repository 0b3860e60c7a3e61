use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::fmt::Display;

use crate::models::FilterCriteria;

/// A single rejected discovery filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid filters: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    #[error("No movies found matching the criteria")]
    NoResults(FilterCriteria),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Internal server error: {0}")]
    Internal(String),
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(ref violations) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": self.to_string(),
                    "details": violations,
                }),
            ),
            AppError::NoResults(criteria) => (
                StatusCode::NOT_FOUND,
                json!({
                    "message": "No movies found matching the criteria",
                    "params": criteria,
                }),
            ),
            AppError::UpstreamUnavailable(ref detail) => {
                tracing::error!(error = %detail, "Discovery failed upstream");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": "Failed to fetch movie" }),
                )
            }
            AppError::NotFound(ref detail) => {
                tracing::error!(error = %detail, "Picked movie vanished upstream");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to fetch movie" }),
                )
            }
            AppError::Cancelled => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": self.to_string() }),
            ),
            AppError::Internal(ref detail) => {
                tracing::error!(error = %detail, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An unexpected error occurred" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
