//! Unified error handling
//!
//! Application-level error type and response envelope for the HTTP
//! surface.
//!
//! # Error code table
//!
//! | Code | Status | Meaning |
//! |------|--------|---------|
//! | E0000 | 200 | Success |
//! | E0002 | 400 | Validation failed |
//! | E0003 | 404 | Resource not found |
//! | E0004 | 409 | Resource conflict |
//! | E0005 | 422 | Business rule violation |
//! | E9002 | 500 | Storage error |
//! | E9001 | 500 | Internal error |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::scheduling::ScheduleError;

/// Unified API response structure
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Business Logic Errors ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    // ========== System Errors ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Not found (404)
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.as_str()),

            // Conflict (409)
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.as_str()),

            // Validation (400)
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.as_str()),

            // Business rule (422)
            AppError::BusinessRule(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "E0005", msg.as_str())
            }

            // Database errors (500)
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "E9002", "Database error")
            }

            // Internal errors (500)
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error",
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message: message.to_string(),
            data: None,
        });

        (status, body).into_response()
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        match &err {
            ScheduleError::AppointmentNotFound(_)
            | ScheduleError::WorkstationNotFound(_)
            | ScheduleError::StaffNotFound(_) => AppError::NotFound(err.to_string()),

            ScheduleError::InvalidTransition { .. } => AppError::BusinessRule(err.to_string()),

            ScheduleError::WorkstationOccupied(_)
            | ScheduleError::WorkstationUnavailable { .. }
            | ScheduleError::StaffAlreadyAssigned { .. }
            | ScheduleError::WorkstationInUse(_)
            | ScheduleError::DuplicateName(_) => AppError::Conflict(err.to_string()),

            ScheduleError::Validation(_) => AppError::Validation(err.to_string()),

            ScheduleError::Storage(_) => AppError::Database(err.to_string()),
        }
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::AppointmentStatus;

    #[test]
    fn test_schedule_error_mapping() {
        let not_found: AppError =
            ScheduleError::AppointmentNotFound("appt-1".to_string()).into();
        assert!(matches!(not_found, AppError::NotFound(_)));

        let conflict: AppError = ScheduleError::WorkstationOccupied("ws-1".to_string()).into();
        assert!(matches!(conflict, AppError::Conflict(_)));

        let rule: AppError = ScheduleError::InvalidTransition {
            from: AppointmentStatus::Completed,
            event: "checkOut",
        }
        .into();
        assert!(matches!(rule, AppError::BusinessRule(_)));

        let validation: AppError = ScheduleError::Validation("bad".to_string()).into();
        assert!(matches!(validation, AppError::Validation(_)));
    }
}
