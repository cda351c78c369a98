//! Error types for the Tempus server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable application error codes surfaced to terminal and dashboard clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchUser = 4,
    NoSuchRecord = 5,
    Duplicate = 6,
    BadValue = 7,
    PinNotFound = 8,
    AlreadyExited = 9,
    DayComplete = 10,
    PastExitWindow = 11,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// No active employee carries the presented PIN, or the employee has
    /// no active schedule reachable through its area link
    #[error("PIN not recognized")]
    PinNotFound,

    /// The employee already recorded an exit today
    #[error("Exit already recorded for today")]
    AlreadyExited,

    /// Both the entry and the exit for today exist
    #[error("Attendance for today is already complete")]
    DayComplete,

    /// The scheduled exit time has passed, entries are no longer accepted
    #[error("Past the scheduled exit time, entry refused")]
    PastExitWindow,
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchRecord, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone())
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
            AppError::PinNotFound => (
                StatusCode::NOT_FOUND,
                ErrorCode::PinNotFound,
                self.to_string(),
            ),
            AppError::AlreadyExited => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::AlreadyExited,
                self.to_string(),
            ),
            AppError::DayComplete => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::DayComplete,
                self.to_string(),
            ),
            AppError::PastExitWindow => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::PastExitWindow,
                self.to_string(),
            ),
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
