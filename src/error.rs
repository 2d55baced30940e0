//! Error types for Amiste server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Postgres SQLSTATE for foreign key violations
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Stable error codes returned to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchRecord = 4,
    BadValue = 5,
    Duplicate = 6,
    StillReferenced = 7,
    DraftExpired = 8,
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
    Database(sqlx::Error),

    #[error("Record is still referenced: {0}")]
    ForeignKey(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Draft cache error: {0}")]
    DraftCache(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
                let constraint = db.constraint().unwrap_or("unknown").to_string();
                return AppError::ForeignKey(constraint);
            }
        }
        AppError::Database(err)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::DraftCache(err.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    fn parts(&self) -> (StatusCode, ErrorCode, String) {
        match self {
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
                    e.to_string(),
                )
            }
            AppError::ForeignKey(constraint) => {
                tracing::warn!("Foreign key violation on {}", constraint);
                (
                    StatusCode::CONFLICT,
                    ErrorCode::StillReferenced,
                    "This record cannot be deleted because other records (such as checklists) still reference it"
                        .to_string(),
                )
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone())
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::DraftCache(msg) => {
                tracing::error!("Draft cache error: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::DraftExpired,
                    msg.clone(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Authentication("x".into()), StatusCode::UNAUTHORIZED),
            (AppError::Authorization("x".into()), StatusCode::FORBIDDEN),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::ForeignKey("checklists_machine_id_fkey".into()), StatusCode::CONFLICT),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_foreign_key_message_is_friendly() {
        let (_, code, message) = AppError::ForeignKey("checklists_machine_id_fkey".into()).parts();
        assert_eq!(code, ErrorCode::StillReferenced);
        assert!(message.contains("still reference"));
        assert!(!message.contains("fkey"));
    }

    #[test]
    fn test_backend_message_is_surfaced() {
        let (_, _, message) = AppError::Database(sqlx::Error::RowNotFound).parts();
        assert_eq!(message, sqlx::Error::RowNotFound.to_string());
    }
}
