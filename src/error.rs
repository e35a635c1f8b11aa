use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use std::fmt;
use thiserror::Error as ThisError;
use tracing::error;

/// Persisted record kinds, used to qualify errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    School,
    Student,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::School => f.write_str("School"),
            Entity::Student => f.write_str("Student"),
        }
    }
}

#[derive(Debug, ThisError)]
pub enum SchoolError {
    #[error("{0} email already registered")]
    DuplicateEmail(Entity),

    #[error("{0} not found")]
    NotFound(Entity),

    #[error("Invalid request parameters: {0}")]
    InvalidParams(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),
}

impl From<JsonRejection> for SchoolError {
    fn from(rejection: JsonRejection) -> Self {
        SchoolError::InvalidParams(rejection.body_text())
    }
}

impl From<QueryRejection> for SchoolError {
    fn from(rejection: QueryRejection) -> Self {
        SchoolError::InvalidParams(rejection.body_text())
    }
}

impl From<PathRejection> for SchoolError {
    fn from(rejection: PathRejection) -> Self {
        SchoolError::InvalidParams(rejection.body_text())
    }
}

impl IntoResponse for SchoolError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            SchoolError::DuplicateEmail(_) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "DUPLICATE_EMAIL".to_string(),
                    message: "Email already registered".to_string(),
                },
            ),
            SchoolError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{entity} not found"),
                },
            ),
            SchoolError::InvalidParams(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorBody {
                    code: "INVALID_PARAMS".to_string(),
                    message: detail,
                },
            ),
            SchoolError::DatabaseError(e) => {
                error!(error = %e, "store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred.".to_string(),
                    },
                )
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
