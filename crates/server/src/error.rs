use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::services::ServiceError;
use log::error;
use models::{FilterError, ValidationError};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Errors returned by the HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("authentication required")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal server error")]
    Internal,
}

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            Self::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.parts();
        let body = ErrorResponse {
            error: kind,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => Self::Validation(e.to_string()),
            ServiceError::NotFound { .. } => Self::NotFound(err.to_string()),
            ServiceError::Conflict(message) => Self::Conflict(message),
            ServiceError::Db(e) => {
                error!("Database error: {e}");
                Self::Internal
            }
        }
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
