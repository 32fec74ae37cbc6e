//! API error type and its JSON response mapping.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use healthflow_core::error::HealthflowError;
use serde::Serialize;
use thiserror::Error;

/// API error type that converts to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Entity not found (404)
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Malformed request: unparseable id, body or query (400)
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Well-formed request that breaks a domain rule (400)
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Storage or other server-side failure (500)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// For routes that address an existing record by id, an unknown id is
    /// a bad request like any other invalid input.
    pub fn unknown_id_as_bad_request(err: HealthflowError) -> Self {
        match err {
            HealthflowError::NotFound { entity, id } => Self::BadRequest {
                message: format!("Unknown {entity} id: {id}"),
            },
            other => other.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::BadRequest { .. } => "BAD_REQUEST",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<HealthflowError> for ApiError {
    fn from(err: HealthflowError) -> Self {
        match err {
            HealthflowError::NotFound { entity, id } => Self::NotFound { entity, id },
            HealthflowError::Validation { message } => Self::Validation { message },
            other @ (HealthflowError::Database(_) | HealthflowError::Internal(_)) => {
                Self::Internal {
                    message: other.to_string(),
                }
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: &'static str,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "API error");
        } else {
            tracing::warn!(error = %self, "API error");
        }

        let (entity, id) = match &self {
            ApiError::NotFound { entity, id } => (Some(entity.clone()), Some(id.clone())),
            _ => (None, None),
        };

        let body = ErrorResponse {
            code: self.error_code(),
            message: self.to_string(),
            entity,
            id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
