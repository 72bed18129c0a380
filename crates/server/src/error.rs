//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Every response, success or
//! failure, is wrapped in the same [`ApiResponse`] envelope.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use phone_catalog::CatalogError;
use phone_catalog_core::ValidationErrors;
use serde::Serialize;
use thiserror::Error;

/// JSON envelope shared by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub timestamp: DateTime<Utc>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data,
            timestamp: Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    /// A success envelope with no payload.
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Application-level error type for the catalog server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog operation failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Request body or parameters failed field validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(CatalogError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Catalog(CatalogError::Validation(_) | CatalogError::InvalidRange { .. })
            | Self::Validation(_)
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Catalog(CatalogError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = match self {
            Self::Catalog(CatalogError::Validation(errors)) | Self::Validation(errors) => {
                ApiResponse::error("Validation failed", Some(errors))
            }
            Self::Catalog(CatalogError::InvalidRange { .. }) => {
                ApiResponse::error("Minimum price cannot be greater than maximum price", None)
            }
            // Don't expose internal error details to clients
            Self::Catalog(CatalogError::Internal(_)) => {
                ApiResponse::error("Internal server error", None)
            }
            other => ApiResponse::error(other.to_string(), None),
        };

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(format!("Malformed request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(format!("Invalid query parameters: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
