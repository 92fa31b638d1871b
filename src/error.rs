//! Error types for the bookstore server

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures raised by inventory lookups and stock rules
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryError {
    /// The identifier text is not a valid integer
    #[error("Unable to convert Id")]
    InvalidId,

    #[error("Book not found")]
    NotFound,

    #[error("Book out of stock")]
    OutOfStock,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Lookup failures on path-addressed resources answer 404
    pub fn not_found(err: InventoryError) -> Self {
        tracing::debug!(error = %err, "Rejected path lookup");
        AppError::NotFound(err.to_string())
    }

    /// Lookup and stock failures on query-addressed mutations answer 400
    pub fn bad_request(err: InventoryError) -> Self {
        tracing::debug!(error = %err, "Rejected stock change");
        AppError::BadRequest(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::debug!("Rejected request body: {}", err);
        AppError::BadRequest(format!("Invalid request body: {}", err))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {}", rejection.body_text());
        AppError::BadRequest(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
