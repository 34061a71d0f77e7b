use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use snip_core::ShortenerError;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

pub const INVALID_URL_MESSAGE: &str = "Invalid URL provided.";
pub const NOT_FOUND_MESSAGE: &str = "Short URL not found.";
pub const DATABASE_ERROR_MESSAGE: &str = "Database error.";
pub const ALLOCATION_FAILED_MESSAGE: &str = "Failed to create short URL.";

/// Errors a handler can answer with.
///
/// Logging is left to the shortener service, which knows which failures are
/// alarms; this type only shapes the HTTP response.
#[derive(Debug)]
pub enum AppError {
    /// The request body was missing or not the expected JSON.
    BadRequest,
    NotFound,
    Shortener(ShortenerError),
}

impl From<ShortenerError> for AppError {
    fn from(value: ShortenerError) -> Self {
        Self::Shortener(value)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::BadRequest | AppError::Shortener(ShortenerError::InvalidUrl(_)) => {
                (StatusCode::BAD_REQUEST, INVALID_URL_MESSAGE, None)
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE, None),
            AppError::Shortener(e @ ShortenerError::StorageUnavailable(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                DATABASE_ERROR_MESSAGE,
                Some(e.to_string()),
            ),
            AppError::Shortener(e @ ShortenerError::AllocationExhausted { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ALLOCATION_FAILED_MESSAGE,
                Some(e.to_string()),
            ),
        };

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}
