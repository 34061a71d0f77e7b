use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use snip_core::{ShortCode, Shortened};
use tracing::debug;

pub const ALREADY_EXISTS_MESSAGE: &str = "Short URL for this link already exists.";

pub async fn create_url_handler(
    State(state): State<AppState>,
    request: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = request.map_err(|rejection| {
        debug!(error = %rejection, "rejected shorten request body");
        AppError::BadRequest
    })?;

    let shortened = state.shortener().shorten(&request.long_url).await?;
    let short_url = shortened.code().to_url(state.base_url());

    let response = match shortened {
        Shortened::Created(_) => (
            StatusCode::CREATED,
            Json(CreateUrlResponse {
                short_url,
                message: None,
            }),
        ),
        Shortened::Existing(_) => (
            StatusCode::OK,
            Json(CreateUrlResponse {
                short_url,
                message: Some(ALREADY_EXISTS_MESSAGE),
            }),
        ),
    };

    Ok(response.into_response())
}

pub async fn redirect_handler(
    State(state): State<AppState>,
    short_code: std::result::Result<Path<String>, PathRejection>,
) -> Result<Response> {
    let Path(short_code) = short_code.map_err(|rejection| {
        debug!(error = %rejection, "rejected redirect path");
        AppError::NotFound
    })?;

    // A malformed code was never issued, so it cannot resolve.
    let Ok(code) = ShortCode::new(short_code) else {
        return Err(AppError::NotFound);
    };

    let record = state
        .shortener()
        .resolve(&code)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, record.original_url)]).into_response())
}
