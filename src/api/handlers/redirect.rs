//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Path of the page unknown codes are sent to.
pub const NOT_FOUND_PATH: &str = "/notfound";

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the code (counts the click and persists it)
/// 2. Return `301 Moved Permanently` with `Location` set to the stored URL
///
/// Unknown codes get `302 Found` to [`NOT_FOUND_PATH`].
///
/// # Errors
///
/// Returns 500 Internal Server Error if the data file cannot be read or written.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.link_service.resolve(&code).await {
        Ok(link) => Ok((
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, link.original_url)],
        )
            .into_response()),
        Err(AppError::NotFound { .. }) => {
            debug!(code = %code, "Unknown short code");
            Ok((StatusCode::FOUND, [(header::LOCATION, NOT_FOUND_PATH)]).into_response())
        }
        Err(e) => Err(e),
    }
}
