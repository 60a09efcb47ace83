//! Result page shown after shortening a URL.

use askama::Template;
use askama_web::WebTemplate;
use axum::http::HeaderMap;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_host::{extract_host_from_headers, short_url};

/// Shows the short code and the full short URL.
#[derive(Template, WebTemplate)]
#[template(path = "short_link.html")]
pub struct ShortLinkTemplate {
    pub slug: String,
    pub short_url: String,
    pub original_url: String,
}

/// Registers `url` and renders the result page.
///
/// The short URL is resolved before the registration so that a request
/// without a usable `Host` header writes nothing.
pub(super) async fn shorten_and_render(
    state: &AppState,
    headers: &HeaderMap,
    url: &str,
    created_by: Option<String>,
) -> Result<ShortLinkTemplate, AppError> {
    if state.public_base_url.is_none() {
        extract_host_from_headers(headers)?;
    }

    let link = state.link_service.register(url, created_by).await?;

    Ok(ShortLinkTemplate {
        short_url: short_url(state.public_base_url.as_deref(), headers, &link.short_slug)?,
        slug: link.short_slug,
        original_url: link.original_url,
    })
}
