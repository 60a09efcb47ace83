//! Dashboard: the shorten form and the current user's links.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, Form, extract::State, http::HeaderMap, response::IntoResponse};

use crate::domain::entities::LinkRecord;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::forms::ShortenForm;
use crate::web::handlers::short_link::{ShortLinkTemplate, shorten_and_render};
use crate::web::middleware::session::CurrentUser;

/// Renders `templates/dashboard.html`.
///
/// Anonymous visitors get the form and an empty list.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub username: Option<String>,
    pub links: Vec<LinkRecord>,
}

/// `GET /dashboard`
///
/// # Errors
///
/// Returns 500 if the data file cannot be read.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let (username, links) = match current.0 {
        Some(user) => {
            let links = state.link_service.links_created_by(&user.id).await?;
            (Some(user.username), links)
        }
        None => (None, Vec::new()),
    };

    Ok(DashboardTemplate { username, links })
}

/// `POST /dashboard`
///
/// Shortens `url`, recording the session user as creator.
///
/// # Errors
///
/// Returns 400 Bad Request for an empty URL or a missing `Host` header.
pub async fn dashboard_submit_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    headers: HeaderMap,
    Form(form): Form<ShortenForm>,
) -> Result<ShortLinkTemplate, AppError> {
    shorten_and_render(&state, &headers, &form.url, current.user_id()).await
}
