//! Landing page: shorten form plus login / register buttons.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::forms::{IndexAction, IndexForm};
use crate::web::handlers::short_link::shorten_and_render;
use crate::web::middleware::session::CurrentUser;

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub username: Option<String>,
}

/// `GET /`
pub async fn index_handler(Extension(current): Extension<CurrentUser>) -> impl IntoResponse {
    IndexTemplate {
        username: current.0.map(|u| u.username),
    }
}

/// `POST /`
///
/// The `login` and `register` buttons redirect to their pages; a `url`
/// field is shortened like on the dashboard.
///
/// # Errors
///
/// Returns 400 Bad Request if the form carries neither a button nor a URL,
/// or the URL is empty.
pub async fn index_submit_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    headers: HeaderMap,
    Form(form): Form<IndexForm>,
) -> Result<Response, AppError> {
    match form.action() {
        Some(IndexAction::GoToLogin) => Ok(Redirect::to("/login").into_response()),
        Some(IndexAction::GoToRegister) => Ok(Redirect::to("/register").into_response()),
        Some(IndexAction::Shorten(url)) => {
            let page = shorten_and_render(&state, &headers, &url, current.user_id()).await?;
            Ok(page.into_response())
        }
        None => Err(AppError::bad_request("URL is required", json!({}))),
    }
}
