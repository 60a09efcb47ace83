//! Login, registration and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
};
use tracing::warn;
use validator::Validate;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::forms::CredentialsForm;
use crate::web::middleware::session::{clear_session_cookie, session_cookie};

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {}

#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
struct RegisterTemplate {}

/// `GET /login`
pub async fn login_handler() -> impl IntoResponse {
    LoginTemplate {}
}

/// `GET /register`
pub async fn register_handler() -> impl IntoResponse {
    RegisterTemplate {}
}

/// `POST /login`
///
/// Sets the session cookie and redirects to the dashboard.
///
/// # Errors
///
/// - 400 `validation_error` for an empty username or password
/// - 400 `user_not_found` / `invalid_password` for bad credentials
pub async fn login_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    form.validate()?;

    let account = state
        .account_service
        .authenticate(&form.username, &form.password)
        .await
        .inspect_err(|e| {
            if matches!(e, AppError::UserNotFound | AppError::InvalidPassword) {
                warn!(username = %form.username, reason = %e, "Failed login");
            }
        })?;

    Ok(start_session(&state, &account.id))
}

/// `POST /register`
///
/// Creates the account, then behaves like a successful login.
///
/// # Errors
///
/// - 400 `validation_error` for an empty username or password
/// - 409 `username_taken` if the username exists
pub async fn register_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    form.validate()?;

    let account = state
        .account_service
        .register_account(&form.username, &form.password)
        .await?;

    Ok(start_session(&state, &account.id))
}

/// `GET /logout`
pub async fn logout_handler() -> Response {
    ([(SET_COOKIE, clear_session_cookie())], Redirect::to("/")).into_response()
}

fn start_session(state: &AppState, user_id: &str) -> Response {
    let token = state.session_service.issue(user_id);
    let cookie = session_cookie(&token, state.session_service.ttl_seconds());

    ([(SET_COOKIE, cookie)], Redirect::to("/dashboard")).into_response()
}
