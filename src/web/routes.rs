//! HTML page route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    dashboard_handler, dashboard_submit_handler, index_handler, index_submit_handler,
    login_handler, login_submit_handler, logout_handler, not_found_handler, register_handler,
    register_submit_handler,
};
use axum::{Router, routing::get};

/// Page routes. None of them requires a session; handlers receive a
/// [`crate::web::middleware::session::CurrentUser`] extension instead.
///
/// # Endpoints
///
/// - `GET  /`          - Landing page
/// - `POST /`          - Shorten, or navigate via the login / register buttons
/// - `GET  /notfound`  - Page for unknown short codes (404)
/// - `GET  /login`     - Login form
/// - `POST /login`     - Authenticate and start a session
/// - `GET  /register`  - Registration form
/// - `POST /register`  - Create an account and start a session
/// - `GET  /dashboard` - Shorten form and the user's links
/// - `POST /dashboard` - Shorten a URL on behalf of the user
/// - `GET  /logout`    - End the session
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler).post(index_submit_handler))
        .route("/notfound", get(not_found_handler))
        .route("/login", get(login_handler).post(login_submit_handler))
        .route(
            "/register",
            get(register_handler).post(register_submit_handler),
        )
        .route(
            "/dashboard",
            get(dashboard_handler).post(dashboard_submit_handler),
        )
        .route("/logout", get(logout_handler))
}
