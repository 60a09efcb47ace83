use askama::Template;
use askama_web::WebTemplate;
use axum::{http::StatusCode, response::IntoResponse};

#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {}

/// `GET /notfound`, target of redirects for unknown short codes.
pub async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NotFoundTemplate {})
}
