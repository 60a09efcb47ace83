//! Cookie session middleware for the HTML pages.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// The logged-in user, as seen by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub username: String,
}

/// Request extension inserted by [`layer`]. `None` for anonymous visitors.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<SessionUser>);

impl CurrentUser {
    pub fn user_id(&self) -> Option<String> {
        self.0.as_ref().map(|u| u.id.clone())
    }
}

/// Resolves the session cookie into a [`CurrentUser`] extension.
///
/// Never rejects: a missing, forged or expired cookie simply leaves the
/// request anonymous. Pages are not access-restricted; the session is only
/// used to attribute links to their creator.
///
/// # Cookie Format
///
/// ```text
/// Cookie: session=<user_id>.<issued_at>.<mac>
/// ```
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let user = match session_token(req.headers()) {
        Some(token) => resolve_user(&st, &token).await,
        None => None,
    };

    req.extensions_mut().insert(CurrentUser(user));
    next.run(req).await
}

async fn resolve_user(st: &AppState, token: &str) -> Option<SessionUser> {
    let Some(user_id) = st.session_service.verify(token) else {
        debug!("Ignoring invalid or expired session cookie");
        return None;
    };

    match st.account_service.find_by_id(&user_id).await {
        Ok(Some(account)) => Some(SessionUser {
            id: account.id,
            username: account.username,
        }),
        Ok(None) => {
            debug!(user_id = %user_id, "Session refers to an unknown user");
            None
        }
        Err(e) => {
            warn!(error = %e, "Could not load session user");
            None
        }
    }
}

/// Extracts the session token from the `Cookie` header.
///
/// Handles multiple cookies in one header and ignores all but
/// [`SESSION_COOKIE`].
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
}

/// `Set-Cookie` value that stores `token` for `max_age` seconds.
pub fn session_cookie(token: &str, max_age: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}")
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
