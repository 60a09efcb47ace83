//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Data file readable
/// - **503 Service Unavailable**: Data file cannot be loaded or parsed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": {
///       "status": "ok",
///       "message": "Readable, 2 users, 5 links"
///     }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;

    let healthy = store_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { store: store_check },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Loads the snapshot and reports the table sizes.
async fn check_store(state: &AppState) -> CheckStatus {
    match state.store.load().await {
        Ok(snapshot) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!(
                "Readable, {} users, {} links",
                snapshot.users_table.len(),
                snapshot.links_table.len()
            )),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Store error: {}", e)),
        },
    }
}
