//! Crate-wide error type and its HTTP representation.
//!
//! Every fallible operation in the service layer returns [`AppError`]. Handlers
//! propagate it with `?` and axum renders it through [`IntoResponse`] as a JSON
//! body:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Short link not found", "details": { "code": "aB3xZ" } } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::repositories::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing input, rejected before any store access.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Unknown short code.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("Username '{username}' is already taken")]
    UsernameTaken { username: String },

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidPassword,

    /// Load or save of the backing document failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn username_taken(username: impl Into<String>) -> Self {
        Self::UsernameTaken {
            username: username.into(),
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::UserNotFound | Self::InvalidPassword => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::UsernameTaken { .. } => StatusCode::CONFLICT,
            Self::Persistence(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its public payload.
    ///
    /// Server-side failures are reported with a generic message; the cause is
    /// only logged.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            Self::Validation { message, details } => ErrorInfo {
                code: "validation_error",
                message: message.clone(),
                details: details.clone(),
            },
            Self::NotFound { message, details } => ErrorInfo {
                code: "not_found",
                message: message.clone(),
                details: details.clone(),
            },
            Self::UsernameTaken { username } => ErrorInfo {
                code: "username_taken",
                message: "User already exists".to_string(),
                details: json!({ "username": username }),
            },
            Self::UserNotFound => ErrorInfo {
                code: "user_not_found",
                message: "User not found".to_string(),
                details: json!({}),
            },
            Self::InvalidPassword => ErrorInfo {
                code: "invalid_password",
                message: "Invalid password".to_string(),
                details: json!({}),
            },
            Self::Persistence(_) => ErrorInfo {
                code: "internal_error",
                message: "Internal server error".to_string(),
                details: json!({}),
            },
            Self::Internal { message, details } => ErrorInfo {
                code: "internal_error",
                message: message.clone(),
                details: details.clone(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
        fields.sort();
        AppError::bad_request("Validation failed", json!({ "fields": fields }))
    }
}
