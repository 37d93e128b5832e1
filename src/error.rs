// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;

use crate::auth::TokenError;
use crate::store::StoreError;

/// Internal classification of a failure.
///
/// The wire contract collapses several of these onto 500; the kind is kept
/// so callers and logs can still tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Unauthorized,
    Upstream,
    Internal,
}

/// HTTP API error with its status mapping and client-facing message
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed request input. Reported as 500 for compatibility.
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    /// A collaborator (store, master relay) failed.
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::InvalidInput(_) => ErrorKind::InvalidInput,
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::Unauthorized(_) => ErrorKind::Unauthorized,
            ApiError::Upstream(_) => ErrorKind::Upstream,
            ApiError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::InvalidInput | ErrorKind::Upstream | ErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidInput(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Upstream(msg)
            | ApiError::Internal(msg) => msg,
        }
    }

    /// Get error code for logs and client handling
    pub fn error_code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Upstream => "UPSTREAM_ERROR",
            ErrorKind::Internal => "INTERNAL_SERVER_ERROR",
        }
    }

    /// JSON body: the message encoded as a JSON string
    pub fn to_json(&self) -> Value {
        Value::String(self.message().to_string())
    }
}

// Static constructor methods
impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput(message.into())
    }

    /// Required parameter `name` was not supplied
    pub fn missing_param(name: &str) -> Self {
        ApiError::InvalidInput(format!("please input {}", name))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        ApiError::Upstream(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(name) => ApiError::not_found(format!("{} not found", name)),
            StoreError::InvalidEntity(msg) => ApiError::invalid_input(msg),
            StoreError::Backend(msg) => {
                tracing::error!("Config store error: {}", msg);
                ApiError::upstream(msg)
            }
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        tracing::error!("Token error: {}", err);
        ApiError::internal_server_error(err.to_string())
    }
}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();

        // 404 carries no body
        if status == StatusCode::NOT_FOUND {
            return status.into_response();
        }

        (status, Json(self.to_json())).into_response()
    }
}
