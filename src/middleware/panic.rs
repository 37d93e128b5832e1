//! Panic boundary.
//!
//! The only place where an unexpected fault turns into a normal response.
//! Installed as the outermost layer via `tower_http`'s `CatchPanicLayer`;
//! everywhere else failures travel as `ApiError` values.

use std::any::Any;
use std::error::Error;
use std::io;

use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

pub const UNKNOWN_ERROR: &str = "unknown error";

/// Turn a panic payload into the 500 error carried back to the client.
///
/// Error values keep their message, strings are wrapped, anything else
/// becomes a generic message.
pub fn classify(payload: Box<dyn Any + Send + 'static>) -> ApiError {
    let payload = match payload.downcast::<ApiError>() {
        Ok(err) => return ApiError::internal_server_error(err.message()),
        Err(other) => other,
    };
    let payload = match payload.downcast::<Box<dyn Error + Send + Sync>>() {
        Ok(err) => return ApiError::internal_server_error(err.to_string()),
        Err(other) => other,
    };
    let payload = match payload.downcast::<anyhow::Error>() {
        Ok(err) => return ApiError::internal_server_error(err.to_string()),
        Err(other) => other,
    };
    let payload = match payload.downcast::<io::Error>() {
        Ok(err) => return ApiError::internal_server_error(err.to_string()),
        Err(other) => other,
    };

    if let Some(msg) = payload.downcast_ref::<String>() {
        ApiError::internal_server_error(msg.clone())
    } else if let Some(msg) = payload.downcast_ref::<&'static str>() {
        ApiError::internal_server_error(*msg)
    } else {
        ApiError::internal_server_error(UNKNOWN_ERROR)
    }
}

pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let error = classify(payload);
    tracing::error!(code = error.error_code(), "handler panicked: {}", error);
    error.into_response()
}
