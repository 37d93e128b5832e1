// handlers/auth.rs - POST /login handler

use axum::extract::Request;

use crate::auth::Credential;
use crate::error::ApiError;
use crate::handlers::params::Params;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /login - exchange the configured username/password for a token
///
/// Parameters come from the query string or a urlencoded form body.
pub async fn login(state: AppState, req: Request) -> ApiResult<String> {
    let params = Params::from_request(req, state.max_body_bytes).await?;
    let presented = Credential::new(params.required("username")?, params.required("password")?);

    if presented != *state.credential {
        tracing::warn!("login rejected for user '{}'", presented.username);
        return Err(ApiError::unauthorized("username or password is incorrect"));
    }

    let token = state.tokens.issue(&state.credential)?;
    Ok(ApiResponse::success(token))
}
