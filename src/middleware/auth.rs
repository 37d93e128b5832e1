use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderMap},
    response::IntoResponse,
};

use crate::auth::{Claims, Credential, TokenService};
use crate::error::ApiError;
use crate::router::handler::{boxed, BoxedHandler};
use crate::router::selector::Middleware;

/// Authentication gate: only requests carrying a valid token for the
/// configured credential reach the wrapped handler.
///
/// Attached per path through the middleware selector, never globally.
#[derive(Clone)]
pub struct AuthGate {
    tokens: Arc<TokenService>,
    credential: Arc<Credential>,
}

impl AuthGate {
    pub fn new(tokens: Arc<TokenService>, credential: Arc<Credential>) -> Self {
        Self { tokens, credential }
    }

    /// Why a request failed is only logged; the caller just gets 401.
    pub fn check(&self, headers: &HeaderMap) -> Result<Claims, ApiError> {
        let token = extract_token(headers).map_err(|msg| {
            tracing::debug!("authentication rejected: {}", msg);
            ApiError::unauthorized("authentication failed")
        })?;

        self.tokens
            .validate(token, &self.credential)
            .filter(|claims| claims.matches(&self.credential))
            .ok_or_else(|| ApiError::unauthorized("authentication failed"))
    }
}

impl Middleware for AuthGate {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        let gate = self.clone();

        boxed(move |req: Request| {
            let gate = gate.clone();
            let next = next.clone();
            async move {
                match gate.check(req.headers()) {
                    Ok(_) => next.call(req).await,
                    Err(err) => err.into_response(),
                }
            }
        })
    }
}

/// Accepts both a bare token and `Bearer <token>`
fn extract_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or("missing Authorization header")?
        .to_str()
        .map_err(|_| "invalid Authorization header encoding")?
        .trim();

    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        return Err("empty token");
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use chrono::Duration;

    fn gate() -> (AuthGate, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new("admin-gateway", Duration::hours(1)));
        let credential = Arc::new(Credential::new("admin", "secret"));
        (AuthGate::new(tokens.clone(), credential), tokens)
    }

    fn protected(gate: &AuthGate) -> BoxedHandler {
        gate.wrap(boxed(|_req: Request| async { "inner" }))
    }

    fn request(auth: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/config");
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn valid_token_passes_through() {
        let (gate, tokens) = gate();
        let token = tokens.issue(&Credential::new("admin", "secret")).unwrap();

        let resp = protected(&gate).call(request(Some(&token))).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let bearer = format!("Bearer {}", token);
        let resp = protected(&gate).call(request(Some(&bearer))).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_or_foreign_token_is_rejected() {
        let (gate, tokens) = gate();
        let foreign = tokens.issue(&Credential::new("admin", "other")).unwrap();

        for auth in [None, Some(""), Some("garbage"), Some(foreign.as_str())] {
            let resp = protected(&gate).call(request(auth)).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "auth header {:?}", auth);
        }
    }
}
