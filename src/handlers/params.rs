// handlers/params.rs - query/form parameter extraction

use std::collections::HashMap;

use axum::{
    body::to_bytes,
    extract::Request,
    http::{header::CONTENT_TYPE, HeaderMap},
};
use url::form_urlencoded;

use crate::error::ApiError;
use crate::router::Method;

/// Named request parameters: the query string, plus the urlencoded form body
/// for POST/PUT. Form fields win over query fields of the same name.
#[derive(Debug, Default)]
pub struct Params {
    values: HashMap<String, String>,
}

impl Params {
    pub async fn from_request(req: Request, body_limit: usize) -> Result<Self, ApiError> {
        let method = Method::from_http(req.method()).ok_or_else(|| {
            ApiError::invalid_input(format!("unsupported method {}", req.method()))
        })?;

        let mut params = Self::from_query(req.uri().query().unwrap_or(""));

        if matches!(method, Method::Post | Method::Put) && is_form(req.headers()) {
            let body = to_bytes(req.into_body(), body_limit)
                .await
                .map_err(|e| ApiError::invalid_input(format!("failed to read form body: {}", e)))?;
            params.extend(&body);
        }

        Ok(params)
    }

    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        params.extend(query.as_bytes());
        params
    }

    fn extend(&mut self, encoded: &[u8]) {
        for (key, value) in form_urlencoded::parse(encoded) {
            self.values.insert(key.into_owned(), value.into_owned());
        }
    }

    /// Empty values count as missing.
    pub fn optional(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn required(&self, name: &str) -> Result<&str, ApiError> {
        self.optional(name).ok_or_else(|| ApiError::missing_param(name))
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}
