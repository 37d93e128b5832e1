use anyhow::{bail, Context};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::Value;

/// Thin HTTP client for one gateway node
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.header(reqwest::header::AUTHORIZATION, token),
            None => builder,
        }
    }

    /// Send and decode the JSON body. Non-2xx statuses become errors carrying
    /// the server's message; 204 decodes to `Value::Null`.
    pub async fn send(&self, builder: RequestBuilder) -> anyhow::Result<Value> {
        let resp = builder.send().await.context("request failed")?;
        let status = resp.status();
        let body = resp.text().await.context("failed to read response")?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or(body);
            bail!("{} {}", status, message);
        }

        if status == StatusCode::NO_CONTENT || body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).context("response was not JSON")
    }
}
