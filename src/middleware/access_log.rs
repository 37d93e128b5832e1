//! Access recorder: one structured log line per request.
//!
//! The line is written when the response body has been fully handed off
//! (or dropped), so `bytes` reflects what was actually produced. If the inner
//! handler never produces a response the record is dropped with its default
//! status of 500, matching what the panic boundary sends. On that path the
//! error body is produced outside the recorder, so `bytes` stays 0.

use std::borrow::Cow;
use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::{Body, HttpBody},
    extract::{ConnectInfo, Request},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use futures::TryStreamExt;
use percent_encoding::percent_decode_str;

struct AccessRecord {
    client_ip: String,
    method: String,
    path: String,
    version: String,
    status: u16,
    bytes: u64,
    started: Instant,
}

impl AccessRecord {
    fn begin(req: &Request) -> Self {
        Self {
            client_ip: client_ip(req),
            method: req.method().to_string(),
            path: decode_path(req.uri().path()).into_owned(),
            version: format!("{:?}", req.version()),
            status: 500,
            bytes: 0,
            started: Instant::now(),
        }
    }
}

impl Drop for AccessRecord {
    fn drop(&mut self) {
        tracing::info!(
            client_ip = %self.client_ip,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            method = %self.method,
            path = %self.path,
            version = %self.version,
            status = self.status,
            bytes = self.bytes,
            "access"
        );
    }
}

pub async fn record(req: Request, next: Next) -> Response {
    let mut record = AccessRecord::begin(&req);

    let response = next.run(req).await;
    record.status = response.status().as_u16();

    if let Some(len) = response.body().size_hint().exact() {
        record.bytes = len;
        return response;
    }

    // Streaming body: count as chunks go out, log when the stream is dropped.
    let (parts, body) = response.into_parts();
    let counted = body.into_data_stream().inspect_ok(move |chunk| {
        // Capture the whole record so it lives (and logs) as long as the stream.
        let record = &mut record;
        record.bytes += chunk.len() as u64;
    });
    Response::from_parts(parts, Body::from_stream(counted))
}

/// `X-Real-Ip`, then the first `X-Forwarded-For` hop, then the peer address.
pub fn client_ip(req: &Request) -> String {
    if let Some(ip) = forwarded_ip(req.headers()) {
        return ip;
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(ip) = header("x-real-ip") {
        return Some(ip.to_string());
    }

    header("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Percent-decoded path, or the raw path when it does not decode to UTF-8.
pub fn decode_path(path: &str) -> Cow<'_, str> {
    match percent_decode_str(path).decode_utf8() {
        Ok(decoded) => decoded,
        Err(_) => Cow::Borrowed(path),
    }
}
