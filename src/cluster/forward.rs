//! Leader-aware command forwarding.
//!
//! Any node accepts a master-only command. The master runs it locally; every
//! other node relays the request to the master over HTTP and mirrors the
//! outcome, so the side effect happens on exactly one node.
//!
//! The relay is always a GET to `http://{ip}:{port}{path_and_query}`,
//! whatever the inbound method was. Peers built against that contract depend
//! on it, so it is kept as is.

use std::future::Future;
use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderMap, Uri};

use crate::cluster::{MasterLocator, Node};
use crate::error::ApiError;

pub const FORWARD_FAILED: &str = "master handle error after forward";
pub const NO_MASTER: &str = "no master available";

#[derive(Clone)]
pub struct CommandForwarder {
    client: reqwest::Client,
    locator: Arc<dyn MasterLocator>,
}

impl CommandForwarder {
    /// Uses a client without a request timeout: a relay waits as long as the
    /// inbound request itself is allowed to.
    pub fn new(locator: Arc<dyn MasterLocator>) -> Self {
        Self::with_client(reqwest::Client::new(), locator)
    }

    pub fn with_client(client: reqwest::Client, locator: Arc<dyn MasterLocator>) -> Self {
        Self { client, locator }
    }

    pub fn locator(&self) -> &Arc<dyn MasterLocator> {
        &self.locator
    }

    /// Run `command` here if this node is master, otherwise relay the
    /// original request to the master.
    ///
    /// Leadership is read fresh on every call. Failed relays are not retried.
    pub async fn run_on_master<F, Fut>(
        &self,
        uri: &Uri,
        headers: &HeaderMap,
        command: F,
    ) -> Result<(), ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), ApiError>>,
    {
        if self.locator.is_self() {
            tracing::debug!("executing {} locally as master", uri.path());
            return command().await;
        }

        let master = self.locator.current().ok_or_else(|| {
            tracing::warn!("cannot forward {}: {}", uri.path(), NO_MASTER);
            ApiError::upstream(NO_MASTER)
        })?;

        self.relay(&master, uri, headers).await
    }

    /// Re-issue the request against `master` and translate its outcome.
    ///
    /// The master's body is always drained and then discarded.
    pub async fn relay(&self, master: &Node, uri: &Uri, headers: &HeaderMap) -> Result<(), ApiError> {
        let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
        let url = format!("{}{}", master.base_url(), target);
        tracing::debug!("forwarding to master: GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(auth) = headers.get(AUTHORIZATION) {
            request = request.header(AUTHORIZATION, auth.clone());
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("forward to {} failed: {}", master, e);
            ApiError::upstream(e.to_string())
        })?;

        let status = response.status();
        if let Err(e) = response.bytes().await {
            tracing::debug!("failed to drain master response: {}", e);
        }

        if status != reqwest::StatusCode::OK {
            tracing::warn!("master {} answered {} for {}", master, status, target);
            return Err(ApiError::upstream(FORWARD_FAILED));
        }

        Ok(())
    }
}
