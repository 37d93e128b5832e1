use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::cluster::SharedMasterLocator;
use crate::config::AppConfig;
use crate::routes;
use crate::state::AppState;
use crate::store::MemoryStore;

/// Build the node from `config` and serve until Ctrl-C.
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let locator = Arc::new(SharedMasterLocator::new(
        config.local_node(),
        config.cluster.master.clone(),
    ));
    let state = AppState::new(config, Arc::new(MemoryStore::new()), locator.clone());

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;

    tracing::info!(
        "admin gateway listening on {} as {} (master: {})",
        listener.local_addr()?,
        locator.local(),
        config
            .cluster
            .master
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "unknown".into())
    );

    serve(listener, &state, config.api.enable_request_logging).await
}

/// Serve the gateway for `state` on an already bound listener.
pub async fn serve(listener: TcpListener, state: &AppState, access_log: bool) -> anyhow::Result<()> {
    let app = routes::build(state)?.access_log(access_log).into_router();

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
