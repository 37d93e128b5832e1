// handlers/cluster.rs - cluster status and health

use axum::extract::Request;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cluster::Node;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MasterStatus {
    pub master: Option<Node>,
    pub is_self: bool,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// GET /cluster/master - who the current master is
pub async fn cluster_master(state: AppState, _req: Request) -> ApiResult<MasterStatus> {
    let locator = state.locator();
    Ok(ApiResponse::success(MasterStatus {
        master: locator.current(),
        is_self: locator.is_self(),
    }))
}

/// GET /health - liveness probe
pub async fn health(_state: AppState, _req: Request) -> ApiResult<Health> {
    Ok(ApiResponse::success(Health {
        status: "ok",
        timestamp: Utc::now(),
    }))
}
