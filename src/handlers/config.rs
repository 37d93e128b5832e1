// handlers/config.rs - config entity CRUD handlers

use axum::{body::to_bytes, extract::Request};

use crate::error::ApiError;
use crate::handlers::params::Params;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::store::Entity;

/// GET /config?name= - fetch one config entity (404 when absent)
pub async fn config_get(state: AppState, req: Request) -> ApiResult<Entity> {
    let params = Params::from_request(req, state.max_body_bytes).await?;
    let entity = state.store.get(params.required("name")?).await?;
    Ok(ApiResponse::success(entity))
}

/// GET /configs - all config entities, ordered by name
pub async fn config_list(state: AppState, _req: Request) -> ApiResult<Vec<Entity>> {
    Ok(ApiResponse::success(state.store.list().await?))
}

/// POST /config - create or replace an entity from its JSON body
pub async fn config_save(state: AppState, req: Request) -> ApiResult<&'static str> {
    let body = to_bytes(req.into_body(), state.max_body_bytes)
        .await
        .map_err(|e| ApiError::invalid_input(format!("failed to read body: {}", e)))?;

    let entity: Entity = serde_json::from_slice(&body)
        .map_err(|e| ApiError::invalid_input(format!("invalid config body: {}", e)))?;

    tracing::info!("saving config '{}'", entity.name);
    state.store.save(entity).await?;
    Ok(ApiResponse::ok())
}

/// DELETE /config?name= - remove an entity (204, or 404 when absent)
pub async fn config_delete(state: AppState, req: Request) -> ApiResult<()> {
    let params = Params::from_request(req, state.max_body_bytes).await?;
    let name = params.required("name")?;

    state.store.delete(name).await?;
    tracing::info!("deleted config '{}'", name);
    Ok(ApiResponse::no_content())
}
