// handlers/database.rs - master-only database commands

use axum::extract::Request;

use crate::error::ApiError;
use crate::handlers::params::Params;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /database/flush?name= - flush a database on the master
///
/// Accepted on every node; non-masters relay the request to the master.
pub async fn database_flush(state: AppState, req: Request) -> ApiResult<&'static str> {
    let uri = req.uri().clone();
    let headers = req.headers().clone();

    let params = Params::from_request(req, state.max_body_bytes).await?;
    let name = params.required("name")?;

    state
        .forwarder
        .run_on_master(&uri, &headers, || async {
            state.commands.flush_database(name).await.map_err(ApiError::from)
        })
        .await?;

    Ok(ApiResponse::ok())
}
