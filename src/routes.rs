use crate::handlers;
use crate::middleware::AuthGate;
use crate::router::{with_state, Gateway, Method, RouteError};
use crate::state::AppState;

/// Paths that require a token
pub const PROTECTED_PATHS: &str = r"^/(config|configs|database|cluster)(/|$)";

/// Build the gateway served by every node.
pub fn build(state: &AppState) -> Result<Gateway, RouteError> {
    let mut gateway = Gateway::new();

    gateway
        // Public
        .register("health", Method::Get, "/health", with_state(state, handlers::health))?
        .register("login", Method::Post, "/login", with_state(state, handlers::login))?
        // Config entities
        .register("config_get", Method::Get, "/config", with_state(state, handlers::config_get))?
        .register("config_list", Method::Get, "/configs", with_state(state, handlers::config_list))?
        .register("config_save", Method::Post, "/config", with_state(state, handlers::config_save))?
        .register("config_delete", Method::Delete, "/config", with_state(state, handlers::config_delete))?
        // Master-only commands
        .register("database_flush", Method::Get, "/database/flush", with_state(state, handlers::database_flush))?
        // Cluster
        .register("cluster_master", Method::Get, "/cluster/master", with_state(state, handlers::cluster_master))?;

    gateway.add_middleware(
        AuthGate::new(state.tokens.clone(), state.credential.clone()),
        PROTECTED_PATHS,
    )?;

    Ok(gateway)
}
