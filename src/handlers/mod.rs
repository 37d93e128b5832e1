// handlers/mod.rs - HTTP handlers
//
// Every handler has the shape `async fn(AppState, Request) -> ApiResult<T>`
// and is bound to its route in `routes.rs`.

pub mod auth;     // POST /login
pub mod cluster;  // GET /cluster/master, GET /health
pub mod config;   // /config, /configs
pub mod database; // GET /database/flush
pub mod params;   // required/optional parameter parsing

pub use auth::login;
pub use cluster::{cluster_master, health};
pub use config::{config_delete, config_get, config_list, config_save};
pub use database::database_flush;
