pub mod auth;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;
pub mod store;

#[cfg(test)]
pub mod testing;
