pub mod auth;
pub mod cluster;
pub mod config;
pub mod database;
