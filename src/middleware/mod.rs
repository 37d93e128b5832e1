pub mod access_log;
pub mod auth;
pub mod panic;
pub mod response;

pub use auth::AuthGate;
pub use response::{ApiResponse, ApiResult};
