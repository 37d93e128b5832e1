//! Request routing.
//!
//! A [`RouteTable`] resolves (method, path) to a handler, a
//! [`MiddlewareSelector`] picks the path-matched middleware, and a
//! [`Gateway`] ties both together into a servable axum router.

pub mod gateway;
pub mod handler;
pub mod selector;
pub mod table;

pub use gateway::{Gateway, PathParams};
pub use handler::{boxed, with_state, BoxFuture, BoxedHandler, Handler};
pub use selector::{BoxedMiddleware, Middleware, MiddlewareSelector};
pub use table::{Method, Resolution, Route, RouteError, RouteTable};
