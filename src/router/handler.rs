//! Type-erased route handlers.
//!
//! The route table stores handlers of different concrete types side by side,
//! so each one is boxed behind `dyn Handler` and shared through an `Arc`.
//! Any `Fn(Request) -> impl Future<Output = impl IntoResponse>` qualifies.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::Request;
use axum::response::{IntoResponse, Response};

/// Boxed future resolving to a finished response.
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A handler shared across concurrent requests.
pub type BoxedHandler = Arc<dyn Handler>;

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// Box a handler for storage in the route table.
pub fn boxed<H: Handler>(handler: H) -> BoxedHandler {
    Arc::new(handler)
}

/// Adapt a `(state, request)` handler function into a [`Handler`] that
/// carries its own clone of `state`.
pub fn with_state<S, F, Fut, R>(state: &S, f: F) -> BoxedHandler
where
    S: Clone + Send + Sync + 'static,
    F: Fn(S, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    let state = state.clone();
    boxed(move |req: Request| f(state.clone(), req))
}
