//! Path-pattern middleware selection.
//!
//! Each binding pairs a regex with a middleware. For a request path every
//! matching binding applies, in registration order (first registered runs
//! outermost).

use std::sync::Arc;

use regex::Regex;

use crate::router::handler::BoxedHandler;
use crate::router::table::RouteError;

/// Wraps a handler into another handler.
pub trait Middleware: Send + Sync + 'static {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler;
}

impl<F> Middleware for F
where
    F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static,
{
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        (self)(next)
    }
}

pub type BoxedMiddleware = Arc<dyn Middleware>;

struct Binding {
    pattern: Regex,
    middleware: BoxedMiddleware,
}

#[derive(Default)]
pub struct MiddlewareSelector {
    bindings: Vec<Binding>,
}

impl MiddlewareSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_middleware<M: Middleware>(
        &mut self,
        middleware: M,
        path_pattern: &str,
    ) -> Result<&mut Self, RouteError> {
        let pattern = Regex::new(path_pattern).map_err(|e| RouteError::InvalidMiddlewarePattern {
            pattern: path_pattern.to_string(),
            reason: e.to_string(),
        })?;

        self.bindings.push(Binding {
            pattern,
            middleware: Arc::new(middleware),
        });
        Ok(self)
    }

    pub fn select_for(&self, path: &str) -> Vec<BoxedMiddleware> {
        self.bindings
            .iter()
            .filter(|b| b.pattern.is_match(path))
            .map(|b| Arc::clone(&b.middleware))
            .collect()
    }

    /// Wrap `handler` in every middleware selected for `path`.
    pub fn apply(&self, path: &str, handler: BoxedHandler) -> BoxedHandler {
        self.select_for(path)
            .iter()
            .rev()
            .fold(handler, |next, mw| mw.wrap(next))
    }
}
