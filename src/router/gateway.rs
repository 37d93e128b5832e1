use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::from_fn,
    response::{IntoResponse, Response},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::middleware::{access_log, panic};
use crate::router::handler::BoxedHandler;
use crate::router::selector::{Middleware, MiddlewareSelector};
use crate::router::table::{Method, Resolution, RouteError, RouteTable};

/// Path parameters captured by the route pattern, available to handlers
/// through request extensions.
#[derive(Debug, Clone, Default)]
pub struct PathParams(pub HashMap<String, String>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// Route table plus middleware bindings, built once at startup and read-only
/// once serving begins.
#[derive(Default)]
pub struct Gateway {
    table: RouteTable,
    middleware: MiddlewareSelector,
    access_log: bool,
}

impl Gateway {
    pub fn new() -> Self {
        Self {
            access_log: true,
            ..Self::default()
        }
    }

    pub fn register(
        &mut self,
        name: &str,
        method: Method,
        pattern: &str,
        handler: BoxedHandler,
    ) -> Result<&mut Self, RouteError> {
        tracing::debug!("registering route {} {} {}", name, method, pattern);
        self.table.register(name, method, pattern, handler)?;
        Ok(self)
    }

    pub fn add_middleware<M: Middleware>(
        &mut self,
        middleware: M,
        path_pattern: &str,
    ) -> Result<&mut Self, RouteError> {
        self.middleware.add_middleware(middleware, path_pattern)?;
        Ok(self)
    }

    pub fn access_log(mut self, enabled: bool) -> Self {
        self.access_log = enabled;
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Freeze the gateway into a servable axum router.
    ///
    /// Layering, outermost first: panic boundary, access recorder, then the
    /// path-selected middleware and the route handler inside `dispatch`.
    pub fn into_router(self) -> Router {
        let access_log_enabled = self.access_log;
        let router = Router::new()
            .fallback(dispatch)
            .with_state(Arc::new(self));

        let router = if access_log_enabled {
            router.layer(from_fn(access_log::record))
        } else {
            router
        };

        router.layer(CatchPanicLayer::custom(panic::panic_response))
    }
}

async fn dispatch(State(gateway): State<Arc<Gateway>>, mut req: Request) -> Response {
    let path = req.uri().path().to_string();

    match gateway.table.resolve(req.method(), &path) {
        Resolution::Matched { route, params } => {
            req.extensions_mut().insert(PathParams(params));
            let handler = gateway.middleware.apply(&path, Arc::clone(&route.handler));
            handler.call(req).await
        }
        Resolution::MethodNotAllowed => {
            tracing::debug!("method {} not allowed on {}", req.method(), path);
            StatusCode::METHOD_NOT_ALLOWED.into_response()
        }
        Resolution::NotFound => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::handler::boxed;
    use crate::testing::CapturedLogs;
    use axum::body::{to_bytes, Body};
    use serde_json::Value;
    use tower::ServiceExt;

    fn get(uri: &str) -> Request {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn gateway() -> Gateway {
        let mut gw = Gateway::new();
        gw.register("hello", Method::Get, "/hello", boxed(|_req: Request| async { "hi" }))
            .unwrap()
            .register(
                "param",
                Method::Get,
                "/items/{id}",
                boxed(|req: Request| async move {
                    req.extensions()
                        .get::<PathParams>()
                        .and_then(|p| p.get("id"))
                        .unwrap_or_default()
                        .to_string()
                }),
            )
            .unwrap()
            .register(
                "boom",
                Method::Get,
                "/boom",
                boxed(|_req: Request| async {
                    if true {
                        panic!("exploded");
                    }
                    "unreachable"
                }),
            )
            .unwrap();
        gw
    }

    #[tokio::test]
    async fn dispatches_to_handler() {
        let resp = gateway().into_router().oneshot(get("/hello/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"hi");
    }

    #[tokio::test]
    async fn path_params_reach_handler() {
        let resp = gateway().into_router().oneshot(get("/items/abc")).await.unwrap();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"abc");
    }

    #[tokio::test]
    async fn unknown_path_and_wrong_method_are_client_errors() {
        let router = gateway().into_router();

        let resp = router.clone().oneshot(get("/nowhere")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let post = Request::builder()
            .method("POST")
            .uri("/hello")
            .body(Body::empty())
            .unwrap();
        let resp = router.oneshot(post).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn panic_becomes_500_json() {
        let router = gateway().into_router();
        let resp = router.clone().oneshot(get("/boom")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let v: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v, Value::String("exploded".into()));

        // the server keeps serving
        let resp = router.oneshot(get("/hello")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn panic_is_logged_as_500() {
        let logs = CapturedLogs::default();
        let _guard = logs.install();

        let resp = gateway().into_router().oneshot(get("/boom")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let lines = logs.access_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("status=500"), "{}", lines[0]);
        assert!(logs.contents().contains("handler panicked: exploded"));
    }

    #[tokio::test]
    async fn selected_middleware_can_short_circuit() {
        let mut gw = gateway();
        gw.add_middleware(
            |_next: BoxedHandler| -> BoxedHandler {
                boxed(|_req: Request| async { StatusCode::FORBIDDEN })
            },
            "^/items",
        )
        .unwrap();
        let router = gw.into_router();

        let resp = router.clone().oneshot(get("/items/1")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let resp = router.oneshot(get("/hello")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
