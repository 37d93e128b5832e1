//! Route table: (method, path pattern) -> handler.
//!
//! Patterns use `{name}` segments for path parameters. Lookups ignore a
//! trailing slash on either side. The table is filled once during startup and
//! only read afterwards.

use std::collections::HashMap;
use std::fmt;

use crate::router::handler::BoxedHandler;

/// HTTP methods a route can be registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// `None` for anything outside GET/POST/PUT/DELETE
    pub fn from_http(method: &axum::http::Method) -> Option<Self> {
        match *method {
            axum::http::Method::GET => Some(Method::Get),
            axum::http::Method::POST => Some(Method::Post),
            axum::http::Method::PUT => Some(Method::Put),
            axum::http::Method::DELETE => Some(Method::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct Route {
    pub name: String,
    pub method: Method,
    pub pattern: String,
    pub handler: BoxedHandler,
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("invalid middleware pattern `{pattern}`: {reason}")]
    InvalidMiddlewarePattern { pattern: String, reason: String },
}

/// Outcome of resolving a request against the table
#[derive(Debug)]
pub enum Resolution<'a> {
    Matched {
        route: &'a Route,
        params: HashMap<String, String>,
    },
    /// The path exists but not for this method
    MethodNotAllowed,
    NotFound,
}

#[derive(Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    /// normalized pattern -> method -> index into `routes`
    methods: HashMap<String, HashMap<Method, usize>>,
    tree: matchit::Router<String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route.
    ///
    /// Registering the same (method, pattern) twice replaces the earlier
    /// handler; callers should not rely on that.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        method: Method,
        pattern: &str,
        handler: BoxedHandler,
    ) -> Result<&mut Self, RouteError> {
        let pattern = normalize(pattern).to_string();

        if !self.methods.contains_key(&pattern) {
            self.tree
                .insert(pattern.clone(), pattern.clone())
                .map_err(|e| RouteError::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })?;
        }

        let index = self.routes.len();
        self.routes.push(Route {
            name: name.into(),
            method,
            pattern: pattern.clone(),
            handler,
        });
        self.methods.entry(pattern).or_default().insert(method, index);

        Ok(self)
    }

    pub fn resolve(&self, method: &axum::http::Method, path: &str) -> Resolution<'_> {
        let Ok(matched) = self.tree.at(normalize(path)) else {
            return Resolution::NotFound;
        };

        let route = Method::from_http(method)
            .and_then(|m| self.methods.get(matched.value)?.get(&m))
            .map(|&index| &self.routes[index]);

        match route {
            Some(route) => Resolution::Matched {
                route,
                params: matched
                    .params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            },
            None => Resolution::MethodNotAllowed,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::handler::boxed;
    use axum::http::Method as HttpMethod;

    fn noop() -> BoxedHandler {
        boxed(|_req: axum::extract::Request| async { "ok" })
    }

    fn table() -> RouteTable {
        let mut table = RouteTable::new();
        table
            .register("config_get", Method::Get, "/config", noop())
            .unwrap()
            .register("config_delete", Method::Delete, "/config", noop())
            .unwrap()
            .register("node", Method::Get, "/nodes/{id}", noop())
            .unwrap()
            .register("root", Method::Get, "/", noop())
            .unwrap();
        table
    }

    fn matched_name(res: Resolution<'_>) -> Option<String> {
        match res {
            Resolution::Matched { route, .. } => Some(route.name.clone()),
            _ => None,
        }
    }

    #[test]
    fn every_registered_route_resolves() {
        let table = table();
        for route in table.routes() {
            let method = HttpMethod::from_bytes(route.method.as_str().as_bytes()).unwrap();
            let path = route.pattern.replace("{id}", "7");
            assert_eq!(matched_name(table.resolve(&method, &path)), Some(route.name.clone()));
        }
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let table = table();
        assert_eq!(
            matched_name(table.resolve(&HttpMethod::GET, "/config/")),
            Some("config_get".to_string())
        );
        assert_eq!(matched_name(table.resolve(&HttpMethod::GET, "/")), Some("root".to_string()));
    }

    #[test]
    fn path_params_are_captured() {
        let table = table();
        match table.resolve(&HttpMethod::GET, "/nodes/42") {
            Resolution::Matched { params, .. } => assert_eq!(params["id"], "42"),
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn wrong_method_is_distinct_from_unknown_path() {
        let table = table();
        assert!(matches!(
            table.resolve(&HttpMethod::POST, "/config"),
            Resolution::MethodNotAllowed
        ));
        assert!(matches!(
            table.resolve(&HttpMethod::PATCH, "/config"),
            Resolution::MethodNotAllowed
        ));
        assert!(matches!(table.resolve(&HttpMethod::GET, "/missing"), Resolution::NotFound));
    }

    #[test]
    fn duplicate_registration_last_wins() {
        let mut table = table();
        table.register("config_get_v2", Method::Get, "/config/", noop()).unwrap();
        assert_eq!(
            matched_name(table.resolve(&HttpMethod::GET, "/config")),
            Some("config_get_v2".to_string())
        );
    }

    #[test]
    fn malformed_pattern_is_an_error() {
        let mut table = table();
        assert!(matches!(
            table.register("bad", Method::Get, "/files/{*path}/edit", noop()),
            Err(RouteError::InvalidPattern { .. })
        ));
    }
}
