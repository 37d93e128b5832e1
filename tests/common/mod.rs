#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use admin_gateway::cluster::{Node, SharedMasterLocator};
use admin_gateway::config::AppConfig;
use admin_gateway::state::AppState;
use admin_gateway::store::MemoryStore;
use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode, Uri},
    Router,
};
use tokio::net::TcpListener;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";

/// A gateway node running in-process on an ephemeral port
pub struct TestNode {
    pub node: Node,
    pub base_url: String,
    pub state: AppState,
    pub locator: Arc<SharedMasterLocator>,
}

impl TestNode {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn token(&self) -> String {
        self.state
            .tokens
            .issue(&self.state.credential)
            .expect("token issue")
    }
}

fn test_config(password: &str) -> AppConfig {
    let mut config = AppConfig::from_env();
    config.security.username = USERNAME.to_string();
    config.security.password = password.to_string();
    config.security.token_issuer = "admin-gateway".to_string();
    config
}

async fn bind() -> Result<(TcpListener, Node)> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let port = listener.local_addr()?.port();
    Ok((listener, Node::new("127.0.0.1", port)))
}

/// Start a node. `master` of `None` with `is_master` true makes the node its
/// own master.
pub async fn spawn_node_with_password(
    master: Option<Node>,
    is_master: bool,
    password: &str,
) -> Result<TestNode> {
    let (listener, node) = bind().await?;
    let master = if is_master { Some(node.clone()) } else { master };

    let locator = Arc::new(SharedMasterLocator::new(node.clone(), master));
    let state = AppState::new(&test_config(password), Arc::new(MemoryStore::new()), locator.clone());

    let served = state.clone();
    tokio::spawn(async move {
        if let Err(e) = admin_gateway::server::serve(listener, &served, true).await {
            eprintln!("test node stopped: {e}");
        }
    });

    Ok(TestNode {
        base_url: node.base_url(),
        node,
        state,
        locator,
    })
}

pub async fn spawn_master() -> Result<TestNode> {
    spawn_node_with_password(None, true, PASSWORD).await
}

pub async fn spawn_follower(master: Option<Node>) -> Result<TestNode> {
    spawn_node_with_password(master, false, PASSWORD).await
}

/// One request as seen by a [`FakeMaster`]
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: Method,
    pub uri: String,
    pub authorization: Option<String>,
}

/// Stand-in master that answers every request with a fixed status
pub struct FakeMaster {
    pub node: Node,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl FakeMaster {
    pub async fn spawn(status: StatusCode) -> Result<Self> {
        let (listener, node) = bind().await?;
        let seen = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new()
            .fallback(record)
            .with_state((seen.clone(), status));

        tokio::spawn(async move {
            let _ = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await;
        });

        Ok(Self { node, seen })
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

async fn record(
    State((seen, status)): State<(Arc<Mutex<Vec<SeenRequest>>>, StatusCode)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> (StatusCode, &'static str) {
    seen.lock().unwrap().push(SeenRequest {
        method,
        uri: uri.to_string(),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    (status, "\"master says hi\"")
}

/// A node address nothing listens on
pub fn dead_node() -> Node {
    let port = portpicker::pick_unused_port().expect("no free port");
    Node::new("127.0.0.1", port)
}
