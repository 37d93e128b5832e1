//! Cluster leadership view.
//!
//! Who the master is gets decided by an external election; this module only
//! reads that decision. [`SharedMasterLocator`] exposes `set_master` as the
//! hook the election side writes through.

pub mod forward;

use std::fmt;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

pub use forward::{CommandForwarder, FORWARD_FAILED};

/// Address of a cluster member
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub ip: String,
    pub port: u16,
}

impl Node {
    pub fn new(ip: impl Into<String>, port: u16) -> Self {
        Self { ip: ip.into(), port }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.ip, self.port)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

/// Read-only view of cluster leadership.
pub trait MasterLocator: Send + Sync {
    /// True when this node is the elected master
    fn is_self(&self) -> bool;
    /// The current master, `None` while no master is known
    fn current(&self) -> Option<Node>;
}

#[derive(Debug)]
pub struct SharedMasterLocator {
    local: Node,
    master: RwLock<Option<Node>>,
}

impl SharedMasterLocator {
    pub fn new(local: Node, master: Option<Node>) -> Self {
        Self {
            local,
            master: RwLock::new(master),
        }
    }

    pub fn local(&self) -> &Node {
        &self.local
    }

    pub fn set_master(&self, master: Option<Node>) {
        tracing::info!(
            "master changed to {}",
            master.as_ref().map(Node::to_string).unwrap_or_else(|| "<none>".into())
        );
        // A poisoned lock still holds a complete Option<Node>.
        *self.master.write().unwrap_or_else(|e| e.into_inner()) = master;
    }
}

impl MasterLocator for SharedMasterLocator {
    fn is_self(&self) -> bool {
        self.current().as_ref() == Some(&self.local)
    }

    fn current(&self) -> Option<Node> {
        self.master.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
