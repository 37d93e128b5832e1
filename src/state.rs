use std::sync::Arc;

use chrono::Duration;

use crate::auth::{Credential, TokenService};
use crate::cluster::{CommandForwarder, MasterLocator};
use crate::config::AppConfig;
use crate::services::{CommandService, StoreCommandService};
use crate::store::ConfigStore;

/// Collaborators shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ConfigStore>,
    pub commands: Arc<dyn CommandService>,
    pub forwarder: CommandForwarder,
    pub tokens: Arc<TokenService>,
    pub credential: Arc<Credential>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        store: Arc<dyn ConfigStore>,
        locator: Arc<dyn MasterLocator>,
    ) -> Self {
        let lifetime = Duration::hours(config.security.token_expiry_hours as i64);

        Self {
            commands: Arc::new(StoreCommandService::new(store.clone())),
            store,
            forwarder: CommandForwarder::new(locator),
            tokens: Arc::new(TokenService::new(&config.security.token_issuer, lifetime)),
            credential: Arc::new(config.credential()),
            max_body_bytes: config.api.max_request_size_bytes,
        }
    }

    pub fn locator(&self) -> &Arc<dyn MasterLocator> {
        self.forwarder.locator()
    }
}
