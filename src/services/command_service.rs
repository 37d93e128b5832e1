use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};

use crate::store::{ConfigStore, StoreError};

/// Master-only administrative commands.
#[async_trait]
pub trait CommandService: Send + Sync {
    async fn flush_database(&self, name: &str) -> Result<(), StoreError>;
}

/// Runs commands against the config store: a database is a config entity,
/// and flushing it stamps `last_flushed_at` on that entity.
pub struct StoreCommandService {
    store: Arc<dyn ConfigStore>,
}

impl StoreCommandService {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommandService for StoreCommandService {
    async fn flush_database(&self, name: &str) -> Result<(), StoreError> {
        let mut entity = self.store.get(name).await?;

        if !entity.data.is_object() {
            entity.data = Value::Object(Map::new());
        }
        entity.data["last_flushed_at"] = Value::String(Utc::now().to_rfc3339());

        self.store.save(entity).await?;
        tracing::info!("flushed database {}", name);
        Ok(())
    }
}
