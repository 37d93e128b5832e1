//! Config/entity store seam.
//!
//! Persistence of configuration objects belongs to an external collaborator;
//! the gateway only needs get/save/delete/list. `MemoryStore` is the
//! in-process implementation used by the default binary and the tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

/// A named configuration object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity {
    pub fn new(name: impl Into<String>, data: Value) -> Self {
        Self {
            name: name.into(),
            data,
            updated_at: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid entity: {0}")]
    InvalidEntity(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get(&self, name: &str) -> Result<Entity, StoreError>;
    async fn save(&self, entity: Entity) -> Result<(), StoreError>;
    async fn delete(&self, name: &str) -> Result<(), StoreError>;
    /// All entities, ordered by name
    async fn list(&self) -> Result<Vec<Entity>, StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entities: RwLock<BTreeMap<String, Entity>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn get(&self, name: &str) -> Result<Entity, StoreError> {
        self.entities
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    async fn save(&self, mut entity: Entity) -> Result<(), StoreError> {
        if entity.name.trim().is_empty() {
            return Err(StoreError::InvalidEntity("entity name must not be empty".into()));
        }
        entity.updated_at = Some(Utc::now());
        self.entities.write().await.insert(entity.name.clone(), entity);
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        self.entities
            .write()
            .await
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    async fn list(&self) -> Result<Vec<Entity>, StoreError> {
        Ok(self.entities.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn save_stamps_and_lists_in_name_order() {
        let store = MemoryStore::new();
        store.save(Entity::new("b", json!({"x": 1}))).await.unwrap();
        store.save(Entity::new("a", json!(null))).await.unwrap();

        let all = store.list().await.unwrap();
        let names: Vec<_> = all.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(all.iter().all(|e| e.updated_at.is_some()));
    }

    #[tokio::test]
    async fn missing_entities_report_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(store.get("nope").await, Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete("nope").await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let store = MemoryStore::new();
        let err = store.save(Entity::new("  ", json!({}))).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidEntity(_)));
    }
}
