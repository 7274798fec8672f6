//! In-memory implementation of MenuStore for testing and development

use crate::core::menu::{MenuItem, MenuPatch};
use crate::core::service::MenuStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory menu store implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Items are kept in insertion order; listing reverses it so the contract
/// matches the MongoDB backend (newest first).
#[derive(Clone)]
pub struct InMemoryMenuStore {
    items: Arc<RwLock<Vec<MenuItem>>>,
}

impl InMemoryMenuStore {
    /// Create a new in-memory menu store
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryMenuStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MenuStore for InMemoryMenuStore {
    async fn create(&self, item: MenuItem) -> Result<MenuItem> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        items.push(item.clone());

        Ok(item)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<MenuItem>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items.iter().find(|item| &item.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<MenuItem>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items.iter().rev().cloned().collect())
    }

    async fn update(&self, id: &Uuid, patch: MenuPatch) -> Result<Option<MenuItem>> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(item) = items.iter_mut().find(|item| &item.id == id) else {
            return Ok(None);
        };

        patch.apply(item);

        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let before = items.len();
        items.retain(|item| &item.id != id);

        Ok(items.len() < before)
    }
}
