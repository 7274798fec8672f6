//! Storage trait for menu items

use crate::core::menu::{MenuItem, MenuPatch};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for persisting menu items
///
/// Implementations provide CRUD operations over a document store. Handlers
/// depend only on this trait, so tests can swap in the in-memory store.
///
/// All single-item operations are atomic at the store level; the service
/// performs no multi-item transactions.
#[async_trait]
pub trait MenuStore: Send + Sync {
    /// Persist a new item and return the stored version
    async fn create(&self, item: MenuItem) -> Result<MenuItem>;

    /// Get an item by id, `None` if it does not exist
    async fn get(&self, id: &Uuid) -> Result<Option<MenuItem>>;

    /// List all items, newest first
    async fn list(&self) -> Result<Vec<MenuItem>>;

    /// Merge-patch an existing item and return the post-update version;
    /// `None` if no item matches the id (never creates one)
    async fn update(&self, id: &Uuid, patch: MenuPatch) -> Result<Option<MenuItem>>;

    /// Delete an item by id; `false` if no item matched
    async fn delete(&self, id: &Uuid) -> Result<bool>;
}
