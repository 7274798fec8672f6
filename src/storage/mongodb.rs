//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides [`MongoMenuStore`], a [`MenuStore`] implementation backed by a
//! MongoDB collection, and [`MongoConnection`], a lazily-established
//! connection manager.
//!
//! # Connection model
//!
//! The database session is opened on first use, not at startup. Every
//! store call goes through [`MongoConnection::database`], which is
//! idempotent: once a session exists it is reused. A missing connection
//! string does not crash the process; store calls fail with a storage
//! error until one is configured (degraded mode).
//!
//! # Serialization strategy
//!
//! Items are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents. This ensures consistent handling of
//! UUID (stored as strings) and DateTime (stored as ISO 8601 strings)
//! types. The `id` field is mapped to MongoDB's `_id` convention.

use crate::core::menu::{MenuItem, MenuPatch};
use crate::core::service::MenuStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Database};
use std::sync::Arc;
use tokio::sync::OnceCell;
use uuid::Uuid;

/// Collection holding all menu items.
const COLLECTION: &str = "menus";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON
/// Document, renaming `id` → `_id` for MongoDB convention.
fn json_to_document(json: serde_json::Value) -> Result<Document> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    // MongoDB convention: rename id → _id
    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value,
/// renaming `_id` → `id` for domain convention.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

/// Convert a UUID to its BSON string representation for queries.
fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

/// Build a `$set` document from a merge-patch, touching `updated_at`.
///
/// Only present fields appear in the document, so omitted fields are left
/// untouched by the update.
fn patch_to_set_document(patch: &MenuPatch) -> Result<Document> {
    let mut set = Document::new();

    if let Some(name) = &patch.name {
        set.insert("nama", name);
    }
    if let Some(price) = patch.price {
        set.insert("harga", price);
    }
    if let Some(description) = &patch.description {
        set.insert("deskripsi", description);
    }
    if let Some(image) = &patch.image {
        set.insert("gambar", image);
    }
    if let Some(category) = &patch.category {
        set.insert("kategori", category);
    }
    if let Some(status) = &patch.status {
        set.insert("status", status);
    }

    // Serialized through serde so the format matches stored documents
    let now = mongodb::bson::to_bson(&Utc::now())
        .map_err(|e| anyhow!("Failed to serialize timestamp: {}", e))?;
    set.insert("updated_at", now);

    Ok(set)
}

// ---------------------------------------------------------------------------
// MongoConnection
// ---------------------------------------------------------------------------

/// Lazily-established MongoDB connection.
///
/// Safe to share across request tasks. A benign race on first use may
/// start two concurrent connection attempts; the loser's handle is
/// dropped and only one session is kept.
pub struct MongoConnection {
    uri: Option<String>,
    database_name: String,
    database: OnceCell<Database>,
}

impl MongoConnection {
    /// Create a connection manager. `uri` may be absent (degraded mode);
    /// every database access then fails until the service is restarted
    /// with a connection string.
    pub fn new(uri: Option<String>, database_name: impl Into<String>) -> Self {
        Self {
            uri,
            database_name: database_name.into(),
            database: OnceCell::new(),
        }
    }

    /// Get the live database session, opening it on first use.
    ///
    /// Idempotent: subsequent calls return the established session.
    pub async fn database(&self) -> Result<&Database> {
        let uri = self
            .uri
            .as_deref()
            .ok_or_else(|| anyhow!("MONGO_URI is not configured"))?;

        self.database
            .get_or_try_init(|| async {
                let client = Client::with_uri_str(uri)
                    .await
                    .map_err(|e| anyhow!("Failed to connect to MongoDB: {}", e))?;
                tracing::info!(database = %self.database_name, "connected to MongoDB");
                Ok(client.database(&self.database_name))
            })
            .await
    }
}

// ---------------------------------------------------------------------------
// MongoMenuStore
// ---------------------------------------------------------------------------

/// Menu storage backed by MongoDB.
///
/// Items live in the `menus` collection, keyed by the item UUID stored as
/// a string `_id`. Listing sorts by `created_at` descending (newest
/// first).
#[derive(Clone)]
pub struct MongoMenuStore {
    connection: Arc<MongoConnection>,
}

impl MongoMenuStore {
    /// Create a new store over the given connection manager.
    pub fn new(connection: Arc<MongoConnection>) -> Self {
        Self { connection }
    }

    async fn collection(&self) -> Result<mongodb::Collection<Document>> {
        Ok(self.connection.database().await?.collection(COLLECTION))
    }

    fn item_to_document(item: &MenuItem) -> Result<Document> {
        let json = serde_json::to_value(item)
            .map_err(|e| anyhow!("Failed to serialize menu item: {}", e))?;
        json_to_document(json)
    }

    fn document_to_item(doc: Document) -> Result<MenuItem> {
        let json = document_to_json(doc);
        serde_json::from_value(json)
            .map_err(|e| anyhow!("Failed to deserialize menu item from document: {}", e))
    }
}

#[async_trait]
impl MenuStore for MongoMenuStore {
    /// Insert a new item and read it back to return the stored version.
    async fn create(&self, item: MenuItem) -> Result<MenuItem> {
        let doc = Self::item_to_document(&item)?;
        let id_bson = uuid_bson(&item.id);
        let collection = self.collection().await?;

        collection
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to create menu item: {}", e))?;

        let result = collection
            .find_one(doc! { "_id": id_bson })
            .await
            .map_err(|e| anyhow!("Failed to read back created menu item: {}", e))?
            .ok_or_else(|| anyhow!("Menu item not found after insert"))?;

        Self::document_to_item(result)
    }

    /// Fetch an item by UUID. Returns `Ok(None)` if it does not exist.
    async fn get(&self, id: &Uuid) -> Result<Option<MenuItem>> {
        let doc = self
            .collection()
            .await?
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to get menu item: {}", e))?;

        match doc {
            Some(d) => Ok(Some(Self::document_to_item(d)?)),
            None => Ok(None),
        }
    }

    /// List all items, ordered by creation time (newest first).
    async fn list(&self) -> Result<Vec<MenuItem>> {
        let cursor = self
            .collection()
            .await?
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| anyhow!("Failed to list menu items: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect menu items: {}", e))?;

        docs.into_iter().map(Self::document_to_item).collect()
    }

    /// Apply a merge-patch via `$set`, so only supplied fields change.
    ///
    /// Returns the post-update item, or `Ok(None)` when no document
    /// matched. Never upserts.
    async fn update(&self, id: &Uuid, patch: MenuPatch) -> Result<Option<MenuItem>> {
        let set = patch_to_set_document(&patch)?;

        let updated = self
            .collection()
            .await?
            .find_one_and_update(doc! { "_id": uuid_bson(id) }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| anyhow!("Failed to update menu item: {}", e))?;

        match updated {
            Some(d) => Ok(Some(Self::document_to_item(d)?)),
            None => Ok(None),
        }
    }

    /// Delete an item by UUID. Returns `false` when nothing matched so the
    /// handler can answer 404 instead of a silent success.
    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let result = self
            .collection()
            .await?
            .delete_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to delete menu item: {}", e))?;

        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::menu::PLACEHOLDER_IMAGE;
    use serde_json::json;

    // -----------------------------------------------------------------------
    // json_to_document / document_to_json
    // -----------------------------------------------------------------------

    #[test]
    fn json_to_document_renames_id_to_underscore_id() {
        let input = json!({"id": "abc", "nama": "Nasi Goreng"});
        let doc = json_to_document(input).unwrap();

        assert!(doc.contains_key("_id"), "document should contain _id");
        assert!(!doc.contains_key("id"), "document should not contain id");
        assert_eq!(doc.get_str("_id").unwrap(), "abc");
    }

    #[test]
    fn json_to_document_non_object_returns_error() {
        let result = json_to_document(json!("string"));

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(
            err_msg.contains("non-object"),
            "error should mention non-object, got: {err_msg}"
        );
    }

    #[test]
    fn document_to_json_renames_underscore_id_to_id() {
        let doc = doc! { "_id": "abc", "nama": "Nasi Goreng", "harga": 15000.0 };
        let json = document_to_json(doc);

        assert_eq!(json["id"], "abc");
        assert_eq!(json["nama"], "Nasi Goreng");
        assert_eq!(json["harga"], 15000.0);
        assert!(json.get("_id").is_none(), "json should not contain _id");
    }

    #[test]
    fn menu_item_document_roundtrip() {
        let item = MenuItem::new(
            "Nasi Goreng".to_string(),
            15000.0,
            None,
            None,
            PLACEHOLDER_IMAGE.to_string(),
        );

        let doc = MongoMenuStore::item_to_document(&item).unwrap();
        assert_eq!(doc.get_str("_id").unwrap(), item.id.to_string());
        assert_eq!(doc.get_str("nama").unwrap(), "Nasi Goreng");

        let back = MongoMenuStore::document_to_item(doc).unwrap();
        assert_eq!(back.id, item.id);
        assert_eq!(back.name, item.name);
        assert_eq!(back.price, item.price);
        assert_eq!(back.status, item.status);
    }

    // -----------------------------------------------------------------------
    // patch_to_set_document
    // -----------------------------------------------------------------------

    #[test]
    fn patch_to_set_document_contains_only_supplied_fields() {
        let patch = MenuPatch {
            price: Some(17000.0),
            ..Default::default()
        };
        let set = patch_to_set_document(&patch).unwrap();

        assert_eq!(set.get_f64("harga").unwrap(), 17000.0);
        assert!(set.contains_key("updated_at"));
        assert!(!set.contains_key("nama"));
        assert!(!set.contains_key("deskripsi"));
        assert!(!set.contains_key("gambar"));
        assert!(!set.contains_key("kategori"));
        assert!(!set.contains_key("status"));
        assert!(!set.contains_key("_id"));
    }

    #[test]
    fn patch_to_set_document_never_touches_id_or_created_at() {
        let patch = MenuPatch {
            name: Some("Mie Goreng".to_string()),
            status: Some("habis".to_string()),
            ..Default::default()
        };
        let set = patch_to_set_document(&patch).unwrap();

        assert_eq!(set.get_str("nama").unwrap(), "Mie Goreng");
        assert_eq!(set.get_str("status").unwrap(), "habis");
        assert!(!set.contains_key("_id"));
        assert!(!set.contains_key("id"));
        assert!(!set.contains_key("created_at"));
    }

    // -----------------------------------------------------------------------
    // MongoConnection (degraded mode)
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn connection_without_uri_fails_without_panicking() {
        let connection = MongoConnection::new(None, "menu_service");
        let err = connection.database().await.unwrap_err();
        assert!(err.to_string().contains("MONGO_URI"));
    }

    #[tokio::test]
    async fn store_without_uri_surfaces_storage_error() {
        let store = MongoMenuStore::new(Arc::new(MongoConnection::new(None, "menu_service")));
        let err = store.list().await.unwrap_err();
        assert!(err.to_string().contains("MONGO_URI"));
    }
}
