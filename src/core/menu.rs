//! The menu item model and its default-value rules
//!
//! Wire field names are the Indonesian names the front-end expects
//! (`nama`, `harga`, `deskripsi`, `gambar`, `kategori`, `status`); the
//! Rust fields keep English names and are renamed via serde.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback description for items created without one.
pub const DEFAULT_DESCRIPTION: &str = "Menu spesial rekomendasi kami.";

/// Fallback category for items created without one.
pub const DEFAULT_CATEGORY: &str = "Makanan";

/// Availability status assigned to every newly created item.
pub const DEFAULT_STATUS: &str = "tersedia";

/// Placeholder image used when no real image is supplied.
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/400x300?text=Menu+Lezat";

/// Minimum length for a manually supplied image URL to be taken verbatim.
/// Shorter strings are trivially-short placeholders and are replaced by
/// [`PLACEHOLDER_IMAGE`].
pub const MIN_IMAGE_URL_LEN: usize = 11;

/// A single menu catalog entry.
///
/// Every optional field has a resolved, non-null value once the item is
/// created; defaults are applied server-side by [`MenuItem::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    /// Unique identifier, assigned at creation and immutable afterwards
    pub id: Uuid,

    #[serde(rename = "nama")]
    pub name: String,

    #[serde(rename = "harga")]
    pub price: f64,

    #[serde(rename = "deskripsi")]
    pub description: String,

    /// Image URL: uploaded, manually supplied, or the placeholder
    #[serde(rename = "gambar")]
    pub image: String,

    #[serde(rename = "kategori")]
    pub category: String,

    /// Free-form availability status; the service enforces no transitions
    pub status: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Build a new item with defaults applied for the omitted fields.
    ///
    /// `name` and `price` must already be validated by the caller; `image`
    /// must already be resolved (uploaded URL, manual URL, or placeholder).
    /// Status is always "tersedia" at creation.
    pub fn new(
        name: String,
        price: f64,
        description: Option<String>,
        category: Option<String>,
        image: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            price,
            description: description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            image,
            category: category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            status: DEFAULT_STATUS.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Resolve a manually supplied image URL against the placeholder.
///
/// URLs shorter than [`MIN_IMAGE_URL_LEN`] are rejected as implausible and
/// replaced by the placeholder.
pub fn resolve_manual_image(url: Option<&str>) -> String {
    match url {
        Some(url) if url.len() >= MIN_IMAGE_URL_LEN => url.to_string(),
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// Coerce a JSON price value into a number.
///
/// Accepts JSON numbers and numeric strings (multipart form fields arrive
/// as text). Returns `None` for anything non-numeric rather than producing
/// a NaN-like value.
pub fn coerce_price(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().filter(|p| p.is_finite()),
        _ => None,
    }
}

/// Incoming request body for create and update operations.
///
/// All fields are optional at the parsing stage; the handlers decide which
/// are required per operation.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MenuPayload {
    #[serde(rename = "nama")]
    pub name: Option<String>,

    /// Kept as a raw JSON value so numeric coercion is explicit
    #[serde(rename = "harga")]
    pub price: Option<serde_json::Value>,

    #[serde(rename = "deskripsi")]
    pub description: Option<String>,

    #[serde(rename = "gambar")]
    pub image: Option<String>,

    #[serde(rename = "kategori")]
    pub category: Option<String>,

    pub status: Option<String>,
}

/// A merge-patch for an existing item: only `Some` fields are written,
/// everything else is left untouched. `id` and `created_at` can never
/// be patched.
#[derive(Debug, Default, Clone)]
pub struct MenuPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

impl MenuPatch {
    /// Apply the patch to an item in place, touching `updated_at`.
    pub fn apply(&self, item: &mut MenuItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(image) = &self.image {
            item.image = image.clone();
        }
        if let Some(category) = &self.category {
            item.category = category.clone();
        }
        if let Some(status) = &self.status {
            item.status = status.clone();
        }
        item.updated_at = Utc::now();
    }
}
