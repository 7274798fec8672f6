//! HTTP handlers for menu CRUD operations
//!
//! Each handler isolates its own failures and responds independently; a
//! failure in one request never affects others. No retries are performed
//! anywhere — transient store or provider failures surface immediately to
//! the caller.

use axum::Json;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::MenuError;
use crate::core::menu::{MenuItem, MenuPatch, MenuPayload, coerce_price, resolve_manual_image};
use crate::core::service::MenuStore;
use crate::server::payload::{UploadedImage, parse_menu_request};
use crate::upload::ImageUploader;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MenuStore>,
    pub uploader: Arc<dyn ImageUploader>,
}

/// Response for mutations that return the affected item
#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub message: String,
    pub data: MenuItem,
}

/// Response for mutations without a payload
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Readiness probe
///
/// GET /
pub async fn readiness() -> &'static str {
    "Menu Service Ready"
}

/// List all menu items, newest first
///
/// GET /menu
pub async fn list_menu(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>, MenuError> {
    let items = state.store.list().await.map_err(MenuError::storage)?;

    Ok(Json(items))
}

/// Create a menu item
///
/// POST /menu
///
/// Accepts JSON or multipart. `nama` and `harga` are required; the other
/// fields fall back to server-side defaults. An attached image file is
/// pushed to the upload provider and its URL wins over any manually
/// supplied one.
pub async fn create_menu(
    State(state): State<AppState>,
    request: Request,
) -> Result<(StatusCode, Json<MenuResponse>), MenuError> {
    let (payload, file) = parse_menu_request(request).await?;

    let name = payload.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() || !price_supplied(&payload) {
        return Err(MenuError::validation("Nama dan Harga wajib diisi!"));
    }

    let price = payload
        .price
        .as_ref()
        .and_then(coerce_price)
        .ok_or_else(|| MenuError::validation("Harga harus berupa angka"))?;

    let image = match file {
        Some(file) => upload_image(&state, file).await?,
        None => resolve_manual_image(payload.image.as_deref()),
    };

    let item = MenuItem::new(
        name.to_string(),
        price,
        payload.description,
        payload.category,
        image,
    );

    let created = state.store.create(item).await.map_err(MenuError::storage)?;
    tracing::info!(id = %created.id, nama = %created.name, "menu created");

    Ok((
        StatusCode::CREATED,
        Json(MenuResponse {
            message: "Berhasil disimpan".to_string(),
            data: created,
        }),
    ))
}

/// Update a menu item (merge-patch)
///
/// PUT /menu/{id}
///
/// Only supplied fields change. An attached file is uploaded first and
/// overwrites the image; an upload failure fails the whole request so a
/// stale image reference is never silently kept. A non-empty manual URL
/// is used when no file is attached; otherwise the image is untouched.
pub async fn update_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<MenuResponse>, MenuError> {
    let id = parse_menu_id(&id)?;
    let (payload, file) = parse_menu_request(request).await?;

    let has_price = price_supplied(&payload);

    let mut patch = MenuPatch {
        name: payload.name,
        description: payload.description,
        category: payload.category,
        status: payload.status,
        ..Default::default()
    };

    if has_price {
        let price = payload
            .price
            .as_ref()
            .and_then(coerce_price)
            .ok_or_else(|| MenuError::validation("Harga harus berupa angka"))?;
        patch.price = Some(price);
    }

    patch.image = match file {
        Some(file) => Some(upload_image(&state, file).await?),
        None => payload.image.filter(|url| !url.trim().is_empty()),
    };

    let updated = state
        .store
        .update(&id, patch)
        .await
        .map_err(MenuError::storage)?
        .ok_or(MenuError::NotFound { id })?;

    tracing::info!(id = %updated.id, nama = %updated.name, "menu updated");

    Ok(Json(MenuResponse {
        message: "Menu berhasil diperbarui".to_string(),
        data: updated,
    }))
}

/// Delete a menu item
///
/// DELETE /menu/{id}
///
/// A zero-row delete is a 404, never a silent success.
pub async fn delete_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, MenuError> {
    let id = parse_menu_id(&id)?;

    let deleted = state.store.delete(&id).await.map_err(MenuError::storage)?;
    if !deleted {
        return Err(MenuError::NotFound { id });
    }

    tracing::info!(%id, "menu deleted");

    Ok(Json(MessageResponse {
        message: "Menu dihapus".to_string(),
    }))
}

/// Validate the path id before touching the store: a malformed id is a
/// client error, not a not-found.
fn parse_menu_id(raw: &str) -> Result<Uuid, MenuError> {
    Uuid::parse_str(raw).map_err(|_| MenuError::validation("ID Menu tidak valid"))
}

/// Whether the payload carries a usable price value. Blank strings count
/// as absent (form fields arrive as text).
fn price_supplied(payload: &MenuPayload) -> bool {
    match &payload.price {
        None | Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

async fn upload_image(state: &AppState, file: UploadedImage) -> Result<String, MenuError> {
    state
        .uploader
        .upload(file.bytes, &file.filename)
        .await
        .map_err(MenuError::upload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_menu_id_accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_menu_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn parse_menu_id_rejects_malformed_input() {
        let err = parse_menu_id("bukan-uuid").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "ID Menu tidak valid");
    }

    #[test]
    fn price_supplied_treats_blank_text_as_absent() {
        let mut payload = MenuPayload::default();
        assert!(!price_supplied(&payload));

        payload.price = Some(json!(null));
        assert!(!price_supplied(&payload));

        payload.price = Some(json!("   "));
        assert!(!price_supplied(&payload));

        payload.price = Some(json!("15000"));
        assert!(price_supplied(&payload));

        payload.price = Some(json!(15000));
        assert!(price_supplied(&payload));
    }
}
