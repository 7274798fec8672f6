//! Request-body parsing for create and update operations
//!
//! The front-end sends either a plain JSON body or, when an image file is
//! attached, a `multipart/form-data` body whose text fields mirror the
//! JSON field names. Both shapes are parsed into the same
//! [`MenuPayload`], plus an optional [`UploadedImage`] for the attached
//! file.

use crate::core::error::MenuError;
use crate::core::menu::MenuPayload;
use axum::Json;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;

/// An image file attached to a multipart request.
#[derive(Debug)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Parse a request body into a menu payload and an optional attached file.
///
/// JSON bodies never carry a file; multipart bodies may carry one under
/// the `gambar` field (distinguished from a manual URL text field by the
/// presence of a filename).
pub async fn parse_menu_request(
    request: Request,
) -> Result<(MenuPayload, Option<UploadedImage>), MenuError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| MenuError::validation(format!("Body multipart tidak valid: {e}")))?;
        parse_multipart(multipart).await
    } else {
        let Json(payload) = Json::<MenuPayload>::from_request(request, &())
            .await
            .map_err(|e| MenuError::validation(format!("Body JSON tidak valid: {e}")))?;
        Ok((payload, None))
    }
}

async fn parse_multipart(
    mut multipart: Multipart,
) -> Result<(MenuPayload, Option<UploadedImage>), MenuError> {
    let mut payload = MenuPayload::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MenuError::validation(format!("Body multipart tidak valid: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        // A "gambar" part with a filename is the attached file; without
        // one it is a manually supplied URL.
        if name == "gambar" && field.file_name().is_some() {
            let filename = field
                .file_name()
                .unwrap_or("upload")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| MenuError::validation(format!("Gagal membaca file gambar: {e}")))?;
            image = Some(UploadedImage {
                bytes: bytes.to_vec(),
                filename,
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| MenuError::validation(format!("Body multipart tidak valid: {e}")))?;

        match name.as_str() {
            "nama" => payload.name = Some(value),
            // Form fields arrive as text; coercion happens in the handler
            "harga" => payload.price = Some(serde_json::Value::String(value)),
            "deskripsi" => payload.description = Some(value),
            "gambar" => payload.image = Some(value),
            "kategori" => payload.category = Some(value),
            "status" => payload.status = Some(value),
            _ => {}
        }
    }

    Ok((payload, image))
}
