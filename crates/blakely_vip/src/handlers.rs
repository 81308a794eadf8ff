use axum::{body::Bytes, extract::Path, response::Json};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use crate::error::VipError;
use crate::logic::{
    finalize, parse_body, remove_items, restore, trash, FinalizeResponse, RemoveItemsResponse,
    RestoreResponse, TrashResponse,
};

pub async fn vip_health_handler() -> Json<Value> {
    Json(json!({ "ok": true, "service": "vip" }))
}

/// Mark a gallery's assets (or a whole folder) as ready for editing.
pub async fn finalize_handler(
    Path(gallery_id): Path<String>,
    body: Bytes,
) -> Result<Json<FinalizeResponse>, VipError> {
    let body = parse_body(&body)?;
    let response = finalize(gallery_id, &body, Utc::now().timestamp())?;
    let mode = if response.folder_id.is_some() { "folder" } else { "assets" };
    info!(
        route = "finalize",
        gallery_id = %response.gallery_id,
        mode,
        count = response.finalized.len(),
        "[VIP] Finalized assets"
    );
    Ok(Json(response))
}

pub async fn restore_handler(
    Path(gallery_id): Path<String>,
    body: Bytes,
) -> Result<Json<RestoreResponse>, VipError> {
    let body = parse_body(&body)?;
    let response = restore(gallery_id, &body, Utc::now().timestamp())?;
    info!(
        "[VIP] Restored {} assets in gallery {}",
        response.restored.len(),
        response.gallery_id
    );
    Ok(Json(response))
}

pub async fn trash_handler(
    Path(gallery_id): Path<String>,
    body: Bytes,
) -> Result<Json<TrashResponse>, VipError> {
    let body = parse_body(&body)?;
    let response = trash(gallery_id, &body, Utc::now().timestamp())?;
    info!(
        "[VIP] Trashed {} assets in gallery {}",
        response.trashed.len(),
        response.gallery_id
    );
    Ok(Json(response))
}

pub async fn remove_items_handler(
    Path((gallery_id, folder_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<RemoveItemsResponse>, VipError> {
    let body = parse_body(&body)?;
    let response = remove_items(gallery_id, folder_id, &body)?;
    info!(
        "[VIP] Removed {} assets from folder {} of gallery {}",
        response.removed.len(),
        response.folder_id,
        response.gallery_id
    );
    Ok(Json(response))
}
