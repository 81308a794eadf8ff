#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{
    FinalizeResponse, FinalizedAsset, RemoveItemsResponse, RestoreResponse, RestoredAsset,
    TrashResponse, TrashedAsset,
};

#[utoipa::path(
    get,
    path = "/vip/health", // Path relative to /api
    responses((status = 200, description = "VIP service is up")),
    tag = "VIP"
)]
fn doc_vip_health_handler() {}

#[utoipa::path(
    post,
    path = "/vip/galleries/{gallery_id}/finalize",
    params(("gallery_id" = String, Path, description = "Gallery id")),
    request_body(content = Object, example = json!({"folderId": "ceremony"})),
    responses(
        (status = 200, description = "Assets marked ready for editing", body = FinalizeResponse),
        (status = 400, description = "Provide exactly one of assetIds or folderId.")
    ),
    tag = "VIP"
)]
fn doc_finalize_handler() {}

#[utoipa::path(
    post,
    path = "/vip/galleries/{gallery_id}/restore",
    params(("gallery_id" = String, Path, description = "Gallery id")),
    request_body(content = Object, example = json!({"assetIds": ["img_001", "img_002"]})),
    responses(
        (status = 200, description = "Assets restored", body = RestoreResponse),
        (status = 400, description = "`assetIds` must be a non-empty array of strings")
    ),
    tag = "VIP"
)]
fn doc_restore_handler() {}

#[utoipa::path(
    post,
    path = "/vip/galleries/{gallery_id}/trash",
    params(("gallery_id" = String, Path, description = "Gallery id")),
    request_body(content = Object, example = json!({"assetIds": ["img_001"], "ttlDays": 14})),
    responses(
        (status = 200, description = "Assets moved to trash", body = TrashResponse),
        (status = 400, description = "Invalid assetIds or ttlDays")
    ),
    tag = "VIP"
)]
fn doc_trash_handler() {}

#[utoipa::path(
    delete,
    path = "/vip/galleries/{gallery_id}/folders/{folder_id}/items",
    params(
        ("gallery_id" = String, Path, description = "Gallery id"),
        ("folder_id" = String, Path, description = "Folder id")
    ),
    request_body(content = Object, example = json!({"assetIds": ["img_001"]})),
    responses(
        (status = 200, description = "Assets removed from the folder", body = RemoveItemsResponse),
        (status = 400, description = "`assetIds` must be a non-empty array of strings")
    ),
    tag = "VIP"
)]
fn doc_remove_items_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_vip_health_handler,
        doc_finalize_handler,
        doc_restore_handler,
        doc_trash_handler,
        doc_remove_items_handler
    ),
    components(schemas(
        FinalizeResponse,
        FinalizedAsset,
        RestoreResponse,
        RestoredAsset,
        TrashResponse,
        TrashedAsset,
        RemoveItemsResponse
    )),
    tags((name = "VIP", description = "VIP client gallery (stub)"))
)]
pub struct VipApiDoc;
