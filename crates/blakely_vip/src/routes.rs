use crate::handlers::{
    finalize_handler, remove_items_handler, restore_handler, trash_handler, vip_health_handler,
};
use axum::{
    routing::{delete, get, post},
    Router,
};

/// Creates a router containing all routes for the VIP gallery feature.
pub fn routes() -> Router {
    Router::new()
        .route("/vip/health", get(vip_health_handler))
        .route("/vip/galleries/{gallery_id}/finalize", post(finalize_handler))
        .route("/vip/galleries/{gallery_id}/restore", post(restore_handler))
        .route("/vip/galleries/{gallery_id}/trash", post(trash_handler))
        .route(
            "/vip/galleries/{gallery_id}/folders/{folder_id}/items",
            delete(remove_items_handler),
        )
}
