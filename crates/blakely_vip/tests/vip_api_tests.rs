use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use blakely_vip::routes;
use serde_json::{json, Value};
use tower::ServiceExt;

fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_vip_health() {
    let response = routes()
        .oneshot(request(Method::GET, "/vip/health", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"ok": true, "service": "vip"}));
}

#[tokio::test]
async fn test_finalize_folder() {
    let response = routes()
        .oneshot(request(
            Method::POST,
            "/vip/galleries/g-42/finalize",
            Some(json!({"folderId": "ceremony"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["galleryId"], "g-42");
    assert_eq!(body["folderId"], "ceremony");
    assert!(body.get("assetIds").is_none());
    let finalized = body["finalized"].as_array().unwrap();
    assert_eq!(finalized.len(), 3);
    assert_eq!(finalized[0]["assetId"], "stub_001");
    assert_eq!(finalized[2]["status"], "ready_for_edit");
    assert!(finalized[0]["finalizedAt"].is_i64());
}

#[tokio::test]
async fn test_finalize_rejects_both_targets() {
    let response = routes()
        .oneshot(request(
            Method::POST,
            "/vip/galleries/g-42/finalize",
            Some(json!({"folderId": "ceremony", "assetIds": ["a"]})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"message": "Provide exactly one of assetIds or folderId."})
    );
}

#[tokio::test]
async fn test_finalize_rejects_malformed_json() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/vip/galleries/g-42/finalize")
        .body(Body::from("{not json"))
        .unwrap();
    let response = routes().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"message": "Invalid JSON body"}));
}

#[tokio::test]
async fn test_restore_assets() {
    let response = routes()
        .oneshot(request(
            Method::POST,
            "/vip/galleries/g-1/restore",
            Some(json!({"assetIds": ["img_001", "img_002"]})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["galleryId"], "g-1");
    assert_eq!(body["restored"][1]["assetId"], "img_002");
    assert!(body["restored"][0]["restoredAt"].is_i64());
}

#[tokio::test]
async fn test_trash_defaults_and_rejects_bad_ttl() {
    let app = routes();

    let ok = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/vip/galleries/g-1/trash",
            Some(json!({"assetIds": ["img_001"]})),
        ))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(body_json(ok).await["trashed"][0]["ttlDays"], 30);

    let bad = app
        .oneshot(request(
            Method::POST,
            "/vip/galleries/g-1/trash",
            Some(json!({"assetIds": ["img_001"], "ttlDays": "forever"})),
        ))
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(bad).await,
        json!({"message": "`ttlDays` must be an integer", "ttlDays": "forever"})
    );
}

#[tokio::test]
async fn test_remove_folder_items() {
    let app = routes();

    let ok = app
        .clone()
        .oneshot(request(
            Method::DELETE,
            "/vip/galleries/g-1/folders/f-9/items",
            Some(json!({"assetIds": ["img_003"]})),
        ))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(
        body_json(ok).await,
        json!({"galleryId": "g-1", "folderId": "f-9", "removed": ["img_003"]})
    );

    let bad = app
        .oneshot(request(
            Method::DELETE,
            "/vip/galleries/g-1/folders/f-9/items",
            Some(json!({"assetIds": []})),
        ))
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(bad).await,
        json!({"message": "`assetIds` must be a non-empty array of strings"})
    );
}
