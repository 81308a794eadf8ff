use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use blakely_booking::routes::routes;
use blakely_common::models::{Booking, SlotLock};
use blakely_common::services::BoxFuture;
use blakely_config::AppConfig;
use blakely_db::{BookingRepository, DbClient, DbError, SqlBookingRepository};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

struct TestDb {
    path: PathBuf,
    repository: Arc<SqlBookingRepository>,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

async fn test_db(name: &str) -> TestDb {
    let path = std::env::temp_dir().join(format!(
        "blakely_booking_{}_{}.db",
        name,
        uuid::Uuid::new_v4()
    ));
    let client = DbClient::from_url(&format!("sqlite://{}", path.display()))
        .await
        .expect("connect");
    let repository = Arc::new(SqlBookingRepository::new(client));
    repository.init_schema().await.expect("schema");
    TestDb { path, repository }
}

fn app(repository: Arc<dyn BookingRepository>) -> Router {
    routes(Arc::new(AppConfig::default()), repository)
}

fn post_booking(body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/bookings")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_bookings() -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri("/bookings")
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn booking_a() -> Value {
    json!({
        "clientName": "A",
        "email": "a@x.com",
        "date": "2025-09-01",
        "startTime": "10:00",
        "durationMins": 60,
        "package": "Standard",
        "price": 15000
    })
}

/// Repository whose every call fails, for the infrastructure error paths.
struct BrokenRepository;

impl BookingRepository for BrokenRepository {
    fn init_schema(&self) -> BoxFuture<'_, (), DbError> {
        Box::pin(async { Ok(()) })
    }

    fn reserve_slot(&self, _booking: Booking) -> BoxFuture<'_, Booking, DbError> {
        Box::pin(async { Err(DbError::QueryError("disk I/O error".to_string())) })
    }

    fn list(&self, _limit: i64) -> BoxFuture<'_, Vec<Booking>, DbError> {
        Box::pin(async { Err(DbError::QueryError("no such table: bookings".to_string())) })
    }

    fn find_by_id(&self, _booking_id: &str) -> BoxFuture<'_, Option<Booking>, DbError> {
        Box::pin(async { Ok(None) })
    }

    fn find_by_slot_key(&self, _slot_key: &str) -> BoxFuture<'_, Vec<Booking>, DbError> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn find_slot_lock(&self, _slot_key: &str) -> BoxFuture<'_, Option<SlotLock>, DbError> {
        Box::pin(async { Ok(None) })
    }

    fn attach_checkout_session(
        &self,
        _booking_id: &str,
        _session_id: &str,
    ) -> BoxFuture<'_, bool, DbError> {
        Box::pin(async { Ok(false) })
    }
}

#[tokio::test]
async fn test_create_booking_returns_201_and_locks_slot() {
    let db = test_db("create").await;
    let app = app(db.repository.clone());

    let response = app.oneshot(post_booking(&booking_a())).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["booking"]["status"], "pending");
    assert_eq!(body["booking"]["date"], "2025-09-01");
    assert_eq!(body["booking"]["startTime"], "10:00");
    assert_eq!(body["booking"]["package"], "Standard");
    assert_eq!(body["booking"]["price"], 15000);

    let booking_id = body["booking"]["bookingId"].as_str().unwrap();
    let stored = db.repository.find_by_id(booking_id).await.unwrap().unwrap();
    assert_eq!(stored.slot_key, "2025-09-01#10:00");
    let lock = db
        .repository
        .find_slot_lock("2025-09-01#10:00")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(lock.booking_id, booking_id);
}

#[tokio::test]
async fn test_second_booking_for_same_slot_returns_409() {
    let db = test_db("conflict").await;
    let app = app(db.repository.clone());

    let first = app.clone().oneshot(post_booking(&booking_a())).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let mut second_body = booking_a();
    second_body["clientName"] = json!("B");
    let second = app.oneshot(post_booking(&second_body)).await.unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(second).await,
        json!({"error": "That time slot was just taken. Please pick another."})
    );

    let rows = db.repository.find_by_slot_key("2025-09-01#10:00").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].client_name, "A");
}

#[tokio::test]
async fn test_missing_price_returns_400_without_writing() {
    let db = test_db("missing").await;
    let app = app(db.repository.clone());

    let mut body = booking_a();
    body.as_object_mut().unwrap().remove("price");
    let response = app.oneshot(post_booking(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Missing fields: price"})
    );

    assert!(db.repository.list(200).await.unwrap().is_empty());
    assert!(db
        .repository
        .find_slot_lock("2025-09-01#10:00")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_empty_body_lists_every_required_field() {
    let db = test_db("empty").await;
    let response = app(db.repository.clone())
        .oneshot(post_booking(&json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Missing fields: clientName, email, date, startTime, durationMins, package, price"})
    );
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let db = test_db("malformed").await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/bookings")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app(db.repository.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"error": "Invalid JSON body"}));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_for_one_slot_have_one_winner() {
    let db = test_db("race").await;
    let app = app(db.repository.clone());

    let mut handles = Vec::new();
    for i in 0..2 {
        let app = app.clone();
        let mut body = booking_a();
        body["clientName"] = json!(format!("client-{}", i));
        handles.push(tokio::spawn(async move {
            app.oneshot(post_booking(&body)).await.unwrap().status()
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);

    assert_eq!(
        db.repository
            .find_by_slot_key("2025-09-01#10:00")
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn test_same_client_request_id_different_slots_both_succeed() {
    let db = test_db("request_id").await;
    let app = app(db.repository.clone());

    let mut first = booking_a();
    first["clientRequestId"] = json!("req-42");
    let mut second = first.clone();
    second["startTime"] = json!("11:00");

    let a = app.clone().oneshot(post_booking(&first)).await.unwrap();
    let b = app.oneshot(post_booking(&second)).await.unwrap();
    assert_eq!(a.status(), StatusCode::CREATED);
    assert_eq!(b.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_list_bookings_projects_fields() {
    let db = test_db("list").await;
    let app = app(db.repository.clone());

    let mut body = booking_a();
    body["notes"] = json!("Golden hour please");
    body["phone"] = json!("555-0100");
    let created = app.clone().oneshot(post_booking(&body)).await.unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let response = app.oneshot(get_bookings()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["count"], 1);
    let item = &body["items"][0];
    assert_eq!(item["name"], "A");
    assert_eq!(item["email"], "a@x.com");
    assert_eq!(item["phone"], "555-0100");
    assert_eq!(item["date"], "2025-09-01");
    assert_eq!(item["time"], "10:00");
    assert_eq!(item["notes"], "Golden hour please");
    assert_eq!(item["status"], "pending");
    assert!(item["bookingId"].is_string());
    assert!(item["createdAt"].is_string());
}

#[tokio::test]
async fn test_storage_failure_on_create_returns_generic_500() {
    let response = app(Arc::new(BrokenRepository))
        .oneshot(post_booking(&booking_a()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Internal error creating booking."})
    );
}

#[tokio::test]
async fn test_storage_failure_on_list_returns_generic_500() {
    let response = app(Arc::new(BrokenRepository))
        .oneshot(get_bookings())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({"error": "Internal error"}));
}

#[tokio::test]
async fn test_list_bookings_without_optional_fields() {
    let db = test_db("list_bare").await;
    let app = app(db.repository.clone());

    let created = app.clone().oneshot(post_booking(&booking_a())).await.unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let response = app.oneshot(get_bookings()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["count"], 1);
    let item = &body["items"][0];
    assert_eq!(item["name"], "A");
    assert!(item["phone"].is_null());
    assert!(item["notes"].is_null());
}

#[tokio::test]
async fn test_zero_price_and_duration_are_accepted() {
    let db = test_db("zero").await;
    let mut body = booking_a();
    body["price"] = json!(0);
    body["durationMins"] = json!(0);

    let response = app(db.repository.clone())
        .oneshot(post_booking(&body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["booking"]["price"], 0);
}

#[tokio::test]
async fn test_out_of_range_price_returns_400_without_writing() {
    let db = test_db("range").await;
    let app = app(db.repository.clone());

    for price in [json!("1e30"), json!(1e30)] {
        let mut body = booking_a();
        body["price"] = price;
        let response = app.clone().oneshot(post_booking(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Invalid fields: price"})
        );
    }
    assert!(db.repository.list(200).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_wrongly_typed_field_is_reported_by_name() {
    let db = test_db("typed").await;
    let mut body = booking_a();
    body["clientName"] = json!(42);

    let response = app(db.repository.clone())
        .oneshot(post_booking(&body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Invalid fields: clientName"})
    );
}
