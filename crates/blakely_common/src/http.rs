// --- File: crates/blakely_common/src/http.rs ---
use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::error::{BlakelyError, HttpStatusCode};

// Include the client module
pub mod client;

/// Every error leaves the service as `{"error": "<public message>"}`.
impl IntoResponse for BlakelyError {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({ "error": self.public_message() }));

        (status_code, body).into_response()
    }
}

/// Permissive cross-origin policy applied to every route.
///
/// The public site and the admin panel are served from other origins, so any
/// origin may call the API. Preflight `OPTIONS` requests are answered by the layer.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_conflict_error_response_shape() {
        let response = BlakelyError::ConflictError(
            "That time slot was just taken. Please pick another.".to_string(),
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "That time slot was just taken. Please pick another." })
        );
    }

    #[tokio::test]
    async fn test_database_error_does_not_leak_detail() {
        let response = BlakelyError::DatabaseError("no such table: bookings".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "error": "Internal error" }));

        let response = BlakelyError::InternalError("Internal error creating booking.".to_string())
            .into_response();
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Internal error creating booking." })
        );
    }

    #[tokio::test]
    async fn test_cors_headers_on_simple_request() {
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(cors_layer());

        let response = app
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_preflight_is_answered() {
        let app = Router::new()
            .route("/bookings", axum::routing::post(|| async { "created" }))
            .layer(cors_layer());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/bookings")
                    .header(header::ORIGIN, "https://blakelycinematics.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_success());
        let methods = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("POST"));
        assert!(methods.contains("OPTIONS"));
    }
}
