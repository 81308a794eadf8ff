//! Router assembly shared by the binary and the integration tests.

use axum::{response::Json, routing::get, Router};
use blakely_common::cors_layer;
use blakely_config::AppConfig;
use blakely_db::BookingRepository;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

#[cfg(feature = "stripe")]
use blakely_common::services::PaymentService;
#[cfg(feature = "stripe")]
use blakely_stripe::StripeError;

const WELCOME: &str = "Welcome to the Blakely Cinematics API!";

/// Everything the routers need, constructed once at startup.
#[derive(Clone)]
pub struct AppServices {
    pub config: Arc<AppConfig>,
    pub repository: Arc<dyn BookingRepository>,
    /// Present only when Stripe checkout is enabled at runtime.
    #[cfg(feature = "stripe")]
    pub payment_service: Option<Arc<dyn PaymentService<Error = StripeError>>>,
}

async fn welcome() -> &'static str {
    WELCOME
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Builds the full application: feature routers nested under `/api`, plus
/// request tracing and the CORS layer.
pub fn build_router(services: &AppServices) -> Router {
    let config = &services.config;

    #[allow(unused_mut)] // for the features it needs to be mutable
    let mut api = Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .merge(blakely_booking::routes(
            config.clone(),
            services.repository.clone(),
        ));

    #[cfg(feature = "stripe")]
    {
        if let Some(payment_service) = &services.payment_service {
            info!("Stripe checkout enabled");
            api = api.merge(blakely_stripe::routes(
                config.clone(),
                payment_service.clone(),
                services.repository.clone(),
            ));
        }
    }

    #[cfg(feature = "vip")]
    {
        if blakely_common::is_vip_enabled(config) {
            info!("VIP gallery endpoints enabled");
            api = api.merge(blakely_vip::routes());
        }
    }

    #[allow(unused_mut)]
    let mut app = Router::new()
        .route("/api/", get(welcome))
        .nest("/api", api);

    #[cfg(feature = "openapi")]
    {
        app = app.merge(swagger_ui());
    }

    app.layer(TraceLayer::new_for_http()).layer(cors_layer())
}

#[cfg(feature = "openapi")]
fn swagger_ui() -> utoipa_swagger_ui::SwaggerUi {
    use blakely_booking::doc::BookingApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Blakely Cinematics API",
            version = "0.1.0",
            description = "Booking, checkout and VIP gallery endpoints"
        ),
        servers((url = "/api", description = "Main API Prefix"))
    )]
    struct ApiDoc;

    let mut openapi_doc = ApiDoc::openapi();
    openapi_doc.merge(BookingApiDoc::openapi());
    #[cfg(feature = "stripe")]
    openapi_doc.merge(blakely_stripe::doc::StripeApiDoc::openapi());
    #[cfg(feature = "vip")]
    openapi_doc.merge(blakely_vip::doc::VipApiDoc::openapi());

    info!("Adding Swagger UI at /api/docs");
    SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc)
}
