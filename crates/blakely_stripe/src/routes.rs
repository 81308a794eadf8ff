use crate::error::StripeError;
use crate::handlers::{create_checkout_session_handler, StripeState};
use axum::{routing::post, Router};
use blakely_common::services::PaymentService;
use blakely_config::AppConfig;
use blakely_db::BookingRepository;
use std::sync::Arc;

/// Creates a router containing all routes for the Stripe feature.
pub fn routes(
    config: Arc<AppConfig>,
    payment_service: Arc<dyn PaymentService<Error = StripeError>>,
    repository: Arc<dyn BookingRepository>,
) -> Router {
    let stripe_state = Arc::new(StripeState {
        config,
        payment_service,
        repository,
    });

    Router::new()
        .route("/checkout/session", post(create_checkout_session_handler))
        .with_state(stripe_state)
}
