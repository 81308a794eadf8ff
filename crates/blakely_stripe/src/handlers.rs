use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use blakely_common::log_error;
use blakely_common::services::PaymentService;
use blakely_config::AppConfig;
use blakely_db::BookingRepository;
use std::sync::Arc;
use tracing::warn;

use crate::error::StripeError;
use crate::logic::{create_checkout, CreateCheckoutRequest, CreateCheckoutResponse};

// --- State for Stripe Handlers ---
#[derive(Clone)]
pub struct StripeState {
    pub config: Arc<AppConfig>,
    pub payment_service: Arc<dyn PaymentService<Error = StripeError>>,
    pub repository: Arc<dyn BookingRepository>,
}

/// Create a Stripe Checkout Session for a booking.
#[axum::debug_handler]
pub async fn create_checkout_session_handler(
    State(state): State<Arc<StripeState>>,
    payload: Result<Json<CreateCheckoutRequest>, JsonRejection>,
) -> Result<Json<CreateCheckoutResponse>, StripeError> {
    // An unreadable body has no usable price either.
    let Json(request) = payload.map_err(|rejection| {
        warn!("[Stripe] Rejected request body: {}", rejection.body_text());
        StripeError::InvalidPrice
    })?;

    let stripe_config = state.config.stripe.as_ref().ok_or_else(|| {
        let e = StripeError::ConfigError("stripe section missing".to_string());
        log_error(&e, "create_checkout_session");
        e
    })?;

    create_checkout(
        state.payment_service.as_ref(),
        state.repository.as_ref(),
        stripe_config,
        request,
    )
    .await
    .map(Json)
    .inspect_err(|e| {
        if !matches!(e, StripeError::InvalidPrice) {
            log_error(e, "create_checkout_session");
        }
    })
}
