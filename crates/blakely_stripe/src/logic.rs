use blakely_common::services::{CheckoutSessionRequest, PaymentService};
use blakely_config::StripeConfig;
use blakely_db::BookingRepository;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::StripeError;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Product name used when neither the request nor the config names one.
pub const DEFAULT_PRODUCT_NAME: &str = "Photography Session";
/// Currency used when the config names none.
pub const DEFAULT_CURRENCY: &str = "usd";

// --- Data Structures ---

/// Request from the booking page to start a hosted checkout.
#[derive(Deserialize, Debug, Default, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutRequest {
    /// Amount in cents, as a number or a numeric string
    #[cfg_attr(feature = "openapi", schema(value_type = Object, example = 15000))]
    pub price: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(example = "6f1c0e1e-9a53-4f0e-8a43-2c2b1d7e5a10"))]
    pub booking_id: Option<String>,
    pub client_name: Option<String>,
    pub email: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub package: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutResponse {
    #[cfg_attr(
        feature = "openapi",
        schema(example = "https://checkout.stripe.com/c/pay/cs_test_a1...")
    )]
    pub url: String,
    #[cfg_attr(feature = "openapi", schema(example = "cs_test_a1..."))]
    pub session_id: String,
}

// --- Request building ---

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// 2^63, the first float past i64::MAX
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn whole_amount(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f))
        .then_some(f as i64)
}

/// A positive integer amount from a number or numeric string.
pub fn parse_price(price: Option<&Value>) -> Option<i64> {
    let amount = match price? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_amount)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    (amount > 0).then_some(amount)
}

/// Turns the caller's request into a provider-neutral checkout description.
pub fn build_session_request(
    stripe_config: &StripeConfig,
    request: &CreateCheckoutRequest,
) -> Result<CheckoutSessionRequest, StripeError> {
    let unit_amount = parse_price(request.price.as_ref()).ok_or(StripeError::InvalidPrice)?;

    let product_name = non_empty(&request.package)
        .or(stripe_config.default_product_name.as_deref())
        .unwrap_or(DEFAULT_PRODUCT_NAME)
        .to_string();

    let description = match non_empty(&request.booking_id) {
        Some(booking_id) => format!("Booking #{}", booking_id),
        None => format!(
            "Session: {} {}",
            request.date.as_deref().unwrap_or_default(),
            request.start_time.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string(),
    };

    let currency = stripe_config
        .default_currency
        .as_deref()
        .unwrap_or(DEFAULT_CURRENCY)
        .to_lowercase();

    Ok(CheckoutSessionRequest {
        unit_amount,
        currency,
        product_name,
        description: Some(description),
        customer_email: non_empty(&request.email).map(str::to_string),
        client_reference_id: non_empty(&request.booking_id).map(str::to_string),
    })
}

// --- Core Logic Function ---

/// Creates the checkout session and, when a booking id was given, records the
/// session id on that booking.
///
/// The attachment is best effort: a failed or missed update is logged and the
/// session is still returned.
pub async fn create_checkout(
    payment_service: &dyn PaymentService<Error = StripeError>,
    repository: &dyn BookingRepository,
    stripe_config: &StripeConfig,
    request: CreateCheckoutRequest,
) -> Result<CreateCheckoutResponse, StripeError> {
    let session_request = build_session_request(stripe_config, &request)?;

    info!(
        "[Stripe Logic] Creating Checkout Session: amount={} {} product='{}'",
        session_request.unit_amount, session_request.currency, session_request.product_name
    );

    let session = payment_service
        .create_checkout_session(session_request)
        .await?;

    if let Some(booking_id) = non_empty(&request.booking_id) {
        match repository
            .attach_checkout_session(booking_id, &session.id)
            .await
        {
            Ok(true) => info!(
                "[Stripe Logic] Attached session {} to booking {}",
                session.id, booking_id
            ),
            Ok(false) => warn!(
                "[Stripe Logic] Booking {} not found, session {} not attached",
                booking_id, session.id
            ),
            Err(e) => warn!(
                "[Stripe Logic] Failed to attach session {} to booking {}: {}",
                session.id, booking_id, e
            ),
        }
    }

    Ok(CreateCheckoutResponse {
        url: session.url,
        session_id: session.id,
    })
}
