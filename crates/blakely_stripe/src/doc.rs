#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{CreateCheckoutRequest, CreateCheckoutResponse};

#[utoipa::path(
    post,
    path = "/checkout/session", // Path relative to /api
    request_body(content = CreateCheckoutRequest, example = json!({
        "bookingId": "6f1c0e1e-9a53-4f0e-8a43-2c2b1d7e5a10",
        "email": "a@x.com",
        "package": "Standard",
        "price": 15000
    })),
    responses(
        (status = 200, description = "Stripe Checkout Session created", body = CreateCheckoutResponse),
        (status = 400, description = "Missing or invalid 'price' (cents)."),
        (status = 500, description = "Failed to create checkout session.")
    ),
    tag = "Stripe"
)]
fn doc_create_checkout_session_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_create_checkout_session_handler),
    components(schemas(CreateCheckoutRequest, CreateCheckoutResponse)),
    tags((name = "Stripe", description = "Stripe Checkout for bookings"))
)]
pub struct StripeApiDoc;
