use axum::response::{IntoResponse, Response};
use blakely_common::{BlakelyError, HttpStatusCode};
use thiserror::Error;

/// Message returned when the request carries no usable price.
pub const INVALID_PRICE_MESSAGE: &str = "Missing or invalid 'price' (cents).";
/// Message returned for every provider or configuration failure.
pub const SESSION_FAILED_MESSAGE: &str = "Failed to create checkout session.";

/// Stripe-specific error types.
#[derive(Error, Debug)]
pub enum StripeError {
    /// Error occurred during a Stripe API request
    #[error("Stripe API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Stripe API
    #[error("Stripe API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing Stripe API response
    #[error("Failed to parse Stripe API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or incomplete Stripe configuration
    #[error("Stripe configuration missing or incomplete: {0}")]
    ConfigError(String),

    /// The request has no positive integer price
    #[error("Missing or invalid price")]
    InvalidPrice,

    /// Internal processing error
    #[error("Internal processing error: {0}")]
    InternalError(String),
}

/// Convert StripeError to BlakelyError
impl From<StripeError> for BlakelyError {
    fn from(err: StripeError) -> Self {
        match err {
            StripeError::InvalidPrice => {
                BlakelyError::ValidationError(INVALID_PRICE_MESSAGE.to_string())
            }
            _ => BlakelyError::InternalError(SESSION_FAILED_MESSAGE.to_string()),
        }
    }
}

impl HttpStatusCode for StripeError {
    fn status_code(&self) -> u16 {
        match self {
            StripeError::InvalidPrice => 400,
            _ => 500,
        }
    }
}

impl IntoResponse for StripeError {
    fn into_response(self) -> Response {
        BlakelyError::from(self).into_response()
    }
}
