// --- File: crates/blakely_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! These traits decouple request handlers from concrete providers so that a
//! handler can be exercised with a fake in tests.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A hosted checkout provider (Stripe Checkout in production).
pub trait PaymentService: Send + Sync {
    /// Error type returned by payment service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a one-off checkout session and return its id and redirect URL.
    fn create_checkout_session(
        &self,
        request: CheckoutSessionRequest,
    ) -> BoxFuture<'_, CheckoutSession, Self::Error>;
}

/// Provider-neutral description of a single-item checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSessionRequest {
    /// Amount in the smallest currency unit.
    pub unit_amount: i64,
    /// Lowercase ISO currency code, e.g. `usd`.
    pub currency: String,
    pub product_name: String,
    pub description: Option<String>,
    pub customer_email: Option<String>,
    /// Our booking id, echoed back by the provider.
    pub client_reference_id: Option<String>,
}

/// Represents a created checkout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider session id (`cs_...`).
    pub id: String,
    /// Hosted payment page to redirect the client to.
    pub url: String,
}
