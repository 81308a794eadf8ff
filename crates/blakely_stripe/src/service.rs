//! Stripe Checkout over the REST API.

use blakely_common::services::{BoxFuture, CheckoutSession, CheckoutSessionRequest, PaymentService};
use blakely_common::HTTP_CLIENT;
use blakely_config::env_vars::get_secret_env_var;
use blakely_config::StripeConfig;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::StripeError;

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Placeholder Stripe substitutes with the real session id on redirect.
const SESSION_ID_QUERY: &str = "session_id={CHECKOUT_SESSION_ID}";

#[derive(Deserialize, Debug)]
struct StripeCheckoutSessionApiResponse {
    id: String,
    url: Option<String>,
}

/// Stripe payment service implementation
#[derive(Clone)]
pub struct StripePaymentService {
    secret_key: String,
    api_base: String,
    success_url: String,
    cancel_url: String,
}

impl std::fmt::Debug for StripePaymentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripePaymentService")
            .field("api_base", &self.api_base)
            .field("success_url", &self.success_url)
            .field("cancel_url", &self.cancel_url)
            .finish_non_exhaustive()
    }
}

impl StripePaymentService {
    pub fn new(stripe_config: &StripeConfig, secret_key: impl Into<String>) -> Self {
        let api_base = stripe_config
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();

        Self {
            secret_key: secret_key.into(),
            api_base,
            success_url: stripe_config.success_url.clone(),
            cancel_url: stripe_config.cancel_url.clone(),
        }
    }

    /// Build the service with the secret key taken from the environment
    /// (`BLAKELY_SECRET_STRIPE_SECRET_KEY` or `STRIPE_SECRET_KEY`).
    pub fn from_config(stripe_config: &StripeConfig) -> Result<Self, StripeError> {
        let secret_key = get_secret_env_var("stripe.secret_key")
            .filter(|key| !key.is_empty())
            .ok_or_else(|| StripeError::ConfigError("STRIPE_SECRET_KEY is not set".to_string()))?;
        Ok(Self::new(stripe_config, secret_key))
    }

    fn success_url_with_session_id(&self) -> String {
        let separator = if self.success_url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.success_url, separator, SESSION_ID_QUERY)
    }

    fn form_body(&self, request: &CheckoutSessionRequest) -> Vec<(String, String)> {
        let mut form_body: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("payment_method_types[]".to_string(), "card".to_string()),
            ("success_url".to_string(), self.success_url_with_session_id()),
            ("cancel_url".to_string(), self.cancel_url.clone()),
            (
                "line_items[0][price_data][currency]".to_string(),
                request.currency.clone(),
            ),
            (
                "line_items[0][price_data][product_data][name]".to_string(),
                request.product_name.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]".to_string(),
                request.unit_amount.to_string(),
            ),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
        ];
        if let Some(description) = request.description.as_ref().filter(|d| !d.is_empty()) {
            form_body.push((
                "line_items[0][price_data][product_data][description]".to_string(),
                description.clone(),
            ));
        }
        if let Some(email) = &request.customer_email {
            form_body.push(("customer_email".to_string(), email.clone()));
        }
        if let Some(booking_id) = &request.client_reference_id {
            form_body.push(("client_reference_id".to_string(), booking_id.clone()));
            form_body.push(("metadata[bookingId]".to_string(), booking_id.clone()));
        }
        form_body
    }

    async fn post_checkout_session(
        &self,
        request: CheckoutSessionRequest,
    ) -> Result<CheckoutSession, StripeError> {
        let api_url = format!("{}/v1/checkout/sessions", self.api_base);
        let form_body = self.form_body(&request);

        info!("[Stripe] Sending request to Stripe API: {}", api_url);
        debug!("[Stripe] Form body: {:?}", form_body);

        let response = HTTP_CLIENT
            .post(&api_url)
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&form_body)
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;
        info!("[Stripe] Stripe API response status: {}", status);

        if !status.is_success() {
            let message = match serde_json::from_str::<serde_json::Value>(&body_text) {
                Ok(json_body) => json_body
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .unwrap_or(&body_text)
                    .to_string(),
                Err(_) => body_text,
            };
            warn!(
                "[Stripe] Stripe API request failed with HTTP status: {}. Message: {}",
                status, message
            );
            return Err(StripeError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let session: StripeCheckoutSessionApiResponse = serde_json::from_str(&body_text)?;
        let url = session.url.ok_or_else(|| {
            StripeError::InternalError("Stripe response missing checkout URL".to_string())
        })?;

        info!("[Stripe] Checkout Session {} created", session.id);
        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }
}

impl PaymentService for StripePaymentService {
    type Error = StripeError;

    fn create_checkout_session(
        &self,
        request: CheckoutSessionRequest,
    ) -> BoxFuture<'_, CheckoutSession, Self::Error> {
        Box::pin(self.post_checkout_session(request))
    }
}
