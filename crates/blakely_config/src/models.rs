// --- File: crates/blakely_config/src/models.rs ---

use serde::{Deserialize, Serialize};

/// Default number of bookings returned by the listing endpoint.
pub const DEFAULT_BOOKING_LIST_LIMIT: i64 = 200;

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite://data/bookings.db, overridable via BLAKELY__DATABASE__URL
}

// --- Booking Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingConfig {
    /// Maximum number of bookings returned by `GET /bookings`.
    #[serde(default = "default_list_limit")]
    pub list_limit: i64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            list_limit: DEFAULT_BOOKING_LIST_LIMIT,
        }
    }
}

fn default_list_limit() -> i64 {
    DEFAULT_BOOKING_LIST_LIMIT
}

// --- Stripe Config ---
// Holds non-secret Stripe config. Secret key loaded directly from env var: STRIPE_SECRET_KEY
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StripeConfig {
    pub success_url: String, // Mandatory
    pub cancel_url: String,  // Mandatory
    pub default_currency: Option<String>,
    /// Product name used when the request carries no package.
    pub default_product_name: Option<String>,
    /// Base URL of the Stripe REST API; defaults to https://api.stripe.com
    pub api_base: Option<String>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_stripe: bool,
    #[serde(default)]
    pub use_vip: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub stripe: Option<StripeConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8086,
            },
            use_stripe: false,
            use_vip: false,
            database: Some(DatabaseConfig {
                url: "sqlite://data/bookings.db".to_string(),
            }),
            booking: BookingConfig::default(),
            stripe: None,
        }
    }
}
