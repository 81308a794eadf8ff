// --- File: crates/blakely_common/src/lib.rs ---

pub mod error; // Error handling
pub mod features; // Feature flag handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared domain models
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{BlakelyError, HttpStatusCode};

// Re-export HTTP utilities for easier access
pub use http::{client::HTTP_CLIENT, cors_layer};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error};

// Re-export feature flag handling utilities for easier access
pub use features::is_feature_enabled;

#[cfg(feature = "stripe")]
pub use features::is_stripe_enabled;

#[cfg(feature = "vip")]
pub use features::is_vip_enabled;
