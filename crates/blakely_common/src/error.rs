// --- File: crates/blakely_common/src/error.rs ---
use thiserror::Error;

/// The base error type for all Blakely backend errors.
///
/// Each feature crate defines its own error enum and converts it into this one
/// with `From`. The message carried by `ValidationError`, `ConflictError` and
/// `InternalError` is the one shown to the caller, so internal details must be
/// logged before an error is converted.
#[derive(Error, Debug)]
pub enum BlakelyError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Caller-fixable input problem
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// The resource is already claimed (e.g. a booked time slot)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl BlakelyError {
    /// The message returned to the caller in the `error` field of the response body.
    ///
    /// Infrastructure variants never expose their detail.
    pub fn public_message(&self) -> String {
        match self {
            BlakelyError::ValidationError(msg)
            | BlakelyError::ConflictError(msg)
            | BlakelyError::InternalError(msg) => msg.clone(),
            BlakelyError::ConfigError(_) | BlakelyError::DatabaseError(_) => {
                "Internal error".to_string()
            }
        }
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for BlakelyError {
    fn status_code(&self) -> u16 {
        match self {
            BlakelyError::ConfigError(_) => 500,
            BlakelyError::ValidationError(_) => 400,
            BlakelyError::DatabaseError(_) => 500,
            BlakelyError::ConflictError(_) => 409,
            BlakelyError::InternalError(_) => 500,
        }
    }
}
