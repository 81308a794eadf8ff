use axum::response::{IntoResponse, Response};
use blakely_common::{BlakelyError, HttpStatusCode};
use thiserror::Error;

/// Message returned when the slot lock already exists.
pub const SLOT_TAKEN_MESSAGE: &str = "That time slot was just taken. Please pick another.";
/// Message returned when a reservation fails for any reason other than a taken slot.
pub const CREATE_FAILED_MESSAGE: &str = "Internal error creating booking.";
/// Message returned when the listing query fails.
pub const LIST_FAILED_MESSAGE: &str = "Internal error";

/// Booking-specific error types.
#[derive(Error, Debug)]
pub enum BookingError {
    /// The request body is not valid JSON for a booking
    #[error("Invalid JSON body")]
    InvalidBody,

    /// One or more required fields are absent, null or empty
    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A field holds the wrong kind of value, or a number outside the integer range
    #[error("Invalid fields: {}", .0.join(", "))]
    InvalidFields(Vec<&'static str>),

    /// Another booking holds the slot lock
    #[error("Slot {0} is already booked")]
    SlotTaken(String),

    /// Persisting the reservation failed
    #[error("Failed to create booking: {0}")]
    CreateFailed(String),

    /// Reading the bookings failed
    #[error("Failed to list bookings: {0}")]
    ListFailed(String),
}

/// Convert BookingError to BlakelyError
impl From<BookingError> for BlakelyError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::InvalidBody
            | BookingError::MissingFields(_)
            | BookingError::InvalidFields(_) => BlakelyError::ValidationError(err.to_string()),
            BookingError::SlotTaken(_) => BlakelyError::ConflictError(SLOT_TAKEN_MESSAGE.to_string()),
            BookingError::CreateFailed(_) => {
                BlakelyError::InternalError(CREATE_FAILED_MESSAGE.to_string())
            }
            BookingError::ListFailed(_) => {
                BlakelyError::InternalError(LIST_FAILED_MESSAGE.to_string())
            }
        }
    }
}

impl HttpStatusCode for BookingError {
    fn status_code(&self) -> u16 {
        match self {
            BookingError::InvalidBody
            | BookingError::MissingFields(_)
            | BookingError::InvalidFields(_) => 400,
            BookingError::SlotTaken(_) => 409,
            BookingError::CreateFailed(_) | BookingError::ListFailed(_) => 500,
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        BlakelyError::from(self).into_response()
    }
}
