use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use blakely_config::AppConfig;
use blakely_db::BookingRepository;
use std::sync::Arc;
use tracing::warn;

use crate::error::BookingError;
use crate::logic::{
    create_booking, list_bookings, BookingSummary, CreateBookingRequest, CreateBookingResponse,
    ListBookingsResponse,
};

// --- State for Booking Handlers ---
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub repository: Arc<dyn BookingRepository>,
}

/// Reserve a time slot and create a pending booking.
#[axum::debug_handler]
pub async fn create_booking_handler(
    State(state): State<Arc<BookingState>>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), BookingError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("[Booking] Rejected request body: {}", rejection.body_text());
        BookingError::InvalidBody
    })?;

    let booking = create_booking(state.repository.as_ref(), request).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            success: true,
            booking: BookingSummary::from(&booking),
        }),
    ))
}

/// List stored bookings in storage order.
#[axum::debug_handler]
pub async fn list_bookings_handler(
    State(state): State<Arc<BookingState>>,
) -> Result<Json<ListBookingsResponse>, BookingError> {
    let limit = state.config.booking.list_limit;
    Ok(Json(list_bookings(state.repository.as_ref(), limit).await?))
}
