use crate::handlers::{create_booking_handler, list_bookings_handler, BookingState};
use axum::{routing::get, Router};
use blakely_config::AppConfig;
use blakely_db::BookingRepository;
use std::sync::Arc;

/// Creates a router containing all routes for the booking feature.
pub fn routes(config: Arc<AppConfig>, repository: Arc<dyn BookingRepository>) -> Router {
    let booking_state = Arc::new(BookingState { config, repository });

    Router::new()
        .route(
            "/bookings",
            get(list_bookings_handler).post(create_booking_handler),
        )
        .with_state(booking_state)
}
