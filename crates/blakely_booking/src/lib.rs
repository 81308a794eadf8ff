//! Booking feature: the slot reservation guard (`POST /bookings`) and the
//! booking listing (`GET /bookings`).

pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod routes;

pub use error::BookingError;
pub use handlers::BookingState;
pub use logic::{
    BookingListItem, BookingSummary, CreateBookingRequest, CreateBookingResponse,
    ListBookingsResponse,
};
pub use routes::routes;
