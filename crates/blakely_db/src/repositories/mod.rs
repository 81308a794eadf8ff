//! Repository modules for database access

pub mod booking;
pub mod booking_sql;

// Re-export the booking repository for ease of use
pub use booking::BookingRepository;
pub use booking_sql::SqlBookingRepository;
