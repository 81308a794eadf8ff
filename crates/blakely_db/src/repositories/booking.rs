//! Repository for bookings and slot locks
//!
//! The trait is object safe so that handlers can hold an
//! `Arc<dyn BookingRepository>` and tests can swap in another store.

use crate::error::DbError;
use blakely_common::models::{Booking, SlotLock};
use blakely_common::services::BoxFuture;

/// Storage operations for bookings and the slot locks that guard them.
pub trait BookingRepository: Send + Sync {
    /// Create the `bookings` and `slot_locks` tables if they don't exist yet.
    fn init_schema(&self) -> BoxFuture<'_, (), DbError>;

    /// Persist `booking` and lock its slot in one indivisible write.
    ///
    /// The slot lock is inserted only if no lock exists for `booking.slot_key`.
    /// If one does, nothing is written and [`DbError::SlotTaken`] is returned.
    /// Any other failure also leaves no row behind.
    fn reserve_slot(&self, booking: Booking) -> BoxFuture<'_, Booking, DbError>;

    /// Up to `limit` bookings in storage order.
    fn list(&self, limit: i64) -> BoxFuture<'_, Vec<Booking>, DbError>;

    /// Find a booking by id
    fn find_by_id(&self, booking_id: &str) -> BoxFuture<'_, Option<Booking>, DbError>;

    /// All bookings whose slot key equals `slot_key`
    fn find_by_slot_key(&self, slot_key: &str) -> BoxFuture<'_, Vec<Booking>, DbError>;

    /// The lock held on `slot_key`, if any
    fn find_slot_lock(&self, slot_key: &str) -> BoxFuture<'_, Option<SlotLock>, DbError>;

    /// Record the checkout session created for a booking.
    ///
    /// Returns `false` when no booking with that id exists.
    fn attach_checkout_session(
        &self,
        booking_id: &str,
        session_id: &str,
    ) -> BoxFuture<'_, bool, DbError>;
}
