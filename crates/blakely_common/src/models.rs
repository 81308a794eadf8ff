// --- File: crates/blakely_common/src/models.rs ---

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between date and start time in a slot key.
pub const SLOT_KEY_SEPARATOR: char = '#';

/// Builds the slot key naming one bookable time window, e.g. `2025-09-01#10:00`.
pub fn slot_key(date: &str, start_time: &str) -> String {
    format!("{}{}{}", date, SLOT_KEY_SEPARATOR, start_time)
}

/// Lifecycle of a booking: `pending` until paid, then `paid`/`confirmed`,
/// possibly `cancelled` later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Paid,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Paid => "paid",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "paid" => Ok(BookingStatus::Paid),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status: {}", other)),
        }
    }
}

/// A client's reserved session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: String,
    pub client_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: String,
    pub start_time: String,
    pub duration_mins: i64,
    pub package: String,
    /// Price in the smallest currency unit (cents).
    pub price: i64,
    pub status: BookingStatus,
    /// Redundant copy of the owning slot lock's key, used for lookup.
    pub slot_key: String,
    /// Caller-supplied idempotency token. Stored, not enforced.
    pub client_request_id: Option<String>,
    pub notes: Option<String>,
    pub stripe_checkout_session_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Exclusive ownership of one bookable time slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotLock {
    pub slot_key: String,
    pub booking_id: String,
    pub locked_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_key() {
        assert_eq!(slot_key("2025-09-01", "10:00"), "2025-09-01#10:00");
    }

    #[test]
    fn test_booking_status_round_trips_through_text() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Paid,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>(), Ok(status));
        }
        assert!("refunded".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_booking_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
