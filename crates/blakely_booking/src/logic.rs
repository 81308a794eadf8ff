use blakely_common::models::{slot_key, Booking, BookingStatus};
use blakely_db::{BookingRepository, DbError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::BookingError;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Data Structures ---

/// Request body of `POST /bookings`.
///
/// Fields are kept as raw JSON so that validation can report every missing or
/// mistyped field at once instead of failing on the first one.
#[derive(Deserialize, Debug, Default, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "Ada Lovelace"))]
    pub client_name: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "ada@example.com"))]
    pub email: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub phone: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-09-01"))]
    pub date: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:00"))]
    pub start_time: Option<Value>,
    /// Minutes, as a number or a numeric string
    #[cfg_attr(feature = "openapi", schema(value_type = Object, example = 60))]
    pub duration_mins: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "Standard"))]
    pub package: Option<Value>,
    /// Price in cents, as a number or a numeric string
    #[cfg_attr(feature = "openapi", schema(value_type = Object, example = 15000))]
    pub price: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub client_request_id: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub notes: Option<Value>,
}

/// The part of a stored booking echoed back on success.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub booking_id: String,
    pub status: BookingStatus,
    pub date: String,
    pub start_time: String,
    pub package: String,
    pub price: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateBookingResponse {
    pub success: bool,
    pub booking: BookingSummary,
}

/// One row of `GET /bookings`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookingListItem {
    pub booking_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: String,
    pub time: String,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ListBookingsResponse {
    pub items: Vec<BookingListItem>,
    pub count: usize,
}

impl From<&Booking> for BookingSummary {
    fn from(booking: &Booking) -> Self {
        Self {
            booking_id: booking.booking_id.clone(),
            status: booking.status,
            date: booking.date.clone(),
            start_time: booking.start_time.clone(),
            package: booking.package.clone(),
            price: booking.price,
        }
    }
}

impl From<Booking> for BookingListItem {
    fn from(booking: Booking) -> Self {
        Self {
            booking_id: booking.booking_id,
            name: booking.client_name,
            email: booking.email,
            phone: booking.phone,
            date: booking.date,
            time: booking.start_time,
            notes: booking.notes,
            status: booking.status,
            created_at: booking.created_at,
        }
    }
}

// --- Validation ---

/// A request that passed validation, with numeric fields coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBooking {
    pub client_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: String,
    pub start_time: String,
    pub duration_mins: i64,
    pub package: String,
    pub price: i64,
    pub client_request_id: Option<String>,
    pub notes: Option<String>,
}

// Only absent, null and "" count as missing.
fn present(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Text of a string field; `None` when missing or not a string.
fn text(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

// 2^63, the first float past i64::MAX
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn whole_number(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f))
        .then_some(f as i64)
}

/// Integer value of a number or numeric string; `None` for anything else,
/// including values outside the `i64` range.
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_number)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
        }
        _ => None,
    }
}

/// Checks the required fields and coerces the numeric ones.
///
/// Missing fields are reported together, in the order `clientName, email,
/// date, startTime, durationMins, package, price`. Fields that are present
/// but hold the wrong kind of value are reported the same way.
pub fn validate(request: &CreateBookingRequest) -> Result<ValidatedBooking, BookingError> {
    let required = [
        ("clientName", &request.client_name),
        ("email", &request.email),
        ("date", &request.date),
        ("startTime", &request.start_time),
        ("durationMins", &request.duration_mins),
        ("package", &request.package),
        ("price", &request.price),
    ];
    let missing: Vec<&'static str> = required
        .iter()
        .filter(|(_, value)| !present(value))
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(BookingError::MissingFields(missing));
    }

    let client_name = text(&request.client_name);
    let email = text(&request.email);
    let date = text(&request.date);
    let start_time = text(&request.start_time);
    let duration_mins = request.duration_mins.as_ref().and_then(coerce_integer);
    let package = text(&request.package);
    let price = request.price.as_ref().and_then(coerce_integer);

    let mut invalid = Vec::new();
    let mut check = |name: &'static str, ok: bool| {
        if !ok {
            invalid.push(name);
        }
    };
    check("clientName", client_name.is_some());
    check("email", email.is_some());
    check("date", date.is_some());
    check("startTime", start_time.is_some());
    check("durationMins", duration_mins.is_some());
    check("package", package.is_some());
    check("price", price.is_some());
    // Optional text may be left out, but not sent as some other type.
    check("phone", !present(&request.phone) || text(&request.phone).is_some());
    check(
        "clientRequestId",
        !present(&request.client_request_id) || text(&request.client_request_id).is_some(),
    );
    check("notes", !present(&request.notes) || text(&request.notes).is_some());

    match (client_name, email, date, start_time, duration_mins, package, price) {
        (
            Some(client_name),
            Some(email),
            Some(date),
            Some(start_time),
            Some(duration_mins),
            Some(package),
            Some(price),
        ) if invalid.is_empty() => Ok(ValidatedBooking {
            client_name,
            email,
            phone: text(&request.phone),
            date,
            start_time,
            duration_mins,
            package,
            price,
            client_request_id: text(&request.client_request_id),
            notes: text(&request.notes),
        }),
        _ => Err(BookingError::InvalidFields(invalid)),
    }
}

impl ValidatedBooking {
    /// Builds the pending booking row, with a fresh id and the derived slot key.
    pub fn into_booking(self, now: DateTime<Utc>) -> Booking {
        let slot_key = slot_key(&self.date, &self.start_time);
        Booking {
            booking_id: Uuid::new_v4().to_string(),
            client_name: self.client_name,
            email: self.email,
            phone: self.phone,
            date: self.date,
            start_time: self.start_time,
            duration_mins: self.duration_mins,
            package: self.package,
            price: self.price,
            status: BookingStatus::Pending,
            slot_key,
            client_request_id: self.client_request_id,
            notes: self.notes,
            stripe_checkout_session_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

// --- Core Logic ---

/// Validates the request and reserves its slot.
///
/// Nothing is persisted unless validation passes. The booking and its slot
/// lock are written in one conditional write by the repository.
pub async fn create_booking(
    repository: &dyn BookingRepository,
    request: CreateBookingRequest,
) -> Result<Booking, BookingError> {
    let validated = validate(&request)?;
    let booking = validated.into_booking(Utc::now());

    info!(
        "[Booking] Reserving slot {} for booking {}",
        booking.slot_key, booking.booking_id
    );

    match repository.reserve_slot(booking).await {
        Ok(stored) => Ok(stored),
        Err(DbError::SlotTaken(slot_key)) => {
            info!("[Booking] Slot {} already taken", slot_key);
            Err(BookingError::SlotTaken(slot_key))
        }
        Err(e) => {
            error!("[Booking] Error creating booking: {}", e);
            Err(BookingError::CreateFailed(e.to_string()))
        }
    }
}

/// Up to `limit` bookings in storage order, projected for the admin listing.
pub async fn list_bookings(
    repository: &dyn BookingRepository,
    limit: i64,
) -> Result<ListBookingsResponse, BookingError> {
    let bookings = repository.list(limit).await.map_err(|e| {
        error!("[Booking] Error listing bookings: {}", e);
        BookingError::ListFailed(e.to_string())
    })?;

    let items: Vec<BookingListItem> = bookings.into_iter().map(BookingListItem::from).collect();
    Ok(ListBookingsResponse {
        count: items.len(),
        items,
    })
}
