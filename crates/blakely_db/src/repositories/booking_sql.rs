//! SQL implementation of the booking repository

use crate::client::DbClient;
use crate::error::DbError;
use crate::repositories::booking::BookingRepository;
use blakely_common::models::{Booking, BookingStatus, SlotLock};
use blakely_common::services::BoxFuture;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info, warn};

const BOOKING_COLUMNS: &str = "booking_id, client_name, email, phone, date, start_time, \
     duration_mins, package, price, status, slot_key, client_request_id, notes, \
     stripe_checkout_session_id, created_at, updated_at";

// The Any driver cannot decode NULL, so nullable text reads back as ''.
const BOOKING_SELECT: &str = "booking_id, client_name, email, COALESCE(phone, '') AS phone, \
     date, start_time, duration_mins, package, price, status, slot_key, \
     COALESCE(client_request_id, '') AS client_request_id, COALESCE(notes, '') AS notes, \
     COALESCE(stripe_checkout_session_id, '') AS stripe_checkout_session_id, \
     created_at, updated_at";

/// SQL implementation of the booking repository
#[derive(Debug, Clone)]
pub struct SqlBookingRepository {
    db_client: DbClient,
}

impl SqlBookingRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    async fn create_tables(&self) -> Result<(), DbError> {
        debug!("Initializing booking schema");

        let bookings = r#"
            CREATE TABLE IF NOT EXISTS bookings (
                booking_id TEXT PRIMARY KEY,
                client_name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT,
                date TEXT NOT NULL,
                start_time TEXT NOT NULL,
                duration_mins BIGINT NOT NULL,
                package TEXT NOT NULL,
                price BIGINT NOT NULL,
                status TEXT NOT NULL,
                slot_key TEXT NOT NULL,
                client_request_id TEXT,
                notes TEXT,
                stripe_checkout_session_id TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
        "#;
        let slot_locks = r#"
            CREATE TABLE IF NOT EXISTS slot_locks (
                slot_key TEXT PRIMARY KEY,
                booking_id TEXT NOT NULL,
                locked_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(bookings).await?;
        self.db_client.execute(slot_locks).await?;

        info!("Booking schema initialized successfully");
        Ok(())
    }

    async fn insert_with_slot_lock(&self, booking: Booking) -> Result<Booking, DbError> {
        debug!(
            "Reserving slot {} for booking {}",
            booking.slot_key, booking.booking_id
        );

        let mut tx = self.db_client.begin().await?;

        // The lock goes first: a lost race then aborts before the booking row exists.
        let locked = sqlx::query(
            r#"
            INSERT INTO slot_locks (slot_key, booking_id, locked_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (slot_key) DO NOTHING
            "#,
        )
        .bind(&booking.slot_key)
        .bind(&booking.booking_id)
        .bind(format_timestamp(&booking.created_at))
        .execute(&mut *tx)
        .await;

        let rows_affected = match locked {
            Ok(result) => result.rows_affected(),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => 0,
            Err(e) => {
                error!("Failed to insert slot lock {}: {}", booking.slot_key, e);
                return Err(DbError::QueryError(e.to_string()));
            }
        };

        if rows_affected == 0 {
            tx.rollback()
                .await
                .map_err(|e| DbError::TransactionError(e.to_string()))?;
            info!("Slot {} is already locked", booking.slot_key);
            return Err(DbError::SlotTaken(booking.slot_key));
        }

        // Optional text is bound as '' and stored as NULL.
        let query = format!(
            "INSERT INTO bookings ({}) VALUES ($1, $2, $3, NULLIF($4, ''), $5, $6, $7, $8, $9, $10, $11, \
             NULLIF($12, ''), NULLIF($13, ''), NULLIF($14, ''), $15, $16)",
            BOOKING_COLUMNS
        );
        sqlx::query(&query)
            .bind(&booking.booking_id)
            .bind(&booking.client_name)
            .bind(&booking.email)
            .bind(optional_text(&booking.phone))
            .bind(&booking.date)
            .bind(&booking.start_time)
            .bind(booking.duration_mins)
            .bind(&booking.package)
            .bind(booking.price)
            .bind(booking.status.as_str())
            .bind(&booking.slot_key)
            .bind(optional_text(&booking.client_request_id))
            .bind(optional_text(&booking.notes))
            .bind(optional_text(&booking.stripe_checkout_session_id))
            .bind(format_timestamp(&booking.created_at))
            .bind(format_timestamp(&booking.updated_at))
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                // tx is dropped on return, which rolls the slot lock back
                error!("Failed to insert booking {}: {}", booking.booking_id, e);
                DbError::QueryError(e.to_string())
            })?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        info!(
            "Booking {} created and slot {} locked",
            booking.booking_id, booking.slot_key
        );
        Ok(booking)
    }

    async fn select_bookings(&self, limit: i64) -> Result<Vec<Booking>, DbError> {
        debug!("Listing up to {} bookings", limit);

        let query = format!("SELECT {} FROM bookings LIMIT $1", BOOKING_SELECT);
        let rows = sqlx::query(&query)
            .bind(limit)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list bookings: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(booking_from_row).collect()
    }

    async fn select_booking(&self, booking_id: String) -> Result<Option<Booking>, DbError> {
        let query = format!("SELECT {} FROM bookings WHERE booking_id = $1", BOOKING_SELECT);
        let row = sqlx::query(&query)
            .bind(booking_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(booking_from_row).transpose()
    }

    async fn select_by_slot_key(&self, slot_key: String) -> Result<Vec<Booking>, DbError> {
        let query = format!("SELECT {} FROM bookings WHERE slot_key = $1", BOOKING_SELECT);
        let rows = sqlx::query(&query)
            .bind(slot_key)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(booking_from_row).collect()
    }

    async fn select_slot_lock(&self, slot_key: String) -> Result<Option<SlotLock>, DbError> {
        let row = sqlx::query(
            "SELECT slot_key, booking_id, locked_at FROM slot_locks WHERE slot_key = $1",
        )
        .bind(slot_key)
        .fetch_optional(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(slot_lock_from_row).transpose()
    }

    async fn update_checkout_session(
        &self,
        booking_id: String,
        session_id: String,
    ) -> Result<bool, DbError> {
        debug!(
            "Attaching checkout session {} to booking {}",
            session_id, booking_id
        );

        let result = sqlx::query(
            "UPDATE bookings SET stripe_checkout_session_id = $1, updated_at = $2 WHERE booking_id = $3",
        )
        .bind(session_id)
        .bind(format_timestamp(&Utc::now()))
        .bind(&booking_id)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        if result.rows_affected() == 0 {
            warn!("No booking {} to attach a checkout session to", booking_id);
        }
        Ok(result.rows_affected() > 0)
    }
}

impl BookingRepository for SqlBookingRepository {
    fn init_schema(&self) -> BoxFuture<'_, (), DbError> {
        Box::pin(self.create_tables())
    }

    fn reserve_slot(&self, booking: Booking) -> BoxFuture<'_, Booking, DbError> {
        Box::pin(self.insert_with_slot_lock(booking))
    }

    fn list(&self, limit: i64) -> BoxFuture<'_, Vec<Booking>, DbError> {
        Box::pin(self.select_bookings(limit))
    }

    fn find_by_id(&self, booking_id: &str) -> BoxFuture<'_, Option<Booking>, DbError> {
        Box::pin(self.select_booking(booking_id.to_string()))
    }

    fn find_by_slot_key(&self, slot_key: &str) -> BoxFuture<'_, Vec<Booking>, DbError> {
        Box::pin(self.select_by_slot_key(slot_key.to_string()))
    }

    fn find_slot_lock(&self, slot_key: &str) -> BoxFuture<'_, Option<SlotLock>, DbError> {
        Box::pin(self.select_slot_lock(slot_key.to_string()))
    }

    fn attach_checkout_session(
        &self,
        booking_id: &str,
        session_id: &str,
    ) -> BoxFuture<'_, bool, DbError> {
        Box::pin(self.update_checkout_session(booking_id.to_string(), session_id.to_string()))
    }
}

fn optional_text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

fn optional_column(row: &AnyRow, column: &str) -> Result<Option<String>, DbError> {
    let value: String = row.try_get(column)?;
    Ok(Some(value).filter(|v| !v.is_empty()))
}

// Timestamps are stored as RFC 3339 text: the Any driver has no portable
// timestamp type.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(table: &'static str, value: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::CorruptRow {
            table,
            message: format!("invalid timestamp {:?}: {}", value, e),
        })
}

fn booking_from_row(row: &AnyRow) -> Result<Booking, DbError> {
    let status: String = row.try_get("status")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Booking {
        booking_id: row.try_get("booking_id")?,
        client_name: row.try_get("client_name")?,
        email: row.try_get("email")?,
        phone: optional_column(row, "phone")?,
        date: row.try_get("date")?,
        start_time: row.try_get("start_time")?,
        duration_mins: row.try_get("duration_mins")?,
        package: row.try_get("package")?,
        price: row.try_get("price")?,
        status: status
            .parse::<BookingStatus>()
            .map_err(|message| DbError::CorruptRow {
                table: "bookings",
                message,
            })?,
        slot_key: row.try_get("slot_key")?,
        client_request_id: optional_column(row, "client_request_id")?,
        notes: optional_column(row, "notes")?,
        stripe_checkout_session_id: optional_column(row, "stripe_checkout_session_id")?,
        created_at: parse_timestamp("bookings", &created_at)?,
        updated_at: parse_timestamp("bookings", &updated_at)?,
    })
}

fn slot_lock_from_row(row: &AnyRow) -> Result<SlotLock, DbError> {
    let locked_at: String = row.try_get("locked_at")?;
    Ok(SlotLock {
        slot_key: row.try_get("slot_key")?,
        booking_id: row.try_get("booking_id")?,
        locked_at: parse_timestamp("slot_locks", &locked_at)?,
    })
}
