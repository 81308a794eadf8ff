//! Storage for bookings and slot locks.
//!
//! The crate wraps an SQLx `Any` pool (SQLite by default, PostgreSQL with the
//! `postgres` feature) and exposes the [`BookingRepository`] used by the
//! request handlers.
//!
//! # Example
//!
//! ```rust,no_run
//! use blakely_config::AppConfig;
//! use blakely_db::{BookingRepository, DbClient, SqlBookingRepository};
//! use std::sync::Arc;
//!
//! async fn setup_db() -> Result<SqlBookingRepository, Box<dyn std::error::Error>> {
//!     let config = Arc::new(AppConfig::default());
//!     let db_client = DbClient::new(&config).await?;
//!     let repository = SqlBookingRepository::new(db_client);
//!     repository.init_schema().await?;
//!     Ok(repository)
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;

// Re-export the client, error and repositories for ease of use
pub use client::DbClient;
pub use error::DbError;
pub use repositories::{BookingRepository, SqlBookingRepository};
