//! VIP client gallery endpoints.
//!
//! These are stubs: they validate the request and answer with the shape the
//! gallery page expects, but nothing is stored.

pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod routes;

pub use error::VipError;
pub use routes::routes;
