//! Persistence layer: PostgreSQL store for events and orders.
//!
//! [`TicketStore`] owns all SQL in the crate, including the row-locked
//! purchase transaction. It is constructed with an injected `sqlx::PgPool`
//! so tests can point it at an isolated database.

pub mod models;
pub mod postgres;

pub use models::{EventAvailability, OrderRecord};
pub use postgres::TicketStore;
