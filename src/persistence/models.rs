//! Database models for events and orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::domain::{BuyerId, EventId, OrderId};

/// A completed order row from the `orders` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderRecord {
    /// Order identifier, generated at insert time.
    pub id: OrderId,
    /// Event the tickets belong to.
    pub event_id: EventId,
    /// Buyer who placed the order.
    pub buyer_id: BuyerId,
    /// Number of tickets purchased.
    pub quantity: i32,
    /// Price snapshot taken at purchase time; never recomputed.
    pub total_price: Decimal,
    /// Lifecycle status (`"active"` or `"cancelled"`).
    pub status: String,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// An inventory snapshot of one `events` row.
///
/// Read without a lock, for display only: the value may lag concurrent
/// purchases, and the purchase transaction re-reads the row under an
/// exclusive lock before deciding anything.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventAvailability {
    /// Event identifier.
    pub id: EventId,
    /// Event title.
    pub title: String,
    /// Current unit price.
    pub unit_price: Decimal,
    /// Capacity fixed at event creation.
    pub total_tickets: i32,
    /// Remaining inventory at the time of the read.
    pub available_tickets: i32,
}
