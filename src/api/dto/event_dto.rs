//! Event availability DTOs.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::EventId;
use crate::persistence::EventAvailability;

/// Response body for `GET /events/:id/availability`.
///
/// A display snapshot: read without a lock, so it may lag concurrent
/// purchases by a moment. The purchase endpoint re-checks under the row
/// lock regardless of what was displayed.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventAvailabilityResponse {
    /// Event identifier.
    pub event_id: EventId,
    /// Event title.
    pub title: String,
    /// Current unit price.
    pub unit_price: Decimal,
    /// Remaining inventory at the time of the read.
    pub available_tickets: i32,
    /// Capacity fixed at event creation.
    pub total_tickets: i32,
}

impl From<EventAvailability> for EventAvailabilityResponse {
    fn from(snapshot: EventAvailability) -> Self {
        Self {
            event_id: snapshot.id,
            title: snapshot.title,
            unit_price: snapshot.unit_price,
            available_tickets: snapshot.available_tickets,
            total_tickets: snapshot.total_tickets,
        }
    }
}
