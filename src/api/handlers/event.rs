//! Event availability endpoint handler.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::EventAvailabilityResponse;
use crate::app_state::AppState;
use crate::domain::EventId;
use crate::error::{ErrorResponse, TicketError};

/// `GET /events/:id/availability` — Inventory snapshot for display.
///
/// The snapshot is read without a lock and may lag concurrent purchases;
/// the purchase endpoint always re-validates under the row lock.
///
/// # Errors
///
/// Returns [`TicketError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/availability",
    tag = "Events",
    summary = "Get event availability",
    description = "Returns the event's current price and remaining ticket count. Display-only: the purchase transaction performs its own locked read.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Availability snapshot", body = EventAvailabilityResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn event_availability(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, TicketError> {
    let snapshot = state
        .ticket_service
        .availability(EventId::from_uuid(id))
        .await?;

    Ok(Json(EventAvailabilityResponse::from(snapshot)))
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/events/{id}/availability", get(event_availability))
}
