//! Purchase and order-history endpoint handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    OrderDto, OrderListResponse, PaginationMeta, PaginationParams, PurchaseTicketsRequest,
    PurchaseTicketsResponse,
};
use crate::app_state::AppState;
use crate::domain::{BuyerId, PurchaseRequest};
use crate::error::{ErrorResponse, TicketError};

/// `POST /orders` — Purchase tickets for an event.
///
/// # Errors
///
/// Returns [`TicketError`] on an invalid quantity, a missing event, or
/// insufficient inventory.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    tag = "Orders",
    summary = "Purchase tickets",
    description = "Atomically decrements event inventory and records the order. The event row is locked for the duration of the check-and-decrement, so concurrent purchases can never oversell. Not idempotent: identical requests create separate orders.",
    request_body = PurchaseTicketsRequest,
    responses(
        (status = 201, description = "Purchase completed", body = PurchaseTicketsResponse),
        (status = 400, description = "Invalid quantity", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 409, description = "Insufficient tickets remain", body = ErrorResponse),
        (status = 500, description = "Purchase transaction failed", body = ErrorResponse),
    )
)]
pub async fn purchase_tickets(
    State(state): State<AppState>,
    Json(req): Json<PurchaseTicketsRequest>,
) -> Result<impl IntoResponse, TicketError> {
    let request = PurchaseRequest::from(req);
    let receipt = state.ticket_service.purchase(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(PurchaseTicketsResponse::from(receipt)),
    ))
}

/// `GET /buyers/:buyer_id/orders` — Paginated purchase history.
///
/// # Errors
///
/// Returns [`TicketError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/buyers/{buyer_id}/orders",
    tag = "Orders",
    summary = "List a buyer's orders",
    description = "Returns the buyer's completed orders, newest first, with pagination metadata.",
    params(
        ("buyer_id" = uuid::Uuid, Path, description = "Buyer UUID"),
        PaginationParams,
    ),
    responses(
        (status = 200, description = "Paginated order list", body = OrderListResponse),
    )
)]
pub async fn list_buyer_orders(
    State(state): State<AppState>,
    Path(buyer_id): Path<uuid::Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, TicketError> {
    let params = params.clamped();
    let buyer_id = BuyerId::from_uuid(buyer_id);

    let per_page = params.per_page;
    let page = params.page;
    let limit = i64::from(per_page);
    let offset = i64::from(page - 1) * limit;

    let (orders, total) = state
        .ticket_service
        .order_history(buyer_id, limit, offset)
        .await?;

    let total = u32::try_from(total).unwrap_or(u32::MAX);
    let total_pages = if total == 0 {
        0
    } else {
        total.div_ceil(per_page)
    };

    Ok(Json(OrderListResponse {
        data: orders.into_iter().map(OrderDto::from).collect(),
        pagination: PaginationMeta {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

/// Order routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(purchase_tickets))
        .route("/buyers/{buyer_id}/orders", get(list_buyer_orders))
}
