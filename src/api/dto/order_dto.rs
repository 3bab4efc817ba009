//! Purchase and order-history DTOs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::{BuyerId, EventId, OrderId, PurchaseReceipt, PurchaseRequest};
use crate::persistence::OrderRecord;

/// Request body for `POST /orders`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PurchaseTicketsRequest {
    /// Event to purchase tickets for.
    pub event_id: EventId,
    /// Buyer placing the order, as authenticated upstream.
    pub buyer_id: BuyerId,
    /// Number of tickets requested (must be at least 1).
    pub quantity: i32,
}

impl From<PurchaseTicketsRequest> for PurchaseRequest {
    fn from(req: PurchaseTicketsRequest) -> Self {
        Self {
            buyer_id: req.buyer_id,
            event_id: req.event_id,
            quantity: req.quantity,
        }
    }
}

/// Response body for `POST /orders` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct PurchaseTicketsResponse {
    /// Identifier of the new order.
    pub order_id: OrderId,
    /// Event the tickets were purchased for.
    pub event_id: EventId,
    /// Buyer who placed the order.
    pub buyer_id: BuyerId,
    /// Number of tickets purchased.
    pub quantity: i32,
    /// Total charged for the order.
    pub total_price: Decimal,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<PurchaseReceipt> for PurchaseTicketsResponse {
    fn from(receipt: PurchaseReceipt) -> Self {
        Self {
            order_id: receipt.order_id,
            event_id: receipt.event_id,
            buyer_id: receipt.buyer_id,
            quantity: receipt.quantity,
            total_price: receipt.total_price,
            created_at: receipt.created_at,
        }
    }
}

/// A single order in history listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDto {
    /// Order identifier.
    pub id: OrderId,
    /// Event the tickets belong to.
    pub event_id: EventId,
    /// Buyer who placed the order.
    pub buyer_id: BuyerId,
    /// Number of tickets purchased.
    pub quantity: i32,
    /// Price snapshot taken at purchase time.
    pub total_price: Decimal,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<OrderRecord> for OrderDto {
    fn from(record: OrderRecord) -> Self {
        Self {
            id: record.id,
            event_id: record.event_id,
            buyer_id: record.buyer_id,
            quantity: record.quantity,
            total_price: record.total_price,
            status: record.status,
            created_at: record.created_at,
        }
    }
}

/// Paginated list response for `GET /buyers/:buyer_id/orders`.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListResponse {
    /// Orders on this page, newest first.
    pub data: Vec<OrderDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
