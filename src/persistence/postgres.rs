//! PostgreSQL store, including the row-locked purchase transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::models::{EventAvailability, OrderRecord};
use crate::domain::{
    BuyerId, EventId, OrderId, OrderStatus, PurchaseReceipt, PurchaseRequest, purchase,
};
use crate::error::TicketError;

/// PostgreSQL-backed store using an injected `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct TicketStore {
    pool: PgPool,
}

impl TicketStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Atomically decrements event inventory and records the order.
    ///
    /// The event row is read with `FOR UPDATE`, so concurrent purchases of
    /// the same event serialize on the row lock: the second transaction
    /// blocks until the first commits, then re-reads the updated count.
    /// Purchases of different events never contend. The unit price used for
    /// the total is the one read under the lock, never a displayed or
    /// client-supplied value.
    ///
    /// Quantity validation is the caller's responsibility and happens
    /// before this method opens a transaction.
    ///
    /// # Errors
    ///
    /// - [`TicketError::EventNotFound`] if no event row matches.
    /// - [`TicketError::InsufficientInventory`] if fewer than `quantity`
    ///   tickets remain at the locked read; carries the observed count.
    /// - [`TicketError::TransactionFailure`] on any database-level failure.
    ///
    /// Every error path rolls the transaction back: business rejections
    /// roll back explicitly, and `?`-propagated sqlx errors drop the
    /// transaction guard, which rolls back on drop.
    pub async fn purchase_tickets(
        &self,
        request: &PurchaseRequest,
    ) -> Result<PurchaseReceipt, TicketError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, (Decimal, i32)>(
            "SELECT unit_price, available_tickets FROM events WHERE id = $1 FOR UPDATE",
        )
        .bind(request.event_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((unit_price, available)) = row else {
            let _ = tx.rollback().await;
            return Err(TicketError::EventNotFound(request.event_id));
        };

        if available < request.quantity {
            let _ = tx.rollback().await;
            return Err(TicketError::InsufficientInventory { available });
        }

        let total_price =
            purchase::compute_total(unit_price, request.quantity).ok_or_else(|| {
                TicketError::Internal(format!(
                    "total price overflow for event {}",
                    request.event_id
                ))
            })?;

        sqlx::query(
            "UPDATE events SET available_tickets = available_tickets - $1, updated_at = now() \
             WHERE id = $2",
        )
        .bind(request.quantity)
        .bind(request.event_id)
        .execute(&mut *tx)
        .await?;

        let (order_id, created_at) = sqlx::query_as::<_, (OrderId, DateTime<Utc>)>(
            "INSERT INTO orders (event_id, buyer_id, quantity, total_price, status) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id, created_at",
        )
        .bind(request.event_id)
        .bind(request.buyer_id)
        .bind(request.quantity)
        .bind(total_price)
        .bind(OrderStatus::Active.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(PurchaseReceipt {
            order_id,
            event_id: request.event_id,
            buyer_id: request.buyer_id,
            quantity: request.quantity,
            total_price,
            created_at,
        })
    }

    /// Reads an event's inventory snapshot without locking.
    ///
    /// Display-only; may lag concurrent purchases.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::TransactionFailure`] on database failure.
    pub async fn event_availability(
        &self,
        event_id: EventId,
    ) -> Result<Option<EventAvailability>, TicketError> {
        let snapshot = sqlx::query_as::<_, EventAvailability>(
            "SELECT id, title, unit_price, total_tickets, available_tickets \
             FROM events WHERE id = $1",
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(snapshot)
    }

    /// Returns one page of a buyer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::TransactionFailure`] on database failure.
    pub async fn orders_for_buyer(
        &self,
        buyer_id: BuyerId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<OrderRecord>, TicketError> {
        let orders = sqlx::query_as::<_, OrderRecord>(
            "SELECT id, event_id, buyer_id, quantity, total_price, status, created_at \
             FROM orders WHERE buyer_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(buyer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Counts a buyer's orders for pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::TransactionFailure`] on database failure.
    pub async fn count_orders_for_buyer(&self, buyer_id: BuyerId) -> Result<i64, TicketError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE buyer_id = $1")
            .bind(buyer_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}
