//! Ticket service: orchestrates purchases, availability reads, and order
//! history.

use crate::domain::{BuyerId, EventId, PurchaseReceipt, PurchaseRequest};
use crate::error::TicketError;
use crate::persistence::{EventAvailability, OrderRecord, TicketStore};

/// Orchestration layer for all ticket operations.
///
/// Stateless coordinator: holds no in-process locks or caches. All
/// coordination between concurrent purchases happens through the database
/// row lock, so multiple server instances behave identically to one.
#[derive(Debug, Clone)]
pub struct TicketService {
    store: TicketStore,
}

impl TicketService {
    /// Creates a new `TicketService`.
    #[must_use]
    pub fn new(store: TicketStore) -> Self {
        Self { store }
    }

    /// Purchases tickets: validates the quantity precondition, then runs
    /// the row-locked inventory transaction.
    ///
    /// Not idempotent: two identical requests produce two orders and two
    /// decrements. Deduplication, if wanted, belongs to the request layer.
    ///
    /// # Errors
    ///
    /// - [`TicketError::InvalidQuantity`] if `quantity < 1`; no transaction
    ///   is opened.
    /// - [`TicketError::EventNotFound`] if the event does not exist.
    /// - [`TicketError::InsufficientInventory`] if fewer tickets remain than
    ///   requested, with the observed count.
    /// - [`TicketError::TransactionFailure`] on database-level failure.
    pub async fn purchase(
        &self,
        request: &PurchaseRequest,
    ) -> Result<PurchaseReceipt, TicketError> {
        request.validate()?;

        match self.store.purchase_tickets(request).await {
            Ok(receipt) => {
                tracing::info!(
                    order_id = %receipt.order_id,
                    event_id = %receipt.event_id,
                    buyer_id = %receipt.buyer_id,
                    quantity = receipt.quantity,
                    total_price = %receipt.total_price,
                    "tickets purchased"
                );
                Ok(receipt)
            }
            Err(err) => {
                match &err {
                    TicketError::InsufficientInventory { available } => {
                        tracing::warn!(
                            event_id = %request.event_id,
                            requested = request.quantity,
                            available = *available,
                            "purchase rejected: insufficient tickets"
                        );
                    }
                    TicketError::EventNotFound(_) => {
                        tracing::warn!(
                            event_id = %request.event_id,
                            requested = request.quantity,
                            "purchase rejected: unknown event"
                        );
                    }
                    other => {
                        tracing::error!(
                            event_id = %request.event_id,
                            requested = request.quantity,
                            error = %other,
                            "purchase transaction failed"
                        );
                    }
                }
                Err(err)
            }
        }
    }

    /// Returns the display snapshot of an event's inventory.
    ///
    /// The snapshot is read without a lock and may be slightly stale; the
    /// purchase path never trusts it.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::EventNotFound`] if the event does not exist,
    /// or [`TicketError::TransactionFailure`] on database failure.
    pub async fn availability(
        &self,
        event_id: EventId,
    ) -> Result<EventAvailability, TicketError> {
        self.store
            .event_availability(event_id)
            .await?
            .ok_or(TicketError::EventNotFound(event_id))
    }

    /// Returns one page of a buyer's order history plus the total count.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::TransactionFailure`] on database failure.
    pub async fn order_history(
        &self,
        buyer_id: BuyerId,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<OrderRecord>, i64), TicketError> {
        let total = self.store.count_orders_for_buyer(buyer_id).await?;
        let orders = self.store.orders_for_buyer(buyer_id, limit, offset).await?;
        Ok((orders, total))
    }
}
