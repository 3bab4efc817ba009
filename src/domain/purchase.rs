//! Purchase request and receipt types, plus the price arithmetic used
//! inside the transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{BuyerId, EventId, OrderId};
use crate::error::TicketError;

/// A validated request to purchase tickets.
///
/// Built at the API boundary from the request body; the ledger never sees
/// a malformed shape. Buyer existence is enforced upstream by the external
/// credential store.
#[derive(Debug, Clone, Copy)]
pub struct PurchaseRequest {
    /// The buyer placing the order.
    pub buyer_id: BuyerId,
    /// The event whose inventory is decremented.
    pub event_id: EventId,
    /// Number of tickets requested.
    pub quantity: i32,
}

impl PurchaseRequest {
    /// Checks the quantity precondition.
    ///
    /// This runs before any transaction or connection is acquired, so a
    /// bad request never costs a database round-trip.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::InvalidQuantity`] if `quantity < 1`.
    pub fn validate(&self) -> Result<(), TicketError> {
        if self.quantity < 1 {
            return Err(TicketError::InvalidQuantity(self.quantity));
        }
        Ok(())
    }
}

/// The durable outcome of a successful purchase.
#[derive(Debug, Clone)]
pub struct PurchaseReceipt {
    /// Identifier of the newly created order.
    pub order_id: OrderId,
    /// Event the tickets were purchased for.
    pub event_id: EventId,
    /// Buyer who placed the order.
    pub buyer_id: BuyerId,
    /// Number of tickets purchased.
    pub quantity: i32,
    /// Total charged: unit price at the locked read times quantity.
    pub total_price: Decimal,
    /// Server-side creation timestamp of the order row.
    pub created_at: DateTime<Utc>,
}

/// Computes the order total from the unit price read under the row lock.
///
/// Returns `None` on overflow. The price is always the one read inside the
/// locked transaction, never a client-supplied or previously displayed
/// value.
#[must_use]
pub fn compute_total(unit_price: Decimal, quantity: i32) -> Option<Decimal> {
    unit_price.checked_mul(Decimal::from(quantity))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn request(quantity: i32) -> PurchaseRequest {
        PurchaseRequest {
            buyer_id: BuyerId::new(),
            event_id: EventId::new(),
            quantity,
        }
    }

    #[test]
    fn zero_and_negative_quantities_are_rejected() {
        assert!(matches!(
            request(0).validate(),
            Err(TicketError::InvalidQuantity(0))
        ));
        assert!(matches!(
            request(-3).validate(),
            Err(TicketError::InvalidQuantity(-3))
        ));
    }

    #[test]
    fn single_ticket_is_the_minimum_valid_quantity() {
        assert!(request(1).validate().is_ok());
    }

    #[test]
    fn total_is_unit_price_times_quantity() {
        assert_eq!(compute_total(dec!(50.00), 2), Some(dec!(100.00)));
        assert_eq!(compute_total(dec!(19.99), 3), Some(dec!(59.97)));
        assert_eq!(compute_total(dec!(0.00), 5), Some(dec!(0.00)));
    }

    #[test]
    fn overflowing_total_is_detected() {
        assert_eq!(compute_total(Decimal::MAX, 2), None);
    }
}
