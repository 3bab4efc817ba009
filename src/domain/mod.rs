//! Domain layer: identifiers, order status, and purchase types.
//!
//! This module contains the core domain model: type-safe identifiers for
//! events, buyers, and orders; the order status enumeration; and the
//! validated purchase request/receipt pair that flows through the ledger.

pub mod buyer_id;
pub mod event_id;
pub mod order;
pub mod purchase;

pub use buyer_id::BuyerId;
pub use event_id::EventId;
pub use order::{OrderId, OrderStatus};
pub use purchase::{PurchaseReceipt, PurchaseRequest};
