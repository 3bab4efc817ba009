//! # ticket-gateway
//!
//! REST API for event ticket sales built around a transactional inventory
//! ledger. The one hard problem in this service is the purchase path:
//! concurrent buyers contend for a finite `available_tickets` counter on an
//! event row, and overselling is a real business-impact bug. The ledger
//! resolves the race with a row-level `SELECT ... FOR UPDATE` inside a single
//! PostgreSQL transaction; everything else is conventional request plumbing.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── TicketService (service/)
//!     │
//!     ├── TicketStore (persistence/)
//!     │
//!     └── PostgreSQL (row-locked purchase transaction)
//! ```
//!
//! Authentication and catalog browsing belong to external collaborators;
//! this crate owns inventory and orders, nothing else.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
