//! Service error types with HTTP status code mapping.
//!
//! [`TicketError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response,
//! so callers discriminate on the variant rather than matching message
//! strings.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::EventId;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4001,
///     "message": "insufficient tickets: only 2 remain",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`TicketError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category            | HTTP Status               |
/// |-----------|---------------------|---------------------------|
/// | 1000–1999 | Validation          | 400 Bad Request           |
/// | 2000–2999 | Not Found           | 404 Not Found             |
/// | 3000–3999 | Server              | 500 Internal Server Error |
/// | 4000–4999 | Business Rule       | 409 Conflict              |
#[derive(Debug, thiserror::Error)]
pub enum TicketError {
    /// No event exists with the given identifier.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// The requested quantity is below the minimum of one ticket.
    /// Rejected before any transaction is opened.
    #[error("invalid quantity: {0} (must be at least 1)")]
    InvalidQuantity(i32),

    /// The event does not have enough tickets left. Carries the count
    /// observed under the row lock so the caller can show it to the buyer.
    #[error("insufficient tickets: only {available} remain")]
    InsufficientInventory {
        /// Tickets remaining at the moment of the locked read.
        available: i32,
    },

    /// Database-level failure during the purchase transaction (constraint
    /// violation, connection loss). Always rolled back.
    #[error("transaction failure: {0}")]
    TransactionFailure(#[from] sqlx::Error),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TicketError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidQuantity(_) => 1001,
            Self::EventNotFound(_) => 2001,
            Self::InsufficientInventory { .. } => 4001,
            Self::TransactionFailure(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidQuantity(_) => StatusCode::BAD_REQUEST,
            Self::EventNotFound(_) => StatusCode::NOT_FOUND,
            Self::InsufficientInventory { .. } => StatusCode::CONFLICT,
            Self::TransactionFailure(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the message exposed to clients.
    ///
    /// Infrastructure failures are masked: the underlying database error is
    /// logged server-side but never echoed in the response body.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::TransactionFailure(_) => {
                "the purchase could not be processed; please try again later".to_string()
            }
            Self::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for TicketError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.public_message(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_map_to_distinct_statuses() {
        assert_eq!(
            TicketError::InvalidQuantity(0).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TicketError::EventNotFound(EventId::new()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            TicketError::InsufficientInventory { available: 0 }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            TicketError::TransactionFailure(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn insufficient_inventory_reports_remaining_count() {
        let err = TicketError::InsufficientInventory { available: 3 };
        assert!(err.public_message().contains("only 3 remain"));
        assert_eq!(err.error_code(), 4001);
    }

    #[test]
    fn transaction_failure_is_masked() {
        let err = TicketError::TransactionFailure(sqlx::Error::RowNotFound);
        assert!(!err.public_message().contains("row"));
        assert!(err.public_message().contains("try again later"));
    }

    #[test]
    fn error_codes_follow_category_ranges() {
        assert_eq!(TicketError::InvalidQuantity(-1).error_code(), 1001);
        assert_eq!(TicketError::EventNotFound(EventId::new()).error_code(), 2001);
        assert_eq!(
            TicketError::Internal("boom".to_string()).error_code(),
            3000
        );
    }
}
