//! Order book error types

use super::order::{OrderId, Side};
use std::fmt;

/// Errors that can occur within the OrderBook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderBookError {
    /// Submission rejected before touching the book
    InvalidOrder {
        /// Description of the rejection
        message: String,
    },

    /// Order not found in the book
    OrderNotFound(String),

    /// A fill was requested for more than an order's remaining quantity
    OverfillAttempt {
        /// Order the fill was applied to
        order_id: OrderId,
        /// Quantity requested by the fill
        requested: u64,
        /// Quantity the order still had open
        remaining: u64,
    },

    /// Insufficient liquidity for market order
    InsufficientLiquidity {
        /// The side of the market order
        side: Side,
        /// Quantity requested
        requested: u64,
        /// Quantity available
        available: u64,
    },

    /// Snapshot could not be serialized
    SerializationError {
        /// Underlying serializer message
        message: String,
    },

    /// The engine lock was poisoned by a panic during a mutation
    EngineUnavailable,
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::InvalidOrder { message } => write!(f, "Invalid order: {}", message),
            OrderBookError::OrderNotFound(id) => write!(f, "Order not found: {}", id),
            OrderBookError::OverfillAttempt {
                order_id,
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "Overfill attempt on order {}: requested {}, remaining {}",
                    order_id, requested, remaining
                )
            }
            OrderBookError::InsufficientLiquidity {
                side,
                requested,
                available,
            } => {
                write!(
                    f,
                    "Insufficient liquidity for {} order: requested {}, available {}",
                    side, requested, available
                )
            }
            OrderBookError::SerializationError { message } => {
                write!(f, "Serialization error: {}", message)
            }
            OrderBookError::EngineUnavailable => {
                write!(f, "Matching engine unavailable: lock poisoned")
            }
        }
    }
}

impl std::error::Error for OrderBookError {}

impl From<serde_json::Error> for OrderBookError {
    fn from(err: serde_json::Error) -> Self {
        OrderBookError::SerializationError {
            message: err.to_string(),
        }
    }
}
