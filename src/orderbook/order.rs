//! The order entity and the identifiers it is keyed by.

use super::error::OrderBookError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Engine-assigned order identifier.
///
/// Identifiers come from a per-book sequence starting at 1, so a lower id always
/// means an earlier arrival. Callers never construct one for submission; they
/// receive it back from the submit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl OrderId {
    /// Raw sequence value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Side of the book an order rests on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Bid
    Buy,
    /// Ask
    Sell,
}

impl Side {
    /// The side this one trades against
    pub fn opposite(&self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Pricing behaviour of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKind {
    /// Executes against whatever the opposite side offers, never rests
    Market,
    /// Executes at its limit price or better, rests otherwise
    Limit,
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderKind::Market => write!(f, "MARKET"),
            OrderKind::Limit => write!(f, "LIMIT"),
        }
    }
}

/// An order owned by the book.
///
/// Everything except `remaining_quantity` is fixed at submission. For market
/// orders `price` is the effective price the book ranks them at, not a limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    kind: OrderKind,
    side: Side,
    price: u64,
    initial_quantity: u64,
    remaining_quantity: u64,
    timestamp: u64,
}

impl Order {
    pub(crate) fn new(
        id: OrderId,
        kind: OrderKind,
        side: Side,
        price: u64,
        quantity: u64,
        timestamp: u64,
    ) -> Self {
        Self {
            id,
            kind,
            side,
            price,
            initial_quantity: quantity,
            remaining_quantity: quantity,
            timestamp,
        }
    }

    /// Order identifier
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Market or limit
    pub fn kind(&self) -> OrderKind {
        self.kind
    }

    /// Side of the book
    pub fn side(&self) -> Side {
        self.side
    }

    /// Price the order is ranked at
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Quantity at submission
    pub fn initial_quantity(&self) -> u64 {
        self.initial_quantity
    }

    /// Quantity still open
    pub fn remaining_quantity(&self) -> u64 {
        self.remaining_quantity
    }

    /// Quantity executed so far
    pub fn filled_quantity(&self) -> u64 {
        self.initial_quantity - self.remaining_quantity
    }

    /// Submission time in milliseconds since epoch
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// True once nothing remains open
    pub fn is_filled(&self) -> bool {
        self.remaining_quantity == 0
    }

    /// Reduces the open quantity by `quantity`.
    ///
    /// A request above the remaining quantity leaves the order untouched and
    /// returns [`OrderBookError::OverfillAttempt`].
    pub fn fill(&mut self, quantity: u64) -> Result<(), OrderBookError> {
        if quantity > self.remaining_quantity {
            return Err(OrderBookError::OverfillAttempt {
                order_id: self.id,
                requested: quantity,
                remaining: self.remaining_quantity,
            });
        }
        self.remaining_quantity -= quantity;
        Ok(())
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}/{}",
            self.id,
            self.kind,
            self.side,
            self.price,
            self.remaining_quantity,
            self.initial_quantity
        )
    }
}
