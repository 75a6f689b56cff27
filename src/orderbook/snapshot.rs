//! Order book snapshot for market data

use super::error::OrderBookError;
use super::level::PriceLevel;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Aggregate view of one price level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevelSnapshot {
    /// Level price
    pub price: u64,

    /// Aggregate remaining quantity at this price
    pub quantity: u64,

    /// Number of resting orders at this price
    pub order_count: usize,
}

impl From<&PriceLevel> for PriceLevelSnapshot {
    fn from(level: &PriceLevel) -> Self {
        Self {
            price: level.price(),
            quantity: level.total_quantity(),
            order_count: level.order_count(),
        }
    }
}

/// A snapshot of the order book state at a specific point in time.
///
/// Bids are listed highest price first and asks lowest price first, so the
/// first entry of each side is the top of book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// The symbol or identifier for this order book
    pub symbol: String,

    /// Timestamp when the snapshot was created (milliseconds since epoch)
    pub timestamp: u64,

    /// Snapshot of bid price levels
    pub bids: Vec<PriceLevelSnapshot>,

    /// Snapshot of ask price levels
    pub asks: Vec<PriceLevelSnapshot>,
}

impl OrderBookSnapshot {
    /// Get the best bid price and quantity
    pub fn best_bid(&self) -> Option<(u64, u64)> {
        let bids = self.bids.first().map(|level| (level.price, level.quantity));
        trace!("best_bid: {:?}", bids);
        bids
    }

    /// Get the best ask price and quantity
    pub fn best_ask(&self) -> Option<(u64, u64)> {
        let ask = self.asks.first().map(|level| (level.price, level.quantity));
        trace!("best_ask: {:?}", ask);
        ask
    }

    /// Get the mid price (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<f64> {
        let mid_price = match (self.best_bid(), self.best_ask()) {
            (Some((bid_price, _)), Some((ask_price, _))) => {
                Some((bid_price as f64 + ask_price as f64) / 2.0)
            }
            _ => None,
        };
        trace!("mid_price: {:?}", mid_price);
        mid_price
    }

    /// Get the spread (best ask - best bid)
    pub fn spread(&self) -> Option<u64> {
        let spread = match (self.best_bid(), self.best_ask()) {
            (Some((bid_price, _)), Some((ask_price, _))) => {
                Some(ask_price.saturating_sub(bid_price))
            }
            _ => None,
        };
        trace!("spread: {:?}", spread);
        spread
    }

    /// Calculate the total volume on the bid side
    pub fn total_bid_volume(&self) -> u128 {
        Self::volume(&self.bids)
    }

    /// Calculate the total volume on the ask side
    pub fn total_ask_volume(&self) -> u128 {
        Self::volume(&self.asks)
    }

    /// Calculate the total value on the bid side (price * quantity)
    pub fn total_bid_value(&self) -> u128 {
        Self::value(&self.bids)
    }

    /// Calculate the total value on the ask side (price * quantity)
    pub fn total_ask_value(&self) -> u128 {
        Self::value(&self.asks)
    }

    // Sums are widened to u128: each level fits in u64, their sum may not.
    fn volume(levels: &[PriceLevelSnapshot]) -> u128 {
        levels.iter().map(|level| u128::from(level.quantity)).sum()
    }

    fn value(levels: &[PriceLevelSnapshot]) -> u128 {
        levels
            .iter()
            .map(|level| u128::from(level.price) * u128::from(level.quantity))
            .sum()
    }

    /// Serializes the snapshot to JSON for reporting consumers
    pub fn to_json(&self) -> Result<String, OrderBookError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a snapshot previously produced by [`OrderBookSnapshot::to_json`]
    pub fn from_json(data: &str) -> Result<Self, OrderBookError> {
        Ok(serde_json::from_str(data)?)
    }
}
