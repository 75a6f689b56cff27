//! Core OrderBook implementation for managing price levels and orders

use super::level::OrderNode;
use super::order::{Order, OrderId, Side};
use super::side::BookSide;
use super::snapshot::{OrderBookSnapshot, PriceLevelSnapshot};
use super::trade::TransactionIdGenerator;
use crate::utils::current_time_millis;
use slab::Slab;
use std::collections::HashMap;
use tracing::trace;
use uuid::Uuid;

/// Where a resting order sits: enough to unlink it without scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OrderHandle {
    pub(crate) side: Side,
    pub(crate) price: u64,
    pub(crate) key: usize,
}

/// The OrderBook holds both sides of a single instrument and every resting order.
///
/// It is a plain single-writer structure: every mutating operation takes
/// `&mut self` and runs to completion. Share it between threads through
/// [`crate::MatchingEngine`], which serializes access behind one lock.
#[derive(Debug)]
pub struct OrderBook {
    /// The symbol or identifier for this order book
    pub(super) symbol: String,

    /// Bid side price levels (buy orders)
    pub(super) bids: BookSide,

    /// Ask side price levels (sell orders)
    pub(super) asks: BookSide,

    /// Arena owning every resting order; queues and handles hold its keys
    pub(super) orders: Slab<OrderNode>,

    /// Order id to (side, price, arena key) for O(1) cancellation
    pub(super) order_locations: HashMap<OrderId, OrderHandle>,

    /// Sequence value handed out to the next submitted order
    pub(super) next_order_id: u64,

    /// Generator for unique transaction IDs
    pub(super) transaction_id_generator: TransactionIdGenerator,

    /// The last price at which a trade occurred
    pub(super) last_trade_price: Option<u64>,
}

impl OrderBook {
    /// Create a new order book for the given symbol
    pub fn new(symbol: &str) -> Self {
        Self::with_capacity(symbol, 0)
    }

    /// Create a new order book with room for `capacity` resting orders before reallocating
    pub fn with_capacity(symbol: &str, capacity: usize) -> Self {
        // Create a unique namespace for this order book's transaction IDs
        let namespace = Uuid::new_v4();

        Self {
            symbol: symbol.to_string(),
            bids: BookSide::new(Side::Buy),
            asks: BookSide::new(Side::Sell),
            orders: Slab::with_capacity(capacity),
            order_locations: HashMap::with_capacity(capacity),
            next_order_id: 1,
            transaction_id_generator: TransactionIdGenerator::new(namespace),
            last_trade_price: None,
        }
    }

    /// Get the symbol of this order book
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Bid or ask side of the book
    pub fn book_side(&self, side: Side) -> &BookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    /// Get the best bid price, if any
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.best_price()
    }

    /// Get the best ask price, if any
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.best_price()
    }

    /// Get the mid price (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid as f64 + ask as f64) / 2.0),
            _ => None,
        }
    }

    /// Get the spread (best ask - best bid)
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.saturating_sub(bid)),
            _ => None,
        }
    }

    /// Get the last trade price, if any
    pub fn last_trade_price(&self) -> Option<u64> {
        self.last_trade_price
    }

    /// Number of resting orders across both sides
    pub fn order_count(&self) -> usize {
        self.order_locations.len()
    }

    /// Number of price levels on one side
    pub fn level_count(&self, side: Side) -> usize {
        self.book_side(side).len()
    }

    /// Aggregate remaining quantity resting at `price` on `side`
    pub fn liquidity_at(&self, price: u64, side: Side) -> u64 {
        self.book_side(side).liquidity_at(price)
    }

    /// True when nothing rests on either side
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Get an order by ID
    pub fn get_order(&self, order_id: OrderId) -> Option<Order> {
        let handle = self.order_locations.get(&order_id)?;
        self.orders.get(handle.key).map(|node| node.order.clone())
    }

    /// Get all orders at a specific price level, oldest first
    pub fn get_orders_at_price(&self, price: u64, side: Side) -> Vec<Order> {
        trace!(
            "Order book {}: Getting orders at price {} for side {:?}",
            self.symbol, price, side
        );
        match self.book_side(side).level(price) {
            Some(level) => level.iter_fifo(&self.orders).cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Get all orders in the book, bids then asks, each in priority order
    pub fn get_all_orders(&self) -> Vec<Order> {
        trace!("Order book {}: Getting all orders", self.symbol);
        let mut result = Vec::with_capacity(self.order_count());

        for book_side in [&self.bids, &self.asks] {
            for level in book_side.levels() {
                result.extend(level.iter_fifo(&self.orders).cloned());
            }
        }

        result
    }

    /// Create a snapshot of the top `depth` levels on each side
    pub fn create_snapshot(&self, depth: usize) -> OrderBookSnapshot {
        let collect = |book_side: &BookSide| -> Vec<PriceLevelSnapshot> {
            book_side
                .levels()
                .take(depth)
                .map(PriceLevelSnapshot::from)
                .collect()
        };

        OrderBookSnapshot {
            symbol: self.symbol.clone(),
            timestamp: current_time_millis(),
            bids: collect(&self.bids),
            asks: collect(&self.asks),
        }
    }

    /// Create a snapshot of every level on both sides
    pub fn snapshot(&self) -> OrderBookSnapshot {
        self.create_snapshot(usize::MAX)
    }

    /// Get the total volume at each price level
    pub fn get_volume_by_price(&self) -> (HashMap<u64, u64>, HashMap<u64, u64>) {
        let volumes = |book_side: &BookSide| -> HashMap<u64, u64> {
            book_side
                .levels()
                .map(|level| (level.price(), level.total_quantity()))
                .collect()
        };

        (volumes(&self.bids), volumes(&self.asks))
    }
}
