//! Thread-safe front end over a single [`OrderBook`].
//!
//! Every operation takes one lock around the whole book, so a submission and
//! the sweep it triggers are observed as a single step, as is a cancellation.
//! Reads go through the same lock and never see a half-applied sweep.

use super::book::OrderBook;
use super::error::OrderBookError;
use super::order::{Order, OrderId, OrderKind, Side};
use super::snapshot::OrderBookSnapshot;
use super::trade::{MatchResult, Trade, TradeListener};
use std::sync::{Arc, Mutex, MutexGuard, mpsc};
use tracing::{error, info, trace};

/// Single-writer matching engine for one instrument
pub struct MatchingEngine {
    book: Mutex<OrderBook>,
    trade_listener: Option<TradeListener>,
}

impl MatchingEngine {
    /// Create an engine with an empty book for `symbol`
    pub fn new(symbol: &str) -> Self {
        Self::from_book(OrderBook::new(symbol))
    }

    /// Wrap an existing book
    pub fn from_book(book: OrderBook) -> Self {
        info!("Matching engine started for {}", book.symbol());
        Self {
            book: Mutex::new(book),
            trade_listener: None,
        }
    }

    /// Create an engine that reports every trade to `trade_listener`
    pub fn with_trade_listener(symbol: &str, trade_listener: TradeListener) -> Self {
        let mut engine = Self::new(symbol);
        engine.set_trade_listener(trade_listener);
        engine
    }

    /// Create an engine whose trades are sent down a channel, in match order
    pub fn with_trade_channel(symbol: &str) -> (Self, mpsc::Receiver<Trade>) {
        let (sender, receiver) = mpsc::channel();
        let symbol_clone = symbol.to_string();

        let trade_listener: TradeListener = Arc::new(move |trade: &Trade| {
            if let Err(e) = sender.send(*trade) {
                error!("Failed to send trade for {}: {}", symbol_clone, e);
            }
        });

        (Self::with_trade_listener(symbol, trade_listener), receiver)
    }

    /// Set a trade listener for this engine
    pub fn set_trade_listener(&mut self, trade_listener: TradeListener) {
        self.trade_listener = Some(trade_listener);
    }

    /// Remove the trade listener from this engine
    pub fn remove_trade_listener(&mut self) {
        self.trade_listener = None;
    }

    fn lock(&self) -> Result<MutexGuard<'_, OrderBook>, OrderBookError> {
        self.book.lock().map_err(|_| {
            error!("Matching engine lock poisoned, refusing access to the book");
            OrderBookError::EngineUnavailable
        })
    }

    /// Submit an order, returning the id the engine assigned to it
    pub fn submit(
        &self,
        kind: OrderKind,
        price: u64,
        side: Side,
        quantity: u64,
    ) -> Result<OrderId, OrderBookError> {
        self.submit_with_result(kind, price, side, quantity)
            .map(|result| result.order_id)
    }

    /// Submit an order and return everything its sweep produced.
    ///
    /// Trades reach the listener before the lock is released, so listeners see
    /// them in global match order.
    pub fn submit_with_result(
        &self,
        kind: OrderKind,
        price: u64,
        side: Side,
        quantity: u64,
    ) -> Result<MatchResult, OrderBookError> {
        let mut book = self.lock()?;
        let result = book.submit(kind, price, side, quantity)?;

        if let Some(ref listener) = self.trade_listener {
            for trade in &result.trades {
                listener(trade);
            }
        }
        trace!(
            "Order book {}: Order {} produced {} trades",
            book.symbol(),
            result.order_id,
            result.trades.len()
        );

        Ok(result)
    }

    /// Submit a limit order
    pub fn submit_limit_order(
        &self,
        price: u64,
        quantity: u64,
        side: Side,
    ) -> Result<OrderId, OrderBookError> {
        self.submit(OrderKind::Limit, price, side, quantity)
    }

    /// Submit a market order
    pub fn submit_market_order(&self, quantity: u64, side: Side) -> Result<OrderId, OrderBookError> {
        self.submit(OrderKind::Market, 0, side, quantity)
    }

    /// Cancel a resting order
    pub fn cancel(&self, order_id: OrderId) -> Result<(), OrderBookError> {
        self.lock()?.cancel_order(order_id).map(|_| ())
    }

    /// Full-depth snapshot, consistent with respect to mutations
    pub fn snapshot(&self) -> Result<OrderBookSnapshot, OrderBookError> {
        Ok(self.lock()?.snapshot())
    }

    /// Snapshot of the top `depth` levels per side
    pub fn create_snapshot(&self, depth: usize) -> Result<OrderBookSnapshot, OrderBookError> {
        Ok(self.lock()?.create_snapshot(depth))
    }

    /// Copy of a resting order
    pub fn get_order(&self, order_id: OrderId) -> Result<Option<Order>, OrderBookError> {
        Ok(self.lock()?.get_order(order_id))
    }

    /// Get the best bid price, if any
    pub fn best_bid(&self) -> Result<Option<u64>, OrderBookError> {
        Ok(self.lock()?.best_bid())
    }

    /// Get the best ask price, if any
    pub fn best_ask(&self) -> Result<Option<u64>, OrderBookError> {
        Ok(self.lock()?.best_ask())
    }

    /// Runs a read-only closure against the book under the engine lock
    pub fn with_book<R>(&self, f: impl FnOnce(&OrderBook) -> R) -> Result<R, OrderBookError> {
        let book = self.lock()?;
        Ok(f(&book))
    }
}
