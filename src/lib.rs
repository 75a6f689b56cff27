//! # Single-Instrument Limit Order Book Matching Engine
//!
//! A limit order book for one instrument that accepts buy and sell orders,
//! keeps resting orders ranked by price and arrival time, and matches crossing
//! interest into trades as soon as it appears.
//!
//! ## Key Features
//!
//! - **Price-Time Priority**: The best price trades first; at one price the
//!   oldest order trades first.
//!
//! - **Partial Fills and Sweeps**: An incoming order walks as many price levels
//!   and resting orders as its quantity and limit allow.
//!
//! - **O(1) Cancellation**: Orders live in a slab arena. Each price level is a
//!   doubly-linked FIFO of arena keys, and a handle table maps every order id to
//!   its side, price and key, so a cancel unlinks without scanning.
//!
//! - **Incremental Liquidity**: Every level tracks its aggregate remaining
//!   quantity, updated on insert, fill and removal.
//!
//! - **Single-Writer Concurrency**: [`MatchingEngine`] serializes submissions,
//!   cancellations and reads behind one lock around the whole book.
//!
//! ## Matching Rules
//!
//! 1. **Engine-assigned ids**: Submitting returns an [`OrderId`] from a per-book
//!    sequence. Callers cannot supply their own.
//! 2. **Maker price**: A trade executes at the price of whichever order reached
//!    the book first.
//! 3. **Market orders**: A market order crosses every price on the opposite
//!    side. With an empty opposite side it is rejected with
//!    [`OrderBookError::InsufficientLiquidity`]; any quantity left after the
//!    sweep is cancelled, never rested.
//!
//! ## Example
//!
//! ```rust
//! use orderbook_engine::{OrderBook, Side};
//!
//! let mut book = OrderBook::new("BTC-USD");
//! let bid = book.submit_limit_order(10, 100, Side::Buy).unwrap();
//! let ask = book.submit_limit_order(10, 100, Side::Sell).unwrap();
//!
//! assert_eq!(ask.trades.len(), 1);
//! assert_eq!(ask.trades[0].bid_order_id(), bid.order_id);
//! assert!(book.is_empty());
//! ```
//!
//! ## Status
//! Prices and quantities are integer ticks and lots. There is no persistence,
//! network transport or multi-instrument routing.

pub mod orderbook;

mod utils;

pub use orderbook::{
    BookSide, MAX_LIMIT_PRICE, MatchResult, MatchingEngine, Order, OrderBook, OrderBookError,
    OrderBookSnapshot, OrderId, OrderKind, PriceLevel, PriceLevelSnapshot, Side, Trade,
    TradeListener,
};
pub use utils::current_time_millis;
