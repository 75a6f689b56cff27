//! OrderBook implementation for managing price levels and order matching.

pub mod book;
mod engine;
mod error;
pub mod level;
pub mod matching;
pub mod operations;
pub mod order;
mod private;
pub mod side;
mod snapshot;
pub mod trade;

pub use book::OrderBook;
pub use engine::MatchingEngine;
pub use error::OrderBookError;
pub use level::PriceLevel;
pub use operations::MAX_LIMIT_PRICE;
pub use order::{Order, OrderId, OrderKind, Side};
pub use side::BookSide;
pub use snapshot::{OrderBookSnapshot, PriceLevelSnapshot};
pub use trade::{MatchResult, Trade, TradeListener};
