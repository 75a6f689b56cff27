//! Trade records produced by the match loop and the listener hook that receives them.

use super::order::{OrderId, Side};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// One execution between a resting bid and a resting ask.
///
/// The price is always the maker's price: the order of the pair that reached
/// the book first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    transaction_id: Uuid,
    price: u64,
    quantity: u64,
    bid_order_id: OrderId,
    ask_order_id: OrderId,
    maker_order_id: OrderId,
    taker_side: Side,
    timestamp: u64,
}

impl Trade {
    pub(crate) fn new(
        transaction_id: Uuid,
        price: u64,
        quantity: u64,
        bid_order_id: OrderId,
        ask_order_id: OrderId,
        timestamp: u64,
    ) -> Self {
        // Ids are issued in arrival order, the lower one was resting first.
        let (maker_order_id, taker_side) = if bid_order_id < ask_order_id {
            (bid_order_id, Side::Sell)
        } else {
            (ask_order_id, Side::Buy)
        };
        Self {
            transaction_id,
            price,
            quantity,
            bid_order_id,
            ask_order_id,
            maker_order_id,
            taker_side,
            timestamp,
        }
    }

    /// Unique identifier of this execution
    pub fn transaction_id(&self) -> Uuid {
        self.transaction_id
    }

    /// Execution price
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Matched quantity
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Buy order on this trade
    pub fn bid_order_id(&self) -> OrderId {
        self.bid_order_id
    }

    /// Sell order on this trade
    pub fn ask_order_id(&self) -> OrderId {
        self.ask_order_id
    }

    /// The order whose price set the execution price
    pub fn maker_order_id(&self) -> OrderId {
        self.maker_order_id
    }

    /// Side of the order that arrived last and crossed the spread
    pub fn taker_side(&self) -> Side {
        self.taker_side
    }

    /// Execution time in milliseconds since epoch
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

/// Outcome of one submission: the assigned id plus everything its sweep produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Identifier assigned to the submitted order
    pub order_id: OrderId,

    /// Trades in the order they were matched
    pub trades: Vec<Trade>,

    /// Quantity of the submitted order left unexecuted
    pub remaining_quantity: u64,

    /// True when the submitted order was fully executed
    pub is_complete: bool,

    /// True when the unexecuted remainder rests in the book
    pub resting: bool,
}

impl MatchResult {
    /// Total quantity executed by the submitted order
    pub fn executed_quantity(&self) -> u64 {
        self.trades.iter().map(|trade| trade.quantity()).sum()
    }

    /// Total notional executed (price * quantity), widened so it cannot overflow
    pub fn executed_value(&self) -> u128 {
        self.trades
            .iter()
            .map(|trade| u128::from(trade.price()) * u128::from(trade.quantity()))
            .sum()
    }
}

/// Callback invoked once per trade, in match order.
///
/// The engine calls it while holding the book lock; it must not call back into
/// the same engine.
pub type TradeListener = Arc<dyn Fn(&Trade) + Send + Sync>;

/// Issues transaction ids unique within one book
#[derive(Debug)]
pub(crate) struct TransactionIdGenerator {
    namespace: Uuid,
    counter: u64,
}

impl TransactionIdGenerator {
    pub(crate) fn new(namespace: Uuid) -> Self {
        Self {
            namespace,
            counter: 0,
        }
    }

    pub(crate) fn next_id(&mut self) -> Uuid {
        self.counter += 1;
        Uuid::new_v5(&self.namespace, &self.counter.to_be_bytes())
    }
}
