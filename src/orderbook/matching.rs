//! Contains the core matching engine logic for the order book.

use super::book::OrderBook;
use super::order::Side;
use super::trade::Trade;
use crate::utils::current_time_millis;
use tracing::trace;

impl OrderBook {
    /// Runs the match loop until the book no longer crosses.
    ///
    /// Repeatedly pairs the head of the best bid level with the head of the best
    /// ask level while best ask <= best bid. Each pairing fills both orders by
    /// the smaller remaining quantity and produces one [`Trade`] at the maker's
    /// price. Fully filled orders leave the book, and so does any level they
    /// empty. Returns the trades in the order they happened.
    ///
    /// # Panics
    /// If a fill exceeds an order's remaining quantity. The matched quantity is
    /// always the minimum of both remainders, so this only fires on a broken
    /// book.
    pub(super) fn match_orders(&mut self) -> Vec<Trade> {
        let mut trades = Vec::new();

        while let (Some(bid_price), Some(ask_price)) = (self.bids.best_price(), self.asks.best_price())
        {
            if ask_price > bid_price {
                break;
            }

            // Drain the two best levels head against head. A level emptied by
            // a fill is dropped by `unlink_order`, which ends this inner loop.
            while let (Some(bid_key), Some(ask_key)) = (
                self.bids.level(bid_price).and_then(|level| level.head()),
                self.asks.level(ask_price).and_then(|level| level.head()),
            ) {
                let bid = &self.orders[bid_key].order;
                let ask = &self.orders[ask_key].order;
                let (bid_id, ask_id) = (bid.id(), ask.id());
                let matched = bid.remaining_quantity().min(ask.remaining_quantity());
                let price = if bid_id < ask_id {
                    bid.price()
                } else {
                    ask.price()
                };

                self.fill_resting(bid_key, matched)
                    .unwrap_or_else(|err| panic!("Order book {}: {}", self.symbol, err));
                self.fill_resting(ask_key, matched)
                    .unwrap_or_else(|err| panic!("Order book {}: {}", self.symbol, err));

                let trade = Trade::new(
                    self.transaction_id_generator.next_id(),
                    price,
                    matched,
                    bid_id,
                    ask_id,
                    current_time_millis(),
                );
                trace!(
                    "Order book {}: Matched bid {} with ask {} for {} at {}",
                    self.symbol, bid_id, ask_id, matched, price
                );
                self.last_trade_price = Some(price);
                trades.push(trade);

                if self.orders[bid_key].order.is_filled() {
                    self.unlink_order(bid_key);
                }
                if self.orders[ask_key].order.is_filled() {
                    self.unlink_order(ask_key);
                }
            }
        }

        trades
    }

    /// Quantity a `side` order limited to `price_limit` could execute right now.
    ///
    /// Walks the opposite side from its best price without touching the book.
    /// `None` means no price limit.
    pub fn peek_match(
        &self,
        side: Side,
        quantity: u64,
        price_limit: Option<u64>,
    ) -> u64 {
        let opposite = self.book_side(side.opposite());
        let mut matched_quantity = 0u64;

        for level in opposite.levels() {
            if matched_quantity >= quantity {
                break;
            }

            if let Some(limit) = price_limit {
                let crosses = match side {
                    Side::Buy => level.price() <= limit,
                    Side::Sell => level.price() >= limit,
                };
                if !crosses {
                    break;
                }
            }

            let needed_quantity = quantity - matched_quantity;
            matched_quantity += needed_quantity.min(level.total_quantity());
        }

        matched_quantity
    }
}
