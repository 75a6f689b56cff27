//! Order book operations like submitting and canceling orders

use super::book::OrderBook;
use super::error::OrderBookError;
use super::order::{Order, OrderId, OrderKind, Side};
use super::trade::MatchResult;
use crate::utils::current_time_millis;
use tracing::{trace, warn};

/// Highest price a limit order may carry.
///
/// `u64::MAX` is reserved as the effective price of market bids so that they
/// outrank every limit bid.
pub const MAX_LIMIT_PRICE: u64 = u64::MAX - 1;

impl OrderBook {
    /// Submit an order and run the match loop.
    ///
    /// The order gets the next engine-assigned id, joins the tail of its price
    /// level and is then matched against the opposite side under price-time
    /// priority. A limit order's unexecuted remainder rests in the book.
    ///
    /// Market orders are ranked at an unbounded price (`u64::MAX` for a buy,
    /// `0` for a sell) so they cross everything on the opposite side. They are
    /// rejected with [`OrderBookError::InsufficientLiquidity`] when that side is
    /// empty, and whatever they could not execute is cancelled rather than left
    /// resting.
    ///
    /// # Errors
    /// [`OrderBookError::InvalidOrder`] for a zero quantity, a limit price
    /// above [`MAX_LIMIT_PRICE`], or a quantity that would push its level's
    /// aggregate past `u64::MAX`. A rejected submission leaves the book
    /// untouched.
    pub fn submit(
        &mut self,
        kind: OrderKind,
        price: u64,
        side: Side,
        quantity: u64,
    ) -> Result<MatchResult, OrderBookError> {
        trace!(
            "Order book {}: Submitting {} {} order {}@{}",
            self.symbol, kind, side, quantity, price
        );

        let effective_price = match (kind, side) {
            (OrderKind::Limit, _) => price,
            (OrderKind::Market, Side::Buy) => u64::MAX,
            (OrderKind::Market, Side::Sell) => 0,
        };

        if let Err(err) = self.validate_submission(kind, price, effective_price, side, quantity) {
            warn!("Order book {}: Rejected submission: {}", self.symbol, err);
            return Err(err);
        }

        let order_id = self.allocate_order_id()?;
        let order = Order::new(
            order_id,
            kind,
            side,
            effective_price,
            quantity,
            current_time_millis(),
        );
        self.place_order_in_book(order);

        let trades = self.match_orders();

        let remaining_quantity = self
            .get_order(order_id)
            .map(|order| order.remaining_quantity())
            .unwrap_or(0);
        let resting = remaining_quantity > 0 && kind == OrderKind::Limit;

        if kind == OrderKind::Market && remaining_quantity > 0 {
            if let Some(handle) = self.order_locations.get(&order_id).copied() {
                self.unlink_order(handle.key);
            }
            trace!(
                "Order book {}: Market order {} cancelled {} unfilled",
                self.symbol, order_id, remaining_quantity
            );
        }

        Ok(MatchResult {
            order_id,
            trades,
            remaining_quantity,
            is_complete: remaining_quantity == 0,
            resting,
        })
    }

    /// Submit a limit order
    pub fn submit_limit_order(
        &mut self,
        price: u64,
        quantity: u64,
        side: Side,
    ) -> Result<MatchResult, OrderBookError> {
        self.submit(OrderKind::Limit, price, side, quantity)
    }

    /// Submit a market order
    pub fn submit_market_order(
        &mut self,
        quantity: u64,
        side: Side,
    ) -> Result<MatchResult, OrderBookError> {
        self.submit(OrderKind::Market, 0, side, quantity)
    }

    /// Cancel a resting order, removing its whole remaining quantity.
    ///
    /// Returns the order as it stood when removed.
    ///
    /// # Errors
    /// [`OrderBookError::OrderNotFound`] if the id never rested, was already
    /// cancelled, or was fully filled.
    pub fn cancel_order(&mut self, order_id: OrderId) -> Result<Order, OrderBookError> {
        trace!("Order book {}: Cancelling order {}", self.symbol, order_id);
        let handle = self
            .order_locations
            .get(&order_id)
            .copied()
            .ok_or_else(|| OrderBookError::OrderNotFound(order_id.to_string()))?;

        self.unlink_order(handle.key)
            .ok_or_else(|| OrderBookError::OrderNotFound(order_id.to_string()))
    }

    fn validate_submission(
        &self,
        kind: OrderKind,
        price: u64,
        effective_price: u64,
        side: Side,
        quantity: u64,
    ) -> Result<(), OrderBookError> {
        if quantity == 0 {
            return Err(OrderBookError::InvalidOrder {
                message: "quantity must be greater than zero".to_string(),
            });
        }

        match kind {
            OrderKind::Limit if price > MAX_LIMIT_PRICE => Err(OrderBookError::InvalidOrder {
                message: format!("limit price {} above maximum {}", price, MAX_LIMIT_PRICE),
            }),
            OrderKind::Market if self.book_side(side.opposite()).is_empty() => {
                Err(OrderBookError::InsufficientLiquidity {
                    side,
                    requested: quantity,
                    available: 0,
                })
            }
            _ => {
                // Checked here so the level aggregate never overflows after
                // the order is already linked in.
                let resting = self.book_side(side).liquidity_at(effective_price);
                if resting.checked_add(quantity).is_none() {
                    return Err(OrderBookError::InvalidOrder {
                        message: format!(
                            "quantity {} overflows the {} aggregate of {} at {}",
                            quantity, side, resting, effective_price
                        ),
                    });
                }
                Ok(())
            }
        }
    }
}
