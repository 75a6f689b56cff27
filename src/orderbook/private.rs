use super::book::{OrderBook, OrderHandle};
use super::error::OrderBookError;
use super::level::OrderNode;
use super::order::{Order, OrderId, Side};
use super::side::BookSide;
use tracing::trace;

impl OrderBook {
    pub(super) fn book_side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Reserves the next order id, refusing one that is already live
    pub(super) fn allocate_order_id(&mut self) -> Result<OrderId, OrderBookError> {
        let order_id = OrderId(self.next_order_id);
        if self.order_locations.contains_key(&order_id) {
            return Err(OrderBookError::InvalidOrder {
                message: format!("duplicate order id {}", order_id),
            });
        }
        self.next_order_id =
            self.next_order_id
                .checked_add(1)
                .ok_or_else(|| OrderBookError::InvalidOrder {
                    message: "order id space exhausted".to_string(),
                })?;
        Ok(order_id)
    }

    /// Appends an order to the tail of its level and registers its handle.
    /// Returns the arena key.
    pub(super) fn place_order_in_book(&mut self, order: Order) -> usize {
        let (order_id, side, price, quantity) = (
            order.id(),
            order.side(),
            order.price(),
            order.remaining_quantity(),
        );

        let key = self.orders.insert(OrderNode::new(order));
        let prev_tail = self.book_side_mut(side).level_or_insert(price).tail;

        if let Some(tail) = prev_tail {
            self.orders[tail].next = Some(key);
        }
        self.orders[key].prev = prev_tail;

        let level = self.book_side_mut(side).level_or_insert(price);
        if prev_tail.is_none() {
            level.head = Some(key);
        }
        level.tail = Some(key);
        level.order_count += 1;
        level.total_quantity += quantity;

        self.order_locations
            .insert(order_id, OrderHandle { side, price, key });
        trace!(
            "Order book {}: Placed order {} {} {}@{}",
            self.symbol, order_id, side, quantity, price
        );
        key
    }

    /// Removes an order from its level and the handle table in O(1).
    ///
    /// The level's aggregate drops by the order's remaining quantity and the
    /// level is discarded once empty. Returns the removed order.
    pub(super) fn unlink_order(&mut self, key: usize) -> Option<Order> {
        let node = self.orders.try_remove(key)?;
        let (order_id, side, price) = (node.order.id(), node.order.side(), node.order.price());

        if let Some(prev) = node.prev {
            self.orders[prev].next = node.next;
        }
        if let Some(next) = node.next {
            self.orders[next].prev = node.prev;
        }

        let book_side = self.book_side_mut(side);
        let mut is_empty = false;
        if let Some(level) = book_side.level_mut(price) {
            if node.prev.is_none() {
                level.head = node.next;
            }
            if node.next.is_none() {
                level.tail = node.prev;
            }
            level.order_count -= 1;
            level.total_quantity -= node.order.remaining_quantity();
            is_empty = level.is_empty();
        }
        if is_empty {
            book_side.remove_level(price);
        }

        self.order_locations.remove(&order_id);
        trace!(
            "Order book {}: Unlinked order {} {} at {}",
            self.symbol, order_id, side, price
        );
        Some(node.order)
    }

    /// Fills a resting order and debits its level's aggregate by the same amount.
    ///
    /// Callers never request more than the order's remaining quantity; a
    /// violation leaves the book untouched and is reported to the caller.
    pub(super) fn fill_resting(&mut self, key: usize, quantity: u64) -> Result<(), OrderBookError> {
        let node = self
            .orders
            .get_mut(key)
            .ok_or_else(|| OrderBookError::InvalidOrder {
                message: format!("no resting order at arena slot {}", key),
            })?;
        node.order.fill(quantity)?;
        let (side, price) = (node.order.side(), node.order.price());

        if let Some(level) = self.book_side_mut(side).level_mut(price) {
            level.total_quantity -= quantity;
        }
        Ok(())
    }
}
