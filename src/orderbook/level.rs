//! FIFO queue of resting orders sharing one price.
//!
//! Orders live in the book's slab arena. A level only stores the arena keys of
//! its head and tail; every node carries `prev`/`next` keys, so any order can be
//! unlinked in constant time given its key.

use super::order::Order;
use slab::Slab;

/// Arena slot holding an order and its neighbours in the level queue
#[derive(Debug, Clone)]
pub(crate) struct OrderNode {
    pub(crate) order: Order,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

impl OrderNode {
    pub(crate) fn new(order: Order) -> Self {
        Self {
            order,
            prev: None,
            next: None,
        }
    }
}

/// All resting orders at one price on one side, oldest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLevel {
    price: u64,
    pub(crate) head: Option<usize>,
    pub(crate) tail: Option<usize>,
    pub(crate) total_quantity: u64,
    pub(crate) order_count: usize,
}

impl PriceLevel {
    pub(crate) fn new(price: u64) -> Self {
        Self {
            price,
            head: None,
            tail: None,
            total_quantity: 0,
            order_count: 0,
        }
    }

    /// Price shared by every order in the queue
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Aggregate remaining quantity at this price
    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    /// Number of resting orders
    pub fn order_count(&self) -> usize {
        self.order_count
    }

    /// True once the last order has left the level
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Arena key of the oldest order
    pub(crate) fn head(&self) -> Option<usize> {
        self.head
    }

    /// Walks the queue from head to tail
    pub(crate) fn iter_fifo<'a>(&self, orders: &'a Slab<OrderNode>) -> LevelIter<'a> {
        LevelIter {
            orders,
            cursor: self.head,
        }
    }
}

/// Iterator over the orders of a level in time priority
pub(crate) struct LevelIter<'a> {
    orders: &'a Slab<OrderNode>,
    cursor: Option<usize>,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = &'a Order;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let node = self.orders.get(key)?;
        self.cursor = node.next;
        Some(&node.order)
    }
}
