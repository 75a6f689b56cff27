//! One side of the book: price levels ordered by priority.

use super::level::PriceLevel;
use super::order::Side;
use std::collections::{BTreeMap, btree_map};
use std::iter::Rev;
use tracing::debug;

/// Price-keyed collection of levels for either bids or asks.
///
/// Levels are kept in a `BTreeMap` ordered ascending by price; the bid side
/// reads it from the back and the ask side from the front, so the best price
/// is found in O(log n) on both.
#[derive(Debug, Clone)]
pub struct BookSide {
    side: Side,
    levels: BTreeMap<u64, PriceLevel>,
}

impl BookSide {
    pub(crate) fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    /// Which side of the book this is
    pub fn side(&self) -> Side {
        self.side
    }

    /// True when no order rests on this side
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of price levels
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Highest bid or lowest ask
    pub fn best_price(&self) -> Option<u64> {
        match self.side {
            Side::Buy => self.levels.keys().next_back().copied(),
            Side::Sell => self.levels.keys().next().copied(),
        }
    }

    /// Level at `price`, if any order rests there
    pub fn level(&self, price: u64) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    pub(crate) fn level_mut(&mut self, price: u64) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&price)
    }

    /// Level at `price`, created empty when missing
    pub(crate) fn level_or_insert(&mut self, price: u64) -> &mut PriceLevel {
        let side = self.side;
        self.levels.entry(price).or_insert_with(|| {
            debug!("Opening {} level at {}", side, price);
            PriceLevel::new(price)
        })
    }

    pub(crate) fn remove_level(&mut self, price: u64) -> Option<PriceLevel> {
        let removed = self.levels.remove(&price);
        if removed.is_some() {
            debug!("Closing {} level at {}", self.side, price);
        }
        removed
    }

    /// Levels from best to worst price
    pub fn levels(&self) -> Levels<'_> {
        match self.side {
            Side::Buy => Levels::Descending(self.levels.values().rev()),
            Side::Sell => Levels::Ascending(self.levels.values()),
        }
    }

    /// Aggregate remaining quantity at `price`, zero when no level exists
    pub fn liquidity_at(&self, price: u64) -> u64 {
        self.levels
            .get(&price)
            .map(|level| level.total_quantity())
            .unwrap_or(0)
    }

    /// Aggregate remaining quantity across all levels
    pub fn total_quantity(&self) -> u128 {
        self.levels
            .values()
            .map(|level| u128::from(level.total_quantity()))
            .sum()
    }
}

/// Best-first iterator over the levels of one [`BookSide`]
pub enum Levels<'a> {
    /// Asks, lowest price first
    Ascending(btree_map::Values<'a, u64, PriceLevel>),
    /// Bids, highest price first
    Descending(Rev<btree_map::Values<'a, u64, PriceLevel>>),
}

impl<'a> Iterator for Levels<'a> {
    type Item = &'a PriceLevel;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Levels::Ascending(iter) => iter.next(),
            Levels::Descending(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Levels::Ascending(iter) => iter.size_hint(),
            Levels::Descending(iter) => iter.size_hint(),
        }
    }
}
