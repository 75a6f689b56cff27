//! Book invariants checked after every step of a long deterministic order stream.

use orderbook_engine::{OrderBook, OrderId, OrderKind, Side, Trade};

// Small linear congruential generator so the stream is reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn range(&mut self, low: u64, high: u64) -> u64 {
        low + self.next() % (high - low)
    }
}

fn assert_book_consistent(book: &OrderBook) {
    // Never crossed at rest.
    if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
        assert!(bid < ask, "book left crossed: bid {bid} ask {ask}");
    }

    let snapshot = book.snapshot();
    let mut counted_orders = 0;
    for (side, levels) in [(Side::Buy, &snapshot.bids), (Side::Sell, &snapshot.asks)] {
        for window in levels.windows(2) {
            match side {
                Side::Buy => assert!(window[0].price > window[1].price),
                Side::Sell => assert!(window[0].price < window[1].price),
            }
        }
        for level in levels.iter() {
            assert!(level.quantity > 0, "empty level left at {}", level.price);
            let orders = book.get_orders_at_price(level.price, side);
            assert_eq!(orders.len(), level.order_count);
            let sum: u64 = orders.iter().map(|order| order.remaining_quantity()).sum();
            assert_eq!(sum, level.quantity, "aggregate drifted at {}", level.price);

            for pair in orders.windows(2) {
                assert!(pair[0].id() < pair[1].id(), "queue out of arrival order");
            }
            for order in &orders {
                assert!(order.remaining_quantity() > 0);
                assert!(order.remaining_quantity() <= order.initial_quantity());
                assert_eq!(order.kind(), OrderKind::Limit);
            }
            counted_orders += orders.len();
        }
    }
    assert_eq!(counted_orders, book.order_count());
}

#[test]
fn test_invariants_hold_over_random_stream() {
    let mut rng = Lcg(0x5eed);
    let mut book = OrderBook::new("FUZZ");
    let mut live: Vec<OrderId> = Vec::new();
    let mut all_trades: Vec<Trade> = Vec::new();
    let mut submitted_quantity = 0u64;
    let mut cancelled_quantity = 0u64;
    let mut market_unfilled = 0u64;

    for _ in 0..3000 {
        match rng.range(0, 10) {
            0..=5 => {
                let side = if rng.range(0, 2) == 0 { Side::Buy } else { Side::Sell };
                let price = rng.range(95, 106);
                let quantity = rng.range(1, 50);
                let result = book.submit_limit_order(price, quantity, side).unwrap();
                submitted_quantity += quantity;

                for trade in &result.trades {
                    // Limit price is never violated for the incoming order.
                    match side {
                        Side::Buy => assert!(trade.price() <= price),
                        Side::Sell => assert!(trade.price() >= price),
                    }
                }
                assert_eq!(
                    result.executed_quantity() + result.remaining_quantity,
                    quantity
                );
                if result.resting {
                    live.push(result.order_id);
                }
                all_trades.extend(result.trades);
            }
            6 | 7 => {
                let side = if rng.range(0, 2) == 0 { Side::Buy } else { Side::Sell };
                let quantity = rng.range(1, 80);
                if let Ok(result) = book.submit_market_order(quantity, side) {
                    submitted_quantity += quantity;
                    assert!(!result.resting);
                    assert_eq!(
                        result.executed_quantity() + result.remaining_quantity,
                        quantity
                    );
                    market_unfilled += result.remaining_quantity;
                    all_trades.extend(result.trades);
                }
            }
            _ => {
                if !live.is_empty() {
                    let index = rng.range(0, live.len() as u64) as usize;
                    let id = live.swap_remove(index);
                    if let Ok(order) = book.cancel_order(id) {
                        cancelled_quantity += order.remaining_quantity();
                    }
                }
            }
        }
        assert_book_consistent(&book);
    }

    // Every unit submitted is either traded (on both sides), cancelled, or resting.
    let traded: u64 = all_trades.iter().map(|trade| trade.quantity()).sum();
    let snapshot = book.snapshot();
    let resting = u64::try_from(snapshot.total_bid_volume() + snapshot.total_ask_volume()).unwrap();
    assert_eq!(
        submitted_quantity,
        2 * traded + cancelled_quantity + market_unfilled + resting
    );
}

#[test]
fn test_per_trade_conservation_on_both_orders() {
    let mut book = OrderBook::new("CONSERVE");
    let bids: Vec<OrderId> = [30, 20, 10]
        .iter()
        .map(|quantity| book.submit_limit_order(100, *quantity, Side::Buy).unwrap().order_id)
        .collect();
    let before: Vec<u64> = bids
        .iter()
        .map(|id| book.get_order(*id).unwrap().remaining_quantity())
        .collect();
    let level_before = book.liquidity_at(100, Side::Buy);

    let result = book.submit(OrderKind::Limit, 100, Side::Sell, 35).unwrap();

    let mut consumed = 0;
    for (id, start) in bids.iter().zip(before) {
        let after = book
            .get_order(*id)
            .map(|order| order.remaining_quantity())
            .unwrap_or(0);
        let matched: u64 = result
            .trades
            .iter()
            .filter(|trade| trade.bid_order_id() == *id)
            .map(|trade| trade.quantity())
            .sum();
        assert_eq!(start - after, matched);
        consumed += matched;
    }
    assert_eq!(consumed, 35);
    assert_eq!(book.liquidity_at(100, Side::Buy), level_before - 35);
}
