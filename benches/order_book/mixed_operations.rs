use criterion::Criterion;
use orderbook_engine::{OrderBook, OrderId, Side};
use std::hint::black_box;

/// Register benchmarks for mixed/realistic order book operations
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook - Mixed Operations");

    // Benchmark a realistic trading scenario with mixed operations
    group.bench_function("realistic_trading_scenario", |b| {
        b.iter(|| {
            let mut order_book = OrderBook::new("TEST-SYMBOL");
            let mut resting: Vec<OrderId> = Vec::with_capacity(100);

            // Phase 1: Add initial orders on both sides of the book
            for i in 0..50 {
                if let Ok(result) = order_book.submit_limit_order(990 + i % 10, 10, Side::Buy) {
                    resting.push(result.order_id);
                }
                if let Ok(result) = order_book.submit_limit_order(1010 + i % 10, 10, Side::Sell) {
                    resting.push(result.order_id);
                }
            }

            // Phase 2: Cancel every third resting order
            for id in resting.iter().step_by(3) {
                let _ = black_box(order_book.cancel_order(*id));
            }

            // Phase 3: Aggressive flow on both sides
            for _ in 0..10 {
                let _ = black_box(order_book.submit_market_order(15, Side::Buy));
                let _ = black_box(order_book.submit_limit_order(995, 20, Side::Sell));
            }

            // Phase 4: Read the book
            black_box(order_book.create_snapshot(10));
        })
    });

    group.finish();
}
