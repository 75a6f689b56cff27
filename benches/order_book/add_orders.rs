use criterion::{BenchmarkId, Criterion};
use orderbook_engine::{OrderBook, Side};
use std::hint::black_box;

/// Register all benchmarks for resting orders in an order book
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook - Add Orders");

    // Distinct prices: one new level per order
    group.bench_function("add_limit_orders_new_levels", |b| {
        b.iter(|| {
            let mut order_book = OrderBook::new("TEST-SYMBOL");
            for i in 0..100 {
                let _ = black_box(order_book.submit_limit_order(1000 + i, 10, Side::Buy));
            }
        })
    });

    // Same price: queue append only
    group.bench_function("add_limit_orders_same_level", |b| {
        b.iter(|| {
            let mut order_book = OrderBook::new("TEST-SYMBOL");
            for _ in 0..100 {
                let _ = black_box(order_book.submit_limit_order(1000, 10, Side::Sell));
            }
        })
    });

    // Parametrized benchmark with different order counts
    for order_count in [10, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("order_count_scaling", order_count),
            order_count,
            |b, &order_count| {
                b.iter(|| {
                    let mut order_book = OrderBook::with_capacity("TEST-SYMBOL", order_count);
                    for i in 0..order_count as u64 {
                        let _ = black_box(order_book.submit_limit_order(
                            1000 + i % 20,
                            10,
                            Side::Buy,
                        ));
                    }
                })
            },
        );
    }

    group.finish();
}
