use criterion::{BenchmarkId, Criterion};
use orderbook_engine::{OrderBook, OrderId, Side};
use std::hint::black_box;

fn setup_queue(order_count: u64) -> (OrderBook, Vec<OrderId>) {
    let mut book = OrderBook::with_capacity("BENCH_SYMBOL", order_count as usize);
    let ids = (0..order_count)
        .map(|_| book.submit_limit_order(1000, 10, Side::Buy).unwrap().order_id)
        .collect();
    (book, ids)
}

/// Register benchmarks for cancellation. Cost should stay flat as the queue grows.
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook - Cancel Orders");

    for queue_length in [10u64, 1_000, 100_000].iter() {
        group.bench_with_input(
            BenchmarkId::new("cancel_middle_of_queue", queue_length),
            queue_length,
            |b, &queue_length| {
                b.iter_batched(
                    || setup_queue(queue_length),
                    |(mut book, ids)| {
                        let victim = ids[ids.len() / 2];
                        black_box(book.cancel_order(victim))
                    },
                    criterion::BatchSize::LargeInput,
                )
            },
        );
    }

    group.finish();
}
