use demos::setup_logger;
use orderbook_engine::{MatchingEngine, OrderId, Side};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

// Number of threads to use for the test
const THREAD_COUNT: usize = 8;
// Duration of the test in seconds
const TEST_DURATION_SECS: u64 = 3;

fn main() {
    setup_logger();
    info!("Multi-threaded MatchingEngine Performance Test");
    info!("----------------------------------------------");
    info!("Threads: {}", THREAD_COUNT);
    info!("Duration: {} seconds", TEST_DURATION_SECS);

    run_performance_test();
}

fn populate_engine(engine: &MatchingEngine, order_count: u64) {
    for i in 0..order_count {
        let _ = engine.submit_limit_order(9900 + (i % 20) * 5, 10, Side::Buy);
        let _ = engine.submit_limit_order(10100 + (i % 20) * 5, 10, Side::Sell);
    }
}

fn run_performance_test() {
    let engine = Arc::new(MatchingEngine::new("PERF-TEST"));
    populate_engine(&engine, 500);

    let barrier = Arc::new(Barrier::new(THREAD_COUNT + 1));
    let running = Arc::new(AtomicBool::new(true));
    let mut handles = Vec::with_capacity(THREAD_COUNT);

    for thread_id in 0..THREAD_COUNT {
        let thread_engine = Arc::clone(&engine);
        let thread_barrier = Arc::clone(&barrier);
        let thread_running = Arc::clone(&running);

        handles.push(thread::spawn(move || {
            thread_barrier.wait();
            let mut local_counter = 0u64;
            let mut own_orders: Vec<OrderId> = Vec::new();

            while thread_running.load(Ordering::Relaxed) {
                let buy_side = local_counter % 2 == 0;
                let side = if buy_side { Side::Buy } else { Side::Sell };

                match thread_id % 4 {
                    0 => {
                        // Makers
                        let price = if buy_side { 9900 } else { 10100 } + (local_counter % 10) * 10;
                        if let Ok(id) = thread_engine.submit_limit_order(price, 10, side) {
                            own_orders.push(id);
                        }
                    }
                    1 => {
                        // Takers
                        let _ = thread_engine.submit_market_order(5, side);
                    }
                    2 => {
                        // Cancellers of their own resting orders
                        if let Some(id) = own_orders.pop() {
                            let _ = thread_engine.cancel(id);
                        } else if let Ok(id) = thread_engine.submit_limit_order(9800, 1, Side::Buy) {
                            own_orders.push(id);
                        }
                    }
                    _ => {
                        // Readers
                        let _ = thread_engine.create_snapshot(10);
                    }
                }
                local_counter += 1;
            }
            local_counter
        }));
    }

    let start = Instant::now();
    barrier.wait();
    thread::sleep(Duration::from_secs(TEST_DURATION_SECS));
    running.store(false, Ordering::Relaxed);

    let total: u64 = handles
        .into_iter()
        .filter_map(|handle| handle.join().ok())
        .sum();
    let elapsed = start.elapsed().as_secs_f64();

    info!("Total operations: {}", total);
    info!("Operations/second: {:.2}", total as f64 / elapsed);
    if let Ok(snapshot) = engine.snapshot() {
        info!(
            "Final book: best bid {:?}, best ask {:?}, {} bid levels, {} ask levels",
            snapshot.best_bid(),
            snapshot.best_ask(),
            snapshot.bids.len(),
            snapshot.asks.len()
        );
    }
}
