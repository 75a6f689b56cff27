//! Trades flowing from the engine to a consumer thread over a channel.
//!
//! The engine publishes each trade before releasing its lock, so the consumer
//! sees them in the exact order they were matched even with several submitters.

use demos::setup_logger;
use orderbook_engine::{MatchingEngine, Side, Trade};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use tracing::info;

fn process_trades(receiver: mpsc::Receiver<Trade>) -> thread::JoinHandle<(u64, u64)> {
    thread::spawn(move || {
        info!("Trade processor started");
        let mut count = 0u64;
        let mut volume = 0u64;

        while let Ok(trade) = receiver.recv() {
            count += 1;
            volume += trade.quantity();
            info!(
                "Trade #{}: {} lots at {} (maker {}, taker {})",
                count,
                trade.quantity(),
                trade.price(),
                trade.maker_order_id(),
                trade.taker_side()
            );
        }

        info!("Trade processor stopped");
        (count, volume)
    })
}

fn main() {
    setup_logger();
    let (engine, receiver) = MatchingEngine::with_trade_channel("ETH-USD");
    let engine = Arc::new(engine);
    let processor = process_trades(receiver);

    let makers = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for i in 0..20u64 {
                let _ = engine.submit_limit_order(3000 + i % 5, 10, Side::Sell);
                let _ = engine.submit_limit_order(2990 - i % 5, 10, Side::Buy);
            }
        })
    };
    let takers = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for i in 0..20u64 {
                let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
                if let Err(err) = engine.submit_market_order(15, side) {
                    info!("Market order rejected: {}", err);
                }
            }
        })
    };

    let _ = makers.join();
    let _ = takers.join();

    // Dropping the last engine handle drops the sender and ends the processor.
    drop(engine);
    if let Ok((count, volume)) = processor.join() {
        info!("Processed {} trades, {} lots", count, volume);
    }
}
