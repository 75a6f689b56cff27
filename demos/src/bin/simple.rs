use demos::setup_logger;
use orderbook_engine::{MatchingEngine, Side};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();
    let (engine, trades) = MatchingEngine::with_trade_channel("BTC-USDT");

    // Two bids at different prices, then an ask that crosses both.
    let a = engine.submit_limit_order(11, 100, Side::Buy)?;
    let b = engine.submit_limit_order(10, 100, Side::Buy)?;
    let c = engine.submit_limit_order(10, 150, Side::Sell)?;
    info!("Submitted bids {} and {}, ask {}", a, b, c);

    for trade in trades.try_iter() {
        info!(
            "Trade {}: bid {} ask {} {}@{}",
            trade.transaction_id(),
            trade.bid_order_id(),
            trade.ask_order_id(),
            trade.quantity(),
            trade.price()
        );
    }

    // B keeps 50 resting; cancel it and try again to see the error.
    if let Some(order) = engine.get_order(b)? {
        info!("Order {} still rests with {}", order.id(), order.remaining_quantity());
    }
    engine.cancel(b)?;
    if let Err(err) = engine.cancel(b) {
        info!("Second cancel rejected: {}", err);
    }

    engine.submit_limit_order(9, 40, Side::Buy)?;
    engine.submit_limit_order(12, 25, Side::Sell)?;
    let snapshot = engine.snapshot()?;
    info!(
        "Best bid {:?}, best ask {:?}, spread {:?}",
        snapshot.best_bid(),
        snapshot.best_ask(),
        snapshot.spread()
    );
    info!("Snapshot: {}", snapshot.to_json()?);
    Ok(())
}
