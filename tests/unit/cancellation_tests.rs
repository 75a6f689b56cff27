//! Cancellation behaviour seen from outside the crate.

#[cfg(test)]
mod tests {
    use orderbook_engine::{OrderBook, OrderBookError, OrderId, Side};

    #[test]
    fn test_cancel_each_position_in_queue() {
        for victim in 0..3 {
            let mut book = OrderBook::new("CANCEL");
            let ids: Vec<OrderId> = (0..3)
                .map(|i| book.submit_limit_order(100, 10 + i, Side::Sell).unwrap().order_id)
                .collect();

            let cancelled = book.cancel_order(ids[victim]).unwrap();
            assert_eq!(cancelled.id(), ids[victim]);

            let survivors: Vec<OrderId> = book
                .get_orders_at_price(100, Side::Sell)
                .iter()
                .map(|order| order.id())
                .collect();
            let expected: Vec<OrderId> = ids
                .iter()
                .copied()
                .filter(|id| *id != ids[victim])
                .collect();
            assert_eq!(survivors, expected);
            assert_eq!(
                book.liquidity_at(100, Side::Sell),
                33 - cancelled.remaining_quantity()
            );
        }
    }

    #[test]
    fn test_cancel_last_order_drops_level() {
        let mut book = OrderBook::new("CANCEL");
        let keep = book.submit_limit_order(99, 1, Side::Buy).unwrap().order_id;
        let dropped = book.submit_limit_order(100, 1, Side::Buy).unwrap().order_id;

        book.cancel_order(dropped).unwrap();

        assert_eq!(book.level_count(Side::Buy), 1);
        assert_eq!(book.best_bid(), Some(99));
        assert!(book.get_order(keep).is_some());
    }

    #[test]
    fn test_cancel_after_partial_fill_releases_remaining_only() {
        let mut book = OrderBook::new("CANCEL");
        let ask = book.submit_limit_order(100, 40, Side::Sell).unwrap().order_id;
        book.submit_limit_order(100, 15, Side::Buy).unwrap();
        book.submit_limit_order(100, 5, Side::Sell).unwrap();

        assert_eq!(book.liquidity_at(100, Side::Sell), 30);
        let cancelled = book.cancel_order(ask).unwrap();
        assert_eq!(cancelled.remaining_quantity(), 25);
        assert_eq!(book.liquidity_at(100, Side::Sell), 5);
    }

    #[test]
    fn test_cancel_never_succeeds_twice() {
        let mut book = OrderBook::new("CANCEL");
        let ids: Vec<OrderId> = (0..50)
            .map(|i| book.submit_limit_order(1000 + i % 5, 1, Side::Buy).unwrap().order_id)
            .collect();

        for id in &ids {
            book.cancel_order(*id).unwrap();
        }
        for id in &ids {
            assert!(matches!(
                book.cancel_order(*id),
                Err(OrderBookError::OrderNotFound(_))
            ));
        }
        assert!(book.is_empty());
    }
}
