use orderbook_sim::{
    EventKind, EventRates, PlacementStrategy, SimulationError, Simulator, SimulatorConfig,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn default_simulator(seed: u64) -> Simulator {
        Simulator::new(SimulatorConfig::default(), seed).unwrap()
    }

    #[test]
    fn test_bootstrap_state() {
        let sim = default_simulator(1);

        assert_eq!(sim.best_bid(), Some(99));
        assert_eq!(sim.best_ask(), Some(101));
        assert_eq!(sim.mid_price(), Some(100.0));
        assert_eq!(sim.spread(), Some(2));
        assert_eq!(sim.bid_depth(), 10);
        assert_eq!(sim.ask_depth(), 10);
        assert_eq!(sim.relative_bid_depth(), Some(0.5));
        assert_eq!(sim.imbalance(), 0.0);
        assert_eq!(sim.book().total_volume(), 100);
        assert_eq!(sim.steps_taken(), 0);
        assert_eq!(sim.seed(), 1);
    }

    #[test]
    fn test_market_buy_clears_first_ask_level() {
        let mut sim = default_simulator(1);

        let fill = sim.market_buy(Some(10));

        assert_eq!(fill.filled, 10);
        assert_eq!(sim.book().asks().volume_at(101), 0);
        assert_eq!(sim.best_ask(), Some(102));
        assert_eq!(sim.spread(), Some(3));
    }

    #[test]
    fn test_market_orders_default_to_order_size() {
        let config = SimulatorConfig::default().with_order_size(3);
        let mut sim = Simulator::new(config, 1).unwrap();

        assert_eq!(sim.market_sell(None).filled, 3);
        assert_eq!(sim.bid_depth(), 7);
        assert_eq!(sim.market_buy(Some(0)).filled, 0);
        assert_eq!(sim.ask_depth(), 10);
    }

    #[test]
    fn test_zero_size_market_orders_are_noops() {
        let config = SimulatorConfig::default().with_order_size(3);
        let mut sim = Simulator::new(config, 1).unwrap();
        let before = sim.book().clone();

        let buy = sim.market_buy(Some(0));
        let sell = sim.market_sell(Some(0));

        assert_eq!((buy.filled, buy.last_price), (0, None));
        assert_eq!((sell.filled, sell.last_price), (0, None));
        assert_eq!(sim.book(), &before);
    }

    #[test]
    fn test_cancel_on_empty_book_is_noop() {
        let mut sim = default_simulator(1);
        sim.market_buy(Some(u64::MAX));
        sim.market_sell(Some(u64::MAX));
        assert!(sim.book().is_empty());

        assert_eq!(sim.cancel_order(), EventKind::CancelNone);
        assert!(sim.book().is_empty());
        assert_eq!(sim.spread(), None);
        assert_eq!(sim.imbalance(), 0.0);
    }

    #[test]
    fn test_limit_orders_on_empty_side_use_initial_price() {
        let config = SimulatorConfig::default()
            .with_initial_price(500)
            .with_placement(PlacementStrategy::FixedOffset);
        let mut sim = Simulator::new(config, 8).unwrap();
        sim.market_buy(Some(u64::MAX));

        let price = sim.limit_sell();

        assert!((501..=505).contains(&price));
        assert_eq!(sim.best_ask(), Some(price));
    }

    #[test]
    fn test_limit_orders_add_one_order_size() {
        let mut sim = default_simulator(4);
        let before = sim.book().total_volume();

        sim.limit_buy();
        sim.limit_sell();

        assert_eq!(sim.book().total_volume(), before + 2);
    }

    #[test]
    fn test_simulate_produces_one_snapshot_per_step() {
        let mut sim = default_simulator(42);

        let trajectory = sim.simulate(250);

        assert_eq!(trajectory.len(), 250);
        assert_eq!(sim.steps_taken(), 250);
        for (i, snapshot) in trajectory.iter().enumerate() {
            assert_eq!(snapshot.step, i as u64 + 1);
        }
        let last = trajectory.last().unwrap();
        assert_eq!(last.best_bid, sim.best_bid());
        assert_eq!(last.best_ask, sim.best_ask());
    }

    #[test]
    fn test_simulate_zero_steps() {
        let mut sim = default_simulator(42);
        let before = sim.book().clone();

        let trajectory = sim.simulate(0);

        assert!(trajectory.is_empty());
        assert_eq!(sim.book(), &before);
    }

    #[test]
    fn test_consecutive_simulate_calls_continue_steps() {
        let mut sim = default_simulator(5);

        sim.simulate(10);
        let second = sim.simulate(5);

        assert_eq!(second[0].step, 11);
        assert_eq!(second.last().unwrap().step, 15);
    }

    #[test]
    fn test_snapshots_are_consistent() {
        let mut sim = default_simulator(17);

        for snapshot in &sim.simulate(2_000) {
            match (snapshot.best_bid, snapshot.best_ask) {
                (Some(bid), Some(ask)) => {
                    assert_eq!(snapshot.spread, Some(ask - bid));
                    assert_eq!(snapshot.mid_price, Some((bid as f64 + ask as f64) / 2.0));
                }
                _ => {
                    assert_eq!(snapshot.spread, None);
                    assert_eq!(snapshot.mid_price, None);
                }
            }
            assert!((-1.0..=1.0).contains(&snapshot.imbalance));
            if let Some(relative) = snapshot.relative_bid_depth {
                assert!((0.0..=1.0).contains(&relative));
            }
        }
    }

    #[test]
    fn test_market_only_rates_drain_the_book() {
        let config = SimulatorConfig::default().with_rates(1.0, 0.0, 0.0);
        let mut sim = Simulator::new(config, 3).unwrap();

        let trajectory = sim.simulate(500);

        assert!(trajectory.iter().all(|s| s.event.is_market()));
        // 500 unit orders against 100 units of seeded depth
        assert!(sim.book().is_empty());
    }

    #[test]
    fn test_set_rates_takes_effect_next_step() {
        let mut sim = default_simulator(9);
        sim.simulate(20);

        sim.set_rates(EventRates::new(0.0, 0.0, 1.0)).unwrap();
        let trajectory = sim.simulate(50);

        assert!(trajectory.iter().all(|s| s.event.is_cancel()));
        assert_eq!(sim.rates(), EventRates::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_set_rates_rejects_invalid_rates() {
        let mut sim = default_simulator(9);

        let result = sim.set_rates(EventRates::new(0.0, 0.0, 0.0));

        assert!(matches!(result, Err(SimulationError::ZeroTotalRate)));
        assert_eq!(sim.rates(), EventRates::default());
    }

    #[test]
    fn test_limit_only_fixed_offset_keeps_best_prices() {
        let config = SimulatorConfig::default()
            .with_rates(0.0, 1.0, 0.0)
            .with_placement(PlacementStrategy::FixedOffset);
        let mut sim = Simulator::new(config, 12).unwrap();

        let trajectory = sim.simulate(300);

        assert!(trajectory.iter().all(|s| s.spread == Some(2)));
        assert_eq!(sim.book().total_volume(), 400);
    }

    #[test]
    fn test_snapshot_uses_current_step() {
        let mut sim = default_simulator(2);
        sim.simulate(7);

        let snapshot = sim.snapshot(EventKind::CancelNone);

        assert_eq!(snapshot.step, 7);
        assert_eq!(snapshot.best_bid, sim.best_bid());
    }
}
