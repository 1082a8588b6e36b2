use orderbook_sim::{
    BatchRunner, EventRates, PlacementStrategy, SimulationError, Simulator, SimulatorConfig,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulatorConfig::default();

        assert_eq!(config.initial_price, 100);
        assert_eq!(config.tick_size, 1);
        assert_eq!(config.rates, EventRates::new(4.0, 1.0, 3.0));
        assert_eq!(config.order_size, 1);
        assert_eq!(config.levels, 5);
        assert_eq!(config.seed_volume, 10);
        assert_eq!(config.placement, PlacementStrategy::SpreadSensitive);
        assert_eq!(config.max_placement_depth, 5);
        assert!(config.validate().is_ok());
        assert_eq!(SimulatorConfig::new(), config);
    }

    #[test]
    fn test_builders() {
        let config = SimulatorConfig::new()
            .with_initial_price(2_000)
            .with_tick_size(5)
            .with_rates(2.0, 6.0, 1.0)
            .with_limit_rate(8.0)
            .with_order_size(4)
            .with_bootstrap(10, 50)
            .with_placement(PlacementStrategy::FixedOffset)
            .with_max_placement_depth(3);

        assert_eq!(config.initial_price, 2_000);
        assert_eq!(config.tick_size, 5);
        assert_eq!(config.rates, EventRates::new(2.0, 8.0, 1.0));
        assert_eq!(config.order_size, 4);
        assert_eq!(config.levels, 10);
        assert_eq!(config.seed_volume, 50);
        assert_eq!(config.placement, PlacementStrategy::FixedOffset);
        assert_eq!(config.max_placement_depth, 3);
    }

    #[test]
    fn test_cut_points() {
        let (market, limit) = EventRates::default().cut_points();

        assert_eq!(market, 0.5);
        assert_eq!(limit, 0.625);
        assert_eq!(EventRates::default().total(), 8.0);
    }

    #[test]
    fn test_negative_rate_rejected() {
        let config = SimulatorConfig::default().with_rates(1.0, -0.5, 1.0);

        match config.validate() {
            Err(SimulationError::NegativeRate { name, value }) => {
                assert_eq!(name, "limit");
                assert_eq!(value, -0.5);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_rate_rejected() {
        let rates = EventRates::new(f64::NAN, 1.0, 1.0);
        assert!(matches!(
            rates.validate(),
            Err(SimulationError::NegativeRate { name: "market", .. })
        ));

        let rates = EventRates::new(1.0, 1.0, f64::INFINITY);
        assert!(rates.validate().is_err());
    }

    #[test]
    fn test_zero_rates_rejected() {
        let config = SimulatorConfig::default().with_rates(0.0, 0.0, 0.0);

        assert!(matches!(
            Simulator::new(config.clone(), 1),
            Err(SimulationError::ZeroTotalRate)
        ));
        assert!(matches!(
            BatchRunner::new(config, 1),
            Err(SimulationError::ZeroTotalRate)
        ));
    }

    #[test]
    fn test_overflowing_rate_sum_rejected() {
        let config = SimulatorConfig::default().with_rates(f64::MAX, f64::MAX, 1.0);

        match config.validate() {
            Err(SimulationError::NonFiniteTotalRate { total }) => {
                assert!(total.is_infinite());
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(Simulator::new(config, 1).is_err());
    }

    #[test]
    fn test_large_finite_rates_keep_their_ratios() {
        let rates = EventRates::new(f64::MAX / 4.0, f64::MAX / 4.0, f64::MAX / 4.0);

        assert!(rates.validate().is_ok());
        let (market, limit) = rates.cut_points();
        assert!((market - 1.0 / 3.0).abs() < 1e-12);
        assert!((limit - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_nonzero_rate_is_valid() {
        assert!(EventRates::new(0.0, 0.0, 2.5).validate().is_ok());
    }

    #[test]
    fn test_invalid_sizes_rejected() {
        let zero_tick = SimulatorConfig::default().with_tick_size(0);
        assert!(matches!(
            zero_tick.validate(),
            Err(SimulationError::InvalidTickSize { tick_size: 0 })
        ));

        let negative_tick = SimulatorConfig::default().with_tick_size(-1);
        assert!(negative_tick.validate().is_err());

        let zero_order = SimulatorConfig::default().with_order_size(0);
        assert!(matches!(
            zero_order.validate(),
            Err(SimulationError::InvalidOrderSize { .. })
        ));

        let zero_depth = SimulatorConfig::default().with_max_placement_depth(0);
        assert!(matches!(
            zero_depth.validate(),
            Err(SimulationError::InvalidPlacementDepth { max_depth: 0 })
        ));
    }

    #[test]
    fn test_empty_bootstrap_is_valid() {
        let config = SimulatorConfig::default().with_bootstrap(0, 10);
        let sim = Simulator::new(config, 1).unwrap();

        assert!(sim.book().is_empty());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SimulatorConfig::default()
            .with_limit_rate(7.0)
            .with_placement(PlacementStrategy::FixedOffset);

        let json = config.to_json().unwrap();
        assert!(json.contains("\"fixed_offset\""));

        let restored = SimulatorConfig::from_json(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            SimulatorConfig::from_json(r#"{"initial_price": 250, "rates": {"market": 1.0, "limit": 2.0, "cancel": 3.0}}"#)
                .unwrap();

        assert_eq!(config.initial_price, 250);
        assert_eq!(config.rates, EventRates::new(1.0, 2.0, 3.0));
        assert_eq!(config.tick_size, 1);
        assert_eq!(config.levels, 5);
    }

    #[test]
    fn test_from_json_validates() {
        let result = SimulatorConfig::from_json(r#"{"tick_size": 0}"#);
        assert!(matches!(
            result,
            Err(SimulationError::InvalidTickSize { .. })
        ));

        let result = SimulatorConfig::from_json("not json");
        assert!(matches!(
            result,
            Err(SimulationError::DeserializationError { .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        let error = SimulationError::InvalidTickSize { tick_size: 0 };
        assert_eq!(error.to_string(), "invalid tick size: 0 (must be > 0)");

        let error = SimulationError::ZeroTotalRate;
        assert!(error.to_string().contains("sum to zero"));
    }
}
