use orderbook_sim::{BatchRunner, Simulator, SimulatorConfig};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_returns_runs_in_order() {
        let runner = BatchRunner::new(SimulatorConfig::default(), 500)
            .unwrap()
            .with_threads(4);

        let trajectories = runner.run(8, 200).unwrap();

        assert_eq!(trajectories.len(), 8);
        for (index, trajectory) in trajectories.iter().enumerate() {
            assert_eq!(trajectory.len(), 200);
            let expected = runner.simulator_for(index).unwrap().simulate(200);
            assert_eq!(trajectory, &expected);
        }
    }

    #[test]
    fn test_batch_independent_of_thread_count() {
        let config = SimulatorConfig::default().with_limit_rate(6.0);

        let single = BatchRunner::new(config.clone(), 42)
            .unwrap()
            .with_threads(1)
            .run(10, 150)
            .unwrap();
        let many = BatchRunner::new(config, 42)
            .unwrap()
            .with_threads(3)
            .run(10, 150)
            .unwrap();

        assert_eq!(single, many);
    }

    #[test]
    fn test_runs_use_distinct_streams() {
        let runner = BatchRunner::new(SimulatorConfig::default(), 1)
            .unwrap()
            .with_threads(2);

        let trajectories = runner.run(2, 300).unwrap();

        assert_ne!(trajectories[0], trajectories[1]);
        // Run 0 is the plain seeded simulator
        let plain = Simulator::new(SimulatorConfig::default(), 1)
            .unwrap()
            .simulate(300);
        assert_eq!(trajectories[0], plain);
    }

    #[test]
    fn test_run_with_reduces_each_trajectory() {
        let runner = BatchRunner::new(SimulatorConfig::default(), 9)
            .unwrap()
            .with_threads(2);

        let lengths = runner.run_with(5, 64, |trajectory| trajectory.len()).unwrap();

        assert_eq!(lengths, vec![64; 5]);
    }

    #[test]
    fn test_empty_batch() {
        let runner = BatchRunner::new(SimulatorConfig::default(), 9).unwrap();

        assert!(runner.run(0, 100).unwrap().is_empty());
        let runs = runner.run(3, 0).unwrap();
        assert!(runs.iter().all(|trajectory| trajectory.is_empty()));
    }

    #[test]
    fn test_with_threads_has_floor_of_one() {
        let runner = BatchRunner::new(SimulatorConfig::default(), 0)
            .unwrap()
            .with_threads(0);

        assert_eq!(runner.threads(), 1);
        assert_eq!(runner.base_seed(), 0);
        assert_eq!(runner.config(), &SimulatorConfig::default());
        assert_eq!(runner.run(2, 10).unwrap().len(), 2);
    }
}
