//! Many independent trajectories across worker threads.
//!
//! Each run gets its own simulator on its own ChaCha stream (run `i` uses
//! stream `i` of the base seed), so the output depends only on the
//! configuration, the base seed and the run index, never on the number of
//! threads or on scheduling.

use super::config::SimulatorConfig;
use super::simulator::Simulator;
use crate::orderbook::{SimulationError, Trajectory};
use crossbeam::channel;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

/// Runs Monte Carlo batches of independent simulations
#[derive(Debug, Clone)]
pub struct BatchRunner {
    config: SimulatorConfig,
    base_seed: u64,
    threads: usize,
}

impl BatchRunner {
    /// Create a runner using every available core.
    ///
    /// # Errors
    /// Rejects an invalid configuration up front, before any thread starts.
    pub fn new(config: SimulatorConfig, base_seed: u64) -> Result<Self, SimulationError> {
        config.validate()?;
        let threads = std::thread::available_parallelism().map_or(1, |n| n.get());
        Ok(Self {
            config,
            base_seed,
            threads,
        })
    }

    /// Limit the number of worker threads (at least one is always used)
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Configuration shared by every run
    #[must_use]
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Base seed; run `i` uses stream `i` of it
    #[must_use]
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Number of worker threads
    #[must_use]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Build the simulator used for run `index`
    pub fn simulator_for(&self, index: usize) -> Result<Simulator, SimulationError> {
        Simulator::with_stream(self.config.clone(), self.base_seed, index as u64)
    }

    /// Simulate `runs` trajectories of `steps` steps each.
    ///
    /// The result is in run order: element `i` is the trajectory of run `i`.
    ///
    /// # Errors
    /// [`SimulationError::WorkerPanicked`] if a worker thread panicked.
    pub fn run(&self, runs: usize, steps: usize) -> Result<Vec<Trajectory>, SimulationError> {
        let workers = self.threads.min(runs).max(1);
        info!(
            "Starting batch: {} runs x {} steps on {} threads (seed {})",
            runs, steps, workers, self.base_seed
        );

        let next_run = AtomicUsize::new(0);
        let (sender, receiver) = channel::unbounded();

        crossbeam::scope(|scope| {
            for worker in 0..workers {
                let sender = sender.clone();
                let next_run = &next_run;
                scope.spawn(move |_| {
                    loop {
                        let index = next_run.fetch_add(1, Ordering::Relaxed);
                        if index >= runs {
                            break;
                        }
                        let result = self
                            .simulator_for(index)
                            .map(|mut simulator| simulator.simulate(steps));
                        debug!("worker {} finished run {}", worker, index);
                        if sender.send((index, result)).is_err() {
                            break;
                        }
                    }
                });
            }
        })
        .map_err(|_| SimulationError::WorkerPanicked)?;
        drop(sender);

        let mut slots: Vec<Option<Trajectory>> = vec![None; runs];
        for (index, result) in receiver {
            slots[index] = Some(result?);
        }

        let trajectories = slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(SimulationError::WorkerPanicked)?;

        info!("Batch finished: {} trajectories", trajectories.len());
        Ok(trajectories)
    }

    /// Run a batch and reduce each trajectory with `analyze`, keeping run
    /// order.
    pub fn run_with<T, F>(
        &self,
        runs: usize,
        steps: usize,
        analyze: F,
    ) -> Result<Vec<T>, SimulationError>
    where
        F: Fn(&Trajectory) -> T,
    {
        Ok(self.run(runs, steps)?.iter().map(analyze).collect())
    }
}
