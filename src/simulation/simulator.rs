//! The simulation loop: one random event per step, one snapshot per step.

use super::config::{EventRates, SimulatorConfig};
use super::event::{EventSource, OrderEvent};
use crate::orderbook::{
    BookSnapshot, EventKind, MarketFill, OrderBook, PlacementPolicy, Side, SimulationError,
    Trajectory,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

/// Discrete-event limit order book simulator.
///
/// Owns its book, its configuration and its random generator. Two
/// simulators built from the same configuration and seed produce identical
/// trajectories; simulators share no state, so independent instances can be
/// run on different threads.
///
/// # Examples
/// ```
/// use orderbook_sim::{Simulator, SimulatorConfig};
///
/// let mut sim = Simulator::new(SimulatorConfig::default(), 42).unwrap();
/// assert_eq!(sim.best_bid(), Some(99));
/// assert_eq!(sim.best_ask(), Some(101));
///
/// let trajectory = sim.simulate(100);
/// assert_eq!(trajectory.len(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulatorConfig,
    book: OrderBook,
    events: EventSource,
    placement: PlacementPolicy,
    rng: ChaCha8Rng,
    seed: u64,
    steps: u64,
}

impl Simulator {
    /// Build a simulator seeded with `seed`.
    ///
    /// # Errors
    /// Returns the first [`SimulationError`] reported by
    /// [`SimulatorConfig::validate`].
    pub fn new(config: SimulatorConfig, seed: u64) -> Result<Self, SimulationError> {
        Self::with_stream(config, seed, 0)
    }

    /// Build a simulator on ChaCha stream `stream` of `seed`.
    ///
    /// Different streams of the same seed are independent sequences, which
    /// is how batch runs give every instance its own generator.
    pub fn with_stream(
        config: SimulatorConfig,
        seed: u64,
        stream: u64,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream);

        let book = OrderBook::with_depth(
            config.initial_price,
            config.tick_size,
            config.levels,
            config.seed_volume,
        );
        let events = EventSource::new(config.rates)?;
        let placement = PlacementPolicy {
            strategy: config.placement,
            tick_size: config.tick_size,
            max_depth: config.max_placement_depth,
            reference_price: config.initial_price,
            order_size: config.order_size,
        };

        debug!(
            "simulator created: seed {} stream {}, price {}, tick {}, rates {:?}, placement {:?}",
            seed, stream, config.initial_price, config.tick_size, config.rates, config.placement
        );

        Ok(Self {
            config,
            book,
            events,
            placement,
            rng,
            seed,
            steps: 0,
        })
    }

    /// Configuration this simulator was built with
    #[must_use]
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Read-only view of the book
    #[must_use]
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Seed the generator was created from
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of steps taken so far
    #[must_use]
    pub fn steps_taken(&self) -> u64 {
        self.steps
    }

    /// Event rates in effect for the next step
    #[must_use]
    pub fn rates(&self) -> EventRates {
        self.events.rates()
    }

    /// Replace the event rates from the next step on.
    ///
    /// # Errors
    /// Rejects negative, non-finite or all-zero rates and keeps the old ones.
    pub fn set_rates(&mut self, rates: EventRates) -> Result<(), SimulationError> {
        self.events.set_rates(rates)?;
        debug!("rates changed at step {}: {:?}", self.steps, rates);
        Ok(())
    }

    /// Execute a market buy against the asks. `None` uses the configured
    /// order size; `Some(0)` executes nothing and is not replaced by it.
    pub fn market_buy(&mut self, size: Option<u64>) -> MarketFill {
        let size = size.unwrap_or(self.config.order_size);
        self.book.match_market_order(Side::Buy, size)
    }

    /// Execute a market sell against the bids. `None` uses the configured
    /// order size; `Some(0)` executes nothing and is not replaced by it.
    pub fn market_sell(&mut self, size: Option<u64>) -> MarketFill {
        let size = size.unwrap_or(self.config.order_size);
        self.book.match_market_order(Side::Sell, size)
    }

    /// Post a limit buy according to the placement policy. Returns its price.
    pub fn limit_buy(&mut self) -> i64 {
        self.placement.place(&mut self.book, Side::Buy, &mut self.rng)
    }

    /// Post a limit sell according to the placement policy. Returns its price.
    pub fn limit_sell(&mut self) -> i64 {
        self.placement.place(&mut self.book, Side::Sell, &mut self.rng)
    }

    /// Run the cancellation policy once
    pub fn cancel_order(&mut self) -> EventKind {
        self.book.cancel_order(&mut self.rng)
    }

    /// Draw one event, apply it to the book and return its tag
    pub fn step(&mut self) -> EventKind {
        let event = match self.events.next_event(&mut self.rng) {
            OrderEvent::Market(Side::Buy) => {
                self.market_buy(None);
                EventKind::MarketBuy
            }
            OrderEvent::Market(Side::Sell) => {
                self.market_sell(None);
                EventKind::MarketSell
            }
            OrderEvent::Limit(Side::Buy) => {
                self.limit_buy();
                EventKind::LimitBuy
            }
            OrderEvent::Limit(Side::Sell) => {
                self.limit_sell();
                EventKind::LimitSell
            }
            OrderEvent::Cancel => self.cancel_order(),
        };
        self.steps += 1;
        trace!("step {}: {}", self.steps, event);

        #[cfg(feature = "metrics")]
        metrics::counter!("orderbook_sim_events_total", "event" => event.as_str()).increment(1);

        event
    }

    /// Run exactly `steps` steps and return one snapshot per step, in order.
    pub fn simulate(&mut self, steps: usize) -> Trajectory {
        let mut trajectory = Trajectory::with_capacity(steps);
        for _ in 0..steps {
            let event = self.step();
            trajectory.push(self.book.snapshot(self.steps, event));
        }
        debug!(
            "simulated {} steps (seed {}), final spread {:?}",
            steps,
            self.seed,
            self.book.spread()
        );
        trajectory
    }

    /// Snapshot of the current book, tagged with `event`
    #[must_use]
    pub fn snapshot(&self, event: EventKind) -> BookSnapshot {
        self.book.snapshot(self.steps, event)
    }

    /// Get the best bid price, if any
    #[must_use]
    pub fn best_bid(&self) -> Option<i64> {
        self.book.best_bid()
    }

    /// Get the best ask price, if any
    #[must_use]
    pub fn best_ask(&self) -> Option<i64> {
        self.book.best_ask()
    }

    /// Get the mid price, if both sides are present
    #[must_use]
    pub fn mid_price(&self) -> Option<f64> {
        self.book.mid_price()
    }

    /// Get the spread, if both sides are present
    #[must_use]
    pub fn spread(&self) -> Option<i64> {
        self.book.spread()
    }

    /// Volume at the best bid, 0 if none
    #[must_use]
    pub fn bid_depth(&self) -> u64 {
        self.book.bid_depth()
    }

    /// Volume at the best ask, 0 if none
    #[must_use]
    pub fn ask_depth(&self) -> u64 {
        self.book.ask_depth()
    }

    /// Bid share of top-of-book volume, if defined
    #[must_use]
    pub fn relative_bid_depth(&self) -> Option<f64> {
        self.book.relative_bid_depth()
    }

    /// Top-of-book imbalance in `[-1.0, 1.0]`
    #[must_use]
    pub fn imbalance(&self) -> f64 {
        self.book.imbalance()
    }
}
