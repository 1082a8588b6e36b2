//! Simulator configuration

use crate::orderbook::{PlacementStrategy, SimulationError};
use serde::{Deserialize, Serialize};

/// Arrival intensities of the three event categories.
///
/// Only the ratios matter: each step picks market, limit or cancel with
/// probability proportional to its rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventRates {
    /// Market order rate
    pub market: f64,
    /// Limit order rate
    pub limit: f64,
    /// Cancellation rate
    pub cancel: f64,
}

impl Default for EventRates {
    fn default() -> Self {
        Self {
            market: 4.0,
            limit: 1.0,
            cancel: 3.0,
        }
    }
}

impl EventRates {
    /// Create a new set of rates. Call [`Self::validate`] before use.
    pub fn new(market: f64, limit: f64, cancel: f64) -> Self {
        Self {
            market,
            limit,
            cancel,
        }
    }

    /// Sum of the three rates
    #[must_use]
    pub fn total(&self) -> f64 {
        self.market + self.limit + self.cancel
    }

    /// Cumulative cut points `(p_market, p_market + p_limit)` on `[0, 1)`.
    ///
    /// A uniform draw below the first selects a market order, below the
    /// second a limit order, anything else a cancellation.
    #[must_use]
    pub fn cut_points(&self) -> (f64, f64) {
        let total = self.total();
        let p_market = self.market / total;
        let p_limit = self.limit / total;
        (p_market, p_market + p_limit)
    }

    /// Rejects negative, non-finite or all-zero rates, and rates whose sum
    /// overflows to infinity.
    pub fn validate(&self) -> Result<(), SimulationError> {
        for (name, value) in [
            ("market", self.market),
            ("limit", self.limit),
            ("cancel", self.cancel),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::NegativeRate { name, value });
            }
        }
        let total = self.total();
        if !total.is_finite() {
            return Err(SimulationError::NonFiniteTotalRate { total });
        }
        if total <= 0.0 {
            return Err(SimulationError::ZeroTotalRate);
        }
        Ok(())
    }
}

/// Everything needed to build a [`crate::Simulator`] apart from its seed.
///
/// Missing fields take their defaults when deserialized, so a JSON config
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Reference price the book is seeded around, and the anchor for limit
    /// orders on an empty side
    pub initial_price: i64,

    /// Minimum price increment. Must be > 0
    pub tick_size: i64,

    /// Event arrival rates
    pub rates: EventRates,

    /// Default size of market and limit orders. Must be > 0
    pub order_size: u64,

    /// Number of levels seeded on each side at construction
    pub levels: u32,

    /// Volume seeded at each bootstrap level
    pub seed_volume: u64,

    /// How limit order prices are chosen
    pub placement: PlacementStrategy,

    /// Largest offset, in ticks, a limit order is posted behind its anchor.
    /// Must be >= 1
    pub max_placement_depth: u32,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            initial_price: 100,
            tick_size: 1,
            rates: EventRates::default(),
            order_size: 1,
            levels: 5,
            seed_volume: 10,
            placement: PlacementStrategy::default(),
            max_placement_depth: 5,
        }
    }
}

impl SimulatorConfig {
    /// Create a configuration with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial reference price
    #[must_use]
    pub fn with_initial_price(mut self, initial_price: i64) -> Self {
        self.initial_price = initial_price;
        self
    }

    /// Set the tick size
    #[must_use]
    pub fn with_tick_size(mut self, tick_size: i64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Set all three event rates
    #[must_use]
    pub fn with_rates(mut self, market: f64, limit: f64, cancel: f64) -> Self {
        self.rates = EventRates::new(market, limit, cancel);
        self
    }

    /// Set only the limit order rate, the parameter experiments usually sweep
    #[must_use]
    pub fn with_limit_rate(mut self, limit: f64) -> Self {
        self.rates.limit = limit;
        self
    }

    /// Set the default order size
    #[must_use]
    pub fn with_order_size(mut self, order_size: u64) -> Self {
        self.order_size = order_size;
        self
    }

    /// Set the bootstrap depth: `levels` per side with `seed_volume` each
    #[must_use]
    pub fn with_bootstrap(mut self, levels: u32, seed_volume: u64) -> Self {
        self.levels = levels;
        self.seed_volume = seed_volume;
        self
    }

    /// Set the placement strategy
    #[must_use]
    pub fn with_placement(mut self, placement: PlacementStrategy) -> Self {
        self.placement = placement;
        self
    }

    /// Set the maximum placement depth in ticks
    #[must_use]
    pub fn with_max_placement_depth(mut self, max_depth: u32) -> Self {
        self.max_placement_depth = max_depth;
        self
    }

    /// Checks the configuration for values that would make a run
    /// meaningless.
    ///
    /// # Errors
    /// - [`SimulationError::NegativeRate`] / [`SimulationError::ZeroTotalRate`]
    ///   for bad rates
    /// - [`SimulationError::InvalidTickSize`] if `tick_size <= 0`
    /// - [`SimulationError::InvalidOrderSize`] if `order_size == 0`
    /// - [`SimulationError::InvalidPlacementDepth`] if
    ///   `max_placement_depth == 0`
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.rates.validate()?;
        if self.tick_size <= 0 {
            return Err(SimulationError::InvalidTickSize {
                tick_size: self.tick_size,
            });
        }
        if self.order_size == 0 {
            return Err(SimulationError::InvalidOrderSize {
                order_size: self.order_size,
            });
        }
        if self.max_placement_depth == 0 {
            return Err(SimulationError::InvalidPlacementDepth {
                max_depth: self.max_placement_depth,
            });
        }
        Ok(())
    }

    /// Serializes the configuration to JSON.
    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string(self).map_err(|error| SimulationError::SerializationError {
            message: error.to_string(),
        })
    }

    /// Parses and validates a configuration from JSON.
    pub fn from_json(data: &str) -> Result<Self, SimulationError> {
        let config: Self =
            serde_json::from_str(data).map_err(|error| SimulationError::DeserializationError {
                message: error.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }
}
