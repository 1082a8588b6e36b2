//! # Stochastic Limit Order Book Simulator
//!
//! A discrete-event simulator of a simplified limit order book, built to
//! generate synthetic price and liquidity time series for statistical study:
//! spread behaviour, recovery after liquidity shocks, and the tail risk of
//! wide spreads.
//!
//! ## Model
//!
//! The book holds aggregated volume per price level on each side. There are
//! no order IDs and no queue priority within a level: a level is a single
//! counter, deleted as soon as it reaches zero.
//!
//! Every step draws one event from a categorical distribution over three
//! arrival rates and applies it:
//!
//! - **Market orders** walk the opposite side from its best price inward
//!   until filled or until that side is exhausted. The unfilled remainder is
//!   dropped.
//! - **Limit orders** anchor to the best price of their own side (or to the
//!   initial reference price when that side is empty) and either join it or
//!   post a random number of ticks behind it. The join probability can grow
//!   with the spread ([`PlacementStrategy::SpreadSensitive`]).
//! - **Cancellations** remove one unit of volume, preferring the thin side
//!   when the top of book is imbalanced ("panic" cancellation).
//!
//! After each step the simulator records a [`BookSnapshot`]: best bid/ask,
//! mid, spread, depth at best, relative bid depth and imbalance, tagged with
//! the [`EventKind`] that produced it.
//!
//! ## Reproducibility
//!
//! Each [`Simulator`] owns a seeded ChaCha generator. The same configuration
//! and seed always give the same [`Trajectory`]. For Monte Carlo work,
//! [`BatchRunner`] runs independent instances across threads, giving run `i`
//! stream `i` of the base seed so results do not depend on scheduling.
//!
//! ## Example
//!
//! ```
//! use orderbook_sim::prelude::*;
//!
//! let config = SimulatorConfig::default().with_limit_rate(6.0);
//! let mut sim = Simulator::new(config, 7).unwrap();
//! let trajectory = sim.simulate(1_000);
//!
//! let spreads = trajectory.spreads();
//! let wide = spreads.iter().filter(|&&s| s > 10).count();
//! println!("{} of {} two-sided steps had a spread above 10", wide, spreads.len());
//! ```
//!
//! ## Edge cases
//!
//! Empty sides never stop a run. Metrics fall back to `None`, 0 or 0.0 as
//! documented on each accessor; partial fills and cancellations against an
//! empty book are ordinary outcomes. Only an invalid configuration (negative
//! or all-zero rates, non-positive tick size, zero order size) is rejected,
//! at construction time.
//!
//! ## Features
//!
//! - `metrics`: count events and filled volume through the `metrics` facade.

pub mod orderbook;
pub mod prelude;
pub mod simulation;

pub use orderbook::{
    BookSnapshot, EventKind, MarketFill, OrderBook, PlacementPolicy, PlacementStrategy,
    PriceLevelLedger, Side, SimulationError, TRAJECTORY_FORMAT_VERSION, Trajectory,
    TrajectoryPackage,
};
pub use simulation::{
    BatchRunner, EventCategory, EventRates, EventSource, OrderEvent, Simulator, SimulatorConfig,
};
