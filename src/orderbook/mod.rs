//! Aggregated limit order book: price-level ledgers, derived metrics and the
//! matching, placement and cancellation policies that mutate them.

pub mod book;
/// Imbalance-driven cancellation policy.
pub mod cancellation;
pub mod error;
/// Volume-at-price ledger for one side of the book.
pub mod ledger;
pub mod matching;
/// Limit order placement policy.
pub mod placement;
pub mod side;
pub mod snapshot;

pub use book::OrderBook;
pub use error::SimulationError;
pub use ledger::PriceLevelLedger;
pub use matching::MarketFill;
pub use placement::{PlacementPolicy, PlacementStrategy};
pub use side::Side;
pub use snapshot::{
    BookSnapshot, EventKind, TRAJECTORY_FORMAT_VERSION, Trajectory, TrajectoryPackage,
};
