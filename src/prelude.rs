/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/

//! Prelude module that re-exports commonly used types.
//!
//! ```rust
//! use orderbook_sim::prelude::*;
//! ```
//!
//! This imports everything needed to configure, run and inspect a simulation.

// Core book types
pub use crate::orderbook::{OrderBook, PriceLevelLedger, Side, SimulationError};

// Policies
pub use crate::orderbook::{MarketFill, PlacementPolicy, PlacementStrategy};

// Snapshot types
pub use crate::orderbook::{BookSnapshot, EventKind, Trajectory, TrajectoryPackage};

// Simulation driver
pub use crate::simulation::{BatchRunner, EventRates, Simulator, SimulatorConfig};
