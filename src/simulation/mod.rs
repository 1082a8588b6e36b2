//! Simulation driver: configuration, event generation, the step loop and
//! batch execution of independent runs.

/// Monte Carlo batches of independent simulations.
pub mod batch;
pub mod config;
/// Categorical event source.
pub mod event;
pub mod simulator;

pub use batch::BatchRunner;
pub use config::{EventRates, SimulatorConfig};
pub use event::{EventCategory, EventSource, OrderEvent};
pub use simulator::Simulator;
