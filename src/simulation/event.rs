//! Random event generation

use super::config::EventRates;
use crate::orderbook::{Side, SimulationError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Category of the next order flow event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// Market order
    Market,
    /// Limit order
    Limit,
    /// Cancellation
    Cancel,
}

/// A drawn event, ready to be dispatched to the matching policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderEvent {
    /// Market order on the given side
    Market(Side),
    /// Limit order on the given side
    Limit(Side),
    /// Cancellation; the policy itself decides the side
    Cancel,
}

/// Draws events from a categorical distribution over the three rates.
///
/// Cut points are recomputed from the current rates on every draw, so
/// replacing the rates between steps takes effect on the next step.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSource {
    rates: EventRates,
}

impl EventSource {
    /// Create an event source, rejecting invalid rates
    pub fn new(rates: EventRates) -> Result<Self, SimulationError> {
        rates.validate()?;
        Ok(Self { rates })
    }

    /// Current rates
    #[must_use]
    pub fn rates(&self) -> EventRates {
        self.rates
    }

    /// Replace the rates used from the next draw on
    pub fn set_rates(&mut self, rates: EventRates) -> Result<(), SimulationError> {
        rates.validate()?;
        self.rates = rates;
        Ok(())
    }

    /// Draw only the category of the next event
    pub fn draw_category<R: Rng>(&self, rng: &mut R) -> EventCategory {
        let (market_cut, limit_cut) = self.rates.cut_points();
        let u = rng.random::<f64>();
        if u < market_cut {
            EventCategory::Market
        } else if u < limit_cut {
            EventCategory::Limit
        } else {
            EventCategory::Cancel
        }
    }

    /// Draw the next event: a category and, for market and limit orders,
    /// a side chosen with equal probability.
    pub fn next_event<R: Rng>(&self, rng: &mut R) -> OrderEvent {
        let event = match self.draw_category(rng) {
            EventCategory::Market => OrderEvent::Market(draw_side(rng)),
            EventCategory::Limit => OrderEvent::Limit(draw_side(rng)),
            EventCategory::Cancel => OrderEvent::Cancel,
        };
        trace!("drew event {:?}", event);
        event
    }
}

fn draw_side<R: Rng>(rng: &mut R) -> Side {
    if rng.random::<f64>() < 0.5 {
        Side::Buy
    } else {
        Side::Sell
    }
}
