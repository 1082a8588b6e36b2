//! Limit order placement policy.
//!
//! New limit orders are anchored to the best price of their own side, or to
//! a configured reference price when that side is empty, and posted either
//! at the anchor (joining the top of book) or a random number of ticks
//! behind it.

use super::book::OrderBook;
use super::side::Side;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Probability of joining the top of book when the spread is zero
const INSIDE_BASE_PROBABILITY: f64 = 0.3;

/// Increase in join probability per unit of spread
const INSIDE_SPREAD_SLOPE: f64 = 0.1;

/// Upper bound on the join probability
const INSIDE_MAX_PROBABILITY: f64 = 0.95;

/// How the price of a new limit order is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// Always post `k` ticks behind the anchor, `k` uniform in
    /// `1..=max_depth`. Never joins the top of book.
    FixedOffset,

    /// Join the anchor with probability `min(0.95, 0.3 + 0.1 * spread)`
    /// (spread 0 when undefined), otherwise post `k` ticks behind it.
    /// Liquidity steps in more eagerly as the spread widens.
    #[default]
    SpreadSensitive,
}

/// Parameters for posting limit orders into a book
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementPolicy {
    /// Price selection strategy
    pub strategy: PlacementStrategy,
    /// Size of one tick in price units
    pub tick_size: i64,
    /// Largest offset, in ticks, an order may be posted behind its anchor
    pub max_depth: u32,
    /// Anchor used when the order's own side is empty
    pub reference_price: i64,
    /// Volume added by each posted order
    pub order_size: u64,
}

impl PlacementPolicy {
    /// Probability that a new order joins the top of book for `spread`
    #[must_use]
    pub fn inside_probability(spread: Option<i64>) -> f64 {
        let spread = spread.unwrap_or(0) as f64;
        (INSIDE_BASE_PROBABILITY + INSIDE_SPREAD_SLOPE * spread).min(INSIDE_MAX_PROBABILITY)
    }

    /// Price a new limit order on `side` would be posted at.
    ///
    /// Consumes randomness from `rng` but does not touch the book.
    pub fn choose_price<R: Rng>(&self, book: &OrderBook, side: Side, rng: &mut R) -> i64 {
        let anchor = book.ledger(side).best().unwrap_or(self.reference_price);

        match self.strategy {
            PlacementStrategy::FixedOffset => self.behind(anchor, side, rng),
            PlacementStrategy::SpreadSensitive => {
                let p_inside = Self::inside_probability(book.spread());
                if rng.random::<f64>() < p_inside {
                    anchor
                } else {
                    self.behind(anchor, side, rng)
                }
            }
        }
    }

    /// Choose a price and post `order_size` there. Returns the price used.
    pub fn place<R: Rng>(&self, book: &mut OrderBook, side: Side, rng: &mut R) -> i64 {
        let price = self.choose_price(book, side, rng);
        book.add_limit_order(side, price, self.order_size);
        price
    }

    fn behind<R: Rng>(&self, anchor: i64, side: Side, rng: &mut R) -> i64 {
        let k = i64::from(rng.random_range(1..=self.max_depth));
        let offset = k.saturating_mul(self.tick_size);
        match side {
            Side::Buy => anchor.saturating_sub(offset),
            Side::Sell => anchor.saturating_add(offset),
        }
    }
}

impl OrderBook {
    /// Add `quantity` of resting volume at `price` on `side`.
    ///
    /// Creates the level if it does not exist. No crossing check is made.
    pub fn add_limit_order(&mut self, side: Side, price: i64, quantity: u64) {
        trace!("Adding limit order {} {} {}", side, price, quantity);
        self.ledger_mut(side).add(price, quantity);
    }
}
