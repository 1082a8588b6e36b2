//! Contains the market order matching logic for the order book.
//!
//! A market order walks the opposite ledger from its best price inward,
//! taking as much volume as each level holds until the order is filled or
//! the opposite side runs dry. Whatever cannot be filled is dropped: there
//! is no resting remainder and no trade log, only the ledger mutation.

use super::book::OrderBook;
use super::side::Side;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Outcome of a single market order execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketFill {
    /// Side of the incoming market order
    pub side: Side,
    /// Quantity the order asked for
    pub requested: u64,
    /// Quantity actually executed against the book
    pub filled: u64,
    /// Number of distinct price levels the order traded at
    pub levels_touched: usize,
    /// Worst price the order traded at, if it traded at all
    pub last_price: Option<i64>,
}

impl MarketFill {
    /// Quantity that could not be filled for lack of liquidity
    #[must_use]
    pub fn unfilled(&self) -> u64 {
        self.requested - self.filled
    }

    /// True if the whole requested quantity was executed
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.filled == self.requested
    }
}

impl OrderBook {
    /// Execute a market order of `quantity` units.
    ///
    /// A buy consumes the ask ledger from the lowest price up, a sell consumes
    /// the bid ledger from the highest price down. Each level gives
    /// `min(remaining, level volume)` and is deleted once exhausted.
    ///
    /// Partial fills are a normal outcome, never an error.
    ///
    /// # Performance
    /// O(M log N) where M is the number of levels consumed.
    pub fn match_market_order(&mut self, side: Side, quantity: u64) -> MarketFill {
        let match_side = self.ledger_mut(side.opposite());

        let mut remaining = quantity;
        let mut levels_touched = 0;
        let mut last_price = None;

        while remaining > 0 {
            let Some((price, volume)) = match_side.best_level() else {
                break;
            };
            let traded = match_side.consume(price, remaining.min(volume));
            remaining -= traded;
            levels_touched += 1;
            last_price = Some(price);
        }

        let fill = MarketFill {
            side,
            requested: quantity,
            filled: quantity - remaining,
            levels_touched,
            last_price,
        };
        trace!(
            "market {} {}: filled {} across {} levels",
            side, quantity, fill.filled, levels_touched
        );

        #[cfg(feature = "metrics")]
        metrics::counter!("orderbook_sim_filled_volume_total").increment(fill.filled);

        fill
    }
}
