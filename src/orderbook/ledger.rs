//! Aggregated volume-at-price ledger for one side of the book

use super::error::SimulationError;
use super::side::Side;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// One side of the book: a map from integer price (in ticks) to the total
/// resting volume at that price.
///
/// A level with zero volume is never stored. Every mutation that brings a
/// level to zero removes the key, so "the level exists" and "the level has
/// positive volume" are the same statement.
///
/// Levels are kept in a `BTreeMap`, so the best price is found at one end of
/// the map: the highest key for bids, the lowest for asks.
///
/// Deserialization rejects stored levels with zero volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LedgerLevels")]
pub struct PriceLevelLedger {
    side: Side,
    levels: BTreeMap<i64, u64>,
}

/// Unchecked wire form of a [`PriceLevelLedger`]
#[derive(Debug, Deserialize)]
struct LedgerLevels {
    side: Side,
    levels: BTreeMap<i64, u64>,
}

impl TryFrom<LedgerLevels> for PriceLevelLedger {
    type Error = SimulationError;

    fn try_from(raw: LedgerLevels) -> Result<Self, Self::Error> {
        if let Some((&price, _)) = raw.levels.iter().find(|&(_, &volume)| volume == 0) {
            return Err(SimulationError::EmptyPriceLevel {
                side: raw.side,
                price,
            });
        }
        Ok(Self {
            side: raw.side,
            levels: raw.levels,
        })
    }
}

impl PriceLevelLedger {
    /// Create an empty ledger for the given side
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    /// The side this ledger holds
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Add `volume` at `price`, creating the level if it does not exist.
    ///
    /// Adding zero volume is a no-op and never creates an empty level.
    pub fn add(&mut self, price: i64, volume: u64) {
        if volume == 0 {
            return;
        }
        let level = self.levels.entry(price).or_insert(0);
        *level = level.saturating_add(volume);
        trace!("{} ledger: add {} at {} -> {}", self.side, volume, price, *level);
    }

    /// Remove up to `amount` from the level at `price`.
    ///
    /// Returns the volume actually removed. Callers normally pass an amount no
    /// larger than the resting volume; a larger amount empties the level and
    /// the surplus is ignored. An absent level yields 0.
    pub fn consume(&mut self, price: i64, amount: u64) -> u64 {
        let Some(volume) = self.levels.get_mut(&price) else {
            return 0;
        };
        let taken = amount.min(*volume);
        *volume -= taken;
        let remaining = *volume;
        if remaining == 0 {
            self.levels.remove(&price);
        }
        trace!(
            "{} ledger: consume {} at {} -> {}",
            self.side, taken, price, remaining
        );
        taken
    }

    /// Remove a single unit from the level at `price`.
    ///
    /// Returns `false` if there was no level at that price.
    pub fn remove_one(&mut self, price: i64) -> bool {
        self.consume(price, 1) == 1
    }

    /// Best price on this side: highest bid or lowest ask
    #[must_use]
    pub fn best(&self) -> Option<i64> {
        self.best_level().map(|(price, _)| price)
    }

    /// Best price together with its volume
    #[must_use]
    pub fn best_level(&self) -> Option<(i64, u64)> {
        let level = match self.side {
            Side::Buy => self.levels.last_key_value(),
            Side::Sell => self.levels.first_key_value(),
        };
        level.map(|(&price, &volume)| (price, volume))
    }

    /// Volume resting at `price`, 0 if there is no level there
    #[must_use]
    pub fn volume_at(&self, price: i64) -> u64 {
        self.levels.get(&price).copied().unwrap_or(0)
    }

    /// Total volume across all levels, saturating at `u64::MAX`
    #[must_use]
    pub fn total_volume(&self) -> u64 {
        self.levels
            .values()
            .fold(0u64, |total, &volume| total.saturating_add(volume))
    }

    /// Number of distinct price levels
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// True if no level holds any volume
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterate levels from the best price outwards
    pub fn iter(&self) -> Box<dyn Iterator<Item = (i64, u64)> + '_> {
        let levels = self.levels.iter().map(|(&price, &volume)| (price, volume));
        match self.side {
            Side::Buy => Box::new(levels.rev()),
            Side::Sell => Box::new(levels),
        }
    }
}
