//! Core OrderBook: the bid/ask ledger pair and its derived market metrics

use super::error::SimulationError;
use super::ledger::PriceLevelLedger;
use super::side::Side;
use super::snapshot::{BookSnapshot, EventKind};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// The OrderBook owns one aggregated ledger per side.
///
/// All metrics are recomputed from the ledgers on every call; nothing is
/// cached, so a query always reflects the latest mutation. Metrics that are
/// undefined on an empty side return `None` (or 0 / 0.0 where documented)
/// instead of failing.
///
/// Deserialization checks every ledger sits under its own side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BookLedgers")]
pub struct OrderBook {
    /// Bid side price levels (buy interest)
    pub(super) bids: PriceLevelLedger,

    /// Ask side price levels (sell interest)
    pub(super) asks: PriceLevelLedger,
}

/// Unchecked wire form of an [`OrderBook`]
#[derive(Debug, Deserialize)]
struct BookLedgers {
    bids: PriceLevelLedger,
    asks: PriceLevelLedger,
}

impl TryFrom<BookLedgers> for OrderBook {
    type Error = SimulationError;

    fn try_from(raw: BookLedgers) -> Result<Self, Self::Error> {
        for (expected, ledger) in [(Side::Buy, &raw.bids), (Side::Sell, &raw.asks)] {
            if ledger.side() != expected {
                return Err(SimulationError::MismatchedLedgerSide {
                    expected,
                    found: ledger.side(),
                });
            }
        }
        Ok(Self {
            bids: raw.bids,
            asks: raw.asks,
        })
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create a new, empty order book
    pub fn new() -> Self {
        Self {
            bids: PriceLevelLedger::new(Side::Buy),
            asks: PriceLevelLedger::new(Side::Sell),
        }
    }

    /// Create a book seeded symmetrically around `center`.
    ///
    /// For `i` in `1..=levels`, puts `volume` on the bid at
    /// `center - i * tick_size` and on the ask at `center + i * tick_size`.
    pub fn with_depth(center: i64, tick_size: i64, levels: u32, volume: u64) -> Self {
        let mut book = Self::new();
        for i in 1..=i64::from(levels) {
            let offset = i.saturating_mul(tick_size);
            book.bids.add(center.saturating_sub(offset), volume);
            book.asks.add(center.saturating_add(offset), volume);
        }
        trace!(
            "seeded book around {} with {} levels of {} per side",
            center, levels, volume
        );
        book
    }

    /// The ledger holding resting volume for `side`
    #[must_use]
    pub fn ledger(&self, side: Side) -> &PriceLevelLedger {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub(super) fn ledger_mut(&mut self, side: Side) -> &mut PriceLevelLedger {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Bid side ledger
    #[must_use]
    pub fn bids(&self) -> &PriceLevelLedger {
        &self.bids
    }

    /// Ask side ledger
    #[must_use]
    pub fn asks(&self) -> &PriceLevelLedger {
        &self.asks
    }

    /// True if neither side holds any volume
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Total resting volume on both sides
    #[must_use]
    pub fn total_volume(&self) -> u64 {
        self.bids.total_volume().saturating_add(self.asks.total_volume())
    }

    /// Get the best bid price, if any
    #[must_use]
    pub fn best_bid(&self) -> Option<i64> {
        self.bids.best()
    }

    /// Get the best ask price, if any
    #[must_use]
    pub fn best_ask(&self) -> Option<i64> {
        self.asks.best()
    }

    /// Get the mid price (average of best bid and best ask)
    #[must_use]
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid as f64 + ask as f64) / 2.0),
            _ => None,
        }
    }

    /// Get the spread (best ask - best bid).
    ///
    /// Negative when the book is crossed; crossing is not prevented.
    #[must_use]
    pub fn spread(&self) -> Option<i64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.saturating_sub(bid)),
            _ => None,
        }
    }

    /// Volume at the best bid, 0 if the bid side is empty
    #[must_use]
    pub fn bid_depth(&self) -> u64 {
        self.bids.best_level().map_or(0, |(_, volume)| volume)
    }

    /// Volume at the best ask, 0 if the ask side is empty
    #[must_use]
    pub fn ask_depth(&self) -> u64 {
        self.asks.best_level().map_or(0, |(_, volume)| volume)
    }

    /// Share of top-of-book volume on the bid side.
    ///
    /// `bid_depth / (bid_depth + ask_depth)`, or `None` if either side is
    /// empty or both depths are zero.
    #[must_use]
    pub fn relative_bid_depth(&self) -> Option<f64> {
        let (bid, ask) = self.top_of_book_depths()?;
        let total = bid + ask;
        if total == 0.0 {
            return None;
        }
        Some(bid / total)
    }

    /// Top-of-book imbalance in `[-1.0, 1.0]`.
    ///
    /// `(bid_depth - ask_depth) / (bid_depth + ask_depth)`. Positive means
    /// the bid is heavier. Returns 0.0 when either side is empty or both
    /// depths are zero, so the value is always usable as a signal.
    #[must_use]
    pub fn imbalance(&self) -> f64 {
        let Some((bid, ask)) = self.top_of_book_depths() else {
            return 0.0;
        };
        let total = bid + ask;
        if total == 0.0 {
            return 0.0;
        }
        (bid - ask) / total
    }

    fn top_of_book_depths(&self) -> Option<(f64, f64)> {
        let (_, bid) = self.bids.best_level()?;
        let (_, ask) = self.asks.best_level()?;
        Some((bid as f64, ask as f64))
    }

    /// Capture the current metrics as an immutable snapshot tagged with the
    /// event that produced this state.
    #[must_use]
    pub fn snapshot(&self, step: u64, event: EventKind) -> BookSnapshot {
        let snapshot = BookSnapshot {
            step,
            event,
            best_bid: self.best_bid(),
            best_ask: self.best_ask(),
            mid_price: self.mid_price(),
            spread: self.spread(),
            bid_depth: self.bid_depth(),
            ask_depth: self.ask_depth(),
            relative_bid_depth: self.relative_bid_depth(),
            imbalance: self.imbalance(),
        };
        trace!("snapshot: {:?}", snapshot);
        snapshot
    }
}
