//! Imbalance-driven cancellation of resting volume.
//!
//! When the top of book is lopsided, participants on the thin side pull
//! their quotes first ("panic" cancellation). Otherwise a unit is pulled
//! from either side with equal odds.

use super::book::OrderBook;
use super::side::Side;
use super::snapshot::EventKind;
use rand::Rng;
use tracing::trace;

impl OrderBook {
    /// Probability that a cancellation hits the thin side, given the current
    /// imbalance: `0.5 + 0.5 * |imbalance|`, in `[0.5, 1.0]`.
    #[must_use]
    pub fn panic_probability(&self) -> f64 {
        0.5 + 0.5 * self.imbalance().abs()
    }

    /// Remove one unit of volume at the best price of `side`.
    ///
    /// Returns `false` (and changes nothing) if that side is empty.
    pub fn cancel_at_best(&mut self, side: Side) -> bool {
        let ledger = self.ledger_mut(side);
        let Some(price) = ledger.best() else {
            return false;
        };
        let removed = ledger.remove_one(price);
        trace!("cancel one unit at best {} {}", side, price);
        removed
    }

    /// Cancel one unit of resting volume, biased towards the thin side.
    ///
    /// 1. With a bid-heavy book (imbalance > 0) and a non-empty ask side, the
    ///    best ask loses a unit with probability [`Self::panic_probability`].
    ///    Symmetrically for an ask-heavy book and the best bid.
    /// 2. If that did not fire, the best bid loses a unit when the ask side
    ///    is empty or a fair coin favours the bid; otherwise the best ask.
    /// 3. On a completely empty book nothing happens.
    ///
    /// A uniform is drawn for a panic check only when its side condition
    /// holds, and for the coin only when both sides are non-empty.
    pub fn cancel_order<R: Rng>(&mut self, rng: &mut R) -> EventKind {
        let imbalance = self.imbalance();
        let panic = self.panic_probability();

        if imbalance > 0.0 && !self.asks.is_empty() && rng.random::<f64>() < panic {
            self.cancel_at_best(Side::Sell);
            trace!("panic cancel on ask, imbalance {:.3}", imbalance);
            return EventKind::CancelAsk;
        }

        if imbalance < 0.0 && !self.bids.is_empty() && rng.random::<f64>() < panic {
            self.cancel_at_best(Side::Buy);
            trace!("panic cancel on bid, imbalance {:.3}", imbalance);
            return EventKind::CancelBid;
        }

        if !self.bids.is_empty() && (self.asks.is_empty() || rng.random::<f64>() < 0.5) {
            self.cancel_at_best(Side::Buy);
            return EventKind::CancelBid;
        }

        if self.cancel_at_best(Side::Sell) {
            return EventKind::CancelAsk;
        }

        trace!("cancellation drawn against an empty book");
        EventKind::CancelNone
    }
}
