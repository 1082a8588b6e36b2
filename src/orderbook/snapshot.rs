//! Per-step book snapshots and simulation trajectories

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use tracing::trace;

use super::error::SimulationError;

/// The event that produced a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Market order consuming the ask side
    MarketBuy,
    /// Market order consuming the bid side
    MarketSell,
    /// Limit order posted on the bid side
    LimitBuy,
    /// Limit order posted on the ask side
    LimitSell,
    /// One unit cancelled at the best bid
    CancelBid,
    /// One unit cancelled at the best ask
    CancelAsk,
    /// Cancellation drawn against an empty book
    CancelNone,
}

impl EventKind {
    /// Every tag a step can produce
    pub const ALL: [EventKind; 7] = [
        EventKind::MarketBuy,
        EventKind::MarketSell,
        EventKind::LimitBuy,
        EventKind::LimitSell,
        EventKind::CancelBid,
        EventKind::CancelAsk,
        EventKind::CancelNone,
    ];

    /// Stable lowercase name, matching the serialized form
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::MarketBuy => "market_buy",
            EventKind::MarketSell => "market_sell",
            EventKind::LimitBuy => "limit_buy",
            EventKind::LimitSell => "limit_sell",
            EventKind::CancelBid => "cancel_bid",
            EventKind::CancelAsk => "cancel_ask",
            EventKind::CancelNone => "cancel_none",
        }
    }

    /// True for the two market order tags
    #[must_use]
    pub fn is_market(self) -> bool {
        matches!(self, EventKind::MarketBuy | EventKind::MarketSell)
    }

    /// True for the two limit order tags
    #[must_use]
    pub fn is_limit(self) -> bool {
        matches!(self, EventKind::LimitBuy | EventKind::LimitSell)
    }

    /// True for the three cancellation tags, including the no-op
    #[must_use]
    pub fn is_cancel(self) -> bool {
        matches!(
            self,
            EventKind::CancelBid | EventKind::CancelAsk | EventKind::CancelNone
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Book metrics captured right after one simulation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// 1-based index of the step that produced this state
    pub step: u64,

    /// Event applied during the step
    pub event: EventKind,

    /// Highest bid price, if the bid side is non-empty
    pub best_bid: Option<i64>,

    /// Lowest ask price, if the ask side is non-empty
    pub best_ask: Option<i64>,

    /// Average of best bid and best ask
    pub mid_price: Option<f64>,

    /// Best ask minus best bid
    pub spread: Option<i64>,

    /// Volume at the best bid (0 when the bid side is empty)
    pub bid_depth: u64,

    /// Volume at the best ask (0 when the ask side is empty)
    pub ask_depth: u64,

    /// `bid_depth / (bid_depth + ask_depth)` when defined
    pub relative_bid_depth: Option<f64>,

    /// Top-of-book imbalance in `[-1.0, 1.0]`
    pub imbalance: f64,
}

impl BookSnapshot {
    /// True if both sides had at least one level
    #[must_use]
    pub fn is_two_sided(&self) -> bool {
        self.best_bid.is_some() && self.best_ask.is_some()
    }
}

/// Ordered sequence of snapshots from one simulation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory {
    snapshots: Vec<BookSnapshot>,
}

impl Trajectory {
    /// Create an empty trajectory with room for `steps` snapshots
    pub fn with_capacity(steps: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(steps),
        }
    }

    pub(crate) fn push(&mut self, snapshot: BookSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Number of snapshots (one per simulated step)
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True if no step was simulated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshots in step order
    #[must_use]
    pub fn snapshots(&self) -> &[BookSnapshot] {
        &self.snapshots
    }

    /// Iterate snapshots in step order
    pub fn iter(&self) -> std::slice::Iter<'_, BookSnapshot> {
        self.snapshots.iter()
    }

    /// Final snapshot, if any step was simulated
    #[must_use]
    pub fn last(&self) -> Option<&BookSnapshot> {
        self.snapshots.last()
    }

    /// Consume the trajectory and return the raw snapshots
    #[must_use]
    pub fn into_snapshots(self) -> Vec<BookSnapshot> {
        self.snapshots
    }

    /// Spreads of the two-sided steps, in order. Steps with an undefined
    /// spread are skipped.
    #[must_use]
    pub fn spreads(&self) -> Vec<i64> {
        self.snapshots.iter().filter_map(|s| s.spread).collect()
    }

    /// Number of steps per event tag. Tags that never occurred are absent.
    #[must_use]
    pub fn event_counts(&self) -> BTreeMap<EventKind, usize> {
        let mut counts = BTreeMap::new();
        for snapshot in &self.snapshots {
            *counts.entry(snapshot.event).or_insert(0) += 1;
        }
        counts
    }

    /// Serializes the trajectory to JSON.
    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string(self).map_err(|error| SimulationError::SerializationError {
            message: error.to_string(),
        })
    }

    /// Deserializes a trajectory from JSON.
    pub fn from_json(data: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(data).map_err(|error| SimulationError::DeserializationError {
            message: error.to_string(),
        })
    }
}

impl From<Vec<BookSnapshot>> for Trajectory {
    fn from(snapshots: Vec<BookSnapshot>) -> Self {
        Self { snapshots }
    }
}

impl Index<usize> for Trajectory {
    type Output = BookSnapshot;

    fn index(&self, index: usize) -> &Self::Output {
        &self.snapshots[index]
    }
}

impl IntoIterator for Trajectory {
    type Item = BookSnapshot;
    type IntoIter = std::vec::IntoIter<BookSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.into_iter()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a BookSnapshot;
    type IntoIter = std::slice::Iter<'a, BookSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

/// Schema version written into every [`TrajectoryPackage`]
pub const TRAJECTORY_FORMAT_VERSION: u32 = 1;

/// A trajectory sealed with the seed that produced it and a SHA-256 digest
/// of its snapshots.
///
/// Two runs with the same configuration and seed seal to the same digest,
/// so comparing `checksum` fields is enough to check reproducibility across
/// machines. A package read back from JSON is only trusted after
/// [`TrajectoryPackage::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectoryPackage {
    /// Schema version, [`TRAJECTORY_FORMAT_VERSION`] when written
    pub version: u32,
    /// Seed of the run
    pub seed: u64,
    /// The sealed snapshots
    pub trajectory: Trajectory,
    /// Lowercase hex SHA-256 of the trajectory's JSON encoding
    pub checksum: String,
}

impl TrajectoryPackage {
    /// Seal `trajectory`, recording `seed` alongside it
    pub fn new(seed: u64, trajectory: Trajectory) -> Result<Self, SimulationError> {
        let checksum = Self::compute_checksum(&trajectory)?;
        Ok(Self {
            version: TRAJECTORY_FORMAT_VERSION,
            seed,
            trajectory,
            checksum,
        })
    }

    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string(self).map_err(|error| SimulationError::SerializationError {
            message: error.to_string(),
        })
    }

    /// Parse a package. The checksum is not checked here.
    pub fn from_json(data: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(data).map_err(|error| SimulationError::DeserializationError {
            message: error.to_string(),
        })
    }

    /// Check the schema version, then recompute the digest and compare it
    /// with the stored one.
    ///
    /// # Errors
    /// [`SimulationError::UnsupportedVersion`] for a package from another
    /// schema, [`SimulationError::ChecksumMismatch`] if the snapshots were
    /// altered after sealing.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.version != TRAJECTORY_FORMAT_VERSION {
            return Err(SimulationError::UnsupportedVersion {
                found: self.version,
                expected: TRAJECTORY_FORMAT_VERSION,
            });
        }

        let actual = Self::compute_checksum(&self.trajectory)?;
        if actual != self.checksum {
            return Err(SimulationError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual,
            });
        }
        Ok(())
    }

    /// Unwrap the trajectory once [`Self::validate`] passes
    pub fn into_trajectory(self) -> Result<Trajectory, SimulationError> {
        self.validate()?;
        Ok(self.trajectory)
    }

    /// Digest of `trajectory` as stored in [`TrajectoryPackage::checksum`]
    pub fn compute_checksum(trajectory: &Trajectory) -> Result<String, SimulationError> {
        let payload =
            serde_json::to_vec(trajectory).map_err(|error| SimulationError::SerializationError {
                message: error.to_string(),
            })?;

        let mut hasher = Sha256::new();
        hasher.update(payload);
        let checksum = format!("{:x}", hasher.finalize());

        trace!(
            "sealed {} snapshots, checksum {}",
            trajectory.len(),
            checksum
        );
        Ok(checksum)
    }
}
