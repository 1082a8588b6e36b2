//! Simulator error types

use super::side::Side;
use thiserror::Error;

/// Errors that can occur when configuring or exporting a simulation.
///
/// Runtime edge cases (an empty side, a partial fill, a cancellation against
/// an empty book) are never errors: they resolve to well-defined fallback
/// values so a run always completes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimulationError {
    /// An event rate constant is negative or not a finite number
    #[error("invalid {name} rate: {value} (rates must be finite and non-negative)")]
    NegativeRate {
        /// Which rate failed validation (`market`, `limit` or `cancel`)
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// All three event rates are zero, so no event can be drawn
    #[error("invalid rates: market, limit and cancel rates sum to zero")]
    ZeroTotalRate,

    /// The rates are finite one by one but their sum overflows
    #[error("invalid rates: sum {total} is not finite")]
    NonFiniteTotalRate {
        /// The overflowed sum
        total: f64,
    },

    /// Tick size must be strictly positive
    #[error("invalid tick size: {tick_size} (must be > 0)")]
    InvalidTickSize {
        /// The configured tick size
        tick_size: i64,
    },

    /// Default order size must be strictly positive
    #[error("invalid order size: {order_size} (must be > 0)")]
    InvalidOrderSize {
        /// The configured order size
        order_size: u64,
    },

    /// Maximum placement depth must be at least one tick
    #[error("invalid placement depth: {max_depth} (must be >= 1)")]
    InvalidPlacementDepth {
        /// The configured maximum placement depth in ticks
        max_depth: u32,
    },

    /// A deserialized ledger stores a level with no volume
    #[error("empty price level on {side} side at {price}")]
    EmptyPriceLevel {
        /// Side of the offending ledger
        side: Side,
        /// Price of the empty level
        price: i64,
    },

    /// A deserialized book holds a ledger under the wrong side
    #[error("{expected} ledger holds {found} levels")]
    MismatchedLedgerSide {
        /// Side the book slot requires
        expected: Side,
        /// Side the ledger was stored with
        found: Side,
    },

    /// Error while serializing simulation output or configuration
    #[error("serialization error: {message}")]
    SerializationError {
        /// Underlying error message
        message: String,
    },

    /// Error while deserializing simulation output or configuration
    #[error("deserialization error: {message}")]
    DeserializationError {
        /// Underlying error message
        message: String,
    },

    /// Trajectory package integrity check failed
    #[error("checksum mismatch: expected {expected}, but computed {actual}")]
    ChecksumMismatch {
        /// Expected checksum value
        expected: String,
        /// Actual checksum value
        actual: String,
    },

    /// Unsupported trajectory package format version
    #[error("unsupported trajectory package version: {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the package
        found: u32,
        /// Version this build understands
        expected: u32,
    },

    /// A batch worker thread panicked before returning its trajectories
    #[error("batch worker panicked")]
    WorkerPanicked,
}
