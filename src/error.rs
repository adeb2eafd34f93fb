//! Error types for the erasure-coded storage group

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding, storing, or recovering a payload
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid erasure configuration or malformed request
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Operation attempted against a failed storage unit
    #[error("storage unit {index} has failed")]
    UnitFailed { index: usize },

    /// Shards of differing length reached the parity engine
    #[error("shard length mismatch at unit {index}: expected {expected} bytes, got {actual}")]
    ShardLengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// More than one unit missing at reconstruction time; single-parity
    /// tolerates exactly one loss
    #[error("insufficient shards for reconstruction: {missing} units missing, tolerance is 1")]
    InsufficientShards { missing: usize },

    /// A store operation failed partway through; no rollback is performed
    #[error("store aborted at unit {index}: {source}")]
    PartialWrite {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    /// Recovery requested while every unit is still healthy
    #[error("nothing to recover: no unit in this round has failed")]
    NotDegraded,

    /// Recovery requested after more than one unit failed in the same round
    #[error("unrecoverable: {failed} units failed in this round, tolerance is 1")]
    Unrecoverable { failed: usize },
}
