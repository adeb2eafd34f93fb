//! Parity Engine
//!
//! XOR parity computation and single-loss reconstruction. Byte `j` of the
//! parity shard is the XOR of byte `j` across all data shards; the same fold
//! applied to parity plus the survivors recomputes one missing shard.

use crate::error::{Error, Result};
use bytes::Bytes;
use tracing::{debug, instrument};

/// Computes and applies XOR parity over `k` equal-length data shards.
///
/// Both operations are pure functions. The XOR fold is commutative and
/// associative, so neither depends on shard order beyond index bookkeeping.
#[derive(Debug, Clone)]
pub struct ParityEngine {
    /// Number of data shards (k)
    data_units: usize,
}

impl ParityEngine {
    /// Create an engine for `data_units` data shards
    pub fn new(data_units: usize) -> Result<Self> {
        if data_units == 0 {
            return Err(Error::InvalidConfig(
                "data_units must be greater than 0".to_string(),
            ));
        }
        Ok(Self { data_units })
    }

    /// Number of data shards this engine folds over
    pub fn data_units(&self) -> usize {
        self.data_units
    }

    /// Compute the XOR parity shard over exactly `k` data shards.
    ///
    /// All shards must share one length; a mismatch means the planner
    /// invariant was violated upstream and is reported, never masked.
    #[instrument(skip(self, shards))]
    pub fn compute_parity(&self, shards: &[Bytes]) -> Result<Bytes> {
        if shards.len() != self.data_units {
            return Err(Error::InvalidConfig(format!(
                "expected {} shards, got {}",
                self.data_units,
                shards.len()
            )));
        }

        let size = shards[0].len();
        let mut parity = vec![0u8; size];

        for (index, shard) in shards.iter().enumerate() {
            if shard.len() != size {
                return Err(Error::ShardLengthMismatch {
                    index,
                    expected: size,
                    actual: shard.len(),
                });
            }
            for (p, b) in parity.iter_mut().zip(shard.iter()) {
                *p ^= b;
            }
        }

        debug!(
            "computed parity over {} shards of {} bytes",
            self.data_units, size
        );

        Ok(Bytes::from(parity))
    }

    /// Recompute the single missing data shard from parity plus survivors.
    ///
    /// `shards` must hold exactly `k` entries with exactly one `None` (the
    /// lost shard). More than one missing entry is a multi-failure and is
    /// rejected with [`Error::InsufficientShards`]; zero missing entries
    /// means there is nothing to reconstruct and is rejected as a
    /// configuration error.
    #[instrument(skip(self, shards, parity))]
    pub fn reconstruct(&self, shards: &[Option<Bytes>], parity: &Bytes) -> Result<Bytes> {
        if shards.len() != self.data_units {
            return Err(Error::InvalidConfig(format!(
                "expected {} shards, got {}",
                self.data_units,
                shards.len()
            )));
        }

        let missing = shards.iter().filter(|s| s.is_none()).count();
        if missing > 1 {
            return Err(Error::InsufficientShards { missing });
        }
        if missing == 0 {
            return Err(Error::InvalidConfig(
                "no shard is missing; nothing to reconstruct".to_string(),
            ));
        }

        let size = parity.len();
        let mut recovered = parity.to_vec();

        for (index, shard) in shards.iter().enumerate() {
            let Some(shard) = shard else { continue };
            if shard.len() != size {
                return Err(Error::ShardLengthMismatch {
                    index,
                    expected: size,
                    actual: shard.len(),
                });
            }
            for (r, b) in recovered.iter_mut().zip(shard.iter()) {
                *r ^= b;
            }
        }

        debug!(
            "reconstructed missing shard from parity and {} survivors",
            self.data_units - 1
        );

        Ok(Bytes::from(recovered))
    }
}

// =============================================================================
// Tests
// =============================================================================
