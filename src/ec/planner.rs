//! Shard Planner
//!
//! Splits an input payload into `k` fixed-size, zero-padded shards and
//! reassembles shards back into the original payload.

use crate::error::{Error, Result};
use bytes::Bytes;
use tracing::{debug, instrument};

/// Calculate the shard size for a given payload size and data unit count
pub fn shard_size(payload_len: usize, data_units: usize) -> usize {
    payload_len.div_ceil(data_units)
}

/// Plans the split of a payload across a configured number of data units.
///
/// Every shard in a round has the same length `s = ceil(payload_len / k)`;
/// the tail of the payload is right-padded with zero bytes. Planning is
/// deterministic: the same `(payload, k)` always yields the same shards.
#[derive(Debug, Clone)]
pub struct ShardPlanner {
    /// Number of data units (k)
    data_units: usize,
}

impl ShardPlanner {
    /// Create a planner for `data_units` data shards
    pub fn new(data_units: usize) -> Result<Self> {
        if data_units == 0 {
            return Err(Error::InvalidConfig(
                "data_units must be greater than 0".to_string(),
            ));
        }
        Ok(Self { data_units })
    }

    /// Number of data units this planner splits across
    pub fn data_units(&self) -> usize {
        self.data_units
    }

    /// Split `payload` into exactly `k` shards of identical length.
    ///
    /// Empty payloads are rejected: with no bytes there is no meaningful
    /// shard length, so callers must supply at least one byte.
    #[instrument(skip(self, payload), fields(payload_len = payload.len()))]
    pub fn plan(&self, payload: &[u8]) -> Result<Vec<Bytes>> {
        if payload.is_empty() {
            return Err(Error::InvalidConfig(
                "payload must not be empty".to_string(),
            ));
        }

        let size = shard_size(payload.len(), self.data_units);
        let mut shards = Vec::with_capacity(self.data_units);

        for i in 0..self.data_units {
            let start = std::cmp::min(i * size, payload.len());
            let end = std::cmp::min(start + size, payload.len());

            let mut shard = payload[start..end].to_vec();
            shard.resize(size, 0);
            shards.push(Bytes::from(shard));
        }

        debug!(
            "planned {} bytes into {} shards of {} bytes each",
            payload.len(),
            self.data_units,
            size
        );

        Ok(shards)
    }

    /// Reassemble data shards into the original payload.
    ///
    /// Inverse of [`plan`](Self::plan): concatenates the `k` shards in order
    /// and truncates the zero padding back to `payload_len`.
    pub fn reassemble(&self, shards: &[Bytes], payload_len: usize) -> Result<Vec<u8>> {
        if shards.len() != self.data_units {
            return Err(Error::InvalidConfig(format!(
                "expected {} shards, got {}",
                self.data_units,
                shards.len()
            )));
        }

        let total: usize = shards.iter().map(|s| s.len()).sum();
        if total < payload_len {
            return Err(Error::InvalidConfig(format!(
                "shards hold {} bytes, cannot cover payload of {}",
                total, payload_len
            )));
        }

        let mut payload = Vec::with_capacity(payload_len);
        for shard in shards {
            payload.extend_from_slice(shard);
        }
        payload.truncate(payload_len);

        Ok(payload)
    }
}

// =============================================================================
// Tests
// =============================================================================
