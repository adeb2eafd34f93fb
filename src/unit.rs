//! Storage Unit
//!
//! An addressable, failable in-memory byte container representing one
//! physical drive. Units are owned exclusively by a [`StorageGroup`];
//! callers never mutate a unit directly.
//!
//! [`StorageGroup`]: crate::group::StorageGroup

use crate::error::{Error, Result};
use bytes::Bytes;
use tracing::debug;

/// One storage unit in an erasure-coded group.
///
/// Lifecycle: created empty, written at most once per coding round (a new
/// round overwrites prior content), and optionally failed. Failure clears the
/// stored shard so stale bytes can never leak through a later read, even if
/// the failed flag were mishandled elsewhere.
#[derive(Debug, Clone)]
pub struct StorageUnit {
    /// Ordinal index, unique within the owning group
    index: usize,
    /// Shard currently stored, if any
    shard: Option<Bytes>,
    /// Whether this unit has been marked failed
    failed: bool,
}

impl StorageUnit {
    /// Create a new empty, healthy unit
    pub fn new(index: usize) -> Self {
        Self {
            index,
            shard: None,
            failed: false,
        }
    }

    /// Ordinal index of this unit within its group
    pub fn index(&self) -> usize {
        self.index
    }

    /// Store a shard, replacing any prior content.
    ///
    /// Fails with [`Error::UnitFailed`] if the unit is marked failed; the
    /// stored content is not modified in that case.
    pub fn write(&mut self, shard: Bytes) -> Result<()> {
        if self.failed {
            return Err(Error::UnitFailed { index: self.index });
        }
        debug!(unit = self.index, len = shard.len(), "wrote shard to unit");
        self.shard = Some(shard);
        Ok(())
    }

    /// Read the stored shard.
    ///
    /// Fails with [`Error::UnitFailed`] if the unit is failed, and with
    /// [`Error::InvalidConfig`] if nothing has been written yet.
    pub fn read(&self) -> Result<Bytes> {
        if self.failed {
            return Err(Error::UnitFailed { index: self.index });
        }
        self.shard.clone().ok_or_else(|| {
            Error::InvalidConfig(format!("unit {} holds no shard", self.index))
        })
    }

    /// Mark the unit failed and clear its content. Idempotent; cannot fail.
    pub fn fail(&mut self) {
        debug!(unit = self.index, "unit marked failed");
        self.failed = true;
        self.shard = None;
    }

    /// Whether the unit is currently failed. Pure query.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Clear the failed flag and any content, returning the unit to its
    /// initial empty state so it can be reused for a new round.
    pub fn reset(&mut self) {
        debug!(unit = self.index, "unit reset");
        self.failed = false;
        self.shard = None;
    }
}

// =============================================================================
// Tests
// =============================================================================
