//! Storage Group
//!
//! Orchestrates one erasure-coded group of `k` data units plus one parity
//! unit: drives the write path (plan, write shards, compute and write
//! parity) and the recovery path (detect the failed unit, reconstruct,
//! reassemble the payload).

use crate::ec::{ParityEngine, ShardPlanner};
use crate::error::{Error, Result};
use crate::unit::StorageUnit;
use bytes::Bytes;
use tracing::{info, instrument, warn};

// =============================================================================
// Group State
// =============================================================================

/// Health of the group for the current coding round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupState {
    /// No payload has been stored yet
    Empty,
    /// A round is live and all `k+1` units are healthy
    Ok,
    /// Exactly one unit has failed; the payload is still recoverable
    Degraded,
    /// Two or more units have failed; the round is lost
    Unrecoverable,
}

/// Configuration of the live coding round
#[derive(Debug, Clone, Copy)]
struct CodingRound {
    /// Length of every shard in this round
    shard_len: usize,
    /// Original payload length, for trimming padding on recovery
    payload_len: usize,
}

// =============================================================================
// Storage Group
// =============================================================================

/// An erasure-coded group of `k` data units and one parity unit.
///
/// The group exclusively owns its units; all mutation goes through the
/// group's operations. At most one coding round is live at a time, and the
/// group tolerates the loss of exactly one unit per round.
#[derive(Debug)]
pub struct StorageGroup {
    planner: ShardPlanner,
    engine: ParityEngine,
    /// Units `0..k` hold data shards; unit `k` holds parity
    units: Vec<StorageUnit>,
    round: Option<CodingRound>,
}

impl StorageGroup {
    /// Create a group with `data_units` data units plus one parity unit
    pub fn new(data_units: usize) -> Result<Self> {
        let planner = ShardPlanner::new(data_units)?;
        let engine = ParityEngine::new(data_units)?;
        let units = (0..=data_units).map(StorageUnit::new).collect();

        Ok(Self {
            planner,
            engine,
            units,
            round: None,
        })
    }

    /// Number of data units (k)
    pub fn data_units(&self) -> usize {
        self.planner.data_units()
    }

    /// Total units including parity (k + 1)
    pub fn total_units(&self) -> usize {
        self.units.len()
    }

    /// Index of the parity unit (always the last one)
    pub fn parity_index(&self) -> usize {
        self.data_units()
    }

    /// Current state of the group.
    ///
    /// Derived from the live round and the units' failed flags, so it can
    /// never drift from the observable unit state.
    pub fn group_state(&self) -> GroupState {
        if self.round.is_none() {
            return GroupState::Empty;
        }
        match self.failed_units().len() {
            0 => GroupState::Ok,
            1 => GroupState::Degraded,
            _ => GroupState::Unrecoverable,
        }
    }

    /// Whether the unit at `index` is failed
    pub fn is_unit_failed(&self, index: usize) -> Result<bool> {
        Ok(self.unit(index)?.is_failed())
    }

    /// Read the shard currently held by the unit at `index`
    pub fn read_unit(&self, index: usize) -> Result<Bytes> {
        self.unit(index)?.read()
    }

    /// Split `payload` into shards, write them to the data units, then
    /// compute and write the parity shard.
    ///
    /// A write failure partway through aborts with [`Error::PartialWrite`];
    /// earlier writes are not rolled back and the round is discarded. A
    /// payload rejected at plan time mutates nothing, so any previous round
    /// stays live and recoverable.
    #[instrument(skip(self, payload), fields(payload_len = payload.len()))]
    pub fn store_payload(&mut self, payload: &[u8]) -> Result<()> {
        let shards = self.planner.plan(payload)?;
        let shard_len = shards[0].len();

        for (index, shard) in shards.iter().enumerate() {
            if let Err(source) = self.units[index].write(shard.clone()) {
                self.round = None;
                return Err(Error::PartialWrite {
                    index,
                    source: Box::new(source),
                });
            }
        }

        let parity = self.engine.compute_parity(&shards)?;
        let parity_index = self.parity_index();
        if let Err(source) = self.units[parity_index].write(parity) {
            self.round = None;
            return Err(Error::PartialWrite {
                index: parity_index,
                source: Box::new(source),
            });
        }

        self.round = Some(CodingRound {
            shard_len,
            payload_len: payload.len(),
        });

        info!(
            data_units = self.data_units(),
            shard_len,
            payload_len = payload.len(),
            "payload stored across group"
        );

        Ok(())
    }

    /// Mark the unit at `index` failed, simulating an operational fault.
    ///
    /// Failing an already-failed unit is a no-op; the group stays in its
    /// current state rather than counting a spurious second failure.
    pub fn inject_failure(&mut self, index: usize) -> Result<()> {
        if self.unit(index)?.is_failed() {
            return Ok(());
        }
        self.units[index].fail();

        let state = self.group_state();
        warn!(unit = index, ?state, "failure injected");
        Ok(())
    }

    /// Recover the full payload while exactly one unit is failed.
    ///
    /// A lost data shard is recomputed from parity plus the survivors; a
    /// lost parity unit leaves the data shards intact, so the payload is
    /// reassembled from them directly.
    #[instrument(skip(self))]
    pub fn recover_payload(&self) -> Result<Vec<u8>> {
        let Some(round) = self.round else {
            return Err(Error::NotDegraded);
        };

        let failed = self.failed_units();
        let lost = match failed.as_slice() {
            [] => return Err(Error::NotDegraded),
            [lost] => *lost,
            _ => {
                return Err(Error::Unrecoverable {
                    failed: failed.len(),
                })
            }
        };

        let data_units = self.data_units();
        let data = if lost == self.parity_index() {
            // Parity lost: every data shard is still readable
            self.read_data_shards()?
        } else {
            let parity = self.units[self.parity_index()].read()?;
            let survivors = self.read_survivors(lost)?;
            let recovered = self.engine.reconstruct(&survivors, &parity)?;

            let mut data = Vec::with_capacity(data_units);
            for (index, survivor) in survivors.into_iter().enumerate() {
                match survivor {
                    Some(shard) => data.push(shard),
                    None => data.push(recovered.clone()),
                }
                debug_assert_eq!(data[index].len(), round.shard_len);
            }
            data
        };

        let payload = self.planner.reassemble(&data, round.payload_len)?;
        info!(
            lost_unit = lost,
            payload_len = payload.len(),
            "payload recovered"
        );
        Ok(payload)
    }

    fn unit(&self, index: usize) -> Result<&StorageUnit> {
        self.units.get(index).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "unit index {} out of range for group of {}",
                index,
                self.units.len()
            ))
        })
    }

    fn failed_units(&self) -> Vec<usize> {
        self.units
            .iter()
            .filter(|u| u.is_failed())
            .map(StorageUnit::index)
            .collect()
    }

    /// Read all `k` data shards, valid only while every data unit is live
    fn read_data_shards(&self) -> Result<Vec<Bytes>> {
        let mut shards = Vec::with_capacity(self.data_units());
        for index in 0..self.data_units() {
            shards.push(self.units[index].read()?);
        }
        Ok(shards)
    }

    fn read_survivors(&self, lost: usize) -> Result<Vec<Option<Bytes>>> {
        let mut survivors = Vec::with_capacity(self.data_units());
        for index in 0..self.data_units() {
            if index == lost {
                survivors.push(None);
            } else {
                survivors.push(Some(self.units[index].read()?));
            }
        }
        Ok(survivors)
    }
}

// =============================================================================
// Tests
// =============================================================================
