//! xorstripe - Single-Parity Erasure-Coded Storage Group
//!
//! An in-memory storage group that splits a payload into `k` fixed-size data
//! shards across independent storage units, with one extra unit holding an
//! XOR parity shard. Losing any single unit (data or parity) leaves the
//! payload fully recoverable from the survivors.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                         StorageGroup                            │
//! ├────────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐   ┌──────────────┐   ┌────────────────────┐  │
//! │  │ ShardPlanner │──▶│ ParityEngine │──▶│  StorageUnit × k+1 │  │
//! │  │ (split/pad)  │   │  (XOR fold)  │   │  (failable drives) │  │
//! │  └──────────────┘   └──────────────┘   └────────────────────┘  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Fault Model
//!
//! - Exactly one unit loss per coding round is tolerated.
//! - A second loss moves the group to `Unrecoverable`; it is detected and
//!   reported, never masked by fabricated bytes.
//! - Storage is in-memory only; there is no persistence across restarts.
//!
//! # Modules
//!
//! - [`ec`] - Shard planning and XOR parity engine
//! - [`error`] - Error types
//! - [`group`] - Group orchestration and the round state machine
//! - [`unit`] - Failable in-memory storage units

pub mod ec;
pub mod error;
pub mod group;
pub mod unit;

// Re-export commonly used types
pub use ec::{ParityEngine, ShardPlanner};
pub use error::{Error, Result};
pub use group::{GroupState, StorageGroup};
pub use unit::StorageUnit;
