//! Erasure Coding Module
//!
//! Single-parity XOR erasure coding: payloads are split into `k` fixed-size
//! data shards plus one parity shard, tolerating the loss of exactly one
//! shard per coding round.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                   Erasure Coding Module                    │
//! ├───────────────────────────────────────────────────────────┤
//! │                                                            │
//! │  ┌────────────────┐            ┌────────────────────────┐  │
//! │  │  ShardPlanner  │            │      ParityEngine      │  │
//! │  │  (split / pad  │───────────▶│  (XOR fold, single-    │  │
//! │  │   reassemble)  │            │   loss reconstruction) │  │
//! │  └────────────────┘            └────────────────────────┘  │
//! │                                                            │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - **ShardPlanner** (`planner.rs`): splits a payload into `k` equal-length
//!   zero-padded shards and reassembles them, trimming the padding.
//! - **ParityEngine** (`parity.rs`): computes the XOR parity shard and
//!   recomputes a single missing data shard from parity plus survivors.
//!
//! # Usage
//!
//! ```rust,ignore
//! use xorstripe::ec::{ParityEngine, ShardPlanner};
//!
//! let planner = ShardPlanner::new(3)?;
//! let engine = ParityEngine::new(3)?;
//!
//! let shards = planner.plan(b"payload bytes")?;
//! let parity = engine.compute_parity(&shards)?;
//!
//! // Lose shard 1, then recover it
//! let mut survivors: Vec<_> = shards.iter().cloned().map(Some).collect();
//! survivors[1] = None;
//! let recovered = engine.reconstruct(&survivors, &parity)?;
//! ```

pub mod parity;
pub mod planner;

#[cfg(test)]
mod proptest;

pub use parity::ParityEngine;
pub use planner::{shard_size, ShardPlanner};
