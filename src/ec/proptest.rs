//! Property-Based Tests for Single-Parity Erasure Coding
//!
//! Uses proptest to verify planner/parity correctness across a wide range of
//! payloads and unit counts.
//!
//! # Test Properties
//!
//! 1. **Roundtrip Correctness**: reassemble(plan(payload)) = payload
//! 2. **Parity Commutativity**: parity is invariant under shard permutation
//! 3. **Single-Failure Recovery**: any one lost shard is recovered exactly
//! 4. **Multi-Failure Rejection**: two losses are always detected and refused

#![cfg(test)]

use proptest::prelude::*;

use super::parity::ParityEngine;
use super::planner::{shard_size, ShardPlanner};
use crate::error::Error;
use bytes::Bytes;

// =============================================================================
// Property Strategies
// =============================================================================

/// Strategy for generating data unit counts.
fn unit_count_strategy() -> impl Strategy<Value = usize> {
    1usize..=8
}

/// Strategy for generating non-empty payloads of various sizes.
fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..2000)
}

// =============================================================================
// Roundtrip Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: Planning then reassembling returns the original payload.
    #[test]
    fn prop_plan_reassemble_roundtrip(
        k in unit_count_strategy(),
        payload in payload_strategy(),
    ) {
        let planner = ShardPlanner::new(k)?;

        let shards = planner.plan(&payload)?;
        prop_assert_eq!(shards.len(), k);

        let rebuilt = planner.reassemble(&shards, payload.len())?;
        prop_assert_eq!(rebuilt, payload);
    }

    /// Property: Every shard in a round has length ceil(len / k), and the
    /// total padding is less than one full shard.
    #[test]
    fn prop_shard_lengths_and_padding(
        k in unit_count_strategy(),
        payload in payload_strategy(),
    ) {
        let planner = ShardPlanner::new(k)?;
        let shards = planner.plan(&payload)?;

        let s = shard_size(payload.len(), k);
        for shard in &shards {
            prop_assert_eq!(shard.len(), s);
        }
        prop_assert!(k * s >= payload.len());
        prop_assert!(k * s - payload.len() < k);
    }

    /// Property: Planning is deterministic.
    #[test]
    fn prop_plan_deterministic(
        k in unit_count_strategy(),
        payload in payload_strategy(),
    ) {
        let planner = ShardPlanner::new(k)?;
        prop_assert_eq!(planner.plan(&payload)?, planner.plan(&payload)?);
    }
}

// =============================================================================
// Parity Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: Parity is invariant under any permutation of the shards.
    #[test]
    fn prop_parity_commutative(
        k in 2usize..=6,
        payload in payload_strategy(),
        seed in any::<u64>(),
    ) {
        let planner = ShardPlanner::new(k)?;
        let engine = ParityEngine::new(k)?;

        let shards = planner.plan(&payload)?;
        let parity = engine.compute_parity(&shards)?;

        // Pseudo-random permutation driven by the seed
        let mut shuffled = shards.clone();
        let mut state = seed;
        for i in (1..shuffled.len()).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let j = (state % (i as u64 + 1)) as usize;
            shuffled.swap(i, j);
        }

        prop_assert_eq!(engine.compute_parity(&shuffled)?, parity);
    }

    /// Property: XOR of all data shards plus parity is the zero shard.
    #[test]
    fn prop_parity_folds_to_zero(
        k in unit_count_strategy(),
        payload in payload_strategy(),
    ) {
        let planner = ShardPlanner::new(k)?;
        let engine = ParityEngine::new(k)?;

        let shards = planner.plan(&payload)?;
        let parity = engine.compute_parity(&shards)?;

        let mut fold = parity.to_vec();
        for shard in &shards {
            for (f, b) in fold.iter_mut().zip(shard.iter()) {
                *f ^= b;
            }
        }
        prop_assert!(fold.iter().all(|&b| b == 0));
    }
}

// =============================================================================
// Recovery Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: Any single lost data shard is recovered byte-for-byte.
    #[test]
    fn prop_single_loss_recovery(
        k in 2usize..=8,
        payload in payload_strategy(),
        lost_seed in any::<usize>(),
    ) {
        let lost = lost_seed % k;

        let planner = ShardPlanner::new(k)?;
        let engine = ParityEngine::new(k)?;

        let shards = planner.plan(&payload)?;
        let parity = engine.compute_parity(&shards)?;

        let mut survivors: Vec<Option<Bytes>> =
            shards.iter().cloned().map(Some).collect();
        survivors[lost] = None;

        let recovered = engine.reconstruct(&survivors, &parity)?;
        prop_assert_eq!(recovered, shards[lost].clone());
    }

    /// Property: Recovering a lost parity shard is recomputation, and the
    /// result always equals the original parity.
    #[test]
    fn prop_parity_loss_recovery(
        k in unit_count_strategy(),
        payload in payload_strategy(),
    ) {
        let planner = ShardPlanner::new(k)?;
        let engine = ParityEngine::new(k)?;

        let shards = planner.plan(&payload)?;
        let original = engine.compute_parity(&shards)?;
        let recomputed = engine.compute_parity(&shards)?;

        prop_assert_eq!(recomputed, original);
    }

    /// Property: Two missing shards are always rejected, never fabricated.
    #[test]
    fn prop_multi_loss_rejected(
        k in 2usize..=8,
        payload in payload_strategy(),
        first_seed in any::<usize>(),
        second_seed in any::<usize>(),
    ) {
        let first = first_seed % k;
        let mut second = second_seed % k;
        if second == first {
            second = (second + 1) % k;
        }

        let planner = ShardPlanner::new(k)?;
        let engine = ParityEngine::new(k)?;

        let shards = planner.plan(&payload)?;
        let parity = engine.compute_parity(&shards)?;

        let mut survivors: Vec<Option<Bytes>> =
            shards.into_iter().map(Some).collect();
        survivors[first] = None;
        survivors[second] = None;

        let result = engine.reconstruct(&survivors, &parity);
        prop_assert!(
            matches!(result, Err(Error::InsufficientShards { missing: 2 })),
            "two lost shards must be rejected, got {:?}",
            result
        );
    }
}
