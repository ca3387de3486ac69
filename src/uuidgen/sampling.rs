//! Bulk sampling strategies.
//!
//! Both strategies return exactly `count` pairwise-distinct identifiers. The
//! caller has already checked feasibility, so neither loops unboundedly.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::PolytopeUuid;

/// Draws `count` distinct indices from `0..total` without replacement.
///
/// Partial Fisher-Yates: each step picks a slot in the shrinking live range
/// and swaps the last live slot into it. Only displaced slots are stored in
/// `swapped`, so memory is `O(count)` however large `total` is.
pub(super) fn distinct_indices(generator: &PolytopeUuid, total: u64, count: usize) -> Vec<u64> {
    debug_assert!(count as u128 <= u128::from(total));

    let mut swapped: HashMap<u64, u64> = HashMap::with_capacity(count);
    let mut drawn = Vec::with_capacity(count);
    let mut live = total;

    for _ in 0..count {
        let pick = generator.rng.below(live);
        let last = live - 1;

        let value = swapped.get(&pick).copied().unwrap_or(pick);
        let last_value = swapped.remove(&last).unwrap_or(last);
        if pick != last {
            swapped.insert(pick, last_value);
        }

        drawn.push(value);
        live = last;
    }

    drawn
}

/// Dense regime: sample indices then decode each one.
pub(super) fn by_index(generator: &PolytopeUuid, total: u64, count: usize) -> Vec<String> {
    distinct_indices(generator, total, count)
        .into_iter()
        .map(|index| generator.decode_unchecked(u128::from(index)))
        .collect()
}

/// Sparse regime: generate candidates and drop the ones already seen.
pub(super) fn by_rejection(generator: &PolytopeUuid, count: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(count);
    let mut accepted = Vec::with_capacity(count);
    let mut rejected = 0_u64;

    while accepted.len() < count {
        let candidate = generator.generate_one();
        if seen.insert(candidate.clone()) {
            accepted.push(candidate);
        } else {
            rejected += 1;
        }
    }

    if rejected > 0 {
        debug!(rejected, count, "rejection sampling discarded collisions");
    }
    accepted
}
