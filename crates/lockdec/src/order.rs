//! Deterministic iteration helpers for hash-keyed collections.
//!
//! A hash map's native iteration order is implementation-defined. Wherever
//! such a container feeds a computation whose result must match across
//! independently-built nodes, callers route through these helpers instead
//! of iterating directly; letting the container's order leak into
//! consensus-affecting output forks the network.

use crate::dec::Dec;
use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

/// All keys of a hash map in ascending order.
#[must_use]
pub fn sorted_keys<K, V>(map: &HashMap<K, V>) -> Vec<K>
where
    K: Clone + Ord,
{
    let mut keys: Vec<K> = map.keys().cloned().collect();
    keys.sort();

    keys
}

/// Members of `list` that carry a weight, deduplicated by first
/// occurrence, sorted by weight descending with ties broken by ascending
/// key. Elements without a weight entry are silently dropped, not erred.
///
/// The weight comparison assumes finite weights; see the NaN note on
/// `Ord` for [`Dec`].
#[must_use]
pub fn sorted_weighted_subset<K>(list: &[K], weights: &HashMap<K, Dec>) -> Vec<K>
where
    K: Clone + Eq + Hash + Ord,
{
    let mut seen = HashSet::with_capacity(list.len());
    let mut subset: Vec<K> = Vec::new();
    for key in list {
        if weights.contains_key(key) && seen.insert(key) {
            subset.push(key.clone());
        }
    }

    subset.sort_by(|a, b| weights[b].cmp(&weights[a]).then_with(|| a.cmp(b)));

    subset
}

///
/// TESTS
///
