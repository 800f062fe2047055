//! Count tables mapping layer sizes to how many (cuboid, layer) pairs
//! produce them.
//!
//! Workers build a [`PartialCensus`] for one outer side length each; the
//! coordinator folds them into a [`Census`] with [`Census::merge`]. Merging
//! is a per-key sum, so the result does not depend on partition order.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Default count whose layer sizes are reported.
pub const DEFAULT_TARGET: u64 = 1000;

/// Smallest layer sizes reached by 2, 4, 5, 8 and 10 cuboid layers.
pub const DEFAULT_REFERENCE_SIZES: [u64; 5] = [22, 46, 78, 118, 154];

/// Counts for a single partition, before merging.
pub type PartialCensus = HashMap<u64, u64>;

/// Accumulated layer-size counts plus the set of sizes whose count is
/// exactly `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Census {
    counts: BTreeMap<u64, u64>,
    target: u64,
    exact: BTreeSet<u64>,
}

/// Count for one reference layer size; `None` when no layer reached it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceCount {
    pub layer_size: u64,
    pub count: Option<u64>,
}

impl std::fmt::Display for ReferenceCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.count {
            Some(count) => write!(f, "C({}) = {}", self.layer_size, count),
            None => write!(f, "C({}) not present", self.layer_size),
        }
    }
}

impl Census {
    pub fn new(target: u64) -> Self {
        Self {
            counts: BTreeMap::new(),
            target,
            exact: BTreeSet::new(),
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Add `count` occurrences of `layer_size`.
    ///
    /// Membership in the exact-target set is recomputed from the new total,
    /// so a jump from below the target to above it never leaves a stale key.
    pub fn add(&mut self, layer_size: u64, count: u64) {
        if count == 0 {
            return;
        }
        let total = self.counts.entry(layer_size).or_insert(0);
        *total += count;
        if *total == self.target {
            self.exact.insert(layer_size);
        } else {
            self.exact.remove(&layer_size);
        }
    }

    #[inline]
    pub fn record(&mut self, layer_size: u64) {
        self.add(layer_size, 1);
    }

    /// Fold one partition's counts into this census.
    pub fn merge(mut self, partial: &PartialCensus) -> Self {
        for (&layer_size, &count) in partial {
            self.add(layer_size, count);
        }
        self
    }

    /// Merge many partitions into a fresh census.
    pub fn from_partials<'a, I>(target: u64, partials: I) -> Self
    where
        I: IntoIterator<Item = &'a PartialCensus>,
    {
        partials
            .into_iter()
            .fold(Census::new(target), |census, partial| census.merge(partial))
    }

    /// Occurrences of `layer_size`, or `None` if it was never produced.
    pub fn count(&self, layer_size: u64) -> Option<u64> {
        self.counts.get(&layer_size).copied()
    }

    pub fn reference(&self, layer_size: u64) -> ReferenceCount {
        ReferenceCount {
            layer_size,
            count: self.count(layer_size),
        }
    }

    /// Layer sizes whose count is exactly the target, ascending.
    pub fn exact(&self) -> &BTreeSet<u64> {
        &self.exact
    }

    /// The `limit` smallest layer sizes whose count is exactly the target.
    pub fn first_exact(&self, limit: usize) -> Vec<u64> {
        self.exact.iter().take(limit).copied().collect()
    }

    pub fn counts(&self) -> &BTreeMap<u64, u64> {
        &self.counts
    }

    /// Number of distinct layer sizes seen
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total (cuboid, layer) pairs recorded
    pub fn occurrences(&self) -> u64 {
        self.counts.values().sum()
    }
}
