//! Memoized divisor lists and the highly-divisible triangle number search.
//!
//! Divisors of `n` are built from the divisors of `n / p`, where `p` is the
//! smallest prime factor of `n`: every divisor of `n` is either a divisor of
//! `n / p` or `p` times one. Consecutive triangle numbers share many factors,
//! so the cache is reused across the whole search.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use tracing::debug;

/// Default divisor count for [`first_triangle_with_divisors`].
pub const DEFAULT_MIN_DIVISORS: usize = 500;

/// Sorted divisor list. Most integers have few divisors.
pub type Divisors = SmallVec<[u64; 16]>;

#[inline]
pub fn triangle_number(index: u64) -> u64 {
    index * (index + 1) / 2
}

fn smallest_prime_factor(n: u64) -> u64 {
    if n % 2 == 0 {
        return 2;
    }
    let mut i = 3;
    while i * i <= n {
        if n % i == 0 {
            return i;
        }
        i += 2;
    }
    n
}

/// Cache from integer to its sorted divisors, filled on demand.
#[derive(Debug, Clone)]
pub struct DivisorCache {
    entries: HashMap<u64, Divisors>,
}

impl Default for DivisorCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DivisorCache {
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        entries.insert(1, smallvec![1]);
        Self { entries }
    }

    /// Divisors of `n` in ascending order. Zero has none.
    pub fn divisors(&mut self, n: u64) -> &[u64] {
        if !self.entries.contains_key(&n) {
            let divisors = self.populate(n);
            self.entries.insert(n, divisors);
        }
        &self.entries[&n]
    }

    fn populate(&mut self, n: u64) -> Divisors {
        if n == 0 {
            return Divisors::new();
        }
        let p = smallest_prime_factor(n);
        let rest: Divisors = self.divisors(n / p).iter().copied().collect();

        let mut all: Divisors = rest
            .iter()
            .copied()
            .chain(rest.iter().map(|d| d * p))
            .collect();
        all.sort_unstable();
        all.dedup();
        all
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// First triangle number reaching a divisor count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriangleSearch {
    pub index: u64,
    pub triangle: u64,
    pub divisor_count: usize,
}

/// Find the first triangle number with at least `min_divisors` divisors.
pub fn first_triangle_with_divisors(min_divisors: usize) -> TriangleSearch {
    let mut cache = DivisorCache::new();
    let mut index = 0;

    loop {
        index += 1;
        let triangle = triangle_number(index);
        let divisor_count = cache.divisors(triangle).len();
        if index % 100 == 0 {
            debug!(index, triangle, divisor_count, cached = cache.len(), "checking triangle numbers");
        }
        if divisor_count >= min_divisors {
            return TriangleSearch {
                index,
                triangle,
                divisor_count,
            };
        }
    }
}
