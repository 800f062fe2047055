//! Enumeration of cuboid layers below a size bound.
//!
//! Shapes `a >= b >= c >= 1` with `a <= max_side` are scanned and every
//! layer smaller than `max_layer_size` is counted. The outer side `a` is the
//! partition key: each value runs as an independent task on a rayon pool
//! and returns its own [`PartialCensus`], merged afterwards on the calling
//! thread.
//!
//! Early exits rely on the first layer (the surface area) growing with `b`
//! and `c`, and on layer sizes growing strictly with `n`.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{info, instrument};

use crate::census::{Census, PartialCensus, DEFAULT_TARGET};
use crate::error::{CensusError, Result};
use crate::layer::{layer_size, Cuboid};

/// Configuration for a census run
#[derive(Debug, Clone)]
pub struct CensusConfig {
    /// Largest side considered (inclusive)
    pub max_side: u64,
    /// Layers must be strictly smaller than this
    pub max_layer_size: u64,
    /// Count whose layer sizes are tracked exactly
    pub target: u64,
    /// Worker threads; `None` uses rayon's global pool
    pub threads: Option<usize>,
    /// Shuffle the partition order with this seed
    pub shuffle_seed: Option<u64>,
}

impl Default for CensusConfig {
    fn default() -> Self {
        Self {
            max_side: 5000,
            max_layer_size: 20000,
            target: DEFAULT_TARGET,
            threads: None,
            shuffle_seed: None,
        }
    }
}

impl CensusConfig {
    pub fn new(max_side: u64, max_layer_size: u64) -> Self {
        Self {
            max_side,
            max_layer_size,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_side == 0 {
            return Err(CensusError::ZeroBound { name: "max side" });
        }
        if self.max_layer_size == 0 {
            return Err(CensusError::ZeroBound {
                name: "max layer size",
            });
        }
        if self.threads == Some(0) {
            return Err(CensusError::ZeroBound { name: "threads" });
        }
        Ok(())
    }
}

/// Result of a partitioned census run
#[derive(Debug, Clone)]
pub struct CensusResult {
    pub census: Census,
    /// Number of partitions (outer side lengths) processed
    pub partitions: usize,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
}

/// Count every layer below `max_layer_size` for cuboids whose largest side
/// is exactly `a`.
pub fn enumerate_partition(a: u64, max_layer_size: u64) -> PartialCensus {
    let mut partial = PartialCensus::new();

    for b in 1..=a {
        if layer_size(a, b, 1, 1) >= max_layer_size {
            break;
        }
        for c in 1..=b {
            if layer_size(a, b, c, 1) >= max_layer_size {
                break;
            }
            let mut n = 1;
            loop {
                let size = layer_size(a, b, c, n);
                if size >= max_layer_size {
                    break;
                }
                *partial.entry(size).or_insert(0) += 1;
                n += 1;
            }
        }
    }

    partial
}

/// Largest outer side that can contribute a layer below `max_layer_size`.
///
/// The smallest first layer for side `a` is `4a + 2` (the `a * 1 * 1` rod),
/// so sides with `4a + 2 >= max_layer_size` record nothing.
pub fn contributing_max_side(config: &CensusConfig) -> u64 {
    config
        .max_side
        .min(config.max_layer_size.saturating_sub(3) / 4)
}

/// Partition key order, shuffled when a seed is configured.
fn partition_order(config: &CensusConfig) -> Vec<u64> {
    let mut sides: Vec<u64> = (1..=contributing_max_side(config)).collect();
    if let Some(seed) = config.shuffle_seed {
        sides.shuffle(&mut StdRng::seed_from_u64(seed));
    }
    sides
}

/// Run one task per outer side length on the worker pool and merge the
/// partial counts.
#[instrument(skip_all, fields(max_side = config.max_side, max_layer_size = config.max_layer_size))]
pub fn run_census(config: &CensusConfig) -> Result<CensusResult> {
    config.validate()?;
    let start_time = Instant::now();
    let sides = partition_order(config);
    let max_layer_size = config.max_layer_size;

    let compute = || -> Vec<PartialCensus> {
        sides
            .par_iter()
            .map(|&a| {
                let started = Instant::now();
                let partial = enumerate_partition(a, max_layer_size);
                info!(
                    side = a,
                    sizes = partial.len(),
                    elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
                    "checked cuboids of shape {a}*b*c"
                );
                partial
            })
            .collect()
    };

    let partials = match config.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(compute),
        None => compute(),
    };

    let census = Census::from_partials(config.target, &partials);

    Ok(CensusResult {
        census,
        partitions: partials.len(),
        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
    })
}

/// Same census on the calling thread, without partitioning.
pub fn run_census_sequential(config: &CensusConfig) -> Result<Census> {
    config.validate()?;
    let mut census = Census::new(config.target);

    for a in 1..=contributing_max_side(config) {
        let started = Instant::now();
        for b in 1..=a {
            if (Cuboid { a, b, c: 1 }).layer_size(1) >= config.max_layer_size {
                break;
            }
            for c in 1..=b {
                let cuboid = Cuboid { a, b, c };
                if cuboid.layer_size(1) >= config.max_layer_size {
                    break;
                }
                for size in cuboid.layers_below(config.max_layer_size) {
                    census.record(size);
                }
            }
        }
        info!(
            side = a,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "checked cuboids of shape {a}*b*c"
        );
    }

    Ok(census)
}

/// Number of cuboids having some layer of exactly `size` cubes.
///
/// Unlike a census this needs no side bound: a cuboid whose surface area
/// exceeds `size` cannot have such a layer.
pub fn cuboids_with_layer_of_size(size: u64) -> u64 {
    let mut found = 0;

    let mut a = 1;
    while layer_size(a, 1, 1, 1) <= size {
        for b in 1..=a {
            if layer_size(a, b, 1, 1) > size {
                break;
            }
            for c in 1..=b {
                if layer_size(a, b, c, 1) > size {
                    break;
                }
                let mut n = 1;
                let mut current = layer_size(a, b, c, n);
                while current < size {
                    n += 1;
                    current = layer_size(a, b, c, n);
                }
                if current == size {
                    found += 1;
                }
            }
        }
        a += 1;
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::census::DEFAULT_REFERENCE_SIZES;

    fn census_of(max_side: u64, max_layer_size: u64) -> Census {
        run_census(&CensusConfig::new(max_side, max_layer_size))
            .unwrap()
            .census
    }

    #[test]
    fn test_partition_counts_small_shapes() {
        // a = 1 has only the unit cube: 6, 18, 38, 66, ...
        let partial = enumerate_partition(1, 40);
        let mut sizes: Vec<_> = partial.keys().copied().collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![6, 18, 38]);
        assert!(partial.values().all(|&count| count == 1));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        for &(max_side, max_layer_size) in &[(10, 50), (10, 200), (25, 400), (40, 1000), (3, 7)] {
            let config = CensusConfig::new(max_side, max_layer_size);
            let parallel = run_census(&config).unwrap();
            let sequential = run_census_sequential(&config).unwrap();
            assert_eq!(parallel.census, sequential, "bounds ({max_side}, {max_layer_size})");
            assert_eq!(
                parallel.partitions,
                max_side.min((max_layer_size - 3) / 4) as usize
            );
        }
    }

    #[test]
    fn test_shuffled_partitions_give_same_census() {
        let config = CensusConfig::new(30, 600);
        let baseline = run_census(&config).unwrap().census;
        for seed in [1, 7, 2024] {
            let shuffled = CensusConfig {
                shuffle_seed: Some(seed),
                ..config.clone()
            };
            assert_eq!(run_census(&shuffled).unwrap().census, baseline);
        }

        let mut partials: Vec<PartialCensus> =
            (1..=30).map(|a| enumerate_partition(a, 600)).collect();
        partials.shuffle(&mut StdRng::seed_from_u64(99));
        assert_eq!(Census::from_partials(config.target, &partials), baseline);
    }

    #[test]
    fn test_huge_max_side_only_runs_contributing_sides() {
        let baseline = run_census(&CensusConfig::new(30, 100)).unwrap();
        assert_eq!(baseline.partitions, 24);

        let huge = run_census(&CensusConfig::new(u64::MAX, 100)).unwrap();
        assert_eq!(huge.census, baseline.census);
        assert_eq!(huge.partitions, 24);

        let big = run_census(&CensusConfig::new(20_000_000, 100)).unwrap();
        assert_eq!(big.partitions, 24);
        assert_eq!(big.census, baseline.census);

        let sequential = run_census_sequential(&CensusConfig::new(u64::MAX, 100)).unwrap();
        assert_eq!(sequential, baseline.census);
    }

    #[test]
    fn test_no_side_contributes_below_smallest_layer() {
        // The unit cube's first layer is 6.
        for max_layer_size in 1..=6 {
            let config = CensusConfig::new(100, max_layer_size);
            assert_eq!(contributing_max_side(&config), 0);
            let result = run_census(&config).unwrap();
            assert_eq!(result.partitions, 0);
            assert!(result.census.is_empty());
            assert!(run_census_sequential(&config).unwrap().is_empty());
        }
        assert_eq!(contributing_max_side(&CensusConfig::new(100, 7)), 1);
    }

    #[test]
    fn test_dedicated_thread_pool() {
        let config = CensusConfig {
            threads: Some(2),
            ..CensusConfig::new(20, 300)
        };
        let result = run_census(&config).unwrap();
        assert_eq!(result.census, run_census_sequential(&config).unwrap());
    }

    #[test]
    fn test_known_reference_counts() {
        let census = census_of(200, 1000);
        let counts: Vec<Option<u64>> = DEFAULT_REFERENCE_SIZES
            .iter()
            .map(|&size| census.count(size))
            .collect();
        assert_eq!(
            counts,
            vec![Some(2), Some(4), Some(5), Some(8), Some(10)]
        );
    }

    #[test]
    fn test_unreached_size_not_present() {
        let census = census_of(10, 50);
        // Layer sizes are always even.
        assert_eq!(census.count(23), None);
        assert_eq!(census.reference(23).count, None);
        // Above the bound.
        assert_eq!(census.count(154), None);
    }

    #[test]
    fn test_single_size_count_agrees_with_census() {
        // 4a + 2 < 242 keeps every contributing shape within a <= 59.
        let census = census_of(60, 242);
        for size in 1..242 {
            assert_eq!(
                census.count(size).unwrap_or(0),
                cuboids_with_layer_of_size(size),
                "size {size}"
            );
        }
        assert_eq!(cuboids_with_layer_of_size(22), 2);
        assert_eq!(cuboids_with_layer_of_size(154), 10);
        assert_eq!(cuboids_with_layer_of_size(0), 0);
    }

    #[test]
    fn test_rejects_zero_bounds() {
        assert!(matches!(
            run_census(&CensusConfig::new(0, 10)),
            Err(CensusError::ZeroBound { .. })
        ));
        assert!(matches!(
            run_census_sequential(&CensusConfig::new(10, 0)),
            Err(CensusError::ZeroBound { .. })
        ));
        let config = CensusConfig {
            threads: Some(0),
            ..CensusConfig::new(10, 10)
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_first_sizes_with_thousand_cuboids() {
        let census = census_of(5000, 20000);
        assert_eq!(census.first_exact(3), vec![18522, 18576, 18880]);
        assert_eq!(census.count(18522), Some(1000));
        assert_eq!(census.count(154), Some(10));
    }
}
