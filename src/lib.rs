//! Cuboid layer census and companion numeric searches.
//!
//! The main search counts, for every layer size below a bound, how many
//! (cuboid, layer) pairs produce it, and reports the sizes reached exactly
//! a target number of times. The work is split by the largest cuboid side
//! and run on a rayon pool. Smaller sequential searches for primes and
//! highly-divisible triangle numbers live alongside it.

pub mod census;
pub mod divisors;
pub mod enumerator;
pub mod error;
pub mod layer;
pub mod primes;

// Re-export main types
pub use census::{Census, PartialCensus, ReferenceCount, DEFAULT_REFERENCE_SIZES, DEFAULT_TARGET};
pub use divisors::{first_triangle_with_divisors, triangle_number, DivisorCache, TriangleSearch};
pub use enumerator::{
    contributing_max_side, cuboids_with_layer_of_size, enumerate_partition, run_census,
    run_census_sequential, CensusConfig, CensusResult,
};
pub use error::{CensusError, Result};
pub use layer::{layer_size, Cuboid};
pub use primes::{is_prime, nth_prime};
