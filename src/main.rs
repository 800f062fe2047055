//! CLI entry point for the cuboid census.
//!
//! Usage:
//!   cuboid-census layers <MAX_SIDE> <MAX_LAYER_SIZE> [options]
//!   cuboid-census layer-count <SIZE>
//!   cuboid-census nth-prime [INDEX]
//!   cuboid-census triangle-divisors [MIN_DIVISORS]
//!
//! Options for `layers`:
//!   --target <n>          Count whose layer sizes are listed (default: 1000)
//!   --first <n>           How many of those sizes to list (default: 10)
//!   --reference <size>... Layer sizes to report counts for (default: 22 46 78 118 154)
//!   --threads <n>         Worker threads (default: one per core)
//!   --seed <n>            Shuffle partition order with this seed
//!   --sequential          Enumerate on one thread without partitioning
//!   --json                Print the report as JSON
//!
//! Progress is logged to stderr; set RUST_LOG to adjust verbosity.

use std::process;
use std::time::Instant;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use cuboid_census::divisors::DEFAULT_MIN_DIVISORS;
use cuboid_census::primes::DEFAULT_PRIME_INDEX;
use cuboid_census::{
    cuboids_with_layer_of_size, first_triangle_with_divisors, nth_prime, run_census,
    run_census_sequential, CensusConfig, CensusError, ReferenceCount, DEFAULT_REFERENCE_SIZES,
    DEFAULT_TARGET,
};

#[derive(Parser)]
#[command(name = "cuboid-census")]
#[command(about = "Cuboid layer census and companion numeric searches")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count (cuboid, layer) pairs for every layer size below a bound
    Layers {
        /// Largest cuboid side considered (inclusive)
        #[arg(value_name = "MAX_SIDE")]
        max_side: u64,

        /// Layer sizes must be strictly below this
        #[arg(value_name = "MAX_LAYER_SIZE")]
        max_layer_size: u64,

        /// Count whose layer sizes are listed
        #[arg(long, default_value_t = DEFAULT_TARGET)]
        target: u64,

        /// Number of smallest matching layer sizes to list
        #[arg(long, default_value = "10")]
        first: usize,

        /// Layer sizes whose counts are reported
        #[arg(long, num_args = 1.., default_values_t = DEFAULT_REFERENCE_SIZES)]
        reference: Vec<u64>,

        /// Worker threads (defaults to one per core)
        #[arg(long)]
        threads: Option<usize>,

        /// Shuffle partition order with this seed
        #[arg(long)]
        seed: Option<u64>,

        /// Enumerate on the calling thread without partitioning
        #[arg(long)]
        sequential: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count cuboids having a layer of exactly the given size
    LayerCount {
        #[arg(value_name = "SIZE")]
        size: u64,
    },

    /// Find the n-th prime
    NthPrime {
        #[arg(value_name = "INDEX", default_value_t = DEFAULT_PRIME_INDEX)]
        index: u64,
    },

    /// Find the first triangle number with at least this many divisors
    TriangleDivisors {
        #[arg(value_name = "MIN_DIVISORS", default_value_t = DEFAULT_MIN_DIVISORS)]
        min_divisors: usize,
    },
}

/// Output format for a census report
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CensusOutput {
    max_side: u64,
    max_layer_size: u64,
    target: u64,
    references: Vec<ReferenceCount>,
    first_exact: Vec<u64>,
    distinct_sizes: usize,
    occurrences: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    partitions: Option<usize>,
    time_elapsed_ms: u64,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CensusError> {
    match command {
        Commands::Layers {
            max_side,
            max_layer_size,
            target,
            first,
            reference,
            threads,
            seed,
            sequential,
            json,
        } => {
            let config = CensusConfig {
                max_side,
                max_layer_size,
                target,
                threads,
                shuffle_seed: seed,
            };
            tracing::info!(max_side, max_layer_size, target, "computing layer census");

            let start_time = Instant::now();
            let (census, partitions) = if sequential {
                (run_census_sequential(&config)?, None)
            } else {
                let result = run_census(&config)?;
                (result.census, Some(result.partitions))
            };

            let output = CensusOutput {
                max_side,
                max_layer_size,
                target,
                references: reference.iter().map(|&size| census.reference(size)).collect(),
                first_exact: census.first_exact(first),
                distinct_sizes: census.len(),
                occurrences: census.occurrences(),
                partitions,
                time_elapsed_ms: start_time.elapsed().as_millis() as u64,
            };

            if json {
                match serde_json::to_string_pretty(&output) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Error serializing report: {}", e);
                        process::exit(1);
                    }
                }
            } else {
                print_report(&output);
            }
        }
        Commands::LayerCount { size } => {
            let count = cuboids_with_layer_of_size(size);
            println!("Number of cuboids with a layer of size {}: {}", size, count);
        }
        Commands::NthPrime { index } => {
            let prime = nth_prime(index)?;
            println!("{}th prime is {}", index, prime);
        }
        Commands::TriangleDivisors { min_divisors } => {
            let result = first_triangle_with_divisors(min_divisors);
            println!(
                "{} (triangle #{}) has {} divisors",
                result.triangle, result.index, result.divisor_count
            );
        }
    }
    Ok(())
}

fn print_report(output: &CensusOutput) {
    println!(
        "Computed with max side {} and max layer size {} in {} ms",
        output.max_side, output.max_layer_size, output.time_elapsed_ms
    );
    for reference in &output.references {
        println!("{}", reference);
    }
    println!(
        "First {} layer sizes with C(n) = {}: {:?}",
        output.first_exact.len(),
        output.target,
        output.first_exact
    );
}
