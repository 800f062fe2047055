//! Errors returned by the solvers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CensusError {
    /// A search bound that must be positive was zero.
    #[error("{name} must be at least 1")]
    ZeroBound { name: &'static str },

    /// Ordinals start at 1.
    #[error("{name} is 1-based, got 0")]
    ZeroIndex { name: &'static str },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, CensusError>;
