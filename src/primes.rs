//! Trial-division primality and the n-th prime search.

use tracing::debug;

use crate::error::{CensusError, Result};

/// Default ordinal for [`nth_prime`].
pub const DEFAULT_PRIME_INDEX: u64 = 10_001;

/// Deterministic primality test by trial division with `6k ± 1` candidates.
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5;
    while i * i <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// The `index`-th prime, counting 2 as the first.
pub fn nth_prime(index: u64) -> Result<u64> {
    if index == 0 {
        return Err(CensusError::ZeroIndex { name: "prime index" });
    }
    if index == 1 {
        return Ok(2);
    }

    // Odd candidates only once 2 is counted.
    let mut found = 1;
    let mut candidate = 1;
    while found < index {
        candidate += 2;
        if is_prime(candidate) {
            found += 1;
        }
    }
    debug!(index, prime = candidate, "found prime");
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime_small() {
        let primes: Vec<u64> = (0..50).filter(|&n| is_prime(n)).collect();
        assert_eq!(
            primes,
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]
        );
    }

    #[test]
    fn test_is_prime_squares_and_large() {
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(!is_prime(121));
        assert!(!is_prime(7919 * 7919));
        assert!(is_prime(7919));
        assert!(is_prime(104_743));
        assert!(is_prime(2_147_483_647));
    }

    #[test]
    fn test_nth_prime() {
        assert_eq!(nth_prime(1).unwrap(), 2);
        assert_eq!(nth_prime(2).unwrap(), 3);
        assert_eq!(nth_prime(6).unwrap(), 13);
        assert_eq!(nth_prime(1000).unwrap(), 7919);
        assert_eq!(nth_prime(DEFAULT_PRIME_INDEX).unwrap(), 104_743);
    }

    #[test]
    fn test_nth_prime_zero() {
        assert!(matches!(nth_prime(0), Err(CensusError::ZeroIndex { .. })));
    }
}
