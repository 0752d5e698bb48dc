// Prime Search
// Linear scans to the next probable prime and the next safe prime

use num_bigint::BigUint;
use rand::Rng;

use crate::primality::{is_probable_prime_with, is_sophie_germain_with};

/// Default Miller-Rabin confidence for the search loops.
///
/// The false-positive bound (1/4)^20 is about 9.1e-13, roughly one error in
/// a trillion searches.
pub const DEFAULT_CONFIDENCE: u32 = 20;

/// Smallest probable prime `p >= n`, found by linear scan.
///
/// The scan has no timeout and its wall-clock time grows with the prime gap
/// around `n`.
pub fn next_prime_with<R: Rng + ?Sized>(n: &BigUint, k: u32, rng: &mut R) -> BigUint {
    let mut p = n.clone();
    while !is_probable_prime_with(&p, k, rng) {
        p += 1u8;
    }
    p
}

/// [`next_prime_with`] at [`DEFAULT_CONFIDENCE`], driven by the thread-local
/// CSPRNG.
pub fn next_prime(n: &BigUint) -> BigUint {
    next_prime_with(n, DEFAULT_CONFIDENCE, &mut rand::thread_rng())
}

/// Safe prime `2p + 1` for the smallest Sophie-Germain prime `p >= n`.
///
/// Sophie-Germain primes are far sparser than primes, so this scan is
/// substantially slower than [`next_prime_with`] for the same starting
/// point; callers requesting safe primes accept proportionally higher
/// latency. No timeout here either.
pub fn next_safe_prime_with<R: Rng + ?Sized>(n: &BigUint, k: u32, rng: &mut R) -> BigUint {
    let mut p = n.clone();
    while !is_sophie_germain_with(&p, k, rng) {
        p += 1u8;
    }
    p * 2u8 + 1u8
}

/// [`next_safe_prime_with`] at [`DEFAULT_CONFIDENCE`], driven by the
/// thread-local CSPRNG.
pub fn next_safe_prime(n: &BigUint) -> BigUint {
    next_safe_prime_with(n, DEFAULT_CONFIDENCE, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primality::is_probable_prime;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_next_prime_known_values() {
        assert_eq!(next_prime(&big(10)), big(11));
        assert_eq!(next_prime(&big(14)), big(17));
        assert_eq!(next_prime(&big(0)), big(2));
        // A prime is its own next prime
        assert_eq!(next_prime(&big(7)), big(7));
        assert_eq!(next_prime(&big(90)), big(97));
    }

    #[test]
    fn test_next_prime_above_power_of_two() {
        let mut rng = StdRng::seed_from_u64(17);
        let p = next_prime_with(&(big(1) << 64u8), DEFAULT_CONFIDENCE, &mut rng);
        // 2^64 + 13 is the first prime past 2^64
        assert_eq!(p, (big(1) << 64u8) + big(13));
    }

    #[test]
    fn test_next_safe_prime_known_values() {
        // Smallest Sophie-Germain prime >= 2 is 2, giving safe prime 5
        assert_eq!(next_safe_prime(&big(2)), big(5));
        assert_eq!(next_safe_prime(&big(3)), big(7));
        // 6..10 are all rejected (7 is prime but 15 is not); 11 gives 23
        assert_eq!(next_safe_prime(&big(6)), big(23));
    }

    #[test]
    fn test_next_safe_prime_halves_are_both_prime() {
        let mut rng = StdRng::seed_from_u64(23);
        let v = next_safe_prime_with(&big(1000), DEFAULT_CONFIDENCE, &mut rng);
        let half = (&v - 1u8) / 2u8;
        assert!(is_probable_prime(&v, DEFAULT_CONFIDENCE));
        assert!(is_probable_prime(&half, DEFAULT_CONFIDENCE));
        assert!(half >= big(1000));
    }
}
