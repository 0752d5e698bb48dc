// Probabilistic Primality Testing
// Miller-Rabin witness rounds and the Sophie-Germain compound test

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;

use crate::arith::mod_pow;

/// One Miller-Rabin round against the odd candidate `n >= 5`, where
/// `n - 1 == 2^t * q` with `q` odd.
///
/// A `false` verdict proves `n` composite. `true` only means this round's
/// witness found nothing against primality.
fn single_round<R: Rng + ?Sized>(n: &BigUint, q: &BigUint, t: u64, rng: &mut R) -> bool {
    let two = BigUint::from(2u8);
    let n_minus_one = n - 1u8;

    // Witness drawn uniformly from [2, n-2]
    let b = rng.gen_biguint_range(&two, &n_minus_one);

    // r_0 = b^q mod n, then t successive squarings: t+1 values total
    let mut roots = Vec::with_capacity(t as usize + 1);
    let mut current = mod_pow(&b, q, n);
    roots.push(current.clone());
    for _ in 0..t {
        current = (&current * &current) % n;
        roots.push(current.clone());
    }

    // If 1 never appears, b^(n-1) != 1 and n is certainly composite
    let e = match roots.iter().position(|r| r.is_one()) {
        Some(e) => e,
        None => return false,
    };

    // Pass when b^q was already 1, or the value squared into 1 was the
    // trivial root n-1. Any other predecessor is a nontrivial square root
    // of unity, proving n composite.
    e == 0 || roots[e - 1] == n_minus_one
}

/// Miller-Rabin primality test with `k` independent rounds.
///
/// Composite verdicts are certain; a "probably prime" verdict carries a
/// false-positive probability of at most `(1/4)^k`.
pub fn is_probable_prime_with<R: Rng + ?Sized>(n: &BigUint, k: u32, rng: &mut R) -> bool {
    // Easy & edge cases; 3 is handled here because the witness range
    // [2, n-2] is empty for it
    if *n == BigUint::from(2u8) || *n == BigUint::from(3u8) {
        return true;
    }
    if n.is_zero() || n.is_one() || n.is_even() {
        return false;
    }

    // Find t, q such that n - 1 == 2^t * q with q odd
    let mut q = n - 1u8;
    let mut t = 0u64;
    while q.is_even() {
        q >>= 1;
        t += 1;
    }

    // Any failing round is decisive
    (0..k).all(|_| single_round(n, &q, t, rng))
}

/// [`is_probable_prime_with`] driven by the thread-local CSPRNG.
pub fn is_probable_prime(n: &BigUint, k: u32) -> bool {
    is_probable_prime_with(n, k, &mut rand::thread_rng())
}

/// Sophie-Germain compound test: `n` passes iff both `n` and `2n + 1` pass
/// the k-round Miller-Rabin test.
pub fn is_sophie_germain_with<R: Rng + ?Sized>(n: &BigUint, k: u32, rng: &mut R) -> bool {
    is_probable_prime_with(n, k, rng) && is_probable_prime_with(&(n * 2u8 + 1u8), k, rng)
}

/// [`is_sophie_germain_with`] driven by the thread-local CSPRNG.
pub fn is_sophie_germain(n: &BigUint, k: u32) -> bool {
    is_sophie_germain_with(n, k, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sieve(limit: usize) -> Vec<bool> {
        let mut is_prime = vec![true; limit];
        is_prime[0] = false;
        is_prime[1] = false;
        let mut i = 2;
        while i * i < limit {
            if is_prime[i] {
                let mut j = i * i;
                while j < limit {
                    is_prime[j] = false;
                    j += i;
                }
            }
            i += 1;
        }
        is_prime
    }

    #[test]
    fn test_edge_cases() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(!is_probable_prime_with(&BigUint::from(0u8), 5, &mut rng));
        assert!(!is_probable_prime_with(&BigUint::from(1u8), 5, &mut rng));
        assert!(is_probable_prime_with(&BigUint::from(2u8), 5, &mut rng));
        assert!(is_probable_prime_with(&BigUint::from(3u8), 5, &mut rng));
        assert!(!is_probable_prime_with(&BigUint::from(4u8), 5, &mut rng));
        assert!(!is_probable_prime_with(&BigUint::from(1_000_000u32), 5, &mut rng));
    }

    #[test]
    fn test_matches_sieve_below_ten_thousand() {
        // Zero false negatives for every prime below 10,000; with k = 20 the
        // per-composite false-positive bound (1/4)^20 makes a disagreement
        // on this range effectively impossible
        let table = sieve(10_000);
        let mut rng = StdRng::seed_from_u64(7);
        for n in 0..10_000usize {
            assert_eq!(
                is_probable_prime_with(&BigUint::from(n), 20, &mut rng),
                table[n],
                "disagreement at {n}"
            );
        }
    }

    #[test]
    fn test_carmichael_numbers_stay_composite() {
        // Carmichael numbers fool Fermat tests; Miller-Rabin must reject
        // them across repeated trials
        let mut rng = StdRng::seed_from_u64(11);
        for n in [561u32, 1105, 1729, 2465, 2821, 6601, 8911] {
            let n = BigUint::from(n);
            for _ in 0..50 {
                assert!(!is_probable_prime_with(&n, 20, &mut rng), "{n} accepted");
            }
        }
    }

    #[test]
    fn test_large_known_prime() {
        // 2^89 - 1 is a Mersenne prime
        let m89 = (BigUint::from(1u8) << 89) - 1u8;
        let mut rng = StdRng::seed_from_u64(3);
        assert!(is_probable_prime_with(&m89, 20, &mut rng));
        // 2^67 - 1 = 193707721 * 761838257287 is not
        let m67 = (BigUint::from(1u8) << 67) - 1u8;
        assert!(!is_probable_prime_with(&m67, 20, &mut rng));
    }

    #[test]
    fn test_seeded_rng_reproduces_verdicts() {
        let run = |seed: u64| -> Vec<bool> {
            let mut rng = StdRng::seed_from_u64(seed);
            (900u32..1000)
                .map(|n| is_probable_prime_with(&BigUint::from(n), 5, &mut rng))
                .collect()
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn test_sophie_germain() {
        let mut rng = StdRng::seed_from_u64(5);
        // 2p+1 prime as well
        for sg in [2u32, 3, 5, 11, 23, 29, 41, 53, 83, 89] {
            assert!(
                is_sophie_germain_with(&BigUint::from(sg), 20, &mut rng),
                "{sg} rejected"
            );
        }
        // Prime, but 2p+1 composite (15, 27); or not prime at all (9)
        for not_sg in [7u32, 9, 13] {
            assert!(
                !is_sophie_germain_with(&BigUint::from(not_sg), 20, &mut rng),
                "{not_sg} accepted"
            );
        }
    }
}
