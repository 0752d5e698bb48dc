// RSA Key Generation
// Draws candidate primes, enforces the Fermat gap, derives the exponents

use num_bigint::{BigUint, RandBigInt};
use num_integer::Roots;
use rand::Rng;

use crate::arith::{lcm, mod_inverse};
use crate::error::{Error, Result};
use crate::primes::{next_prime_with, next_safe_prime_with};

/// Miller-Rabin rounds used while searching for the key primes.
pub const KEYGEN_CONFIDENCE: u32 = 32;

/// Default modulus size in bits.
pub const DEFAULT_BIT_LENGTH: u64 = 1024;

/// Default public exponent hint, 2^16 + 1.
pub const DEFAULT_PUBLIC_EXPONENT: u64 = 65537;

/// RSA public half: the modulus and public exponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub modulus: BigUint,
    pub exponent: BigUint,
}

/// An immutable RSA key pair.
///
/// The prime factors of `modulus` are discarded at generation time; only the
/// modulus and the two exponents survive. The exponents are mutually inverse
/// modulo the Carmichael totient `lcm(p-1, q-1)` of the modulus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub modulus: BigUint,
    pub public_exponent: BigUint,
    pub private_exponent: BigUint,
}

/// Hexadecimal rendering of a [`KeyPair`], for display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexKeyPair {
    pub modulus: String,
    pub public_exponent: String,
    pub private_exponent: String,
}

impl KeyPair {
    /// The `(n, e)` half handed out for encryption.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            modulus: self.modulus.clone(),
            exponent: self.public_exponent.clone(),
        }
    }

    /// Bit length of the modulus.
    pub fn bit_length(&self) -> u64 {
        self.modulus.bits()
    }

    /// Display-only conversion with every field hex-encoded (big-endian).
    pub fn to_hex(&self) -> HexKeyPair {
        HexKeyPair {
            modulus: hex::encode(self.modulus.to_bytes_be()),
            public_exponent: hex::encode(self.public_exponent.to_bytes_be()),
            private_exponent: hex::encode(self.private_exponent.to_bytes_be()),
        }
    }
}

/// Generate an RSA key pair.
///
/// Two independent `bit_length / 2`-bit random integers are drawn and walked
/// forward to the next (safe) prime; pairs whose factors sit close enough
/// for Fermat factorization are discarded wholesale and redrawn. The public
/// exponent starts at `public_exponent_hint` and advances to the next prime
/// whenever it shares a factor with the Carmichael totient, until an inverse
/// exists; that inverse becomes the private exponent.
///
/// Safe-prime generation draws one bit narrower to compensate for the
/// `2p + 1` doubling, and is much slower; see
/// [`next_safe_prime_with`](crate::primes::next_safe_prime_with). Neither
/// search has a timeout.
pub fn generate_with<R: Rng + ?Sized>(
    bit_length: u64,
    public_exponent_hint: &BigUint,
    use_safe_primes: bool,
    rng: &mut R,
) -> Result<KeyPair> {
    if bit_length < 16 {
        return Err(Error::InvalidBitLength(bit_length));
    }

    let half_bits = bit_length / 2;
    let draw_bits = if use_safe_primes { half_bits - 1 } else { half_bits };

    let (p, q, n) = draw_prime_pair(draw_bits, use_safe_primes, rng);
    let totient = lcm(&(&p - 1u8), &(&q - 1u8));
    let (e, d) = derive_exponents(public_exponent_hint, &totient, rng);

    Ok(KeyPair {
        modulus: n,
        public_exponent: e,
        private_exponent: d,
    })
}

/// [`generate_with`] driven by the thread-local CSPRNG.
pub fn generate(bit_length: u64, public_exponent_hint: u64, use_safe_primes: bool) -> Result<KeyPair> {
    generate_with(
        bit_length,
        &BigUint::from(public_exponent_hint),
        use_safe_primes,
        &mut rand::thread_rng(),
    )
}

/// Key pair with the library defaults: 1024-bit modulus, exponent hint
/// 65537, ordinary primes.
pub fn generate_default() -> Result<KeyPair> {
    generate(DEFAULT_BIT_LENGTH, DEFAULT_PUBLIC_EXPONENT, false)
}

/// Draw prime candidates until the pair survives the Fermat guard.
fn draw_prime_pair<R: Rng + ?Sized>(
    draw_bits: u64,
    use_safe_primes: bool,
    rng: &mut R,
) -> (BigUint, BigUint, BigUint) {
    loop {
        let p = draw_prime(draw_bits, use_safe_primes, rng);
        let q = draw_prime(draw_bits, use_safe_primes, rng);
        let n = &p * &q;

        // Factors closer than 2 * n^(1/4) make n factorable by scanning
        // squares near sqrt(n); discard both and start over
        let gap = if p > q { &p - &q } else { &q - &p };
        if gap >= n.nth_root(4) * 2u8 {
            return (p, q, n);
        }
    }
}

fn draw_prime<R: Rng + ?Sized>(bits: u64, safe: bool, rng: &mut R) -> BigUint {
    let candidate = rng.gen_biguint(bits);
    if safe {
        next_safe_prime_with(&candidate, KEYGEN_CONFIDENCE, rng)
    } else {
        next_prime_with(&candidate, KEYGEN_CONFIDENCE, rng)
    }
}

/// First exponent hint coprime with the totient wins; its inverse is the
/// private exponent. Iterative, advancing the hint to the next prime on
/// every failed inversion.
fn derive_exponents<R: Rng + ?Sized>(
    hint: &BigUint,
    totient: &BigUint,
    rng: &mut R,
) -> (BigUint, BigUint) {
    let mut e = hint.clone();
    loop {
        match mod_inverse(&e, totient) {
            Ok(d) => return (e, d),
            Err(_) => e = next_prime_with(&(&e + 1u8), KEYGEN_CONFIDENCE, rng),
        }
    }
}
