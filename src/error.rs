// Error Types
// Crate-wide error taxonomy for key generation and the message codec

use thiserror::Error;

/// Errors surfaced by key generation and the message codec.
///
/// A probabilistic "prime" verdict that is actually wrong is not an error
/// condition; its likelihood is bounded by `(1/4)^k` for the confidence
/// parameter `k` of the call that produced it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// `gcd(a, n) != 1`, so `a` has no inverse modulo `n`.
    #[error("no modular inverse: argument is not coprime with the modulus")]
    NotInvertible,

    /// Plaintext cannot be padded below the modulus.
    #[error("plaintext too large: {len} characters, at most {max} fit this modulus")]
    MessageTooLarge { len: usize, max: usize },

    /// Requested modulus size cannot support two prime factors.
    #[error("bit length {0} is too small for an RSA modulus (minimum 16)")]
    InvalidBitLength(u64),
}

/// Result type for fallible crate operations
pub type Result<T> = std::result::Result<T, Error>;
