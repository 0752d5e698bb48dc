// RSA Primitives Library
// Probabilistic prime generation, modular-inverse key derivation, and a
// minimal encode/encrypt/decrypt pipeline

pub mod arith;
pub mod codec;
pub mod error;
pub mod keygen;
pub mod primality;
pub mod primes;

pub use codec::{decrypt, encrypt, encrypt_with};
pub use error::{Error, Result};
pub use keygen::{
    generate, generate_default, generate_with, HexKeyPair, KeyPair, PublicKey,
    DEFAULT_BIT_LENGTH, DEFAULT_PUBLIC_EXPONENT, KEYGEN_CONFIDENCE,
};
pub use primality::{
    is_probable_prime, is_probable_prime_with, is_sophie_germain, is_sophie_germain_with,
};
pub use primes::{
    next_prime, next_prime_with, next_safe_prime, next_safe_prime_with, DEFAULT_CONFIDENCE,
};
