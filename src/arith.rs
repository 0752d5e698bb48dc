// Modular Arithmetic
// gcd/lcm, binary modular exponentiation, and the extended Euclidean algorithm

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// Greatest common divisor.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

/// Least common multiple.
///
/// # Panics
///
/// Panics when both inputs are zero; the quotient `a*b / gcd(a, b)` is
/// undefined there.
pub fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    (a * b) / gcd(a, b)
}

/// Modular exponentiation: `base^exp mod modulus`.
///
/// Square-and-multiply, O(log exp) modular multiplications.
///
/// # Panics
///
/// Panics when `modulus` is zero.
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    assert!(!modulus.is_zero(), "modulus must be positive");
    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) such that a*x + b*y = gcd = gcd(a, b)
///
/// Iterative, so adversarially large inputs cannot overflow the stack.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut r0, mut s0, mut t0) = (a.clone(), BigInt::one(), BigInt::zero());
    let (mut r1, mut s1, mut t1) = (b.clone(), BigInt::zero(), BigInt::one());

    while !r1.is_zero() {
        let quotient = &r0 / &r1;
        let r2 = &r0 - &quotient * &r1;
        let s2 = &s0 - &quotient * &s1;
        let t2 = &t0 - &quotient * &t1;
        r0 = std::mem::replace(&mut r1, r2);
        s0 = std::mem::replace(&mut s1, s2);
        t0 = std::mem::replace(&mut t1, t2);
    }

    (r0, s0, t0)
}

/// Compute modular inverse: a^(-1) mod n
///
/// Fails with [`Error::NotInvertible`] when `gcd(a, n) != 1`; otherwise the
/// result is normalized into `[0, n)`.
pub fn mod_inverse(a: &BigUint, n: &BigUint) -> Result<BigUint> {
    let n_signed = BigInt::from(n.clone());
    let (g, x, _) = extended_gcd(&BigInt::from(a.clone()), &n_signed);

    if !g.is_one() {
        return Err(Error::NotInvertible);
    }

    // mod_floor lands in [0, n), so the magnitude is the inverse itself
    let x = x.mod_floor(&n_signed);
    Ok(x.magnitude().clone())
}
