// Message Codec
// Turns a string into a padded integer below the modulus and back

use num_bigint::BigUint;
use rand::Rng;

use crate::arith::mod_pow;
use crate::error::{Error, Result};
use crate::keygen::{KeyPair, PublicKey};

/// Encrypt `plaintext` under the public key `(n, e)`.
///
/// Each character contributes one byte of its code point (truncated to 8
/// bits; anything outside Latin-1 is not round-trip safe), followed by a
/// single `0x00` terminator and random filler up to one byte short of the
/// modulus capacity, so the padded integer stays strictly below `n`.
///
/// Fails with [`Error::MessageTooLarge`] when the message leaves no room
/// for the terminator. This is not a hardened padding scheme: there is no
/// integrity check and no timing resistance.
pub fn encrypt_with<R: Rng + ?Sized>(
    plaintext: &str,
    public: &PublicKey,
    rng: &mut R,
) -> Result<BigUint> {
    // floor(log2(n) / 8) bytes fit below the modulus
    let max_bytes = (public.modulus.bits().saturating_sub(1) / 8) as usize;
    let len = plaintext.chars().count();
    if len + 1 >= max_bytes {
        return Err(Error::MessageTooLarge {
            len,
            max: max_bytes.saturating_sub(2),
        });
    }

    let mut padded = Vec::with_capacity(max_bytes - 1);
    for ch in plaintext.chars() {
        padded.push(ch as u8);
    }
    padded.push(0x00);

    // Random junk after the terminator rounds the message out to
    // max_bytes - 1 bytes
    let mut filler = vec![0u8; max_bytes - len - 2];
    rng.fill(filler.as_mut_slice());
    padded.extend_from_slice(&filler);

    let m = BigUint::from_bytes_be(&padded);
    Ok(mod_pow(&m, &public.exponent, &public.modulus))
}

/// [`encrypt_with`] driven by the thread-local CSPRNG.
pub fn encrypt(plaintext: &str, public: &PublicKey) -> Result<BigUint> {
    encrypt_with(plaintext, public, &mut rand::thread_rng())
}

/// Decrypt `ciphertext` with the private exponent and recover the string.
///
/// The decrypted integer is rendered big-endian at its natural width and
/// split at the first `0x00` byte. A missing terminator means the
/// ciphertext was not produced by [`encrypt_with`] under this key; the
/// whole byte sequence is then mapped back best-effort instead of failing,
/// so the result may be garbage.
pub fn decrypt(ciphertext: &BigUint, keypair: &KeyPair) -> String {
    let m = mod_pow(ciphertext, &keypair.private_exponent, &keypair.modulus);
    let bytes = m.to_bytes_be();

    let message = match bytes.iter().position(|&b| b == 0x00) {
        Some(end) => &bytes[..end],
        None => &bytes[..],
    };

    message.iter().map(|&b| char::from(b)).collect()
}
