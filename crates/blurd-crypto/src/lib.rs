#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! Cryptographic primitives for Blurd: canonical Poseidon hashing over
//! BN254, the payment commitment scheme, and digest helpers.

pub mod commitment;
pub mod digest;
pub mod field;
pub mod poseidon;

pub use commitment::*;
pub use digest::*;
pub use field::*;
pub use poseidon::*;

/// Fill an N-byte array from the OS RNG.
pub fn random_bytes<const N: usize>() -> [u8; N] {
    use rand::RngCore;
    let mut bytes = [0u8; N];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

/// A fresh payment nonce: a random u128 as a decimal string.
pub fn random_nonce() -> String {
    let bytes = random_bytes::<16>();
    u128::from_le_bytes(bytes).to_string()
}

/// Constant-time byte-slice equality.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
