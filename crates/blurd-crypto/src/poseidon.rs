//! Canonical Poseidon hash for Blurd.
//!
//! A single, unified Poseidon instance used for every commitment and
//! nullifier in the product. All hashing goes through these functions to
//! keep client- and verifier-side values consistent.
//!
//! ## Parameters (BN254 Scalar Field)
//! - Field: BN254 Fr (scalar field)
//! - Width: 3 (rate=2, capacity=1)
//! - Full rounds: 8
//! - Partial rounds: 57
//! - S-box: x^5
//! - Round constants: Grain LFSR (arkworks standard)
//!
//! ## Output Convention
//! All hash functions output the FIRST element of the sponge state after
//! squeezing, the standard arkworks PoseidonSponge convention.

use ark_bn254::Fr;
use ark_crypto_primitives::sponge::{
    poseidon::{find_poseidon_ark_and_mds, PoseidonConfig, PoseidonSponge},
    CryptographicSponge,
};
use ark_serialize::CanonicalSerialize;
use std::sync::OnceLock;

static CANONICAL_CONFIG: OnceLock<PoseidonConfig<Fr>> = OnceLock::new();

/// Get the canonical Poseidon configuration.
/// Thread-safe singleton initialization.
pub fn canonical_config() -> &'static PoseidonConfig<Fr> {
    CANONICAL_CONFIG.get_or_init(|| {
        let rate = 2;
        let alpha = 5u64;
        let full_rounds = 8;
        let partial_rounds = 57;
        let field_bits = 254;

        let (ark, mds) = find_poseidon_ark_and_mds::<Fr>(
            field_bits,
            rate,
            full_rounds,
            partial_rounds,
            0, // skip_matrices
        );

        PoseidonConfig {
            full_rounds: full_rounds as usize,
            partial_rounds: partial_rounds as usize,
            alpha,
            ark,
            mds,
            rate,
            capacity: 1,
        }
    })
}

/// Hash an arbitrary number of field elements.
/// Returns the first squeezed element.
pub fn poseidon_hash_fields(inputs: &[Fr]) -> Fr {
    let config = canonical_config();
    let mut sponge = PoseidonSponge::new(config);
    for input in inputs {
        sponge.absorb(input);
    }
    let output: Vec<Fr> = sponge.squeeze_field_elements(1);
    output[0]
}

/// Hash two field elements. The pairwise link of every commitment chain.
pub fn poseidon_hash2_fields(left: Fr, right: Fr) -> Fr {
    poseidon_hash_fields(&[left, right])
}

/// Hash three field elements. Used for scoped nullifiers.
pub fn poseidon_hash3_fields(a: Fr, b: Fr, c: Fr) -> Fr {
    poseidon_hash_fields(&[a, b, c])
}

/// Hash a single field element.
pub fn poseidon_hash1_field(input: Fr) -> Fr {
    poseidon_hash_fields(&[input])
}

/// Convert a field element to 32 bytes (little-endian).
pub fn fr_to_bytes(f: &Fr) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    f.serialize_compressed(&mut bytes[..])
        .expect("Fr serialization failed");
    bytes
}

/// Render a field element as a lowercase hex string.
pub fn fr_to_hex(f: &Fr) -> String {
    hex::encode(fr_to_bytes(f))
}
