//! Conversions from product inputs to BN254 scalar-field elements.
//!
//! Addresses and free text map through `from_le_bytes_mod_order`; numeric
//! strings must parse as u128 and fail loudly otherwise, so a caller can
//! never silently commit to a truncated amount or nonce.

use ark_bn254::Fr;
use ark_ff::PrimeField;
use blurd_types::{Address, BlurdError, BlurdResult};

/// Map a 20-byte address into the field.
///
/// Little-endian bytes mod field order. 20-byte values are always below
/// the BN254 modulus, so the mapping is injective over addresses.
pub fn address_to_fr(addr: &Address) -> Fr {
    Fr::from_le_bytes_mod_order(addr.as_bytes())
}

/// Parse a decimal integer string into the field.
///
/// The value must be a non-negative integer no wider than u128; anything
/// else is not representable and is rejected.
pub fn uint_to_fr(s: &str) -> BlurdResult<Fr> {
    let value: u128 = s
        .trim()
        .parse()
        .map_err(|_| BlurdError::FieldConversion(format!("Not a representable integer: {s:?}")))?;
    Ok(Fr::from(value))
}

/// Map arbitrary text (e.g. a document number) into the field.
///
/// Bytes interpreted little-endian mod field order; inputs longer than
/// 32 bytes wrap mod the order.
pub fn text_to_fr(s: &str) -> Fr {
    Fr::from_le_bytes_mod_order(s.as_bytes())
}
