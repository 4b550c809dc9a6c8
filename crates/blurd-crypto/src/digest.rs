//! SHA-256 digest helpers for proof-hash binding.

use blurd_types::{BlurdError, BlurdResult};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// SHA-256 of raw bytes, hex-encoded.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// SHA-256 over a value's JSON serialization, hex-encoded.
///
/// serde_json emits struct fields in declaration order, so the digest is
/// stable for a fixed type definition.
pub fn sha256_json_hex<T: Serialize>(value: &T) -> BlurdResult<String> {
    let bytes =
        serde_json::to_vec(value).map_err(|e| BlurdError::Serialization(e.to_string()))?;
    Ok(sha256_hex(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        // sha256("") is a fixed constant
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_json_digest_stable() {
        #[derive(Serialize)]
        struct Probe {
            a: u32,
            b: &'static str,
        }
        let d1 = sha256_json_hex(&Probe { a: 1, b: "x" }).unwrap();
        let d2 = sha256_json_hex(&Probe { a: 1, b: "x" }).unwrap();
        assert_eq!(d1, d2);

        let d3 = sha256_json_hex(&Probe { a: 2, b: "x" }).unwrap();
        assert_ne!(d1, d3);
    }
}
