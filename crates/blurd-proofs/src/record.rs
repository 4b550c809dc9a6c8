use blurd_crypto::sha256_json_hex;
use blurd_types::BlurdResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The snarkjs-compatible Groth16 proof JSON shape.
///
/// Coordinates are decimal field-element strings. The placeholder engine
/// fills them with `"0"`; the shape is the wire contract, not evidence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Groth16ProofData {
    /// G1 point, projective coordinates.
    pub pi_a: [String; 3],
    /// G2 point, three coordinate pairs.
    pub pi_b: [[String; 2]; 3],
    /// G1 point, projective coordinates.
    pub pi_c: [String; 3],
    /// Always `"groth16"`.
    pub protocol: String,
    /// Always `"bn128"`.
    pub curve: String,
}

impl Groth16ProofData {
    /// The zero-filled placeholder proof body.
    pub fn placeholder() -> Self {
        let zero = || "0".to_string();
        Self {
            pi_a: [zero(), zero(), zero()],
            pi_b: [
                [zero(), zero()],
                [zero(), zero()],
                [zero(), zero()],
            ],
            pi_c: [zero(), zero(), zero()],
            protocol: "groth16".to_string(),
            curve: "bn128".to_string(),
        }
    }
}

/// The circuits the product issues proofs for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitType {
    /// Holder is at least a required age.
    AgeVerification,
    /// Holder's document was issued by an allowed country.
    CountryVerification,
    /// Holder has not already proven within a scope.
    Uniqueness,
    /// A payment commitment matches a required amount.
    PrivatePayment,
}

impl CircuitType {
    /// Stable string form used in wire records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AgeVerification => "age_verification",
            Self::CountryVerification => "country_verification",
            Self::Uniqueness => "uniqueness",
            Self::PrivatePayment => "private_payment",
        }
    }

    /// Number of public signals a proof of this circuit carries.
    pub fn signal_count(&self) -> usize {
        match self {
            Self::AgeVerification => 3,
            Self::CountryVerification => 3,
            Self::Uniqueness => 2,
            Self::PrivatePayment => 2,
        }
    }
}

impl fmt::Display for CircuitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored proof record (the `proof.json` shape).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofRecord {
    /// The Groth16-shaped proof body.
    pub proof: Groth16ProofData,
    /// Public signals, decimal or hex field strings.
    pub public_signals: Vec<String>,
    /// SHA-256 binding over proof body and public signals.
    pub proof_hash: String,
    /// Which circuit the proof belongs to.
    pub circuit_type: CircuitType,
    /// When the proof was generated.
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Digest binding a proof body to its public signals.
///
/// SHA-256 over the JSON serialization of the pair; the same computation
/// runs at generation and verification time.
pub fn binding_hash(proof: &Groth16ProofData, public_signals: &[String]) -> BlurdResult<String> {
    sha256_json_hex(&(proof, public_signals))
}
