//! The proof-engine seam.
//!
//! [`ProofEngine`] is the contract both the placeholder and any future
//! real prover satisfy. [`PlaceholderEngine`] derives deterministic
//! public signals from the request, emits a zero-filled Groth16-shaped
//! proof body, and binds the two with a SHA-256 hash. It provides no
//! zero-knowledge soundness.

use crate::record::{binding_hash, Groth16ProofData, ProofRecord};
use crate::request::ProofRequest;
use blurd_crypto::{
    constant_time_eq, fr_to_hex, generate_commitment, identity_commitment, poseidon_hash1_field,
    scoped_nullifier, text_to_fr,
};
use blurd_types::{BlurdError, BlurdResult};
use chrono::{Datelike, NaiveDate, Utc};

/// Interface every proof system implementation satisfies.
pub trait ProofEngine {
    /// Produce a proof record for a request.
    fn prove(&self, request: &ProofRequest) -> BlurdResult<ProofRecord>;

    /// Check a record's internal consistency.
    fn verify(&self, record: &ProofRecord) -> BlurdResult<bool>;
}

/// Transparent placeholder engine: real public signals, zero-filled
/// proof coordinates.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderEngine;

/// Whole years elapsed from `dob` to `today`.
fn age_in_years(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Commitment over an allowed-country policy: Poseidon of the sorted,
/// uppercased code list. Order-insensitive so wallet and merchant derive
/// the same value from the same policy.
pub fn policy_commitment(allowed: &[String]) -> String {
    let mut codes: Vec<String> = allowed.iter().map(|c| c.to_uppercase()).collect();
    codes.sort();
    codes.dedup();
    let joined = codes.join(",");
    fr_to_hex(&poseidon_hash1_field(text_to_fr(&joined)))
}

fn bool_signal(value: bool) -> String {
    let s = if value { "1" } else { "0" };
    s.to_string()
}

impl PlaceholderEngine {
    fn public_signals(&self, request: &ProofRequest) -> BlurdResult<Vec<String>> {
        match request {
            ProofRequest::Age(req) => {
                let dob = NaiveDate::parse_from_str(&req.dob, "%Y-%m-%d")
                    .map_err(|e| BlurdError::Proof(format!("Invalid date of birth: {e}")))?;
                let today = Utc::now().date_naive();
                let age = age_in_years(dob, today);
                let satisfied = age >= 0 && age as u32 >= req.min_age as u32;
                Ok(vec![
                    bool_signal(satisfied),
                    req.min_age.to_string(),
                    identity_commitment(&req.document_number, &req.holder),
                ])
            }
            ProofRequest::Country(req) => {
                if req.allowed.is_empty() {
                    return Err(BlurdError::Proof("Empty allowed-country set".into()));
                }
                let code = req.country_code.to_uppercase();
                let satisfied = req.allowed.iter().any(|c| c.to_uppercase() == code);
                Ok(vec![
                    bool_signal(satisfied),
                    policy_commitment(&req.allowed),
                    identity_commitment(&req.document_number, &req.holder),
                ])
            }
            ProofRequest::Uniqueness(req) => {
                let commitment = identity_commitment(&req.document_number, &req.holder);
                let nullifier = scoped_nullifier(&req.secret, &commitment, &req.scope);
                let scope_commitment = fr_to_hex(&poseidon_hash1_field(text_to_fr(&req.scope)));
                Ok(vec![nullifier, scope_commitment])
            }
            ProofRequest::Payment(req) => {
                let commitment =
                    generate_commitment(&req.sender, &req.recipient, &req.amount, &req.nonce)?;
                Ok(vec![commitment, req.amount.clone()])
            }
        }
    }
}

impl ProofEngine for PlaceholderEngine {
    fn prove(&self, request: &ProofRequest) -> BlurdResult<ProofRecord> {
        let public_signals = self.public_signals(request)?;
        let proof = Groth16ProofData::placeholder();
        let proof_hash = binding_hash(&proof, &public_signals)?;

        Ok(ProofRecord {
            proof,
            public_signals,
            proof_hash,
            circuit_type: request.circuit_type(),
            generated_at: Utc::now(),
        })
    }

    fn verify(&self, record: &ProofRecord) -> BlurdResult<bool> {
        if record.proof.protocol != "groth16" {
            return Ok(false);
        }
        if record.public_signals.len() != record.circuit_type.signal_count() {
            return Ok(false);
        }

        let expected = binding_hash(&record.proof, &record.public_signals)?;
        Ok(constant_time_eq(
            expected.as_bytes(),
            record.proof_hash.as_bytes(),
        ))
    }
}
