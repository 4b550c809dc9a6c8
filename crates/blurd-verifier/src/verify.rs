//! Local re-verification: everything a merchant can check without the
//! backend. A proof record is checked for internal consistency (binding
//! hash, signal shape) and against the merchant's own policy inputs;
//! payment records are checked by recomputing the commitment chain.

use blurd_crypto::verify_commitment;
use blurd_proofs::{policy_commitment, CircuitType, PlaceholderEngine, ProofEngine, ProofRecord};
use blurd_types::{BlurdResult, PaymentRecord};

/// Check a record's binding hash and signal shape.
pub fn verify_proof_record(record: &ProofRecord) -> BlurdResult<bool> {
    PlaceholderEngine.verify(record)
}

/// Verify an age proof against the merchant's required minimum age.
pub fn verify_age_proof(record: &ProofRecord, min_age: u8) -> BlurdResult<bool> {
    if record.circuit_type != CircuitType::AgeVerification {
        return Ok(false);
    }
    if !verify_proof_record(record)? {
        return Ok(false);
    }
    Ok(record.public_signals[0] == "1" && record.public_signals[1] == min_age.to_string())
}

/// Verify a country proof against the merchant's allowed-country policy.
///
/// The policy commitment in the record must match the one recomputed
/// from the merchant's own list; otherwise the proof was generated
/// against a different policy.
pub fn verify_country_proof(record: &ProofRecord, allowed: &[String]) -> BlurdResult<bool> {
    if record.circuit_type != CircuitType::CountryVerification {
        return Ok(false);
    }
    if !verify_proof_record(record)? {
        return Ok(false);
    }
    Ok(record.public_signals[0] == "1"
        && record.public_signals[1] == policy_commitment(allowed))
}

/// Verify a payment proof against the merchant's required amount.
pub fn verify_payment_proof(record: &ProofRecord, required_amount: &str) -> BlurdResult<bool> {
    if record.circuit_type != CircuitType::PrivatePayment {
        return Ok(false);
    }
    if !verify_proof_record(record)? {
        return Ok(false);
    }
    Ok(record.public_signals[1] == required_amount)
}

/// Recompute a payment record's commitment chain and compare.
pub fn verify_payment_record(record: &PaymentRecord) -> BlurdResult<bool> {
    verify_commitment(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blurd_proofs::{
        AgeProofRequest, CountryProofRequest, PaymentProofRequest, ProofRequest,
    };
    use blurd_types::Address;

    fn holder() -> Address {
        Address::from_hex("0x1234567890abcdef1234567890abcdef12345678").unwrap()
    }

    fn age_record(min_age: u8) -> ProofRecord {
        PlaceholderEngine
            .prove(&ProofRequest::Age(AgeProofRequest {
                dob: "1990-01-01".into(),
                min_age,
                document_number: "A1234567".into(),
                holder: holder(),
            }))
            .unwrap()
    }

    #[test]
    fn test_age_proof_accepted() {
        let record = age_record(18);
        assert!(verify_age_proof(&record, 18).unwrap());
    }

    #[test]
    fn test_age_proof_wrong_threshold_rejected() {
        // A proof for 18+ does not satisfy a 21+ policy
        let record = age_record(18);
        assert!(!verify_age_proof(&record, 21).unwrap());
    }

    #[test]
    fn test_age_proof_tampered_rejected() {
        let mut record = age_record(18);
        record.public_signals[1] = "21".into();
        assert!(!verify_age_proof(&record, 21).unwrap());
    }

    #[test]
    fn test_wrong_circuit_rejected() {
        let record = age_record(18);
        assert!(!verify_payment_proof(&record, "100").unwrap());
        assert!(!verify_country_proof(&record, &["NG".into()]).unwrap());
    }

    #[test]
    fn test_country_proof_policy_must_match() {
        let allowed = vec!["NG".to_string(), "GH".to_string()];
        let record = PlaceholderEngine
            .prove(&ProofRequest::Country(CountryProofRequest {
                country_code: "NG".into(),
                allowed: allowed.clone(),
                document_number: "A1234567".into(),
                holder: holder(),
            }))
            .unwrap();

        assert!(verify_country_proof(&record, &allowed).unwrap());
        // Same proof against a different policy list fails
        assert!(!verify_country_proof(&record, &["NG".to_string()]).unwrap());
        // Policy list order does not matter
        let reordered = vec!["GH".to_string(), "NG".to_string()];
        assert!(verify_country_proof(&record, &reordered).unwrap());
    }

    #[test]
    fn test_payment_proof_amount_must_match() {
        let record = PlaceholderEngine
            .prove(&ProofRequest::Payment(PaymentProofRequest {
                sender: holder(),
                recipient: Address::from_hex("0xabcdef1234567890abcdef1234567890abcdef12")
                    .unwrap(),
                amount: "1000000000000000000".into(),
                nonce: "123456789".into(),
            }))
            .unwrap();

        assert!(verify_payment_proof(&record, "1000000000000000000").unwrap());
        assert!(!verify_payment_proof(&record, "2000000000000000000").unwrap());
    }
}
