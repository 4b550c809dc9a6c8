//! Payment commitment scheme.
//!
//! A commitment binds (sender, recipient, amount, nonce) through a chained
//! pairwise Poseidon hash:
//!
//! ```text
//! h1         = H(sender, recipient)
//! h2         = H(h1, amount)
//! commitment = H(h2, nonce)
//! ```
//!
//! The commitment is stored on-chain in place of the plaintext payment
//! details; verification recomputes the chain and compares for equality.

use crate::field::{address_to_fr, text_to_fr, uint_to_fr};
use crate::poseidon::{fr_to_bytes, fr_to_hex, poseidon_hash2_fields};
use crate::constant_time_eq;
use blurd_types::{Address, BlurdResult, PaymentRecord};

/// Compute the payment commitment over the four inputs.
///
/// `amount` and `nonce` are decimal integer strings; an error is returned
/// if either is not representable as an integer.
pub fn generate_commitment(
    sender: &Address,
    recipient: &Address,
    amount: &str,
    nonce: &str,
) -> BlurdResult<String> {
    let sender_fr = address_to_fr(sender);
    let recipient_fr = address_to_fr(recipient);
    let amount_fr = uint_to_fr(amount)?;
    let nonce_fr = uint_to_fr(nonce)?;

    let h1 = poseidon_hash2_fields(sender_fr, recipient_fr);
    let h2 = poseidon_hash2_fields(h1, amount_fr);
    let commitment = poseidon_hash2_fields(h2, nonce_fr);

    Ok(fr_to_hex(&commitment))
}

/// Recompute a record's commitment and compare against the stored value.
///
/// Returns `Ok(false)` when the stored commitment does not decode or does
/// not match; a mismatch signals tampering. Errors only when the record's
/// own inputs are not representable.
pub fn verify_commitment(record: &PaymentRecord) -> BlurdResult<bool> {
    let sender_fr = address_to_fr(&record.sender);
    let recipient_fr = address_to_fr(&record.recipient);
    let amount_fr = uint_to_fr(&record.amount)?;
    let nonce_fr = uint_to_fr(&record.nonce)?;

    let h1 = poseidon_hash2_fields(sender_fr, recipient_fr);
    let h2 = poseidon_hash2_fields(h1, amount_fr);
    let expected = fr_to_bytes(&poseidon_hash2_fields(h2, nonce_fr));

    let stored = match hex::decode(&record.commitment) {
        Ok(bytes) => bytes,
        Err(_) => return Ok(false),
    };

    Ok(constant_time_eq(&expected, &stored))
}

/// Commitment binding a document number to its holder's address.
pub fn identity_commitment(document_number: &str, holder: &Address) -> String {
    let h = poseidon_hash2_fields(text_to_fr(document_number), address_to_fr(holder));
    fr_to_hex(&h)
}

/// Scoped nullifier: H(secret, identity_commitment, scope).
///
/// Two proofs from the same credential share a nullifier only within the
/// same scope, which is what makes uniqueness checks possible without
/// linking scopes to each other.
pub fn scoped_nullifier(secret: &[u8; 32], identity_commitment_hex: &str, scope: &str) -> String {
    use ark_ff::PrimeField;
    let secret_fr = ark_bn254::Fr::from_le_bytes_mod_order(secret);
    let commitment_fr = text_to_fr(identity_commitment_hex);
    let scope_fr = text_to_fr(scope);
    let h = crate::poseidon::poseidon_hash3_fields(secret_fr, commitment_fr, scope_fr);
    fr_to_hex(&h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_addresses() -> (Address, Address) {
        (
            Address::from_hex("0x1234567890abcdef1234567890abcdef12345678").unwrap(),
            Address::from_hex("0xabcdef1234567890abcdef1234567890abcdef12").unwrap(),
        )
    }

    #[test]
    fn test_commitment_deterministic() {
        let (sender, recipient) = sample_addresses();
        let c1 =
            generate_commitment(&sender, &recipient, "1000000000000000000", "123456789").unwrap();
        let c2 =
            generate_commitment(&sender, &recipient, "1000000000000000000", "123456789").unwrap();
        assert_eq!(c1, c2);
        assert_eq!(c1.len(), 64);
    }

    #[test]
    fn test_commitment_sensitive_to_each_input() {
        let (sender, recipient) = sample_addresses();
        let base =
            generate_commitment(&sender, &recipient, "1000000000000000000", "123456789").unwrap();

        let other_sender =
            Address::from_hex("0x0000000000000000000000000000000000000001").unwrap();
        assert_ne!(
            base,
            generate_commitment(&other_sender, &recipient, "1000000000000000000", "123456789")
                .unwrap()
        );
        assert_ne!(
            base,
            generate_commitment(&sender, &other_sender, "1000000000000000000", "123456789")
                .unwrap()
        );
        assert_ne!(
            base,
            generate_commitment(&sender, &recipient, "2000000000000000000", "123456789").unwrap()
        );
        assert_ne!(
            base,
            generate_commitment(&sender, &recipient, "1000000000000000000", "123456790").unwrap()
        );
    }

    #[test]
    fn test_commitment_rejects_unrepresentable_amount() {
        let (sender, recipient) = sample_addresses();
        assert!(generate_commitment(&sender, &recipient, "1.5", "1").is_err());
        assert!(generate_commitment(
            &sender,
            &recipient,
            "340282366920938463463374607431768211456",
            "1"
        )
        .is_err());
    }

    #[test]
    fn test_verify_roundtrip() {
        let (sender, recipient) = sample_addresses();
        let commitment =
            generate_commitment(&sender, &recipient, "1000000000000000000", "123456789").unwrap();

        let mut record = PaymentRecord {
            sender,
            recipient,
            amount: "1000000000000000000".into(),
            nonce: "123456789".into(),
            commitment,
            timestamp: chrono::Utc::now(),
        };
        assert!(verify_commitment(&record).unwrap());

        // Tampered amount no longer matches
        record.amount = "2000000000000000000".into();
        assert!(!verify_commitment(&record).unwrap());
    }

    #[test]
    fn test_verify_garbage_commitment_is_false() {
        let (sender, recipient) = sample_addresses();
        let record = PaymentRecord {
            sender,
            recipient,
            amount: "1".into(),
            nonce: "2".into(),
            commitment: "not hex".into(),
            timestamp: chrono::Utc::now(),
        };
        assert!(!verify_commitment(&record).unwrap());
    }

    #[test]
    fn test_identity_commitment_binds_both_inputs() {
        let (holder, other) = sample_addresses();
        let c = identity_commitment("A1234567", &holder);
        assert_ne!(c, identity_commitment("A1234568", &holder));
        assert_ne!(c, identity_commitment("A1234567", &other));
    }

    #[test]
    fn test_scoped_nullifier_separates_scopes() {
        let secret = [0x11u8; 32];
        let commitment = identity_commitment("A1234567", &sample_addresses().0);
        let n1 = scoped_nullifier(&secret, &commitment, "merchant-a");
        let n2 = scoped_nullifier(&secret, &commitment, "merchant-b");
        assert_ne!(n1, n2);
        assert_eq!(n1, scoped_nullifier(&secret, &commitment, "merchant-a"));
    }

    proptest! {
        #[test]
        fn prop_commitment_deterministic(amount in any::<u128>(), nonce in any::<u128>()) {
            let (sender, recipient) = sample_addresses();
            let a = amount.to_string();
            let n = nonce.to_string();
            let c1 = generate_commitment(&sender, &recipient, &a, &n).unwrap();
            let c2 = generate_commitment(&sender, &recipient, &a, &n).unwrap();
            prop_assert_eq!(c1, c2);
        }

        #[test]
        fn prop_verify_accepts_generated(amount in any::<u128>(), nonce in any::<u128>()) {
            let (sender, recipient) = sample_addresses();
            let a = amount.to_string();
            let n = nonce.to_string();
            let record = PaymentRecord {
                sender,
                recipient,
                amount: a.clone(),
                nonce: n.clone(),
                commitment: generate_commitment(&sender, &recipient, &a, &n).unwrap(),
                timestamp: chrono::Utc::now(),
            };
            prop_assert!(verify_commitment(&record).unwrap());
        }
    }
}
