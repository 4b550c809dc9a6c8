use crate::storage::KeyValueStore;
use crate::store::{
    RecordStore, CREDENTIALS_KEY, PAYMENTS_KEY, PAYMENT_PROOFS_KEY, PROOFS_KEY,
};
use blurd_crypto::{generate_commitment, identity_commitment, random_nonce};
use blurd_extract::extract_fields;
use blurd_proofs::{
    AgeProofRequest, CountryProofRequest, PaymentProofRequest, PlaceholderEngine, ProofEngine,
    ProofRecord, ProofRequest, UniquenessProofRequest,
};
use blurd_types::{
    Address, BlurdError, BlurdResult, CredentialId, CredentialRecord, PaymentReceipt,
    PaymentRecord,
};
use tracing::{debug, info};

/// The wallet core: credential registration, proof generation, and the
/// private-payment flow, all persisted through the storage port.
pub struct Wallet<S: KeyValueStore, E: ProofEngine = PlaceholderEngine> {
    store: S,
    engine: E,
}

impl<S: KeyValueStore> Wallet<S> {
    /// Wallet over a store with the placeholder proof engine.
    pub fn new(store: S) -> Self {
        Self {
            store,
            engine: PlaceholderEngine,
        }
    }
}

impl<S: KeyValueStore, E: ProofEngine> Wallet<S, E> {
    /// Wallet over a store with an explicit proof engine.
    pub fn with_engine(store: S, engine: E) -> Self {
        Self { store, engine }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn credentials_store(&self) -> RecordStore<'_, S, CredentialRecord> {
        RecordStore::new(&self.store, CREDENTIALS_KEY)
    }

    fn proofs_store(&self) -> RecordStore<'_, S, ProofRecord> {
        RecordStore::new(&self.store, PROOFS_KEY)
    }

    fn payments_store(&self) -> RecordStore<'_, S, PaymentRecord> {
        RecordStore::new(&self.store, PAYMENTS_KEY)
    }

    fn receipts_store(&self) -> RecordStore<'_, S, PaymentReceipt> {
        RecordStore::new(&self.store, PAYMENT_PROOFS_KEY)
    }

    /// Extract fields from document OCR text and register a credential
    /// for the holder.
    ///
    /// The document number is the anchor of the identity commitment, so
    /// registration fails when extraction could not find one.
    pub fn register_credential(
        &self,
        holder: Address,
        ocr_text: &str,
    ) -> BlurdResult<CredentialRecord> {
        let fields = extract_fields(ocr_text);

        let document_number = fields.document_number.clone().ok_or_else(|| {
            BlurdError::Credential("No document number could be extracted".into())
        })?;

        let record = CredentialRecord {
            id: CredentialId::new(),
            holder,
            identity_commitment: identity_commitment(&document_number, &holder),
            fields,
            created_at: chrono::Utc::now(),
        };

        self.credentials_store().append(record.clone())?;
        info!(credential = %record.id, holder = %holder, "Registered credential");
        Ok(record)
    }

    /// All registered credentials.
    pub fn credentials(&self) -> BlurdResult<Vec<CredentialRecord>> {
        self.credentials_store().load()
    }

    /// The most recently registered credential for a holder.
    pub fn credential_for(&self, holder: &Address) -> BlurdResult<CredentialRecord> {
        self.credentials()?
            .into_iter()
            .rev()
            .find(|c| &c.holder == holder)
            .ok_or_else(|| BlurdError::Credential("No credential registered".into()))
    }

    fn run_proof(&self, request: ProofRequest) -> BlurdResult<ProofRecord> {
        let record = self.engine.prove(&request)?;
        self.proofs_store().append(record.clone())?;
        debug!(circuit = %record.circuit_type, hash = %record.proof_hash, "Stored proof");
        Ok(record)
    }

    /// Prove the holder is at least `min_age` years old.
    pub fn prove_age(&self, holder: &Address, min_age: u8) -> BlurdResult<ProofRecord> {
        let credential = self.credential_for(holder)?;
        let dob = credential
            .fields
            .dob
            .ok_or_else(|| BlurdError::Credential("Credential has no date of birth".into()))?;
        let document_number = credential
            .fields
            .document_number
            .ok_or_else(|| BlurdError::Credential("Credential has no document number".into()))?;

        self.run_proof(ProofRequest::Age(AgeProofRequest {
            dob,
            min_age,
            document_number,
            holder: *holder,
        }))
    }

    /// Prove the holder's document was issued by one of `allowed`.
    pub fn prove_country(
        &self,
        holder: &Address,
        allowed: Vec<String>,
    ) -> BlurdResult<ProofRecord> {
        let credential = self.credential_for(holder)?;
        let country_code = credential
            .fields
            .country_code
            .ok_or_else(|| BlurdError::Credential("Credential has no country".into()))?;
        let document_number = credential
            .fields
            .document_number
            .ok_or_else(|| BlurdError::Credential("Credential has no document number".into()))?;

        self.run_proof(ProofRequest::Country(CountryProofRequest {
            country_code,
            allowed,
            document_number,
            holder: *holder,
        }))
    }

    /// Prove per-scope uniqueness with the holder's identity secret.
    pub fn prove_uniqueness(
        &self,
        holder: &Address,
        scope: &str,
        secret: [u8; 32],
    ) -> BlurdResult<ProofRecord> {
        let credential = self.credential_for(holder)?;
        let document_number = credential
            .fields
            .document_number
            .ok_or_else(|| BlurdError::Credential("Credential has no document number".into()))?;

        self.run_proof(ProofRequest::Uniqueness(UniquenessProofRequest {
            secret,
            scope: scope.to_string(),
            document_number,
            holder: *holder,
        }))
    }

    /// Send a private payment: commit to (sender, recipient, amount,
    /// nonce), persist the payment record, and store the matching
    /// payment proof.
    pub fn send_private_payment(
        &self,
        sender: Address,
        recipient: Address,
        amount: &str,
    ) -> BlurdResult<PaymentRecord> {
        let nonce = random_nonce();
        let commitment = generate_commitment(&sender, &recipient, amount, &nonce)?;

        let record = PaymentRecord {
            sender,
            recipient,
            amount: amount.to_string(),
            nonce: nonce.clone(),
            commitment: commitment.clone(),
            timestamp: chrono::Utc::now(),
        };
        self.payments_store().append(record.clone())?;

        self.run_proof(ProofRequest::Payment(PaymentProofRequest {
            sender,
            recipient,
            amount: amount.to_string(),
            nonce,
        }))?;

        info!(commitment = %commitment, "Sent private payment");
        Ok(record)
    }

    /// All stored payment records.
    pub fn payments(&self) -> BlurdResult<Vec<PaymentRecord>> {
        self.payments_store().load()
    }

    /// All stored proof records.
    pub fn proofs(&self) -> BlurdResult<Vec<ProofRecord>> {
        self.proofs_store().load()
    }

    /// All exported payment receipts.
    pub fn receipts(&self) -> BlurdResult<Vec<PaymentReceipt>> {
        self.receipts_store().load()
    }

    /// Recompute a stored payment's commitment and compare.
    pub fn verify_payment(&self, commitment: &str) -> BlurdResult<bool> {
        let record = self
            .payments()?
            .into_iter()
            .find(|p| p.commitment == commitment)
            .ok_or_else(|| BlurdError::Payment("Unknown payment commitment".into()))?;
        blurd_crypto::verify_commitment(&record)
    }

    /// Export the privacy-preserving receipt for a payment.
    ///
    /// The receipt carries the required amount, the stored payment
    /// proof's binding hash, and the caller-supplied wallet signature.
    /// It never carries an address, transaction hash, or timestamp.
    pub fn export_receipt(
        &self,
        commitment: &str,
        signature: Option<String>,
    ) -> BlurdResult<PaymentReceipt> {
        let payment = self
            .payments()?
            .into_iter()
            .find(|p| p.commitment == commitment)
            .ok_or_else(|| BlurdError::Payment("Unknown payment commitment".into()))?;

        let proof = self
            .proofs()?
            .into_iter()
            .find(|p| p.public_signals.first().map(String::as_str) == Some(commitment))
            .ok_or_else(|| BlurdError::Payment("No proof stored for payment".into()))?;

        let receipt = PaymentReceipt {
            required_amount: payment.amount,
            proof_hash: proof.proof_hash,
            signature: signature.unwrap_or_default(),
        };
        self.receipts_store().append(receipt.clone())?;
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use blurd_proofs::CircuitType;

    const OCR_TEXT: &str = "FEDERAL REPUBLIC OF NIGERIA\nNATIONAL IDENTITY CARD\n\
                            NIN: 12345678901\nDOB: 31/12/1999";

    fn holder() -> Address {
        Address::from_hex("0x1234567890abcdef1234567890abcdef12345678").unwrap()
    }

    fn recipient() -> Address {
        Address::from_hex("0xabcdef1234567890abcdef1234567890abcdef12").unwrap()
    }

    #[test]
    fn test_register_credential() {
        let wallet = Wallet::new(MemoryStore::new());
        let record = wallet.register_credential(holder(), OCR_TEXT).unwrap();

        assert_eq!(record.fields.document_number.as_deref(), Some("12345678901"));
        assert_eq!(record.fields.dob.as_deref(), Some("1999-12-31"));
        assert_eq!(record.fields.country_code.as_deref(), Some("NG"));
        assert_eq!(record.identity_commitment.len(), 64);

        let stored = wallet.credentials().unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn test_register_without_document_number_fails() {
        let wallet = Wallet::new(MemoryStore::new());
        let err = wallet
            .register_credential(holder(), "just some words")
            .unwrap_err();
        assert!(matches!(err, BlurdError::Credential(_)));
    }

    #[test]
    fn test_prove_age_from_credential() {
        let wallet = Wallet::new(MemoryStore::new());
        wallet.register_credential(holder(), OCR_TEXT).unwrap();

        let proof = wallet.prove_age(&holder(), 18).unwrap();
        assert_eq!(proof.circuit_type, CircuitType::AgeVerification);
        assert_eq!(proof.public_signals[0], "1");

        assert_eq!(wallet.proofs().unwrap().len(), 1);
    }

    #[test]
    fn test_prove_country() {
        let wallet = Wallet::new(MemoryStore::new());
        wallet.register_credential(holder(), OCR_TEXT).unwrap();

        let proof = wallet
            .prove_country(&holder(), vec!["NG".into(), "GH".into()])
            .unwrap();
        assert_eq!(proof.public_signals[0], "1");

        let proof = wallet.prove_country(&holder(), vec!["DE".into()]).unwrap();
        assert_eq!(proof.public_signals[0], "0");
    }

    #[test]
    fn test_prove_uniqueness_stable() {
        let wallet = Wallet::new(MemoryStore::new());
        wallet.register_credential(holder(), OCR_TEXT).unwrap();

        let secret = [0x11u8; 32];
        let p1 = wallet.prove_uniqueness(&holder(), "merchant-a", secret).unwrap();
        let p2 = wallet.prove_uniqueness(&holder(), "merchant-a", secret).unwrap();
        assert_eq!(p1.public_signals[0], p2.public_signals[0]);
    }

    #[test]
    fn test_send_and_verify_payment() {
        let wallet = Wallet::new(MemoryStore::new());
        let payment = wallet
            .send_private_payment(holder(), recipient(), "1000000000000000000")
            .unwrap();

        assert!(wallet.verify_payment(&payment.commitment).unwrap());

        // Payment record and its proof both landed in storage
        assert_eq!(wallet.payments().unwrap().len(), 1);
        let proofs = wallet.proofs().unwrap();
        assert_eq!(proofs.len(), 1);
        assert_eq!(proofs[0].circuit_type, CircuitType::PrivatePayment);
        assert_eq!(proofs[0].public_signals[0], payment.commitment);
    }

    #[test]
    fn test_export_receipt_is_unlinkable() {
        let wallet = Wallet::new(MemoryStore::new());
        let payment = wallet
            .send_private_payment(holder(), recipient(), "1000000000000000000")
            .unwrap();

        let receipt = wallet
            .export_receipt(&payment.commitment, Some("0xsigned".into()))
            .unwrap();
        assert_eq!(receipt.required_amount, "1000000000000000000");
        assert_eq!(receipt.signature, "0xsigned");

        let json = serde_json::to_value(&receipt).unwrap();
        assert!(json.get("sender").is_none());
        assert!(json.get("commitment").is_none());

        assert_eq!(wallet.receipts().unwrap().len(), 1);
    }

    #[test]
    fn test_verify_unknown_commitment_errors() {
        let wallet = Wallet::new(MemoryStore::new());
        assert!(wallet.verify_payment("deadbeef").is_err());
    }
}
