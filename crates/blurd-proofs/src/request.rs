use crate::record::CircuitType;
use blurd_types::Address;

/// Inputs for an age proof: the DOB stays private, the minimum age and
/// the identity commitment become public signals.
#[derive(Clone, Debug)]
pub struct AgeProofRequest {
    /// Date of birth in canonical `YYYY-MM-DD` form.
    pub dob: String,
    /// Required minimum age in whole years.
    pub min_age: u8,
    /// Document number backing the identity commitment.
    pub document_number: String,
    /// Holder account address.
    pub holder: Address,
}

/// Inputs for a country proof: the holder's country stays private, the
/// allowed-set commitment and the identity commitment become public.
#[derive(Clone, Debug)]
pub struct CountryProofRequest {
    /// Holder's ISO alpha-2 country code.
    pub country_code: String,
    /// Allowed ISO alpha-2 codes.
    pub allowed: Vec<String>,
    /// Document number backing the identity commitment.
    pub document_number: String,
    /// Holder account address.
    pub holder: Address,
}

/// Inputs for a uniqueness proof: the secret stays private, the scoped
/// nullifier becomes public.
#[derive(Clone, Debug)]
pub struct UniquenessProofRequest {
    /// Holder's identity secret.
    pub secret: [u8; 32],
    /// Scope string, typically a merchant identifier.
    pub scope: String,
    /// Document number backing the identity commitment.
    pub document_number: String,
    /// Holder account address.
    pub holder: Address,
}

/// Inputs for a private-payment proof: sender, recipient, and nonce stay
/// private, the payment commitment and required amount become public.
#[derive(Clone, Debug)]
pub struct PaymentProofRequest {
    /// Sender account address.
    pub sender: Address,
    /// Recipient account address.
    pub recipient: Address,
    /// Base-unit amount as a decimal integer string.
    pub amount: String,
    /// Payment nonce as a decimal integer string.
    pub nonce: String,
}

/// A proof request for one of the product circuits.
#[derive(Clone, Debug)]
pub enum ProofRequest {
    /// Age verification.
    Age(AgeProofRequest),
    /// Country verification.
    Country(CountryProofRequest),
    /// Per-scope uniqueness.
    Uniqueness(UniquenessProofRequest),
    /// Private payment.
    Payment(PaymentProofRequest),
}

impl ProofRequest {
    /// The circuit a request belongs to.
    pub fn circuit_type(&self) -> CircuitType {
        match self {
            Self::Age(_) => CircuitType::AgeVerification,
            Self::Country(_) => CircuitType::CountryVerification,
            Self::Uniqueness(_) => CircuitType::Uniqueness,
            Self::Payment(_) => CircuitType::PrivatePayment,
        }
    }
}
