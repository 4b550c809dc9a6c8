use crate::address::Address;
use crate::error::{BlurdError, BlurdResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A private-payment commitment record.
///
/// Created client-side at send time and never mutated afterwards.
/// Recomputing the commitment from the four inputs must equal
/// `commitment`; any mismatch signals tampering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Sender account address.
    pub sender: Address,
    /// Recipient account address.
    pub recipient: Address,
    /// Base-unit amount as a decimal integer string.
    pub amount: String,
    /// Random nonce as a decimal integer string.
    pub nonce: String,
    /// Hex-encoded payment commitment.
    pub commitment: String,
    /// When the payment was created.
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Kind of identity document an OCR text was extracted from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// International passport.
    Passport,
    /// National identity card.
    NationalId,
    /// Driving licence.
    DriversLicence,
    /// Residence permit card.
    ResidencePermit,
}

impl DocumentType {
    /// Stable string form used in wire records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passport => "passport",
            Self::NationalId => "national_id",
            Self::DriversLicence => "drivers_licence",
            Self::ResidencePermit => "residence_permit",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields pulled from raw OCR text, best effort.
///
/// Every field is independently optional because extraction may fail per
/// field. The only cross-field rule is that a derived age must fall in
/// [0, 150] or be omitted along with the date of birth.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    /// Date of birth in canonical `YYYY-MM-DD` form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    /// Age in whole years, derived from the date of birth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    /// Issuing country name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Document number, uppercased with separators removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    /// Expiry date in canonical `YYYY-MM-DD` form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    /// Detected document kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,
    /// The unmodified input text, always preserved.
    pub raw_text: String,
}

impl ExtractedFields {
    /// A record carrying only the raw text, the fallback for inputs
    /// where nothing could be extracted.
    pub fn raw_only(text: &str) -> Self {
        Self {
            raw_text: text.to_string(),
            ..Self::default()
        }
    }

    /// Whether any field beyond the raw text was extracted.
    pub fn is_empty(&self) -> bool {
        self.dob.is_none()
            && self.age.is_none()
            && self.country.is_none()
            && self.country_code.is_none()
            && self.document_number.is_none()
            && self.expiry.is_none()
            && self.document_type.is_none()
    }
}

/// Identifier of a registered credential.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CredentialId(pub uuid::Uuid);

impl CredentialId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl std::str::FromStr for CredentialId {
    type Err = BlurdError;

    fn from_str(s: &str) -> BlurdResult<Self> {
        let uuid = uuid::Uuid::parse_str(s).map_err(|e| BlurdError::Credential(e.to_string()))?;
        Ok(Self(uuid))
    }
}

impl Default for CredentialId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CredentialId({})", self.0)
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered identity credential held by the wallet.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    /// Credential identifier.
    pub id: CredentialId,
    /// Holder account address.
    pub holder: Address,
    /// Fields extracted from the holder's document.
    pub fields: ExtractedFields,
    /// Hex-encoded identity commitment binding document and holder.
    pub identity_commitment: String,
    /// When the credential was registered.
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Privacy-preserving payment receipt (the `payment-proof.json` shape).
///
/// Carries no wallet address, transaction hash, or timestamp.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    /// The publicly required amount, base-unit decimal string.
    pub required_amount: String,
    /// Hex digest binding the receipt to a stored proof.
    pub proof_hash: String,
    /// Detached signature supplied by the holder's wallet, if any.
    pub signature: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracted_fields_raw_only() {
        let fields = ExtractedFields::raw_only("garbage input");
        assert!(fields.is_empty());
        assert_eq!(fields.raw_text, "garbage input");
    }

    #[test]
    fn test_extracted_fields_wire_names() {
        let fields = ExtractedFields {
            dob: Some("1999-12-31".into()),
            country_code: Some("NG".into()),
            document_number: Some("A1234567".into()),
            raw_text: "x".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert!(json.get("countryCode").is_some());
        assert!(json.get("documentNumber").is_some());
        assert!(json.get("rawText").is_some());
        // Omitted fields stay out of the wire record
        assert!(json.get("expiry").is_none());
    }

    #[test]
    fn test_receipt_has_no_identifying_fields() {
        let receipt = PaymentReceipt {
            required_amount: "1000000000000000000".into(),
            proof_hash: "ab".repeat(32),
            signature: String::new(),
        };
        let json = serde_json::to_value(&receipt).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(obj.get("sender").is_none());
        assert!(obj.get("txHash").is_none());
        assert!(obj.get("timestamp").is_none());
    }
}
