use thiserror::Error;

/// Unified error type for the Blurd crates.
#[derive(Error, Debug)]
pub enum BlurdError {
    /// Cryptographic failure (hashing, field conversion).
    #[error("Cryptographic error: {0}")]
    Crypto(String),

    /// Input could not be represented as a field element.
    #[error("Field conversion error: {0}")]
    FieldConversion(String),

    /// Commitment generation or verification failure.
    #[error("Commitment error: {0}")]
    Commitment(String),

    /// Proof generation or verification failure.
    #[error("Proof error: {0}")]
    Proof(String),

    /// Invalid account address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Credential handling failure.
    #[error("Credential error: {0}")]
    Credential(String),

    /// Payment flow failure.
    #[error("Payment error: {0}")]
    Payment(String),

    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Backend API failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration failure.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything that should not happen.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result alias used across the workspace.
pub type BlurdResult<T> = Result<T, BlurdError>;

impl BlurdError {
    /// Map an error onto a message suitable for an end user.
    ///
    /// Classification is by substring match on the underlying message,
    /// mirroring how the product surfaces wallet-SDK failures.
    pub fn user_message(&self) -> String {
        let raw = self.to_string();
        let lower = raw.to_lowercase();

        if lower.contains("insufficient") {
            return "Insufficient funds for this payment. Top up your wallet and try again."
                .to_string();
        }
        if lower.contains("rejected") || lower.contains("denied") {
            return "The request was rejected in your wallet.".to_string();
        }
        if matches!(self, BlurdError::Network(_)) {
            return "Could not reach the verification service. Please try again.".to_string();
        }

        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_maps_to_funds_prompt() {
        let err = BlurdError::Payment("insufficient balance for transfer".into());
        assert!(err.user_message().contains("Insufficient funds"));
    }

    #[test]
    fn test_network_maps_to_service_prompt() {
        let err = BlurdError::Network("connection refused".into());
        assert!(err.user_message().contains("verification service"));
    }

    #[test]
    fn test_other_errors_pass_through() {
        let err = BlurdError::Storage("disk full".into());
        assert_eq!(err.user_message(), "Storage error: disk full");
    }
}
