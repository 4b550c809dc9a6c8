//! Client for the external verification backend.
//!
//! Every request walks a fixed, ordered list of base URLs: each is tried
//! once, immediately, in sequence, and the last error surfaces when all
//! fail. There is no backoff between attempts.

use blurd_proofs::ProofRecord;
use blurd_types::{BlurdError, BlurdResult, CredentialRecord};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Base URLs tried in order for every backend call.
pub const DEFAULT_BASE_URLS: &[&str] = &[
    "https://api.blurd.xyz",
    "https://blurd-backend.fly.dev",
    "http://localhost:4000",
];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Payment status reported by `/api/payments/check/:txid`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatus {
    /// Whether the transaction is confirmed on-chain.
    pub confirmed: bool,
    /// Confirmed amount in base units, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

/// Aggregate counters from `/api/merchant/metrics`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantMetrics {
    /// Total verification requests handled.
    pub total_verifications: u64,
    /// Distinct customers seen, by uniqueness nullifier.
    pub unique_customers: u64,
    /// Proofs that verified successfully.
    pub proofs_accepted: u64,
    /// Proofs that failed verification.
    pub proofs_rejected: u64,
    /// Payments confirmed against commitments.
    pub payments_confirmed: u64,
    /// When the counters were last updated.
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize)]
struct VerifyResponse {
    valid: bool,
}

#[derive(Deserialize)]
struct UniqueResponse {
    unique: bool,
}

/// HTTP client over the backend endpoint list.
pub struct BackendClient {
    client: Client,
    base_urls: Vec<String>,
}

impl BackendClient {
    /// Client over the default endpoint list.
    pub fn new() -> Self {
        Self::with_base_urls(DEFAULT_BASE_URLS.iter().map(|s| s.to_string()).collect())
    }

    /// Client over an explicit endpoint list.
    pub fn with_base_urls(base_urls: Vec<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, base_urls }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> BlurdResult<T> {
        let mut last_err = BlurdError::Network("No backend endpoints configured".into());

        for base in &self.base_urls {
            let url = format!("{base}{path}");
            debug!("HTTP GET: {}", url);

            match self.client.get(&url).send().await {
                Ok(resp) => match resp.error_for_status() {
                    Ok(resp) => match resp.json::<T>().await {
                        Ok(value) => return Ok(value),
                        Err(e) => {
                            last_err =
                                BlurdError::Network(format!("Bad response from {url}: {e}"));
                        }
                    },
                    Err(e) => {
                        last_err = BlurdError::Network(format!("HTTP GET failed: {e}"));
                    }
                },
                Err(e) => {
                    last_err = BlurdError::Network(format!("HTTP GET failed: {e}"));
                }
            }
            warn!("Backend {} unavailable, trying next", base);
        }

        Err(last_err)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> BlurdResult<T> {
        let mut last_err = BlurdError::Network("No backend endpoints configured".into());

        for base in &self.base_urls {
            let url = format!("{base}{path}");
            debug!("HTTP POST: {}", url);

            match self.client.post(&url).json(body).send().await {
                Ok(resp) => match resp.error_for_status() {
                    Ok(resp) => match resp.json::<T>().await {
                        Ok(value) => return Ok(value),
                        Err(e) => {
                            last_err =
                                BlurdError::Network(format!("Bad response from {url}: {e}"));
                        }
                    },
                    Err(e) => {
                        last_err = BlurdError::Network(format!("HTTP POST failed: {e}"));
                    }
                },
                Err(e) => {
                    last_err = BlurdError::Network(format!("HTTP POST failed: {e}"));
                }
            }
            warn!("Backend {} unavailable, trying next", base);
        }

        Err(last_err)
    }

    /// Fetch a stored proof by its binding hash.
    pub async fn get_proof(&self, proof_hash: &str) -> BlurdResult<ProofRecord> {
        self.get_json(&format!("/api/proofs/get/{proof_hash}")).await
    }

    /// Ask the backend to verify a proof record.
    pub async fn verify_proof(&self, record: &ProofRecord) -> BlurdResult<bool> {
        let resp: VerifyResponse = self.post_json("/api/proofs/verify", record).await?;
        Ok(resp.valid)
    }

    /// Check whether a uniqueness nullifier has been seen before.
    pub async fn check_unique(&self, nullifier: &str) -> BlurdResult<bool> {
        let resp: UniqueResponse = self
            .get_json(&format!("/api/check-unique/{nullifier}"))
            .await?;
        Ok(resp.unique)
    }

    /// Check a payment's on-chain status by transaction id.
    pub async fn check_payment(&self, txid: &str) -> BlurdResult<PaymentStatus> {
        self.get_json(&format!("/api/payments/check/{txid}")).await
    }

    /// Fetch the merchant dashboard counters.
    pub async fn merchant_metrics(&self) -> BlurdResult<MerchantMetrics> {
        self.get_json("/api/merchant/metrics").await
    }

    /// Register a credential with the backend registry.
    pub async fn register_credential(&self, record: &CredentialRecord) -> BlurdResult<()> {
        let _: serde_json::Value = self.post_json("/api/register-credential", record).await?;
        Ok(())
    }
}

impl Default for BackendClient {
    fn default() -> Self {
        Self::new()
    }
}
