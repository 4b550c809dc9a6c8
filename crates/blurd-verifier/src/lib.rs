#![forbid(unsafe_code)]
#![warn(clippy::all)]

//! Merchant-side verification for Blurd: local re-verification of proof
//! records and payment commitments, plus the client for the external
//! verification backend.

pub mod client;
pub mod verify;

pub use client::{BackendClient, MerchantMetrics, PaymentStatus, DEFAULT_BASE_URLS};
pub use verify::{
    verify_age_proof, verify_country_proof, verify_payment_proof, verify_payment_record,
    verify_proof_record,
};
