#![forbid(unsafe_code)]
#![warn(clippy::all)]

//! Proof records and the proof-engine seam.
//!
//! Records carry the snarkjs-compatible Groth16 JSON shape with a real
//! SHA-256 binding hash over the proof body and public signals. The
//! engine behind [`ProofEngine`] is a transparent placeholder: proof
//! coordinates are zero-filled and provide no zero-knowledge soundness.
//! The trait keeps a future real prover interchangeable with it.

pub mod engine;
pub mod record;
pub mod request;

pub use engine::{policy_commitment, PlaceholderEngine, ProofEngine};
pub use record::{binding_hash, CircuitType, Groth16ProofData, ProofRecord};
pub use request::{
    AgeProofRequest, CountryProofRequest, PaymentProofRequest, ProofRequest,
    UniquenessProofRequest,
};
