#![forbid(unsafe_code)]
#![warn(clippy::all)]

//! Wallet-side flows for Blurd: credential registration, proof
//! generation, private payments, and receipt export, persisted through
//! a pluggable key-value storage port.

pub mod storage;
pub mod store;
pub mod wallet;

pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{
    RecordStore, CREDENTIALS_KEY, PAYMENTS_KEY, PAYMENT_PROOFS_KEY, PROOFS_KEY,
};
pub use wallet::Wallet;
