#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! Shared types for the Blurd identity and private-payment toolkit.

pub mod address;
pub mod amount;
pub mod error;
pub mod records;

pub use address::*;
pub use amount::*;
pub use error::*;
pub use records::*;

/// Size of an EVM-style account address in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// Decimals of the demo token (wei-style base units).
pub const TOKEN_DECIMALS: u8 = 18;
