#![forbid(unsafe_code)]
#![warn(clippy::all)]

//! Heuristic extraction of structured fields from identity-document OCR
//! text. Best effort: every field is optional, and [`extract_fields`]
//! never fails. Garbage in, a record with just the raw text out.

mod country;
mod dates;
mod extractor;

pub use country::Country;
pub use extractor::extract_fields;
