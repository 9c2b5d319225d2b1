//! Domain logic for the intake response-collection service.
//!
//! Everything in this crate is pure: question and journey definitions,
//! answer storage semantics, the validation pipeline, and the mapping
//! between completed answers and persisted submission fields. No I/O
//! happens here; the `intake-db` and `intake-api` crates drive it.

pub mod answers;
pub mod error;
pub mod feedback;
pub mod flash;
pub mod journey;
pub mod mapping;
pub mod question;
pub mod section;
pub mod types;
pub mod validation;
