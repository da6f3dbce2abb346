//! `itemforge-core`: foundation building blocks shared by the wizard crates.
//!
//! This crate contains **pure domain** primitives (no async runtime, no IO).

pub mod error;
pub mod field;
pub mod id;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use field::{FieldKey, MediaSlot};
pub use id::{ListingId, SessionId, SubmissionId};
pub use value_object::ValueObject;
