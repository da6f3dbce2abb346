//! Domain error model.

use thiserror::Error;

use crate::field::{FieldKey, MediaSlot};

/// Result type used across the wizard crates.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures the wizard can report
/// (validation, capacity, contract misuse). Transport concerns belong to the
/// publisher implementation and surface here only as `SubmissionFailed`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is missing or out of range; the user is sent back to `step`.
    #[error("{field} is invalid (step {step}): {message}")]
    Validation {
        field: FieldKey,
        step: usize,
        message: String,
    },

    /// A media batch would push a slot over its cap. The whole batch is rejected.
    #[error("{slot} media slot accepts at most {cap} images")]
    CapacityExceeded { slot: MediaSlot, cap: usize },

    /// An index outside `[0, len-1]` was passed by the caller.
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The operation is not allowed while a submission is in flight.
    #[error("a submission is in progress")]
    Busy,

    /// The publisher reported a failure for an in-flight submission.
    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    /// An edit carried a value that could not be interpreted (e.g. a malformed price).
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// A single media file could not be turned into a storable image.
    #[error("decode failed: {0}")]
    Decode(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn validation(field: FieldKey, step: usize, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            step,
            message: message.into(),
        }
    }

    pub fn capacity_exceeded(slot: MediaSlot, cap: usize) -> Self {
        Self::CapacityExceeded { slot, cap }
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    pub fn submission_failed(msg: impl Into<String>) -> Self {
        Self::SubmissionFailed(msg.into())
    }

    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Self::InvalidValue(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// The step the wizard should return to, for validation failures.
    pub fn redirect_step(&self) -> Option<usize> {
        match self {
            DomainError::Validation { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// Whether the error is a recoverable condition to show the user, as
    /// opposed to a caller bug.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            DomainError::IndexOutOfRange { .. } | DomainError::InvariantViolation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_carries_redirect_step() {
        let err = DomainError::validation(FieldKey::SalePrice, 2, "Sale price must be greater than 0");
        assert_eq!(err.redirect_step(), Some(2));
        assert!(err.is_user_facing());
        assert_eq!(
            err.to_string(),
            "sale_price is invalid (step 2): Sale price must be greater than 0"
        );
    }

    #[test]
    fn contract_errors_are_not_user_facing() {
        assert!(!DomainError::index_out_of_range(3, 2).is_user_facing());
        assert!(!DomainError::invariant("empty step list").is_user_facing());
        assert!(DomainError::capacity_exceeded(MediaSlot::Primary, 5).is_user_facing());
        assert_eq!(DomainError::Busy.redirect_step(), None);
    }

    #[test]
    fn capacity_message_names_slot_and_cap() {
        let err = DomainError::capacity_exceeded(MediaSlot::Secondary, 8);
        assert_eq!(err.to_string(), "secondary media slot accepts at most 8 images");
    }
}
