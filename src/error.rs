//! Custom error types for split-ledger
//!
//! This module defines the error hierarchy for the ledger engine using
//! thiserror. Errors are split into two families: input errors the caller can
//! fix and retry, and integrity violations that point at corrupt upstream data.

use thiserror::Error;

use crate::models::Money;

/// The main error type for split-ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// A manual split does not add up to the expense amount.
    ///
    /// `difference` is `total - sum(splits)`: positive means cents are still
    /// unassigned, negative means the splits exceed the total.
    #[error("Invalid split: {}", describe_difference(*.difference))]
    InvalidSplit { difference: Money },

    /// An expense references a member that is not part of the group
    #[error("{entity_type} {identifier} referenced by expense {expense} is not a group member")]
    DanglingReference {
        entity_type: &'static str,
        identifier: String,
        expense: String,
    },

    /// An equal split was requested with nobody to split between
    #[error("Cannot split an amount between zero participants")]
    EmptyParticipants,

    /// Internal invariant failure: net balances do not sum to zero
    #[error("Conservation violation: {0}")]
    ConservationViolation(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Currency conversion errors
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

fn describe_difference(difference: Money) -> String {
    if difference.is_negative() {
        format!("{} over the total", difference.abs().to_input_string())
    } else {
        format!("{} still unassigned", difference.to_input_string())
    }
}

impl SplitError {
    /// Create a dangling reference error for an expense payer
    pub fn dangling_payer(identifier: impl ToString, expense: impl ToString) -> Self {
        Self::DanglingReference {
            entity_type: "Payer",
            identifier: identifier.to_string(),
            expense: expense.to_string(),
        }
    }

    /// Create a dangling reference error for a split member
    pub fn dangling_split_member(identifier: impl ToString, expense: impl ToString) -> Self {
        Self::DanglingReference {
            entity_type: "Split member",
            identifier: identifier.to_string(),
            expense: expense.to_string(),
        }
    }

    /// Create a validation error for a total that does not fit in the money type
    pub fn amount_overflow(context: impl std::fmt::Display) -> Self {
        Self::Validation(format!("Amount overflow: {}", context))
    }

    /// Create a "not found" error for members
    pub fn member_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Member",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Errors the caller can resolve by fixing the input and retrying
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSplit { .. }
                | Self::DanglingReference { .. }
                | Self::EmptyParticipants
                | Self::Validation(_)
        )
    }

    /// Errors that mean data upstream of the engine is corrupt
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::ConservationViolation(_))
    }
}

impl From<std::io::Error> for SplitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SplitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for split-ledger operations
pub type SplitResult<T> = Result<T, SplitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_split_display() {
        let under = SplitError::InvalidSplit {
            difference: Money::from_cents(250),
        };
        assert_eq!(under.to_string(), "Invalid split: 2.50 still unassigned");

        let over = SplitError::InvalidSplit {
            difference: Money::from_cents(-5),
        };
        assert_eq!(over.to_string(), "Invalid split: 0.05 over the total");
    }

    #[test]
    fn test_dangling_reference_display() {
        let err = SplitError::dangling_payer("mem-1234abcd", "exp-deadbeef");
        assert_eq!(
            err.to_string(),
            "Payer mem-1234abcd referenced by expense exp-deadbeef is not a group member"
        );
    }

    #[test]
    fn test_not_found_error() {
        let err = SplitError::member_not_found("Alice");
        assert_eq!(err.to_string(), "Member not found: Alice");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_classification() {
        assert!(SplitError::EmptyParticipants.is_input_error());
        assert!(SplitError::dangling_payer("a", "b").is_input_error());
        assert!(SplitError::InvalidSplit {
            difference: Money::from_cents(1)
        }
        .is_input_error());

        let violation = SplitError::ConservationViolation("net sum is 3".into());
        assert!(violation.is_integrity_violation());
        assert!(!violation.is_input_error());
    }

    #[test]
    fn test_amount_overflow() {
        let err = SplitError::amount_overflow("paid total of Ana");
        assert_eq!(err.to_string(), "Validation error: Amount overflow: paid total of Ana");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SplitError = io_err.into();
        assert!(matches!(err, SplitError::Io(_)));
    }
}
