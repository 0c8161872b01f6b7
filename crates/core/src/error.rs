//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (required
/// fields, closed-set membership, identifiers). Storage and codec failures belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required text field is empty after trimming.
    #[error("required field `{0}` is empty")]
    MissingField(&'static str),

    /// A value is not a member of its closed literal set.
    #[error("`{value}` is not a valid {field}")]
    InvalidEnumValue { field: &'static str, value: String },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField(field)
    }

    pub fn invalid_enum(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidEnumValue {
            field,
            value: value.into(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
