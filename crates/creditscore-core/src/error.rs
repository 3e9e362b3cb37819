//! Error types for CreditScore

use serde_json::Value;
use thiserror::Error;

/// Client-caused payload rejection.
///
/// Only the first offending field is reported; validation stops there.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is absent from the payload.
    #[error("La clé \"{field}\" est manquante dans les données.")]
    MissingField { field: &'static str },

    /// A required field is present but cannot be read as a number.
    #[error("La valeur de la clé \"{field}\" n'est pas numérique : {value}")]
    InvalidType { field: &'static str, value: Value },
}

impl ValidationError {
    /// Returns the name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field } => field,
            ValidationError::InvalidType { field, .. } => field,
        }
    }

    /// Returns a stable machine-readable tag for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingField { .. } => "missing_field",
            ValidationError::InvalidType { .. } => "invalid_type",
        }
    }
}

/// Main error type for CreditScore operations
#[derive(Debug, Error)]
pub enum CreditScoreError {
    /// The request payload was rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The classifier could not be loaded (fatal at startup)
    #[error("Model load error: {0}")]
    ModelLoad(String),

    /// A core invariant was broken (should not occur in normal operation)
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),
}

impl CreditScoreError {
    /// Returns true when the caller, not the service, caused the failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CreditScoreError::Validation(_))
    }
}

/// Result type alias for CreditScore operations
pub type Result<T> = std::result::Result<T, CreditScoreError>;
