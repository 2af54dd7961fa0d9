//! Error types for the imgflow context core.
//!
//! Validation and registry-resolution failures propagate immediately to the
//! caller; missing-context conditions are not errors and never surface here.

use thiserror::Error;

/// The main error type for imgflow operations.
#[derive(Debug, Error)]
pub enum ImgflowError {
    /// A context record failed its own validation rule.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A name has no bound context type in the registry.
    #[error("{0}")]
    UnknownContext(#[from] UnknownContextError),

    /// Malformed JSON or a structurally incompatible document.
    #[error("{0}")]
    Deserialization(#[from] DeserializationError),

    /// A registration was rejected under the name-uniqueness policy.
    #[error("{0}")]
    RegistrationConflict(#[from] RegistrationConflictError),

    /// A record could not be encoded to JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An opaque operation failure.
    #[error("Operation error: {0}")]
    Operation(String),
}

/// Error raised when a context record's fields fail its validation rule.
///
/// Raised at construction and deserialization time; no partially valid
/// record is observable after this error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Error message naming the violated rule.
    pub message: String,
    /// Field that caused the error, if applicable.
    pub field: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }

    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref field) = self.field {
            write!(f, "Field '{}': {}", field, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Error raised when a name has no bound type in the context registry.
#[derive(Debug, Clone, Error)]
#[error("Unknown context '{name}': no context type registered under this name")]
pub struct UnknownContextError {
    /// The unresolved context name.
    pub name: String,
}

impl UnknownContextError {
    /// Creates a new unknown context error.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Error raised when a persisted context document cannot be parsed.
#[derive(Debug, Clone, Error)]
#[error("Deserialization error: {message}")]
pub struct DeserializationError {
    /// Description of the parse failure.
    pub message: String,
}

impl DeserializationError {
    /// Creates a new deserialization error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error raised when a registration would rebind a name to a different type.
#[derive(Debug, Clone, Error)]
#[error("Context name '{name}' is already registered to '{existing}', rejecting '{incoming}'")]
pub struct RegistrationConflictError {
    /// The contested name.
    pub name: String,
    /// The type already bound to the name.
    pub existing: String,
    /// The type whose registration was rejected.
    pub incoming: String,
}

impl RegistrationConflictError {
    /// Creates a new registration conflict error.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        existing: impl Into<String>,
        incoming: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            existing: existing.into(),
            incoming: incoming.into(),
        }
    }
}
