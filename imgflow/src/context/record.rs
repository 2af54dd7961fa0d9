//! Typed context records and canonical name derivation.
//!
//! Concrete record types implement [`ContextRecord`]; the carrier stores
//! them behind the object-safe [`ErasedContextRecord`] view.

use crate::errors::{DeserializationError, ImgflowError, ValidationError};
use regex::Regex;
use serde::{de::DeserializeOwned, Serialize};
use std::any::Any;
use std::fmt::Debug;
use std::sync::LazyLock;

/// A typed, validated, serializable metadata record.
///
/// Records have a fixed, declared field schema and are immutable once
/// constructed: no mutating methods are exposed, and "changes" happen by
/// constructing a new record. The decode path re-invokes [`validate`]
/// so deserialization cannot produce an invalid record.
///
/// [`validate`]: ContextRecord::validate
pub trait ContextRecord:
    Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static
{
    /// Validates the record's fields against its own rules.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming the offending field and rule.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Serializes the record to a JSON value.
    fn to_value(&self) -> Result<serde_json::Value, ImgflowError> {
        serde_json::to_value(self).map_err(|e| ImgflowError::Serialization(e.to_string()))
    }

    /// Serializes the record to a JSON string.
    fn to_json(&self) -> Result<String, ImgflowError> {
        serde_json::to_string(self).map_err(|e| ImgflowError::Serialization(e.to_string()))
    }

    /// Reconstructs a record from a JSON value, re-running validation.
    ///
    /// # Errors
    ///
    /// Returns `DeserializationError` for structurally incompatible values
    /// and `ValidationError` when the parsed fields fail the record's rule.
    fn from_value(value: serde_json::Value) -> Result<Self, ImgflowError> {
        let record: Self =
            serde_json::from_value(value).map_err(|e| DeserializationError::new(e.to_string()))?;
        record.validate()?;
        Ok(record)
    }

    /// Reconstructs a record from a JSON string, re-running validation.
    ///
    /// # Errors
    ///
    /// Returns `DeserializationError` on malformed JSON and
    /// `ValidationError` when the parsed fields fail the record's rule.
    fn from_json(json: &str) -> Result<Self, ImgflowError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| DeserializationError::new(e.to_string()))?;
        Self::from_value(value)
    }
}

/// Object-safe view of a context record, as stored by the carrier.
pub trait ErasedContextRecord: Debug + Send + Sync {
    /// Returns the record as `Any` for downcasting to its concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Deep-copies the record behind a fresh box.
    fn clone_boxed(&self) -> Box<dyn ErasedContextRecord>;

    /// Serializes the record to a JSON value.
    fn to_value(&self) -> Result<serde_json::Value, ImgflowError>;

    /// Validates the record's fields against its own rules.
    fn validate(&self) -> Result<(), ValidationError>;
}

impl<T: ContextRecord> ErasedContextRecord for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn ErasedContextRecord> {
        Box::new(self.clone())
    }

    fn to_value(&self) -> Result<serde_json::Value, ImgflowError> {
        ContextRecord::to_value(self)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        ContextRecord::validate(self)
    }
}

impl Clone for Box<dyn ErasedContextRecord> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

static UPPER_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("([A-Z]+)([A-Z][a-z])").expect("static pattern"));
static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("static pattern"));

/// Derives the canonical registered name from a type identifier.
///
/// Normalizes a CamelCase identifier to a snake-style name and trims a
/// trailing `_context_data` or `_context` segment, so `ResolutionContext`
/// becomes `resolution`. Module paths are ignored; only the final path
/// segment contributes to the name.
#[must_use]
pub fn derive_context_name(type_identifier: &str) -> String {
    let base = type_identifier
        .rsplit("::")
        .next()
        .unwrap_or(type_identifier);
    let spaced = UPPER_RUN.replace_all(base, "${1}_${2}");
    let spaced = LOWER_UPPER.replace_all(&spaced, "${1}_${2}");
    let snake = spaced.to_lowercase();

    for suffix in ["_context_data", "_context"] {
        if let Some(stripped) = snake.strip_suffix(suffix) {
            return stripped.to_string();
        }
    }
    snake
}

/// Returns the final path segment of `std::any::type_name` for `T`.
#[must_use]
pub(crate) fn short_type_name<T: 'static>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
