//! Name to context-type registry.
//!
//! The registry binds canonical names to concrete record types so the
//! carrier can resolve persisted documents back into typed records. It is
//! populated by explicit registration calls at startup and read-only
//! afterwards.

use crate::context::record::{
    derive_context_name, short_type_name, ContextRecord, ErasedContextRecord,
};
use crate::errors::{ImgflowError, RegistrationConflictError, UnknownContextError};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// Registered metadata for a bound context type.
#[derive(Debug, Clone)]
pub struct RegisteredContext {
    /// The canonical context name.
    pub name: String,
    /// Short identifier of the bound Rust type.
    pub type_name: String,
    /// When the binding was registered.
    pub registered_at: DateTime<Utc>,
}

type DecodeFn = fn(serde_json::Value) -> Result<Box<dyn ErasedContextRecord>, ImgflowError>;

fn decode_record<T: ContextRecord>(
    value: serde_json::Value,
) -> Result<Box<dyn ErasedContextRecord>, ImgflowError> {
    let record = T::from_value(value)?;
    Ok(Box::new(record))
}

struct RegistryEntry {
    metadata: RegisteredContext,
    type_id: TypeId,
    decode: DecodeFn,
}

/// Mapping from canonical name to context record type.
///
/// Name-uniqueness policy: re-registering a name bound to the same type is
/// idempotent and succeeds; binding a name to a different type is rejected
/// with [`RegistrationConflictError`]. `resolve` therefore always reflects
/// the first successful registration for a name.
///
/// A record type's canonical key is its first registered name; later
/// aliases resolve to the type but do not change the key used by
/// `Carrier::add_context`.
#[derive(Default)]
pub struct ContextRegistry {
    by_name: RwLock<HashMap<String, RegistryEntry>>,
    names_by_type: RwLock<HashMap<TypeId, String>>,
}

impl ContextRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `T` under its auto-derived canonical name.
    ///
    /// Returns the bound name so call sites can chain registration with
    /// declaration.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationConflictError` when the name is already bound
    /// to a different type.
    pub fn register<T: ContextRecord>(&self) -> Result<String, RegistrationConflictError> {
        self.register_as::<T>(derive_context_name(short_type_name::<T>()))
    }

    /// Binds `T` under an explicit name.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationConflictError` when the name is already bound
    /// to a different type.
    pub fn register_as<T: ContextRecord>(
        &self,
        name: impl Into<String>,
    ) -> Result<String, RegistrationConflictError> {
        let name = name.into();
        let type_id = TypeId::of::<T>();
        let type_name = short_type_name::<T>().to_string();

        let mut by_name = self.by_name.write();
        if let Some(existing) = by_name.get(&name) {
            if existing.type_id == type_id {
                return Ok(name);
            }
            return Err(RegistrationConflictError::new(
                &name,
                &existing.metadata.type_name,
                &type_name,
            ));
        }

        tracing::debug!(name = %name, context_type = %type_name, "registered context type");
        by_name.insert(
            name.clone(),
            RegistryEntry {
                metadata: RegisteredContext {
                    name: name.clone(),
                    type_name,
                    registered_at: Utc::now(),
                },
                type_id,
                decode: decode_record::<T>,
            },
        );

        let mut names_by_type = self.names_by_type.write();
        names_by_type.entry(type_id).or_insert_with(|| name.clone());

        Ok(name)
    }

    /// Resolves a name to its registered binding.
    ///
    /// # Errors
    ///
    /// Returns `UnknownContextError` when no type is bound to `name`.
    pub fn resolve(&self, name: &str) -> Result<RegisteredContext, UnknownContextError> {
        self.by_name
            .read()
            .get(name)
            .map(|entry| entry.metadata.clone())
            .ok_or_else(|| UnknownContextError::new(name))
    }

    /// Decodes a JSON value through the type bound to `name`.
    ///
    /// Runs the bound type's deserialization and validation path.
    ///
    /// # Errors
    ///
    /// Returns `UnknownContextError` for unbound names, and the bound
    /// type's deserialization/validation errors otherwise.
    pub fn decode(
        &self,
        name: &str,
        value: serde_json::Value,
    ) -> Result<Box<dyn ErasedContextRecord>, ImgflowError> {
        let decode = {
            let by_name = self.by_name.read();
            let entry = by_name
                .get(name)
                .ok_or_else(|| UnknownContextError::new(name))?;
            entry.decode
        };
        decode(value)
    }

    /// Returns the canonical name bound to a record type, if registered.
    #[must_use]
    pub fn name_of(&self, type_id: TypeId) -> Option<String> {
        self.names_by_type.read().get(&type_id).cloned()
    }

    /// Enumerates all registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.by_name.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Checks whether a name is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.read().contains_key(name)
    }

    /// Returns the number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.read().len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.read().is_empty()
    }

    /// Remove all registered entries (primarily for tests).
    pub fn clear(&self) {
        self.by_name.write().clear();
        self.names_by_type.write().clear();
    }
}

impl std::fmt::Debug for ContextRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextRegistry")
            .field("names", &self.names())
            .finish()
    }
}

static REGISTRY: LazyLock<Arc<ContextRegistry>> = LazyLock::new(|| {
    let registry = ContextRegistry::new();
    if let Err(err) = crate::records::register_builtin_contexts(&registry) {
        tracing::error!(error = %err, "builtin context registration failed");
    }
    Arc::new(registry)
});

/// Returns the process-wide default registry, preloaded with the built-in
/// context records.
#[must_use]
pub fn global_registry() -> Arc<ContextRegistry> {
    Arc::clone(&REGISTRY)
}
