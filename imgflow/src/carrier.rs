//! The payload + context container flowing through a pipeline.
//!
//! A carrier pairs one opaque payload with its typed context records and
//! the legacy free-form mapping. Pipeline stages never mutate a carrier in
//! place; each stage copies its input and returns the transformed copy,
//! which gives the pipeline safe, implicit undo/replay semantics.

use crate::advisor;
use crate::context::{
    ContextRecord, ContextRegistry, ErasedContextRecord, LegacyContext,
};
use crate::errors::{DeserializationError, ImgflowError, UnknownContextError};
use serde::Deserialize;
use std::any::TypeId;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Container pairing an opaque payload with its context records.
///
/// The payload is never inspected by this core; `P: Clone` owns the
/// payload-copy semantics. The typed store holds at most one record per
/// registered name. Copies never share context state with their source.
pub struct Carrier<P> {
    payload: P,
    registry: Arc<ContextRegistry>,
    contexts: BTreeMap<String, Box<dyn ErasedContextRecord>>,
    legacy: LegacyContext,
}

#[derive(Deserialize)]
struct CarrierDocument {
    #[serde(default)]
    contexts: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    legacy_context: LegacyContext,
}

impl<P> Carrier<P> {
    /// Creates a carrier with no context records.
    #[must_use]
    pub fn new(payload: P, registry: Arc<ContextRegistry>) -> Self {
        Self {
            payload,
            registry,
            contexts: BTreeMap::new(),
            legacy: LegacyContext::new(),
        }
    }

    /// Creates a carrier resolving against the global default registry.
    #[must_use]
    pub fn with_default_registry(payload: P) -> Self {
        Self::new(payload, crate::context::global_registry())
    }

    /// The opaque payload.
    #[must_use]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consumes the carrier, returning its payload.
    #[must_use]
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// The registry this carrier resolves context names against.
    #[must_use]
    pub fn registry(&self) -> &Arc<ContextRegistry> {
        &self.registry
    }

    /// Inserts a record under its registered name, overwriting any
    /// previous record with that name.
    ///
    /// The key is derived from the record's concrete type via the
    /// registry. Cross-record consistency is not validated.
    ///
    /// # Errors
    ///
    /// Returns `UnknownContextError` when the record's type has not been
    /// registered.
    pub fn add_context<T: ContextRecord>(&mut self, record: T) -> Result<(), UnknownContextError> {
        let name = self.registry.name_of(TypeId::of::<T>()).ok_or_else(|| {
            UnknownContextError::new(crate::context::derive_context_name(
                std::any::type_name::<T>(),
            ))
        })?;
        self.contexts.insert(name, Box::new(record));
        Ok(())
    }

    /// Looks up a record by name.
    ///
    /// Absence is a normal, checked condition, not an error.
    #[must_use]
    pub fn get_context(&self, name: &str) -> Option<&dyn ErasedContextRecord> {
        self.contexts.get(name).map(|record| record.as_ref())
    }

    /// Looks up a record by name and downcasts it to a concrete type.
    #[must_use]
    pub fn get_context_as<T: ContextRecord>(&self, name: &str) -> Option<&T> {
        self.contexts.get(name)?.as_any().downcast_ref::<T>()
    }

    /// Checks whether a record is present under `name`.
    #[must_use]
    pub fn has_context(&self, name: &str) -> bool {
        self.contexts.contains_key(name)
    }

    /// Removes the record under `name`, reporting whether one existed.
    pub fn remove_context(&mut self, name: &str) -> bool {
        self.contexts.remove(name).is_some()
    }

    /// Names of all stored records, sorted.
    #[must_use]
    pub fn context_names(&self) -> Vec<String> {
        self.contexts.keys().cloned().collect()
    }

    /// Returns the subset of `required` names not currently present,
    /// preserving the order of `required`.
    #[must_use]
    pub fn get_missing_contexts<S: AsRef<str>>(&self, required: &[S]) -> Vec<String> {
        required
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| !self.contexts.contains_key(*name))
            .map(String::from)
            .collect()
    }

    /// Emits a warning-level diagnostic for missing context names, with
    /// one remediation suggestion per name from the advisory table.
    ///
    /// Purely informational: never fails and never blocks execution.
    pub fn log_missing_contexts<S: AsRef<str>>(&self, missing: &[S], operation_name: &str) {
        if missing.is_empty() {
            return;
        }
        let names: Vec<&str> = missing.iter().map(AsRef::as_ref).collect();
        tracing::warn!(
            operation = operation_name,
            missing = ?names,
            "operation requires missing contexts"
        );
        for line in advisor::suggestions(&names) {
            tracing::warn!(operation = operation_name, "{line}");
        }
    }

    /// The legacy free-form mapping.
    #[must_use]
    pub fn legacy(&self) -> &LegacyContext {
        &self.legacy
    }

    /// Mutable access to the legacy free-form mapping.
    pub fn legacy_mut(&mut self) -> &mut LegacyContext {
        &mut self.legacy
    }

    /// Deep-copies the context stores around a replacement payload.
    ///
    /// The typed and legacy mappings of the copy are independent of this
    /// carrier's; the registry handle is shared (it is read-only after
    /// startup).
    #[must_use]
    pub fn copy_with_payload(&self, payload: P) -> Self {
        Self {
            payload,
            registry: Arc::clone(&self.registry),
            contexts: self.contexts.clone(),
            legacy: self.legacy.clone(),
        }
    }

    /// Serializes all context records plus the legacy mapping into one
    /// JSON document. The payload is never embedded.
    ///
    /// # Errors
    ///
    /// Returns `ImgflowError::Serialization` when a record cannot be
    /// encoded.
    pub fn to_json(&self) -> Result<String, ImgflowError> {
        let mut contexts = serde_json::Map::new();
        for (name, record) in &self.contexts {
            contexts.insert(name.clone(), record.to_value()?);
        }
        let doc = serde_json::json!({
            "contexts": contexts,
            "legacy_context": self.legacy,
        });
        serde_json::to_string(&doc).map_err(|e| ImgflowError::Serialization(e.to_string()))
    }

    /// Reconstructs a carrier from a persisted context document,
    /// reattaching the caller-supplied payload.
    ///
    /// Each tagged record is resolved through `registry` and rebuilt via
    /// its own deserialization + validation path.
    ///
    /// # Errors
    ///
    /// Returns `DeserializationError` for malformed documents,
    /// `UnknownContextError` for unresolvable tags, and `ValidationError`
    /// when a record's parsed fields fail its rule.
    pub fn from_json(
        json: &str,
        payload: P,
        registry: Arc<ContextRegistry>,
    ) -> Result<Self, ImgflowError> {
        let doc: CarrierDocument =
            serde_json::from_str(json).map_err(|e| DeserializationError::new(e.to_string()))?;

        let mut carrier = Self::new(payload, registry);
        carrier.legacy = doc.legacy_context;
        for (name, value) in doc.contexts {
            let record = carrier.registry.decode(&name, value)?;
            carrier.contexts.insert(name, record);
        }
        Ok(carrier)
    }
}

impl<P: Clone> Carrier<P> {
    /// Deep-copies the carrier: context stores are cloned, the payload is
    /// cloned via `P: Clone`.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.copy_with_payload(self.payload.clone())
    }
}

impl<P: Clone> Clone for Carrier<P> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<P> std::fmt::Debug for Carrier<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carrier")
            .field("contexts", &self.context_names())
            .field("legacy_keys", &self.legacy.keys())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use crate::records::{
        register_builtin_contexts, BlurContext, ResolutionCategory, ResolutionContext,
        ResizeContext,
    };
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    fn test_registry() -> Arc<ContextRegistry> {
        let registry = ContextRegistry::new();
        register_builtin_contexts(&registry).unwrap();
        Arc::new(registry)
    }

    fn full_hd() -> ResolutionContext {
        ResolutionContext::from_dimensions(1920, 1080).unwrap()
    }

    #[test]
    fn test_add_and_get_context() {
        let mut carrier = Carrier::new(vec![0_u8; 4], test_registry());
        carrier.add_context(full_hd()).unwrap();

        assert!(carrier.has_context("resolution"));
        let record = carrier.get_context_as::<ResolutionContext>("resolution").unwrap();
        assert_eq!(record.original_width(), 1920);
    }

    #[test]
    fn test_add_context_overwrites_same_name() {
        let mut carrier = Carrier::new((), test_registry());
        carrier.add_context(full_hd()).unwrap();
        carrier
            .add_context(ResolutionContext::from_dimensions(640, 480).unwrap())
            .unwrap();

        let record = carrier.get_context_as::<ResolutionContext>("resolution").unwrap();
        assert_eq!(record.original_width(), 640);
        assert_eq!(carrier.context_names(), vec!["resolution"]);
    }

    #[test]
    fn test_add_unregistered_type_rejected() {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        struct RogueContext {
            value: i64,
        }
        impl ContextRecord for RogueContext {
            fn validate(&self) -> Result<(), ValidationError> {
                Ok(())
            }
        }

        let mut carrier = Carrier::new((), test_registry());
        let result = carrier.add_context(RogueContext { value: 1 });
        let err = result.unwrap_err();
        assert_eq!(err.name, "rogue");
    }

    #[test]
    fn test_get_missing_context_is_none() {
        let carrier = Carrier::new((), test_registry());
        assert!(carrier.get_context("resolution").is_none());
        assert!(carrier.get_context_as::<ResolutionContext>("resolution").is_none());
    }

    #[test]
    fn test_downcast_to_wrong_type_is_none() {
        let mut carrier = Carrier::new((), test_registry());
        carrier.add_context(full_hd()).unwrap();
        assert!(carrier.get_context_as::<BlurContext>("resolution").is_none());
    }

    #[test]
    fn test_remove_context() {
        let mut carrier = Carrier::new((), test_registry());
        carrier.add_context(full_hd()).unwrap();

        assert!(carrier.remove_context("resolution"));
        assert!(!carrier.remove_context("resolution"));
        assert!(!carrier.has_context("resolution"));
    }

    #[test]
    fn test_get_missing_contexts_preserves_order() {
        let mut carrier = Carrier::new((), test_registry());
        carrier
            .add_context(BlurContext::new(true, 2.0).unwrap())
            .unwrap();

        let missing = carrier.get_missing_contexts(&["resolution", "blur", "resize"]);
        assert_eq!(missing, vec!["resolution", "resize"]);
    }

    #[test]
    fn test_log_missing_contexts_emits_warnings() {
        let carrier = Carrier::new((), test_registry());
        let missing = carrier.get_missing_contexts(&["resize", "blur"]);

        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            carrier.log_missing_contexts(&missing, "sharpen");
        });
    }

    #[test]
    fn test_copy_contexts_are_independent() {
        let mut original = Carrier::new(vec![1_u8, 2, 3], test_registry());
        original.add_context(full_hd()).unwrap();
        original.legacy_mut().set("source", serde_json::json!("camera"));

        let mut copy = original.copy();
        copy.add_context(ResolutionContext::from_dimensions(640, 480).unwrap())
            .unwrap();
        copy.legacy_mut().set("source", serde_json::json!("scan"));
        copy.add_context(BlurContext::new(true, 1.0).unwrap()).unwrap();

        let original_res = original
            .get_context_as::<ResolutionContext>("resolution")
            .unwrap();
        assert_eq!(original_res.original_width(), 1920);
        assert!(!original.has_context("blur"));
        assert_eq!(original.legacy().get("source"), Some(&serde_json::json!("camera")));
    }

    #[test]
    fn test_copy_with_payload_swaps_payload() {
        let mut original = Carrier::new(vec![1_u8], test_registry());
        original.add_context(full_hd()).unwrap();

        let copy = original.copy_with_payload(vec![9_u8, 9]);
        assert_eq!(copy.payload(), &vec![9_u8, 9]);
        assert_eq!(original.payload(), &vec![1_u8]);
        assert!(copy.has_context("resolution"));
    }

    #[test]
    fn test_json_round_trip() {
        let registry = test_registry();
        let mut carrier = Carrier::new((), Arc::clone(&registry));
        carrier.add_context(full_hd()).unwrap();
        carrier
            .add_context(
                ResizeContext::new(1920, 1080)
                    .unwrap()
                    .with_target(1280, 720)
                    .unwrap(),
            )
            .unwrap();
        carrier.legacy_mut().set("origin", serde_json::json!("upload"));

        let json = carrier.to_json().unwrap();
        let restored = Carrier::from_json(&json, (), registry).unwrap();

        assert_eq!(restored.context_names(), vec!["resize", "resolution"]);
        let res = restored
            .get_context_as::<ResolutionContext>("resolution")
            .unwrap();
        assert_eq!(res.resolution_category(), ResolutionCategory::FullHd);
        let resize = restored.get_context_as::<ResizeContext>("resize").unwrap();
        assert_eq!(resize.target_width(), Some(1280));
        assert_eq!(restored.legacy().get("origin"), Some(&serde_json::json!("upload")));
    }

    #[test]
    fn test_json_document_shape() {
        let mut carrier = Carrier::new((), test_registry());
        carrier.add_context(BlurContext::new(true, 2.0).unwrap()).unwrap();
        carrier.legacy_mut().set("note", serde_json::json!("x"));

        let value: serde_json::Value = serde_json::from_str(&carrier.to_json().unwrap()).unwrap();
        assert!(value["contexts"]["blur"]["blur_applied"].as_bool().unwrap());
        assert_eq!(value["legacy_context"]["note"], serde_json::json!("x"));
    }

    #[test]
    fn test_from_json_unknown_tag_fails_fast() {
        let registry = test_registry();
        let json = r#"{"contexts": {"sepia": {"strength": 1}}, "legacy_context": {}}"#;
        let result = Carrier::from_json(json, (), registry);
        assert!(matches!(result, Err(ImgflowError::UnknownContext(_))));
    }

    #[test]
    fn test_from_json_malformed_document() {
        let result = Carrier::from_json("{broken", (), test_registry());
        assert!(matches!(result, Err(ImgflowError::Deserialization(_))));
    }

    #[test]
    fn test_from_json_invalid_record_fields() {
        let json = r#"{
            "contexts": {
                "blur": {"blur_applied": true, "blur_radius": -3.0}
            },
            "legacy_context": {}
        }"#;
        let result = Carrier::from_json(json, (), test_registry());
        assert!(matches!(result, Err(ImgflowError::Validation(_))));
    }

    #[test]
    fn test_from_json_missing_members_default_empty() {
        let carrier = Carrier::from_json("{}", (), test_registry()).unwrap();
        assert!(carrier.context_names().is_empty());
        assert!(carrier.legacy().is_empty());
    }

    #[test]
    fn test_legacy_and_typed_stores_not_synchronized() {
        let mut carrier = Carrier::new((), test_registry());
        carrier.add_context(full_hd()).unwrap();

        assert!(carrier.legacy().is_empty());

        carrier.legacy_mut().set("resolution", serde_json::json!("stale"));
        carrier.remove_context("resolution");
        assert_eq!(
            carrier.legacy().get("resolution"),
            Some(&serde_json::json!("stale"))
        );
    }
}
