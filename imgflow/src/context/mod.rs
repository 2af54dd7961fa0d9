//! Context records, the name registry, and the legacy mapping.
//!
//! This module provides:
//! - Typed, validated, serializable context records
//! - The process-wide name to record-type registry
//! - The unstructured legacy mapping kept for backward compatibility

mod legacy;
mod record;
mod registry;

pub use legacy::LegacyContext;
pub use record::{derive_context_name, ContextRecord, ErasedContextRecord};
pub use registry::{global_registry, ContextRegistry, RegisteredContext};
