//! # Imgflow
//!
//! Typed, self-describing metadata ("context") for image processing
//! pipelines, and the registry/dispatch machinery that lets operations
//! discover, validate, and serialize that metadata.
//!
//! Imgflow provides:
//!
//! - **Context records**: typed, validated, serializable metadata values
//! - **Name registry**: process-wide binding from canonical names to record types
//! - **Carrier**: pairs an opaque payload with its context records, with
//!   copy-on-write discipline across pipeline stages
//! - **Missing-context advisory**: non-fatal diagnostics suggesting which
//!   operation produces an absent context
//!
//! ## Quick Start
//!
//! ```rust
//! use imgflow::prelude::*;
//!
//! # fn main() -> Result<(), ImgflowError> {
//! // One carrier per pipeline entry point; stages copy, never mutate.
//! let mut carrier = Carrier::with_default_registry(vec![0_u8; 16]);
//! carrier.add_context(ResolutionContext::from_dimensions(1920, 1080)?)?;
//!
//! let resolution = carrier
//!     .get_context_as::<ResolutionContext>("resolution")
//!     .ok_or_else(|| UnknownContextError::new("resolution"))?;
//! assert_eq!(resolution.resolution_category(), ResolutionCategory::FullHd);
//!
//! // Contexts survive a JSON round-trip; the payload is reattached.
//! let json = carrier.to_json()?;
//! let restored = Carrier::from_json(&json, vec![0_u8; 16], global_registry())?;
//! assert!(restored.has_context("resolution"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod advisor;
pub mod carrier;
pub mod context;
pub mod errors;
pub mod operation;
pub mod records;


/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::advisor::MissingContextAdvisor;
    pub use crate::carrier::Carrier;
    pub use crate::context::{
        derive_context_name, global_registry, ContextRecord, ContextRegistry,
        ErasedContextRecord, LegacyContext, RegisteredContext,
    };
    pub use crate::errors::{
        DeserializationError, ImgflowError, RegistrationConflictError, UnknownContextError,
        ValidationError,
    };
    pub use crate::operation::{FnOperation, Operation};
    pub use crate::records::{
        register_builtin_contexts, BlurContext, BlurIntensity, ResolutionCategory,
        ResolutionContext, ResolutionDecisionContext, ResolutionPreset, ResizeContext,
        SharpenContext,
    };
}
