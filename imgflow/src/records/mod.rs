//! Built-in context record types.
//!
//! Each record is a fixed serde struct with a fallible constructor, its own
//! validation rule set, and pure derived accessors. The catalogue covers
//! the stock image-processing operations: resolution analysis, resolution
//! decisions, resize, blur, and sharpen.

mod blur;
mod decision;
mod resolution;
mod resize;
mod sharpen;

pub use blur::{BlurContext, BlurIntensity};
pub use decision::{ResolutionDecisionContext, ResolutionPreset};
pub use resolution::{ResolutionCategory, ResolutionContext};
pub use resize::ResizeContext;
pub use sharpen::SharpenContext;

use crate::context::ContextRegistry;
use crate::errors::RegistrationConflictError;

/// Registers every built-in context record with `registry`.
///
/// Intended to run once during startup composition; the global registry
/// arrives with this already applied.
///
/// # Errors
///
/// Returns `RegistrationConflictError` when a built-in name is already
/// bound to a foreign type in `registry`.
pub fn register_builtin_contexts(
    registry: &ContextRegistry,
) -> Result<(), RegistrationConflictError> {
    registry.register::<ResolutionContext>()?;
    registry.register::<ResolutionDecisionContext>()?;
    registry.register::<ResizeContext>()?;
    registry.register::<BlurContext>()?;
    registry.register::<SharpenContext>()?;
    Ok(())
}
