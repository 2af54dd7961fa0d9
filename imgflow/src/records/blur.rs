//! Blur context record.

use crate::context::ContextRecord;
use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};

/// Intensity band of an applied blur, by radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlurIntensity {
    /// No blur applied.
    None,
    /// Radius up to 2.
    Light,
    /// Radius above 2, up to 5.
    Medium,
    /// Radius above 5.
    Heavy,
}

impl std::fmt::Display for BlurIntensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::None => "none",
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
        };
        write!(f, "{label}")
    }
}

/// Context record describing a blur applied to the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlurContext {
    blur_applied: bool,
    blur_radius: f64,
}

impl BlurContext {
    /// Creates a validated blur record.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a negative radius, or a non-positive
    /// radius on an applied blur.
    pub fn new(blur_applied: bool, blur_radius: f64) -> Result<Self, ValidationError> {
        let record = Self {
            blur_applied,
            blur_radius,
        };
        record.validate()?;
        Ok(record)
    }

    /// True if blur has been applied.
    #[must_use]
    pub fn blur_applied(&self) -> bool {
        self.blur_applied
    }

    /// Radius of the blur effect.
    #[must_use]
    pub fn blur_radius(&self) -> f64 {
        self.blur_radius
    }

    /// True for a light blur (radius up to 2).
    #[must_use]
    pub fn is_light_blur(&self) -> bool {
        self.blur_applied && self.blur_radius <= 2.0
    }

    /// True for a medium blur (radius above 2, up to 5).
    #[must_use]
    pub fn is_medium_blur(&self) -> bool {
        self.blur_applied && self.blur_radius > 2.0 && self.blur_radius <= 5.0
    }

    /// True for a heavy blur (radius above 5).
    #[must_use]
    pub fn is_heavy_blur(&self) -> bool {
        self.blur_applied && self.blur_radius > 5.0
    }

    /// Intensity band for the applied blur.
    #[must_use]
    pub fn intensity(&self) -> BlurIntensity {
        if !self.blur_applied {
            BlurIntensity::None
        } else if self.is_light_blur() {
            BlurIntensity::Light
        } else if self.is_medium_blur() {
            BlurIntensity::Medium
        } else {
            BlurIntensity::Heavy
        }
    }
}

impl ContextRecord for BlurContext {
    fn validate(&self) -> Result<(), ValidationError> {
        if !self.blur_radius.is_finite() || self.blur_radius < 0.0 {
            return Err(ValidationError::for_field(
                "blur_radius",
                "must be a non-negative number",
            ));
        }
        if self.blur_applied && self.blur_radius <= 0.0 {
            return Err(ValidationError::for_field(
                "blur_radius",
                "must be positive when blur_applied is true",
            ));
        }
        Ok(())
    }
}
