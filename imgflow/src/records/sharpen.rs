//! Sharpen context record.

use crate::context::ContextRecord;
use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};

/// Context record describing an unsharp-mask pass applied to the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharpenContext {
    sharpen_applied: bool,
    sharpen_radius: f64,
    sharpen_percent: f64,
    sharpen_threshold: f64,
}

impl SharpenContext {
    /// Creates a validated sharpen record.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for negative parameters, or non-positive
    /// parameters on an applied sharpen.
    pub fn new(
        sharpen_applied: bool,
        sharpen_radius: f64,
        sharpen_percent: f64,
        sharpen_threshold: f64,
    ) -> Result<Self, ValidationError> {
        let record = Self {
            sharpen_applied,
            sharpen_radius,
            sharpen_percent,
            sharpen_threshold,
        };
        record.validate()?;
        Ok(record)
    }

    /// True if sharpen has been applied.
    #[must_use]
    pub fn sharpen_applied(&self) -> bool {
        self.sharpen_applied
    }

    /// Radius of the sharpen effect.
    #[must_use]
    pub fn sharpen_radius(&self) -> f64 {
        self.sharpen_radius
    }

    /// Sharpening amount in percent.
    #[must_use]
    pub fn sharpen_percent(&self) -> f64 {
        self.sharpen_percent
    }

    /// Minimum brightness difference for sharpening to apply.
    #[must_use]
    pub fn sharpen_threshold(&self) -> f64 {
        self.sharpen_threshold
    }
}

impl ContextRecord for SharpenContext {
    fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("sharpen_radius", self.sharpen_radius),
            ("sharpen_percent", self.sharpen_percent),
            ("sharpen_threshold", self.sharpen_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::for_field(
                    field,
                    "must be a non-negative number",
                ));
            }
            if self.sharpen_applied && value <= 0.0 {
                return Err(ValidationError::for_field(
                    field,
                    "must be positive when sharpen_applied is true",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_valid() {
        let record = SharpenContext::new(true, 2.0, 150.0, 3.0).unwrap();
        assert!(record.sharpen_applied());
        assert_eq!(record.sharpen_radius(), 2.0);
        assert_eq!(record.sharpen_percent(), 150.0);
        assert_eq!(record.sharpen_threshold(), 3.0);
    }

    #[test]
    fn test_negative_parameter_rejected() {
        let err = SharpenContext::new(false, -1.0, 100.0, 3.0).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("sharpen_radius"));
    }

    #[test]
    fn test_applied_requires_positive_parameters() {
        let err = SharpenContext::new(true, 2.0, 0.0, 3.0).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("sharpen_percent"));

        assert!(SharpenContext::new(false, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let record = SharpenContext::new(true, 1.5, 120.0, 2.0).unwrap();
        let json = record.to_json().unwrap();
        let restored = SharpenContext::from_json(&json).unwrap();
        assert_eq!(restored, record);
    }
}
