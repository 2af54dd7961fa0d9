//! Resize context record.

use crate::context::ContextRecord;
use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};

/// Context record describing resize state and targets.
///
/// Target dimensions are advisory inputs for a resize operation; the
/// resize dimensions record what was actually applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizeContext {
    current_width: u32,
    current_height: u32,
    resized: bool,
    target_width: Option<u32>,
    target_height: Option<u32>,
    resize_width: Option<u32>,
    resize_height: Option<u32>,
}

impl ResizeContext {
    /// Creates a record for an image that has not been resized.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for zero dimensions.
    pub fn new(current_width: u32, current_height: u32) -> Result<Self, ValidationError> {
        let record = Self {
            current_width,
            current_height,
            resized: false,
            target_width: None,
            target_height: None,
            resize_width: None,
            resize_height: None,
        };
        record.validate()?;
        Ok(record)
    }

    /// Returns a new record carrying target dimensions for a resize.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for zero target dimensions.
    pub fn with_target(
        mut self,
        target_width: u32,
        target_height: u32,
    ) -> Result<Self, ValidationError> {
        self.target_width = Some(target_width);
        self.target_height = Some(target_height);
        self.validate()?;
        Ok(self)
    }

    /// Returns a new record marking the resize as applied.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for zero resize dimensions.
    pub fn mark_resized(
        mut self,
        resize_width: u32,
        resize_height: u32,
    ) -> Result<Self, ValidationError> {
        self.resized = true;
        self.resize_width = Some(resize_width);
        self.resize_height = Some(resize_height);
        self.validate()?;
        Ok(self)
    }

    /// Current image width in pixels.
    #[must_use]
    pub fn current_width(&self) -> u32 {
        self.current_width
    }

    /// Current image height in pixels.
    #[must_use]
    pub fn current_height(&self) -> u32 {
        self.current_height
    }

    /// True if the image has been resized.
    #[must_use]
    pub fn resized(&self) -> bool {
        self.resized
    }

    /// Target width for resizing, if set.
    #[must_use]
    pub fn target_width(&self) -> Option<u32> {
        self.target_width
    }

    /// Target height for resizing, if set.
    #[must_use]
    pub fn target_height(&self) -> Option<u32> {
        self.target_height
    }

    /// Actual width after resize, if applied.
    #[must_use]
    pub fn resize_width(&self) -> Option<u32> {
        self.resize_width
    }

    /// Actual height after resize, if applied.
    #[must_use]
    pub fn resize_height(&self) -> Option<u32> {
        self.resize_height
    }

    /// Current width/height ratio.
    #[must_use]
    pub fn current_aspect_ratio(&self) -> f64 {
        f64::from(self.current_width) / f64::from(self.current_height)
    }

    /// Target width/height ratio, if target dimensions are set.
    #[must_use]
    pub fn target_aspect_ratio(&self) -> Option<f64> {
        match (self.target_width, self.target_height) {
            (Some(w), Some(h)) => Some(f64::from(w) / f64::from(h)),
            _ => None,
        }
    }

    /// Resize width/height ratio, if resize dimensions are set.
    #[must_use]
    pub fn resize_aspect_ratio(&self) -> Option<f64> {
        match (self.resize_width, self.resize_height) {
            (Some(w), Some(h)) => Some(f64::from(w) / f64::from(h)),
            _ => None,
        }
    }

    /// True if both target dimensions are set.
    #[must_use]
    pub fn has_target_dimensions(&self) -> bool {
        self.target_width.is_some() && self.target_height.is_some()
    }

    /// Width scale factor of an applied resize.
    #[must_use]
    pub fn scale_factor(&self) -> Option<f64> {
        if !self.resized {
            return None;
        }
        self.resize_width
            .map(|w| f64::from(w) / f64::from(self.current_width))
    }
}

impl ContextRecord for ResizeContext {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.current_width == 0 {
            return Err(ValidationError::for_field(
                "current_width",
                "must be a positive integer",
            ));
        }
        if self.current_height == 0 {
            return Err(ValidationError::for_field(
                "current_height",
                "must be a positive integer",
            ));
        }

        for (field, value) in [
            ("target_width", self.target_width),
            ("target_height", self.target_height),
            ("resize_width", self.resize_width),
            ("resize_height", self.resize_height),
        ] {
            if value == Some(0) {
                return Err(ValidationError::for_field(
                    field,
                    "must be a positive integer when set",
                ));
            }
        }

        if self.resized && (self.resize_width.is_none() || self.resize_height.is_none()) {
            return Err(ValidationError::for_field(
                "resized",
                "resize_width and resize_height must be set when resized is true",
            ));
        }

        Ok(())
    }
}
