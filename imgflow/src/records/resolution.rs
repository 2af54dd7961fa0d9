//! Resolution context record.

use crate::context::ContextRecord;
use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};

/// Tolerance when checking a stored aspect ratio against the dimensions.
const ASPECT_TOLERANCE: f64 = 0.01;

/// Resolution class of an image, from total pixel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionCategory {
    /// 3840x2160 and above.
    #[serde(rename = "4K")]
    FourK,
    /// 1920x1080 and above.
    #[serde(rename = "Full HD")]
    FullHd,
    /// 1280x720 and above.
    #[serde(rename = "HD")]
    Hd,
    /// Below 1280x720.
    #[serde(rename = "SD")]
    Sd,
}

impl ResolutionCategory {
    /// Classifies dimensions by total pixel count.
    #[must_use]
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        let total = u64::from(width) * u64::from(height);
        if total >= 3840 * 2160 {
            Self::FourK
        } else if total >= 1920 * 1080 {
            Self::FullHd
        } else if total >= 1280 * 720 {
            Self::Hd
        } else {
            Self::Sd
        }
    }
}

impl std::fmt::Display for ResolutionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::FourK => "4K",
            Self::FullHd => "Full HD",
            Self::Hd => "HD",
            Self::Sd => "SD",
        };
        write!(f, "{label}")
    }
}

/// Context record describing an image's original resolution.
///
/// Produced by a resolution-analysis operation; downstream operations read
/// it to choose resize targets without re-inspecting the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionContext {
    original_width: u32,
    original_height: u32,
    resolution_category: ResolutionCategory,
    aspect_ratio: f64,
}

impl ResolutionContext {
    /// Creates a validated resolution record.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for zero dimensions, a non-positive
    /// aspect ratio, or a ratio inconsistent with the dimensions.
    pub fn new(
        original_width: u32,
        original_height: u32,
        resolution_category: ResolutionCategory,
        aspect_ratio: f64,
    ) -> Result<Self, ValidationError> {
        let record = Self {
            original_width,
            original_height,
            resolution_category,
            aspect_ratio,
        };
        record.validate()?;
        Ok(record)
    }

    /// Creates a record from raw dimensions, deriving category and ratio.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for zero dimensions.
    pub fn from_dimensions(width: u32, height: u32) -> Result<Self, ValidationError> {
        if height == 0 {
            return Err(ValidationError::for_field(
                "original_height",
                "must be a positive integer",
            ));
        }
        Self::new(
            width,
            height,
            ResolutionCategory::from_dimensions(width, height),
            f64::from(width) / f64::from(height),
        )
    }

    /// Original image width in pixels.
    #[must_use]
    pub fn original_width(&self) -> u32 {
        self.original_width
    }

    /// Original image height in pixels.
    #[must_use]
    pub fn original_height(&self) -> u32 {
        self.original_height
    }

    /// Resolution category.
    #[must_use]
    pub fn resolution_category(&self) -> ResolutionCategory {
        self.resolution_category
    }

    /// Width/height ratio.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Total number of pixels.
    #[must_use]
    pub fn total_pixels(&self) -> u64 {
        u64::from(self.original_width) * u64::from(self.original_height)
    }

    /// True for 4K images.
    #[must_use]
    pub fn is_4k(&self) -> bool {
        self.resolution_category == ResolutionCategory::FourK
    }

    /// True for HD resolution or better.
    #[must_use]
    pub fn is_hd_or_better(&self) -> bool {
        matches!(
            self.resolution_category,
            ResolutionCategory::FourK | ResolutionCategory::FullHd | ResolutionCategory::Hd
        )
    }

    /// True for landscape orientation.
    #[must_use]
    pub fn is_landscape(&self) -> bool {
        self.aspect_ratio > 1.0
    }

    /// True for portrait orientation.
    #[must_use]
    pub fn is_portrait(&self) -> bool {
        self.aspect_ratio < 1.0
    }

    /// True for square images, within tolerance.
    #[must_use]
    pub fn is_square(&self) -> bool {
        (self.aspect_ratio - 1.0).abs() < ASPECT_TOLERANCE
    }
}

impl ContextRecord for ResolutionContext {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.original_width == 0 {
            return Err(ValidationError::for_field(
                "original_width",
                "must be a positive integer",
            ));
        }
        if self.original_height == 0 {
            return Err(ValidationError::for_field(
                "original_height",
                "must be a positive integer",
            ));
        }
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(ValidationError::for_field(
                "aspect_ratio",
                "must be a positive number",
            ));
        }

        let calculated = f64::from(self.original_width) / f64::from(self.original_height);
        if (calculated - self.aspect_ratio).abs() > ASPECT_TOLERANCE {
            return Err(ValidationError::for_field(
                "aspect_ratio",
                format!(
                    "{} does not match dimensions {}x{}",
                    self.aspect_ratio, self.original_width, self.original_height
                ),
            ));
        }

        Ok(())
    }
}
