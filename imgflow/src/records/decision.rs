//! Resolution decision context record.

use crate::context::ContextRecord;
use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};

/// Target resolution preset chosen by a decision operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionPreset {
    /// Keep the original resolution.
    #[serde(rename = "original")]
    Original,
    /// 3840x2160.
    #[serde(rename = "4k")]
    Uhd4k,
    /// 1920x1080.
    #[serde(rename = "full_hd")]
    FullHd,
    /// 1280x720.
    #[serde(rename = "hd")]
    Hd,
    /// 854x480.
    #[serde(rename = "sd")]
    Sd,
}

impl ResolutionPreset {
    /// Target dimensions for the preset, or `None` for `Original`.
    #[must_use]
    pub fn target_dimensions(self) -> Option<(u32, u32)> {
        match self {
            Self::Original => None,
            Self::Uhd4k => Some((3840, 2160)),
            Self::FullHd => Some((1920, 1080)),
            Self::Hd => Some((1280, 720)),
            Self::Sd => Some((854, 480)),
        }
    }
}

/// Context record carrying the resolution preset decided upstream.
///
/// A decision operation stores the preset without touching the payload;
/// a downstream resize operation reads it to pick its target dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionDecisionContext {
    resolution_preset: ResolutionPreset,
}

impl ResolutionDecisionContext {
    /// Creates a decision record for the given preset.
    #[must_use]
    pub fn new(resolution_preset: ResolutionPreset) -> Self {
        Self { resolution_preset }
    }

    /// The decided resolution preset.
    #[must_use]
    pub fn resolution_preset(&self) -> ResolutionPreset {
        self.resolution_preset
    }

    /// Target dimensions for the decided preset, if any.
    #[must_use]
    pub fn target_dimensions(&self) -> Option<(u32, u32)> {
        self.resolution_preset.target_dimensions()
    }

    /// True when the decision keeps the original resolution.
    #[must_use]
    pub fn is_passthrough(&self) -> bool {
        self.resolution_preset == ResolutionPreset::Original
    }
}

impl ContextRecord for ResolutionDecisionContext {
    fn validate(&self) -> Result<(), ValidationError> {
        // The preset enum admits no invalid states.
        Ok(())
    }
}
