//! Layout configuration
//!
//! `LayoutOptions` is the on-disk form with textual names; `resolve` turns it
//! into the typed `ResolvedOptions` the pipeline runs on.

use crate::constants::*;
use crate::layout::LayoutRequest;
use crate::marks::MarkStyle;
use crate::raster::BleedSpec;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "layout.json";

/// Complete bleed and imposition configuration as stored on disk
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutOptions {
    pub bleed: BleedOptions,
    pub imposition: ImpositionOptions,
}

/// Bleed border and raster marks. Lengths are pixels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BleedOptions {
    /// Width of the bleed border; 0 disables bleed and raster marks
    pub bleed_size: u32,
    pub crop_mark_length: u32,
    /// "inverted", a color name or "#rrggbb"
    pub crop_mark_color: String,
    /// "repeat" or "mirror"
    pub bleed_mode: String,
    pub cut_mark_length: u32,
    pub stroke_width: u32,
}

impl Default for BleedOptions {
    fn default() -> Self {
        Self {
            bleed_size: DEFAULT_BLEED_SIZE,
            crop_mark_length: DEFAULT_CROP_MARK_LENGTH,
            crop_mark_color: "inverted".to_string(),
            bleed_mode: "repeat".to_string(),
            cut_mark_length: DEFAULT_CUT_MARK_LENGTH,
            stroke_width: RASTER_MARK_STROKE,
        }
    }
}

/// Output page and copy placement. Lengths are millimeters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpositionOptions {
    pub paper_size: String,
    pub orientation: String,
    pub num_copies: usize,
    pub cut_marks: bool,
    pub margin: f32,
    pub spacing: f32,
    pub imposition_mark_length: f32,
}

impl Default for ImpositionOptions {
    fn default() -> Self {
        Self {
            paper_size: "letter".to_string(),
            orientation: "portrait".to_string(),
            num_copies: 4,
            cut_marks: true,
            margin: 1.0,
            spacing: 0.0,
            imposition_mark_length: DEFAULT_IMPOSITION_MARK_LENGTH_MM,
        }
    }
}

impl LayoutOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| LayoutError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LayoutError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate numeric ranges
    pub fn validate(&self) -> Result<()> {
        let imposition = &self.imposition;

        if imposition.num_copies == 0 {
            return Err(LayoutError::Config(
                "Number of copies must be at least 1".to_string(),
            ));
        }

        // Negative margin or spacing is allowed; the planner decides
        // whether the copies still fit
        for (name, value) in [("margin", imposition.margin), ("spacing", imposition.spacing)] {
            if !value.is_finite() {
                return Err(LayoutError::Config(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }

        let mark_length = imposition.imposition_mark_length;
        if !mark_length.is_finite() || mark_length < 0.0 {
            return Err(LayoutError::Config(format!(
                "imposition_mark_length must be a non-negative number, got {}",
                mark_length
            )));
        }

        if self.bleed.bleed_size > MAX_BLEED_SIZE {
            return Err(LayoutError::Config(format!(
                "Bleed size of {}px exceeds the maximum of {}px",
                self.bleed.bleed_size, MAX_BLEED_SIZE
            )));
        }

        if self.bleed.bleed_size > 0 && self.bleed.stroke_width == 0 {
            return Err(LayoutError::Config(
                "Mark stroke width must be at least 1 pixel".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate and parse every textual setting into typed values.
    ///
    /// Paper size, orientation, bleed mode and mark color all fail here,
    /// before any image is touched.
    pub fn resolve(&self) -> Result<ResolvedOptions> {
        self.validate()?;

        let paper = PaperSize::from_name(&self.imposition.paper_size)?;
        let orientation: Orientation = self.imposition.orientation.parse()?;
        let mode: BleedMode = self.bleed.bleed_mode.parse()?;
        let color: MarkColor = self.bleed.crop_mark_color.parse()?;

        Ok(ResolvedOptions {
            bleed: BleedSpec::new(self.bleed.bleed_size, mode),
            marks: MarkStyle {
                crop_mark_length: self.bleed.crop_mark_length,
                cut_mark_length: self.bleed.cut_mark_length,
                color,
                stroke_width: self.bleed.stroke_width,
            },
            page: paper.page_spec(orientation),
            copy_count: self.imposition.num_copies,
            margin_mm: self.imposition.margin,
            spacing_mm: self.imposition.spacing,
            imposition_mark_length_mm: self.imposition.imposition_mark_length,
            cut_marks_enabled: self.imposition.cut_marks,
        })
    }
}

/// Typed settings ready for the raster and layout stages
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub bleed: BleedSpec,
    pub marks: MarkStyle,
    pub page: PageSpec,
    pub copy_count: usize,
    pub margin_mm: f32,
    pub spacing_mm: f32,
    pub imposition_mark_length_mm: f32,
    pub cut_marks_enabled: bool,
}

impl ResolvedOptions {
    /// Layout request for artwork of the given physical size
    pub fn layout_request(&self, image: PhysicalSize) -> LayoutRequest {
        LayoutRequest {
            image,
            page: self.page,
            copy_count: self.copy_count,
            margin_mm: self.margin_mm,
            spacing_mm: self.spacing_mm,
            imposition_mark_length_mm: self.imposition_mark_length_mm,
            cut_marks_enabled: self.cut_marks_enabled,
        }
    }
}
