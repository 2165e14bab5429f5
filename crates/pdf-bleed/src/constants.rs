//! Shared constants for bleed and imposition
//!
//! This module centralizes magic numbers and defaults used throughout
//! the raster and layout stages.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Millimeters per inch
pub const MM_PER_INCH: f32 = 25.4;

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / MM_PER_INCH; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Resolution assumed when the source image carries none
pub const DEFAULT_PPI: f32 = 72.0;

// =============================================================================
// Raster Marks
// =============================================================================

/// Stroke width for crop and cut marks drawn into the raster (pixels)
pub const RASTER_MARK_STROKE: u32 = 2;

/// Default crop mark length (pixels)
pub const DEFAULT_CROP_MARK_LENGTH: u32 = 20;

/// Default cut mark length (pixels)
pub const DEFAULT_CUT_MARK_LENGTH: u32 = 50;

/// Default bleed margin (pixels)
pub const DEFAULT_BLEED_SIZE: u32 = 30;

/// Largest accepted bleed margin (pixels)
pub const MAX_BLEED_SIZE: u32 = 10_000;

// =============================================================================
// Page Marks
// =============================================================================

/// Line width for cut-mark ticks around each copy (points)
pub const CUT_TICK_WIDTH: f32 = 0.25;

/// Default tick length around each copy (mm)
pub const DEFAULT_IMPOSITION_MARK_LENGTH_MM: f32 = 5.0;

/// Background color of a freshly bled raster
pub const BLEED_BACKGROUND: [u8; 3] = [255, 255, 255];
