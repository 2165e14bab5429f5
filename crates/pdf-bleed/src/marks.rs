//! Printer's marks
//!
//! Two kinds of marks are produced here:
//! - crop and cut marks rasterized into the bled artwork itself
//! - cut-mark ticks drawn on the output page around each placed copy

use crate::constants::{DEFAULT_CROP_MARK_LENGTH, DEFAULT_CUT_MARK_LENGTH, RASTER_MARK_STROKE};
use crate::raster::{Stroke, draw_line};
use crate::types::MarkColor;
use image::RgbImage;

/// Style of the marks drawn into the bled raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkStyle {
    /// Length of each arm of the corner crop marks (pixels)
    pub crop_mark_length: u32,
    /// Length of the edge-midpoint cut marks (pixels)
    pub cut_mark_length: u32,
    pub color: MarkColor,
    /// Stroke width in pixels, center-aligned on the mark
    pub stroke_width: u32,
}

impl Default for MarkStyle {
    fn default() -> Self {
        Self {
            crop_mark_length: DEFAULT_CROP_MARK_LENGTH,
            cut_mark_length: DEFAULT_CUT_MARK_LENGTH,
            color: MarkColor::Inverted,
            stroke_width: RASTER_MARK_STROKE,
        }
    }
}

impl MarkStyle {
    pub fn stroke(&self) -> Stroke {
        Stroke::new(self.stroke_width, self.color)
    }
}

/// A line segment in raster pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSegment {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl PixelSegment {
    const fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// A line segment on the output page, in millimeters from the bottom-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSegment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl PageSegment {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

// =============================================================================
// Raster Marks
// =============================================================================

/// Draw crop marks and cut marks onto a bled raster in place.
///
/// Every segment is a separate rasterizer call, so inverted strokes take a
/// fresh snapshot per segment.
pub fn render_marks(raster: &mut RgbImage, bleed_size: u32, style: &MarkStyle) {
    let segments = raster_mark_segments(raster.width(), raster.height(), bleed_size, style);
    let stroke = style.stroke();

    log::debug!(
        "Rendering {} mark segments on {}x{} raster",
        segments.len(),
        raster.width(),
        raster.height()
    );

    for s in segments {
        draw_line(raster, s.x1, s.y1, s.x2, s.y2, &stroke);
    }
}

/// Geometry of the twelve raster mark segments for a `width` x `height` bled
/// raster: eight crop-mark arms followed by four cut marks.
pub fn raster_mark_segments(
    width: u32,
    height: u32,
    bleed_size: u32,
    style: &MarkStyle,
) -> Vec<PixelSegment> {
    let (w, h) = (width as i64, height as i64);
    let b = bleed_size as i64;
    let crop = style.crop_mark_length as i64;
    let half_cut = style.cut_mark_length as i64 / 2;

    // Corners of the trim rectangle
    let (left, top, right, bottom) = (b, b, w - b, h - b);

    vec![
        // Top-left
        PixelSegment::new(left - crop, top, left, top),
        PixelSegment::new(left, top - crop, left, top),
        // Top-right
        PixelSegment::new(right, top - crop, right, top),
        PixelSegment::new(right, top, right + crop, top),
        // Bottom-left
        PixelSegment::new(left - crop, bottom, left, bottom),
        PixelSegment::new(left, bottom, left, bottom + crop),
        // Bottom-right
        PixelSegment::new(right, bottom, right + crop, bottom),
        PixelSegment::new(right, bottom, right, bottom + crop),
        // Cut marks centered on each edge of the trim rectangle
        PixelSegment::new(w / 2 - half_cut, top, w / 2 + half_cut, top),
        PixelSegment::new(w / 2 - half_cut, bottom, w / 2 + half_cut, bottom),
        PixelSegment::new(left, h / 2 - half_cut, left, h / 2 + half_cut),
        PixelSegment::new(right, h / 2 - half_cut, right, h / 2 + half_cut),
    ]
}

// =============================================================================
// Page Marks
// =============================================================================

/// Eight corner ticks around a copy placed at `(x, y)` with the given size.
///
/// Each corner gets one horizontal and one vertical tick of `length`,
/// running inward along the copy's edges.
pub fn copy_cut_ticks(x: f32, y: f32, width: f32, height: f32, length: f32) -> [PageSegment; 8] {
    let (right, top) = (x + width, y + height);

    [
        // Top-left
        PageSegment::new(x, top, x + length, top),
        PageSegment::new(x, top, x, top - length),
        // Top-right
        PageSegment::new(right, top, right - length, top),
        PageSegment::new(right, top, right, top - length),
        // Bottom-left
        PageSegment::new(x, y, x + length, y),
        PageSegment::new(x, y, x, y + length),
        // Bottom-right
        PageSegment::new(right, y, right - length, y),
        PageSegment::new(right, y, right, y + length),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_mark_style_default() {
        let style = MarkStyle::default();
        assert_eq!(style.crop_mark_length, 20);
        assert_eq!(style.cut_mark_length, 50);
        assert_eq!(style.color, MarkColor::Inverted);
        assert_eq!(style.stroke_width, 2);
    }

    #[test]
    fn test_crop_marks_end_on_trim_corners() {
        let style = MarkStyle::default();
        let segments = raster_mark_segments(160, 120, 30, &style);

        assert_eq!(segments.len(), 12);
        assert_eq!(segments[0], PixelSegment::new(10, 30, 30, 30));
        assert_eq!(segments[1], PixelSegment::new(30, 10, 30, 30));
        assert_eq!(segments[3], PixelSegment::new(130, 30, 150, 30));
        assert_eq!(segments[7], PixelSegment::new(130, 90, 130, 110));
    }

    #[test]
    fn test_cut_marks_centered_on_edges() {
        let style = MarkStyle::default();
        let segments = raster_mark_segments(160, 120, 30, &style);

        assert_eq!(segments[8], PixelSegment::new(55, 30, 105, 30));
        assert_eq!(segments[9], PixelSegment::new(55, 90, 105, 90));
        assert_eq!(segments[10], PixelSegment::new(30, 35, 30, 85));
        assert_eq!(segments[11], PixelSegment::new(130, 35, 130, 85));
    }

    #[test]
    fn test_render_marks_inverts_trim_corner() {
        let mut raster = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
        let style = MarkStyle {
            crop_mark_length: 10,
            cut_mark_length: 20,
            ..Default::default()
        };
        render_marks(&mut raster, 20, &style);

        // Arm of the top-left crop mark, away from the shared corner
        assert_eq!(*raster.get_pixel(12, 20), Rgb([0, 0, 0]));
        // Cut mark on the top trim line
        assert_eq!(*raster.get_pixel(50, 20), Rgb([0, 0, 0]));
        // Center of the artwork is untouched
        assert_eq!(*raster.get_pixel(50, 50), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_render_marks_fixed_color() {
        let mut raster = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
        let style = MarkStyle {
            color: MarkColor::Fixed([255, 0, 0]),
            ..Default::default()
        };
        render_marks(&mut raster, 30, &style);

        assert_eq!(*raster.get_pixel(15, 30), Rgb([255, 0, 0]));
        assert_eq!(*raster.get_pixel(70, 45), Rgb([255, 0, 0]));
    }

    #[test]
    fn test_copy_cut_ticks() {
        let ticks = copy_cut_ticks(10.0, 20.0, 100.0, 50.0, 5.0);

        assert_eq!(ticks[0], PageSegment::new(10.0, 70.0, 15.0, 70.0));
        assert_eq!(ticks[1], PageSegment::new(10.0, 70.0, 10.0, 65.0));
        assert_eq!(ticks[2], PageSegment::new(110.0, 70.0, 105.0, 70.0));
        assert_eq!(ticks[5], PageSegment::new(10.0, 20.0, 10.0, 25.0));
        assert_eq!(ticks[7], PageSegment::new(110.0, 20.0, 110.0, 25.0));
    }
}
