//! Page composition
//!
//! The composer only decides what goes where; drawing is delegated to a
//! `DocumentCanvas` so the same plan can target a PDF or a test recorder.

use crate::layout::{LayoutPlan, LayoutRequest};
use crate::marks::{PageSegment, copy_cut_ticks};
use crate::types::Result;
use image::RgbImage;

/// Handle to an image registered with a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageRef(pub usize);

/// Drawing surface for one output page.
///
/// Coordinates are millimeters with the origin at the page's bottom-left.
pub trait DocumentCanvas {
    /// Register an image so it can be drawn any number of times
    fn add_image(&mut self, image: &RgbImage) -> Result<ImageRef>;

    /// Draw a registered image stretched to the given rectangle
    fn draw_image(
        &mut self,
        image: ImageRef,
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
    ) -> Result<()>;

    /// Stroke a straight segment
    fn draw_segment(&mut self, segment: &PageSegment) -> Result<()>;
}

/// Cut-mark ticks drawn around every copy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CopyMarks {
    pub enabled: bool,
    pub length_mm: f32,
}

impl From<&LayoutRequest> for CopyMarks {
    fn from(request: &LayoutRequest) -> Self {
        Self {
            enabled: request.cut_marks_enabled,
            length_mm: request.imposition_mark_length_mm,
        }
    }
}

/// Emit drawing instructions for every copy in `plan`.
///
/// The image is registered once and drawn at each position with the plan's
/// scaled size; when `marks.enabled`, eight corner ticks follow each copy.
pub fn compose<C>(canvas: &mut C, plan: &LayoutPlan, image: &RgbImage, marks: &CopyMarks) -> Result<()>
where
    C: DocumentCanvas + ?Sized,
{
    let image_ref = canvas.add_image(image)?;
    let (width, height) = (plan.scaled_width_mm, plan.scaled_height_mm);

    for position in &plan.positions {
        canvas.draw_image(image_ref, position.x_mm, position.y_mm, width, height)?;

        if marks.enabled {
            let ticks = copy_cut_ticks(position.x_mm, position.y_mm, width, height, marks.length_mm);
            for tick in &ticks {
                canvas.draw_segment(tick)?;
            }
        }
    }

    log::debug!(
        "Composed {} copies (cut marks: {})",
        plan.positions.len(),
        marks.enabled
    );

    Ok(())
}
