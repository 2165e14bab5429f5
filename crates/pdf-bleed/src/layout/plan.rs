//! Layout planning
//!
//! Combines the grid search with uniform, aspect-preserving scaling and
//! computes the page position of every copy.

use super::{LayoutPlan, LayoutRequest, Placement, cell_extent, choose_grid};
use crate::types::{LayoutError, Result};

/// Plan the placement of `request.copy_count` copies on the page.
///
/// Positions are bottom-left corners in page coordinates (origin at the
/// page's bottom-left), emitted row-major starting from the top row. Cells
/// beyond `copy_count` in a partially filled last row stay empty.
pub fn plan_layout(request: &LayoutRequest) -> Result<LayoutPlan> {
    if request.copy_count == 0 {
        return Err(LayoutError::Config(
            "Number of copies must be at least 1".to_string(),
        ));
    }

    let grid = choose_grid(request.copy_count);
    let page = &request.page;

    let cell_width = cell_extent(
        page.page_width_mm,
        request.margin_mm,
        request.spacing_mm,
        grid.columns,
    );
    let cell_height = cell_extent(
        page.page_height_mm,
        request.margin_mm,
        request.spacing_mm,
        grid.rows,
    );

    let scale =
        (cell_width / request.image.width_mm).min(cell_height / request.image.height_mm);
    if !scale.is_finite() || scale <= 0.0 {
        return Err(LayoutError::ScaleNonPositive(scale));
    }

    let scaled_width = request.image.width_mm * scale;
    let scaled_height = request.image.height_mm * scale;

    let mut positions = Vec::with_capacity(request.copy_count);
    for row in 0..grid.rows {
        for col in 0..grid.columns {
            if row * grid.columns + col >= request.copy_count {
                break;
            }
            let x = request.margin_mm + col as f32 * (scaled_width + request.spacing_mm);
            let y = page.page_height_mm
                - request.margin_mm
                - (row + 1) as f32 * (scaled_height + request.spacing_mm);
            positions.push(Placement::new(x, y));
        }
    }

    log::debug!(
        "Planned {}x{} grid, scale {:.4}, copy size {:.2}x{:.2}mm",
        grid.columns,
        grid.rows,
        scale,
        scaled_width,
        scaled_height
    );

    Ok(LayoutPlan {
        columns: grid.columns,
        rows: grid.rows,
        scaled_width_mm: scaled_width,
        scaled_height_mm: scaled_height,
        positions,
    })
}
