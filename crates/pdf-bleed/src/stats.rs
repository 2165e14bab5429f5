//! Summary figures for a planned layout

use crate::layout::{LayoutPlan, LayoutRequest};
use crate::types::*;

/// Calculate statistics for a planned layout
pub fn calculate_statistics(request: &LayoutRequest, plan: &LayoutPlan) -> LayoutStatistics {
    let copies = plan.positions.len();
    let empty_cells = plan.grid().cells().saturating_sub(copies);

    let scale = if request.image.width_mm > 0.0 {
        plan.scaled_width_mm / request.image.width_mm
    } else {
        0.0
    };

    let page_area = request.page.page_width_mm * request.page.page_height_mm;
    let artwork_area = copies as f32 * plan.scaled_width_mm * plan.scaled_height_mm;
    let page_coverage = if page_area > 0.0 {
        (artwork_area / page_area).clamp(0.0, 1.0)
    } else {
        0.0
    };

    LayoutStatistics {
        copies,
        columns: plan.columns,
        rows: plan.rows,
        empty_cells,
        scale,
        scaled_width_mm: plan.scaled_width_mm,
        scaled_height_mm: plan.scaled_height_mm,
        page_coverage,
    }
}
