//! Grid layout calculation
//!
//! This module picks the row/column grid for a copy count and computes the
//! cell size available to each copy on the page.

use super::Grid;

// =============================================================================
// Grid Search
// =============================================================================

/// Choose the grid for `copy_count` copies.
///
/// Starts from `floor(sqrt(n))` columns and keeps adding a column while that
/// strictly reduces the row count, stopping at the first step that does not.
/// Ties therefore resolve toward more columns only when rows actually drop.
pub fn choose_grid(copy_count: usize) -> Grid {
    let n = copy_count.max(1);

    let mut columns = n.isqrt();
    let mut rows = n.div_ceil(columns);

    loop {
        let candidate_columns = columns + 1;
        let candidate_rows = n.div_ceil(candidate_columns);
        if candidate_rows < rows {
            log::debug!(
                "Grid search: {}x{} beats {}x{}",
                candidate_columns,
                candidate_rows,
                columns,
                rows
            );
            columns = candidate_columns;
            rows = candidate_rows;
        } else {
            break;
        }
    }

    Grid::new(columns, rows)
}

// =============================================================================
// Cell Calculations
// =============================================================================

/// Size of one cell along an axis: the page axis minus both margins and the
/// gaps between `count` cells, split evenly.
pub fn cell_extent(page_axis_mm: f32, margin_mm: f32, spacing_mm: f32, count: usize) -> f32 {
    let available = page_axis_mm - 2.0 * margin_mm;
    (available - (count as f32 - 1.0) * spacing_mm) / count as f32
}

// =============================================================================
// Tests
// =============================================================================
