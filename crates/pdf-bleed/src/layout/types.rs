//! Layout data types for imposition
//!
//! These types carry the inputs and results of the layout planner between
//! option resolution and page composition. All lengths are millimeters.

use crate::types::{PageSpec, PhysicalSize};

/// Everything the planner needs to place copies on one page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRequest {
    /// Physical size of the finished (bled and marked) artwork
    pub image: PhysicalSize,
    pub page: PageSpec,
    /// Number of copies to place (at least 1)
    pub copy_count: usize,
    /// Blank border kept on every side of the page
    pub margin_mm: f32,
    /// Gap between neighbouring copies
    pub spacing_mm: f32,
    /// Length of the cut-mark ticks around each copy
    pub imposition_mark_length_mm: f32,
    pub cut_marks_enabled: bool,
}

/// Grid dimensions chosen for a copy count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub columns: usize,
    pub rows: usize,
}

impl Grid {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    /// Total number of cells
    pub fn cells(&self) -> usize {
        self.columns * self.rows
    }
}

/// Bottom-left corner of one copy on the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x_mm: f32,
    pub y_mm: f32,
}

impl Placement {
    pub fn new(x_mm: f32, y_mm: f32) -> Self {
        Self { x_mm, y_mm }
    }
}

/// Result of the layout planner
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub columns: usize,
    pub rows: usize,
    /// Size of every copy after uniform scaling
    pub scaled_width_mm: f32,
    pub scaled_height_mm: f32,
    /// One entry per copy, row-major from the top row of the page
    pub positions: Vec<Placement>,
}

impl LayoutPlan {
    pub fn grid(&self) -> Grid {
        Grid::new(self.columns, self.rows)
    }
}
