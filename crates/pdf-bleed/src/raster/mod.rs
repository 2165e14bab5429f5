//! Raster stages: bleed synthesis and line drawing
//!
//! All functions here operate on `image::RgbImage` buffers and never touch
//! the filesystem.

mod bleed;
mod line;

pub use bleed::{BleedSpec, bled_dimensions, synthesize_bleed};
pub use line::{Stroke, draw_line};
