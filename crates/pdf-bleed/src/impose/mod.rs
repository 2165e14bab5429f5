//! Bleed and imposition pipeline
//!
//! This module orchestrates one run end to end:
//! 1. Resolve options (fails early on bad paper, orientation, mode or color)
//! 2. Load the artwork
//! 3. Add bleed and raster marks
//! 4. Plan the grid and compose the output page
//! 5. Save the PDF

mod io;

pub use io::{SourceImage, decode_image, load_image, read_resolution, save_pdf};

use crate::layout::{LayoutPlan, LayoutRequest, plan_layout};
use crate::marks::{MarkStyle, render_marks};
use crate::options::{LayoutOptions, ResolvedOptions};
use crate::raster::{BleedSpec, bled_dimensions, synthesize_bleed};
use crate::render::{CopyMarks, PdfCanvas, compose};
use crate::stats::calculate_statistics;
use crate::types::*;
use image::RgbImage;
use lopdf::Document;
use std::path::Path;

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct ImpositionSummary {
    pub request: LayoutRequest,
    pub plan: LayoutPlan,
}

impl ImpositionSummary {
    pub fn statistics(&self) -> LayoutStatistics {
        calculate_statistics(&self.request, &self.plan)
    }
}

/// Add the bleed border and raster marks to `source`.
///
/// A zero bleed size returns the source unchanged with no marks.
pub fn prepare_artwork(source: RgbImage, bleed: &BleedSpec, marks: &MarkStyle) -> Result<RgbImage> {
    if bleed.bleed_size == 0 {
        log::debug!("Bleed disabled, using artwork as-is");
        return Ok(source);
    }

    let mut artwork = synthesize_bleed(&source, bleed)?;
    render_marks(&mut artwork, bleed.bleed_size, marks);
    Ok(artwork)
}

/// Layout request for `source` once the bleed border has been added.
///
/// The bled artwork keeps the source resolution.
pub fn layout_request_for(source: &SourceImage, options: &ResolvedOptions) -> Result<LayoutRequest> {
    let (width, height) = bled_dimensions(
        source.raster.width(),
        source.raster.height(),
        options.bleed.bleed_size,
    )?;
    let size = PhysicalSize::from_pixels(width, height, source.resolution);
    Ok(options.layout_request(size))
}

/// Run the raster and layout stages and build the output document
pub fn render_imposition(
    source: SourceImage,
    options: &ResolvedOptions,
) -> Result<(Document, ImpositionSummary)> {
    let request = layout_request_for(&source, options)?;
    let artwork = prepare_artwork(source.raster, &options.bleed, &options.marks)?;

    let plan = plan_layout(&request)?;
    log::info!(
        "Placing {} copies in a {}x{} grid",
        plan.positions.len(),
        plan.columns,
        plan.rows
    );

    let mut canvas = PdfCanvas::new(options.page);
    compose(&mut canvas, &plan, &artwork, &CopyMarks::from(&request))?;

    Ok((canvas.finish(), ImpositionSummary { request, plan }))
}

/// Turn `input` into a one-page imposition PDF at `output`.
///
/// Nothing is written unless every stage succeeds.
pub async fn create_imposition(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &LayoutOptions,
) -> Result<ImpositionSummary> {
    let resolved = options.resolve()?;
    let source = load_image(input).await?;

    let (document, summary) =
        tokio::task::spawn_blocking(move || render_imposition(source, &resolved)).await??;

    save_pdf(document, output).await?;
    Ok(summary)
}
