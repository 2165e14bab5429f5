//! Bleed synthesis
//!
//! Grows a raster by `bleed_size` pixels on every side and fills the new
//! border from the source edges.

use crate::constants::BLEED_BACKGROUND;
use crate::types::{BleedMode, LayoutError, Result};
use image::{Rgb, RgbImage, imageops};

/// Bleed margin and sampling strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BleedSpec {
    /// Margin added on every side, in pixels
    pub bleed_size: u32,
    pub mode: BleedMode,
}

impl BleedSpec {
    pub fn new(bleed_size: u32, mode: BleedMode) -> Self {
        Self { bleed_size, mode }
    }
}

/// Dimensions of a `width` x `height` raster after adding `bleed_size` on
/// every side, or a `Config` error when they do not fit in `u32`.
pub fn bled_dimensions(width: u32, height: u32, bleed_size: u32) -> Result<(u32, u32)> {
    let grow = |side: u32| {
        bleed_size
            .checked_mul(2)
            .and_then(|border| border.checked_add(side))
    };
    match (grow(width), grow(height)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(LayoutError::Config(format!(
            "Bleed of {}px around a {}x{} image exceeds the maximum raster size",
            bleed_size, width, height
        ))),
    }
}

/// Build a new raster of `(w + 2b) x (h + 2b)` with `source` pasted at `(b, b)`
/// and the border filled according to `spec.mode`.
///
/// Mirror bleed leaves the four corner squares at the white background;
/// repeat bleed fills them with the matching corner pixel.
pub fn synthesize_bleed(source: &RgbImage, spec: &BleedSpec) -> Result<RgbImage> {
    let (width, height) = source.dimensions();
    let bleed = spec.bleed_size;

    if spec.mode == BleedMode::Mirror && (bleed >= width || bleed >= height) {
        return Err(LayoutError::ImageTooSmall {
            bleed_size: bleed,
            width,
            height,
        });
    }

    let (bled_width, bled_height) = bled_dimensions(width, height, bleed)?;
    let mut canvas = RgbImage::from_pixel(bled_width, bled_height, Rgb(BLEED_BACKGROUND));
    imageops::replace(&mut canvas, source, bleed as i64, bleed as i64);

    if bleed == 0 || width == 0 || height == 0 {
        return Ok(canvas);
    }

    log::debug!(
        "Synthesizing {:?} bleed of {}px around {}x{} source",
        spec.mode,
        bleed,
        width,
        height
    );

    match spec.mode {
        BleedMode::Repeat => add_repeat_bleed(&mut canvas, source, bleed),
        BleedMode::Mirror => add_mirror_bleed(&mut canvas, source, bleed),
    }

    Ok(canvas)
}

/// Stretch the outermost pixels outward, one ring per iteration
fn add_repeat_bleed(canvas: &mut RgbImage, source: &RgbImage, bleed: u32) {
    let (width, height) = source.dimensions();
    let b = bleed as i64;
    let (w, h) = (width as i64, height as i64);

    let left = imageops::crop_imm(source, 0, 0, 1, height).to_image();
    let right = imageops::crop_imm(source, width - 1, 0, 1, height).to_image();
    let top = imageops::crop_imm(source, 0, 0, width, 1).to_image();
    let bottom = imageops::crop_imm(source, 0, height - 1, width, 1).to_image();

    let corners = [
        // (anchor just outside the source corner, outward direction, corner pixel)
        ((b - 1, b - 1), (-1, -1), *source.get_pixel(0, 0)),
        ((b + w, b - 1), (1, -1), *source.get_pixel(width - 1, 0)),
        ((b - 1, b + h), (-1, 1), *source.get_pixel(0, height - 1)),
        ((b + w, b + h), (1, 1), *source.get_pixel(width - 1, height - 1)),
    ];

    for i in 0..b {
        imageops::replace(canvas, &left, b - i - 1, b);
        imageops::replace(canvas, &right, b + w + i, b);
        imageops::replace(canvas, &top, b, b - i - 1);
        imageops::replace(canvas, &bottom, b, b + h + i);

        for &(anchor, direction, pixel) in &corners {
            fill_corner_ring(canvas, anchor, direction, i, pixel);
        }
    }
}

/// Fill the L-shaped ring at distance `i` from a corner anchor
fn fill_corner_ring(
    canvas: &mut RgbImage,
    (ax, ay): (i64, i64),
    (dx, dy): (i64, i64),
    i: i64,
    pixel: Rgb<u8>,
) {
    for k in 0..=i {
        put_clipped(canvas, ax + dx * i, ay + dy * k, pixel);
        put_clipped(canvas, ax + dx * k, ay + dy * i, pixel);
    }
}

fn put_clipped(canvas: &mut RgbImage, x: i64, y: i64, pixel: Rgb<u8>) {
    if (0..canvas.width() as i64).contains(&x) && (0..canvas.height() as i64).contains(&y) {
        canvas.put_pixel(x as u32, y as u32, pixel);
    }
}

/// Reflect a `bleed`-wide band across each edge; corners are left untouched
fn add_mirror_bleed(canvas: &mut RgbImage, source: &RgbImage, bleed: u32) {
    let (width, height) = source.dimensions();
    let b = bleed as i64;

    let left = imageops::crop_imm(source, 0, 0, bleed, height).to_image();
    let right = imageops::crop_imm(source, width - bleed, 0, bleed, height).to_image();
    let top = imageops::crop_imm(source, 0, 0, width, bleed).to_image();
    let bottom = imageops::crop_imm(source, 0, height - bleed, width, bleed).to_image();

    imageops::replace(canvas, &imageops::flip_horizontal(&left), 0, b);
    imageops::replace(canvas, &imageops::flip_horizontal(&right), width as i64 + b, b);
    imageops::replace(canvas, &imageops::flip_vertical(&top), b, 0);
    imageops::replace(canvas, &imageops::flip_vertical(&bottom), b, height as i64 + b);
}
