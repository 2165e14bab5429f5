//! Image and document I/O

use crate::constants::MM_PER_INCH;
use crate::types::*;
use image::RgbImage;
use lopdf::Document;
use std::io::Cursor;
use std::path::Path;

/// Decoded artwork plus whatever resolution metadata it carried
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub raster: RgbImage,
    pub resolution: Option<Resolution>,
}

impl SourceImage {
    pub fn new(raster: RgbImage, resolution: Option<Resolution>) -> Self {
        Self { raster, resolution }
    }

    /// Physical size of the raster, 72 ppi when no resolution is known
    pub fn physical_size(&self) -> PhysicalSize {
        PhysicalSize::from_pixels(self.raster.width(), self.raster.height(), self.resolution)
    }
}

/// Load an image file and convert it to 8-bit RGB
pub async fn load_image(path: impl AsRef<Path>) -> Result<SourceImage> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await.map_err(|e| LayoutError::ImageDecode {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let source = tokio::task::spawn_blocking(move || decode_image(&path, &bytes)).await??;
    Ok(source)
}

/// Decode an in-memory image; `path` is only used for error reporting
pub fn decode_image(path: &Path, bytes: &[u8]) -> Result<SourceImage> {
    let decoded = image::load_from_memory(bytes).map_err(|e| LayoutError::ImageDecode {
        path: path.to_owned(),
        reason: e.to_string(),
    })?;
    let raster = decoded.to_rgb8();
    let resolution = read_resolution(bytes);

    match resolution {
        Some(r) => log::info!(
            "Loaded {} ({}x{} px, {:.0}x{:.0} ppi)",
            path.display(),
            raster.width(),
            raster.height(),
            r.x_ppi,
            r.y_ppi
        ),
        None => {
            log::info!(
                "Loaded {} ({}x{} px)",
                path.display(),
                raster.width(),
                raster.height()
            );
            log::warn!("{} has no resolution metadata, assuming 72 ppi", path.display());
        }
    }

    Ok(SourceImage::new(raster, resolution))
}

// =============================================================================
// Resolution Metadata
// =============================================================================

/// Resolution stored in the file header, if any
pub fn read_resolution(bytes: &[u8]) -> Option<Resolution> {
    match image::guess_format(bytes).ok()? {
        image::ImageFormat::Png => png_resolution(bytes),
        image::ImageFormat::Jpeg => jfif_resolution(bytes),
        _ => None,
    }
}

fn png_resolution(bytes: &[u8]) -> Option<Resolution> {
    let reader = png::Decoder::new(Cursor::new(bytes)).read_info().ok()?;
    let dims = reader.info().pixel_dims?;
    match dims.unit {
        png::Unit::Meter => Some(Resolution::new(
            dims.xppu as f32 * MM_PER_INCH / 1000.0,
            dims.yppu as f32 * MM_PER_INCH / 1000.0,
        )),
        // Aspect ratio only
        png::Unit::Unspecified => None,
    }
}

/// Density from the JFIF APP0 segment
fn jfif_resolution(bytes: &[u8]) -> Option<Resolution> {
    if bytes.get(0..2)? != [0xFF, 0xD8] {
        return None;
    }

    let mut pos = 2;
    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            log::debug!("JPEG header: expected marker at offset {}, giving up", pos);
            return None;
        }
        let marker = bytes[pos + 1];
        // Start of scan: no more header segments
        if marker == 0xDA {
            log::debug!("JPEG header: no JFIF density before start of scan");
            return None;
        }
        let len = u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]) as usize;
        let Some(segment) = bytes.get(pos + 4..pos + 2 + len) else {
            log::debug!(
                "JPEG header: segment {:#04x} at offset {} overruns the file",
                marker,
                pos
            );
            return None;
        };

        if marker == 0xE0 && segment.len() >= 12 && segment.starts_with(b"JFIF\0") {
            let units = segment[7];
            let x = u16::from_be_bytes([segment[8], segment[9]]) as f32;
            let y = u16::from_be_bytes([segment[10], segment[11]]) as f32;
            return match units {
                1 => Some(Resolution::new(x, y)),
                2 => Some(Resolution::new(x * 2.54, y * 2.54)),
                _ => {
                    log::debug!("JFIF density carries aspect ratio only ({}:{})", x, y);
                    None
                }
            };
        }

        pos += 2 + len;
    }

    None
}

// =============================================================================
// Output
// =============================================================================

/// Compress and save the finished document
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        doc.compress();
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, LayoutError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    log::info!("Saved {}", path.display());
    Ok(())
}
