use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Failed to decode image {path}: {reason}")]
    ImageDecode { path: PathBuf, reason: String },
    #[error("Invalid bleed mode '{0}': expected 'repeat' or 'mirror'")]
    InvalidBleedMode(String),
    #[error(
        "Image too small for mirror bleed: bleed of {bleed_size}px needs an image larger than {width}x{height}"
    )]
    ImageTooSmall {
        bleed_size: u32,
        width: u32,
        height: u32,
    },
    #[error("Invalid paper size '{0}'")]
    InvalidPaperSize(String),
    #[error("Invalid orientation '{0}': expected 'portrait' or 'landscape'")]
    InvalidOrientation(String),
    #[error("Invalid mark color '{0}'")]
    InvalidColor(String),
    #[error("Layout cannot fit any copy (scale {0})")]
    ScaleNonPositive(f32),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Normalize a user-supplied name for lookups: lowercase, no separators
fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Paper dimensions as listed in the catalog
    #[default]
    Portrait,
    /// Width and height swapped
    Landscape,
}

impl Orientation {
    /// Name as written in configuration files
    pub fn name(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

impl FromStr for Orientation {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            _ => Err(LayoutError::InvalidOrientation(s.to_string())),
        }
    }
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaperSize {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    B4,
    B5,
    Letter,
    Legal,
    Tabloid,
    Ledger,
    HalfLetter,
    JuniorLegal,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Look up a named paper size (case-insensitive, `-`/`_` ignored)
    pub fn from_name(name: &str) -> Result<Self> {
        let size = match normalize_name(name).as_str() {
            "a0" => PaperSize::A0,
            "a1" => PaperSize::A1,
            "a2" => PaperSize::A2,
            "a3" => PaperSize::A3,
            "a4" => PaperSize::A4,
            "a5" => PaperSize::A5,
            "a6" => PaperSize::A6,
            "b4" => PaperSize::B4,
            "b5" => PaperSize::B5,
            "letter" => PaperSize::Letter,
            "legal" => PaperSize::Legal,
            "tabloid" | "elevenseventeen" => PaperSize::Tabloid,
            "ledger" => PaperSize::Ledger,
            "halfletter" => PaperSize::HalfLetter,
            "juniorlegal" => PaperSize::JuniorLegal,
            _ => return Err(LayoutError::InvalidPaperSize(name.to_string())),
        };
        Ok(size)
    }

    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A0 => (841.0, 1189.0),
            PaperSize::A1 => (594.0, 841.0),
            PaperSize::A2 => (420.0, 594.0),
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::A6 => (105.0, 148.0),
            PaperSize::B4 => (250.0, 353.0),
            PaperSize::B5 => (176.0, 250.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Ledger => (431.8, 279.4),
            PaperSize::HalfLetter => (139.7, 215.9),
            PaperSize::JuniorLegal => (127.0, 203.2),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Page specification with orientation applied
    pub fn page_spec(self, orientation: Orientation) -> PageSpec {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => PageSpec::new(w, h),
            Orientation::Landscape => PageSpec::new(h, w),
        }
    }
}

/// Physical page size after orientation has been applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpec {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
}

impl PageSpec {
    pub fn new(page_width_mm: f32, page_height_mm: f32) -> Self {
        Self {
            page_width_mm,
            page_height_mm,
        }
    }
}

/// How the bleed border is sampled from the source edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BleedMode {
    /// Stretch the outermost row/column of pixels outward
    #[default]
    Repeat,
    /// Reflect a band of the source across each edge
    Mirror,
}

impl BleedMode {
    pub fn name(self) -> &'static str {
        match self {
            BleedMode::Repeat => "repeat",
            BleedMode::Mirror => "mirror",
        }
    }
}

impl FromStr for BleedMode {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "repeat" => Ok(BleedMode::Repeat),
            "mirror" => Ok(BleedMode::Mirror),
            _ => Err(LayoutError::InvalidBleedMode(s.to_string())),
        }
    }
}

/// Stroke color for raster marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkColor {
    /// Photometric inverse of whatever is underneath
    #[default]
    Inverted,
    Fixed([u8; 3]),
}

impl FromStr for MarkColor {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        if let Some(hex) = name.strip_prefix('#') {
            return parse_hex_color(hex)
                .map(MarkColor::Fixed)
                .ok_or_else(|| LayoutError::InvalidColor(s.to_string()));
        }

        let rgb = match name.as_str() {
            "inverted" => return Ok(MarkColor::Inverted),
            "black" => [0, 0, 0],
            "white" => [255, 255, 255],
            "red" => [255, 0, 0],
            "green" => [0, 128, 0],
            "blue" => [0, 0, 255],
            "cyan" => [0, 255, 255],
            "magenta" => [255, 0, 255],
            "yellow" => [255, 255, 0],
            "gray" | "grey" => [128, 128, 128],
            _ => return Err(LayoutError::InvalidColor(s.to_string())),
        };
        Ok(MarkColor::Fixed(rgb))
    }
}

fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Image resolution in pixels per inch (horizontal, vertical)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub x_ppi: f32,
    pub y_ppi: f32,
}

impl Resolution {
    pub fn new(x_ppi: f32, y_ppi: f32) -> Self {
        Self { x_ppi, y_ppi }
    }

    pub fn uniform(ppi: f32) -> Self {
        Self::new(ppi, ppi)
    }
}

/// Real-world size of a raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalSize {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PhysicalSize {
    pub fn new(width_mm: f32, height_mm: f32) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }

    /// Physical size of `width_px` x `height_px` pixels at `resolution`.
    /// Missing or non-positive resolution falls back to 72 ppi per axis.
    pub fn from_pixels(width_px: u32, height_px: u32, resolution: Option<Resolution>) -> Self {
        let usable = |ppi: f32| {
            if ppi > 0.0 {
                ppi
            } else {
                crate::constants::DEFAULT_PPI
            }
        };
        let (x_ppi, y_ppi) = match resolution {
            Some(r) => (usable(r.x_ppi), usable(r.y_ppi)),
            None => (crate::constants::DEFAULT_PPI, crate::constants::DEFAULT_PPI),
        };
        Self {
            width_mm: width_px as f32 / x_ppi * crate::constants::MM_PER_INCH,
            height_mm: height_px as f32 / y_ppi * crate::constants::MM_PER_INCH,
        }
    }
}

/// Statistics about a planned layout
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStatistics {
    /// Copies placed on the page
    pub copies: usize,
    pub columns: usize,
    pub rows: usize,
    /// Grid cells left empty in the last row
    pub empty_cells: usize,
    /// Uniform scale applied to the artwork
    pub scale: f32,
    pub scaled_width_mm: f32,
    pub scaled_height_mm: f32,
    /// Fraction of the page area covered by artwork (0.0..=1.0)
    pub page_coverage: f32,
}
