//! Page rendering
//!
//! - `canvas`: the drawing seam and the page composer built on it
//! - `pdf`: a lopdf-backed canvas producing the output document

mod canvas;
mod pdf;

pub use canvas::{CopyMarks, DocumentCanvas, ImageRef, compose};
pub use pdf::PdfCanvas;
