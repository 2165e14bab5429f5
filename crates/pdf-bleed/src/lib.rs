pub mod constants;
pub mod impose;
pub mod layout;
pub mod marks;
mod options;
pub mod raster;
pub mod render;
mod stats;
mod types;

pub use impose::{
    ImpositionSummary, SourceImage, create_imposition, layout_request_for, load_image,
    prepare_artwork, render_imposition, save_pdf,
};
pub use layout::{LayoutPlan, LayoutRequest, plan_layout};
pub use marks::{MarkStyle, render_marks};
pub use options::*;
pub use raster::{BleedSpec, bled_dimensions, synthesize_bleed};
pub use stats::calculate_statistics;
pub use types::*;
