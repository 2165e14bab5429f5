//! Layout calculation modules for imposition
//!
//! This module handles all the geometric calculations for placing copies:
//! - Grid search (how many columns and rows)
//! - Cell sizing (margins and spacing)
//! - Uniform scaling and per-copy placement

mod grid;
mod plan;
mod types;

pub use grid::*;
pub use plan::*;
pub use types::*;
