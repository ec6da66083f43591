//! sleepline-export: Scene serializers (sans-IO)
//!
//! Converts a composed [`sleepline_chart::Scene`] into output formats:
//! an SVG document and a PNG preview.

pub mod raster;
pub mod svg;

pub use raster::{ExportError, render_pixmap, to_png};
pub use svg::{build_path_data, to_svg};
