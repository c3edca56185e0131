//! lp-plot: the rate-comparison figure.
//!
//! Split in two layers: [`figure`] builds a backend-free description of the
//! 2x2 grid from extracted signal bundles, and [`render`] draws that
//! description to a PNG via plotters.

pub mod error;
pub mod figure;
pub mod render;

pub use error::{PlotError, PlotResult};
pub use figure::{
    Color, DEFAULT_PALETTE, FigureSpec, LineStyle, Series, Subplot, assemble, assign_colors,
};
pub use render::render_png;
