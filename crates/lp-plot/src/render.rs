//! Plotters-backed PNG rendering of a [`FigureSpec`].

use std::path::Path;

use plotters::prelude::*;

use crate::error::{PlotError, PlotResult};
use crate::figure::{Color as FigColor, FigureSpec, LineStyle, Subplot};

const FIGURE_SIZE: (u32, u32) = (1600, 1200);
const STROKE_WIDTH: u32 = 2;

fn backend_err<E: std::fmt::Display>(err: E) -> PlotError {
    PlotError::Backend {
        message: err.to_string(),
    }
}

fn rgb(color: FigColor) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

/// Axis span over all series in a subplot, padded so lines never sit on
/// the frame. Degenerate or empty data falls back to a unit span.
fn axis_ranges(subplot: &Subplot) -> ((f64, f64), (f64, f64)) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for series in &subplot.series {
        for &(x, y) in &series.points {
            if x.is_finite() {
                x_min = x_min.min(x);
                x_max = x_max.max(x);
            }
            if y.is_finite() {
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }
    }
    let span = |min: f64, max: f64| {
        if !min.is_finite() || !max.is_finite() {
            return (0.0, 1.0);
        }
        let pad = ((max - min) * 0.05).max(1e-9);
        (min - pad, max + pad)
    };
    (span(x_min, x_max), span(y_min, y_max))
}

fn draw_subplot<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    subplot: &Subplot,
) -> PlotResult<()> {
    let ((x_lo, x_hi), (y_lo, y_hi)) = axis_ranges(subplot);

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(backend_err)?;

    chart
        .configure_mesh()
        .x_desc(&subplot.x_label)
        .y_desc(&subplot.y_label)
        .draw()
        .map_err(backend_err)?;

    let mut any_label = false;
    for series in &subplot.series {
        let color = rgb(series.color);
        let style = color.stroke_width(STROKE_WIDTH);
        let points = series.points.clone();
        let annotated = match series.style {
            LineStyle::Solid => chart
                .draw_series(LineSeries::new(points, style))
                .map_err(backend_err)?,
            LineStyle::Dashed => chart
                .draw_series(DashedLineSeries::new(points, 8, 5, style))
                .map_err(backend_err)?,
            LineStyle::Dotted => chart
                .draw_series(DashedLineSeries::new(points, 2, 5, style))
                .map_err(backend_err)?,
        };
        if let Some(label) = &series.label {
            any_label = true;
            annotated.label(label).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(STROKE_WIDTH))
            });
        }
    }

    if any_label {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(backend_err)?;
    }
    Ok(())
}

/// Write the 2x2 comparison figure to a PNG file.
pub fn render_png(figure: &FigureSpec, path: &Path) -> PlotResult<()> {
    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(backend_err)?;

    let panels = root.split_evenly((2, 2));
    if panels.len() != figure.subplots.len() {
        return Err(PlotError::InvalidFigure {
            what: format!("expected 4 panels, got {}", panels.len()),
        });
    }
    for (panel, subplot) in panels.iter().zip(&figure.subplots) {
        draw_subplot(panel, subplot)?;
    }

    root.present().map_err(backend_err)?;
    tracing::info!(path = %path.display(), "wrote comparison figure");
    Ok(())
}
