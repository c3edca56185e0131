//! Backend-free figure description for the rate-comparison plot.
//!
//! The assembler turns extracted signal bundles into a plain value: a 2x2
//! grid of subplots, each holding styled line series. Rendering to a file
//! is a separate concern (see [`crate::render`]).

use lp_core::CRate;
use lp_sweep::RateBundle;

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const PURPLE: Color = Color::new(148, 103, 189);
pub const CYAN: Color = Color::new(23, 190, 207);
pub const RED: Color = Color::new(214, 39, 40);
pub const GREEN: Color = Color::new(44, 160, 44);
pub const BLUE: Color = Color::new(31, 119, 180);

/// Default palette, ordered to match the study's fastest-to-slowest rates.
pub const DEFAULT_PALETTE: [Color; 5] = [PURPLE, CYAN, RED, GREEN, BLUE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

/// One polyline in a subplot. `label` is `Some` only when the series should
/// appear in the legend.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: Option<String>,
    pub color: Color,
    pub style: LineStyle,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    fn from_signals(
        label: Option<String>,
        color: Color,
        style: LineStyle,
        x: &[f64],
        y: &[f64],
    ) -> Self {
        let points = x.iter().copied().zip(y.iter().copied()).collect();
        Self {
            label,
            color,
            style,
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subplot {
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl Subplot {
    fn new(x_label: &str, y_label: &str) -> Self {
        Self {
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            series: Vec::new(),
        }
    }
}

/// A 2x2 figure, subplots in row-major order: voltage, interfacial current
/// densities, plating capacity loss, intercalated capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureSpec {
    pub subplots: [Subplot; 4],
}

impl FigureSpec {
    pub fn voltage(&self) -> &Subplot {
        &self.subplots[0]
    }

    pub fn current_densities(&self) -> &Subplot {
        &self.subplots[1]
    }

    pub fn plating_loss(&self) -> &Subplot {
        &self.subplots[2]
    }

    pub fn intercalated_capacity(&self) -> &Subplot {
        &self.subplots[3]
    }
}

const TIME_LABEL: &str = "Time [minutes]";

/// Pair each rate with a palette color, in order.
///
/// The association is a single ordered list so legend order, color order,
/// and solve order can never disagree. When the palette is shorter than
/// the rate list the extra rates are dropped from the figure, loudly.
pub fn assign_colors(rates: &[CRate], palette: &[Color]) -> Vec<(CRate, Color)> {
    if rates.len() > palette.len() {
        tracing::warn!(
            rates = rates.len(),
            colors = palette.len(),
            "palette shorter than rate list; excess rates will not be plotted"
        );
    }
    rates
        .iter()
        .cloned()
        .zip(palette.iter().copied())
        .collect()
}

/// Build the comparison figure from one bundle per rate.
///
/// Bundle order is preserved everywhere. The current-density subplot draws
/// three series per rate with fixed styles (deintercalation dashed,
/// stripping dotted, total solid); those styles are labelled once, on the
/// first rate, so the legend stays readable.
pub fn assemble(bundles: &[RateBundle], palette: &[Color]) -> FigureSpec {
    let rates: Vec<CRate> = bundles.iter().map(|b| b.rate.clone()).collect();
    let pairs = assign_colors(&rates, palette);

    let mut voltage = Subplot::new(TIME_LABEL, "Voltage [V]");
    let mut currents = Subplot::new(TIME_LABEL, "Volumetric interfacial current density [A.m-3]");
    let mut loss = Subplot::new(TIME_LABEL, "Plated lithium capacity [Ah]");
    let mut capacity = Subplot::new(TIME_LABEL, "Intercalated lithium capacity [Ah]");

    for (index, ((rate, color), entry)) in pairs.iter().zip(bundles).enumerate() {
        let bundle = &entry.bundle;
        let t = &bundle.time_min;

        voltage.series.push(Series::from_signals(
            Some(rate.label().to_string()),
            *color,
            LineStyle::Solid,
            t,
            &bundle.voltage_v,
        ));

        let first = index == 0;
        currents.series.push(Series::from_signals(
            first.then(|| "Deintercalation current".to_string()),
            *color,
            LineStyle::Dashed,
            t,
            &bundle.deintercalation_a_m3,
        ));
        currents.series.push(Series::from_signals(
            first.then(|| "Stripping current".to_string()),
            *color,
            LineStyle::Dotted,
            t,
            &bundle.stripping_a_m3,
        ));
        currents.series.push(Series::from_signals(
            first.then(|| "Total current".to_string()),
            *color,
            LineStyle::Solid,
            t,
            &bundle.total_a_m3,
        ));

        loss.series.push(Series::from_signals(
            None,
            *color,
            LineStyle::Solid,
            t,
            &bundle.plated_capacity_ah,
        ));
        capacity.series.push(Series::from_signals(
            None,
            *color,
            LineStyle::Solid,
            t,
            &bundle.intercalated_capacity_ah,
        ));
    }

    FigureSpec {
        subplots: [voltage, currents, loss, capacity],
    }
}
