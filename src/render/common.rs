use super::color::Color;
use crate::cycle::{Phase, Sample};
use serde::Deserialize;

/// Where the active edge of a shape sits, measured from the top of a `max` long axis.
///
/// Both phases ease with the same rising sine; an inhale maps it to an edge moving from `max`
/// towards 0, an exhale to an edge moving from 0 towards `max`. The resulting curves are not
/// mirror images of each other.
pub(crate) fn edge_position(sample: &Sample, max: f64) -> f64 {
    match sample.phase {
        Phase::Inhale => max - sample.progress * max,
        Phase::Exhale => sample.progress * max,
        Phase::PostInhaleHold => 0.0,
        Phase::PostExhaleHold => max,
    }
}

/// How a shape is filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub(crate) enum FillStyle {
    /// A single color per phase.
    #[default]
    Constant,

    /// Full color at the active edge, fading into the backdrop away from it.
    Gradient,
}

/// Colors used to draw a shape.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Palette {
    pub(crate) inhale: Color,
    pub(crate) exhale: Color,

    /// The color behind the shape. `None` keeps the terminal's own background.
    pub(crate) backdrop: Option<Color>,

    /// Between 0 (invisible) and 1 (opaque).
    pub(crate) opacity: f64,
    pub(crate) fill: FillStyle,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            inhale: Color::new(255, 0, 0),
            exhale: Color::new(0, 0, 255),
            backdrop: None,
            opacity: 1.0,
            fill: FillStyle::Constant,
        }
    }
}

impl Palette {
    /// The color of a shape during `phase`, `depth` being 0 at the active edge and 1 as far away
    /// from it as the shape reaches.
    pub(crate) fn shade(&self, phase: Phase, depth: f64) -> Color {
        let base = match phase {
            Phase::Inhale | Phase::PostInhaleHold => self.inhale,
            Phase::Exhale | Phase::PostExhaleHold => self.exhale,
        };
        let backdrop = self.backdrop.unwrap_or(Color::BLACK);
        let color = match self.fill {
            FillStyle::Constant => base,
            FillStyle::Gradient => base.lerp(backdrop, depth),
        };
        backdrop.lerp(color, self.opacity)
    }
}

/// What a single terminal cell shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cell {
    Empty,
    Full(Color),
    LowerHalf(Color),
}

/// Everything a shape needs to paint one cell.
#[derive(Clone, Debug)]
pub(crate) struct ShapeContext<'a> {
    pub(crate) sample: &'a Sample,
    pub(crate) palette: &'a Palette,
    pub(crate) row: u16,
    pub(crate) rows: u16,
    pub(crate) col: u16,
    pub(crate) cols: u16,
}

/// A way of turning a sample into a picture.
pub(crate) trait Shape {
    fn paint_cell(&self, ctx: &ShapeContext) -> Cell;
}

/// A cell of a bar filled from the active edge down to the bottom of the canvas.
pub(crate) fn bar_cell(ctx: &ShapeContext) -> Cell {
    let rows = ctx.rows as f64;
    let row = ctx.row as f64;
    let edge = edge_position(ctx.sample, rows);
    let coverage = (row + 1.0 - edge.max(row)).clamp(0.0, 1.0);
    let depth = if edge < rows { ((row + 0.5 - edge) / (rows - edge)).clamp(0.0, 1.0) } else { 0.0 };
    let color = ctx.palette.shade(ctx.sample.phase, depth);
    if coverage >= 0.75 {
        Cell::Full(color)
    } else if coverage >= 0.25 {
        Cell::LowerHalf(color)
    } else {
        Cell::Empty
    }
}
