mod circle;
mod color;
mod common;
mod frame;
mod full_bar;
mod side_bars;

pub(crate) use color::Color;
pub(crate) use common::{Cell, FillStyle, Palette, Shape};
pub(crate) use frame::FrameBuffer;

use serde::Deserialize;

/// The shapes a breathing cycle can be drawn as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum ShapeStyle {
    /// Narrow bars on the left and right edges.
    #[default]
    SideBars,

    /// A single bar as wide as the terminal.
    FullBar,

    /// A pulsing disc in the middle of the terminal.
    Circle,
}

/// Get the shape implementation for a given style
pub(crate) fn get_shape(style: ShapeStyle, side_width: u16) -> Box<dyn Shape> {
    match style {
        ShapeStyle::SideBars => Box::new(side_bars::SideBars { width: side_width }),
        ShapeStyle::FullBar => Box::new(full_bar::FullBar),
        ShapeStyle::Circle => Box::new(circle::Circle),
    }
}

/// Errors that can occur while drawing.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
