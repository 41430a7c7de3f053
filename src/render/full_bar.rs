use super::common::{Cell, Shape, ShapeContext, bar_cell};

/// A bar spanning the whole width of the canvas.
pub(crate) struct FullBar;

impl Shape for FullBar {
    fn paint_cell(&self, ctx: &ShapeContext) -> Cell {
        bar_cell(ctx)
    }
}
