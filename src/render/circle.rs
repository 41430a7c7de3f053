use super::common::{Cell, Shape, ShapeContext, edge_position};

// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// A disc centered on the canvas whose radius grows while inhaling.
pub(crate) struct Circle;

impl Circle {
    fn max_radius(rows: u16, cols: u16) -> f64 {
        (rows as f64 / 2.0).min(cols as f64 / (2.0 * CELL_ASPECT))
    }

    fn distance(ctx: &ShapeContext, y: f64) -> f64 {
        let dx = (ctx.col as f64 + 0.5 - ctx.cols as f64 / 2.0) / CELL_ASPECT;
        let dy = y - ctx.rows as f64 / 2.0;
        dx.hypot(dy)
    }
}

impl Shape for Circle {
    fn paint_cell(&self, ctx: &ShapeContext) -> Cell {
        let max_radius = Self::max_radius(ctx.rows, ctx.cols);
        let radius = max_radius - edge_position(ctx.sample, max_radius);
        if radius <= 0.0 {
            return Cell::Empty;
        }
        let row = ctx.row as f64;
        let center = Self::distance(ctx, row + 0.5);
        let lower = Self::distance(ctx, row + 0.75);
        let (full, distance) = if center <= radius {
            (true, center)
        } else if lower <= radius {
            (false, lower)
        } else {
            return Cell::Empty;
        };
        // The rim is the active edge, the center is the furthest point from it.
        let color = ctx.palette.shade(ctx.sample.phase, 1.0 - distance / radius);
        if full { Cell::Full(color) } else { Cell::LowerHalf(color) }
    }
}
