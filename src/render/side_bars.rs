use super::common::{Cell, Shape, ShapeContext, bar_cell};

/// Two narrow bars hugging the left and right edges of the canvas.
pub(crate) struct SideBars {
    pub(crate) width: u16,
}

impl Shape for SideBars {
    fn paint_cell(&self, ctx: &ShapeContext) -> Cell {
        let on_left = ctx.col < self.width;
        let on_right = ctx.col >= ctx.cols.saturating_sub(self.width);
        if on_left || on_right { bar_cell(ctx) } else { Cell::Empty }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{Phase, Sample};
    use crate::render::Palette;

    #[test]
    fn only_edges_are_painted() {
        let sample = Sample { phase: Phase::Exhale, progress: 0.0 };
        let palette = Palette::default();
        let shape = SideBars { width: 2 };
        let painted: Vec<_> = (0..10)
            .map(|col| {
                shape.paint_cell(&ShapeContext { sample: &sample, palette: &palette, row: 3, rows: 5, col, cols: 10 })
            })
            .map(|cell| cell != Cell::Empty)
            .collect();
        assert_eq!(painted, &[true, true, false, false, false, false, false, false, true, true]);
    }
}
