use super::common::{Cell, Palette, Shape, ShapeContext};
use crate::cycle::Sample;

/// A fully painted canvas, one [Cell] per terminal cell.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FrameBuffer {
    rows: u16,
    cols: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub(crate) fn paint(shape: &dyn Shape, sample: &Sample, palette: &Palette, rows: u16, cols: u16) -> Self {
        let mut cells = Vec::with_capacity(rows as usize * cols as usize);
        for row in 0..rows {
            for col in 0..cols {
                let ctx = ShapeContext { sample, palette, row, rows, col, cols };
                cells.push(shape.paint_cell(&ctx));
            }
        }
        Self { rows, cols, cells }
    }

    pub(crate) fn rows(&self) -> u16 {
        self.rows
    }

    pub(crate) fn cols(&self) -> u16 {
        self.cols
    }

    pub(crate) fn row(&self, row: u16) -> &[Cell] {
        let start = row as usize * self.cols as usize;
        &self.cells[start..start + self.cols as usize]
    }
}
