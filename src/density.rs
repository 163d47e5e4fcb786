//! Coarse occupancy grid over the canvas.
//!
//! Each cell holds a coverage fraction in `[0, 1]`. Placements add their
//! overlap with a cell (relative to the cell's area) and saturate at 1, so
//! repeated placements in the same region progressively bias pocket
//! selection elsewhere within one layout pass.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::canvas::Canvas;
use crate::geometry::Rect;

/// Fixed-size coverage grid. Rebuilt (or [`reset`](Self::reset)) every pass.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityMap {
    cols: usize,
    rows: usize,
    cell_w: f64,
    cell_h: f64,
    cells: Vec<f64>,
}

impl DensityMap {
    /// Grid of `cols × rows` cells spanning the canvas. Zero counts become 1.
    pub fn new(canvas: Canvas, cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cell_w: canvas.width as f64 / cols as f64,
            cell_h: canvas.height as f64 / rows as f64,
            cells: vec![0.0; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Coverage of the cell at `(col, row)`, or `None` out of range.
    pub fn cell(&self, col: usize, row: usize) -> Option<f64> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    fn cell_rect(&self, col: usize, row: usize) -> Rect {
        Rect::new(
            col as f64 * self.cell_w,
            row as f64 * self.cell_h,
            self.cell_w,
            self.cell_h,
        )
    }

    /// Inclusive cell index ranges touched by `rect`, or `None` if it misses the grid.
    fn cell_span(&self, rect: &Rect) -> Option<((usize, usize), (usize, usize))> {
        if !rect.is_usable() || self.cell_w <= 0.0 || self.cell_h <= 0.0 {
            return None;
        }
        let grid_w = self.cell_w * self.cols as f64;
        let grid_h = self.cell_h * self.rows as f64;
        if rect.right() <= 0.0 || rect.bottom() <= 0.0 || rect.x >= grid_w || rect.y >= grid_h {
            return None;
        }
        let index = |v: f64, size: f64, count: usize| -> usize {
            let i = (v / size).max(0.0) as usize;
            i.min(count - 1)
        };
        let c0 = index(rect.x, self.cell_w, self.cols);
        let c1 = index(rect.right(), self.cell_w, self.cols);
        let r0 = index(rect.y, self.cell_h, self.rows);
        let r1 = index(rect.bottom(), self.cell_h, self.rows);
        Some(((c0, c1), (r0, r1)))
    }

    /// Mean coverage of the cells `rect` overlaps, in `[0, 1]`.
    ///
    /// Returns 0 when `rect` lies outside the grid.
    pub fn sample(&self, rect: &Rect) -> f64 {
        let Some(((c0, c1), (r0, r1))) = self.cell_span(rect) else {
            return 0.0;
        };
        let mut sum = 0.0;
        let mut count = 0usize;
        for row in r0..=r1 {
            for col in c0..=c1 {
                if self.cell_rect(col, row).intersect(rect).is_some() {
                    sum += self.cells[row * self.cols + col];
                    count += 1;
                }
            }
        }
        if count == 0 { 0.0 } else { sum / count as f64 }
    }

    /// Accumulate a placement: each overlapped cell gains
    /// `overlap_area / cell_area`, clamped to 1.
    pub fn apply(&mut self, rect: &Rect) {
        let Some(((c0, c1), (r0, r1))) = self.cell_span(rect) else {
            return;
        };
        let cell_area = self.cell_w * self.cell_h;
        for row in r0..=r1 {
            for col in c0..=c1 {
                let covered = self.cell_rect(col, row).overlap_area(rect);
                if covered > 0.0 {
                    let cell = &mut self.cells[row * self.cols + col];
                    *cell = (*cell + covered / cell_area).min(1.0);
                }
            }
        }
    }

    /// Clear all coverage.
    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = 0.0);
    }
}
