// grid.rs - Cell buffer for the automaton

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use rand::Rng;

use crate::boundary::BoundaryMode;
use crate::error::ShapeError;
use crate::point::GridPoint;

pub const DEFAULT_ROWS: usize = 50;
pub const DEFAULT_COLS: usize = 50;

/// A rows x cols buffer of cells, each 0 (dead) or 1 (live), stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl Grid {
    /// An all-dead grid. Panics on a zero dimension.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid must have at least one cell, got {rows}x{cols}");
        Self { rows, cols, cells: vec![0; rows * cols] }
    }

    /// Builds a grid from explicit rows of 0/1 values.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        if cols == 0 {
            return Err(ShapeError::Empty);
        }
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(ShapeError::Ragged { row, expected: cols, found: values.len() });
            }
            if let Some((col, &value)) = values.iter().enumerate().find(|&(_, &v)| v > 1) {
                return Err(ShapeError::InvalidCell { row, col, value });
            }
            cells.extend_from_slice(values);
        }
        Ok(Self { rows: rows.len(), cols, cells })
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Value at an in-range position, `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        (row < self.rows && col < self.cols).then(|| self.cells[row * self.cols + col])
    }

    /// Value at `point` after resolving each axis under `mode`.
    /// Finite-mode coordinates off the edge read as dead.
    pub fn read(&self, point: GridPoint, mode: BoundaryMode) -> u8 {
        match (mode.resolve(point.row, self.rows), mode.resolve(point.col, self.cols)) {
            (Some(row), Some(col)) => self.cells[row * self.cols + col],
            _ => 0,
        }
    }

    /// Direct write to an in-range cell. Panics when out of range.
    pub fn write(&mut self, row: usize, col: usize, value: u8) {
        assert!(value <= 1, "cell value must be 0 or 1, got {value}");
        assert!(row < self.rows && col < self.cols, "({row}, {col}) outside {}x{} grid", self.rows, self.cols);
        self.cells[row * self.cols + col] = value;
    }

    /// Swaps in a whole next generation of the same shape.
    pub fn replace(&mut self, cells: Vec<u8>) {
        assert_eq!(cells.len(), self.rows * self.cols, "replacement buffer has the wrong length");
        self.cells = cells;
    }

    /// Fresh all-dead buffer of the new shape. Old content is discarded.
    pub fn reshape(&mut self, rows: usize, cols: usize) {
        *self = Self::new(rows, cols);
    }

    /// Each cell independently live with probability `live_percent`%.
    pub fn reset_random<R: Rng>(&mut self, live_percent: u8, rng: &mut R) {
        let p = f64::from(live_percent.min(100)) / 100.0;
        for cell in &mut self.cells {
            *cell = u8::from(rng.gen_bool(p));
        }
    }

    pub fn reset_zero(&mut self) {
        self.cells.fill(0);
    }

    /// Flips one cell, returning its new value; `None` if out of range.
    pub fn toggle(&mut self, row: usize, col: usize) -> Option<u8> {
        let value = self.get(row, col)?;
        self.write(row, col, 1 - value);
        Some(1 - value)
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }

    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: Vec<&str> = self.row(row).iter().map(|&c| if c == 1 { "1" } else { "0" }).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
