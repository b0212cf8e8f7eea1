// point.rs - Signed grid coordinates

/// A (row, col) coordinate. Signed so neighbor offsets may step outside the
/// grid before boundary resolution pulls them back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPoint {
    pub row: i32,
    pub col: i32,
}

impl GridPoint {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The point shifted by `(d_row, d_col)`.
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }
}

impl From<(i32, i32)> for GridPoint {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}
