// metrics.rs - Cell layout shared by drawing and click detection

/// Square cells fitted into the available canvas and centred in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub rows: usize,
    pub cols: usize,
    pub cell_size: f32,
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl GridMetrics {
    pub fn calculate(rows: usize, cols: usize, available_width: f32, available_height: f32) -> Self {
        let side = available_width.min(available_height);
        let cell_size = (side / cols as f32).min(side / rows as f32);
        let width = cell_size * cols as f32;
        let height = cell_size * rows as f32;
        Self {
            rows,
            cols,
            cell_size,
            width,
            height,
            offset_x: (available_width - width) / 2.0,
            offset_y: (available_height - height) / 2.0,
        }
    }

    /// Top-left corner of a cell, relative to the canvas origin.
    pub fn cell_origin(&self, row: usize, col: usize) -> (f32, f32) {
        (
            self.offset_x + col as f32 * self.cell_size,
            self.offset_y + row as f32 * self.cell_size,
        )
    }

    /// The (row, col) under a canvas-relative position, if any.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let (gx, gy) = (x - self.offset_x, y - self.offset_y);
        if gx < 0.0 || gy < 0.0 || gx >= self.width || gy >= self.height {
            return None;
        }
        let row = (gy / self.cell_size) as usize;
        let col = (gx / self.cell_size) as usize;
        (row < self.rows && col < self.cols).then_some((row, col))
    }
}
