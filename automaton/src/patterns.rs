// patterns.rs - Named seed shapes for hand-built grids

use crate::grid::Grid;

/// A shape given as (row, col) offsets from its top-left corner.
#[derive(Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

impl Pattern {
    /// Bounding box as (height, width).
    pub fn extent(&self) -> (usize, usize) {
        let height = self.cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(0);
        let width = self.cells.iter().map(|&(_, c)| c + 1).max().unwrap_or(0);
        (height, width)
    }

    /// Clears `grid` and stamps the pattern centred on it.
    /// Cells that do not fit are dropped. Returns how many were placed.
    pub fn apply(&self, grid: &mut Grid) -> usize {
        grid.reset_zero();

        let (height, width) = self.extent();
        let top = grid.rows().saturating_sub(height) / 2;
        let left = grid.cols().saturating_sub(width) / 2;

        let mut placed = 0;
        for &(row, col) in self.cells {
            let (row, col) = (top + row, left + col);
            if row < grid.rows() && col < grid.cols() {
                grid.write(row, col, 1);
                placed += 1;
            }
        }
        placed
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Bottom half (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(1, 1), (1, 2), (0, 2), (2, 1), (2, 0)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (4, 0), (4, 1), (5, 0), (5, 1),
            (4, 10), (5, 10), (6, 10), (3, 11), (7, 11), (2, 12), (8, 12),
            (2, 13), (8, 13), (5, 14), (3, 15), (7, 15), (4, 16), (5, 16),
            (6, 16), (5, 17), (2, 20), (3, 20), (4, 20), (2, 21), (3, 21),
            (4, 21), (1, 22), (5, 22), (0, 24), (1, 24), (5, 24), (6, 24),
            (2, 34), (3, 34), (2, 35), (3, 35),
        ],
    },
];

pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glider_is_centred() {
        let mut grid = Grid::new(10, 10);
        let glider = find("glider").unwrap();
        assert_eq!(glider.apply(&mut grid), 5);
        // 3x3 box starts at (3, 3)
        assert_eq!(grid.get(3, 4), Some(1));
        assert_eq!(grid.get(5, 3), Some(1));
        assert_eq!(grid.live_count(), 5);
    }

    #[test]
    fn apply_clears_previous_content() {
        let mut grid = Grid::new(10, 10);
        grid.write(0, 0, 1);
        find("Blinker").unwrap().apply(&mut grid);
        assert_eq!(grid.get(0, 0), Some(0));
        assert_eq!(grid.live_count(), 3);
    }

    #[test]
    fn oversized_patterns_are_clipped() {
        let gun = find("Gosper Glider Gun").unwrap();
        assert_eq!(gun.extent(), (9, 36));
        let mut grid = Grid::new(10, 10);
        let placed = gun.apply(&mut grid);
        assert!(placed < gun.cells.len());
        assert_eq!(grid.live_count(), placed);
    }

    #[test]
    fn catalogue_has_no_duplicate_cells() {
        for pattern in PATTERNS {
            let mut cells = pattern.cells.to_vec();
            cells.sort_unstable();
            cells.dedup();
            assert_eq!(cells.len(), pattern.cells.len(), "{}", pattern.name);
        }
    }
}
