// boundary.rs - Edge handling for out-of-range coordinates

use std::fmt;

/// How coordinates beyond the grid edge are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoundaryMode {
    /// Everything outside the grid is dead.
    #[default]
    Finite,
    /// Edges wrap around in both directions.
    Toroidal,
}

impl BoundaryMode {
    pub const ALL: [BoundaryMode; 2] = [BoundaryMode::Finite, BoundaryMode::Toroidal];

    pub fn display_name(self) -> &'static str {
        match self {
            BoundaryMode::Finite   => "Finite",
            BoundaryMode::Toroidal => "Infinite",
        }
    }

    /// Resolves one axis of a coordinate against `extent`.
    ///
    /// `None` means the coordinate contributes nothing (finite mode, off the
    /// edge). Toroidal mode wraps exactly once, so `coordinate` must lie in
    /// `-extent..2 * extent`; neighborhood radii are far smaller than the
    /// minimum grid size, which keeps every caller inside that window.
    pub fn resolve(self, coordinate: i32, extent: usize) -> Option<usize> {
        let extent = extent as i32;
        if (0..extent).contains(&coordinate) {
            return Some(coordinate as usize);
        }
        match self {
            BoundaryMode::Finite => None,
            BoundaryMode::Toroidal => {
                debug_assert!(
                    coordinate >= -extent && coordinate < 2 * extent,
                    "coordinate {coordinate} is more than one wrap outside extent {extent}"
                );
                let wrapped = if coordinate < 0 { extent + coordinate } else { coordinate - extent };
                Some(wrapped as usize)
            }
        }
    }
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_is_unchanged_in_both_modes() {
        for mode in BoundaryMode::ALL {
            assert_eq!(mode.resolve(0, 10), Some(0));
            assert_eq!(mode.resolve(9, 10), Some(9));
        }
    }

    #[test]
    fn finite_drops_out_of_range() {
        assert_eq!(BoundaryMode::Finite.resolve(-1, 10), None);
        assert_eq!(BoundaryMode::Finite.resolve(10, 10), None);
        assert_eq!(BoundaryMode::Finite.resolve(-2, 10), None);
    }

    #[test]
    fn toroidal_wraps_once() {
        assert_eq!(BoundaryMode::Toroidal.resolve(-1, 10), Some(9));
        assert_eq!(BoundaryMode::Toroidal.resolve(-2, 10), Some(8));
        assert_eq!(BoundaryMode::Toroidal.resolve(10, 10), Some(0));
        assert_eq!(BoundaryMode::Toroidal.resolve(11, 10), Some(1));
    }
}
