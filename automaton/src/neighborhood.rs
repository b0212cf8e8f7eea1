// neighborhood.rs - Neighborhood shapes and their birth/survival rules

use std::fmt;

use crate::point::GridPoint;

/// Birth/survival thresholds attached to a neighborhood shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule {
    /// A live cell survives with `survive_min..=survive_max` live neighbors.
    pub survive_min: usize,
    pub survive_max: usize,
    /// A dead cell is born with exactly this many live neighbors.
    pub birth: usize,
}

impl Rule {
    /// Next state of a cell currently in `state` (0 or 1) with `live` live neighbors.
    pub fn next_state(&self, state: u8, live: usize) -> u8 {
        match (state, live) {
            (0, n) if n == self.birth                                 => 1,  // Birth
            (0, _)                                                    => 0,  // Stays dead
            (_, n) if n < self.survive_min || n > self.survive_max    => 0,  // Under/overpopulation
            _                                                         => 1,  // Survival
        }
    }
}

/// The closed set of neighborhood shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NeighborhoodKind {
    /// Radius-1 cross: 4 neighbors.
    #[default]
    VonNeumann,
    /// Radius-2 cross: 8 neighbors, axis-aligned only.
    VonNeumannExtended,
    /// 3x3 block minus the center: 8 neighbors.
    Moore,
}

impl NeighborhoodKind {
    pub const ALL: [NeighborhoodKind; 3] = [
        NeighborhoodKind::VonNeumann,
        NeighborhoodKind::VonNeumannExtended,
        NeighborhoodKind::Moore,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            NeighborhoodKind::VonNeumann         => "Von Neumann",
            NeighborhoodKind::VonNeumannExtended => "Von Neumann ext.",
            NeighborhoodKind::Moore              => "Moore",
        }
    }

    pub const fn rule(self) -> Rule {
        match self {
            NeighborhoodKind::VonNeumann         => Rule { survive_min: 1, survive_max: 2, birth: 2 },
            NeighborhoodKind::VonNeumannExtended => Rule { survive_min: 2, survive_max: 3, birth: 3 },
            NeighborhoodKind::Moore              => Rule { survive_min: 2, survive_max: 3, birth: 3 },
        }
    }

    /// Furthest any kind reaches along one axis.
    pub const MAX_RADIUS: usize = 2;

    pub const fn radius(self) -> usize {
        match self {
            NeighborhoodKind::VonNeumann | NeighborhoodKind::Moore => 1,
            NeighborhoodKind::VonNeumannExtended => 2,
        }
    }

    pub const fn neighbor_count(self) -> usize {
        match self {
            NeighborhoodKind::VonNeumann => 4,
            NeighborhoodKind::VonNeumannExtended | NeighborhoodKind::Moore => 8,
        }
    }

    /// Coordinates sampled for `cell`. Pure: no grid or boundary lookups here.
    pub fn neighbors(self, cell: GridPoint) -> Vec<GridPoint> {
        match self {
            NeighborhoodKind::VonNeumann         => cross(cell, 1),
            NeighborhoodKind::VonNeumannExtended => cross(cell, 2),
            NeighborhoodKind::Moore              => moore(cell),
        }
    }

    /// Panics if the rule table asks for more neighbors than the shape has.
    pub(crate) fn assert_consistent(self) {
        let rule = self.rule();
        let n = self.neighbor_count();
        assert!(
            rule.survive_min <= rule.survive_max && rule.survive_max <= n && rule.birth <= n,
            "{self} rule {rule:?} is inconsistent with its {n} neighbors"
        );
    }
}

impl fmt::Display for NeighborhoodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Axis-aligned offsets `1..=radius` in both directions along both axes.
fn cross(cell: GridPoint, radius: i32) -> Vec<GridPoint> {
    let mut points = Vec::with_capacity(4 * radius as usize);
    for d in (-radius..=radius).filter(|&d| d != 0) {
        points.push(cell.offset(d, 0));
        points.push(cell.offset(0, d));
    }
    points
}

fn moore(cell: GridPoint) -> Vec<GridPoint> {
    let mut points = Vec::with_capacity(8);
    for d_row in -1..=1 {
        for d_col in -1..=1 {
            if d_row == 0 && d_col == 0 { continue; }
            points.push(cell.offset(d_row, d_col));
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn as_set(points: Vec<GridPoint>) -> HashSet<(i32, i32)> {
        points.into_iter().map(|p| (p.row, p.col)).collect()
    }

    #[test]
    fn max_radius_covers_every_kind() {
        let widest = NeighborhoodKind::ALL.iter().map(|k| k.radius()).max();
        assert_eq!(widest, Some(NeighborhoodKind::MAX_RADIUS));
        for kind in NeighborhoodKind::ALL {
            let reach = kind
                .neighbors(GridPoint::new(0, 0))
                .iter()
                .map(|p| p.row.unsigned_abs().max(p.col.unsigned_abs()) as usize)
                .max();
            assert_eq!(reach, Some(kind.radius()), "{kind}");
        }
    }

    #[test]
    fn von_neumann_is_the_unit_cross() {
        let got = as_set(NeighborhoodKind::VonNeumann.neighbors(GridPoint::new(5, 5)));
        let want: HashSet<_> = [(4, 5), (6, 5), (5, 4), (5, 6)].into_iter().collect();
        assert_eq!(got, want);
    }

    #[test]
    fn extended_von_neumann_reaches_two_along_each_axis() {
        let got = as_set(NeighborhoodKind::VonNeumannExtended.neighbors(GridPoint::new(5, 5)));
        let want: HashSet<_> = [
            (3, 5), (4, 5), (6, 5), (7, 5),
            (5, 3), (5, 4), (5, 6), (5, 7),
        ].into_iter().collect();
        assert_eq!(got, want);
    }

    #[test]
    fn moore_is_the_ring_around_the_cell() {
        let got = as_set(NeighborhoodKind::Moore.neighbors(GridPoint::new(0, 0)));
        assert_eq!(got.len(), 8);
        assert!(!got.contains(&(0, 0)));
        assert!(got.contains(&(-1, -1)) && got.contains(&(1, 1)));
    }

    #[test]
    fn neighbor_lists_have_no_duplicates_and_match_counts() {
        for kind in NeighborhoodKind::ALL {
            let points = kind.neighbors(GridPoint::new(2, 2));
            assert_eq!(points.len(), kind.neighbor_count());
            assert_eq!(as_set(points).len(), kind.neighbor_count(), "{kind}");
            kind.assert_consistent();
        }
    }

    #[test]
    fn rule_table() {
        assert_eq!(NeighborhoodKind::VonNeumann.rule(), Rule { survive_min: 1, survive_max: 2, birth: 2 });
        assert_eq!(NeighborhoodKind::VonNeumannExtended.rule(), Rule { survive_min: 2, survive_max: 3, birth: 3 });
        assert_eq!(NeighborhoodKind::Moore.rule(), Rule { survive_min: 2, survive_max: 3, birth: 3 });
    }

    #[test]
    fn next_state_follows_the_band() {
        let rule = NeighborhoodKind::Moore.rule();
        assert_eq!(rule.next_state(0, 3), 1);
        assert_eq!(rule.next_state(0, 2), 0);
        assert_eq!(rule.next_state(1, 1), 0);
        assert_eq!(rule.next_state(1, 2), 1);
        assert_eq!(rule.next_state(1, 3), 1);
        assert_eq!(rule.next_state(1, 4), 0);
    }
}
