//! Property-based checks of the epoch rule over random grids.

use automaton::{BoundaryMode, Engine, Grid, GridPoint, NeighborhoodKind, SimulationConfig, next_cell_state};
use proptest::prelude::*;

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (10usize..20, 10usize..20).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(0u8..=1, rows * cols).prop_map(move |cells| {
            let rows: Vec<&[u8]> = cells.chunks(cols).collect();
            Grid::from_rows(&rows).unwrap()
        })
    })
}

fn kind_strategy() -> impl Strategy<Value = NeighborhoodKind> {
    prop::sample::select(NeighborhoodKind::ALL.to_vec())
}

fn mode_strategy() -> impl Strategy<Value = BoundaryMode> {
    prop::sample::select(BoundaryMode::ALL.to_vec())
}

fn build_engine(grid: Grid, kind: NeighborhoodKind, mode: BoundaryMode) -> Engine {
    let config = SimulationConfig { neighborhood: kind, boundary: mode, ..Default::default() };
    Engine::with_grid(config, grid).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// No spontaneous birth: every birth value is at least 2.
    #[test]
    fn prop_dead_grid_stays_dead(rows in 10usize..30, cols in 10usize..30, kind in kind_strategy(), mode in mode_strategy()) {
        let mut engine = build_engine(Grid::new(rows, cols), kind, mode);
        let stats = engine.step();
        prop_assert_eq!(stats.live_count, 0);
        prop_assert_eq!(engine.grid().live_count(), 0);
    }

    /// The published count always matches the committed buffer.
    #[test]
    fn prop_live_count_matches_buffer(grid in grid_strategy(), kind in kind_strategy(), mode in mode_strategy()) {
        let mut engine = build_engine(grid, kind, mode);
        for _ in 0..3 {
            let stats = engine.step();
            prop_assert_eq!(stats.live_count, engine.grid().live_count());
            let published = *engine.subscribe().borrow();
            prop_assert_eq!(published, stats);
        }
    }

    /// Row tasks produce exactly the sequential row-major sweep.
    #[test]
    fn prop_step_matches_sequential_sweep(grid in grid_strategy(), kind in kind_strategy(), mode in mode_strategy()) {
        let mut expected = Vec::with_capacity(grid.rows() * grid.cols());
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                expected.push(next_cell_state(&grid, GridPoint::new(row as i32, col as i32), kind, mode));
            }
        }
        let mut engine = build_engine(grid, kind, mode);
        engine.step();
        prop_assert_eq!(engine.grid().cells(), expected.as_slice());
    }

    /// Single-wrap resolution lands in range for every offset a neighborhood can produce.
    #[test]
    fn prop_toroidal_resolution_stays_in_range(extent in 10usize..100, offset in -2i32..=2, at_end in any::<bool>()) {
        let base = if at_end { extent as i32 - 1 } else { 0 };
        let resolved = BoundaryMode::Toroidal.resolve(base + offset, extent);
        prop_assert!(matches!(resolved, Some(i) if i < extent));
    }
}
