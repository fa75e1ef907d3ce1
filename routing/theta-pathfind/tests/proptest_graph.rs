//! Property-based tests for the point graph and Theta* engine.
//!
//! Run with: cargo test -p theta-pathfind -- proptest

use std::collections::{HashMap, VecDeque};

use lattice_spatial::{Dimensions, LatticeCoord, ZeroBasedIndexing, line_of_sight};
use proptest::prelude::*;
use theta_pathfind::{PointGraph, ThetaStar3D, build_bidirectional_grid};

// =============================================================================
// Strategies
// =============================================================================

fn arb_dims() -> impl Strategy<Value = Dimensions> {
    (1..6i32, 1..6i32, 1..3i32).prop_filter_map("positive", |(x, y, z)| Dimensions::new(x, y, z).ok())
}

fn arb_coord(range: i32) -> impl Strategy<Value = LatticeCoord> {
    prop::array::uniform3(-range..=range).prop_map(LatticeCoord::from)
}

/// A zero-based grid with some cells disabled, plus two endpoint picks.
fn arb_grid() -> impl Strategy<Value = (Dimensions, Vec<bool>, usize, usize)> {
    arb_dims().prop_flat_map(|dims| {
        let cells = usize::try_from(dims.volume()).unwrap_or(1);
        (
            Just(dims),
            prop::collection::vec(prop::bool::weighted(0.25), cells),
            0..cells,
            0..cells,
        )
    })
}

fn build_engine(dims: Dimensions, disabled: &[bool]) -> (ThetaStar3D, Vec<LatticeCoord>) {
    let mut engine = ThetaStar3D::zero_based(dims, true);
    build_bidirectional_grid(engine.graph_mut(), None);

    let cells: Vec<LatticeCoord> = engine.graph().bounds().iter().collect();
    for (coord, off) in cells.iter().zip(disabled) {
        if *off {
            engine.graph_mut().set_point_enabled(*coord, false).unwrap();
        }
    }
    (engine, cells)
}

/// Every connection points at a live point that is not `removed`.
fn connections_are_live(graph: &PointGraph, removed: &[LatticeCoord]) -> bool {
    graph.points().all(|p| {
        graph
            .point_connections(p.coord())
            .iter()
            .all(|n| graph.has_point(*n) && !removed.contains(n))
    })
}

/// Fewest unit steps from `from` to `to` over enabled cells; the start may be
/// disabled.
fn bfs_steps(
    cells: &[LatticeCoord],
    disabled: &[bool],
    from: LatticeCoord,
    to: LatticeCoord,
) -> Option<usize> {
    let enabled: HashMap<LatticeCoord, bool> =
        cells.iter().copied().zip(disabled.iter().map(|off| !off)).collect();
    let mut steps = HashMap::from([(from, 0_usize)]);
    let mut queue = VecDeque::from([from]);

    while let Some(coord) = queue.pop_front() {
        let depth = steps[&coord];
        if coord == to {
            return Some(depth);
        }
        for offset in LatticeCoord::AXIS_OFFSETS {
            let Some(next) = coord.checked_add(offset) else {
                continue;
            };
            if enabled.get(&next) == Some(&true) && !steps.contains_key(&next) {
                steps.insert(next, depth + 1);
                queue.push_back(next);
            }
        }
    }
    None
}

// =============================================================================
// Property Tests: Graph
// =============================================================================

proptest! {
    /// An accepted insertion is immediately visible under the hashed id.
    #[test]
    fn add_then_has(dims in arb_dims(), coord in arb_coord(6)) {
        let mut graph = PointGraph::new(dims);
        match graph.add_point(coord) {
            Ok(id) => {
                prop_assert!(graph.has_point(coord));
                prop_assert!(graph.has_id(id));
                prop_assert_eq!(graph.point_hash(coord), Some(id));
                prop_assert_eq!(graph.point_position(id), Some(coord));
            }
            Err(_) => {
                prop_assert!(!graph.is_position_valid(coord));
                prop_assert!(graph.is_empty());
            }
        }
    }

    /// Hashing succeeds exactly for coordinates inside the bounds.
    #[test]
    fn hash_agrees_with_validity(dims in arb_dims(), coord in arb_coord(6)) {
        for graph in [
            PointGraph::new(dims),
            PointGraph::with_scheme(dims, Box::new(ZeroBasedIndexing)).unwrap(),
        ] {
            let valid = graph.bounds().contains(coord);
            prop_assert_eq!(graph.is_position_valid(coord), valid);
            prop_assert_eq!(graph.point_hash(coord).is_some(), valid);
        }
    }

    /// Removing points never leaves an edge to a removed point.
    #[test]
    fn removal_leaves_no_dangling_connections(
        dims in arb_dims(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..12),
    ) {
        let mut graph = PointGraph::zero_based(dims);
        build_bidirectional_grid(&mut graph, None);
        let cells: Vec<LatticeCoord> = graph.bounds().iter().collect();

        let mut removed = Vec::new();
        for pick in picks {
            let coord = *pick.get(&cells);
            if graph.remove_point(coord).is_ok() {
                removed.push(coord);
            }
        }

        prop_assert_eq!(graph.point_count(), cells.len() - removed.len());
        prop_assert!(connections_are_live(&graph, &removed));
    }

    /// Clearing twice leaves the same empty graph.
    #[test]
    fn clear_is_idempotent(dims in arb_dims()) {
        let mut graph = PointGraph::new(dims);
        build_bidirectional_grid(&mut graph, None);
        graph.set_point_enabled(LatticeCoord::origin(), false).unwrap();

        graph.clear();
        prop_assert_eq!(graph.point_count(), 0);
        prop_assert_eq!(graph.disabled_point_count(), 0);
        graph.clear();
        prop_assert_eq!(graph.point_count(), 0);
        prop_assert!(graph.is_empty());
        prop_assert!(!graph.is_dirty());
    }
}

// =============================================================================
// Property Tests: Search
// =============================================================================

proptest! {
    /// Plain A* paths run between the requested endpoints through enabled
    /// points in unit steps.
    #[test]
    fn edge_paths_are_connected((dims, disabled, a, b) in arb_grid()) {
        let (mut engine, cells) = build_engine(dims, &disabled);
        let (from, to) = (cells[a], cells[b]);

        let path = engine.point_path_from_positions(from, to);
        if !path.is_empty() {
            prop_assert_eq!(path.first(), Some(&from));
            prop_assert_eq!(path.last(), Some(&to));
            let span = usize::try_from(from.manhattan_distance(to)).unwrap();
            prop_assert!(path.len() > span);
            for pair in path.windows(2) {
                prop_assert_eq!(pair[0].manhattan_distance(pair[1]), 1);
            }
            for coord in &path[1..] {
                prop_assert!(!engine.graph().is_position_disabled(*coord));
            }
        }
    }

    /// With unit edges, plain A* paths are as short as a breadth-first
    /// search says they can be.
    #[test]
    fn edge_paths_have_minimum_length((dims, disabled, a, b) in arb_grid()) {
        let (mut engine, cells) = build_engine(dims, &disabled);
        let (from, to) = (cells[a], cells[b]);

        let path = engine.point_path_from_positions(from, to);
        match bfs_steps(&cells, &disabled, from, to) {
            Some(steps) => prop_assert_eq!(path.len(), steps + 1),
            None => prop_assert!(path.is_empty()),
        }
    }

    /// Shortcut paths keep sight between consecutive points.
    #[test]
    fn any_angle_paths_keep_sight((dims, disabled, a, b) in arb_grid()) {
        let (mut engine, cells) = build_engine(dims, &disabled);
        engine.enable_line_of_sight_check(true);
        let (from, to) = (cells[a], cells[b]);

        let path = engine.point_path_from_positions(from, to);
        if !path.is_empty() {
            prop_assert_eq!(path.first(), Some(&from));
            prop_assert_eq!(path.last(), Some(&to));
            let graph = engine.graph();
            for pair in path.windows(2) {
                prop_assert!(line_of_sight(pair[0], pair[1], |c| graph.is_position_disabled(c)));
            }
        }
    }

    /// Shortcutting changes path shape, never reachability.
    #[test]
    fn shortcutting_preserves_reachability((dims, disabled, a, b) in arb_grid()) {
        let (mut engine, cells) = build_engine(dims, &disabled);
        let (from, to) = (cells[a], cells[b]);

        let edge_path = engine.point_path_from_positions(from, to);
        engine.enable_line_of_sight_check(true);
        let any_angle = engine.point_path_from_positions(from, to);

        prop_assert_eq!(edge_path.is_empty(), any_angle.is_empty());
    }
}
