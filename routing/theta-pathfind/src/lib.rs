//! Any-angle pathfinding over sparse 3D lattice graphs.
//!
//! This crate finds paths through a directed graph whose points sit on an
//! integer lattice. Paths may cut across the lattice: the Theta* engine
//! connects a point straight to an earlier one whenever nothing disabled lies
//! between them.
//!
//! # Overview
//!
//! - **Graph** ([`PointGraph`]): points keyed by a lattice-derived
//!   identifier, directed edges, per-point enable flags
//! - **Engine** ([`ThetaStar3D`]): owns a graph and answers path queries by
//!   position, by identifier, or between arbitrary floating-point positions
//! - **Grid builder** ([`build_bidirectional_grid`]): fills a graph with
//!   every lattice cell and links neighbors
//! - **Heuristics** ([`heuristics`]): distance functions for edge costs and
//!   goal estimates
//!
//! # Quick Start
//!
//! ```
//! use theta_pathfind::{build_bidirectional_grid, ThetaStar3D};
//! use lattice_spatial::{Dimensions, LatticeCoord};
//!
//! let mut engine = ThetaStar3D::zero_based(Dimensions::new(8, 8, 1).unwrap(), true);
//! build_bidirectional_grid(engine.graph_mut(), None);
//!
//! // Block part of a column
//! for y in 0..6 {
//!     engine.graph_mut().set_point_enabled(LatticeCoord::new(4, y, 0), false).unwrap();
//! }
//!
//! let from = LatticeCoord::new(0, 0, 0);
//! let to = LatticeCoord::new(7, 0, 0);
//!
//! // Plain A* follows the edges
//! let staircase = engine.point_path_from_positions(from, to);
//!
//! // Theta* shortcuts wherever the line of sight is clear
//! engine.enable_line_of_sight_check(true);
//! let any_angle = engine.point_path_from_positions(from, to);
//!
//! assert_eq!(any_angle.first(), Some(&from));
//! assert_eq!(any_angle.last(), Some(&to));
//! assert!(any_angle.len() < staircase.len());
//! ```
//!
//! # Search Modes
//!
//! | Mode | Paths | Notes |
//! |------|-------|-------|
//! | A* (line of sight off) | Follow explicit edges | Optimal over the edge set |
//! | Theta* (line of sight on) | Any angle | Near-optimal; straight segments between visible points |
//!
//! # Customization
//!
//! The engine's edge cost, heuristic and visibility test are closures that
//! can be swapped at runtime ([`ThetaStar3D::set_edge_cost`],
//! [`ThetaStar3D::set_heuristic`], [`ThetaStar3D::set_line_of_sight`]). The
//! coordinate to identifier mapping is an
//! [`IndexScheme`](lattice_spatial::IndexScheme) installed on the graph.
//!
//! # Integration with lattice-spatial
//!
//! - [`lattice_spatial::LatticeCoord`] for point positions
//! - [`lattice_spatial::IndexScheme`] for identifiers and bounds
//! - [`lattice_spatial::line_of_sight`] for the default visibility test

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]

pub mod graph;
pub mod grid;
pub mod heuristics;
pub mod off_graph;
mod open_list;
mod point;
pub mod theta;

// Re-export main types for convenience
pub use graph::PointGraph;
pub use grid::build_bidirectional_grid;
pub use heuristics::compute_heuristic;
pub use point::Point;
pub use theta::{CostFn, SearchStats, SightFn, ThetaStar3D};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod integration_tests {
    use super::*;
    use lattice_spatial::{Dimensions, LatticeCoord, line_of_sight};
    use nalgebra::Point3;
    use theta_types::{Heuristic, Indexing, ThetaStarConfig};

    fn c(x: i32, y: i32, z: i32) -> LatticeCoord {
        LatticeCoord::new(x, y, z)
    }

    /// Configure, build, query, edit, query again.
    #[test]
    fn test_full_workflow() {
        let config = ThetaStarConfig::new()
            .with_dimensions(Dimensions::new(6, 6, 3).unwrap())
            .with_indexing(Indexing::ZeroBased)
            .with_heuristic(Heuristic::Euclidean)
            .with_line_of_sight(true);
        let mut engine = ThetaStar3D::with_config(&config).unwrap();
        assert_eq!(build_bidirectional_grid(engine.graph_mut(), None), 108);

        let from = c(0, 0, 0);
        let to = c(5, 5, 2);
        let open = engine.point_path_from_positions(from, to);
        assert_eq!(open, vec![from, to]);

        // Wall off the middle layer except one corner.
        for x in 0..6 {
            for y in 0..6 {
                if (x, y) != (5, 0) {
                    engine.graph_mut().set_point_enabled(c(x, y, 1), false).unwrap();
                }
            }
        }
        let routed = engine.point_path_from_positions(from, to);
        assert_eq!(routed.first(), Some(&from));
        assert_eq!(routed.last(), Some(&to));
        assert!(routed.len() > 2);

        let graph = engine.graph();
        for pair in routed.windows(2) {
            assert!(line_of_sight(pair[0], pair[1], |cell| graph.is_position_disabled(cell)));
        }
    }

    /// Identifier and position queries agree.
    #[test]
    fn test_id_and_position_queries_agree() {
        let mut engine = ThetaStar3D::new(Dimensions::new(3, 3, 1).unwrap());
        build_bidirectional_grid(engine.graph_mut(), None);

        let from = engine.graph().point_id(c(-2, -2, 0)).unwrap();
        let to = engine.graph().point_id(c(2, 1, 0)).unwrap();

        let ids = engine.id_path_from_ids(from, to);
        let coords = engine.point_path_from_ids(from, to);
        let by_position = engine.id_path_from_positions(c(-2, -2, 0), c(2, 1, 0));

        assert_eq!(ids, by_position);
        assert_eq!(
            ids.iter().map(|id| engine.graph().point_position(*id).unwrap()).collect::<Vec<_>>(),
            coords
        );
    }

    /// Off-graph endpoints outside the lattice clamp onto its border.
    #[test]
    fn test_off_graph_clamps_outside_positions() {
        let mut engine = ThetaStar3D::zero_based(Dimensions::new(4, 4, 1).unwrap(), false);
        build_bidirectional_grid(engine.graph_mut(), None);
        engine.enable_line_of_sight_check(true);

        let from = Point3::new(-3.0, -3.0, 0.0);
        let to = Point3::new(10.0, 1.5, 0.0);
        let path = engine.point_path_from_off_graph_positions(from, to);

        assert_eq!(path.first(), Some(&from));
        assert_eq!(path.last(), Some(&to));
        assert_eq!(path[1], Point3::new(0.0, 0.0, 0.0));
        assert_eq!(path[path.len() - 2], Point3::new(3.0, 1.0, 0.0));
    }
}
