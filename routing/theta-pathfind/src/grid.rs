//! Filling a graph with a fully connected lattice.
//!
//! # Example
//!
//! ```
//! use theta_pathfind::{build_bidirectional_grid, PointGraph};
//! use lattice_spatial::{Dimensions, LatticeCoord};
//!
//! let mut graph = PointGraph::zero_based(Dimensions::new(3, 3, 1).unwrap());
//! assert_eq!(build_bidirectional_grid(&mut graph, None), 9);
//!
//! // The center touches its four face neighbors in the plane.
//! assert_eq!(graph.point_connections(LatticeCoord::new(1, 1, 0)).len(), 4);
//! ```

use lattice_spatial::LatticeCoord;
use tracing::info;

use crate::graph::PointGraph;
use crate::point::Point;

/// Inserts a point at every valid coordinate and links lattice neighbors in
/// both directions.
///
/// Existing points are kept, and so are their connections. Each point is
/// linked to the point at `coord + offset` for every offset that lands on an
/// existing point; `offsets` defaults to the six axis-aligned unit steps.
/// Pass face or space diagonals to build denser neighborhoods.
///
/// Returns the number of points inserted.
pub fn build_bidirectional_grid(graph: &mut PointGraph, offsets: Option<&[LatticeCoord]>) -> usize {
    let offsets = offsets.unwrap_or(&LatticeCoord::AXIS_OFFSETS);

    let missing: Vec<LatticeCoord> = graph
        .bounds()
        .iter()
        .filter(|coord| !graph.has_point(*coord))
        .collect();
    let mut inserted = 0_usize;
    for coord in missing {
        if graph.add_point(coord).is_ok() {
            inserted += 1;
        }
    }

    let coords: Vec<LatticeCoord> = graph.points().map(Point::coord).collect();
    let mut connections = 0_usize;
    for coord in coords {
        for offset in offsets {
            let Some(neighbor) = coord.checked_add(*offset) else {
                continue;
            };
            if neighbor != coord
                && graph.has_point(neighbor)
                && graph.connect_points(coord, neighbor, true).is_ok()
            {
                connections += 1;
            }
        }
    }

    info!(
        inserted,
        points = graph.point_count(),
        connections,
        "Built bidirectional lattice grid"
    );
    inserted
}
