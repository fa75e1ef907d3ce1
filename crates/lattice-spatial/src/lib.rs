//! Integer lattice primitives for sparse 3D pathfinding graphs.
//!
//! This crate provides the spatial building blocks the routing crates sit on:
//!
//! - [`LatticeCoord`] - Discrete `i32` coordinates
//! - [`Dimensions`] - Strictly positive lattice extents
//! - [`LatticeBounds`] - Inclusive coordinate boxes and their iteration
//! - [`IndexScheme`] - Coordinate validity and coordinate to [`PointId`] folding,
//!   with [`CenteredIndexing`] and [`ZeroBasedIndexing`] implementations
//! - [`line_of_sight`] - Integer segment rasterization with corner sampling
//!
//! # Layer 0 Crate
//!
//! Everything here is a pure function of its arguments. Hashing, validity and
//! line of sight allocate nothing per query, and no function panics on any
//! input: extents that cannot be indexed are rejected when [`Dimensions`] are
//! built, and identifier arithmetic is checked rather than wrapping.
//!
//! # Coordinate Systems
//!
//! Cells are unit cubes centered on integer coordinates. Which coordinates are
//! valid depends on the index scheme:
//!
//! | Scheme | Valid range per axis |
//! |--------|----------------------|
//! | [`CenteredIndexing`] | `[-(D-1), D-1]` |
//! | [`ZeroBasedIndexing`] | `[0, D-1]` |
//!
//! # Example
//!
//! ```
//! use lattice_spatial::{
//!     Dimensions, IndexScheme, LatticeCoord, ZeroBasedIndexing, line_of_sight,
//! };
//!
//! let dims = Dimensions::new(5, 5, 1).unwrap();
//! let scheme = ZeroBasedIndexing;
//!
//! let wall: Vec<_> = (0..4).map(|y| LatticeCoord::new(2, y, 0)).collect();
//! let start = LatticeCoord::new(0, 0, 0);
//! let goal = LatticeCoord::new(4, 0, 0);
//!
//! assert!(scheme.is_valid(goal, dims));
//! assert!(!line_of_sight(start, goal, |c| wall.contains(&c)));
//! assert!(line_of_sight(start, LatticeCoord::new(1, 3, 0), |c| wall.contains(&c)));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod coord;
mod error;
mod indexing;
mod sight;

pub use bounds::{Dimensions, LatticeBounds, LatticeBoundsIter};
pub use coord::LatticeCoord;
pub use error::SpatialError;
pub use indexing::{CenteredIndexing, IndexScheme, PointId, ZeroBasedIndexing};
pub use sight::line_of_sight;

// Re-export nalgebra types for convenience
pub use nalgebra::Point3;
