//! Configuration and error types for Theta* lattice pathfinding.
//!
//! This crate holds the vocabulary shared by engines and their callers:
//!
//! - **Configuration**: engine settings built fluently ([`ThetaStarConfig`]),
//!   heuristic selection ([`Heuristic`]) and identifier scheme selection
//!   ([`Indexing`])
//! - **Errors**: every failure a graph mutation or typed query reports
//!   ([`GraphError`])
//!
//! # Example
//!
//! ```
//! use theta_types::{GraphError, Heuristic, Indexing, ThetaStarConfig};
//! use lattice_spatial::Dimensions;
//!
//! let config = ThetaStarConfig::default()
//!     .with_dimensions(Dimensions::new(10, 10, 1).unwrap())
//!     .with_indexing(Indexing::ZeroBased)
//!     .with_heuristic(Heuristic::Chebyshev)
//!     .with_line_of_sight(true);
//! assert!(config.validate().is_ok());
//!
//! let oversized = config.with_reserve(1_000);
//! assert!(matches!(oversized.validate(), Err(GraphError::InvalidConfig(_))));
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization/deserialization for the configuration types

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]

pub mod config;
pub mod error;

pub use config::{Heuristic, Indexing, ThetaStarConfig};
pub use error::GraphError;
