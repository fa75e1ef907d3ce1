//! Error types for lattice graph operations.
//!
//! This module defines the [`GraphError`] enum which represents every failure
//! a point graph mutation, configuration check or typed path query can report.

use lattice_spatial::{LatticeCoord, PointId, SpatialError};

/// Errors that can occur while editing or querying a lattice graph.
///
/// # Example
///
/// ```
/// use theta_types::GraphError;
/// use lattice_spatial::PointId;
///
/// let error = GraphError::NoPathFound {
///     from: PointId::new(0),
///     to: PointId::new(24),
/// };
///
/// assert!(error.to_string().contains("no path found"));
/// assert!(error.is_no_path_found());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum GraphError {
    /// The coordinate lies outside the bounds of the index scheme.
    #[error("coordinate {0} is outside the lattice bounds")]
    InvalidCoordinate(LatticeCoord),

    /// No point exists at the coordinate.
    #[error("no point at {0}")]
    MissingPoint(LatticeCoord),

    /// No point carries the identifier.
    #[error("no point with id {0}")]
    MissingId(PointId),

    /// A point already exists at the coordinate.
    ///
    /// Insertion never overwrites; remove the point first.
    #[error("a point already exists at {0}")]
    DuplicatePoint(LatticeCoord),

    /// Both endpoints exist but the goal cannot be reached.
    ///
    /// Either the graph is disconnected or every route crosses a disabled
    /// point.
    #[error("no path found from {from} to {to}")]
    NoPathFound {
        /// Identifier of the start point.
        from: PointId,
        /// Identifier of the goal point.
        to: PointId,
    },

    /// An invalid configuration parameter was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A lattice description was rejected.
    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

impl GraphError {
    /// Creates an invalid configuration error with the given message.
    ///
    /// # Example
    ///
    /// ```
    /// use theta_types::GraphError;
    ///
    /// let error = GraphError::invalid_config("reserve exceeds lattice volume");
    /// assert!(error.to_string().contains("reserve"));
    /// ```
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Returns `true` if this is a "no path found" error.
    #[must_use]
    pub const fn is_no_path_found(&self) -> bool {
        matches!(self, Self::NoPathFound { .. })
    }
}
