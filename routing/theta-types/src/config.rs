//! Configuration types for lattice pathfinding engines.
//!
//! # Example
//!
//! ```
//! use theta_types::{Heuristic, Indexing, ThetaStarConfig};
//! use lattice_spatial::Dimensions;
//!
//! let config = ThetaStarConfig::default()
//!     .with_dimensions(Dimensions::new(16, 16, 4).unwrap())
//!     .with_indexing(Indexing::ZeroBased)
//!     .with_line_of_sight(true)
//!     .with_heuristic(Heuristic::Euclidean);
//!
//! assert!(config.validate().is_ok());
//! ```

use lattice_spatial::{CenteredIndexing, Dimensions, IndexScheme, ZeroBasedIndexing};

use crate::error::GraphError;

/// Built-in heuristic functions for the search engine.
///
/// The heuristic estimates the cost from a point to the goal. For optimal
/// paths it must never overestimate the true remaining cost.
///
/// # Example
///
/// ```
/// use theta_types::Heuristic;
///
/// // Floored Euclidean is the default and admissible for any-angle search
/// assert_eq!(Heuristic::default(), Heuristic::FlooredEuclidean);
/// assert!(Heuristic::FlooredEuclidean.is_admissible_for(true));
///
/// // Manhattan overestimates once paths may cut corners
/// assert!(!Heuristic::Manhattan.is_admissible_for(true));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// Euclidean distance rounded down to the nearest integer.
    #[default]
    FlooredEuclidean,

    /// Straight-line distance: sqrt(dx² + dy² + dz²)
    Euclidean,

    /// Maximum of absolute coordinate differences: max(|dx|, |dy|, |dz|)
    Chebyshev,

    /// Diagonal distance for 26-connected lattices.
    ///
    /// Moves along the largest delta, then across face and space diagonals
    /// for the remainder.
    Octile,

    /// Sum of absolute coordinate differences: |dx| + |dy| + |dz|
    ///
    /// Admissible only when every edge is an axis-aligned unit step.
    Manhattan,

    /// Always zero (Dijkstra's algorithm).
    Zero,
}

impl Heuristic {
    /// Returns `true` if this heuristic never overestimates straight-line
    /// travel.
    ///
    /// With `any_angle` set, paths may shortcut along arbitrary segments, so
    /// only heuristics bounded by the Euclidean distance qualify. Without it,
    /// the engine follows explicit edges and grid-shaped estimates are fine
    /// as long as the edge set matches them.
    #[must_use]
    pub const fn is_admissible_for(&self, any_angle: bool) -> bool {
        match self {
            Self::FlooredEuclidean | Self::Euclidean | Self::Chebyshev | Self::Zero => true,
            Self::Octile | Self::Manhattan => !any_angle,
        }
    }
}

/// Coordinate to identifier scheme selected by configuration.
///
/// Custom schemes bypass this enum and are installed on the graph directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Indexing {
    /// Coordinates in `[-(D-1), D-1]` per axis.
    #[default]
    Centered,
    /// Coordinates in `[0, D-1]` per axis.
    ZeroBased,
}

impl Indexing {
    /// Instantiates the scheme.
    #[must_use]
    pub fn scheme(self) -> Box<dyn IndexScheme> {
        match self {
            Self::Centered => Box::new(CenteredIndexing),
            Self::ZeroBased => Box::new(ZeroBasedIndexing),
        }
    }

    /// Number of valid coordinates for `dims` under this scheme.
    ///
    /// # Example
    ///
    /// ```
    /// use theta_types::Indexing;
    /// use lattice_spatial::Dimensions;
    ///
    /// let dims = Dimensions::new(3, 3, 1).unwrap();
    /// assert_eq!(Indexing::ZeroBased.valid_volume(dims), 9);
    /// assert_eq!(Indexing::Centered.valid_volume(dims), 25);
    /// ```
    #[must_use]
    pub fn valid_volume(self, dims: Dimensions) -> u64 {
        match self {
            Self::Centered => CenteredIndexing.bounds(dims).volume(),
            Self::ZeroBased => ZeroBasedIndexing.bounds(dims).volume(),
        }
    }
}

/// Configuration for a Theta* engine.
///
/// Defaults:
/// - Dimensions: `(1, 1, 1)`
/// - Indexing: centered
/// - Line-of-sight shortcutting: disabled (plain A*)
/// - Heuristic: floored Euclidean
/// - No pre-reservation
///
/// # Example
///
/// ```
/// use theta_types::{Indexing, ThetaStarConfig};
/// use lattice_spatial::Dimensions;
///
/// let config = ThetaStarConfig::new()
///     .with_dimensions(Dimensions::new(4, 4, 4).unwrap())
///     .with_indexing(Indexing::ZeroBased)
///     .with_reserve(64);
///
/// assert_eq!(config.reserve(), Some(64));
/// assert!(!config.line_of_sight());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThetaStarConfig {
    /// Lattice extents.
    dimensions: Dimensions,
    /// Identifier scheme.
    indexing: Indexing,
    /// Whether to rewire through grandparents with line of sight.
    line_of_sight: bool,
    /// Heuristic function.
    heuristic: Heuristic,
    /// Points to pre-allocate storage for.
    reserve: Option<usize>,
}

impl ThetaStarConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dimensions: Dimensions::unit(),
            indexing: Indexing::Centered,
            line_of_sight: false,
            heuristic: Heuristic::FlooredEuclidean,
            reserve: None,
        }
    }

    /// Sets the lattice dimensions.
    #[must_use]
    pub const fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Sets the identifier scheme.
    #[must_use]
    pub const fn with_indexing(mut self, indexing: Indexing) -> Self {
        self.indexing = indexing;
        self
    }

    /// Enables or disables line-of-sight shortcutting.
    #[must_use]
    pub const fn with_line_of_sight(mut self, enable: bool) -> Self {
        self.line_of_sight = enable;
        self
    }

    /// Sets the heuristic function.
    #[must_use]
    pub const fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Pre-allocates storage for `capacity` points.
    #[must_use]
    pub const fn with_reserve(mut self, capacity: usize) -> Self {
        self.reserve = Some(capacity);
        self
    }

    /// Returns the lattice dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Returns the identifier scheme.
    #[must_use]
    pub const fn indexing(&self) -> Indexing {
        self.indexing
    }

    /// Returns whether line-of-sight shortcutting is enabled.
    #[must_use]
    pub const fn line_of_sight(&self) -> bool {
        self.line_of_sight
    }

    /// Returns the heuristic function.
    #[must_use]
    pub const fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Returns the requested pre-allocation, if any.
    #[must_use]
    pub const fn reserve(&self) -> Option<usize> {
        self.reserve
    }

    /// Checks the configuration for values an engine cannot honor.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Spatial`] if the lattice identifiers overflow
    /// an `i64` under the chosen indexing, and [`GraphError::InvalidConfig`]
    /// if the reservation exceeds the number of coordinates the lattice can
    /// hold.
    pub fn validate(&self) -> Result<(), GraphError> {
        self.indexing.scheme().check_dimensions(self.dimensions)?;

        if let Some(reserve) = self.reserve {
            let volume = self.indexing.valid_volume(self.dimensions);
            if u64::try_from(reserve).unwrap_or(u64::MAX) > volume {
                return Err(GraphError::invalid_config(format!(
                    "reserve of {reserve} points exceeds the {volume} valid coordinates"
                )));
            }
        }

        Ok(())
    }
}

impl Default for ThetaStarConfig {
    fn default() -> Self {
        Self::new()
    }
}
