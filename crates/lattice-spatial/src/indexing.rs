//! Coordinate to identifier mapping.
//!
//! A sparse lattice graph stores its points in a hash map keyed by a dense
//! 64-bit [`PointId`] instead of a dense 3D array. An [`IndexScheme`] decides
//! which coordinates are valid for a given [`Dimensions`] and how a valid
//! coordinate is folded into an identifier.
//!
//! Two schemes ship with the crate:
//!
//! - [`CenteredIndexing`]: coordinates in `[-(D-1), D-1]`, shifted into the
//!   non-negative range before folding. This is the default.
//! - [`ZeroBasedIndexing`]: coordinates in `[0, D-1]`, folded directly.
//!
//! Custom spatial indexing is plugged in by implementing the trait.
//!
//! # Example
//!
//! ```
//! use lattice_spatial::{CenteredIndexing, Dimensions, IndexScheme, LatticeCoord};
//!
//! let dims = Dimensions::new(3, 3, 3).unwrap();
//! let scheme = CenteredIndexing;
//!
//! assert!(scheme.is_valid(LatticeCoord::new(-2, 0, 2), dims));
//! assert!(!scheme.is_valid(LatticeCoord::new(3, 0, 0), dims));
//!
//! let a = scheme.hash(LatticeCoord::new(-2, -2, -2), dims).unwrap();
//! let b = scheme.hash(LatticeCoord::new(-1, -2, -2), dims).unwrap();
//! assert_eq!(a.get(), 0);
//! assert_eq!(b.get(), 1);
//! assert_eq!(scheme.id_space(dims), Some(216));
//! ```

use crate::bounds::{Dimensions, LatticeBounds};
use crate::coord::LatticeCoord;
use crate::error::SpatialError;

/// Dense identifier of a graph point, derived from its coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointId(i64);

impl PointId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for PointId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Policy mapping lattice coordinates to point identifiers.
///
/// Implementations must be pure functions of `(coord, dims)` and injective
/// over the coordinates they report as valid. Identifier arithmetic is
/// checked: a coordinate whose identifier does not fit in an `i64` has none.
pub trait IndexScheme {
    /// Folds a coordinate into an identifier, or `None` if the identifier
    /// overflows.
    ///
    /// Only meaningful for coordinates where [`is_valid`](Self::is_valid)
    /// holds; invalid coordinates may alias valid ones.
    fn hash(&self, coord: LatticeCoord, dims: Dimensions) -> Option<PointId>;

    /// Number of identifiers the scheme may hand out for `dims`, or `None`
    /// if that count overflows an `i64`.
    ///
    /// Every identifier of a valid coordinate lies in `[0, id_space)`. The
    /// default covers dense schemes that number the bounds box.
    fn id_space(&self, dims: Dimensions) -> Option<i64> {
        i64::try_from(self.bounds(dims).volume()).ok()
    }

    /// Rejects dimensions whose identifier space does not fit in an `i64`.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::IdSpaceOverflow`] when
    /// [`id_space`](Self::id_space) is `None`.
    fn check_dimensions(&self, dims: Dimensions) -> Result<(), SpatialError> {
        match self.id_space(dims) {
            Some(_) => Ok(()),
            None => Err(SpatialError::IdSpaceOverflow {
                x: dims.x(),
                y: dims.y(),
                z: dims.z(),
            }),
        }
    }

    /// Smallest valid coordinate.
    fn min_corner(&self, dims: Dimensions) -> LatticeCoord;

    /// Largest valid coordinate.
    fn max_corner(&self, dims: Dimensions) -> LatticeCoord {
        dims.as_coord() - LatticeCoord::splat(1)
    }

    /// Box of every valid coordinate.
    fn bounds(&self, dims: Dimensions) -> LatticeBounds {
        LatticeBounds {
            min: self.min_corner(dims),
            max: self.max_corner(dims),
        }
    }

    /// A coordinate is valid when clamping it into the bounds leaves it
    /// unchanged.
    fn is_valid(&self, coord: LatticeCoord, dims: Dimensions) -> bool {
        coord.clamp(self.min_corner(dims), self.max_corner(dims)) == coord
    }
}

/// Centered lattice: valid range `[-(D-1), D-1]` on every axis.
///
/// Each axis is shifted by `D-1` and the X/Y strides are doubled, so the
/// `(2D-1)^3` valid coordinates map to distinct non-negative identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CenteredIndexing;

impl IndexScheme for CenteredIndexing {
    fn hash(&self, coord: LatticeCoord, dims: Dimensions) -> Option<PointId> {
        let stride_x = i64::from(dims.x()) << 1;
        let stride_y = i64::from(dims.y()) << 1;

        let x = i64::from(coord.x) + i64::from(dims.x()) - 1;
        let y = i64::from(coord.y) + i64::from(dims.y()) - 1;
        let z = i64::from(coord.z) + i64::from(dims.z()) - 1;

        let layer = stride_x.checked_mul(stride_y)?.checked_mul(z)?;
        x.checked_add(stride_x.checked_mul(y)?)?
            .checked_add(layer)
            .map(PointId)
    }

    fn id_space(&self, dims: Dimensions) -> Option<i64> {
        dims.scaled_volume(2)
    }

    fn min_corner(&self, dims: Dimensions) -> LatticeCoord {
        LatticeCoord::splat(1) - dims.as_coord()
    }
}

/// Zero-based lattice: valid range `[0, D-1]` on every axis.
///
/// This is the scheme regular grids are built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroBasedIndexing;

impl IndexScheme for ZeroBasedIndexing {
    fn hash(&self, coord: LatticeCoord, dims: Dimensions) -> Option<PointId> {
        let dx = i64::from(dims.x());
        let dy = i64::from(dims.y());

        let layer = dx.checked_mul(dy)?.checked_mul(i64::from(coord.z))?;
        i64::from(coord.x)
            .checked_add(dx.checked_mul(i64::from(coord.y))?)?
            .checked_add(layer)
            .map(PointId)
    }

    fn id_space(&self, dims: Dimensions) -> Option<i64> {
        dims.scaled_volume(1)
    }

    fn min_corner(&self, _dims: Dimensions) -> LatticeCoord {
        LatticeCoord::origin()
    }
}
