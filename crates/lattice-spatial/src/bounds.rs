//! Lattice dimensions and inclusive coordinate boxes.

use crate::coord::LatticeCoord;
use crate::error::SpatialError;

/// Extent of a lattice along each axis.
///
/// Every component is strictly positive. How the extent maps onto a range of
/// valid coordinates is decided by the [`IndexScheme`](crate::IndexScheme):
/// zero-based lattices cover `[0, D-1]`, centered lattices `[-(D-1), D-1]`.
///
/// The doubled extents `2Dx * 2Dy * 2Dz` must fit in an `i64`, so that every
/// built-in scheme assigns distinct identifiers to all valid coordinates.
///
/// # Example
///
/// ```
/// use lattice_spatial::Dimensions;
///
/// let dims = Dimensions::new(4, 3, 2).unwrap();
/// assert_eq!(dims.volume(), 24);
/// assert!(Dimensions::new(4, 0, 2).is_err());
/// assert!(Dimensions::new(1 << 22, 1 << 22, 1 << 22).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "LatticeCoord", into = "LatticeCoord")
)]
pub struct Dimensions {
    x: i32,
    y: i32,
    z: i32,
}

impl Dimensions {
    /// Creates dimensions, rejecting any non-positive component.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidDimensions`] if a component is `<= 0`,
    /// or [`SpatialError::IdSpaceOverflow`] if the doubled extents overflow
    /// the identifier space.
    pub fn new(x: i32, y: i32, z: i32) -> Result<Self, SpatialError> {
        if x <= 0 || y <= 0 || z <= 0 {
            return Err(SpatialError::InvalidDimensions { x, y, z });
        }
        let dims = Self { x, y, z };
        match dims.scaled_volume(2) {
            Some(_) => Ok(dims),
            None => Err(SpatialError::IdSpaceOverflow { x, y, z }),
        }
    }

    /// Single-cell dimensions `(1, 1, 1)`.
    #[must_use]
    pub const fn unit() -> Self {
        Self { x: 1, y: 1, z: 1 }
    }

    /// Extent along X.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Extent along Y.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Extent along Z.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.z
    }

    /// The extents as a coordinate.
    #[must_use]
    pub const fn as_coord(&self) -> LatticeCoord {
        LatticeCoord::new(self.x, self.y, self.z)
    }

    /// Product of the three extents, saturating at `i64::MAX`.
    #[must_use]
    pub fn volume(&self) -> i64 {
        i64::from(self.x)
            .saturating_mul(i64::from(self.y))
            .saturating_mul(i64::from(self.z))
    }

    /// Product of the extents after multiplying each by `scale`, or `None`
    /// if it does not fit in an `i64`.
    ///
    /// Identifier schemes use this to size their identifier space.
    #[must_use]
    pub fn scaled_volume(&self, scale: i64) -> Option<i64> {
        let axis = |extent: i32| i64::from(extent).checked_mul(scale);
        axis(self.x)?
            .checked_mul(axis(self.y)?)?
            .checked_mul(axis(self.z)?)
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::unit()
    }
}

impl TryFrom<LatticeCoord> for Dimensions {
    type Error = SpatialError;

    fn try_from(c: LatticeCoord) -> Result<Self, Self::Error> {
        Self::new(c.x, c.y, c.z)
    }
}

impl From<Dimensions> for LatticeCoord {
    fn from(dims: Dimensions) -> Self {
        dims.as_coord()
    }
}

/// Inclusive axis-aligned box of lattice coordinates.
///
/// # Example
///
/// ```
/// use lattice_spatial::{LatticeBounds, LatticeCoord};
///
/// let bounds = LatticeBounds::new(LatticeCoord::new(-1, -1, 0), LatticeCoord::new(1, 1, 0));
/// assert!(bounds.contains(LatticeCoord::new(0, 1, 0)));
/// assert_eq!(bounds.iter().count(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeBounds {
    /// Minimum corner (inclusive).
    pub min: LatticeCoord,
    /// Maximum corner (inclusive).
    pub max: LatticeCoord,
}

impl LatticeBounds {
    /// Creates bounds from two corners, ordering them per axis.
    #[must_use]
    pub fn new(a: LatticeCoord, b: LatticeCoord) -> Self {
        Self {
            min: LatticeCoord::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: LatticeCoord::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Whether `coord` lies inside the box.
    #[must_use]
    pub const fn contains(&self, coord: LatticeCoord) -> bool {
        coord.x >= self.min.x
            && coord.x <= self.max.x
            && coord.y >= self.min.y
            && coord.y <= self.max.y
            && coord.z >= self.min.z
            && coord.z <= self.max.z
    }

    /// Number of cells in the box.
    #[must_use]
    pub fn volume(&self) -> u64 {
        let w = u64::from(self.max.x.abs_diff(self.min.x)) + 1;
        let h = u64::from(self.max.y.abs_diff(self.min.y)) + 1;
        let d = u64::from(self.max.z.abs_diff(self.min.z)) + 1;
        w.saturating_mul(h).saturating_mul(d)
    }

    /// Iterates all coordinates, X varying fastest.
    #[must_use]
    pub const fn iter(&self) -> LatticeBoundsIter {
        LatticeBoundsIter {
            bounds: *self,
            current: Some(self.min),
        }
    }
}

impl IntoIterator for &LatticeBounds {
    type Item = LatticeCoord;
    type IntoIter = LatticeBoundsIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over all coordinates in a [`LatticeBounds`].
#[derive(Debug, Clone)]
pub struct LatticeBoundsIter {
    bounds: LatticeBounds,
    current: Option<LatticeCoord>,
}

impl Iterator for LatticeBoundsIter {
    type Item = LatticeCoord;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        let mut next = current;
        next.x += 1;
        if next.x > self.bounds.max.x {
            next.x = self.bounds.min.x;
            next.y += 1;
            if next.y > self.bounds.max.y {
                next.y = self.bounds.min.y;
                next.z += 1;
                if next.z > self.bounds.max.z {
                    self.current = None;
                    return Some(current);
                }
            }
        }
        self.current = Some(next);

        Some(current)
    }
}
