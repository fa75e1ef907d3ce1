//! Lattice coordinate type.

use nalgebra::Point3;

/// A discrete 3D coordinate on the pathfinding lattice.
///
/// Uses `i32` components so that centered lattices can address negative
/// cells. Every graph point is identified by exactly one coordinate.
///
/// # Example
///
/// ```
/// use lattice_spatial::LatticeCoord;
///
/// let coord = LatticeCoord::new(1, -2, 3);
/// assert_eq!(coord.x, 1);
/// assert_eq!(coord.y, -2);
/// assert_eq!(coord + LatticeCoord::new(1, 1, 1), LatticeCoord::new(2, -1, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeCoord {
    /// X component.
    pub x: i32,
    /// Y component.
    pub y: i32,
    /// Z component.
    pub z: i32,
}

impl LatticeCoord {
    /// The six unit offsets along the principal axes.
    ///
    /// Order is `+z, -z, +x, -x, +y, -y`, matching the default neighborhood
    /// used when building regular grids.
    pub const AXIS_OFFSETS: [Self; 6] = [
        Self::new(0, 0, 1),
        Self::new(0, 0, -1),
        Self::new(1, 0, 0),
        Self::new(-1, 0, 0),
        Self::new(0, 1, 0),
        Self::new(0, -1, 0),
    ];

    /// Creates a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The origin `(0, 0, 0)`.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0, 0)
    }

    /// Returns a coordinate with the same value on every axis.
    #[must_use]
    pub const fn splat(v: i32) -> Self {
        Self::new(v, v, v)
    }

    /// Returns the components as an array indexed by axis.
    #[must_use]
    pub const fn as_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Returns the component on `axis` (0 = x, 1 = y, anything else = z).
    #[must_use]
    pub const fn axis(self, axis: usize) -> i32 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Returns a copy with the component on `axis` replaced.
    #[must_use]
    pub const fn with_axis(mut self, axis: usize, value: i32) -> Self {
        match axis {
            0 => self.x = value,
            1 => self.y = value,
            _ => self.z = value,
        }
        self
    }

    /// Converts to a floating-point point.
    ///
    /// # Example
    ///
    /// ```
    /// use lattice_spatial::LatticeCoord;
    /// use nalgebra::Point3;
    ///
    /// assert_eq!(LatticeCoord::new(1, 2, 3).to_point(), Point3::new(1.0, 2.0, 3.0));
    /// ```
    #[must_use]
    pub fn to_point(self) -> Point3<f64> {
        Point3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    /// Straight-line distance to another coordinate.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        let dz = f64::from(other.z) - f64::from(self.z);
        dx.mul_add(dx, dy.mul_add(dy, dz * dz)).sqrt()
    }

    /// Manhattan (L1) distance to another coordinate.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        dx.saturating_add(dy).saturating_add(dz)
    }

    /// Chebyshev (L-infinity) distance to another coordinate.
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        dx.max(dy).max(dz)
    }

    /// Clamps every component into `[min, max]`.
    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(
            self.x.clamp(min.x, max.x),
            self.y.clamp(min.y, max.y),
            self.z.clamp(min.z, max.z),
        )
    }

    /// Adds an offset, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(other.x)?,
            self.y.checked_add(other.y)?,
            self.z.checked_add(other.z)?,
        ))
    }
}

impl From<(i32, i32, i32)> for LatticeCoord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[i32; 3]> for LatticeCoord {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<LatticeCoord> for [i32; 3] {
    fn from(coord: LatticeCoord) -> Self {
        coord.as_array()
    }
}

impl std::ops::Add for LatticeCoord {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.x.wrapping_add(other.x),
            self.y.wrapping_add(other.y),
            self.z.wrapping_add(other.z),
        )
    }
}

impl std::ops::Sub for LatticeCoord {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.x.wrapping_sub(other.x),
            self.y.wrapping_sub(other.y),
            self.z.wrapping_sub(other.z),
        )
    }
}

impl std::ops::Neg for LatticeCoord {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(
            self.x.wrapping_neg(),
            self.y.wrapping_neg(),
            self.z.wrapping_neg(),
        )
    }
}

impl std::fmt::Display for LatticeCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
