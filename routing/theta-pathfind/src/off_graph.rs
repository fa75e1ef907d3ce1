//! Snapping floating-point positions onto the lattice.
//!
//! Off-graph queries start and end at arbitrary positions. Each endpoint is
//! snapped to a nearby lattice cell on the side facing the other endpoint,
//! so the search starts from a cell between the two positions rather than
//! behind one of them.

use lattice_spatial::{LatticeBounds, LatticeCoord};
use nalgebra::Point3;

/// Snaps `from` to a lattice coordinate, leaning toward `to`.
///
/// Per axis: positions outside `bounds` clamp to the nearest face; inside,
/// the component rounds up if `to` lies in the positive direction on that
/// axis and down otherwise.
///
/// Returns `None` if either position has a non-finite component.
///
/// The chosen cell is not guaranteed to be visible from `from`.
///
/// # Example
///
/// ```
/// use theta_pathfind::off_graph::snap_toward;
/// use lattice_spatial::{LatticeBounds, LatticeCoord};
/// use nalgebra::Point3;
///
/// let bounds = LatticeBounds::new(LatticeCoord::new(0, 0, 0), LatticeCoord::new(9, 9, 0));
/// let snapped = snap_toward(
///     Point3::new(2.3, 7.6, 0.0),
///     Point3::new(5.0, 1.0, 0.0),
///     bounds,
/// );
/// assert_eq!(snapped, Some(LatticeCoord::new(3, 7, 0)));
///
/// // Outside the lattice the position clamps to the border.
/// let clamped = snap_toward(Point3::new(-4.0, 20.0, 0.5), Point3::origin(), bounds);
/// assert_eq!(clamped, Some(LatticeCoord::new(0, 9, 0)));
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn snap_toward(from: Point3<f64>, to: Point3<f64>, bounds: LatticeBounds) -> Option<LatticeCoord> {
    if !from.iter().chain(to.iter()).all(|v| v.is_finite()) {
        return None;
    }

    let min = bounds.min.as_array();
    let max = bounds.max.as_array();
    let mut snapped = [0_i32; 3];

    for axis in 0..3 {
        let value = from[axis];
        let lo = f64::from(min[axis]);
        let hi = f64::from(max[axis]);

        snapped[axis] = if value > hi {
            max[axis]
        } else if value < lo {
            min[axis]
        } else {
            let rounded = if to[axis] - value > 0.0 {
                value.ceil()
            } else {
                value.floor()
            };
            // In [lo, hi], so within i32.
            rounded as i32
        };
    }

    Some(LatticeCoord::from(snapped))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bounds() -> LatticeBounds {
        LatticeBounds::new(LatticeCoord::new(-4, -4, -4), LatticeCoord::new(4, 4, 4))
    }

    #[test]
    fn test_rounds_toward_other_endpoint() {
        let from = Point3::new(0.5, 0.5, 0.5);
        assert_eq!(
            snap_toward(from, Point3::new(3.0, -3.0, 0.5), bounds()),
            Some(LatticeCoord::new(1, 0, 0))
        );
        assert_eq!(
            snap_toward(from, Point3::new(-3.0, 3.0, 3.0), bounds()),
            Some(LatticeCoord::new(0, 1, 1))
        );
    }

    #[test]
    fn test_integral_positions_stay_put() {
        let from = Point3::new(2.0, -1.0, 3.0);
        assert_eq!(
            snap_toward(from, Point3::new(-2.0, 2.0, 0.0), bounds()),
            Some(LatticeCoord::new(2, -1, 3))
        );
    }

    #[test]
    fn test_clamps_outside_bounds() {
        let from = Point3::new(10.0, -10.0, 4.5);
        assert_eq!(
            snap_toward(from, Point3::origin(), bounds()),
            Some(LatticeCoord::new(4, -4, 4))
        );
    }

    #[test]
    fn test_non_finite_is_rejected() {
        assert_eq!(snap_toward(Point3::new(f64::NAN, 0.0, 0.0), Point3::origin(), bounds()), None);
        assert_eq!(
            snap_toward(Point3::origin(), Point3::new(0.0, f64::INFINITY, 0.0), bounds()),
            None
        );
    }

    #[test]
    fn test_snapped_cell_is_in_bounds() {
        let b = bounds();
        for (from, to) in [
            (Point3::new(3.9, -3.9, 0.1), Point3::new(9.0, -9.0, 9.0)),
            (Point3::new(-100.0, 0.2, 0.0), Point3::new(100.0, 0.0, 0.0)),
        ] {
            assert!(b.contains(snap_toward(from, to, b).unwrap()));
        }
    }
}
