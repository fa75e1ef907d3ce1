//! Distance functions for edge costs and goal estimates.
//!
//! # Example
//!
//! ```
//! use theta_pathfind::heuristics::compute_heuristic;
//! use theta_types::Heuristic;
//! use lattice_spatial::LatticeCoord;
//!
//! let from = LatticeCoord::new(0, 0, 0);
//! let to = LatticeCoord::new(2, 2, 1);
//!
//! let euclidean = compute_heuristic(from, to, Heuristic::Euclidean);
//! assert!((euclidean - 3.0).abs() < 1e-10);
//!
//! let floored = compute_heuristic(from, LatticeCoord::new(1, 1, 0), Heuristic::FlooredEuclidean);
//! assert!((floored - 1.0).abs() < 1e-10);  // floor(sqrt(2))
//! ```

use lattice_spatial::LatticeCoord;
use theta_types::Heuristic;

use crate::point::Point;

/// Computes the estimated cost between two lattice coordinates.
#[must_use]
pub fn compute_heuristic(from: LatticeCoord, to: LatticeCoord, heuristic: Heuristic) -> f64 {
    match heuristic {
        Heuristic::FlooredEuclidean => floored_euclidean_distance(from, to),
        Heuristic::Euclidean => euclidean_distance(from, to),
        Heuristic::Chebyshev => chebyshev_distance(from, to),
        Heuristic::Octile => octile_distance(from, to),
        Heuristic::Manhattan => manhattan_distance(from, to),
        Heuristic::Zero => 0.0,
    }
}

/// Straight-line distance: sqrt(dx² + dy² + dz²)
#[must_use]
pub fn euclidean_distance(from: LatticeCoord, to: LatticeCoord) -> f64 {
    from.distance_to(to)
}

/// Euclidean distance rounded down.
///
/// Never exceeds the Euclidean distance, so it stays admissible while
/// producing many equal estimates that the open list then orders by `h`.
#[must_use]
pub fn floored_euclidean_distance(from: LatticeCoord, to: LatticeCoord) -> f64 {
    euclidean_distance(from, to).floor()
}

/// max(|dx|, |dy|, |dz|)
#[must_use]
pub fn chebyshev_distance(from: LatticeCoord, to: LatticeCoord) -> f64 {
    f64::from(from.chebyshev_distance(to))
}

/// |dx| + |dy| + |dz|
#[must_use]
pub fn manhattan_distance(from: LatticeCoord, to: LatticeCoord) -> f64 {
    f64::from(from.manhattan_distance(to))
}

/// Cost of the cheapest 26-connected route: space diagonals for the smallest
/// delta, face diagonals for the middle remainder, straight steps for the
/// rest.
#[must_use]
pub fn octile_distance(from: LatticeCoord, to: LatticeCoord) -> f64 {
    let mut d = [
        f64::from(from.x.abs_diff(to.x)),
        f64::from(from.y.abs_diff(to.y)),
        f64::from(from.z.abs_diff(to.z)),
    ];
    d.sort_by(f64::total_cmp);
    let [min, mid, max] = d;

    let sqrt3 = 3.0_f64.sqrt();
    let sqrt2 = std::f64::consts::SQRT_2;

    sqrt3.mul_add(min, sqrt2.mul_add(mid - min, max - mid))
}

/// Default edge cost: Euclidean distance between the two points.
#[must_use]
pub fn edge_cost(from: &Point, to: &Point) -> f64 {
    euclidean_distance(from.coord(), to.coord())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(x: i32, y: i32, z: i32) -> LatticeCoord {
        LatticeCoord::new(x, y, z)
    }

    #[test]
    fn test_floored_euclidean() {
        assert_relative_eq!(floored_euclidean_distance(c(0, 0, 0), c(3, 4, 0)), 5.0);
        assert_relative_eq!(floored_euclidean_distance(c(0, 0, 0), c(4, 4, 0)), 5.0);
        assert_relative_eq!(floored_euclidean_distance(c(0, 0, 0), c(1, 1, 1)), 1.0);
        assert_relative_eq!(floored_euclidean_distance(c(2, 2, 2), c(2, 2, 2)), 0.0);
    }

    #[test]
    fn test_euclidean_negative_coords() {
        assert_relative_eq!(euclidean_distance(c(-1, -2, -2), c(0, 0, 0)), 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_chebyshev_and_manhattan() {
        let a = c(0, 0, 0);
        let b = c(3, -4, 5);
        assert_relative_eq!(chebyshev_distance(a, b), 5.0);
        assert_relative_eq!(manhattan_distance(a, b), 12.0);
    }

    #[test]
    fn test_octile() {
        let a = c(0, 0, 0);
        assert_relative_eq!(octile_distance(a, c(5, 0, 0)), 5.0, epsilon = 1e-10);
        assert_relative_eq!(
            octile_distance(a, c(3, 3, 0)),
            3.0 * std::f64::consts::SQRT_2,
            epsilon = 1e-10
        );
        assert_relative_eq!(octile_distance(a, c(2, 2, 2)), 2.0 * 3.0_f64.sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn test_lower_bounds_of_euclidean() {
        let a = c(1, -3, 2);
        let b = c(-4, 5, 7);
        let e = euclidean_distance(a, b);
        assert!(floored_euclidean_distance(a, b) <= e);
        assert!(chebyshev_distance(a, b) <= e);
        assert!(octile_distance(a, b) >= e - 1e-10);
        assert!(manhattan_distance(a, b) >= e);
    }

    #[test]
    fn test_compute_heuristic_dispatch() {
        let a = c(0, 0, 0);
        let b = c(1, 2, 2);
        assert_relative_eq!(compute_heuristic(a, b, Heuristic::Euclidean), 3.0, epsilon = 1e-10);
        assert_relative_eq!(compute_heuristic(a, b, Heuristic::FlooredEuclidean), 3.0, epsilon = 1e-10);
        assert_relative_eq!(compute_heuristic(a, b, Heuristic::Chebyshev), 2.0);
        assert_relative_eq!(compute_heuristic(a, b, Heuristic::Manhattan), 5.0);
        assert_relative_eq!(compute_heuristic(a, b, Heuristic::Zero), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let a = c(1, 2, 3);
        let b = c(-4, 5, 0);
        for h in [
            Heuristic::FlooredEuclidean,
            Heuristic::Euclidean,
            Heuristic::Chebyshev,
            Heuristic::Octile,
            Heuristic::Manhattan,
        ] {
            assert_relative_eq!(compute_heuristic(a, b, h), compute_heuristic(b, a, h), epsilon = 1e-10);
        }
    }
}
