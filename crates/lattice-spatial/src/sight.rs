//! Integer line-of-sight rasterization on the lattice.
//!
//! Cells are unit cubes centered on integer coordinates. The segment between
//! two cell centers is walked one cell at a time along its dominant (major)
//! axis; each of the two minor axes keeps its own error accumulator, the 3D
//! form of the classic integer digital-line algorithm.
//!
//! At every major step the walk samples:
//!
//! - the cell the segment reaches on the new major plane, plus the cell on
//!   the other side when the segment sits exactly on a minor boundary;
//! - for each minor axis that advanced, the cell the segment passes through
//!   between the two major planes, or both candidates when it passes exactly
//!   through their shared edge.
//!
//! The second rule is what rejects paths that squeeze diagonally between two
//! blocked cells touching at a corner.
//!
//! # Example
//!
//! ```
//! use lattice_spatial::{LatticeCoord, line_of_sight};
//!
//! let wall = LatticeCoord::new(2, 1, 0);
//! let blocked = |c: LatticeCoord| c == wall;
//!
//! assert!(line_of_sight(LatticeCoord::new(0, 0, 0), LatticeCoord::new(4, 0, 0), blocked));
//! assert!(!line_of_sight(LatticeCoord::new(0, 0, 0), LatticeCoord::new(4, 2, 0), blocked));
//! ```

use crate::coord::LatticeCoord;

/// Accumulator state of one minor axis.
#[derive(Debug, Clone, Copy)]
struct MinorAxis {
    axis: usize,
    /// |delta| along this axis.
    delta: i64,
    sign: i32,
    /// Offset of the segment from the current cell center, in units of
    /// `1 / (2 * major)` cells. Kept in `(-major, major]`.
    error: i64,
    /// Error at the last major cell boundary (half step).
    half: i64,
    stepped: bool,
}

impl MinorAxis {
    const fn new(axis: usize, delta: i64, sign: i32) -> Self {
        Self {
            axis,
            delta,
            sign,
            error: 0,
            half: 0,
            stepped: false,
        }
    }

    /// Advances one major step, moving `cell` when the error passes a
    /// boundary.
    fn advance(&mut self, major: i64, cell: &mut LatticeCoord) {
        self.half = self.error + self.delta;
        self.error += 2 * self.delta;
        self.stepped = self.error > major;
        if self.stepped {
            self.error -= 2 * major;
            *cell = cell.with_axis(self.axis, cell.axis(self.axis) + self.sign);
        }
    }

    /// The segment lies exactly on the boundary with the next cell.
    const fn on_boundary(&self, major: i64) -> bool {
        self.delta != 0 && self.error == major
    }
}

/// Checks whether the straight segment between two lattice cells is clear.
///
/// `is_blocked` is queried for every sampled cell except `from`; the check
/// fails as soon as it returns `true`. Callers decide what an absent cell
/// means; the pathfinding engine treats absent cells as transparent.
///
/// The walk runs from `from` toward `to`. Segments with a single non-zero
/// minor axis sample the same cells in both directions; segments where both
/// minor axes advance on the same major step may sample a slightly different
/// set when reversed.
///
/// # Example
///
/// ```
/// use lattice_spatial::{LatticeCoord, line_of_sight};
///
/// // Two blocked cells touching at a corner block the diagonal between them.
/// let blocked = |c: LatticeCoord| c == LatticeCoord::new(1, 0, 0) || c == LatticeCoord::new(0, 1, 0);
/// assert!(!line_of_sight(LatticeCoord::new(0, 0, 0), LatticeCoord::new(1, 1, 0), blocked));
/// ```
pub fn line_of_sight<F>(from: LatticeCoord, to: LatticeCoord, mut is_blocked: F) -> bool
where
    F: FnMut(LatticeCoord) -> bool,
{
    let deltas = [
        i64::from(to.x) - i64::from(from.x),
        i64::from(to.y) - i64::from(from.y),
        i64::from(to.z) - i64::from(from.z),
    ];
    let dist = deltas.map(i64::abs);
    #[allow(clippy::cast_possible_truncation)]
    let sign = deltas.map(|d| d.signum() as i32);

    // Ties go to x, then y.
    let major = if dist[0] >= dist[1] && dist[0] >= dist[2] {
        0
    } else if dist[1] >= dist[2] {
        1
    } else {
        2
    };

    let n = dist[major];
    if n == 0 {
        return true;
    }

    let (a, b) = match major {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };
    let mut minors = [
        MinorAxis::new(a, dist[a], sign[a]),
        MinorAxis::new(b, dist[b], sign[b]),
    ];

    let mut cell = from;
    for _ in 0..n {
        let prev = cell;
        cell = cell.with_axis(major, cell.axis(major) + sign[major]);
        for minor in &mut minors {
            minor.advance(n, &mut cell);
        }

        if !destination_clear(cell, &minors, n, &mut is_blocked) {
            return false;
        }

        for (k, other) in [(0, 1), (1, 0)] {
            if minors[k].stepped
                && !crossing_clear(prev, cell, &minors[k], &minors[other], n, &mut is_blocked)
            {
                return false;
            }
        }
    }

    true
}

/// Samples the cell on the new major plane, fanning out across any minor
/// boundary the segment touches exactly.
fn destination_clear<F>(cell: LatticeCoord, minors: &[MinorAxis; 2], n: i64, is_blocked: &mut F) -> bool
where
    F: FnMut(LatticeCoord) -> bool,
{
    let spread = |m: &MinorAxis| -> &'static [i32] {
        match (m.on_boundary(n), m.sign) {
            (true, 1) => &[0, 1],
            (true, _) => &[0, -1],
            (false, _) => &[0],
        }
    };

    for &da in spread(&minors[0]) {
        for &db in spread(&minors[1]) {
            let sample = cell
                .with_axis(minors[0].axis, cell.axis(minors[0].axis) + da)
                .with_axis(minors[1].axis, cell.axis(minors[1].axis) + db);
            if is_blocked(sample) {
                return false;
            }
        }
    }

    true
}

/// Samples the cell(s) a stepping minor axis crosses between two major
/// planes.
fn crossing_clear<F>(
    prev: LatticeCoord,
    cell: LatticeCoord,
    minor: &MinorAxis,
    other: &MinorAxis,
    n: i64,
    is_blocked: &mut F,
) -> bool
where
    F: FnMut(LatticeCoord) -> bool,
{
    let before_plane = minor.half >= n;
    let after_plane = minor.half <= n;

    let others = [prev.axis(other.axis), cell.axis(other.axis)];
    let others = if others[0] == others[1] { &others[..1] } else { &others[..] };

    for &o in others {
        if before_plane {
            let sample = prev
                .with_axis(minor.axis, cell.axis(minor.axis))
                .with_axis(other.axis, o);
            if is_blocked(sample) {
                return false;
            }
        }
        if after_plane {
            let sample = cell
                .with_axis(minor.axis, prev.axis(minor.axis))
                .with_axis(other.axis, o);
            if is_blocked(sample) {
                return false;
            }
        }
    }

    true
}
