//! Property-based tests for lattice indexing and line of sight.
//!
//! Run with: cargo test -p lattice-spatial -- proptest

use std::collections::HashSet;

use lattice_spatial::{
    CenteredIndexing, Dimensions, IndexScheme, LatticeBounds, LatticeCoord, ZeroBasedIndexing,
    line_of_sight,
};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_dims() -> impl Strategy<Value = Dimensions> {
    (1..6i32, 1..6i32, 1..6i32).prop_filter_map("positive", |(x, y, z)| Dimensions::new(x, y, z).ok())
}

fn arb_coord(range: i32) -> impl Strategy<Value = LatticeCoord> {
    prop::array::uniform3(-range..=range).prop_map(LatticeCoord::from)
}

fn arb_planar_coord(range: i32) -> impl Strategy<Value = LatticeCoord> {
    (-range..=range, -range..=range).prop_map(|(x, y)| LatticeCoord::new(x, y, 0))
}

fn cells_sampled(from: LatticeCoord, to: LatticeCoord) -> HashSet<LatticeCoord> {
    let mut seen = HashSet::new();
    let clear = line_of_sight(from, to, |c| {
        seen.insert(c);
        false
    });
    assert!(clear);
    seen
}

// =============================================================================
// Property Tests: Indexing
// =============================================================================

proptest! {
    /// Validity is exactly membership in the scheme bounds.
    #[test]
    fn validity_matches_bounds(dims in arb_dims(), coord in arb_coord(7)) {
        for scheme in [&CenteredIndexing as &dyn IndexScheme, &ZeroBasedIndexing] {
            prop_assert_eq!(scheme.is_valid(coord, dims), scheme.bounds(dims).contains(coord));
        }
    }

    /// Distinct valid coordinates never share an identifier.
    #[test]
    fn hash_is_injective_on_valid_coords(dims in arb_dims(), a in arb_coord(5), b in arb_coord(5)) {
        for scheme in [&CenteredIndexing as &dyn IndexScheme, &ZeroBasedIndexing] {
            if a != b && scheme.is_valid(a, dims) && scheme.is_valid(b, dims) {
                prop_assert!(scheme.hash(a, dims).is_some());
                prop_assert_ne!(scheme.hash(a, dims), scheme.hash(b, dims));
            }
        }
    }

    /// Every valid identifier falls inside the reported identifier space.
    #[test]
    fn hash_stays_inside_id_space(dims in arb_dims(), coord in arb_coord(5)) {
        for scheme in [&CenteredIndexing as &dyn IndexScheme, &ZeroBasedIndexing] {
            if scheme.is_valid(coord, dims) {
                let id = scheme.hash(coord, dims).unwrap().get();
                prop_assert!((0..scheme.id_space(dims).unwrap()).contains(&id));
            }
        }
    }

    /// Hashing is a pure function of coordinate and dimensions.
    #[test]
    fn hash_is_deterministic(dims in arb_dims(), coord in arb_coord(5)) {
        prop_assert_eq!(CenteredIndexing.hash(coord, dims), CenteredIndexing.hash(coord, dims));
        prop_assert_eq!(ZeroBasedIndexing.hash(coord, dims), ZeroBasedIndexing.hash(coord, dims));
    }
}

// =============================================================================
// Property Tests: Line of Sight
// =============================================================================

proptest! {
    /// An empty lattice never blocks sight.
    #[test]
    fn empty_lattice_is_clear(a in arb_coord(20), b in arb_coord(20)) {
        prop_assert!(line_of_sight(a, b, |_| false));
    }

    /// The destination cell is always sampled.
    #[test]
    fn blocked_destination_blocks_sight(a in arb_coord(20), b in arb_coord(20)) {
        prop_assume!(a != b);
        prop_assert!(!line_of_sight(a, b, |c| c == b));
    }

    /// Sampled cells stay inside the box spanned by the endpoints and never
    /// include the start.
    #[test]
    fn samples_stay_in_span(a in arb_coord(12), b in arb_coord(12)) {
        let span = LatticeBounds::new(a, b);
        let cells = cells_sampled(a, b);
        prop_assert!(!cells.contains(&a));
        for c in &cells {
            prop_assert!(span.contains(*c), "{} outside span of {} -> {}", c, a, b);
        }
    }

    /// Consecutive samples are face, edge or corner neighbours, so at least
    /// as many cells are sampled as the longest axis delta.
    #[test]
    fn samples_cover_major_axis(a in arb_coord(12), b in arb_coord(12)) {
        let cells = cells_sampled(a, b);
        prop_assert!(cells.len() as u32 >= a.chebyshev_distance(b));
    }

    /// Planar lines sample the same cells in both directions.
    #[test]
    fn planar_sight_is_symmetric(a in arb_planar_coord(10), b in arb_planar_coord(10)) {
        let mut forward = cells_sampled(a, b);
        let mut backward = cells_sampled(b, a);
        forward.insert(a);
        backward.insert(b);
        prop_assert_eq!(forward, backward);
    }
}
