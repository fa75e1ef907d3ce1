//! Graph point records.
//!
//! A [`Point`] is the public face of a graph vertex: its identifier, its
//! coordinate and whether it may be traversed. The graph stores each point
//! inside a [`PointRecord`] together with its adjacency and the scratch state
//! the search engine writes during a query.

use lattice_spatial::{LatticeCoord, PointId};
use smallvec::SmallVec;

/// Arena slot of a point record.
///
/// Handles are only meaningful for the graph that issued them and are
/// recycled after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct PointHandle(usize);

impl PointHandle {
    pub(crate) const fn new(slot: usize) -> Self {
        Self(slot)
    }

    pub(crate) const fn slot(self) -> usize {
        self.0
    }
}

/// A traversable vertex of a lattice graph.
///
/// Cost and heuristic callbacks receive points by reference.
///
/// # Example
///
/// ```
/// use theta_pathfind::PointGraph;
/// use lattice_spatial::{Dimensions, LatticeCoord};
///
/// let mut graph = PointGraph::new(Dimensions::new(3, 3, 3).unwrap());
/// let id = graph.add_point(LatticeCoord::new(1, -1, 0)).unwrap();
///
/// let point = graph.point(id).unwrap();
/// assert_eq!(point.coord(), LatticeCoord::new(1, -1, 0));
/// assert!(point.is_enabled());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    id: PointId,
    coord: LatticeCoord,
    enabled: bool,
}

impl Point {
    pub(crate) const fn new(id: PointId, coord: LatticeCoord) -> Self {
        Self {
            id,
            coord,
            enabled: true,
        }
    }

    /// Identifier derived from the coordinate.
    #[must_use]
    pub const fn id(&self) -> PointId {
        self.id
    }

    /// Lattice coordinate.
    #[must_use]
    pub const fn coord(&self) -> LatticeCoord {
        self.coord
    }

    /// Whether searches may pass through this point.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Per-query scratch written by the search engine.
///
/// Values are only meaningful while `opened` (or `closed`) equals the engine's
/// current generation; older stamps mean the fields are leftovers from an
/// earlier query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SearchState {
    pub(crate) previous: Option<PointHandle>,
    /// Cost from the start.
    pub(crate) g: f64,
    /// Estimated cost to the goal.
    pub(crate) h: f64,
    pub(crate) opened: u64,
    pub(crate) closed: u64,
    /// Position inside the open list heap.
    pub(crate) heap_index: usize,
}

impl SearchState {
    pub(crate) fn f(&self) -> f64 {
        self.g + self.h
    }

    pub(crate) const fn reset_stamps(&mut self) {
        self.opened = 0;
        self.closed = 0;
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            previous: None,
            g: 0.0,
            h: 0.0,
            opened: 0,
            closed: 0,
            heap_index: 0,
        }
    }
}

/// Adjacency entries, usually a handful per point.
pub(crate) type Neighbors = SmallVec<[(PointId, PointHandle); 6]>;

/// Storage for one point: the public record, its directed adjacency, the
/// points that list it as a neighbor, and search scratch.
#[derive(Debug, Clone)]
pub(crate) struct PointRecord {
    pub(crate) point: Point,
    pub(crate) neighbors: Neighbors,
    pub(crate) inbound: SmallVec<[PointHandle; 6]>,
    pub(crate) search: SearchState,
}

impl PointRecord {
    pub(crate) fn new(point: Point) -> Self {
        Self {
            point,
            neighbors: SmallVec::new(),
            inbound: SmallVec::new(),
            search: SearchState::default(),
        }
    }

    /// Adds or refreshes an outbound edge.
    pub(crate) fn link(&mut self, id: PointId, handle: PointHandle) {
        match self.neighbors.iter_mut().find(|(n, _)| *n == id) {
            Some(entry) => entry.1 = handle,
            None => self.neighbors.push((id, handle)),
        }
    }

    /// Removes an outbound edge, returning the neighbor handle if one existed.
    pub(crate) fn unlink(&mut self, id: PointId) -> Option<PointHandle> {
        let pos = self.neighbors.iter().position(|(n, _)| *n == id)?;
        Some(self.neighbors.remove(pos).1)
    }

    pub(crate) fn add_inbound(&mut self, handle: PointHandle) {
        if !self.inbound.contains(&handle) {
            self.inbound.push(handle);
        }
    }

    pub(crate) fn remove_inbound(&mut self, handle: PointHandle) {
        self.inbound.retain(|h| *h != handle);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record() -> PointRecord {
        PointRecord::new(Point::new(PointId::new(0), LatticeCoord::origin()))
    }

    #[test]
    fn test_point_defaults_enabled() {
        let p = Point::new(PointId::new(5), LatticeCoord::new(1, 2, 3));
        assert!(p.is_enabled());
        assert_eq!(p.id(), PointId::new(5));
    }

    #[test]
    fn test_link_is_idempotent() {
        let mut r = record();
        r.link(PointId::new(1), PointHandle::new(1));
        r.link(PointId::new(1), PointHandle::new(1));
        r.link(PointId::new(2), PointHandle::new(2));
        assert_eq!(r.neighbors.len(), 2);
    }

    #[test]
    fn test_unlink_missing_is_none() {
        let mut r = record();
        r.link(PointId::new(1), PointHandle::new(7));
        assert_eq!(r.unlink(PointId::new(3)), None);
        assert_eq!(r.unlink(PointId::new(1)), Some(PointHandle::new(7)));
        assert!(r.neighbors.is_empty());
    }

    #[test]
    fn test_inbound_has_no_duplicates() {
        let mut r = record();
        r.add_inbound(PointHandle::new(4));
        r.add_inbound(PointHandle::new(4));
        assert_eq!(r.inbound.len(), 1);
        r.remove_inbound(PointHandle::new(4));
        assert!(r.inbound.is_empty());
    }

    #[test]
    fn test_search_state_total_cost() {
        let s = SearchState {
            g: 2.5,
            h: 1.5,
            ..SearchState::default()
        };
        assert!((s.f() - 4.0).abs() < 1e-12);
    }
}
