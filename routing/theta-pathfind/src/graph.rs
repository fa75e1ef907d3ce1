//! Sparse lattice point graph.
//!
//! Points live in an arena of slots addressed by handles; a hash index maps
//! each [`PointId`] to its slot. Every record keeps both its outbound
//! adjacency and the handles of the points that link to it, so removing a
//! point unlinks it everywhere in time proportional to its degree.
//!
//! # Example
//!
//! ```
//! use theta_pathfind::PointGraph;
//! use lattice_spatial::{Dimensions, LatticeCoord};
//!
//! let mut graph = PointGraph::new(Dimensions::new(4, 4, 1).unwrap());
//! let a = LatticeCoord::new(0, 0, 0);
//! let b = LatticeCoord::new(1, 0, 0);
//!
//! graph.add_point(a).unwrap();
//! graph.add_point(b).unwrap();
//! graph.connect_points(a, b, true).unwrap();
//! assert_eq!(graph.point_connections(a), vec![b]);
//!
//! graph.remove_point(b).unwrap();
//! assert!(graph.point_connections(a).is_empty());
//! ```

use hashbrown::HashMap;
use lattice_spatial::{
    CenteredIndexing, Dimensions, IndexScheme, LatticeBounds, LatticeCoord, PointId,
    ZeroBasedIndexing,
};
use smallvec::SmallVec;
use theta_types::GraphError;
use tracing::warn;

use crate::point::{Point, PointHandle, PointRecord};

/// Directed graph of points on an integer lattice.
///
/// Coordinates are accepted only when the graph's [`IndexScheme`] reports
/// them valid for the current [`Dimensions`]. Changing either after points
/// exist marks the graph dirty: stored identifiers were derived under the old
/// mapping, and rebuilding is left to the caller.
pub struct PointGraph {
    slots: Vec<Option<PointRecord>>,
    free: Vec<PointHandle>,
    index: HashMap<PointId, PointHandle>,
    scheme: Box<dyn IndexScheme>,
    dimensions: Dimensions,
    disabled: usize,
    dirty: bool,
}

impl PointGraph {
    /// Creates an empty graph with centered indexing.
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self::from_parts(dimensions, Box::new(CenteredIndexing))
    }

    /// Creates an empty graph with zero-based indexing.
    #[must_use]
    pub fn zero_based(dimensions: Dimensions) -> Self {
        Self::from_parts(dimensions, Box::new(ZeroBasedIndexing))
    }

    /// Creates an empty graph with a custom index scheme.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Spatial`] if the scheme's identifier space for
    /// `dimensions` does not fit in an `i64`.
    ///
    /// # Example
    ///
    /// ```
    /// use theta_pathfind::PointGraph;
    /// use lattice_spatial::{Dimensions, LatticeCoord, ZeroBasedIndexing};
    ///
    /// let dims = Dimensions::new(2, 2, 2).unwrap();
    /// let graph = PointGraph::with_scheme(dims, Box::new(ZeroBasedIndexing)).unwrap();
    /// assert!(!graph.is_position_valid(LatticeCoord::new(-1, 0, 0)));
    /// ```
    pub fn with_scheme(
        dimensions: Dimensions,
        scheme: Box<dyn IndexScheme>,
    ) -> Result<Self, GraphError> {
        check_id_space(scheme.as_ref(), dimensions)?;
        Ok(Self::from_parts(dimensions, scheme))
    }

    // Built-in schemes fit any `Dimensions` that `Dimensions::new` accepts.
    fn from_parts(dimensions: Dimensions, scheme: Box<dyn IndexScheme>) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            scheme,
            dimensions,
            disabled: 0,
            dirty: false,
        }
    }

    // =========================================================================
    // Storage
    // =========================================================================

    /// Ensures room for at least `capacity` points in total.
    ///
    /// Requests the allocator cannot satisfy are logged and ignored; the
    /// graph still grows on demand.
    pub fn reserve(&mut self, capacity: usize) {
        let index = self
            .index
            .try_reserve(capacity.saturating_sub(self.index.len()))
            .map_err(|err| format!("{err:?}"));
        let slots = self
            .slots
            .try_reserve(capacity.saturating_sub(self.slots.len()))
            .map_err(|err| err.to_string());

        if let Err(err) = index.and(slots) {
            warn!(capacity, %err, "Could not reserve point storage");
        }
    }

    /// Removes every point and resets the disabled count and dirty flag.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.index.clear();
        self.disabled = 0;
        self.dirty = false;
    }

    /// Number of points the index can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.index.capacity()
    }

    /// Number of points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.index.len()
    }

    /// Number of disabled points.
    #[must_use]
    pub const fn disabled_point_count(&self) -> usize {
        self.disabled
    }

    /// Returns `true` if the graph holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // =========================================================================
    // Lattice description
    // =========================================================================

    /// Lattice extents.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Product of the three extents.
    #[must_use]
    pub fn size(&self) -> i64 {
        self.dimensions.volume()
    }

    /// Box of coordinates the index scheme accepts.
    #[must_use]
    pub fn bounds(&self) -> LatticeBounds {
        self.scheme.bounds(self.dimensions)
    }

    /// The active index scheme.
    #[must_use]
    pub fn scheme(&self) -> &dyn IndexScheme {
        self.scheme.as_ref()
    }

    /// Changes the lattice extents.
    ///
    /// Marks the graph dirty if it holds points.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Spatial`] if any component is not positive or
    /// the identifier space overflows; the current dimensions are kept.
    ///
    /// # Example
    ///
    /// ```
    /// use theta_pathfind::PointGraph;
    /// use lattice_spatial::Dimensions;
    ///
    /// let mut graph = PointGraph::default();
    /// assert!(graph.set_dimensions((8, 8, 2)).is_ok());
    /// assert_eq!(graph.size(), 128);
    /// assert!(graph.set_dimensions((8, 0, 2)).is_err());
    /// assert_eq!(graph.dimensions(), Dimensions::new(8, 8, 2).unwrap());
    /// ```
    pub fn set_dimensions(&mut self, dimensions: impl Into<LatticeCoord>) -> Result<(), GraphError> {
        let dimensions = Dimensions::try_from(dimensions.into()).inspect_err(|err| {
            warn!(%err, "Rejected lattice dimensions");
        })?;
        check_id_space(self.scheme.as_ref(), dimensions)?;
        self.dimensions = dimensions;
        self.mark_dirty_if_populated();
        Ok(())
    }

    /// Replaces the index scheme.
    ///
    /// Marks the graph dirty if it holds points.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Spatial`] if the new scheme cannot number the
    /// current dimensions within an `i64`; the current scheme is kept.
    pub fn set_index_scheme(&mut self, scheme: Box<dyn IndexScheme>) -> Result<(), GraphError> {
        check_id_space(scheme.as_ref(), self.dimensions)?;
        self.scheme = scheme;
        self.mark_dirty_if_populated();
        Ok(())
    }

    /// Whether the lattice description changed after points were added.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Acknowledges a dirty graph without clearing it.
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty_if_populated(&mut self) {
        if !self.is_empty() {
            self.dirty = true;
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Whether the coordinate lies inside the index scheme bounds.
    #[must_use]
    pub fn is_position_valid(&self, coord: LatticeCoord) -> bool {
        self.scheme.is_valid(coord, self.dimensions)
    }

    /// Identifier the coordinate maps to, whether or not a point exists there.
    ///
    /// `None` for coordinates outside the bounds, or whose identifier would
    /// overflow.
    #[must_use]
    pub fn point_hash(&self, coord: LatticeCoord) -> Option<PointId> {
        if !self.is_position_valid(coord) {
            return None;
        }
        self.scheme.hash(coord, self.dimensions)
    }

    /// Identifier of the point at `coord`, if one exists.
    #[must_use]
    pub fn point_id(&self, coord: LatticeCoord) -> Option<PointId> {
        self.point_hash(coord).filter(|id| self.index.contains_key(id))
    }

    /// Coordinate of the point with identifier `id`.
    #[must_use]
    pub fn point_position(&self, id: PointId) -> Option<LatticeCoord> {
        self.point(id).map(Point::coord)
    }

    /// The point with identifier `id`.
    #[must_use]
    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.handle(id)
            .and_then(|h| self.record(h))
            .map(|r| &r.point)
    }

    /// Whether a point exists at `coord`.
    #[must_use]
    pub fn has_point(&self, coord: LatticeCoord) -> bool {
        self.point_id(coord).is_some()
    }

    /// Whether a point carries identifier `id`.
    #[must_use]
    pub fn has_id(&self, id: PointId) -> bool {
        self.index.contains_key(&id)
    }

    /// Whether the point with identifier `id` exists and is disabled.
    #[must_use]
    pub fn is_id_disabled(&self, id: PointId) -> bool {
        self.point(id).is_some_and(|p| !p.is_enabled())
    }

    /// Whether a point exists at `coord` and is disabled.
    #[must_use]
    pub fn is_position_disabled(&self, coord: LatticeCoord) -> bool {
        self.point_id(coord)
            .is_some_and(|id| self.is_id_disabled(id))
    }

    /// Iterates every point in slot order.
    pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.slots.iter().flatten().map(|r| &r.point)
    }

    /// Coordinates of the outbound neighbors of the point at `coord`, in
    /// connection order.
    ///
    /// Empty if no point exists there.
    #[must_use]
    pub fn point_connections(&self, coord: LatticeCoord) -> Vec<LatticeCoord> {
        self.point_id(coord)
            .and_then(|id| self.handle(id))
            .and_then(|h| self.record(h))
            .map(|r| {
                r.neighbors
                    .iter()
                    .filter_map(|(_, n)| self.record(*n).map(|nr| nr.point.coord()))
                    .collect()
            })
            .unwrap_or_default()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Inserts an enabled point at `coord`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidCoordinate`] if `coord` is outside the bounds
    /// - [`GraphError::DuplicatePoint`] if a point already exists there; the
    ///   existing point and its edges are left untouched
    pub fn add_point(&mut self, coord: LatticeCoord) -> Result<PointId, GraphError> {
        let id = self.checked_hash(coord)?;
        if self.index.contains_key(&id) {
            return Err(GraphError::DuplicatePoint(coord));
        }

        let record = PointRecord::new(Point::new(id, coord));
        let handle = match self.free.pop() {
            Some(handle) => {
                self.slots[handle.slot()] = Some(record);
                handle
            }
            None => {
                self.slots.push(Some(record));
                PointHandle::new(self.slots.len() - 1)
            }
        };
        self.index.insert(id, handle);

        Ok(id)
    }

    /// Removes the point at `coord` along with every edge into or out of it.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidCoordinate`] or [`GraphError::MissingPoint`].
    pub fn remove_point(&mut self, coord: LatticeCoord) -> Result<(), GraphError> {
        let handle = self.handle_at(coord)?;
        self.detach(handle);
        Ok(())
    }

    /// Removes the point with identifier `id` along with all its edges.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingId`] if no point carries `id`.
    pub fn remove_id(&mut self, id: PointId) -> Result<(), GraphError> {
        let handle = self.handle_of(id)?;
        self.detach(handle);
        Ok(())
    }

    /// Enables or disables the point at `coord`.
    ///
    /// Disabled points stay in the graph but searches never step onto them.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidCoordinate`] or [`GraphError::MissingPoint`].
    pub fn set_point_enabled(&mut self, coord: LatticeCoord, enabled: bool) -> Result<(), GraphError> {
        let handle = self.handle_at(coord)?;
        self.toggle(handle, enabled);
        Ok(())
    }

    /// Enables or disables the point with identifier `id`.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingId`] if no point carries `id`.
    pub fn set_id_enabled(&mut self, id: PointId, enabled: bool) -> Result<(), GraphError> {
        let handle = self.handle_of(id)?;
        self.toggle(handle, enabled);
        Ok(())
    }

    /// Adds an edge from `from` to `to`, and back if `bidirectional`.
    ///
    /// Connecting an already connected pair is a no-op.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidCoordinate`] or [`GraphError::MissingPoint`] for
    /// either endpoint.
    pub fn connect_points(
        &mut self,
        from: LatticeCoord,
        to: LatticeCoord,
        bidirectional: bool,
    ) -> Result<(), GraphError> {
        let from = self.handle_at(from)?;
        let to = self.handle_at(to)?;
        self.connect_handles(from, to, bidirectional);
        Ok(())
    }

    /// Identifier variant of [`connect_points`](Self::connect_points).
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingId`] for either endpoint.
    pub fn connect_ids(&mut self, from: PointId, to: PointId, bidirectional: bool) -> Result<(), GraphError> {
        let from = self.handle_of(from)?;
        let to = self.handle_of(to)?;
        self.connect_handles(from, to, bidirectional);
        Ok(())
    }

    /// Removes the edge from `from` to `to`, and back if `bidirectional`.
    ///
    /// Succeeds when both points exist even if they were not connected.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidCoordinate`] or [`GraphError::MissingPoint`] for
    /// either endpoint.
    pub fn disconnect_points(
        &mut self,
        from: LatticeCoord,
        to: LatticeCoord,
        bidirectional: bool,
    ) -> Result<(), GraphError> {
        let from = self.handle_at(from)?;
        let to = self.handle_at(to)?;
        self.unlink(from, to);
        if bidirectional {
            self.unlink(to, from);
        }
        Ok(())
    }

    // =========================================================================
    // Internals shared with the search engine
    // =========================================================================

    pub(crate) fn handle(&self, id: PointId) -> Option<PointHandle> {
        self.index.get(&id).copied()
    }

    pub(crate) fn record(&self, handle: PointHandle) -> Option<&PointRecord> {
        self.slots.get(handle.slot()).and_then(Option::as_ref)
    }

    pub(crate) fn record_mut(&mut self, handle: PointHandle) -> Option<&mut PointRecord> {
        self.slots.get_mut(handle.slot()).and_then(Option::as_mut)
    }

    /// Outbound neighbor handles, copied so the caller may mutate records
    /// while walking them.
    pub(crate) fn neighbor_handles(&self, handle: PointHandle) -> SmallVec<[PointHandle; 8]> {
        self.record(handle)
            .map(|r| r.neighbors.iter().map(|(_, n)| *n).collect())
            .unwrap_or_default()
    }

    /// Zeroes every search stamp.
    pub(crate) fn reset_search_stamps(&mut self) {
        for record in self.slots.iter_mut().flatten() {
            record.search.reset_stamps();
        }
    }

    fn checked_hash(&self, coord: LatticeCoord) -> Result<PointId, GraphError> {
        self.point_hash(coord).ok_or_else(|| {
            warn!(%coord, bounds = ?self.bounds(), "Coordinate outside lattice bounds");
            GraphError::InvalidCoordinate(coord)
        })
    }

    fn handle_at(&self, coord: LatticeCoord) -> Result<PointHandle, GraphError> {
        let id = self.checked_hash(coord)?;
        self.handle(id).ok_or(GraphError::MissingPoint(coord))
    }

    fn handle_of(&self, id: PointId) -> Result<PointHandle, GraphError> {
        self.handle(id).ok_or(GraphError::MissingId(id))
    }

    fn toggle(&mut self, handle: PointHandle, enabled: bool) {
        let Some(record) = self.record_mut(handle) else {
            return;
        };
        if record.point.is_enabled() == enabled {
            return;
        }
        record.point.set_enabled(enabled);

        if enabled {
            self.disabled = self.disabled.saturating_sub(1);
        } else {
            self.disabled += 1;
        }
    }

    fn connect_handles(&mut self, from: PointHandle, to: PointHandle, bidirectional: bool) {
        self.link(from, to);
        if bidirectional {
            self.link(to, from);
        }
    }

    fn link(&mut self, from: PointHandle, to: PointHandle) {
        let Some(to_id) = self.record(to).map(|r| r.point.id()) else {
            return;
        };
        if let Some(record) = self.record_mut(from) {
            record.link(to_id, to);
        }
        if let Some(record) = self.record_mut(to) {
            record.add_inbound(from);
        }
    }

    fn unlink(&mut self, from: PointHandle, to: PointHandle) {
        let Some(to_id) = self.record(to).map(|r| r.point.id()) else {
            return;
        };
        let removed = self
            .record_mut(from)
            .and_then(|r| r.unlink(to_id))
            .is_some();
        if removed {
            if let Some(record) = self.record_mut(to) {
                record.remove_inbound(from);
            }
        }
    }

    /// Frees a slot after unlinking it from every neighbor in both
    /// directions.
    fn detach(&mut self, handle: PointHandle) {
        let Some(record) = self.slots.get_mut(handle.slot()).and_then(Option::take) else {
            return;
        };
        let id = record.point.id();

        for (_, neighbor) in &record.neighbors {
            if let Some(n) = self.record_mut(*neighbor) {
                n.remove_inbound(handle);
            }
        }
        for source in &record.inbound {
            if let Some(s) = self.record_mut(*source) {
                s.unlink(id);
            }
        }

        if !record.point.is_enabled() {
            self.disabled = self.disabled.saturating_sub(1);
        }
        self.index.remove(&id);
        self.free.push(handle);
    }
}

impl Default for PointGraph {
    fn default() -> Self {
        Self::new(Dimensions::unit())
    }
}

impl std::fmt::Debug for PointGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointGraph")
            .field("dimensions", &self.dimensions)
            .field("bounds", &self.bounds())
            .field("points", &self.point_count())
            .field("disabled", &self.disabled)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

fn check_id_space(scheme: &dyn IndexScheme, dimensions: Dimensions) -> Result<(), GraphError> {
    scheme.check_dimensions(dimensions).map_err(|err| {
        warn!(%err, "Rejected index scheme for lattice dimensions");
        GraphError::from(err)
    })
}
