//! Theta* search over a [`PointGraph`].
//!
//! Theta* is A* with one change: when a neighbor is relaxed, the engine first
//! tries to attach it directly to the expanded point's own predecessor. If
//! that grandparent can see the neighbor, the path skips the intermediate
//! point and the resulting route is no longer restricted to the graph's edge
//! directions.
//!
//! # Algorithm
//!
//! 1. Seed the open list with the start point (`g = 0`)
//! 2. Peek the point with the lowest `f = g + h`; stop if it is the goal
//! 3. Pop and close it, then relax each enabled, unclosed neighbor:
//!    - candidate parent is the grandparent if shortcutting is on and the
//!      grandparent has line of sight to the neighbor, else the popped point
//!    - accept when the neighbor is new to this search or the candidate
//!      improves its `g`
//! 4. Walk predecessors back from the goal
//!
//! Per-search state lives on the point records and is invalidated by bumping
//! a generation counter, so starting a query costs nothing proportional to
//! the graph size.
//!
//! # Example
//!
//! ```
//! use theta_pathfind::{build_bidirectional_grid, ThetaStar3D};
//! use lattice_spatial::{Dimensions, LatticeCoord};
//!
//! let mut engine = ThetaStar3D::zero_based(Dimensions::new(5, 5, 1).unwrap(), true);
//! build_bidirectional_grid(engine.graph_mut(), None);
//! engine.enable_line_of_sight_check(true);
//!
//! let path = engine.point_path_from_positions(LatticeCoord::new(0, 0, 0), LatticeCoord::new(4, 4, 0));
//! assert_eq!(path, vec![LatticeCoord::new(0, 0, 0), LatticeCoord::new(4, 4, 0)]);
//! ```

use std::fmt;

use lattice_spatial::{Dimensions, LatticeCoord, PointId, line_of_sight};
use nalgebra::Point3;
use theta_types::{GraphError, Heuristic, ThetaStarConfig};
use tracing::{debug, trace, warn};

use crate::graph::PointGraph;
use crate::heuristics::{compute_heuristic, edge_cost};
use crate::off_graph::snap_toward;
use crate::open_list::OpenList;
use crate::point::{Point, PointHandle};

/// Cost between two points, used for edge costs and goal estimates.
pub type CostFn = Box<dyn Fn(&Point, &Point) -> f64>;

/// Visibility test between two lattice coordinates of a graph.
pub type SightFn = Box<dyn Fn(&PointGraph, LatticeCoord, LatticeCoord) -> bool>;

/// Statistics from the most recent search.
///
/// # Example
///
/// ```
/// use theta_pathfind::{build_bidirectional_grid, ThetaStar3D};
/// use lattice_spatial::{Dimensions, LatticeCoord};
///
/// let mut engine = ThetaStar3D::zero_based(Dimensions::new(3, 1, 1).unwrap(), false);
/// build_bidirectional_grid(engine.graph_mut(), None);
/// engine.point_path_from_positions(LatticeCoord::new(0, 0, 0), LatticeCoord::new(2, 0, 0));
///
/// let stats = engine.last_search_stats();
/// assert_eq!(stats.generation(), 1);
/// assert_eq!(stats.path_len(), 3);
/// assert!(stats.points_expanded() >= 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    points_expanded: usize,
    open_set_size: usize,
    generation: u64,
    path_len: usize,
}

impl SearchStats {
    /// Number of points popped and expanded.
    #[must_use]
    pub const fn points_expanded(&self) -> usize {
        self.points_expanded
    }

    /// Points still waiting in the open list when the search ended.
    #[must_use]
    pub const fn open_set_size(&self) -> usize {
        self.open_set_size
    }

    /// Generation stamp the search ran under.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of points on the returned path, zero if none was found.
    #[must_use]
    pub const fn path_len(&self) -> usize {
        self.path_len
    }

    /// Returns `true` if the search produced a path.
    #[must_use]
    pub const fn found(&self) -> bool {
        self.path_len > 0
    }
}

/// Any-angle path search engine over a sparse 3D lattice graph.
///
/// The engine owns its [`PointGraph`]; build the graph through
/// [`graph_mut`](Self::graph_mut) and query paths between existing points.
/// Queries take `&mut self` because search state is stored on the points.
///
/// Edge cost, heuristic and visibility are replaceable closures; each has a
/// `reset_*` method restoring the built-in behavior.
pub struct ThetaStar3D {
    graph: PointGraph,
    edge_cost: CostFn,
    heuristic: CostFn,
    builtin_heuristic: Heuristic,
    line_of_sight: SightFn,
    line_of_sight_enabled: bool,
    generation: u64,
    open: OpenList,
    stats: SearchStats,
}

impl ThetaStar3D {
    /// Creates an engine over an empty graph with centered indexing.
    ///
    /// Shortcutting starts disabled.
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self::with_graph(PointGraph::new(dimensions))
    }

    /// Creates an engine around an existing graph.
    #[must_use]
    pub fn with_graph(graph: PointGraph) -> Self {
        Self {
            graph,
            edge_cost: Box::new(edge_cost),
            heuristic: builtin_heuristic(Heuristic::default()),
            builtin_heuristic: Heuristic::default(),
            line_of_sight: Box::new(default_line_of_sight),
            line_of_sight_enabled: false,
            generation: 0,
            open: OpenList::default(),
            stats: SearchStats::default(),
        }
    }

    /// Creates an engine from a configuration.
    ///
    /// A heuristic that may overestimate once shortcutting is enabled is
    /// accepted but logged, since paths may then be suboptimal.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidConfig`] if the configuration fails
    /// validation.
    ///
    /// # Example
    ///
    /// ```
    /// use theta_pathfind::ThetaStar3D;
    /// use theta_types::{Indexing, ThetaStarConfig};
    /// use lattice_spatial::{Dimensions, LatticeCoord};
    ///
    /// let config = ThetaStarConfig::new()
    ///     .with_dimensions(Dimensions::new(4, 4, 4).unwrap())
    ///     .with_indexing(Indexing::ZeroBased)
    ///     .with_line_of_sight(true);
    ///
    /// let engine = ThetaStar3D::with_config(&config).unwrap();
    /// assert!(engine.is_line_of_sight_check_enabled());
    /// assert!(!engine.graph().is_position_valid(LatticeCoord::new(-1, 0, 0)));
    /// ```
    pub fn with_config(config: &ThetaStarConfig) -> Result<Self, GraphError> {
        config.validate()?;

        let heuristic = config.heuristic();
        if !heuristic.is_admissible_for(config.line_of_sight()) {
            warn!(
                ?heuristic,
                "Heuristic may overestimate with line-of-sight enabled; paths may be suboptimal"
            );
        }

        let mut graph = PointGraph::with_scheme(config.dimensions(), config.indexing().scheme())?;
        if let Some(capacity) = config.reserve() {
            graph.reserve(capacity);
        }

        let mut engine = Self::with_graph(graph);
        engine.line_of_sight_enabled = config.line_of_sight();
        engine.builtin_heuristic = heuristic;
        engine.heuristic = builtin_heuristic(heuristic);
        Ok(engine)
    }

    /// Creates an engine with zero-based indexing, coordinates in
    /// `[0, D-1]` per axis.
    ///
    /// With `reserve` set, storage for every lattice cell is allocated up
    /// front. The graph is left empty; see
    /// [`build_bidirectional_grid`](crate::build_bidirectional_grid).
    #[must_use]
    pub fn zero_based(dimensions: Dimensions, reserve: bool) -> Self {
        let mut graph = PointGraph::zero_based(dimensions);
        if reserve {
            graph.reserve(usize::try_from(dimensions.volume()).unwrap_or(usize::MAX));
        }
        Self::with_graph(graph)
    }

    /// The underlying graph.
    #[must_use]
    pub const fn graph(&self) -> &PointGraph {
        &self.graph
    }

    /// Mutable access to the underlying graph.
    pub const fn graph_mut(&mut self) -> &mut PointGraph {
        &mut self.graph
    }

    // =========================================================================
    // Behavior seams
    // =========================================================================

    /// Turns grandparent shortcutting on or off.
    pub const fn enable_line_of_sight_check(&mut self, enable: bool) {
        self.line_of_sight_enabled = enable;
    }

    /// Whether grandparent shortcutting is on.
    #[must_use]
    pub const fn is_line_of_sight_check_enabled(&self) -> bool {
        self.line_of_sight_enabled
    }

    /// Replaces the edge cost. Costs must be finite and non-negative.
    pub fn set_edge_cost(&mut self, cost: impl Fn(&Point, &Point) -> f64 + 'static) {
        self.edge_cost = Box::new(cost);
    }

    /// Restores the Euclidean edge cost.
    pub fn reset_edge_cost(&mut self) {
        self.edge_cost = Box::new(edge_cost);
    }

    /// Replaces the goal estimate.
    ///
    /// Paths are optimal only if the estimate never exceeds the true
    /// remaining cost.
    pub fn set_heuristic(&mut self, heuristic: impl Fn(&Point, &Point) -> f64 + 'static) {
        self.heuristic = Box::new(heuristic);
    }

    /// Restores the built-in heuristic the engine was configured with.
    pub fn reset_heuristic(&mut self) {
        self.heuristic = builtin_heuristic(self.builtin_heuristic);
    }

    /// Replaces the visibility test used for shortcutting.
    pub fn set_line_of_sight(
        &mut self,
        sight: impl Fn(&PointGraph, LatticeCoord, LatticeCoord) -> bool + 'static,
    ) {
        self.line_of_sight = Box::new(sight);
    }

    /// Restores the rasterized visibility test, where only disabled points
    /// block.
    pub fn reset_line_of_sight(&mut self) {
        self.line_of_sight = Box::new(default_line_of_sight);
    }

    /// Statistics from the most recent query that reached the search.
    #[must_use]
    pub const fn last_search_stats(&self) -> SearchStats {
        self.stats
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Identifiers along the path between two positions.
    ///
    /// Empty if either position holds no point or the goal is unreachable.
    pub fn id_path_from_positions(&mut self, from: LatticeCoord, to: LatticeCoord) -> Vec<PointId> {
        let path = self.path_between_positions(from, to);
        self.ids_of(&path)
    }

    /// Coordinates along the path between two positions.
    ///
    /// Empty if either position holds no point or the goal is unreachable.
    pub fn point_path_from_positions(
        &mut self,
        from: LatticeCoord,
        to: LatticeCoord,
    ) -> Vec<LatticeCoord> {
        let path = self.path_between_positions(from, to);
        self.coords_of(&path)
    }

    /// Identifiers along the path between two point identifiers.
    ///
    /// Empty if either identifier is unknown or the goal is unreachable.
    pub fn id_path_from_ids(&mut self, from: PointId, to: PointId) -> Vec<PointId> {
        let path = self.path_between_ids(from, to);
        self.ids_of(&path)
    }

    /// Coordinates along the path between two point identifiers.
    ///
    /// Empty if either identifier is unknown or the goal is unreachable.
    pub fn point_path_from_ids(&mut self, from: PointId, to: PointId) -> Vec<LatticeCoord> {
        let path = self.path_between_ids(from, to);
        self.coords_of(&path)
    }

    /// Identifiers along the path, distinguishing why no path was returned.
    ///
    /// # Errors
    ///
    /// - [`GraphError::MissingId`] if either identifier has no point
    /// - [`GraphError::NoPathFound`] if the goal is unreachable
    pub fn try_id_path_from_ids(&mut self, from: PointId, to: PointId) -> Result<Vec<PointId>, GraphError> {
        let start = self.graph.handle(from).ok_or(GraphError::MissingId(from))?;
        let goal = self.graph.handle(to).ok_or(GraphError::MissingId(to))?;

        let path = self
            .search(start, goal)
            .ok_or(GraphError::NoPathFound { from, to })?;
        Ok(self.ids_of(&path))
    }

    /// Path between two arbitrary positions.
    ///
    /// Each position is snapped onto the lattice, leaning toward the other
    /// (see [`snap_toward`]). The search runs between the snapped points and
    /// the unsnapped positions are spliced on at both ends, so a non-empty
    /// result always starts with `from` and ends with `to`.
    ///
    /// Empty if a position is not finite, a snapped cell holds no point, or
    /// the goal is unreachable.
    ///
    /// # Example
    ///
    /// ```
    /// use theta_pathfind::{build_bidirectional_grid, ThetaStar3D};
    /// use lattice_spatial::Dimensions;
    /// use nalgebra::Point3;
    ///
    /// let mut engine = ThetaStar3D::zero_based(Dimensions::new(6, 6, 1).unwrap(), false);
    /// build_bidirectional_grid(engine.graph_mut(), None);
    /// engine.enable_line_of_sight_check(true);
    ///
    /// let from = Point3::new(0.4, 0.2, 0.0);
    /// let to = Point3::new(4.6, 3.1, 0.0);
    /// let path = engine.point_path_from_off_graph_positions(from, to);
    ///
    /// assert_eq!(path.first(), Some(&from));
    /// assert_eq!(path.last(), Some(&to));
    /// ```
    pub fn point_path_from_off_graph_positions(
        &mut self,
        from: Point3<f64>,
        to: Point3<f64>,
    ) -> Vec<Point3<f64>> {
        let bounds = self.graph.bounds();
        let (Some(start), Some(goal)) = (snap_toward(from, to, bounds), snap_toward(to, from, bounds))
        else {
            warn!(?from, ?to, "Off-graph endpoint is not finite");
            return Vec::new();
        };

        let path = self.point_path_from_positions(start, goal);
        if path.is_empty() {
            return Vec::new();
        }

        let mut spliced = Vec::with_capacity(path.len() + 2);
        spliced.push(from);
        spliced.extend(path.into_iter().map(LatticeCoord::to_point));
        spliced.push(to);
        spliced
    }

    // =========================================================================
    // Search
    // =========================================================================

    fn path_between_positions(&mut self, from: LatticeCoord, to: LatticeCoord) -> Vec<PointHandle> {
        let start = self.resolve_position(from, "start");
        let goal = self.resolve_position(to, "goal");
        match (start, goal) {
            (Some(start), Some(goal)) => self.search(start, goal).unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn path_between_ids(&mut self, from: PointId, to: PointId) -> Vec<PointHandle> {
        let start = self.resolve_id(from, "start");
        let goal = self.resolve_id(to, "goal");
        match (start, goal) {
            (Some(start), Some(goal)) => self.search(start, goal).unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn resolve_position(&self, coord: LatticeCoord, role: &str) -> Option<PointHandle> {
        let handle = self.graph.point_id(coord).and_then(|id| self.graph.handle(id));
        if handle.is_none() {
            warn!(%coord, role, "Path endpoint has no point");
        }
        handle
    }

    fn resolve_id(&self, id: PointId, role: &str) -> Option<PointHandle> {
        let handle = self.graph.handle(id);
        if handle.is_none() {
            warn!(%id, role, "Path endpoint has no point");
        }
        handle
    }

    /// Runs one search; `None` if the goal was never reached.
    ///
    /// A disabled start is still expanded, while disabled neighbors, and
    /// therefore a disabled goal, are never entered.
    fn search(&mut self, start: PointHandle, goal: PointHandle) -> Option<Vec<PointHandle>> {
        let generation = self.advance_generation();
        self.open.clear();

        let h = self.estimate(start, goal);
        if let Some(record) = self.graph.record_mut(start) {
            record.search.previous = None;
            record.search.g = 0.0;
            record.search.h = h;
            record.search.opened = generation;
        }
        self.open.push(&mut self.graph, start);

        let mut expanded = 0_usize;
        let mut found = false;

        while !self.open.is_empty() {
            let Some(current) = self.open.peek() else {
                break;
            };
            if current == goal {
                found = true;
                break;
            }

            self.open.pop(&mut self.graph);
            if let Some(record) = self.graph.record_mut(current) {
                record.search.closed = generation;
                trace!(point = %record.point.coord(), g = record.search.g, "Expanding point");
            }
            expanded += 1;

            self.expand(current, goal, generation);
        }

        let path = found.then(|| self.reconstruct(start, goal));

        self.stats = SearchStats {
            points_expanded: expanded,
            open_set_size: self.open.len(),
            generation,
            path_len: path.as_ref().map_or(0, Vec::len),
        };
        debug!(
            generation,
            expanded,
            path_len = self.stats.path_len,
            found,
            "Path search finished"
        );

        path
    }

    fn expand(&mut self, current: PointHandle, goal: PointHandle, generation: u64) {
        let Some(record) = self.graph.record(current) else {
            return;
        };
        let grandparent = record
            .search
            .previous
            .filter(|_| self.line_of_sight_enabled)
            .and_then(|p| self.graph.record(p).map(|r| (p, r.point.coord())));

        for neighbor in self.graph.neighbor_handles(current) {
            let Some(n) = self.graph.record(neighbor) else {
                continue;
            };
            if !n.point.is_enabled() || n.search.closed == generation {
                continue;
            }
            let opened = n.search.opened == generation;
            let known_g = n.search.g;
            let neighbor_coord = n.point.coord();

            let parent = match grandparent {
                Some((p, p_coord)) if (self.line_of_sight)(&self.graph, p_coord, neighbor_coord) => p,
                _ => current,
            };
            let Some(parent_g) = self.graph.record(parent).map(|r| r.search.g) else {
                continue;
            };

            let tentative = parent_g + self.cost(parent, neighbor);
            if opened && tentative >= known_g {
                continue;
            }
            let h = self.estimate(neighbor, goal);

            let Some(n) = self.graph.record_mut(neighbor) else {
                continue;
            };
            n.search.g = tentative;
            n.search.h = h;
            n.search.previous = Some(parent);

            if opened {
                self.open.decrease(&mut self.graph, neighbor);
            } else {
                n.search.opened = generation;
                self.open.push(&mut self.graph, neighbor);
            }
        }
    }

    fn reconstruct(&self, start: PointHandle, goal: PointHandle) -> Vec<PointHandle> {
        let mut path = vec![goal];
        let mut current = goal;

        // Predecessors form a tree rooted at `start`; the cap only guards
        // against corrupted state.
        while current != start && path.len() <= self.graph.point_count() {
            let Some(previous) = self.graph.record(current).and_then(|r| r.search.previous) else {
                break;
            };
            path.push(previous);
            current = previous;
        }

        path.reverse();
        path
    }

    /// Next generation stamp. Before the counter would wrap, every stored
    /// stamp is zeroed so stale records cannot match a reused value.
    fn advance_generation(&mut self) -> u64 {
        if self.generation == u64::MAX {
            debug!("Search generation exhausted, resetting stamps");
            self.graph.reset_search_stamps();
            self.generation = 0;
        }
        self.generation += 1;
        self.generation
    }

    fn estimate(&self, from: PointHandle, to: PointHandle) -> f64 {
        match (self.graph.record(from), self.graph.record(to)) {
            (Some(a), Some(b)) => (self.heuristic)(&a.point, &b.point),
            _ => f64::INFINITY,
        }
    }

    fn cost(&self, from: PointHandle, to: PointHandle) -> f64 {
        match (self.graph.record(from), self.graph.record(to)) {
            (Some(a), Some(b)) => (self.edge_cost)(&a.point, &b.point),
            _ => f64::INFINITY,
        }
    }

    fn ids_of(&self, path: &[PointHandle]) -> Vec<PointId> {
        path.iter()
            .filter_map(|h| self.graph.record(*h).map(|r| r.point.id()))
            .collect()
    }

    fn coords_of(&self, path: &[PointHandle]) -> Vec<LatticeCoord> {
        path.iter()
            .filter_map(|h| self.graph.record(*h).map(|r| r.point.coord()))
            .collect()
    }
}

impl Default for ThetaStar3D {
    fn default() -> Self {
        Self::with_graph(PointGraph::default())
    }
}

impl fmt::Debug for ThetaStar3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThetaStar3D")
            .field("graph", &self.graph)
            .field("builtin_heuristic", &self.builtin_heuristic)
            .field("line_of_sight_enabled", &self.line_of_sight_enabled)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

fn builtin_heuristic(heuristic: Heuristic) -> CostFn {
    Box::new(move |from: &Point, to: &Point| compute_heuristic(from.coord(), to.coord(), heuristic))
}

/// Only points that exist and are disabled block sight.
fn default_line_of_sight(graph: &PointGraph, from: LatticeCoord, to: LatticeCoord) -> bool {
    line_of_sight(from, to, |cell| graph.is_position_disabled(cell))
}
