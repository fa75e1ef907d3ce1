//! Binary-heap open list.
//!
//! The heap stores point handles; costs live in each record's search state,
//! which also remembers the record's current heap index. That makes
//! decrease-key an in-place sift-up instead of a linear search.
//!
//! Ordering: smaller `f = g + h` first, ties broken by smaller `h`.

use std::cmp::Ordering;

use crate::graph::PointGraph;
use crate::point::{PointHandle, SearchState};

/// Min-heap of points awaiting expansion.
#[derive(Debug, Default)]
pub(crate) struct OpenList {
    heap: Vec<PointHandle>,
}

impl OpenList {
    pub(crate) fn clear(&mut self) {
        self.heap.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Best point without removing it.
    pub(crate) fn peek(&self) -> Option<PointHandle> {
        self.heap.first().copied()
    }

    /// Inserts a point whose costs are already set.
    pub(crate) fn push(&mut self, graph: &mut PointGraph, handle: PointHandle) {
        self.heap.push(handle);
        self.bubble_up(graph, self.heap.len() - 1, handle);
    }

    /// Removes and returns the best point.
    pub(crate) fn pop(&mut self, graph: &mut PointGraph) -> Option<PointHandle> {
        let top = self.peek()?;
        let last = self.heap.pop()?;
        if !self.heap.is_empty() {
            self.trickle_down(graph, 0, last);
        }
        Some(top)
    }

    /// Restores heap order after a point's cost decreased.
    pub(crate) fn decrease(&mut self, graph: &mut PointGraph, handle: PointHandle) {
        let Some(index) = graph.record(handle).map(|r| r.search.heap_index) else {
            return;
        };
        if self.heap.get(index) == Some(&handle) {
            self.bubble_up(graph, index, handle);
        }
    }

    fn bubble_up(&mut self, graph: &mut PointGraph, mut i: usize, handle: PointHandle) {
        let key = state_of(graph, handle);

        while i > 0 {
            let parent = (i - 1) / 2;
            let parent_handle = self.heap[parent];
            if !precedes(&key, &state_of(graph, parent_handle)) {
                break;
            }

            self.place(graph, i, parent_handle);
            i = parent;
        }

        self.place(graph, i, handle);
    }

    fn trickle_down(&mut self, graph: &mut PointGraph, mut i: usize, handle: PointHandle) {
        let key = state_of(graph, handle);
        let size = self.heap.len();

        loop {
            let child1 = 2 * i + 1;
            if child1 >= size {
                break;
            }

            let child2 = child1 + 1;
            let mut min_child = child1;
            if child2 < size
                && precedes(
                    &state_of(graph, self.heap[child2]),
                    &state_of(graph, self.heap[child1]),
                )
            {
                min_child = child2;
            }

            let min_handle = self.heap[min_child];
            if !precedes(&state_of(graph, min_handle), &key) {
                break;
            }

            self.place(graph, i, min_handle);
            i = min_child;
        }

        self.place(graph, i, handle);
    }

    fn place(&mut self, graph: &mut PointGraph, i: usize, handle: PointHandle) {
        self.heap[i] = handle;
        if let Some(record) = graph.record_mut(handle) {
            record.search.heap_index = i;
        }
    }
}

/// Missing records sort last.
fn state_of(graph: &PointGraph, handle: PointHandle) -> SearchState {
    graph.record(handle).map_or(
        SearchState {
            g: f64::INFINITY,
            h: f64::INFINITY,
            ..SearchState::default()
        },
        |r| r.search,
    )
}

fn precedes(a: &SearchState, b: &SearchState) -> bool {
    match a.f().total_cmp(&b.f()) {
        Ordering::Less => true,
        Ordering::Equal => a.h < b.h,
        Ordering::Greater => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lattice_spatial::{Dimensions, LatticeCoord};

    /// Graph with one point per `(g, h)` pair, on the x axis.
    fn graph_with_costs(costs: &[(f64, f64)]) -> (PointGraph, Vec<PointHandle>) {
        let mut graph = PointGraph::new(Dimensions::new(16, 1, 1).unwrap());
        let mut handles = Vec::new();
        for (x, (g, h)) in (0..).zip(costs) {
            let id = graph.add_point(LatticeCoord::new(x, 0, 0)).unwrap();
            let handle = graph.handle(id).unwrap();
            let record = graph.record_mut(handle).unwrap();
            record.search.g = *g;
            record.search.h = *h;
            handles.push(handle);
        }
        (graph, handles)
    }

    fn drain(open: &mut OpenList, graph: &mut PointGraph) -> Vec<PointHandle> {
        std::iter::from_fn(|| open.pop(graph)).collect()
    }

    #[test]
    fn test_pops_in_f_order() {
        let (mut graph, h) = graph_with_costs(&[(5.0, 0.0), (1.0, 1.0), (3.0, 0.5), (0.0, 9.0), (0.5, 0.0)]);
        let mut open = OpenList::default();
        for handle in &h {
            open.push(&mut graph, *handle);
        }
        assert_eq!(open.len(), 5);

        let order = drain(&mut open, &mut graph);
        assert_eq!(order, vec![h[4], h[1], h[2], h[0], h[3]]);
        assert!(open.is_empty());
    }

    #[test]
    fn test_ties_prefer_smaller_h() {
        let (mut graph, h) = graph_with_costs(&[(1.0, 3.0), (3.0, 1.0), (2.0, 2.0)]);
        let mut open = OpenList::default();
        for handle in &h {
            open.push(&mut graph, *handle);
        }
        assert_eq!(drain(&mut open, &mut graph), vec![h[1], h[2], h[0]]);
    }

    #[test]
    fn test_decrease_moves_point_up() {
        let (mut graph, h) = graph_with_costs(&[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)]);
        let mut open = OpenList::default();
        for handle in &h {
            open.push(&mut graph, *handle);
        }

        graph.record_mut(h[3]).unwrap().search.g = 0.5;
        open.decrease(&mut graph, h[3]);

        assert_eq!(open.peek(), Some(h[3]));
        assert_eq!(drain(&mut open, &mut graph), vec![h[3], h[0], h[1], h[2]]);
    }

    #[test]
    fn test_heap_index_tracks_position() {
        let (mut graph, h) = graph_with_costs(&[(4.0, 0.0), (3.0, 0.0), (2.0, 0.0), (1.0, 0.0)]);
        let mut open = OpenList::default();
        for handle in &h {
            open.push(&mut graph, *handle);
        }
        for (i, handle) in open.heap.iter().enumerate() {
            assert_eq!(graph.record(*handle).unwrap().search.heap_index, i);
        }
    }

    #[test]
    fn test_empty_pop_is_none() {
        let mut graph = PointGraph::default();
        let mut open = OpenList::default();
        assert_eq!(open.pop(&mut graph), None);
        assert_eq!(open.peek(), None);
    }
}
