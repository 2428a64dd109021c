use std::collections::VecDeque;

use tracing::debug;

use crate::{
    config::GraphConfig,
    errors::{AntennaGraphError, GraphResult},
    sink::VertexRecord,
};

/// Stable handle to a vertex slot.
///
/// Slots are never reused, not even after [`AntennaGraph::clear`], so a key
/// taken before a removal can only go stale; it never starts pointing at a
/// different vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey(pub(crate) usize);

impl VertexKey {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Directed, weighted link stored in the origin's adjacency list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub target: VertexKey,
    pub weight: f32,
}

/// An antenna: a frequency label placed at grid coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    pub id: i64,
    pub frequency: char,
    pub x: i32,
    pub y: i32,
    pub(crate) visited: bool,
    pub(crate) adjacency: VecDeque<Edge>,
}

impl Vertex {
    /// Creates an unvisited vertex with no edges.
    pub fn new(id: i64, frequency: char, x: i32, y: i32) -> Self {
        Self {
            id,
            frequency,
            x,
            y,
            visited: false,
            adjacency: VecDeque::new(),
        }
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Outgoing edges, most recently added first.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.adjacency.iter()
    }

    pub fn degree(&self) -> usize {
        self.adjacency.len()
    }

    pub fn record(&self) -> VertexRecord {
        VertexRecord {
            id: self.id,
            frequency: self.frequency,
            x: self.x,
            y: self.y,
        }
    }
}

/// Owns every vertex and, through them, every edge.
///
/// Vertices live in an append-only slot arena. Removing a vertex empties its
/// slot but does not give the memory back, so a graph that keeps adding and
/// removing vertices grows until [`AntennaGraph::clear`] drops the arena.
#[derive(Clone, Debug, Default)]
pub struct AntennaGraph {
    /// Key of `slots[0]`; moves past every key handed out when cleared.
    base: usize,
    slots: Vec<Option<Vertex>>,
    order: Vec<VertexKey>,
    rows: i32,
    cols: i32,
}

impl AntennaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &GraphConfig) -> GraphResult<Self> {
        let mut graph = Self::new();
        if let Some(capacity) = config.reserve_vertex_capacity {
            graph
                .slots
                .try_reserve(capacity)
                .map_err(|e| AntennaGraphError::allocation(e.to_string()))?;
            graph
                .order
                .try_reserve(capacity)
                .map_err(|e| AntennaGraphError::allocation(e.to_string()))?;
        }
        Ok(graph)
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Appends a vertex at the tail of the insertion order.
    ///
    /// `rows`/`cols` grow to at least the vertex's `y`/`x`.
    pub fn add_vertex(&mut self, vertex: Vertex) -> GraphResult<VertexKey> {
        self.slots
            .try_reserve(1)
            .map_err(|e| AntennaGraphError::allocation(format!("vertex {}: {e}", vertex.id)))?;
        self.order
            .try_reserve(1)
            .map_err(|e| AntennaGraphError::allocation(format!("vertex {}: {e}", vertex.id)))?;
        self.rows = self.rows.max(vertex.y);
        self.cols = self.cols.max(vertex.x);
        let key = VertexKey(self.base + self.slots.len());
        self.slots.push(Some(vertex));
        self.order.push(key);
        Ok(key)
    }

    pub fn vertex(&self, key: VertexKey) -> Option<&Vertex> {
        let slot = key.0.checked_sub(self.base)?;
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub(crate) fn vertex_mut(&mut self, key: VertexKey) -> Option<&mut Vertex> {
        let slot = key.0.checked_sub(self.base)?;
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    pub fn contains(&self, key: VertexKey) -> bool {
        self.vertex(key).is_some()
    }

    /// Live keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = VertexKey> + '_ {
        self.order.iter().copied()
    }

    /// Live vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.order.iter().filter_map(|key| self.vertex(*key))
    }

    pub(crate) fn vertices_mut(&mut self) -> impl Iterator<Item = &mut Vertex> {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    /// First vertex in insertion order placed at `(x, y)`.
    pub fn find_by_coordinates(&self, x: i32, y: i32) -> Option<VertexKey> {
        self.keys().find(|key| {
            self.vertex(*key)
                .is_some_and(|vertex| vertex.x == x && vertex.y == y)
        })
    }

    pub fn find_by_id(&self, id: i64) -> Option<VertexKey> {
        self.keys()
            .find(|key| self.vertex(*key).is_some_and(|vertex| vertex.id == id))
    }

    pub fn set_frequency(&mut self, key: VertexKey, frequency: char) -> GraphResult<()> {
        let vertex = self
            .vertex_mut(key)
            .ok_or_else(|| AntennaGraphError::not_found(format!("vertex slot {}", key.0)))?;
        vertex.frequency = frequency;
        Ok(())
    }

    /// Removes the vertex with `id` together with every edge pointing at it.
    ///
    /// On `NotFound` the graph is left untouched. `rows`/`cols` never shrink.
    pub fn remove_by_id(&mut self, id: i64) -> GraphResult<Vertex> {
        let key = self
            .find_by_id(id)
            .ok_or_else(|| AntennaGraphError::not_found(format!("vertex {id}")))?;
        let incoming = self.remove_edges_to_vertex(key)?;
        let outgoing = self.free_adjacency(key)?;
        let vertex = key
            .0
            .checked_sub(self.base)
            .and_then(|slot| self.slots.get_mut(slot))
            .and_then(Option::take)
            .ok_or_else(|| AntennaGraphError::graph(format!("vertex {id} vanished during removal")))?;
        self.order.retain(|candidate| *candidate != key);
        debug!(id, incoming, outgoing, "removed vertex");
        Ok(vertex)
    }

    /// Drops every vertex and edge and resets the dimensions.
    ///
    /// Keys handed out before the call stay stale afterwards.
    pub fn clear(&mut self) {
        self.base += self.slots.len();
        self.slots = Vec::new();
        self.order.clear();
        self.rows = 0;
        self.cols = 0;
    }

    /// Grows the recorded grid dimensions; never shrinks them.
    pub(crate) fn extend_dimensions(&mut self, rows: i32, cols: i32) {
        self.rows = self.rows.max(rows);
        self.cols = self.cols.max(cols);
    }

    pub fn visited_count(&self) -> usize {
        self.vertices().filter(|vertex| vertex.visited).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_key_does_not_alias_new_vertex() {
        let mut graph = AntennaGraph::new();
        let first = graph.add_vertex(Vertex::new(1, 'A', 0, 0)).expect("add");
        graph.remove_by_id(1).expect("remove");
        let second = graph.add_vertex(Vertex::new(1, 'B', 0, 0)).expect("add");
        assert_ne!(first, second);
        assert!(graph.vertex(first).is_none());
        assert_eq!(graph.vertex(second).map(|v| v.frequency), Some('B'));
    }

    #[test]
    fn dimensions_track_largest_coordinates() {
        let mut graph = AntennaGraph::new();
        graph.add_vertex(Vertex::new(1, 'A', 4, 2)).expect("add");
        graph.add_vertex(Vertex::new(2, 'A', 1, 7)).expect("add");
        assert_eq!((graph.rows(), graph.cols()), (7, 4));
        graph.remove_by_id(2).expect("remove");
        assert_eq!((graph.rows(), graph.cols()), (7, 4));
    }

    #[test]
    fn clear_resets_everything() {
        let mut graph = AntennaGraph::new();
        graph.add_vertex(Vertex::new(1, 'A', 3, 3)).expect("add");
        graph.clear();
        assert!(graph.is_empty());
        assert_eq!((graph.rows(), graph.cols()), (0, 0));
    }

    #[test]
    fn key_from_before_clear_stays_stale() {
        let mut graph = AntennaGraph::new();
        let old = graph.add_vertex(Vertex::new(1, 'A', 0, 0)).expect("add");
        graph.clear();
        let new = graph.add_vertex(Vertex::new(42, 'Z', 0, 0)).expect("add");
        assert_ne!(old, new);
        assert!(graph.vertex(old).is_none());
        assert!(graph.set_frequency(old, 'B').is_err());
        assert_eq!(graph.vertex(new).map(|v| (v.id, v.frequency)), Some((42, 'Z')));
    }

    #[test]
    fn clear_releases_removed_slots() {
        let mut graph = AntennaGraph::new();
        for id in 0..64 {
            graph.add_vertex(Vertex::new(id, 'A', 0, 0)).expect("add");
            graph.remove_by_id(id).expect("remove");
        }
        assert_eq!(graph.slots.len(), 64);
        graph.clear();
        assert!(graph.slots.is_empty());
        let key = graph.add_vertex(Vertex::new(1, 'A', 0, 0)).expect("add");
        assert_eq!(key.index(), 64);
    }
}
