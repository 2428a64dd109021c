//! Edge store: adjacency lists hanging off each vertex.

use ahash::AHashMap;
use tracing::debug;

use crate::{
    errors::{AntennaGraphError, GraphResult},
    graph::{AntennaGraph, Edge, VertexKey},
};

pub const ORTHOGONAL_WEIGHT: f32 = 1.0;
pub const DIAGONAL_WEIGHT: f32 = 1.414;

/// 8-neighbourhood offsets: four orthogonal cells first, then the diagonals.
const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

impl AntennaGraph {
    /// Prepends an edge to `origin`'s adjacency list.
    pub fn add_edge(
        &mut self,
        origin: VertexKey,
        destination: VertexKey,
        weight: f32,
    ) -> GraphResult<()> {
        if !self.contains(destination) {
            return Err(AntennaGraphError::invalid_input(format!(
                "edge destination slot {} is not in the graph",
                destination.index()
            )));
        }
        let vertex = self.vertex_mut(origin).ok_or_else(|| {
            AntennaGraphError::invalid_input(format!(
                "edge origin slot {} is not in the graph",
                origin.index()
            ))
        })?;
        vertex
            .adjacency
            .try_reserve(1)
            .map_err(|e| AntennaGraphError::allocation(format!("edge: {e}")))?;
        vertex.adjacency.push_front(Edge {
            target: destination,
            weight,
        });
        Ok(())
    }

    /// Links every pair of same-frequency vertices that touch on the grid.
    ///
    /// A pair is created only from the lower id towards the higher id, and
    /// then in both directions. Returns the number of directed edges added.
    pub fn build_adjacency(&mut self) -> GraphResult<usize> {
        let mut by_coordinates: AHashMap<(i32, i32), VertexKey> = AHashMap::new();
        for key in self.keys() {
            if let Some(vertex) = self.vertex(key) {
                by_coordinates.entry((vertex.x, vertex.y)).or_insert(key);
            }
        }

        let mut pairs = Vec::new();
        for key in self.keys() {
            let Some(vertex) = self.vertex(key) else {
                continue;
            };
            for (slot, (dx, dy)) in NEIGHBOUR_OFFSETS.iter().enumerate() {
                // Cells past the edge of the i32 plane have no neighbours.
                let (Some(nx), Some(ny)) =
                    (vertex.x.checked_add(*dx), vertex.y.checked_add(*dy))
                else {
                    continue;
                };
                let Some(&neighbour_key) = by_coordinates.get(&(nx, ny)) else {
                    continue;
                };
                let Some(neighbour) = self.vertex(neighbour_key) else {
                    continue;
                };
                if neighbour.frequency != vertex.frequency || neighbour.id <= vertex.id {
                    continue;
                }
                let weight = if slot < 4 {
                    ORTHOGONAL_WEIGHT
                } else {
                    DIAGONAL_WEIGHT
                };
                pairs.push((key, neighbour_key, weight));
            }
        }

        for &(origin, neighbour, weight) in &pairs {
            self.add_edge(origin, neighbour, weight)?;
            self.add_edge(neighbour, origin, weight)?;
        }
        debug!(pairs = pairs.len(), "built adjacency");
        Ok(pairs.len() * 2)
    }

    /// Unlinks every edge, in any adjacency list, that targets `target`.
    ///
    /// Remaining edges keep their relative order. Returns how many were removed.
    pub fn remove_edges_to_vertex(&mut self, target: VertexKey) -> GraphResult<usize> {
        if !self.contains(target) {
            return Err(AntennaGraphError::invalid_input(format!(
                "target slot {} is not in the graph",
                target.index()
            )));
        }
        let mut removed = 0;
        for vertex in self.vertices_mut() {
            let before = vertex.adjacency.len();
            vertex.adjacency.retain(|edge| edge.target != target);
            removed += before - vertex.adjacency.len();
        }
        Ok(removed)
    }

    /// Empties one vertex's own adjacency list.
    ///
    /// Edges elsewhere that point at this vertex are left alone; see
    /// [`AntennaGraph::remove_edges_to_vertex`].
    pub fn free_adjacency(&mut self, key: VertexKey) -> GraphResult<usize> {
        let vertex = self.vertex_mut(key).ok_or_else(|| {
            AntennaGraphError::invalid_input(format!(
                "vertex slot {} is not in the graph",
                key.index()
            ))
        })?;
        let freed = vertex.adjacency.len();
        vertex.adjacency = Default::default();
        Ok(freed)
    }

    /// Total number of directed edges across all adjacency lists.
    pub fn edge_count(&self) -> usize {
        self.vertices().map(|vertex| vertex.degree()).sum()
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::Vertex;

    use super::*;

    #[test]
    fn add_edge_prepends() {
        let mut graph = AntennaGraph::new();
        let a = graph.add_vertex(Vertex::new(1, 'A', 0, 0)).expect("a");
        let b = graph.add_vertex(Vertex::new(2, 'A', 1, 0)).expect("b");
        let c = graph.add_vertex(Vertex::new(3, 'A', 2, 0)).expect("c");
        graph.add_edge(a, b, 1.0).expect("ab");
        graph.add_edge(a, c, 2.0).expect("ac");
        let targets: Vec<_> = graph
            .vertex(a)
            .expect("a")
            .edges()
            .map(|edge| edge.target)
            .collect();
        assert_eq!(targets, vec![c, b]);
    }

    #[test]
    fn pair_is_created_once_from_lower_id() {
        let mut graph = AntennaGraph::new();
        graph.add_vertex(Vertex::new(5, 'A', 0, 0)).expect("a");
        graph.add_vertex(Vertex::new(2, 'A', 1, 0)).expect("b");
        assert_eq!(graph.build_adjacency().expect("build"), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn extreme_coordinates_do_not_wrap() {
        let mut graph = AntennaGraph::new();
        graph.add_vertex(Vertex::new(1, 'A', i32::MAX, 0)).expect("max x");
        graph.add_vertex(Vertex::new(2, 'A', i32::MIN, 0)).expect("min x");
        graph.add_vertex(Vertex::new(3, 'A', 0, i32::MAX)).expect("max y");
        graph.add_vertex(Vertex::new(4, 'A', 0, i32::MIN)).expect("min y");
        assert_eq!(graph.build_adjacency().expect("build"), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn neighbours_at_the_coordinate_limit_still_link() {
        let mut graph = AntennaGraph::new();
        graph.add_vertex(Vertex::new(1, 'A', i32::MAX - 1, i32::MAX)).expect("a");
        graph.add_vertex(Vertex::new(2, 'A', i32::MAX, i32::MAX)).expect("b");
        assert_eq!(graph.build_adjacency().expect("build"), 2);
    }
}
