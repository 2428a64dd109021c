use std::collections::VecDeque;

use tracing::trace;

use crate::{
    graph::{AntennaGraph, VertexKey},
    sink::{RecordLog, RecordSink},
};

/// Breadth-first walk from `start`; returns how many vertices were emitted.
///
/// Vertices are marked when enqueued and emitted when dequeued, so none is
/// emitted twice. Neighbours are enqueued in adjacency-list order. Returns 0
/// when `start` is stale.
pub fn breadth_first_traversal<S: RecordSink>(
    graph: &mut AntennaGraph,
    start: VertexKey,
    mut sink: S,
) -> usize {
    let Some(vertex) = graph.vertex_mut(start) else {
        return 0;
    };
    vertex.visited = true;
    let mut queue = VecDeque::new();
    queue.push_back(start);
    let mut count = 0;
    while let Some(key) = queue.pop_front() {
        let Some(vertex) = graph.vertex(key) else {
            continue;
        };
        trace!(id = vertex.id, "bfs visit");
        sink.vertex(&vertex.record());
        count += 1;
        let targets: Vec<VertexKey> = vertex.edges().map(|edge| edge.target).collect();
        for target in targets {
            if let Some(neighbour) = graph.vertex_mut(target) {
                if !neighbour.visited {
                    neighbour.visited = true;
                    queue.push_back(target);
                }
            }
        }
    }
    count
}

/// Ids in breadth-first order from `start`. Flags are not reset first.
pub fn bfs_order(graph: &mut AntennaGraph, start: VertexKey) -> Vec<i64> {
    let mut log = RecordLog::new();
    breadth_first_traversal(graph, start, &mut log);
    log.vertex_ids()
}
