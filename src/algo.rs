use tracing::trace;

use crate::{
    graph::{AntennaGraph, VertexKey},
    sink::{RecordLog, RecordSink, VertexRecord},
};

/// Clears every `visited` flag. Run it before each traversal that does not
/// undo its own marks.
pub fn reset_visited(graph: &mut AntennaGraph) {
    for vertex in graph.vertices_mut() {
        vertex.visited = false;
    }
}

/// Depth-first walk from `start`; returns how many vertices were emitted.
///
/// Each time the walk returns to a vertex it rescans that vertex's adjacency
/// list from the front for the first unvisited neighbour instead of resuming
/// where it left off. Neighbours claimed by a deeper branch are therefore
/// skipped. The walk keeps its own stack, so its depth is bounded by memory
/// rather than the thread stack. Returns 0 when `start` is stale or already
/// visited.
pub fn depth_first_traversal<S: RecordSink>(
    graph: &mut AntennaGraph,
    start: VertexKey,
    mut sink: S,
) -> usize {
    if !enter_unvisited(graph, start, &mut sink) {
        return 0;
    }
    let mut stack = vec![start];
    let mut count = 1;
    while let Some(&top) = stack.last() {
        match first_unvisited_neighbour(graph, top) {
            Some(next) => {
                if enter_unvisited(graph, next, &mut sink) {
                    count += 1;
                }
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }
    count
}

/// Marks and emits `key`; false when it is stale or already visited.
fn enter_unvisited<S: RecordSink>(
    graph: &mut AntennaGraph,
    key: VertexKey,
    sink: &mut S,
) -> bool {
    let Some(vertex) = graph.vertex_mut(key) else {
        return false;
    };
    if vertex.visited {
        return false;
    }
    vertex.visited = true;
    trace!(id = vertex.id, "dfs visit");
    sink.vertex(&vertex.record());
    true
}

/// Ids in depth-first order from `start`. Flags are not reset first.
pub fn dfs_order(graph: &mut AntennaGraph, start: VertexKey) -> Vec<i64> {
    let mut log = RecordLog::new();
    depth_first_traversal(graph, start, &mut log);
    log.vertex_ids()
}

fn first_unvisited_neighbour(graph: &AntennaGraph, key: VertexKey) -> Option<VertexKey> {
    graph.vertex(key)?.edges().map(|edge| edge.target).find(|target| {
        graph
            .vertex(*target)
            .is_some_and(|neighbour| !neighbour.visited)
    })
}

/// A vertex on the current path and the next edge of it still to try.
struct PathFrame {
    key: VertexKey,
    next_edge: usize,
}

/// Enumerates every simple path from `current` to `destination`.
///
/// `path` holds the vertices leading to `current`; its length is the
/// position `current` is written at. Each complete path is emitted through
/// `sink` and counted. Every vertex marked on the way down is unmarked on
/// the way back, so the call leaves all flags as it found them and `path` at
/// its original length.
pub fn find_all_paths<S: RecordSink>(
    graph: &mut AntennaGraph,
    current: VertexKey,
    destination: VertexKey,
    path: &mut Vec<VertexKey>,
    mut sink: S,
) -> usize {
    let mut frames: Vec<PathFrame> = Vec::new();
    let mut total = step_onto(graph, current, destination, path, &mut frames, &mut sink);
    while let Some(frame) = frames.last_mut() {
        let key = frame.key;
        let index = frame.next_edge;
        frame.next_edge += 1;
        let target = graph
            .vertex(key)
            .and_then(|vertex| vertex.adjacency.get(index))
            .map(|edge| edge.target);
        match target {
            Some(target) => {
                let unvisited = graph
                    .vertex(target)
                    .is_some_and(|neighbour| !neighbour.visited);
                if unvisited {
                    total +=
                        step_onto(graph, target, destination, path, &mut frames, &mut sink);
                }
            }
            None => {
                frames.pop();
                step_back(graph, key, path);
            }
        }
    }
    total
}

/// Marks `key` and appends it to `path`. Reaching `destination` emits the
/// path and steps straight back; any other vertex gets a frame so its edges
/// are tried next. Returns the number of paths emitted.
fn step_onto<S: RecordSink>(
    graph: &mut AntennaGraph,
    key: VertexKey,
    destination: VertexKey,
    path: &mut Vec<VertexKey>,
    frames: &mut Vec<PathFrame>,
    sink: &mut S,
) -> usize {
    let Some(vertex) = graph.vertex_mut(key) else {
        return 0;
    };
    vertex.visited = true;
    path.push(key);

    if key != destination {
        frames.push(PathFrame { key, next_edge: 0 });
        return 0;
    }
    let records: Vec<VertexRecord> = path
        .iter()
        .filter_map(|key| graph.vertex(*key).map(|vertex| vertex.record()))
        .collect();
    trace!(len = records.len(), "path found");
    sink.path(&records);
    step_back(graph, key, path);
    1
}

fn step_back(graph: &mut AntennaGraph, key: VertexKey, path: &mut Vec<VertexKey>) {
    path.pop();
    if let Some(vertex) = graph.vertex_mut(key) {
        vertex.visited = false;
    }
}

/// Collects every simple path from `from` to `to` as lists of vertex ids.
pub fn all_paths(graph: &mut AntennaGraph, from: VertexKey, to: VertexKey) -> Vec<Vec<i64>> {
    let mut log = RecordLog::new();
    let mut path = Vec::with_capacity(graph.vertex_count());
    find_all_paths(graph, from, to, &mut path, &mut log);
    log.path_ids()
}
