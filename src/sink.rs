//! Record emission.
//!
//! Traversals and listing helpers never print. They hand plain records to a
//! [`RecordSink`] and the caller decides how to render them.

use serde::{Deserialize, Serialize};

use crate::graph::AntennaGraph;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexRecord {
    pub id: i64,
    pub frequency: char,
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from_id: i64,
    pub to_id: i64,
    pub to_frequency: char,
    pub weight: f32,
}

/// Receiver for emitted records. Every method defaults to a no-op.
pub trait RecordSink {
    fn vertex(&mut self, _record: &VertexRecord) {}

    fn edge(&mut self, _record: &EdgeRecord) {}

    /// One complete path, start vertex first.
    fn path(&mut self, _path: &[VertexRecord]) {}
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl RecordSink for NullSink {}

/// Keeps every record it receives, in emission order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RecordLog {
    pub vertices: Vec<VertexRecord>,
    pub edges: Vec<EdgeRecord>,
    pub paths: Vec<Vec<VertexRecord>>,
}

impl RecordLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_ids(&self) -> Vec<i64> {
        self.vertices.iter().map(|record| record.id).collect()
    }

    pub fn path_ids(&self) -> Vec<Vec<i64>> {
        self.paths
            .iter()
            .map(|path| path.iter().map(|record| record.id).collect())
            .collect()
    }
}

impl RecordSink for RecordLog {
    fn vertex(&mut self, record: &VertexRecord) {
        self.vertices.push(record.clone());
    }

    fn edge(&mut self, record: &EdgeRecord) {
        self.edges.push(record.clone());
    }

    fn path(&mut self, path: &[VertexRecord]) {
        self.paths.push(path.to_vec());
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn vertex(&mut self, record: &VertexRecord) {
        (**self).vertex(record);
    }

    fn edge(&mut self, record: &EdgeRecord) {
        (**self).edge(record);
    }

    fn path(&mut self, path: &[VertexRecord]) {
        (**self).path(path);
    }
}

/// Emits one record per vertex, in insertion order.
pub fn list_vertices<S: RecordSink>(graph: &AntennaGraph, mut sink: S) -> usize {
    let mut count = 0;
    for vertex in graph.vertices() {
        sink.vertex(&vertex.record());
        count += 1;
    }
    count
}

/// Emits one record per directed edge, grouped by origin in insertion order.
pub fn list_edges<S: RecordSink>(graph: &AntennaGraph, mut sink: S) -> usize {
    let mut count = 0;
    for vertex in graph.vertices() {
        for edge in vertex.edges() {
            let Some(target) = graph.vertex(edge.target) else {
                continue;
            };
            sink.edge(&EdgeRecord {
                from_id: vertex.id,
                to_id: target.id,
                to_frequency: target.frequency,
                weight: edge.weight,
            });
            count += 1;
        }
    }
    count
}
