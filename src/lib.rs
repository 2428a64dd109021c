//! Antenna maps as graphs: same-frequency antennas that touch on the grid are
//! linked, then walked depth-first, breadth-first or by exhaustive path
//! enumeration.
//! Run Criterion benchmarks with `cargo bench` to inspect reports under `target/criterion`.

pub mod adjacency;
pub mod algo;
pub mod bench_utils;
pub mod bfs;
pub mod cli;
pub mod config;
pub mod errors;
pub mod graph;
pub mod grid;
pub mod sink;

pub use crate::config::GraphConfig;
pub use crate::errors::{AntennaGraphError, GraphResult};
pub use crate::graph::{AntennaGraph, Edge, Vertex, VertexKey};
pub use crate::grid::{GridLoader, load_grid, load_grid_file, render_map};
pub use crate::sink::{EdgeRecord, NullSink, RecordLog, RecordSink, VertexRecord};
