//! Text map <-> graph.
//!
//! A map is a sequence of lines. Every character other than the empty marker
//! becomes a vertex at `(column, line)`, labelled with that character.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::info;

use crate::{
    config::{DEFAULT_EMPTY_MARKER, GraphConfig},
    errors::{AntennaGraphError, GraphResult},
    graph::{AntennaGraph, Vertex},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLoader {
    empty_marker: char,
}

impl Default for GridLoader {
    fn default() -> Self {
        Self::new(DEFAULT_EMPTY_MARKER)
    }
}

impl GridLoader {
    pub fn new(empty_marker: char) -> Self {
        Self { empty_marker }
    }

    pub fn from_config(config: &GraphConfig) -> Self {
        Self::new(config.empty_marker)
    }

    /// Reads `reader` line by line into `graph`; returns the vertices added.
    ///
    /// Ids continue from `graph.vertex_count() + 1`. On error, vertices added
    /// before the failing line stay in the graph.
    pub fn load<R: BufRead>(&self, graph: &mut AntennaGraph, reader: R) -> GraphResult<usize> {
        let mut next_id = graph.vertex_count() as i64 + 1;
        let mut added = 0;
        let mut row: i32 = 0;
        for line in reader.lines() {
            let line = line.map_err(|e| AntennaGraphError::io(e.to_string()))?;
            let line = line.strip_suffix('\r').unwrap_or(&line);
            let mut width: i32 = 0;
            for (column, frequency) in line.chars().enumerate() {
                let x = i32::try_from(column).map_err(|_| {
                    AntennaGraphError::invalid_input(format!("line {} is too wide", row + 1))
                })?;
                width = x + 1;
                if frequency == self.empty_marker {
                    continue;
                }
                let id = next_id;
                graph
                    .add_vertex(Vertex::new(id, frequency, x, row))
                    .map_err(|e| AntennaGraphError::graph(format!("inserting vertex {id}: {e}")))?;
                next_id += 1;
                added += 1;
            }
            row = row
                .checked_add(1)
                .ok_or_else(|| AntennaGraphError::invalid_input("map has too many lines"))?;
            graph.extend_dimensions(row, width);
        }
        info!(
            rows = graph.rows(),
            cols = graph.cols(),
            vertices = added,
            "loaded antenna map"
        );
        Ok(added)
    }

    /// Opens `path` and loads it; a missing or unreadable file is an `Io` error.
    pub fn load_file<P: AsRef<Path>>(
        &self,
        graph: &mut AntennaGraph,
        path: P,
    ) -> GraphResult<usize> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| AntennaGraphError::io(format!("{}: {e}", path.display())))?;
        self.load(graph, BufReader::new(file))
    }
}

/// Loads a map using the default `.` empty marker.
pub fn load_grid<R: BufRead>(graph: &mut AntennaGraph, reader: R) -> GraphResult<usize> {
    GridLoader::default().load(graph, reader)
}

pub fn load_grid_file<P: AsRef<Path>>(graph: &mut AntennaGraph, path: P) -> GraphResult<usize> {
    GridLoader::default().load_file(graph, path)
}

/// Draws the graph back as a text map, one `\n`-terminated line per row.
///
/// The canvas covers the recorded dimensions and every vertex with
/// non-negative coordinates. Where vertices share a cell the later one wins.
/// A canvas too large to allocate is an `Allocation` error.
pub fn render_map(graph: &AntennaGraph, empty_marker: char) -> GraphResult<String> {
    let placed: Vec<(usize, usize, char)> = graph
        .vertices()
        .filter_map(|vertex| {
            let x = usize::try_from(vertex.x).ok()?;
            let y = usize::try_from(vertex.y).ok()?;
            Some((x, y, vertex.frequency))
        })
        .collect();
    let width = placed
        .iter()
        .map(|(x, _, _)| x + 1)
        .chain(usize::try_from(graph.cols()).ok())
        .max()
        .unwrap_or(0);
    let height = placed
        .iter()
        .map(|(_, y, _)| y + 1)
        .chain(usize::try_from(graph.rows()).ok())
        .max()
        .unwrap_or(0);

    let too_large = || AntennaGraphError::allocation(format!("map canvas {width}x{height}"));
    let cells = width.checked_mul(height).ok_or_else(too_large)?;
    let mut canvas: Vec<char> = Vec::new();
    canvas
        .try_reserve_exact(cells)
        .map_err(|e| AntennaGraphError::allocation(format!("map canvas {width}x{height}: {e}")))?;
    canvas.resize(cells, empty_marker);
    for (x, y, frequency) in placed {
        canvas[y * width + x] = frequency;
    }

    let mut out = String::new();
    out.try_reserve(cells + height)
        .map_err(|e| AntennaGraphError::allocation(format!("map text: {e}")))?;
    if width == 0 {
        out.extend(std::iter::repeat_n('\n', height));
        return Ok(out);
    }
    for row in canvas.chunks(width) {
        out.extend(row);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_line_endings_are_not_vertices() {
        let mut graph = AntennaGraph::new();
        let added = load_grid(&mut graph, "A.\r\n.B\r\n".as_bytes()).expect("load");
        assert_eq!(added, 2);
        assert_eq!((graph.rows(), graph.cols()), (2, 2));
    }

    #[test]
    fn custom_marker_keeps_dots() {
        let mut graph = AntennaGraph::new();
        let added = GridLoader::new('#')
            .load(&mut graph, "#.\n".as_bytes())
            .expect("load");
        assert_eq!(added, 1);
        assert_eq!(render_map(&graph, '#').expect("render"), "#.\n");
    }

    #[test]
    fn oversized_canvas_is_an_allocation_error() {
        let mut graph = AntennaGraph::new();
        graph
            .add_vertex(Vertex::new(1, 'A', i32::MAX, i32::MAX))
            .expect("add");
        let err = render_map(&graph, '.').expect_err("canvas too large");
        assert!(matches!(err, AntennaGraphError::Allocation(_)));
    }
}
