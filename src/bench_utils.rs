use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    config::DEFAULT_EMPTY_MARKER,
    errors::GraphResult,
    graph::AntennaGraph,
    grid::load_grid,
};

#[derive(Clone, Debug)]
pub enum MapShape {
    /// Every cell holds the same frequency.
    Solid,
    /// Each cell is occupied with probability `density`, label drawn uniformly.
    Random { density: f64 },
    /// Only the main diagonal is occupied, producing a single long chain.
    Diagonal,
}

#[derive(Clone, Debug)]
pub struct MapSpec {
    pub width: usize,
    pub height: usize,
    pub frequencies: Vec<char>,
    pub shape: MapShape,
}

impl MapSpec {
    pub fn new(width: usize, height: usize, shape: MapShape) -> Self {
        Self {
            width,
            height,
            frequencies: vec!['A', 'B', '0'],
            shape,
        }
    }
}

/// Renders a deterministic antenna map for `seed`.
pub fn generate_antenna_map(spec: &MapSpec, seed: u64) -> String {
    assert!(!spec.frequencies.is_empty(), "frequencies must not be empty");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::with_capacity(spec.height * (spec.width + 1));
    for y in 0..spec.height {
        for x in 0..spec.width {
            let cell = match spec.shape {
                MapShape::Solid => Some(spec.frequencies[0]),
                MapShape::Diagonal => (x == y).then(|| spec.frequencies[0]),
                MapShape::Random { density } => rng
                    .gen_bool(density.clamp(0.0, 1.0))
                    .then(|| spec.frequencies[rng.gen_range(0..spec.frequencies.len())]),
            };
            out.push(cell.unwrap_or(DEFAULT_EMPTY_MARKER));
        }
        out.push('\n');
    }
    out
}

/// Generates a map, loads it and links neighbours.
pub fn build_antenna_graph(spec: &MapSpec, seed: u64) -> GraphResult<AntennaGraph> {
    let map = generate_antenna_map(spec, seed);
    let mut graph = AntennaGraph::new();
    load_grid(&mut graph, map.as_bytes())?;
    graph.build_adjacency()?;
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_map() {
        let spec = MapSpec::new(12, 8, MapShape::Random { density: 0.4 });
        assert_eq!(
            generate_antenna_map(&spec, 7),
            generate_antenna_map(&spec, 7)
        );
    }

    #[test]
    fn diagonal_is_one_chain() {
        let spec = MapSpec::new(5, 5, MapShape::Diagonal);
        let graph = build_antenna_graph(&spec, 0).expect("graph");
        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.edge_count(), 8);
    }
}
