//! Argument parsing and command dispatch for the `antennagraph` binary.

use serde_json::{Map, Value, json};

use crate::{
    algo::{depth_first_traversal, find_all_paths, reset_visited},
    bfs::breadth_first_traversal,
    config::{DEFAULT_EMPTY_MARKER, GraphConfig},
    errors::{AntennaGraphError, GraphResult},
    graph::{AntennaGraph, Vertex, VertexKey},
    grid::{GridLoader, render_map},
    sink::{EdgeRecord, RecordLog, VertexRecord, list_edges, list_vertices},
};

/// A vertex given on the command line as `ID:FREQ:X:Y`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexSpec {
    pub id: i64,
    pub frequency: char,
    pub x: i32,
    pub y: i32,
}

impl VertexSpec {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let parts: Vec<&str> = raw.split(':').collect();
        let [id, frequency, x, y] = parts.as_slice() else {
            return Err(format!("--add expects ID:FREQ:X:Y, got {raw}"));
        };
        let mut chars = frequency.chars();
        let frequency = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(format!("frequency must be one character, got {frequency:?}")),
        };
        Ok(Self {
            id: id.parse().map_err(|_| format!("invalid vertex id {id}"))?,
            frequency,
            x: x.parse().map_err(|_| format!("invalid x coordinate {x}"))?,
            y: y.parse().map_err(|_| format!("invalid y coordinate {y}"))?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLineConfig {
    pub map: Option<String>,
    pub empty_marker: char,
    pub command: String,
    pub start: Option<i64>,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub additions: Vec<VertexSpec>,
    pub removals: Vec<i64>,
    pub json: bool,
}

impl CommandLineConfig {
    pub fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut config = Self {
            map: None,
            empty_marker: DEFAULT_EMPTY_MARKER,
            command: String::from("status"),
            start: None,
            from: None,
            to: None,
            additions: Vec::new(),
            removals: Vec::new(),
            json: false,
        };
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match *arg {
                "--map" => {
                    config.map = Some(
                        iter.next()
                            .ok_or_else(|| "--map requires a value".to_string())?
                            .to_string(),
                    );
                }
                "--empty" => {
                    let raw = iter
                        .next()
                        .ok_or_else(|| "--empty requires a value".to_string())?;
                    let mut chars = raw.chars();
                    config.empty_marker = match (chars.next(), chars.next()) {
                        (Some(c), None) => c,
                        _ => return Err(format!("--empty expects one character, got {raw}")),
                    };
                }
                "--command" => {
                    config.command = iter
                        .next()
                        .ok_or_else(|| "--command requires a value".to_string())?
                        .to_string();
                }
                "--start" => config.start = Some(parse_id(iter.next(), "--start")?),
                "--from" => config.from = Some(parse_id(iter.next(), "--from")?),
                "--to" => config.to = Some(parse_id(iter.next(), "--to")?),
                "--remove" => config.removals.push(parse_id(iter.next(), "--remove")?),
                "--add" => {
                    let raw = iter
                        .next()
                        .ok_or_else(|| "--add requires a value".to_string())?;
                    config.additions.push(VertexSpec::parse(raw)?);
                }
                "--json" => config.json = true,
                other if other.starts_with('-') => {
                    return Err(format!("unknown flag {other}"));
                }
                _ => {
                    config.command = arg.to_string();
                }
            }
        }
        Ok(config)
    }

    pub fn help() -> &'static str {
        "Usage: antennagraph [--map PATH] [--empty CHAR] [--add ID:FREQ:X:Y]... [--remove ID]...\n\
         \x20                  [--json] [--start ID] [--from ID --to ID]\n\
         \x20                  [--command status|map|vertices|edges|dfs|bfs|paths]\n"
    }

    pub fn graph_config(&self) -> GraphConfig {
        GraphConfig::new().with_empty_marker(self.empty_marker)
    }
}

fn parse_id(value: Option<&&str>, flag: &str) -> Result<i64, String> {
    let raw = value.ok_or_else(|| format!("{flag} requires a value"))?;
    raw.parse()
        .map_err(|_| format!("{flag} expects an integer id, got {raw}"))
}

/// Loads the map, applies additions, links neighbours, then applies removals.
pub fn prepare_graph(config: &CommandLineConfig) -> GraphResult<AntennaGraph> {
    let graph_config = config.graph_config();
    let mut graph = AntennaGraph::with_config(&graph_config)?;
    if let Some(path) = config.map.as_deref() {
        GridLoader::from_config(&graph_config).load_file(&mut graph, path)?;
    }
    for spec in &config.additions {
        graph.add_vertex(Vertex::new(spec.id, spec.frequency, spec.x, spec.y))?;
    }
    graph.build_adjacency()?;
    for id in &config.removals {
        graph.remove_by_id(*id)?;
    }
    Ok(graph)
}

pub fn handle_command(graph: &mut AntennaGraph, config: &CommandLineConfig) -> GraphResult<String> {
    match config.command.as_str() {
        "status" => run_status(graph, config),
        "map" => run_map(graph, config),
        "vertices" => run_vertices(graph, config),
        "edges" => run_edges(graph, config),
        "dfs" | "bfs" => run_traversal(graph, config),
        "paths" => run_paths(graph, config),
        other => Err(AntennaGraphError::invalid_input(format!(
            "unknown command {other}"
        ))),
    }
}

fn run_status(graph: &AntennaGraph, config: &CommandLineConfig) -> GraphResult<String> {
    if config.json {
        let mut object = command_object("status");
        object.insert("rows".into(), json!(graph.rows()));
        object.insert("cols".into(), json!(graph.cols()));
        object.insert("vertices".into(), json!(graph.vertex_count()));
        object.insert("edges".into(), json!(graph.edge_count()));
        return encode(object);
    }
    Ok(format!(
        "rows={} cols={} vertices={} edges={}\n",
        graph.rows(),
        graph.cols(),
        graph.vertex_count(),
        graph.edge_count()
    ))
}

fn run_map(graph: &AntennaGraph, config: &CommandLineConfig) -> GraphResult<String> {
    let rendered = render_map(graph, config.empty_marker)?;
    if config.json {
        let mut object = command_object("map");
        let lines: Vec<&str> = rendered.lines().collect();
        object.insert("lines".into(), json!(lines));
        return encode(object);
    }
    Ok(rendered)
}

fn run_vertices(graph: &AntennaGraph, config: &CommandLineConfig) -> GraphResult<String> {
    let mut log = RecordLog::new();
    list_vertices(graph, &mut log);
    if config.json {
        let mut object = command_object("vertices");
        object.insert("vertices".into(), json!(log.vertices));
        return encode(object);
    }
    let mut out = String::new();
    for record in &log.vertices {
        push_vertex_line(&mut out, record);
    }
    Ok(out)
}

fn run_edges(graph: &AntennaGraph, config: &CommandLineConfig) -> GraphResult<String> {
    let mut log = RecordLog::new();
    list_edges(graph, &mut log);
    if config.json {
        let mut object = command_object("edges");
        object.insert("edges".into(), json!(log.edges));
        return encode(object);
    }
    let mut out = String::new();
    for vertex in graph.vertices() {
        out.push_str(&format!("Vertex {} ({}):\n", vertex.id, vertex.frequency));
        for record in log.edges.iter().filter(|edge| edge.from_id == vertex.id) {
            push_edge_line(&mut out, record);
        }
    }
    Ok(out)
}

fn run_traversal(graph: &mut AntennaGraph, config: &CommandLineConfig) -> GraphResult<String> {
    let start_id = config
        .start
        .ok_or_else(|| AntennaGraphError::invalid_input("--start is required"))?;
    let start = lookup(graph, start_id)?;
    let mut log = RecordLog::new();
    reset_visited(graph);
    let count = if config.command == "dfs" {
        depth_first_traversal(graph, start, &mut log)
    } else {
        breadth_first_traversal(graph, start, &mut log)
    };
    reset_visited(graph);
    if config.json {
        let mut object = command_object(&config.command);
        object.insert("start".into(), json!(start_id));
        object.insert("count".into(), json!(count));
        object.insert("vertices".into(), json!(log.vertices));
        return encode(object);
    }
    let mut out = String::new();
    for record in &log.vertices {
        push_vertex_line(&mut out, record);
    }
    out.push_str(&format!("visited={count}\n"));
    Ok(out)
}

fn run_paths(graph: &mut AntennaGraph, config: &CommandLineConfig) -> GraphResult<String> {
    let (from_id, to_id) = match (config.from, config.to) {
        (Some(from), Some(to)) => (from, to),
        _ => {
            return Err(AntennaGraphError::invalid_input(
                "--from and --to are required",
            ));
        }
    };
    let from = lookup(graph, from_id)?;
    let to = lookup(graph, to_id)?;
    let mut log = RecordLog::new();
    let mut path = Vec::with_capacity(graph.vertex_count());
    reset_visited(graph);
    let count = find_all_paths(graph, from, to, &mut path, &mut log);
    if config.json {
        let mut object = command_object("paths");
        object.insert("from".into(), json!(from_id));
        object.insert("to".into(), json!(to_id));
        object.insert("count".into(), json!(count));
        object.insert("paths".into(), json!(log.path_ids()));
        return encode(object);
    }
    let mut out = String::new();
    for found in &log.paths {
        push_path_line(&mut out, found);
    }
    out.push_str(&format!("paths={count}\n"));
    Ok(out)
}

fn lookup(graph: &AntennaGraph, id: i64) -> GraphResult<VertexKey> {
    graph
        .find_by_id(id)
        .ok_or_else(|| AntennaGraphError::not_found(format!("vertex {id}")))
}

fn push_vertex_line(out: &mut String, record: &VertexRecord) {
    out.push_str(&format!(
        "ID: {}  Freq: {}  Coord: ({},{})\n",
        record.id, record.frequency, record.x, record.y
    ));
}

fn push_edge_line(out: &mut String, record: &EdgeRecord) {
    out.push_str(&format!(
        "  -> {} ({}) weight {:.1}\n",
        record.to_id, record.to_frequency, record.weight
    ));
}

fn push_path_line(out: &mut String, path: &[VertexRecord]) {
    for record in path {
        out.push_str(&format!("ID: {} ({}) -> ", record.id, record.frequency));
    }
    out.push_str("END\n");
}

fn command_object(command: &str) -> Map<String, Value> {
    let mut object = Map::new();
    object.insert("command".into(), Value::String(command.into()));
    object
}

fn encode(object: Map<String, Value>) -> GraphResult<String> {
    let mut text = serde_json::to_string(&Value::Object(object))
        .map_err(|e| AntennaGraphError::graph(e.to_string()))?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeatable_flags() {
        let config = CommandLineConfig::from_args(&[
            "antennagraph",
            "--add",
            "17:0:3:3",
            "--add",
            "16:A:13:2",
            "--remove",
            "16",
            "dfs",
            "--start",
            "5",
        ])
        .expect("config");
        assert_eq!(config.additions.len(), 2);
        assert_eq!(config.removals, vec![16]);
        assert_eq!(config.command, "dfs");
        assert_eq!(config.start, Some(5));
    }

    #[test]
    fn rejects_malformed_vertex_spec() {
        assert!(VertexSpec::parse("1:AB:0:0").is_err());
        assert!(VertexSpec::parse("1:A:0").is_err());
    }

    #[test]
    fn rejects_unknown_flag() {
        let err = CommandLineConfig::from_args(&["antennagraph", "--bogus"]).expect_err("flag");
        assert!(err.contains("--bogus"));
    }
}
