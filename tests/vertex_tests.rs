use antennagraph::{AntennaGraph, AntennaGraphError, GraphConfig, Vertex};

fn sample_graph() -> AntennaGraph {
    let mut graph = AntennaGraph::new();
    for (id, frequency, x, y) in [(1, 'A', 0, 0), (2, 'B', 3, 1), (3, 'A', 1, 4)] {
        graph
            .add_vertex(Vertex::new(id, frequency, x, y))
            .expect("vertex");
    }
    graph
}

#[test]
fn test_new_vertex_is_unvisited_and_unlinked() {
    let vertex = Vertex::new(7, 'Z', 2, 5);
    assert_eq!((vertex.id, vertex.frequency, vertex.x, vertex.y), (7, 'Z', 2, 5));
    assert!(!vertex.is_visited());
    assert_eq!(vertex.degree(), 0);
}

#[test]
fn test_added_vertex_found_by_id_and_coordinates() {
    let graph = sample_graph();
    for vertex in graph.vertices() {
        let by_id = graph.find_by_id(vertex.id).expect("by id");
        let by_coords = graph
            .find_by_coordinates(vertex.x, vertex.y)
            .expect("by coordinates");
        assert_eq!(by_id, by_coords);
        assert_eq!(graph.vertex(by_id), Some(vertex));
    }
}

#[test]
fn test_insertion_order_is_preserved() {
    let graph = sample_graph();
    let ids: Vec<i64> = graph.vertices().map(|vertex| vertex.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(graph.vertex_count(), 3);
}

#[test]
fn test_dimensions_follow_largest_coordinates() {
    let graph = sample_graph();
    assert_eq!(graph.rows(), 4);
    assert_eq!(graph.cols(), 3);
}

#[test]
fn test_duplicate_coordinates_resolve_to_first_inserted() {
    let mut graph = AntennaGraph::new();
    let first = graph.add_vertex(Vertex::new(1, 'A', 2, 2)).expect("first");
    graph.add_vertex(Vertex::new(2, 'B', 2, 2)).expect("second");
    assert_eq!(graph.find_by_coordinates(2, 2), Some(first));
}

#[test]
fn test_missing_lookups_return_none() {
    let graph = sample_graph();
    assert!(graph.find_by_id(42).is_none());
    assert!(graph.find_by_coordinates(9, 9).is_none());
}

#[test]
fn test_set_frequency_updates_vertex() {
    let mut graph = sample_graph();
    let key = graph.find_by_id(2).expect("vertex");
    graph.set_frequency(key, 'Q').expect("set");
    assert_eq!(graph.vertex(key).map(|vertex| vertex.frequency), Some('Q'));
}

#[test]
fn test_set_frequency_on_removed_vertex_is_not_found() {
    let mut graph = sample_graph();
    let key = graph.find_by_id(2).expect("vertex");
    graph.remove_by_id(2).expect("remove");
    let err = graph.set_frequency(key, 'Q').expect_err("stale");
    assert!(matches!(err, AntennaGraphError::NotFound(_)));
}

#[test]
fn test_remove_by_id_unlinks_vertex() {
    let mut graph = sample_graph();
    let removed = graph.remove_by_id(2).expect("remove");
    assert_eq!(removed.id, 2);
    assert!(graph.find_by_id(2).is_none());
    let ids: Vec<i64> = graph.vertices().map(|vertex| vertex.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_remove_missing_id_leaves_graph_unchanged() {
    let mut graph = sample_graph();
    let err = graph.remove_by_id(99).expect_err("missing");
    assert!(matches!(err, AntennaGraphError::NotFound(_)));
    assert_eq!(graph.vertex_count(), 3);
}

#[test]
fn test_with_config_reserves_capacity() {
    let config = GraphConfig::new().with_vertex_capacity(128);
    let graph = AntennaGraph::with_config(&config).expect("graph");
    assert!(graph.is_empty());
}
