mod common;

use common::{assert_close, small_graph};
use contracted_paths::{
    graphs::edge::Properties, GraphError, IndexedGraph, InputEdge, Pathfinder, QueryOptions,
};
use serde_json::{json, Value};

fn contracted(edges: Vec<InputEdge>) -> IndexedGraph {
    let mut graph = IndexedGraph::new();
    for edge in edges {
        graph.add_edge(edge).unwrap();
    }
    graph.contract().unwrap();
    graph
}

fn properties(value: Value) -> Properties {
    match value {
        Value::Object(map) => map,
        _ => panic!("not an object"),
    }
}

#[test]
fn directed_chain() {
    let graph = contracted(vec![
        InputEdge::new("A", "B", 1.0),
        InputEdge::new("B", "C", 2.0),
    ]);
    let mut pathfinder = Pathfinder::new(&graph, QueryOptions::all()).unwrap();

    let result = pathfinder.query("A", "C").unwrap();
    assert_close(result.total_cost, 3.0);
    assert_eq!(result.ids, Some(vec![0, 1]));
    assert_eq!(
        result.nodes,
        Some(vec!["A".to_string(), "B".to_string(), "C".to_string()])
    );

    let result = pathfinder.query("C", "A").unwrap();
    assert_eq!(result.total_cost, 0.0);
    assert_eq!(result.ids, Some(vec![]));
    assert_eq!(result.nodes, Some(vec![]));
}

#[test]
fn undirected_triangle_prefers_direct_edge() {
    let graph = contracted(vec![
        InputEdge::new("A", "B", 1.0).undirected(),
        InputEdge::new("B", "C", 2.0).undirected(),
        InputEdge::new("A", "C", 1.5).undirected(),
    ]);
    let mut pathfinder = Pathfinder::new(&graph, QueryOptions::new().ids(true)).unwrap();

    let result = pathfinder.query("A", "C").unwrap();
    assert_close(result.total_cost, 1.5);
    assert_eq!(result.ids.map(|ids| ids.len()), Some(1));

    let result = pathfinder.query("C", "A").unwrap();
    assert_close(result.total_cost, 1.5);
}

#[test]
fn both_directions_share_the_input_edge() {
    let graph = contracted(vec![
        InputEdge::new("A", "B", 1.0).undirected(),
        InputEdge::new("B", "C", 2.0).undirected(),
        InputEdge::new("A", "C", 1.5).undirected(),
    ]);
    let mut pathfinder = Pathfinder::new(&graph, QueryOptions::new().ids(true)).unwrap();

    let there = pathfinder.query("A", "C").unwrap().ids.unwrap();
    let back = pathfinder.query("C", "A").unwrap().ids.unwrap();
    assert_eq!((there.len(), back.len()), (1, 1));

    // every direction is its own arena edge
    assert_ne!(there[0], back[0]);
    assert_eq!(graph.input_edge_id(there[0]), Some(2));
    assert_eq!(graph.input_edge_id(back[0]), Some(2));
}

#[test]
fn self_loop_is_ignored() {
    let mut graph = IndexedGraph::new();
    graph.add_edge(InputEdge::new("A", "A", 1.0)).unwrap();
    assert_eq!(graph.number_of_edges(), 0);
}

#[test]
fn same_source_and_target() {
    let graph = contracted(vec![InputEdge::new("A", "B", 1.0)]);
    let mut pathfinder = Pathfinder::new(&graph, QueryOptions::new().path(true)).unwrap();

    let result = pathfinder.query("A", "A").unwrap();
    assert_eq!(result.total_cost, 0.0);
    assert_eq!(result.path, Some(vec![]));
    assert_eq!(result.ids, None);
}

#[test]
fn usage_errors() {
    let mut graph = IndexedGraph::new();
    assert!(matches!(
        Pathfinder::new(&graph, QueryOptions::new()),
        Err(GraphError::NotContracted)
    ));
    assert!(matches!(
        graph.add_edge(InputEdge::new("A", "B", -1.0)),
        Err(GraphError::InvalidCost(_))
    ));
    assert!(matches!(
        graph.add_edge(InputEdge::new("A", "B", 1.0).with_backward_cost(f64::NAN)),
        Err(GraphError::InvalidCost(_))
    ));

    graph.add_edge(InputEdge::new("A", "B", 1.0)).unwrap();
    assert!(matches!(
        graph.load_network(vec![InputEdge::new("B", "C", 1.0)]),
        Err(GraphError::ManualEdgesPresent)
    ));

    graph.contract().unwrap();
    assert!(matches!(
        graph.add_edge(InputEdge::new("B", "C", 1.0)),
        Err(GraphError::Locked)
    ));

    let mut pathfinder = Pathfinder::new(&graph, QueryOptions::new()).unwrap();
    assert!(matches!(
        pathfinder.query("A", "Z"),
        Err(GraphError::UnknownNode(key)) if key == "Z"
    ));
}

#[test]
fn only_one_dataset() {
    let mut graph = IndexedGraph::new();
    graph
        .load_network(vec![InputEdge::new("A", "B", 1.0)])
        .unwrap();

    assert!(matches!(
        graph.load_network(vec![InputEdge::new("B", "C", 1.0)]),
        Err(GraphError::DatasetAlreadyLoaded)
    ));
    assert!(matches!(
        graph.add_edge(InputEdge::new("B", "C", 1.0)),
        Err(GraphError::DatasetLoaded)
    ));
}

#[test]
fn failed_load_leaves_graph_untouched() {
    let mut graph = IndexedGraph::new();
    assert!(matches!(
        graph.load_network(vec![
            InputEdge::new("A", "B", 1.0),
            InputEdge::new("B", "C", -1.0),
        ]),
        Err(GraphError::InvalidCost(_))
    ));
    assert_eq!(graph.number_of_vertices(), 0);
    assert_eq!(graph.number_of_edges(), 0);

    // a rejected manual edge does not count as manual input either
    assert!(graph.add_edge(InputEdge::new("A", "B", f64::INFINITY)).is_err());

    graph
        .load_network(vec![
            InputEdge::new("A", "B", 1.0),
            InputEdge::new("B", "C", 1.0),
        ])
        .unwrap();
    assert_eq!(graph.number_of_edges(), 2);
}

#[test]
fn asymmetric_costs() {
    let graph = contracted(vec![
        InputEdge::new("A", "B", 1.0).with_backward_cost(4.0),
        InputEdge::new("B", "C", 1.0).undirected(),
    ]);
    let mut pathfinder = Pathfinder::new(&graph, QueryOptions::new()).unwrap();

    assert_close(pathfinder.query("A", "C").unwrap().total_cost, 2.0);
    assert_close(pathfinder.query("C", "A").unwrap().total_cost, 5.0);
}

#[test]
fn small_graph_distances() {
    let mut graph = small_graph();
    graph.contract().unwrap();
    let mut pathfinder = Pathfinder::new(&graph, QueryOptions::new().nodes(true)).unwrap();

    let result = pathfinder.query("0", "6").unwrap();
    // 0 -> 10 -> 9 -> 7 -> 6
    assert_close(result.total_cost, 11.0);
    assert_eq!(result.nodes.map(|nodes| nodes.len()), Some(5));

    assert_close(pathfinder.query("4", "1").unwrap().total_cost, 8.0);
    assert_close(pathfinder.query("5", "3").unwrap().total_cost, 8.0);
}

#[test]
fn outputs_follow_travel_direction() {
    let graph = contracted(vec![
        InputEdge::new("0,0", "1,0", 1.0)
            .undirected()
            .with_properties(properties(json!({ "name": "first" })))
            .with_geometry(vec![[0.0, 0.0], [0.5, 0.1], [1.0, 0.0]]),
        InputEdge::new("2,0", "1,0", 1.0)
            .undirected()
            .with_properties(properties(json!({ "name": "second" }))),
        InputEdge::new("2,0", "3,0", 1.0).undirected(),
    ]);
    let mut pathfinder = Pathfinder::new(&graph, QueryOptions::all()).unwrap();

    let result = pathfinder.query("3,0", "0,0").unwrap();
    assert_close(result.total_cost, 3.0);
    assert_eq!(
        result.nodes,
        Some(vec![
            "3,0".to_string(),
            "2,0".to_string(),
            "1,0".to_string(),
            "0,0".to_string()
        ])
    );

    let names: Vec<_> = result
        .properties
        .unwrap()
        .iter()
        .map(|properties| properties.get("name").cloned())
        .collect();
    assert_eq!(
        names,
        vec![None, Some(json!("second")), Some(json!("first"))]
    );

    // first and last edge run against their input orientation, only the
    // last one has caller geometry, the others fall back to the node keys
    assert_eq!(
        result.path,
        Some(vec![
            vec![[3.0, 0.0], [2.0, 0.0]],
            vec![[2.0, 0.0], [1.0, 0.0]],
            vec![[1.0, 0.0], [0.5, 0.1], [0.0, 0.0]],
        ])
    );
}

#[test]
fn serializes_only_requested_outputs() {
    let graph = contracted(vec![InputEdge::new("A", "B", 2.0)]);
    let mut pathfinder = Pathfinder::new(&graph, QueryOptions::new().ids(true)).unwrap();

    let result = pathfinder.query("A", "B").unwrap();
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({ "total_cost": 2.0, "ids": [0] })
    );
}
