#![allow(dead_code)]

use contracted_paths::{graphs::Weight, IndexedGraph, InputEdge};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// https://jlazarsfeld.github.io/ch.150.project/img/contraction/contract-full-1.png
pub fn small_graph() -> IndexedGraph {
    let edges = [
        (0, 1, 3.0),
        (0, 2, 5.0),
        (0, 10, 3.0),
        (1, 2, 3.0),
        (1, 3, 5.0),
        (2, 3, 2.0),
        (2, 9, 2.0),
        (3, 4, 7.0),
        (3, 9, 4.0),
        (4, 5, 6.0),
        (4, 9, 3.0),
        (5, 6, 4.0),
        (5, 7, 2.0),
        (6, 7, 3.0),
        (6, 8, 5.0),
        (7, 8, 3.0),
        (7, 9, 2.0),
        (8, 9, 4.0),
        (8, 10, 6.0),
        (9, 10, 3.0),
    ];

    let mut graph = IndexedGraph::new();
    for (start, end, cost) in edges {
        graph
            .add_edge(InputEdge::new(start.to_string(), end.to_string(), cost).undirected())
            .unwrap();
    }
    graph
}

/// Seeded random graph mixing directed, undirected and asymmetric edges.
/// Keys are the vertex numbers as strings.
pub fn random_graph(seed: u64, number_of_vertices: u32, number_of_edges: u32) -> IndexedGraph {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut graph = IndexedGraph::new();
    for _ in 0..number_of_edges {
        let start = rng.gen_range(0..number_of_vertices);
        let end = rng.gen_range(0..number_of_vertices);
        let cost: Weight = rng.gen_range(1..20) as Weight;

        let edge = InputEdge::new(start.to_string(), end.to_string(), cost);
        let edge = match rng.gen_range(0..3) {
            0 => edge,
            1 => edge.undirected(),
            _ => edge.with_backward_cost(rng.gen_range(1..20) as Weight),
        };
        graph.add_edge(edge).unwrap();
    }
    graph
}

pub fn assert_close(actual: Weight, expected: Weight) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
