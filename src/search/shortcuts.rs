use indicatif::ParallelProgressIterator;
use rayon::prelude::*;

use crate::{
    graphs::{edge::EdgeKind, indexed_graph::IndexedGraph, EdgeId},
    utility::get_progressbar,
};

/// Expands `edge` into the base edges it stands for, ordered from the tail
/// of `edge` to its head.
///
/// # Panics
///
/// If the expansion does not form a connected chain from tail to head. That
/// can only happen when a shortcut was recorded with the wrong replaced
/// edges.
pub fn unpack_edge(graph: &IndexedGraph, edge: EdgeId) -> Vec<EdgeId> {
    let mut base_ids = Vec::new();

    // right half pushed first so the left half comes out first
    let mut stack = vec![edge];
    while let Some(current) = stack.pop() {
        match graph.edge(current).kind() {
            EdgeKind::Base { .. } => base_ids.push(current),
            EdgeKind::Shortcut {
                replaced: [first, second],
            } => {
                stack.push(second);
                stack.push(first);
            }
        }
    }

    assert_chain(graph, edge, &base_ids);
    base_ids
}

fn assert_chain(graph: &IndexedGraph, edge: EdgeId, base_ids: &[EdgeId]) {
    let expected = graph.edge(edge);

    let mut cursor = expected.tail();
    for &base_id in base_ids {
        let base = graph.edge(base_id);
        if base.tail() != cursor {
            panic!(
                "edge {} unpacks into a broken chain, base edge {} starts at {} instead of {}",
                edge,
                base_id,
                base.tail(),
                cursor
            );
        }
        cursor = base.head();
    }

    if cursor != expected.head() {
        panic!(
            "edge {} unpacks into a chain ending at {} instead of {}",
            edge,
            cursor,
            expected.head()
        );
    }
}

/// Unpacks every edge that is still referenced by one of the adjacency
/// projections. The result is indexed by edge id, edges that were pruned
/// get an empty list.
pub(crate) fn unpack_surviving_edges(graph: &IndexedGraph) -> Vec<Vec<EdgeId>> {
    let mut surviving = vec![false; graph.number_of_edges() as usize];
    for vertex in 0..graph.number_of_vertices() {
        for half_edge in graph.forward(vertex).iter().chain(graph.reverse(vertex)) {
            surviving[half_edge.edge as usize] = true;
        }
    }

    let pb = get_progressbar("Unpacking shortcuts", surviving.len() as u64);
    surviving
        .par_iter()
        .enumerate()
        .progress_with(pb)
        .map(|(edge, &survives)| {
            if survives {
                unpack_edge(graph, edge as EdgeId)
            } else {
                Vec::new()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::edge::InputEdge;

    fn chain() -> IndexedGraph {
        let mut graph = IndexedGraph::new();
        for (start, end) in [("A", "B"), ("B", "C"), ("C", "D")] {
            graph.add_edge(InputEdge::new(start, end, 1.0)).unwrap();
        }
        graph.lock().unwrap();
        graph
    }

    #[test]
    fn unpacks_nested_shortcuts_in_order() {
        let mut graph = chain();
        let [a, b, c, d] = ["A", "B", "C", "D"].map(|key| graph.vertex(key).unwrap());

        let a_c = graph.add_shortcut_edge(a, c, 2.0, [0, 1]).unwrap();
        let a_d = graph.add_shortcut_edge(a, d, 3.0, [a_c, 2]).unwrap();
        assert_eq!(unpack_edge(&graph, a_d), vec![0, 1, 2]);

        let b_d = graph.add_shortcut_edge(b, d, 2.0, [1, 2]).unwrap();
        let a_d = graph.add_shortcut_edge(a, d, 3.0, [0, b_d]).unwrap();
        assert_eq!(unpack_edge(&graph, a_d), vec![0, 1, 2]);

        assert_eq!(unpack_edge(&graph, 1), vec![1]);
    }

    #[test]
    #[should_panic(expected = "broken chain")]
    fn rejects_disconnected_shortcut() {
        let mut graph = chain();
        let [a, d] = ["A", "D"].map(|key| graph.vertex(key).unwrap());

        // skips B -> C
        let a_d = graph.add_shortcut_edge(a, d, 2.0, [0, 2]).unwrap();
        unpack_edge(&graph, a_d);
    }
}
