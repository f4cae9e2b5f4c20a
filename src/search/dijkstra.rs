use super::collections::dijkstra_data::DijkstraData;
use crate::graphs::{edge::HalfEdge, indexed_graph::IndexedGraph, EdgeId, VertexId, Weight};

/// Plain Dijkstra over the base edges of a graph, contracted or not.
/// Shortcuts are ignored, so the results serve as a reference for the
/// hierarchy.
pub struct Dijkstra {
    out_edges: Vec<Vec<HalfEdge>>,
    data: DijkstraData,
}

impl Dijkstra {
    pub fn new(graph: &IndexedGraph) -> Dijkstra {
        let number_of_vertices = graph.number_of_vertices();

        let mut out_edges = vec![Vec::new(); number_of_vertices as usize];
        for (id, edge) in graph.base_edges() {
            out_edges[edge.tail() as usize].push(edge.tailless(id));
        }

        Dijkstra {
            out_edges,
            data: DijkstraData::new(number_of_vertices),
        }
    }

    /// Runs until `target` is settled or the graph is exhausted.
    fn run(&mut self, source: VertexId, target: Option<VertexId>) {
        self.data.start(source);

        while let Some((tail, distance)) = self.data.pop() {
            if Some(tail) == target {
                break;
            }

            for half_edge in self.out_edges[tail as usize].iter() {
                self.data.update(tail, distance, half_edge);
            }
        }
    }

    pub fn one_to_one(&mut self, source: VertexId, target: VertexId) -> Option<Weight> {
        self.run(source, Some(target));
        self.data.distance(target)
    }

    /// Distances from `source` to every vertex, `None` for unreachable ones.
    pub fn one_to_all(&mut self, source: VertexId) -> Vec<Option<Weight>> {
        self.run(source, None);
        (0..self.out_edges.len() as VertexId)
            .map(|vertex| self.data.distance(vertex))
            .collect()
    }

    /// Base edges of a shortest path from `source` to `target`.
    pub fn shortest_path(&mut self, source: VertexId, target: VertexId) -> Option<(Weight, Vec<EdgeId>)> {
        let weight = self.one_to_one(source, target)?;
        let mut edges = self.data.predecessor_edges(target);
        edges.reverse();
        Some((weight, edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::edge::InputEdge;

    #[test]
    fn finds_cheapest_detour() {
        let mut graph = IndexedGraph::new();
        graph.add_edge(InputEdge::new("A", "B", 1.0)).unwrap();
        graph.add_edge(InputEdge::new("B", "C", 1.0)).unwrap();
        graph.add_edge(InputEdge::new("A", "C", 3.0)).unwrap();
        graph.add_edge(InputEdge::new("D", "A", 1.0)).unwrap();
        let [a, c, d] = ["A", "C", "D"].map(|key| graph.vertex(key).unwrap());

        let mut dijkstra = Dijkstra::new(&graph);
        assert_eq!(dijkstra.shortest_path(a, c), Some((2.0, vec![0, 1])));
        assert_eq!(dijkstra.one_to_one(c, a), None);
        assert_eq!(dijkstra.one_to_one(a, a), Some(0.0));
        assert_eq!(dijkstra.one_to_all(a)[d as usize], None);
    }
}
