use super::collections::dijkstra_data::DijkstraData;
use crate::graphs::{indexed_graph::IndexedGraph, VertexId, Weight};

/// Bounded Dijkstra over the remaining (uncontracted) graph that avoids one
/// vertex. Used to find witness paths `u -> ... -> w` that make the shortcut
/// `u -> v -> w` unnecessary.
pub struct WitnessSearch {
    data: DijkstraData,
}

impl WitnessSearch {
    pub fn new(number_of_vertices: u32) -> WitnessSearch {
        WitnessSearch {
            data: DijkstraData::new(number_of_vertices),
        }
    }

    /// Searches from `source` without entering `excluded` or any vertex that
    /// is already contracted. Stops as soon as a settled vertex lies beyond
    /// `cost_ceiling`. Tentative distances stay readable afterwards.
    pub fn run(&mut self, graph: &IndexedGraph, source: VertexId, excluded: VertexId, cost_ceiling: Weight) {
        self.data.start(source);

        while let Some((vertex, distance)) = self.data.pop() {
            if distance > cost_ceiling {
                break;
            }

            for half_edge in graph.forward(vertex) {
                if half_edge.vertex == excluded || graph.is_contracted_vertex(half_edge.vertex) {
                    continue;
                }
                self.data.update(vertex, distance, half_edge);
            }
        }
    }

    /// Best distance found to `vertex` by the last run, `None` meaning no
    /// witness within the ceiling.
    pub fn distance(&self, vertex: VertexId) -> Option<Weight> {
        self.data.distance(vertex)
    }
}
