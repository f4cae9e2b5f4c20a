use crate::{
    error::{GraphError, Result},
    graphs::{
        indexed_graph::IndexedGraph, parse_coordinate_key, Coordinate, EdgeId, VertexId, Weight,
    },
    search::{
        collections::dijkstra_data::DijkstraData,
        path::{PathResult, QueryOptions},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Best meeting vertex found so far and the cost of the path through it.
#[derive(Debug, Clone, Copy)]
struct Meeting {
    vertex: VertexId,
    weight: Weight,
}

/// Bidirectional upward search on a contracted graph.
///
/// Holds one search state per direction, both reused across queries. A
/// pathfinder borrows the graph immutably, so any number of them can query
/// the same graph from different threads.
pub struct Pathfinder<'a> {
    graph: &'a IndexedGraph,
    options: QueryOptions,
    forward_data: DijkstraData,
    backward_data: DijkstraData,
}

impl<'a> Pathfinder<'a> {
    pub fn new(graph: &'a IndexedGraph, options: QueryOptions) -> Result<Pathfinder<'a>> {
        if !graph.is_contracted() {
            return Err(GraphError::NotContracted);
        }

        let number_of_vertices = graph.number_of_vertices();
        Ok(Pathfinder {
            graph,
            options,
            forward_data: DijkstraData::new(number_of_vertices),
            backward_data: DijkstraData::new(number_of_vertices),
        })
    }

    /// Shortest path between two node keys. Unknown keys are rejected, an
    /// unreachable target yields cost 0 and empty outputs.
    pub fn query(&mut self, source: &str, target: &str) -> Result<PathResult> {
        let source_vertex = self.lookup(source)?;
        let target_vertex = self.lookup(target)?;

        if source_vertex == target_vertex {
            return Ok(PathResult::empty(&self.options));
        }

        match self.meet(source_vertex, target_vertex) {
            Some(meeting) => Ok(self.reconstruct(source_vertex, meeting)),
            None => Ok(PathResult::empty(&self.options)),
        }
    }

    /// Cost of the shortest path between two vertices, `None` if there is
    /// none.
    pub fn shortest_distance(&mut self, source: VertexId, target: VertexId) -> Option<Weight> {
        if source == target {
            return Some(0.0);
        }
        self.meet(source, target).map(|meeting| meeting.weight)
    }

    fn lookup(&self, key: &str) -> Result<VertexId> {
        self.graph
            .vertex(key)
            .ok_or_else(|| GraphError::UnknownNode(key.to_string()))
    }

    fn meet(&mut self, source: VertexId, target: VertexId) -> Option<Meeting> {
        self.forward_data.start(source);
        self.backward_data.start(target);

        let mut meeting = None;
        loop {
            let mut progressed = false;
            for direction in [Direction::Forward, Direction::Backward] {
                if self.can_improve(direction, meeting) {
                    self.step(direction, &mut meeting);
                    progressed = true;
                }
            }

            if !progressed {
                break;
            }
        }

        meeting
    }

    /// True while the next vertex of `direction` is closer than the best
    /// meeting. Past that point upward edges cannot lead to a shorter path.
    fn can_improve(&self, direction: Direction, meeting: Option<Meeting>) -> bool {
        let data = match direction {
            Direction::Forward => &self.forward_data,
            Direction::Backward => &self.backward_data,
        };
        let limit = meeting.map_or(Weight::INFINITY, |meeting| meeting.weight);
        data.peek_distance().is_some_and(|distance| distance < limit)
    }

    /// Settles one vertex of `direction` and relaxes its upward edges.
    fn step(&mut self, direction: Direction, meeting: &mut Option<Meeting>) {
        let graph = self.graph;
        let (data, opposite_data) = match direction {
            Direction::Forward => (&mut self.forward_data, &self.backward_data),
            Direction::Backward => (&mut self.backward_data, &self.forward_data),
        };

        let Some((vertex, distance)) = data.pop() else {
            return;
        };

        let upward_edges = match direction {
            Direction::Forward => graph.forward(vertex),
            Direction::Backward => graph.reverse(vertex),
        };
        for half_edge in upward_edges {
            let Some(new_distance) = data.update(vertex, distance, half_edge) else {
                continue;
            };
            let Some(opposite_distance) = opposite_data.distance(half_edge.vertex) else {
                continue;
            };

            let weight = new_distance + opposite_distance;
            if meeting.map_or(true, |meeting| weight < meeting.weight) {
                *meeting = Some(Meeting {
                    vertex: half_edge.vertex,
                    weight,
                });
            }
        }
    }

    fn reconstruct(&self, source: VertexId, meeting: Meeting) -> PathResult {
        let mut hops = self.forward_data.predecessor_edges(meeting.vertex);
        hops.reverse();
        hops.extend(self.backward_data.predecessor_edges(meeting.vertex));

        let base_ids: Vec<EdgeId> = hops
            .iter()
            .flat_map(|&edge| self.graph.ordered_base_ids(edge).iter().copied())
            .collect();

        PathResult {
            total_cost: meeting.weight,
            nodes: self.options.nodes.then(|| self.node_keys(source, &base_ids)),
            properties: self.options.properties.then(|| {
                base_ids
                    .iter()
                    .map(|&edge| {
                        self.graph
                            .payload(edge)
                            .map(|payload| payload.properties.clone())
                            .unwrap_or_default()
                    })
                    .collect()
            }),
            path: self.options.path.then(|| self.line_strings(source, &base_ids)),
            ids: self.options.ids.then_some(base_ids),
        }
    }

    /// Replays the base edge chain from `source`, so vertices skipped by
    /// shortcuts show up again.
    fn node_keys(&self, source: VertexId, base_ids: &[EdgeId]) -> Vec<String> {
        let mut cursor = source;
        let mut keys = vec![self.graph.key(cursor).to_string()];
        for &edge in base_ids {
            cursor = self.next_vertex(edge, cursor);
            keys.push(self.graph.key(cursor).to_string());
        }
        keys
    }

    fn line_strings(&self, source: VertexId, base_ids: &[EdgeId]) -> Vec<Vec<Coordinate>> {
        let mut cursor = source;
        let mut lines = Vec::with_capacity(base_ids.len());
        for &edge in base_ids {
            lines.push(self.line_string(edge, cursor));
            cursor = self.next_vertex(edge, cursor);
        }
        lines
    }

    /// Geometry of a base edge walked away from `cursor`. Edges without
    /// geometry fall back to their endpoint keys if those are coordinates.
    fn line_string(&self, edge: EdgeId, cursor: VertexId) -> Vec<Coordinate> {
        let Some(payload) = self.graph.payload(edge) else {
            return Vec::new();
        };

        let mut line = match &payload.geometry {
            Some(geometry) => geometry.clone(),
            None => [payload.start, payload.end]
                .iter()
                .map(|&vertex| parse_coordinate_key(self.graph.key(vertex)))
                .collect::<Option<Vec<_>>>()
                .unwrap_or_default(),
        };

        if payload.start != cursor {
            line.reverse();
        }
        line
    }

    /// The endpoint of base edge `edge` that is not `cursor`.
    fn next_vertex(&self, edge: EdgeId, cursor: VertexId) -> VertexId {
        match self.graph.payload(edge) {
            Some(payload) if payload.start == cursor => payload.end,
            Some(payload) if payload.end == cursor => payload.start,
            _ => self.graph.edge(edge).head(),
        }
    }
}
