use indicatif::ProgressIterator;
use log::{debug, info};

use crate::{
    error::Result,
    graphs::{edge::HalfEdge, indexed_graph::IndexedGraph, EdgeId, Rank, VertexId, Weight},
    search::{
        collections::node_heap::{HeapRecord, NodeHeap},
        shortcuts::unpack_surviving_edges,
        witness::WitnessSearch,
    },
    utility::get_progressbar,
};

/// Parameters for building the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractionParams {
    pub(crate) prune_interval: usize,
    pub(crate) edge_difference_coeff: i64,
    pub(crate) contracted_neighbors_coeff: i64,
}

impl ContractionParams {
    pub fn new() -> Self {
        Default::default()
    }

    /// Number of contracted vertices between two passes that drop downward
    /// edges. Zero is treated as one.
    pub fn prune_interval(mut self, interval: usize) -> Self {
        self.prune_interval = interval.max(1);
        self
    }

    pub fn edge_difference_coeff(mut self, coeff: i64) -> Self {
        self.edge_difference_coeff = coeff;
        self
    }

    pub fn contracted_neighbors_coeff(mut self, coeff: i64) -> Self {
        self.contracted_neighbors_coeff = coeff;
        self
    }
}

impl Default for ContractionParams {
    fn default() -> Self {
        ContractionParams {
            prune_interval: 50,
            edge_difference_coeff: 1,
            contracted_neighbors_coeff: 1,
        }
    }
}

impl IndexedGraph {
    /// Builds the contraction hierarchy with default parameters.
    pub fn contract(&mut self) -> Result<()> {
        self.contract_with(ContractionParams::default())
    }

    /// Locks the graph, contracts every vertex, drops all downward edges and
    /// unpacks the surviving edges into base edge sequences. Fails if the
    /// graph is already contracted.
    pub fn contract_with(&mut self, params: ContractionParams) -> Result<()> {
        self.lock()?;

        Contractor::new(self, params).run();

        info!("Unpacking shortcuts");
        let ordered_base_ids = unpack_surviving_edges(self);
        self.set_ordered_base_ids(ordered_base_ids);

        Ok(())
    }
}

/// Queue entry of the contraction order.
#[derive(Debug, Clone)]
struct OrderNode {
    vertex: VertexId,
    score: i64,
    heap_index: Option<usize>,
}

impl HeapRecord for OrderNode {
    fn precedes(&self, other: &Self) -> bool {
        (self.score, self.vertex) < (other.score, other.vertex)
    }

    fn heap_index(&self) -> Option<usize> {
        self.heap_index
    }

    fn set_heap_index(&mut self, heap_index: Option<usize>) {
        self.heap_index = heap_index;
    }
}

struct Shortcut {
    tail: VertexId,
    head: VertexId,
    weight: Weight,
    replaced: [EdgeId; 2],
}

struct Contractor<'a> {
    graph: &'a mut IndexedGraph,
    params: ContractionParams,
    witness: WitnessSearch,
    order: Vec<OrderNode>,
    queue: NodeHeap,
}

impl<'a> Contractor<'a> {
    fn new(graph: &'a mut IndexedGraph, params: ContractionParams) -> Contractor<'a> {
        let number_of_vertices = graph.number_of_vertices();
        Contractor {
            graph,
            params,
            witness: WitnessSearch::new(number_of_vertices),
            order: Vec::with_capacity(number_of_vertices as usize),
            queue: NodeHeap::new(),
        }
    }

    fn run(&mut self) {
        let number_of_vertices = self.graph.number_of_vertices();

        info!("Setting up queue");
        let pb = get_progressbar("Initializing queue", number_of_vertices as u64);
        for vertex in (0..number_of_vertices).progress_with(pb) {
            let score = self.score(vertex);
            self.order.push(OrderNode {
                vertex,
                score,
                heap_index: None,
            });
            self.queue.push(&mut self.order, vertex as usize);
        }

        info!("Start contracting");
        let pb = get_progressbar("Contracting", number_of_vertices as u64);
        let mut rank: Rank = 0;
        let mut total_shortcuts = 0;
        while !self.queue.is_empty() {
            if self.queue.len() % self.params.prune_interval == 0 {
                info!("Pruning downward edges, {} vertices left", self.queue.len());
                self.graph.prune_downward_edges();
            }

            let Some(vertex) = self.next_vertex() else {
                break;
            };
            self.queue.pop(&mut self.order);

            rank += 1;
            self.graph.set_rank(vertex, rank);
            let shortcuts = self.contract(vertex, false);
            total_shortcuts += shortcuts;

            debug!("contracted {} with rank {}, {} shortcuts", vertex, rank, shortcuts);
            pb.inc(1);
        }
        pb.finish_and_clear();

        self.graph.prune_downward_edges();
        info!(
            "Finished contracting {} vertices, added {} shortcuts",
            number_of_vertices, total_shortcuts
        );
    }

    /// Re-scores the front of the queue until the vertex in front keeps its
    /// place after being re-scored.
    fn next_vertex(&mut self) -> Option<VertexId> {
        loop {
            let vertex = self.queue.peek()? as VertexId;

            let score = self.score(vertex);
            self.order[vertex as usize].score = score;
            self.queue.update(&mut self.order, vertex as usize);

            if self.queue.peek() == Some(vertex as usize) {
                return Some(vertex);
            }
        }
    }

    fn score(&mut self, vertex: VertexId) -> i64 {
        let shortcuts = self.contract(vertex, true) as i64;

        let out_edges = self.graph.forward(vertex);
        let edge_count = out_edges.len() as i64;
        let contracted_neighbors = out_edges
            .iter()
            .filter(|half_edge| self.graph.is_contracted_vertex(half_edge.vertex))
            .count() as i64;

        self.params.edge_difference_coeff * (shortcuts - edge_count)
            + self.params.contracted_neighbors_coeff * contracted_neighbors
    }

    /// Computes the shortcuts needed to bypass `vertex` and inserts them
    /// unless `dry_run` is set. Returns their number either way.
    fn contract(&mut self, vertex: VertexId, dry_run: bool) -> usize {
        let outgoing = self.remaining_neighbors(self.graph.forward(vertex));
        if outgoing.is_empty() {
            return 0;
        }
        let incoming = self.remaining_neighbors(self.graph.reverse(vertex));

        let mut shortcuts = Vec::new();
        for in_edge in incoming.iter() {
            let max_total = outgoing
                .iter()
                .filter(|out_edge| out_edge.vertex != in_edge.vertex)
                .map(|out_edge| in_edge.weight + out_edge.weight)
                .reduce(Weight::max);
            let Some(max_total) = max_total else {
                continue;
            };

            self.witness.run(self.graph, in_edge.vertex, vertex, max_total);

            for out_edge in outgoing.iter() {
                if out_edge.vertex == in_edge.vertex {
                    continue;
                }

                let direct = in_edge.weight + out_edge.weight;
                let via_witness = self.witness.distance(out_edge.vertex).unwrap_or(Weight::INFINITY);
                if direct < via_witness {
                    shortcuts.push(Shortcut {
                        tail: in_edge.vertex,
                        head: out_edge.vertex,
                        weight: direct,
                        replaced: [in_edge.edge, out_edge.edge],
                    });
                }
            }
        }

        if !dry_run {
            for shortcut in shortcuts.iter() {
                self.graph
                    .add_shortcut_edge(shortcut.tail, shortcut.head, shortcut.weight, shortcut.replaced);
            }
        }

        shortcuts.len()
    }

    /// Uncontracted neighbors of a half edge list, only the cheapest entry
    /// per neighbor.
    fn remaining_neighbors(&self, half_edges: &[HalfEdge]) -> Vec<HalfEdge> {
        let mut remaining: Vec<HalfEdge> = half_edges
            .iter()
            .filter(|half_edge| !self.graph.is_contracted_vertex(half_edge.vertex))
            .copied()
            .collect();
        remaining.sort_unstable_by(|a, b| {
            a.vertex
                .cmp(&b.vertex)
                .then(a.weight.total_cmp(&b.weight))
        });
        remaining.dedup_by_key(|half_edge| half_edge.vertex);
        remaining
    }
}
