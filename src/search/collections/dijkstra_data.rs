use super::{node_heap::NodeHeap, node_pool::NodePool};
use crate::graphs::{edge::HalfEdge, EdgeId, VertexId, Weight};

/// State of a single Dijkstra run: the node pool with its distances and
/// predecessors, and the heap of queued nodes. Reusable across runs via
/// [`DijkstraData::clear`].
#[derive(Clone, Debug)]
pub struct DijkstraData {
    pool: NodePool,
    queue: NodeHeap,
}

impl DijkstraData {
    pub fn new(number_of_vertices: u32) -> DijkstraData {
        DijkstraData {
            pool: NodePool::new(number_of_vertices),
            queue: NodeHeap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.pool.reset();
    }

    /// Clears the state and queues `source` at distance zero.
    pub fn start(&mut self, source: VertexId) {
        self.clear();
        let slot = self.pool.get_or_create(source);
        self.pool.node_mut(slot).distance = 0.0;
        self.queue.push(self.pool.nodes_mut(), slot);
    }

    /// Settles the queued node with the smallest distance.
    pub fn pop(&mut self) -> Option<(VertexId, Weight)> {
        let slot = self.queue.pop(self.pool.nodes_mut())?;
        let node = self.pool.node_mut(slot);
        node.visited = true;
        Some((node.vertex, node.distance))
    }

    /// Distance of the next node [`DijkstraData::pop`] would settle.
    pub fn peek_distance(&self) -> Option<Weight> {
        self.queue
            .peek()
            .map(|slot| self.pool.node(slot).distance)
    }

    /// Relaxes `half_edge` leaving `tail`, which has been settled at
    /// `tail_distance`. Returns the new distance of the neighbor if it
    /// improved.
    pub fn update(&mut self, tail: VertexId, tail_distance: Weight, half_edge: &HalfEdge) -> Option<Weight> {
        let slot = self.pool.get_or_create(half_edge.vertex);
        let alternative = tail_distance + half_edge.weight;

        let node = self.pool.node_mut(slot);
        if node.visited || alternative >= node.distance {
            return None;
        }
        node.distance = alternative;
        node.predecessor = Some((tail, half_edge.edge));

        if node.is_queued() {
            self.queue.update(self.pool.nodes_mut(), slot);
        } else {
            self.queue.push(self.pool.nodes_mut(), slot);
        }
        Some(alternative)
    }

    pub fn distance(&self, vertex: VertexId) -> Option<Weight> {
        self.pool.distance(vertex)
    }

    pub fn predecessor_edges(&self, vertex: VertexId) -> Vec<EdgeId> {
        self.pool.predecessor_edges(vertex)
    }
}
