use super::node_heap::HeapRecord;
use crate::graphs::{EdgeId, VertexId, Weight};

/// Transient state of one vertex during a search.
#[derive(Clone, Debug)]
pub struct SearchNode {
    pub vertex: VertexId,
    pub distance: Weight,
    /// The neighbor the search came from and the edge connecting both.
    pub predecessor: Option<(VertexId, EdgeId)>,
    pub visited: bool,
    heap_index: Option<usize>,
}

impl SearchNode {
    fn new(vertex: VertexId) -> SearchNode {
        SearchNode {
            vertex,
            distance: Weight::INFINITY,
            predecessor: None,
            visited: false,
            heap_index: None,
        }
    }

    pub fn is_queued(&self) -> bool {
        self.heap_index.is_some()
    }
}

impl HeapRecord for SearchNode {
    fn precedes(&self, other: &Self) -> bool {
        self.distance < other.distance
            || (self.distance == other.distance && self.vertex < other.vertex)
    }

    fn heap_index(&self) -> Option<usize> {
        self.heap_index
    }

    fn set_heap_index(&mut self, heap_index: Option<usize>) {
        self.heap_index = heap_index;
    }
}

/// Arena of [`SearchNode`]s that is reused across searches.
///
/// Records are handed out densely in the order vertices are first touched.
/// A vertex maps to its record through a slot table guarded by a generation
/// stamp, so [`NodePool::reset`] only bumps the generation and rewinds the
/// cursor. Nothing is freed or zeroed between searches.
#[derive(Clone, Debug)]
pub struct NodePool {
    nodes: Vec<SearchNode>,
    in_use: usize,
    slots: Vec<u32>,
    stamps: Vec<u32>,
    generation: u32,
}

impl NodePool {
    pub fn new(number_of_vertices: u32) -> NodePool {
        NodePool {
            nodes: Vec::new(),
            in_use: 0,
            slots: vec![0; number_of_vertices as usize],
            stamps: vec![0; number_of_vertices as usize],
            generation: 1,
        }
    }

    pub fn reset(&mut self) {
        self.in_use = 0;
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // stamps written 2^32 resets ago would look current again
            self.stamps.fill(0);
            self.generation = 1;
        }
    }

    /// Number of records handed out since the last reset.
    pub fn len(&self) -> usize {
        self.in_use
    }

    pub fn is_empty(&self) -> bool {
        self.in_use == 0
    }

    pub fn slot(&self, vertex: VertexId) -> Option<usize> {
        let vertex = vertex as usize;
        if self.stamps.get(vertex) == Some(&self.generation) {
            return Some(self.slots[vertex] as usize);
        }
        None
    }

    pub fn get_or_create(&mut self, vertex: VertexId) -> usize {
        if let Some(slot) = self.slot(vertex) {
            return slot;
        }

        let index = vertex as usize;
        if index >= self.stamps.len() {
            self.stamps.resize(index + 1, 0);
            self.slots.resize(index + 1, 0);
        }

        let slot = self.in_use;
        if slot < self.nodes.len() {
            self.nodes[slot] = SearchNode::new(vertex);
        } else {
            self.nodes.push(SearchNode::new(vertex));
        }
        self.in_use += 1;

        self.stamps[index] = self.generation;
        self.slots[index] = slot as u32;
        slot
    }

    pub fn get(&self, vertex: VertexId) -> Option<&SearchNode> {
        self.slot(vertex).map(|slot| &self.nodes[slot])
    }

    /// Tentative distance of `vertex`, `None` if the current search has not
    /// reached it.
    pub fn distance(&self, vertex: VertexId) -> Option<Weight> {
        self.get(vertex)
            .map(|node| node.distance)
            .filter(|distance| distance.is_finite())
    }

    pub fn node(&self, slot: usize) -> &SearchNode {
        &self.nodes[slot]
    }

    pub fn node_mut(&mut self, slot: usize) -> &mut SearchNode {
        &mut self.nodes[slot]
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [SearchNode] {
        &mut self.nodes[..self.in_use]
    }

    /// Edges of the predecessor chain ending in `vertex`, starting at
    /// `vertex` and walking back to the source of the search.
    pub fn predecessor_edges(&self, vertex: VertexId) -> Vec<EdgeId> {
        let mut edges = Vec::new();
        let mut current = vertex;
        while let Some((predecessor, edge)) = self.get(current).and_then(|node| node.predecessor) {
            edges.push(edge);
            current = predecessor;
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_forgets_everything() {
        let mut pool = NodePool::new(4);
        let slot = pool.get_or_create(2);
        pool.node_mut(slot).distance = 3.0;
        pool.node_mut(slot).visited = true;
        assert_eq!(pool.distance(2), Some(3.0));
        assert_eq!(pool.len(), 1);

        pool.reset();
        assert!(pool.is_empty());
        assert_eq!(pool.get(2).map(|node| node.vertex), None);
        assert_eq!(pool.distance(2), None);

        let slot = pool.get_or_create(2);
        assert_eq!(slot, 0);
        assert!(!pool.node(slot).visited);
        assert_eq!(pool.node(slot).distance, Weight::INFINITY);
    }

    #[test]
    fn slots_are_handed_out_densely() {
        let mut pool = NodePool::new(10);
        assert_eq!(pool.get_or_create(7), 0);
        assert_eq!(pool.get_or_create(3), 1);
        assert_eq!(pool.get_or_create(7), 0);
        assert_eq!(pool.slot(3), Some(1));
        assert_eq!(pool.slot(4), None);

        // vertices beyond the initial size grow the tables
        assert_eq!(pool.get_or_create(15), 2);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn survives_generation_wraparound() {
        let mut pool = NodePool::new(2);
        pool.get_or_create(1);
        pool.generation = u32::MAX;
        pool.reset();
        assert_eq!(pool.generation, 1);
        assert_eq!(pool.slot(1), None);
    }

    #[test]
    fn walks_predecessors() {
        let mut pool = NodePool::new(3);
        let a = pool.get_or_create(0);
        pool.node_mut(a).distance = 0.0;
        let b = pool.get_or_create(1);
        pool.node_mut(b).predecessor = Some((0, 10));
        let c = pool.get_or_create(2);
        pool.node_mut(c).predecessor = Some((1, 11));

        assert_eq!(pool.predecessor_edges(2), vec![11, 10]);
        assert!(pool.predecessor_edges(0).is_empty());
    }
}
