use ahash::{HashMap, HashMapExt};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{
    edge::{Edge, EdgeKind, EdgePayload, HalfEdge, InputEdge},
    EdgeId, Rank, VertexId, Weight,
};
use crate::error::{GraphError, Result};

/// How the base edges got into the graph. Only one way is allowed per graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
enum EdgeSource {
    #[default]
    Empty,
    Manual,
    Dataset,
}

/// Graph store keyed by opaque node keys.
///
/// Vertices get dense indices on first reference, edges live in a single
/// arena indexed by [`EdgeId`]. The forward and reverse projections hold
/// [`HalfEdge`] entries of that arena. Once contracted the graph is locked:
/// only upward edges remain in both projections and every retained edge
/// knows the base edges it stands for.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct IndexedGraph {
    node_to_index: HashMap<String, VertexId>,
    index_to_node: Vec<String>,
    edges: Vec<Edge>,
    payloads: Vec<EdgePayload>,
    forward: Vec<Vec<HalfEdge>>,
    reverse: Vec<Vec<HalfEdge>>,
    ranks: Vec<Option<Rank>>,
    ordered_base_ids: Vec<Vec<EdgeId>>,
    max_base_edge_id: EdgeId,
    locked: bool,
    source: EdgeSource,
}

impl IndexedGraph {
    pub fn new() -> IndexedGraph {
        IndexedGraph {
            node_to_index: HashMap::new(),
            ..Default::default()
        }
    }

    /// Adds a single edge by hand. Edges from a node to itself are ignored.
    pub fn add_edge(&mut self, edge: InputEdge) -> Result<()> {
        if self.locked {
            return Err(GraphError::Locked);
        }
        if self.source == EdgeSource::Dataset {
            return Err(GraphError::DatasetLoaded);
        }
        check_costs(&edge)?;

        self.source = EdgeSource::Manual;
        self.insert_input_edge(edge);
        Ok(())
    }

    /// Loads the base network in one go. A graph takes at most one base
    /// network and no manual edges next to it. If any edge is rejected the
    /// graph is left as it was.
    pub fn load_network(&mut self, edges: impl IntoIterator<Item = InputEdge>) -> Result<()> {
        if self.locked {
            return Err(GraphError::Locked);
        }
        match self.source {
            EdgeSource::Dataset => return Err(GraphError::DatasetAlreadyLoaded),
            EdgeSource::Manual => return Err(GraphError::ManualEdgesPresent),
            EdgeSource::Empty => {}
        }

        let edges: Vec<InputEdge> = edges.into_iter().collect();
        edges.iter().try_for_each(check_costs)?;

        self.source = EdgeSource::Dataset;
        for edge in edges {
            self.insert_input_edge(edge);
        }

        debug!(
            "loaded network with {} nodes and {} edges",
            self.number_of_vertices(),
            self.number_of_edges()
        );
        Ok(())
    }

    /// Costs must have been checked with [`check_costs`] before.
    fn insert_input_edge(&mut self, edge: InputEdge) {
        let InputEdge {
            start,
            end,
            cost,
            backward_cost,
            undirected,
            properties,
            geometry,
        } = edge;

        if start == end {
            debug!("start and end node {:?} are the same, ignoring edge", start);
            return;
        }

        let tail = self.vertex_or_insert(start);
        let head = self.vertex_or_insert(end);

        let payload = self.payloads.len() as u32;
        self.payloads.push(EdgePayload {
            properties,
            geometry,
            start: tail,
            end: head,
        });

        self.push_edge(tail, head, cost, EdgeKind::Base { payload });
        if undirected {
            let backward_cost = backward_cost.unwrap_or(cost);
            self.push_edge(head, tail, backward_cost, EdgeKind::Base { payload });
        }
    }

    /// Inserts a shortcut `tail -> head` replacing `replaced`. Indices are
    /// already known, so no key lookup happens.
    pub(crate) fn add_shortcut_edge(
        &mut self,
        tail: VertexId,
        head: VertexId,
        weight: Weight,
        replaced: [EdgeId; 2],
    ) -> Option<EdgeId> {
        self.push_edge(tail, head, weight, EdgeKind::Shortcut { replaced })
    }

    fn push_edge(
        &mut self,
        tail: VertexId,
        head: VertexId,
        weight: Weight,
        kind: EdgeKind,
    ) -> Option<EdgeId> {
        let edge = Edge::new(tail, head, weight, kind)?;
        let id = self.edges.len() as EdgeId;

        self.forward[tail as usize].push(edge.tailless(id));
        self.reverse[head as usize].push(edge.headless(id));
        self.edges.push(edge);

        Some(id)
    }

    fn vertex_or_insert(&mut self, key: String) -> VertexId {
        if let Some(&vertex) = self.node_to_index.get(&key) {
            return vertex;
        }

        let vertex = self.index_to_node.len() as VertexId;
        self.node_to_index.insert(key.clone(), vertex);
        self.index_to_node.push(key);
        self.forward.push(Vec::new());
        self.reverse.push(Vec::new());
        self.ranks.push(None);

        vertex
    }

    /// Freezes the base network. Edges created from now on are shortcuts.
    pub(crate) fn lock(&mut self) -> Result<()> {
        if self.locked {
            return Err(GraphError::AlreadyContracted);
        }

        self.locked = true;
        self.max_base_edge_id = self.edges.len() as EdgeId;
        Ok(())
    }

    pub(crate) fn set_rank(&mut self, vertex: VertexId, rank: Rank) {
        self.ranks[vertex as usize] = Some(rank);
    }

    /// Removes every edge leaving a contracted vertex towards a vertex that
    /// was contracted no later than itself, in both projections.
    pub(crate) fn prune_downward_edges(&mut self) {
        let ranks = &self.ranks;
        for projection in [&mut self.forward, &mut self.reverse] {
            for (vertex, half_edges) in projection.iter_mut().enumerate() {
                let Some(from_rank) = ranks[vertex] else {
                    continue;
                };
                half_edges.retain(|half_edge| {
                    ranks[half_edge.vertex as usize].map_or(true, |to_rank| from_rank < to_rank)
                });
            }
        }
    }

    pub(crate) fn set_ordered_base_ids(&mut self, ordered_base_ids: Vec<Vec<EdgeId>>) {
        self.ordered_base_ids = ordered_base_ids;
    }

    /// Checks that a deserialized contracted graph is internally consistent,
    /// so that lookups during queries stay in bounds.
    pub(crate) fn validate(&self) -> Result<()> {
        let number_of_vertices = self.index_to_node.len();
        let number_of_edges = self.edges.len();

        if self.forward.len() != number_of_vertices
            || self.reverse.len() != number_of_vertices
            || self.ranks.len() != number_of_vertices
        {
            return corrupted("projections and ranks do not match the number of nodes");
        }
        if self.node_to_index.len() != number_of_vertices
            || self
                .index_to_node
                .iter()
                .enumerate()
                .any(|(vertex, key)| self.node_to_index.get(key) != Some(&(vertex as VertexId)))
        {
            return corrupted("node index does not match the node keys");
        }
        if self.ranks.iter().any(Option::is_none) {
            return corrupted("node without rank");
        }

        if self.max_base_edge_id as usize > number_of_edges {
            return corrupted("more base edges than edges");
        }
        if self.ordered_base_ids.len() != number_of_edges {
            return corrupted("unpacked edges do not match the number of edges");
        }

        for (id, edge) in self.edges.iter().enumerate() {
            if edge.tail() as usize >= number_of_vertices
                || edge.head() as usize >= number_of_vertices
                || edge.tail() == edge.head()
            {
                return corrupted(format!("edge {} has invalid endpoints", id));
            }
            match edge.kind() {
                EdgeKind::Base { payload } => {
                    let Some(payload) = self.payloads.get(payload as usize) else {
                        return corrupted(format!("edge {} has no payload", id));
                    };
                    if payload.start as usize >= number_of_vertices
                        || payload.end as usize >= number_of_vertices
                    {
                        return corrupted(format!("payload of edge {} has invalid endpoints", id));
                    }
                }
                EdgeKind::Shortcut { replaced } => {
                    if replaced.iter().any(|&replaced| replaced as usize >= id) {
                        return corrupted(format!("shortcut {} replaces unknown edges", id));
                    }
                }
            }
        }

        let max_base_edge_id = self.max_base_edge_id;
        if self
            .ordered_base_ids
            .iter()
            .flatten()
            .any(|&base_id| base_id >= max_base_edge_id)
        {
            return corrupted("unpacked edge refers to a non base edge");
        }

        for (vertex, half_edges) in self.forward.iter().enumerate() {
            for half_edge in half_edges {
                let edge = self.edges.get(half_edge.edge as usize);
                if edge.map(|edge| (edge.tail(), edge.head()))
                    != Some((vertex as VertexId, half_edge.vertex))
                {
                    return corrupted(format!("forward entry of node {} does not match its edge", vertex));
                }
            }
        }
        for (vertex, half_edges) in self.reverse.iter().enumerate() {
            for half_edge in half_edges {
                let edge = self.edges.get(half_edge.edge as usize);
                if edge.map(|edge| (edge.tail(), edge.head()))
                    != Some((half_edge.vertex, vertex as VertexId))
                {
                    return corrupted(format!("reverse entry of node {} does not match its edge", vertex));
                }
            }
        }

        Ok(())
    }

    pub fn vertex(&self, key: &str) -> Option<VertexId> {
        self.node_to_index.get(key).copied()
    }

    pub fn key(&self, vertex: VertexId) -> &str {
        &self.index_to_node[vertex as usize]
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.index_to_node.len() as u32
    }

    /// Size of the edge arena, shortcuts included.
    pub fn number_of_edges(&self) -> u32 {
        self.edges.len() as u32
    }

    pub fn number_of_base_edges(&self) -> u32 {
        if self.locked {
            self.max_base_edge_id
        } else {
            self.edges.len() as u32
        }
    }

    pub fn number_of_shortcuts(&self) -> u32 {
        self.number_of_edges() - self.number_of_base_edges()
    }

    pub fn is_contracted(&self) -> bool {
        self.locked
    }

    pub fn is_base_edge(&self, edge: EdgeId) -> bool {
        edge < self.number_of_base_edges()
    }

    pub fn edge(&self, edge: EdgeId) -> &Edge {
        &self.edges[edge as usize]
    }

    pub fn base_edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges
            .iter()
            .take(self.number_of_base_edges() as usize)
            .enumerate()
            .map(|(id, edge)| (id as EdgeId, edge))
    }

    /// Index of the input edge a base edge was created from, `None` for
    /// shortcuts. Both directions of an undirected input edge share it.
    pub fn input_edge_id(&self, edge: EdgeId) -> Option<u32> {
        match self.edges[edge as usize].kind() {
            EdgeKind::Base { payload } => Some(payload),
            EdgeKind::Shortcut { .. } => None,
        }
    }

    /// Payload of a base edge, `None` for shortcuts.
    pub fn payload(&self, edge: EdgeId) -> Option<&EdgePayload> {
        match self.edges[edge as usize].kind() {
            EdgeKind::Base { payload } => self.payloads.get(payload as usize),
            EdgeKind::Shortcut { .. } => None,
        }
    }

    pub fn forward(&self, vertex: VertexId) -> &[HalfEdge] {
        &self.forward[vertex as usize]
    }

    pub fn reverse(&self, vertex: VertexId) -> &[HalfEdge] {
        &self.reverse[vertex as usize]
    }

    pub fn rank(&self, vertex: VertexId) -> Option<Rank> {
        self.ranks[vertex as usize]
    }

    pub fn is_contracted_vertex(&self, vertex: VertexId) -> bool {
        self.ranks[vertex as usize].is_some()
    }

    /// Base edges `edge` stands for, ordered from its tail to its head.
    /// Empty until the shortcuts have been unpacked and for edges that did
    /// not survive contraction.
    pub fn ordered_base_ids(&self, edge: EdgeId) -> &[EdgeId] {
        self.ordered_base_ids
            .get(edge as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn check_costs(edge: &InputEdge) -> Result<()> {
    check_cost(edge.cost)?;
    if let Some(backward_cost) = edge.backward_cost {
        check_cost(backward_cost)?;
    }
    Ok(())
}

fn corrupted<T>(message: impl Into<String>) -> Result<T> {
    Err(GraphError::Corrupted(message.into()))
}

fn check_cost(cost: Weight) -> Result<()> {
    if !cost.is_finite() || cost < 0.0 {
        return Err(GraphError::InvalidCost(cost));
    }
    Ok(())
}
