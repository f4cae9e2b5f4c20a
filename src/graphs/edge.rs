use serde::{Deserialize, Serialize};

use super::{Coordinate, EdgeId, VertexId, Weight};

/// Arbitrary caller supplied attributes of an input edge.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// What an edge of the arena stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Edge of the input network, `payload` indexes the payload table.
    Base { payload: u32 },
    /// Stands for the two edges `tail -> v` and `v -> head` it replaces,
    /// either of which may itself be a shortcut.
    Shortcut { replaced: [EdgeId; 2] },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    tail: VertexId,
    head: VertexId,
    weight: Weight,
    kind: EdgeKind,
}

impl Edge {
    pub fn new(tail: VertexId, head: VertexId, weight: Weight, kind: EdgeKind) -> Option<Edge> {
        if tail == head {
            return None;
        }

        Some(Edge {
            tail,
            head,
            weight,
            kind,
        })
    }

    pub fn tail(&self) -> VertexId {
        self.tail
    }

    pub fn head(&self) -> VertexId {
        self.head
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn is_shortcut(&self) -> bool {
        matches!(self.kind, EdgeKind::Shortcut { .. })
    }

    /// The forward adjacency entry of this edge.
    pub fn tailless(&self, id: EdgeId) -> HalfEdge {
        HalfEdge {
            vertex: self.head,
            weight: self.weight,
            edge: id,
        }
    }

    /// The reverse ("arrive from") adjacency entry of this edge.
    pub fn headless(&self, id: EdgeId) -> HalfEdge {
        HalfEdge {
            vertex: self.tail,
            weight: self.weight,
            edge: id,
        }
    }
}

/// Entry of an adjacency projection. In the forward projection `vertex` is
/// the head of `edge`, in the reverse projection it is the tail.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HalfEdge {
    pub vertex: VertexId,
    pub weight: Weight,
    pub edge: EdgeId,
}

/// Side table record of a base edge. `start` and `end` are the input
/// orientation, which `geometry` follows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgePayload {
    #[serde(with = "crate::graphs::persistence::properties_as_json")]
    pub properties: Properties,
    pub geometry: Option<Vec<Coordinate>>,
    pub start: VertexId,
    pub end: VertexId,
}

/// One edge of the base network as handed to the graph store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputEdge {
    pub start: String,
    pub end: String,
    pub cost: Weight,
    /// Cost of `end -> start` if it differs from `cost`. Only used for
    /// undirected edges.
    pub backward_cost: Option<Weight>,
    pub undirected: bool,
    pub properties: Properties,
    pub geometry: Option<Vec<Coordinate>>,
}

impl InputEdge {
    pub fn new(start: impl Into<String>, end: impl Into<String>, cost: Weight) -> InputEdge {
        InputEdge {
            start: start.into(),
            end: end.into(),
            cost,
            ..Default::default()
        }
    }

    pub fn undirected(mut self) -> Self {
        self.undirected = true;
        self
    }

    pub fn with_backward_cost(mut self, backward_cost: Weight) -> Self {
        self.undirected = true;
        self.backward_cost = Some(backward_cost);
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_geometry(mut self, geometry: Vec<Coordinate>) -> Self {
        self.geometry = Some(geometry);
        self
    }
}
