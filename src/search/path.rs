use serde::{Deserialize, Serialize};

use crate::graphs::{edge::Properties, Coordinate, EdgeId, Weight};

/// Selects which optional outputs a query produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    pub ids: bool,
    pub nodes: bool,
    pub properties: bool,
    pub path: bool,
}

impl QueryOptions {
    pub fn new() -> Self {
        Default::default()
    }

    /// Every optional output.
    pub fn all() -> Self {
        QueryOptions {
            ids: true,
            nodes: true,
            properties: true,
            path: true,
        }
    }

    pub fn ids(mut self, ids: bool) -> Self {
        self.ids = ids;
        self
    }

    pub fn nodes(mut self, nodes: bool) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn properties(mut self, properties: bool) -> Self {
        self.properties = properties;
        self
    }

    pub fn path(mut self, path: bool) -> Self {
        self.path = path;
        self
    }
}

/// Outcome of a query. A missing path reports `total_cost == 0` and empty
/// lists for the requested outputs, outputs that were not requested are
/// `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    pub total_cost: Weight,
    /// Base edges of the path in travel order, as edge arena ids. An
    /// undirected input edge has one arena id per direction; map them back
    /// with [`IndexedGraph::input_edge_id`].
    ///
    /// [`IndexedGraph::input_edge_id`]: crate::IndexedGraph::input_edge_id
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ids: Option<Vec<EdgeId>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub nodes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub properties: Option<Vec<Properties>>,
    /// One line string per base edge, each oriented in travel direction.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub path: Option<Vec<Vec<Coordinate>>>,
}

impl PathResult {
    /// The result for "no path" and for `source == target`.
    pub fn empty(options: &QueryOptions) -> PathResult {
        PathResult {
            total_cost: 0.0,
            ids: options.ids.then(Vec::new),
            nodes: options.nodes.then(Vec::new),
            properties: options.properties.then(Vec::new),
            path: options.path.then(Vec::new),
        }
    }
}
