pub mod error;
pub mod graphs;
pub mod search;
pub mod utility;

pub use error::{GraphError, Result};
pub use graphs::{edge::InputEdge, indexed_graph::IndexedGraph};
pub use search::{
    ch::{contraction::ContractionParams, query::Pathfinder},
    path::{PathResult, QueryOptions},
};
