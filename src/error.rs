use thiserror::Error;

use crate::graphs::Weight;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph has been contracted, no additional edges can be added")]
    Locked,

    #[error("graph has already been contracted")]
    AlreadyContracted,

    #[error("graph has not been contracted yet")]
    NotContracted,

    #[error("a base network has already been loaded, only one dataset is allowed")]
    DatasetAlreadyLoaded,

    #[error("cannot load a base network after edges were added manually")]
    ManualEdgesPresent,

    #[error("cannot add edges manually to a graph built from a base network")]
    DatasetLoaded,

    #[error("unknown node {0:?}")]
    UnknownNode(String),

    #[error("edge cost must be finite and non-negative, got {0}")]
    InvalidCost(Weight),

    #[error("corrupted graph document: {0}")]
    Corrupted(String),

    #[error("unable to parse line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Bincode(#[from] bincode::Error),
}
