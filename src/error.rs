use crate::types::NodeId;
use thiserror::Error;

/// Errors raised while generating, decoding or traversing trees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The caller asked for something that has no tree, e.g. zero nodes.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("node {0} is not in the graph")]
    NodeNotFound(NodeId),

    /// The graph handed in is not a tree over the labels `0..n`.
    #[error("not a tree: {0}")]
    NotATree(String),
}

pub type Result<T> = std::result::Result<T, TreeError>;
