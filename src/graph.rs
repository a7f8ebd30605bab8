use crate::error::Result;
use crate::types::*;

pub type Range<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

/// Marks a graph type as directed or undirected at compile time.
pub trait EdgeType {
    fn is_directed() -> bool;
}

/// Edges point from the first endpoint to the second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Directed;

/// Edges have no orientation; `(u, v)` and `(v, u)` are the same edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Undirected;

impl EdgeType for Directed {
    #[inline]
    fn is_directed() -> bool {
        true
    }
}

impl EdgeType for Undirected {
    #[inline]
    fn is_directed() -> bool {
        false
    }
}

/// The graph operations the tree builders rely on.
///
/// Every node carries one attribute of type `Self::Attr`. All neighbor and
/// edge listings are reported in ascending id order so that output is
/// deterministic regardless of how the model stores adjacency.
pub trait TreeGraph {
    type Attr;

    fn directed(&self) -> bool;

    fn num_nodes(&self) -> usize;
    /// Number of distinct edges. An undirected edge counts once.
    fn num_edges(&self) -> usize;

    /// Inserts `v` with attribute `attr`. Returns `false` (and replaces the
    /// attribute) if `v` already existed.
    fn add_node(&mut self, v: NodeId, attr: Self::Attr) -> bool;
    fn contains_node(&self, v: NodeId) -> bool;
    fn node_attr(&self, v: NodeId) -> Option<&Self::Attr>;

    /// Connects `u` to `v`. Returns `false` if the edge was already present.
    ///
    /// # Panics
    /// If either endpoint has not been added.
    fn add_edge(&mut self, u: NodeId, v: NodeId) -> bool;
    fn has_edge(&self, u: NodeId, v: NodeId) -> bool;

    fn out_degree(&self, v: NodeId) -> usize;
    fn in_degree(&self, v: NodeId) -> usize;

    fn out_neigh(&self, v: NodeId) -> Range<NodeId>;
    fn in_neigh(&self, v: NodeId) -> Range<NodeId>;

    fn vertices(&self) -> Range<NodeId>;
    /// All edges sorted by `(u, v)`; undirected edges are reported once with `u <= v`.
    fn edges(&self) -> Range<Edge>;

    /// Edges of a depth-first search tree rooted at `source`, in discovery order.
    fn dfs_edges(&self, source: NodeId) -> Result<EdgeList>;

    /// Whether every node is reachable from any other when edge directions are ignored.
    /// The null graph is not considered connected.
    fn is_connected(&self) -> bool;

    fn is_tree(&self) -> bool {
        self.num_nodes() > 0 && self.num_edges() == self.num_nodes() - 1 && self.is_connected()
    }
}
