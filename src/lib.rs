//! Builders for labeled trees: prefix trees over sequence collections and
//! uniformly random labeled trees via Prüfer sequences.

/// Seed used by [`generator::TreeGenerator`] unless another one is given.
pub const K_RAND_SEED: u64 = 52;

/// Errors shared by all builders
pub mod error;
/// Random labeled trees, undirected or oriented away from a root
pub mod generator;
/// Graph trait that the builders are written against, any graph model is required to implement it
pub mod graph;
/// Graph models; currently the generational arena
pub mod graphmodels;
/// Prüfer sequence encoding and decoding
pub mod prufer;
/// Prefix trees (tries) with synthetic root and nil nodes
pub mod trie;
/// Common types for node ids and edges.
pub mod types;

mod timer;

pub use error::{Result, TreeError};
pub use generator::{random_directed_tree, random_tree, Orientation, RandomTree, TreeGenerator};
pub use graph::TreeGraph;
pub use graphmodels::arena::{DiGraph, UnGraph};
pub use trie::{prefix_tree, prefix_tree_recursive, PrefixTree, Source};
