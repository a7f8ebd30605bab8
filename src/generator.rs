//! Uniformly random labeled trees.
//!
//! A tree on the nodes `0..n` is drawn by sampling a Prüfer sequence of
//! `n - 2` independent uniform labels and decoding it. Because Prüfer
//! sequences and labeled trees are in bijection, every one of the `n^(n-2)`
//! trees is equally likely.
//!
//! The randomness source is always passed in explicitly. [`TreeGenerator`]
//! wraps the common case of a seeded [`StdRng`] so runs are reproducible.

use crate::error::{Result, TreeError};
use crate::graph::TreeGraph;
use crate::graphmodels::arena::{DiGraph, UnGraph};
use crate::prufer::{from_prufer_sequence, random_prufer_sequence};
use crate::timer::ScopedTimer;
use crate::types::*;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::iter::IntoParallelIterator;
use rayon::iter::ParallelIterator;

/// Shape of the generated tree, fixed before generation starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Undirected,
    /// An out-tree: every edge points away from the given root.
    RootedAt(NodeId),
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Undirected
    }
}

#[derive(Clone, Debug)]
pub enum RandomTree {
    Undirected(UnGraph<()>),
    Directed(DiGraph<()>),
}

impl RandomTree {
    pub fn is_directed(&self) -> bool {
        matches!(self, RandomTree::Directed(_))
    }

    pub fn num_nodes(&self) -> usize {
        match self {
            RandomTree::Undirected(tree) => tree.num_nodes(),
            RandomTree::Directed(tree) => tree.num_nodes(),
        }
    }

    pub fn num_edges(&self) -> usize {
        match self {
            RandomTree::Undirected(tree) => tree.num_edges(),
            RandomTree::Directed(tree) => tree.num_edges(),
        }
    }

    pub fn edges(&self) -> EdgeList {
        match self {
            RandomTree::Undirected(tree) => tree.edges().collect(),
            RandomTree::Directed(tree) => tree.edges().collect(),
        }
    }

    pub fn into_undirected(self) -> Option<UnGraph<()>> {
        match self {
            RandomTree::Undirected(tree) => Some(tree),
            RandomTree::Directed(_) => None,
        }
    }

    pub fn into_directed(self) -> Option<DiGraph<()>> {
        match self {
            RandomTree::Directed(tree) => Some(tree),
            RandomTree::Undirected(_) => None,
        }
    }
}

fn check_num_nodes(n: usize) -> Result<()> {
    if n == 0 {
        return Err(TreeError::InvalidArgument(
            "no tree exists on zero nodes".to_string(),
        ));
    }
    Ok(())
}

fn check_root(n: usize, root: NodeId) -> Result<()> {
    if root < 0 || root as usize >= n {
        return Err(TreeError::InvalidArgument(format!(
            "root {} is not one of the {} nodes",
            root, n
        )));
    }
    Ok(())
}

/// Returns a uniformly random undirected tree on the nodes `0..n`.
///
/// Fails with [`TreeError::InvalidArgument`] when `n` is zero, since the
/// null graph is not a tree.
pub fn random_tree<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<UnGraph<()>> {
    check_num_nodes(n)?;
    if n == 1 {
        return Ok(UnGraph::from_edge_list(1, &[]));
    }
    from_prufer_sequence(&random_prufer_sequence(n, rng))
}

/// Orients every edge of `tree` away from `root`, following a depth-first search.
pub fn orient_from(tree: &UnGraph<()>, root: NodeId) -> Result<DiGraph<()>> {
    let edges = tree.dfs_edges(root)?;
    let mut directed = DiGraph::with_capacity(tree.num_nodes());
    for v in tree.vertices() {
        directed.add_node(v, ());
    }
    for (u, v) in edges {
        directed.add_edge(u, v);
    }
    Ok(directed)
}

/// Returns a uniformly random out-tree on the nodes `0..n` rooted at `root`.
pub fn random_directed_tree<R: Rng + ?Sized>(
    n: usize,
    root: NodeId,
    rng: &mut R,
) -> Result<DiGraph<()>> {
    check_num_nodes(n)?;
    check_root(n, root)?;
    orient_from(&random_tree(n, rng)?, root)
}

pub fn random_tree_with<R: Rng + ?Sized>(
    n: usize,
    rng: &mut R,
    orientation: Orientation,
) -> Result<RandomTree> {
    match orientation {
        Orientation::Undirected => random_tree(n, rng).map(RandomTree::Undirected),
        Orientation::RootedAt(root) => {
            random_directed_tree(n, root, rng).map(RandomTree::Directed)
        }
    }
}

/// Seeded configuration for generating random trees.
#[derive(Clone, Debug)]
pub struct TreeGenerator {
    num_nodes: usize,
    seed: u64,
    orientation: Orientation,
}

impl TreeGenerator {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            seed: crate::K_RAND_SEED,
            orientation: Orientation::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn generate_seeded(&self, seed: u64) -> Result<RandomTree> {
        let mut rng = StdRng::seed_from_u64(seed);
        random_tree_with(self.num_nodes, &mut rng, self.orientation)
    }

    pub fn generate(&self) -> Result<RandomTree> {
        let _timer = ScopedTimer::new("random_tree");
        let tree = self.generate_seeded(self.seed)?;
        debug!(
            "generated {:?} tree on {} nodes with seed {}",
            self.orientation, self.num_nodes, self.seed
        );
        Ok(tree)
    }

    /// Generates `count` trees in parallel. Tree `i` is seeded with `seed + i`,
    /// so the batch is the same on every run and independent of thread count.
    pub fn generate_batch(&self, count: usize) -> Result<Vec<RandomTree>> {
        check_num_nodes(self.num_nodes)?;
        if let Orientation::RootedAt(root) = self.orientation {
            check_root(self.num_nodes, root)?;
        }

        let _timer = ScopedTimer::new("random_tree_batch");
        let trees = (0..count)
            .into_par_iter()
            .map(|i| self.generate_seeded(self.seed.wrapping_add(i as u64)))
            .collect::<Result<Vec<_>>>()?;
        debug!(
            "generated {} trees on {} nodes starting at seed {}",
            count, self.num_nodes, self.seed
        );
        Ok(trees)
    }
}
