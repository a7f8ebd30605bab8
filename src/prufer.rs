//! Prüfer sequences: a bijection between sequences of `n - 2` labels drawn
//! from `0..n` and labeled trees on the nodes `0..n`.
//!
//! Decoding and encoding both run in linear time. They keep a pointer `index`
//! to the smallest leaf not yet consumed and only move it forward, except when
//! consuming a label turns a node smaller than `index` into a leaf, in which
//! case that node is the next leaf.

use crate::error::{Result, TreeError};
use crate::graph::TreeGraph;
use crate::graphmodels::arena::UnGraph;
use crate::types::*;
use log::trace;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Draws `n - 2` labels uniformly from `0..n`. Empty for `n <= 2`.
pub fn random_prufer_sequence<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    if n <= 2 {
        return Vec::new();
    }
    let uniform_distribution = Uniform::from(0..n);
    (0..n - 2)
        .map(|_| uniform_distribution.sample(&mut *rng))
        .collect()
}

fn next_leaf(degree: &[usize], from: usize) -> usize {
    (from..degree.len())
        .find(|&k| degree[k] == 1)
        .unwrap_or(degree.len())
}

/// Decodes a Prüfer sequence into the undirected tree on `sequence.len() + 2` nodes.
///
/// Fails with [`TreeError::InvalidArgument`] if a label is not below the node count.
pub fn from_prufer_sequence(sequence: &[usize]) -> Result<UnGraph<()>> {
    let n = sequence.len() + 2;
    if let Some(bad) = sequence.iter().find(|&&v| v >= n) {
        return Err(TreeError::InvalidArgument(format!(
            "label {} out of range for a tree on {} nodes",
            bad, n
        )));
    }

    // One more than the number of occurrences: the final degree of each node.
    let mut degree = vec![1; n];
    for &v in sequence {
        degree[v] += 1;
    }

    let mut edges = Vec::with_capacity(n - 1);
    let mut index = next_leaf(&degree, 0);
    let mut u = index;

    for &v in sequence {
        edges.push((u as NodeId, v as NodeId));
        degree[u] -= 1;
        degree[v] -= 1;
        if v < index && degree[v] == 1 {
            u = v;
        } else {
            index = next_leaf(&degree, index + 1);
            u = index;
        }
    }

    let last: Vec<usize> = (0..n).filter(|&k| degree[k] == 1).collect();
    debug_assert_eq!(last.len(), 2);
    edges.push((last[0] as NodeId, last[1] as NodeId));

    trace!("decoded {:?} into {:?}", sequence, edges);
    Ok(UnGraph::from_edge_list(n, &edges))
}

/// Encodes a tree on the nodes `0..n` (`n >= 2`) as its Prüfer sequence.
///
/// Edge directions are ignored. Fails with [`TreeError::InvalidArgument`] for
/// fewer than two nodes and with [`TreeError::NotATree`] if the node ids are
/// not exactly `0..n` or the graph is not a tree.
pub fn to_prufer_sequence<G: TreeGraph>(tree: &G) -> Result<Vec<usize>> {
    let n = tree.num_nodes();
    if n < 2 {
        return Err(TreeError::InvalidArgument(format!(
            "Prüfer sequences need at least two nodes, got {}",
            n
        )));
    }
    if !tree.vertices().eq(0..n as NodeId) {
        return Err(TreeError::NotATree(format!(
            "node ids must be exactly 0..{}",
            n
        )));
    }
    if !tree.is_tree() {
        return Err(TreeError::NotATree(format!(
            "{} nodes and {} edges do not form a tree",
            n,
            tree.num_edges()
        )));
    }

    let mut adjacency = vec![Vec::new(); n];
    for (a, b) in tree.edges() {
        adjacency[a as usize].push(b as usize);
        adjacency[b as usize].push(a as usize);
    }
    let mut degree: Vec<usize> = adjacency.iter().map(Vec::len).collect();

    let mut sequence = Vec::with_capacity(n - 2);
    let mut index = next_leaf(&degree, 0);
    let mut u = index;

    for _ in 0..n - 2 {
        let v = match adjacency[u].iter().copied().find(|&x| degree[x] != 0) {
            Some(v) => v,
            None => break,
        };
        sequence.push(v);
        degree[u] = 0;
        degree[v] -= 1;
        if v < index && degree[v] == 1 {
            u = v;
        } else {
            index = next_leaf(&degree, index + 1);
            u = index;
        }
    }

    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphmodels::arena::DiGraph;
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn decodes_star_with_tail() {
        let tree = from_prufer_sequence(&[3, 3, 3, 4]).unwrap();
        assert_eq!(tree.num_nodes(), 6);
        assert_eq!(
            tree.edges().collect::<Vec<_>>(),
            vec![(0, 3), (1, 3), (2, 3), (3, 4), (4, 5)]
        );
        assert_eq!(to_prufer_sequence(&tree).unwrap(), vec![3, 3, 3, 4]);
    }

    #[test]
    fn empty_sequence_is_single_edge() {
        let tree = from_prufer_sequence(&[]).unwrap();
        assert_eq!(tree.edges().collect::<Vec<_>>(), vec![(0, 1)]);
        assert!(to_prufer_sequence(&tree).unwrap().is_empty());
    }

    #[test]
    fn rejects_out_of_range_label() {
        assert!(matches!(
            from_prufer_sequence(&[0, 4]),
            Err(TreeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn encoding_rejects_non_trees() {
        let single: UnGraph<()> = UnGraph::from_edge_list(1, &[]);
        assert!(matches!(
            to_prufer_sequence(&single),
            Err(TreeError::InvalidArgument(_))
        ));

        let cycle: UnGraph<()> = UnGraph::from_edge_list(3, &[(0, 1), (1, 2), (2, 0)]);
        assert!(matches!(
            to_prufer_sequence(&cycle),
            Err(TreeError::NotATree(_))
        ));

        let mut shifted: UnGraph<()> = UnGraph::new();
        shifted.add_node(1, ());
        shifted.add_node(2, ());
        shifted.add_edge(1, 2);
        assert!(matches!(
            to_prufer_sequence(&shifted),
            Err(TreeError::NotATree(_))
        ));
    }

    #[test]
    fn encoding_ignores_direction() {
        let tree: DiGraph<()> = DiGraph::from_edge_list(5, &[(0, 1), (1, 2), (1, 3), (3, 4)]);
        let sequence = to_prufer_sequence(&tree).unwrap();
        assert_eq!(sequence, vec![1, 1, 3]);
        let decoded = from_prufer_sequence(&sequence).unwrap();
        assert_eq!(
            decoded.edges().collect::<Vec<_>>(),
            tree.edges().collect::<Vec<_>>()
        );
    }

    #[test]
    fn all_sequences_give_distinct_trees() {
        let n = 5;
        let mut seen = HashSet::new();
        for sequence in (0..n - 2).map(|_| 0..n).multi_cartesian_product() {
            let tree = from_prufer_sequence(&sequence).unwrap();
            assert!(tree.is_tree());
            assert_eq!(to_prufer_sequence(&tree).unwrap(), sequence);
            seen.insert(tree.edges().collect::<Vec<_>>());
        }
        assert_eq!(seen.len(), 125);
    }

    #[test]
    fn random_sequence_has_right_length() {
        let mut rng = StdRng::seed_from_u64(crate::K_RAND_SEED);
        assert!(random_prufer_sequence(1, &mut rng).is_empty());
        assert!(random_prufer_sequence(2, &mut rng).is_empty());
        let sequence = random_prufer_sequence(10, &mut rng);
        assert_eq!(sequence.len(), 8);
        assert!(sequence.iter().all(|&v| v < 10));
    }
}
