//! Builds a prefix tree (trie) out of a collection of sequences.
//!
//! Each node of the returned [`PrefixTree`] stands for a prefix shared by some
//! of the input sequences and carries a [`Source`] attribute holding the last
//! element of that prefix. Two synthetic nodes are always present:
//!
//!   - the root [`ROOT`] (`0`), the empty prefix, with `Source::Root`. It is
//!     the only node with in-degree zero.
//!   - the nil node [`NIL`] (`-1`), with `Source::Nil`. Every node that ends
//!     one of the input sequences has an edge to it, and it is the only node
//!     with out-degree zero.
//!
//! Removing the nil node leaves an arborescence rooted at `0`. Identical
//! sequences end at the same node, so a sequence collection of `k` distinct
//! sequences gives `NIL` exactly `k` predecessors. The input sequences can be
//! read back with [`recover_paths`].
//!
//! Two construction orders are offered, both driven by an explicit stack of
//! frames `(remaining tails, parent)` so deep sequences never touch the call
//! stack:
//!
//!   - [`prefix_tree`] numbers all children of a frame before descending.
//!   - [`prefix_tree_recursive`] numbers a child only when descending into it,
//!     which gives the numbering of a depth-first recursive build.
//!
//! Both share the same partition step, so they produce the same tree up to
//! node numbering.

use crate::graph::TreeGraph;
use crate::graphmodels::arena::DiGraph;
use crate::timer::ScopedTimer;
use crate::types::*;
use log::{debug, trace};
use std::collections::HashMap;
use std::hash::Hash;

/// Id of the synthetic root.
pub const ROOT: NodeId = 0;
/// Id of the synthetic node every complete sequence points to.
pub const NIL: NodeId = -1;

/// The `source` attribute of a trie node.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source<E> {
    Root,
    /// The sequence element consumed to reach this node.
    Element(E),
    Nil,
}

impl<E> Source<E> {
    pub fn element(&self) -> Option<&E> {
        match self {
            Source::Element(e) => Some(e),
            _ => None,
        }
    }
}

pub type PrefixTree<E> = DiGraph<Source<E>>;

/// Order in which new trie nodes are numbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrieStrategy {
    /// Every child of a frame is created before any of them is expanded.
    Iterative,
    /// A child is created right before its subtree is expanded.
    Recursive,
}

/// Hands out ids for dynamically created nodes. `ROOT` and `NIL` are reserved.
struct IdAllocator {
    next: NodeId,
}

impl IdAllocator {
    fn new() -> Self {
        Self { next: ROOT + 1 }
    }

    fn allocate(&mut self) -> NodeId {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Sequences that continue with `head` below some parent, with `head` removed.
type Group<'p, E> = (&'p E, Vec<&'p [E]>);

struct TrieBuild<E> {
    tree: PrefixTree<E>,
    ids: IdAllocator,
}

impl<E: Eq + Hash + Clone> TrieBuild<E> {
    fn new() -> Self {
        let mut tree = PrefixTree::new();
        tree.add_node(ROOT, Source::Root);
        tree.add_node(NIL, Source::Nil);
        Self {
            tree,
            ids: IdAllocator::new(),
        }
    }

    /// Routes every path of a frame: exhausted paths end at `NIL`, the rest are
    /// grouped by their first element in order of first occurrence.
    fn expand<'p>(&mut self, parent: NodeId, paths: &[&'p [E]]) -> Vec<Group<'p, E>> {
        let mut groups: Vec<Group<'p, E>> = Vec::new();
        let mut slots: HashMap<&'p E, usize> = HashMap::new();

        for path in paths {
            match path.split_first() {
                None => {
                    self.tree.add_edge(parent, NIL);
                }
                Some((head, tail)) => {
                    let slot = *slots.entry(head).or_insert_with(|| {
                        groups.push((head, Vec::new()));
                        groups.len() - 1
                    });
                    groups[slot].1.push(tail);
                }
            }
        }

        trace!(
            "frame at {}: {} paths, {} children",
            parent,
            paths.len(),
            groups.len()
        );
        groups
    }

    fn attach(&mut self, parent: NodeId, element: &E) -> NodeId {
        let child = self.ids.allocate();
        self.tree.add_node(child, Source::Element(element.clone()));
        self.tree.add_edge(parent, child);
        child
    }

    fn run_iterative(&mut self, paths: Vec<&[E]>) {
        let mut stack = vec![(paths, ROOT)];
        while let Some((paths, parent)) = stack.pop() {
            for (element, tails) in self.expand(parent, &paths) {
                let child = self.attach(parent, element);
                stack.push((tails, child));
            }
        }
    }

    fn run_recursive(&mut self, paths: Vec<&[E]>) {
        let mut stack = vec![(ROOT, self.expand(ROOT, &paths).into_iter())];
        while let Some((parent, pending)) = stack.last_mut() {
            let parent = *parent;
            match pending.next() {
                Some((element, tails)) => {
                    let child = self.attach(parent, element);
                    let pending = self.expand(child, &tails).into_iter();
                    stack.push((child, pending));
                }
                None => {
                    stack.pop();
                }
            }
        }
    }
}

/// Builds a prefix tree from `paths` with the given numbering [`TrieStrategy`].
///
/// Accepts anything that yields sequences, e.g. `words.iter().map(|w| w.chars())`
/// or a `Vec<Vec<u32>>`. Never fails; an empty collection yields a tree with only
/// the root and nil node and no edges.
pub fn prefix_tree_with<I, P, E>(paths: I, strategy: TrieStrategy) -> PrefixTree<E>
where
    I: IntoIterator<Item = P>,
    P: IntoIterator<Item = E>,
    E: Eq + Hash + Clone,
{
    let _timer = ScopedTimer::new("prefix_tree");

    let owned: Vec<Vec<E>> = paths
        .into_iter()
        .map(|path| path.into_iter().collect())
        .collect();
    let slices: Vec<&[E]> = owned.iter().map(Vec::as_slice).collect();

    let mut build = TrieBuild::new();
    match strategy {
        TrieStrategy::Iterative => build.run_iterative(slices),
        TrieStrategy::Recursive => build.run_recursive(slices),
    }

    debug!(
        "{:?} prefix tree from {} paths: {} nodes, {} edges",
        strategy,
        owned.len(),
        build.tree.num_nodes(),
        build.tree.num_edges()
    );
    build.tree
}

/// Builds a prefix tree, numbering all children of a node before descending.
///
/// ```
/// use treegen::graph::TreeGraph;
/// use treegen::trie::{prefix_tree, NIL};
///
/// let tree = prefix_tree(["ab", "abs", "ad"].iter().map(|s| s.chars()));
/// let edges: Vec<_> = tree.edges().collect();
/// assert_eq!(edges, vec![(0, 1), (1, 2), (1, 3), (2, -1), (2, 4), (3, -1), (4, -1)]);
/// assert_eq!(tree.in_neigh(NIL).collect::<Vec<_>>(), vec![2, 3, 4]);
/// ```
pub fn prefix_tree<I, P, E>(paths: I) -> PrefixTree<E>
where
    I: IntoIterator<Item = P>,
    P: IntoIterator<Item = E>,
    E: Eq + Hash + Clone,
{
    prefix_tree_with(paths, TrieStrategy::Iterative)
}

/// Builds a prefix tree, numbering nodes in depth-first order.
///
/// ```
/// use treegen::graph::TreeGraph;
/// use treegen::trie::prefix_tree_recursive;
///
/// let tree = prefix_tree_recursive(["ab", "abs", "ad"].iter().map(|s| s.chars()));
/// let edges: Vec<_> = tree.edges().collect();
/// assert_eq!(edges, vec![(0, 1), (1, 2), (1, 4), (2, -1), (2, 3), (3, -1), (4, -1)]);
/// ```
pub fn prefix_tree_recursive<I, P, E>(paths: I) -> PrefixTree<E>
where
    I: IntoIterator<Item = P>,
    P: IntoIterator<Item = E>,
    E: Eq + Hash + Clone,
{
    prefix_tree_with(paths, TrieStrategy::Recursive)
}

/// Reads the distinct input sequences back out of a prefix tree, one per
/// predecessor of [`NIL`], in ascending order of that predecessor's id.
pub fn recover_paths<E: Clone>(tree: &PrefixTree<E>) -> Vec<Vec<E>> {
    if !tree.contains_node(NIL) {
        return Vec::new();
    }

    tree.in_neigh(NIL)
        .map(|leaf| {
            let mut path = Vec::new();
            let mut v = leaf;
            while v != ROOT {
                if let Some(e) = tree.node_attr(v).and_then(Source::element) {
                    path.push(e.clone());
                }
                match tree.in_neigh(v).next() {
                    Some(parent) => v = parent,
                    None => break,
                }
            }
            path.reverse();
            path
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use proptest::prelude::*;
    use std::collections::HashSet;

    const WIKI: [&str; 8] = ["a", "to", "tea", "ted", "ten", "i", "in", "inn"];

    /// Structure of a subtree with node ids erased.
    #[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
    struct Shape<E>(Source<E>, Vec<Shape<E>>);

    fn shape<E: Ord + Clone>(tree: &PrefixTree<E>, v: NodeId) -> Shape<E> {
        let source = tree.node_attr(v).cloned().unwrap();
        let children = tree.out_neigh(v).map(|c| shape(tree, c)).sorted().collect();
        Shape(source, children)
    }

    fn source(tree: &PrefixTree<char>, v: NodeId) -> Source<char> {
        tree.node_attr(v).cloned().unwrap()
    }

    /// Children of `v` ordered by their source attribute (`Nil` sorts last).
    fn children(tree: &PrefixTree<char>, v: NodeId) -> Vec<NodeId> {
        tree.out_neigh(v)
            .sorted_by(|a, b| source(tree, *a).cmp(&source(tree, *b)))
            .collect()
    }

    fn wiki_tree(strategy: TrieStrategy) -> PrefixTree<char> {
        prefix_tree_with(WIKI.iter().map(|s| s.chars()), strategy)
    }

    fn check_wiki(tree: &PrefixTree<char>) {
        let el = Source::Element;

        let level1 = children(tree, ROOT);
        assert_eq!(level1.len(), 3);
        let (a, i, t) = (level1[0], level1[1], level1[2]);
        assert_eq!(source(tree, a), el('a'));
        assert_eq!(source(tree, i), el('i'));
        assert_eq!(source(tree, t), el('t'));

        assert_eq!(children(tree, a), vec![NIL]);

        let i_children = children(tree, i);
        assert_eq!(i_children.len(), 2);
        let in_ = i_children[0];
        assert_eq!(source(tree, in_), el('n'));
        assert_eq!(i_children[1], NIL);
        let in_children = children(tree, in_);
        assert_eq!(in_children.len(), 2);
        let inn = in_children[0];
        assert_eq!(source(tree, inn), el('n'));
        assert_eq!(children(tree, inn), vec![NIL]);

        let t_children = children(tree, t);
        assert_eq!(t_children.len(), 2);
        let (te, to) = (t_children[0], t_children[1]);
        assert_eq!(source(tree, te), el('e'));
        assert_eq!(source(tree, to), el('o'));
        assert_eq!(children(tree, to), vec![NIL]);

        let te_children = children(tree, te);
        let sources: Vec<_> = te_children.iter().map(|c| source(tree, *c)).collect();
        assert_eq!(sources, vec![el('a'), el('d'), el('n')]);
        for leaf in te_children {
            assert_eq!(children(tree, leaf), vec![NIL]);
        }

        assert_eq!(source(tree, ROOT), Source::Root);
        assert_eq!(source(tree, NIL), Source::Nil);
        assert_eq!(tree.out_degree(NIL), 0);

        let recovered: HashSet<String> = recover_paths(tree)
            .into_iter()
            .map(|p| p.into_iter().collect())
            .collect();
        let expected: HashSet<String> = WIKI.iter().map(|s| s.to_string()).collect();
        assert_eq!(recovered, expected);
    }

    fn check_invariants<E>(tree: &PrefixTree<E>) {
        for v in tree.vertices() {
            match v {
                ROOT => assert_eq!(tree.in_degree(v), 0),
                NIL => assert_eq!(tree.out_degree(v), 0),
                _ => {
                    assert_eq!(tree.in_degree(v), 1, "node {} must have one parent", v);
                    assert!(tree.out_degree(v) > 0, "node {} must lead somewhere", v);
                }
            }
        }
    }

    #[test]
    fn wikipedia_trie_iterative() {
        check_wiki(&wiki_tree(TrieStrategy::Iterative));
    }

    #[test]
    fn wikipedia_trie_recursive() {
        check_wiki(&wiki_tree(TrieStrategy::Recursive));
    }

    #[test]
    fn strategies_number_nodes_differently() {
        let paths = ["ab", "abs", "ad"];
        let iterative = prefix_tree(paths.iter().map(|s| s.chars()));
        let recursive = prefix_tree_recursive(paths.iter().map(|s| s.chars()));

        assert_eq!(
            iterative.edges().collect::<Vec<_>>(),
            vec![(0, 1), (1, 2), (1, 3), (2, -1), (2, 4), (3, -1), (4, -1)]
        );
        assert_eq!(
            recursive.edges().collect::<Vec<_>>(),
            vec![(0, 1), (1, 2), (1, 4), (2, -1), (2, 3), (3, -1), (4, -1)]
        );
        assert_eq!(shape(&iterative, ROOT), shape(&recursive, ROOT));
        assert_eq!(iterative.node_attr(3), Some(&Source::Element('d')));
        assert_eq!(recursive.node_attr(3), Some(&Source::Element('s')));
    }

    #[test]
    fn recovers_paths_from_nil() {
        let tree = prefix_tree(["ab", "abs", "ad"].iter().map(|s| s.chars()));
        assert_eq!(tree.in_neigh(NIL).collect::<Vec<_>>(), vec![2, 3, 4]);
        let recovered: Vec<String> = recover_paths(&tree)
            .into_iter()
            .map(|p| p.into_iter().collect())
            .sorted()
            .collect();
        assert_eq!(recovered, vec!["ab", "abs", "ad"]);
    }

    #[test]
    fn empty_input_has_no_edges() {
        let tree = prefix_tree(Vec::<Vec<u8>>::new());
        assert_eq!(tree.num_nodes(), 2);
        assert_eq!(tree.num_edges(), 0);
        assert!(recover_paths(&tree).is_empty());
    }

    #[test]
    fn empty_sequences_share_one_nil_edge() {
        let tree = prefix_tree_recursive(vec![Vec::<u8>::new(), Vec::new()]);
        assert_eq!(tree.edges().collect::<Vec<_>>(), vec![(ROOT, NIL)]);
        assert_eq!(recover_paths(&tree), vec![Vec::<u8>::new()]);
    }

    #[test]
    fn duplicates_collapse() {
        let tree = prefix_tree(vec![vec![1, 2, 3], vec![1, 2, 3], vec![1, 2]]);
        assert_eq!(tree.num_nodes(), 5);
        assert_eq!(tree.in_degree(NIL), 2);
        check_invariants(&tree);
    }

    #[test]
    fn deep_sequence_does_not_recurse() {
        let long: Vec<u32> = (0..100_000).collect();
        let tree = prefix_tree_recursive(vec![long.clone(), long]);
        assert_eq!(tree.num_nodes(), 100_002);
        assert_eq!(tree.in_neigh(NIL).collect::<Vec<_>>(), vec![100_000]);
    }

    proptest! {
        #[test]
        fn strategies_agree(paths in prop::collection::vec(
            prop::collection::vec(0u8..4, 0..6), 1..12
        )) {
            let iterative = prefix_tree(paths.clone());
            let recursive = prefix_tree_recursive(paths.clone());

            check_invariants(&iterative);
            check_invariants(&recursive);
            prop_assert_eq!(iterative.num_nodes(), recursive.num_nodes());
            prop_assert_eq!(iterative.num_edges(), recursive.num_edges());
            prop_assert_eq!(shape(&iterative, ROOT), shape(&recursive, ROOT));

            let expected: HashSet<Vec<u8>> = paths.into_iter().collect();
            for tree in &[iterative, recursive] {
                let recovered = recover_paths(tree);
                prop_assert_eq!(recovered.len(), expected.len());
                prop_assert_eq!(recovered.into_iter().collect::<HashSet<_>>(), expected.clone());
            }
        }
    }
}
