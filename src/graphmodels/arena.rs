use crate::error::{Result, TreeError};
use crate::graph::{Directed, EdgeType, Range, TreeGraph, Undirected};
use crate::types::*;
use bit_vec::BitVec;
use generational_arena::{Arena, Index};
use std::collections::{HashMap, HashSet, VecDeque};
use std::marker::PhantomData;

#[derive(Clone, Debug)]
pub struct ArenaNode<T> {
    node_id: NodeId,
    value: T,
    in_edges: HashSet<NodeId>,
    out_edges: HashSet<NodeId>,
}

impl<T> ArenaNode<T> {
    fn new(node_id: NodeId, value: T) -> Self {
        Self {
            node_id,
            value,
            in_edges: HashSet::new(),
            out_edges: HashSet::new(),
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

/// A graph whose nodes live in a generational arena and are addressed by
/// caller-chosen [`NodeId`]s.
///
/// Undirected graphs keep every neighbor in `out_edges` on both endpoints,
/// and `in_edges` stays empty.
#[derive(Clone, Debug)]
pub struct ArenaGraph<T, D: EdgeType> {
    vertices: Arena<ArenaNode<T>>,
    lookup: HashMap<NodeId, Index>,
    n_edges: usize,
    direction: PhantomData<D>,
}

pub type DiGraph<T> = ArenaGraph<T, Directed>;
pub type UnGraph<T> = ArenaGraph<T, Undirected>;

impl<T, D: EdgeType> Default for ArenaGraph<T, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, D: EdgeType> ArenaGraph<T, D> {
    pub fn new() -> Self {
        Self {
            vertices: Arena::new(),
            lookup: HashMap::new(),
            n_edges: 0,
            direction: PhantomData,
        }
    }

    pub fn with_capacity(num_nodes: usize) -> Self {
        Self {
            vertices: Arena::with_capacity(num_nodes),
            lookup: HashMap::with_capacity(num_nodes),
            n_edges: 0,
            direction: PhantomData,
        }
    }

    fn get_vertex(&self, node_id: NodeId) -> Option<&ArenaNode<T>> {
        self.lookup
            .get(&node_id)
            .and_then(|idx| self.vertices.get(*idx))
    }

    fn vertex(&self, node_id: NodeId) -> &ArenaNode<T> {
        match self.get_vertex(node_id) {
            Some(node) => node,
            None => panic!("Vertex {} not found", node_id),
        }
    }

    fn sorted(ids: &HashSet<NodeId>) -> Vec<NodeId> {
        let mut ids: Vec<_> = ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Dense slot of a node inside the arena, usable as a bitmap index.
    fn slot(&self, node_id: NodeId) -> usize {
        self.lookup[&node_id].into_raw_parts().0
    }

    /// Every neighbor of `v` regardless of edge direction.
    fn all_neigh(&self, v: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let node = self.vertex(v);
        node.out_edges.iter().chain(node.in_edges.iter()).copied()
    }
}

impl<T: Default, D: EdgeType> ArenaGraph<T, D> {
    /// Builds a graph on nodes `0..num_nodes` (default attributes) holding `edge_list`.
    pub fn from_edge_list(num_nodes: usize, edge_list: &[Edge]) -> Self {
        let mut graph = Self::with_capacity(num_nodes);
        for v in 0..num_nodes {
            graph.add_node(v as NodeId, T::default());
        }
        for &(u, v) in edge_list {
            graph.add_edge(u, v);
        }
        graph
    }
}

impl<T: Clone> DiGraph<T> {
    /// Forgets edge directions, keeping node ids and attributes.
    pub fn to_undirected(&self) -> UnGraph<T> {
        let mut graph = UnGraph::with_capacity(self.num_nodes());
        for (_, node) in self.vertices.iter() {
            graph.add_node(node.node_id, node.value.clone());
        }
        for (u, v) in self.edges() {
            graph.add_edge(u, v);
        }
        graph
    }
}

impl<T, D: EdgeType> TreeGraph for ArenaGraph<T, D> {
    type Attr = T;

    fn directed(&self) -> bool {
        D::is_directed()
    }

    fn num_nodes(&self) -> usize {
        self.vertices.len()
    }

    fn num_edges(&self) -> usize {
        self.n_edges
    }

    fn add_node(&mut self, v: NodeId, attr: T) -> bool {
        if let Some(idx) = self.lookup.get(&v) {
            if let Some(node) = self.vertices.get_mut(*idx) {
                node.value = attr;
            }
            return false;
        }
        let idx = self.vertices.insert(ArenaNode::new(v, attr));
        self.lookup.insert(v, idx);
        true
    }

    fn contains_node(&self, v: NodeId) -> bool {
        self.lookup.contains_key(&v)
    }

    fn node_attr(&self, v: NodeId) -> Option<&T> {
        self.get_vertex(v).map(|node| &node.value)
    }

    fn add_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        let (src, dst) = match (self.lookup.get(&u), self.lookup.get(&v)) {
            (Some(src), Some(dst)) => (*src, *dst),
            _ => panic!(
                "Could not add edge ({}, {}), one or both of the nodes does not exist",
                u, v
            ),
        };

        let inserted = self.vertices[src].out_edges.insert(v);
        if D::is_directed() {
            self.vertices[dst].in_edges.insert(u);
        } else {
            self.vertices[dst].out_edges.insert(u);
        }

        if inserted {
            self.n_edges += 1;
        }
        inserted
    }

    fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.get_vertex(u)
            .map_or(false, |node| node.out_edges.contains(&v))
    }

    fn out_degree(&self, v: NodeId) -> usize {
        self.vertex(v).out_edges.len()
    }

    fn in_degree(&self, v: NodeId) -> usize {
        let node = self.vertex(v);
        if D::is_directed() {
            node.in_edges.len()
        } else {
            node.out_edges.len()
        }
    }

    fn out_neigh(&self, v: NodeId) -> Range<NodeId> {
        Box::new(Self::sorted(&self.vertex(v).out_edges).into_iter())
    }

    fn in_neigh(&self, v: NodeId) -> Range<NodeId> {
        let node = self.vertex(v);
        let edges = if D::is_directed() {
            &node.in_edges
        } else {
            &node.out_edges
        };
        Box::new(Self::sorted(edges).into_iter())
    }

    fn vertices(&self) -> Range<NodeId> {
        let mut ids: Vec<_> = self.lookup.keys().copied().collect();
        ids.sort_unstable();
        Box::new(ids.into_iter())
    }

    fn edges(&self) -> Range<Edge> {
        let mut edges = Vec::with_capacity(self.n_edges);
        for (_, node) in self.vertices.iter() {
            let u = node.node_id;
            for &v in &node.out_edges {
                if D::is_directed() || u <= v {
                    edges.push((u, v));
                }
            }
        }
        edges.sort_unstable();
        Box::new(edges.into_iter())
    }

    fn dfs_edges(&self, source: NodeId) -> Result<EdgeList> {
        if !self.contains_node(source) {
            return Err(TreeError::NodeNotFound(source));
        }

        let mut visited = BitVec::from_elem(self.vertices.capacity(), false);
        let mut edges = Vec::with_capacity(self.num_nodes().saturating_sub(1));

        visited.set(self.slot(source), true);
        let mut stack = vec![(source, self.out_neigh(source))];

        while let Some((parent, children)) = stack.last_mut() {
            let parent = *parent;
            match children.next() {
                Some(child) => {
                    let slot = self.slot(child);
                    if !visited[slot] {
                        visited.set(slot, true);
                        edges.push((parent, child));
                        stack.push((child, self.out_neigh(child)));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }

        Ok(edges)
    }

    fn is_connected(&self) -> bool {
        let start = match self.vertices.iter().next() {
            Some((_, node)) => node.node_id,
            None => return false,
        };

        let mut visited = BitVec::from_elem(self.vertices.capacity(), false);
        let mut queue = VecDeque::new();
        let mut seen = 1;

        visited.set(self.slot(start), true);
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            for v in self.all_neigh(u) {
                let slot = self.slot(v);
                if !visited[slot] {
                    visited.set(slot, true);
                    seen += 1;
                    queue.push_back(v);
                }
            }
        }

        seen == self.num_nodes()
    }
}
