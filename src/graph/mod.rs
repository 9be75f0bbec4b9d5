//! Graph primitives.
//!
//! Building everything on top of `petgraph::Graph` directly would reuse
//! (swap-removed) `NodeIndex`es once a node is deleted, which would
//! break vertex identity: vertices carry an externally provided
//! comparable identity that must keep meaning vertex-by-vertex across
//! `eliminate_vertex`/`contract` calls. We therefore keep the *bag
//! tree* on `petgraph::Graph` (see `crate::decomposition`, grounded
//! directly on `compute_treewidth_upper_bound.rs`'s use of
//! `petgraph::algo::min_spanning_tree`), but give the mutable working
//! graph its own adjacency-map representation so that eliminating or
//! contracting vertices never perturbs the identity of the vertices that
//! remain - an `FxHashMap`/`FxHashSet` pairing, the same hasher reached
//! for via the `hashset!` macro and the `rustc-hash` dependency
//! elsewhere in this codebase, tuned for graphs in the
//! tens-of-thousands-of-edges range.

pub mod clique;
pub mod twins;

use crate::vertex::VertexId;
use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// A mutable, simple, undirected graph over externally identified vertices.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: FxHashMap<VertexId, FxHashSet<VertexId>>,
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            adjacency: FxHashMap::default(),
        }
    }

    pub fn with_vertices(n: usize) -> Self {
        let mut graph = Graph::new();
        for i in 0..n {
            graph.add_vertex(VertexId::from(i + 1));
        }
        graph
    }

    /// Deterministic, sorted vertex listing (data model: "deterministic
    /// iteration order seeded by a single source of randomness" - the
    /// sort itself is the deterministic half; randomness only enters via
    /// explicit tie-breaking RNG draws in the heuristics).
    pub fn vertices(&self) -> Vec<VertexId> {
        let mut vs: Vec<VertexId> = self.adjacency.keys().copied().collect();
        vs.sort_unstable();
        vs
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|n| n.len()).sum::<usize>() / 2
    }

    /// All edges as `(u, v)` with `u < v`, sorted.
    pub fn edges(&self) -> Vec<(VertexId, VertexId)> {
        let mut es = Vec::with_capacity(self.edge_count());
        for (u, neighbors) in self.adjacency.iter() {
            for &v in neighbors.iter() {
                if *u < v {
                    es.push((*u, v));
                }
            }
        }
        es.sort_unstable();
        es
    }

    /// Sorted neighbor listing. O(deg log deg).
    pub fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        let mut ns: Vec<VertexId> = self
            .adjacency
            .get(&v)
            .unwrap_or_else(|| panic!("neighbors: vertex {:?} does not exist", v))
            .iter()
            .copied()
            .collect();
        ns.sort_unstable();
        ns
    }

    pub fn neighbor_set(&self, v: VertexId) -> &FxHashSet<VertexId> {
        self.adjacency
            .get(&v)
            .unwrap_or_else(|| panic!("neighbor_set: vertex {:?} does not exist", v))
    }

    pub fn degree(&self, v: VertexId) -> usize {
        self.neighbor_set(v).len()
    }

    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.adjacency.contains_key(&v)
    }

    pub fn is_adjacent(&self, u: VertexId, v: VertexId) -> bool {
        self.adjacency
            .get(&u)
            .map(|n| n.contains(&v))
            .unwrap_or(false)
    }

    pub fn add_vertex(&mut self, v: VertexId) {
        self.adjacency.entry(v).or_insert_with(FxHashSet::default);
    }

    /// Programmer error to delete a vertex that isn't there: structural
    /// mutation on a missing vertex is fatal, not recoverable.
    pub fn delete_vertex(&mut self, v: VertexId) {
        let neighbors = self
            .adjacency
            .remove(&v)
            .unwrap_or_else(|| panic!("delete_vertex: vertex {:?} does not exist", v));
        for n in neighbors {
            self.adjacency.get_mut(&n).map(|s| s.remove(&v));
        }
    }

    pub fn add_edge(&mut self, u: VertexId, v: VertexId) {
        assert_ne!(u, v, "add_edge: no self-loops");
        if !self.adjacency.contains_key(&u) {
            panic!("add_edge: vertex {:?} does not exist", u);
        }
        if !self.adjacency.contains_key(&v) {
            panic!("add_edge: vertex {:?} does not exist", v);
        }
        self.adjacency.get_mut(&u).unwrap().insert(v);
        self.adjacency.get_mut(&v).unwrap().insert(u);
    }

    pub fn delete_edge(&mut self, u: VertexId, v: VertexId) {
        self.adjacency
            .get_mut(&u)
            .unwrap_or_else(|| panic!("delete_edge: vertex {:?} does not exist", u))
            .remove(&v);
        self.adjacency
            .get_mut(&v)
            .unwrap_or_else(|| panic!("delete_edge: vertex {:?} does not exist", v))
            .remove(&u);
    }

    /// `eliminate_vertex(v)`: make `N(v)` a clique (recording fill edges),
    /// then delete `v`. Returns the fill edges added, since the set of
    /// fill edges across an elimination order is exactly the chordal
    /// completion of the graph.
    pub fn eliminate_vertex(&mut self, v: VertexId) -> Vec<(VertexId, VertexId)> {
        let neighbors = self.neighbors(v);
        let mut fill_edges = Vec::new();
        for pair in neighbors.iter().combinations(2) {
            let (&a, &b) = (pair[0], pair[1]);
            if !self.is_adjacent(a, b) {
                self.add_edge(a, b);
                fill_edges.push((a.min(b), a.max(b)));
            }
        }
        self.delete_vertex(v);
        fill_edges
    }

    /// `contract(u,v)`: `N(v) <- N(v) u N(u) \ {v}`, then delete `u`.
    pub fn contract(&mut self, u: VertexId, v: VertexId) {
        assert_ne!(u, v, "contract: cannot contract a vertex with itself");
        let u_neighbors = self.neighbors(u);
        for n in u_neighbors {
            if n != v && !self.is_adjacent(v, n) {
                self.add_edge(v, n);
            }
        }
        self.delete_vertex(u);
    }

    pub fn copy(&self) -> Graph {
        self.clone()
    }

    /// Induced subgraph on `vertices_subset`.
    pub fn subgraph(&self, vertices_subset: &FxHashSet<VertexId>) -> Graph {
        let mut result = Graph::new();
        for &v in vertices_subset {
            result.add_vertex(v);
        }
        for &v in vertices_subset {
            for &n in self.neighbor_set(v) {
                if vertices_subset.contains(&n) && v < n {
                    result.add_edge(v, n);
                }
            }
        }
        result
    }

    /// Connected components, each a sorted vertex vector, components
    /// themselves sorted by their smallest vertex - iterative BFS,
    /// adapted the way `find_connected_components.rs` adapts
    /// networkx's `connected_components` (iterative, not recursive, to
    /// avoid stack overflow on inputs with tens of thousands of
    /// vertices).
    pub fn connected_components(&self) -> Vec<Vec<VertexId>> {
        let mut seen: FxHashSet<VertexId> = FxHashSet::default();
        let mut components = Vec::new();

        for source in self.vertices() {
            if seen.contains(&source) {
                continue;
            }
            let mut component = Vec::new();
            let mut queue = VecDeque::new();
            queue.push_back(source);
            seen.insert(source);
            while let Some(v) = queue.pop_front() {
                component.push(v);
                for &n in self.neighbor_set(v) {
                    if seen.insert(n) {
                        queue.push_back(n);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }
        components.sort();
        components
    }

    pub fn get_maximum_clique(&self, limit: usize) -> Option<Vec<VertexId>> {
        clique::get_maximum_clique(self, limit)
    }

    pub fn twin_decomposition(&self) -> Vec<Vec<VertexId>> {
        twins::twin_decomposition(self)
    }
}
