//! Tree decomposition.
//!
//! `check_tree_decomposition.rs` represents its clique-graph spanning
//! tree as `petgraph::Graph<HashSet<NodeIndex>, i32, Undirected>` and
//! validates it with `petgraph::algo::simple_paths::all_simple_paths`
//! plus `itertools::Itertools::combinations`. We generalize that
//! representation directly: bags never need to be removed once a
//! decomposition is being built, so petgraph's swap-on-remove
//! `NodeIndex` instability never bites, and we get `petgraph::algo`'s
//! connectivity helpers for free.

use crate::graph::Graph as WorkingGraph;
use crate::vertex::VertexId;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::{Bfs, IntoNodeIdentifiers};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

pub type BagId = NodeIndex;

/// A node of a tree decomposition: owns a set of graph vertices. Bag
/// identity (its `BagId`) is stable for the decomposition's lifetime
/// since decompositions never remove bags once built.
#[derive(Debug, Clone, Default)]
pub struct Bag {
    pub vertices: FxHashSet<VertexId>,
}

impl Bag {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompositionQuality {
    Exact,
    Heuristic,
}

#[derive(Debug, Clone)]
pub struct TreeDecomposition {
    tree: UnGraph<Bag, ()>,
    underlying_graph: WorkingGraph,
    from_permutation: bool,
    n: usize,
    quality: DecompositionQuality,
}

impl TreeDecomposition {
    pub fn new(underlying_graph: WorkingGraph, quality: DecompositionQuality) -> Self {
        let n = underlying_graph.vertex_count();
        TreeDecomposition {
            tree: UnGraph::default(),
            underlying_graph,
            from_permutation: false,
            n,
            quality,
        }
    }

    /// The trivial one-bag decomposition containing all vertices - the
    /// fallback for solver failure or cancellation with nothing ready
    /// yet, and for a failed permutation extraction.
    pub fn trivial(underlying_graph: WorkingGraph, quality: DecompositionQuality) -> Self {
        let mut decomposition = TreeDecomposition::new(underlying_graph.clone(), quality);
        let all_vertices: FxHashSet<VertexId> = underlying_graph.vertices().into_iter().collect();
        decomposition.create_bag(all_vertices);
        decomposition
    }

    pub fn mark_from_permutation(&mut self, value: bool) {
        self.from_permutation = value;
    }

    pub fn is_from_permutation(&self) -> bool {
        self.from_permutation
    }

    pub fn quality(&self) -> DecompositionQuality {
        self.quality
    }

    pub fn underlying_graph(&self) -> &WorkingGraph {
        &self.underlying_graph
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn create_bag(&mut self, vertices: FxHashSet<VertexId>) -> BagId {
        self.tree.add_node(Bag { vertices })
    }

    pub fn add_tree_edge(&mut self, a: BagId, b: BagId) {
        self.tree.update_edge(a, b, ());
    }

    pub fn bag(&self, id: BagId) -> &Bag {
        &self.tree[id]
    }

    pub fn bags(&self) -> impl Iterator<Item = (BagId, &Bag)> {
        self.tree.node_identifiers().map(|id| (id, &self.tree[id]))
    }

    pub fn bag_count(&self) -> usize {
        self.tree.node_count()
    }

    /// Tree-neighbors of `id` - used by H's tabu search to find a bag's
    /// `minSucc`/`maxPred` candidate attach points.
    pub fn bag_neighbors(&self, id: BagId) -> Vec<BagId> {
        self.tree.neighbors(id).collect()
    }

    pub fn tree_edges(&self) -> Vec<(BagId, BagId)> {
        self.tree
            .edge_indices()
            .map(|e| self.tree.edge_endpoints(e).unwrap())
            .collect()
    }

    /// `width`: `max |bag| - 1`. Zero for an empty decomposition.
    pub fn width(&self) -> usize {
        self.tree
            .node_weights()
            .map(|b| b.len())
            .max()
            .map(|m| m.saturating_sub(1))
            .unwrap_or(0)
    }

    /// Stitches together a bag forest into one tree: the elimination
    /// decomposer's bag-edge step may leave a forest when the
    /// permutation visits multiple connected components. Tie-break:
    /// attach the smallest-id root of each extra component to the first
    /// bag of the main component (`BagId` 0).
    pub fn connect_components(&mut self) {
        if self.tree.node_count() <= 1 {
            return;
        }
        let main_root = NodeIndex::new(0);
        let mut visited: FxHashSet<NodeIndex> = FxHashSet::default();
        let mut bfs = Bfs::new(&self.tree, main_root);
        while let Some(node) = bfs.next(&self.tree) {
            visited.insert(node);
        }

        for node in self.tree.node_identifiers() {
            if visited.contains(&node) {
                continue;
            }
            // `node` is the smallest-id vertex of a not-yet-visited
            // component, since `node_identifiers()` enumerates in index
            // order and every smaller unvisited index would already have
            // been picked up by an earlier iteration of this loop.
            self.add_tree_edge(main_root, node);
            let mut bfs = Bfs::new(&self.tree, node);
            while let Some(reached) = bfs.next(&self.tree) {
                visited.insert(reached);
            }
        }
    }

    /// Vertex cover: every vertex of the underlying graph lies in some bag.
    pub fn covers_all_vertices(&self) -> bool {
        let mut covered: FxHashSet<VertexId> = FxHashSet::default();
        for bag in self.tree.node_weights() {
            covered.extend(bag.vertices.iter().copied());
        }
        self.underlying_graph
            .vertices()
            .into_iter()
            .all(|v| covered.contains(&v))
    }

    /// Edge cover: for every graph edge, some bag contains both endpoints.
    pub fn covers_all_edges(&self) -> bool {
        self.underlying_graph.edges().into_iter().all(|(u, v)| {
            self.tree
                .node_weights()
                .any(|bag| bag.vertices.contains(&u) && bag.vertices.contains(&v))
        })
    }

    /// Connectedness: for every vertex, the bags containing it induce a
    /// connected subtree.
    pub fn is_connected_for_every_vertex(&self) -> bool {
        for v in self.underlying_graph.vertices() {
            let containing: Vec<NodeIndex> = self
                .tree
                .node_identifiers()
                .filter(|&id| self.tree[id].vertices.contains(&v))
                .collect();
            if containing.is_empty() {
                continue;
            }
            let mut seen: FxHashSet<NodeIndex> = FxHashSet::default();
            let mut queue = VecDeque::new();
            queue.push_back(containing[0]);
            seen.insert(containing[0]);
            while let Some(node) = queue.pop_front() {
                for neighbor in self.tree.neighbors(node) {
                    if self.tree[neighbor].vertices.contains(&v) && seen.insert(neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }
            if seen.len() != containing.len() {
                return false;
            }
        }
        true
    }

    /// Tree-ness: the bag graph is acyclic and connected.
    pub fn is_tree(&self) -> bool {
        if self.tree.node_count() == 0 {
            return true;
        }
        let edge_count = self.tree.edge_count();
        if edge_count != self.tree.node_count() - 1 {
            return false;
        }
        let mut bfs = Bfs::new(&self.tree, NodeIndex::new(0));
        let mut reached = 0;
        while bfs.next(&self.tree).is_some() {
            reached += 1;
        }
        reached == self.tree.node_count()
    }

    pub fn is_valid(&self) -> bool {
        self.covers_all_vertices()
            && self.covers_all_edges()
            && self.is_connected_for_every_vertex()
            && self.is_tree()
    }

    /// PACE output format:
    /// `s td <numBags> <maxBagSize> <n>`, then `b i v1 v2 ...` per bag
    /// (1-indexed bag ids), then one `i j` line per tree edge.
    pub fn to_pace_string(&self) -> String {
        let max_bag_size = self
            .tree
            .node_weights()
            .map(|b| b.len())
            .max()
            .unwrap_or(0);
        let mut out = String::new();
        out.push_str(&format!(
            "s td {} {} {}\n",
            self.bag_count(),
            max_bag_size,
            self.n
        ));

        let index_of: std::collections::HashMap<NodeIndex, usize> = self
            .tree
            .node_identifiers()
            .enumerate()
            .map(|(i, id)| (id, i + 1))
            .collect();

        for id in self.tree.node_identifiers() {
            let mut vertices: Vec<_> = self.tree[id].vertices.iter().map(|v| v.0).collect();
            vertices.sort_unstable();
            out.push_str(&format!("b {}", index_of[&id]));
            for v in vertices {
                out.push_str(&format!(" {}", v));
            }
            out.push('\n');
        }

        for (a, b) in self.tree_edges() {
            out.push_str(&format!("{} {}\n", index_of[&a], index_of[&b]));
        }

        out
    }

    /// Alternative TikZ rendering, selected by the CLI's `-tikz` flag.
    pub fn to_tikz_string(&self) -> String {
        let index_of: std::collections::HashMap<NodeIndex, usize> = self
            .tree
            .node_identifiers()
            .enumerate()
            .map(|(i, id)| (id, i + 1))
            .collect();

        let mut out = String::new();
        out.push_str("\\begin{tikzpicture}\n");
        for id in self.tree.node_identifiers() {
            let mut vertices: Vec<_> = self.tree[id].vertices.iter().map(|v| v.0).collect();
            vertices.sort_unstable();
            let label = vertices
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",");
            out.push_str(&format!(
                "  \\node (b{}) {{$\\{{{}\\}}$}};\n",
                index_of[&id], label
            ));
        }
        for (a, b) in self.tree_edges() {
            out.push_str(&format!(
                "  \\draw (b{}) -- (b{});\n",
                index_of[&a], index_of[&b]
            ));
        }
        out.push_str("\\end{tikzpicture}\n");
        out
    }
}
