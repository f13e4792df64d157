//! Dense vertex-colored graph automorphism search.
//!
//! Re-entrant by construction: all state lives on the stack of a single call
//! and discovered automorphisms are handed to a caller-supplied closure, so
//! concurrent invocations cannot interfere.
use crate::perm::FBuildHasher;
use bitvec::prelude::*;
use itertools::Itertools;
use std::hash::{BuildHasher, Hash, Hasher};

/// Adjacency bit-matrix of a (possibly directed) graph on `n` vertices.
#[derive(Clone, Debug)]
pub struct DenseGraph {
    n: usize,
    directed: bool,
    adj: BitVec,
}

impl DenseGraph {
    pub fn new(n: usize, directed: bool) -> Self {
        Self { n, directed, adj: bitvec![0; n * n] }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn directed(&self) -> bool {
        self.directed
    }

    /// Adds the arc (from, to); both arcs when the graph is undirected.
    pub fn add_edge(&mut self, from: usize, to: usize) {
        self.adj.set(from * self.n + to, true);
        if !self.directed {
            self.adj.set(to * self.n + from, true);
        }
    }

    #[inline]
    pub fn adjacent(&self, from: usize, to: usize) -> bool {
        self.adj[from * self.n + to]
    }
}

/// Invokes `emit` once per non-identity automorphism of the graph that
/// preserves the vertex coloring, passing the 0-based image array.
///
/// Vertices are first refined by iterated neighborhood hashing (the
/// color-refinement pruning step), then assigned by backtracking over
/// color-preserving, adjacency-consistent images. Exhaustive: the emitted set
/// is the full automorphism group minus the identity, which in particular is
/// a generating set.
pub fn automorphisms(graph: &DenseGraph, colors: &[usize], mut emit: impl FnMut(&[usize])) {
    let n = graph.len();
    assert_eq!(colors.len(), n);
    if n == 0 {
        return;
    }

    let refined = refine(graph, colors);
    let mut mapping: Vec<Option<usize>> = vec![None; n];
    let mut used = vec![false; n];
    assign(graph, &refined, &mut mapping, &mut used, 0, &mut emit);
}

fn assign(
    graph: &DenseGraph,
    colors: &[usize],
    mapping: &mut Vec<Option<usize>>,
    used: &mut Vec<bool>,
    vertex: usize,
    emit: &mut impl FnMut(&[usize]),
) {
    let n = graph.len();
    if vertex == n {
        let image = mapping.iter().map(|w| w.expect("complete assignment")).collect_vec();
        if image.iter().enumerate().any(|(v, &w)| v != w) {
            emit(&image);
        }
        return;
    }

    for candidate in 0..n {
        if used[candidate] || colors[candidate] != colors[vertex] {
            continue;
        }
        if !consistent(graph, mapping, vertex, candidate) {
            continue;
        }
        mapping[vertex] = Some(candidate);
        used[candidate] = true;
        assign(graph, colors, mapping, used, vertex + 1, emit);
        mapping[vertex] = None;
        used[candidate] = false;
    }
}

/// A candidate image is consistent iff it reproduces the adjacency of
/// `vertex` with every already-assigned vertex, in both directions.
fn consistent(graph: &DenseGraph, mapping: &[Option<usize>], vertex: usize, candidate: usize) -> bool {
    for (other, &image) in mapping.iter().enumerate().take(vertex) {
        let image = image.expect("prefix is assigned");
        if graph.adjacent(vertex, other) != graph.adjacent(candidate, image)
            || graph.adjacent(other, vertex) != graph.adjacent(image, candidate)
        {
            return false;
        }
    }
    true
}

/// Iterated neighborhood hashing seeded by the input coloring. Hash
/// collisions can only merge color classes, which weakens pruning but never
/// soundness; the full adjacency check happens during assignment.
fn refine(graph: &DenseGraph, colors: &[usize]) -> Vec<usize> {
    let n = graph.len();
    let mut hashes: Vec<usize> = colors.iter().map(|&c| get_hash(c)).collect();
    let mut classes = distinct_count(&hashes);

    for _ in 0..n {
        let next: Vec<usize> = (0..n)
            .map(|v| {
                let neighborhood = (0..n)
                    .filter(|&u| graph.adjacent(v, u) || graph.adjacent(u, v))
                    .map(|u| (graph.adjacent(v, u), graph.adjacent(u, v), hashes[u]))
                    .sorted_unstable()
                    .collect_vec();
                get_hash((hashes[v], neighborhood))
            })
            .collect();
        let next_classes = distinct_count(&next);
        if next_classes == classes {
            break;
        }
        hashes = next;
        classes = next_classes;
    }
    hashes
}

fn distinct_count(hashes: &[usize]) -> usize {
    hashes.iter().unique().count()
}

fn get_hash(value: impl Hash) -> usize {
    let mut hasher = FBuildHasher::default().build_hasher();
    value.hash(&mut hasher);
    hasher.finish() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_automorphisms(graph: &DenseGraph, colors: &[usize]) -> Vec<Vec<usize>> {
        let mut found = vec![];
        automorphisms(graph, colors, |image| found.push(image.to_vec()));
        found
    }

    fn square(directed: bool) -> DenseGraph {
        let mut graph = DenseGraph::new(4, directed);
        for (u, v) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            graph.add_edge(u, v);
        }
        graph
    }

    #[test]
    fn undirected_square_has_seven_nontrivial_automorphisms() {
        let found = collect_automorphisms(&square(false), &[0; 4]);
        assert_eq!(found.len(), 7);
        assert!(found.contains(&vec![1, 2, 3, 0]));
        assert!(found.contains(&vec![3, 2, 1, 0]));
        assert!(!found.contains(&vec![0, 1, 2, 3]));
    }

    #[test]
    fn directed_square_keeps_rotations_only() {
        let found = collect_automorphisms(&square(true), &[0; 4]);
        assert_eq!(found.len(), 3);
        assert!(found.contains(&vec![1, 2, 3, 0]));
        assert!(!found.contains(&vec![3, 2, 1, 0]));
    }

    #[test]
    fn coloring_restricts_automorphisms() {
        // Distinguishing one vertex of the square leaves a single reflection.
        let found = collect_automorphisms(&square(false), &[1, 0, 0, 0]);
        assert_eq!(found, vec![vec![0, 3, 2, 1]]);
    }

    #[test]
    fn path_endpoints_swap() {
        let mut graph = DenseGraph::new(3, false);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        let found = collect_automorphisms(&graph, &[0; 3]);
        assert_eq!(found, vec![vec![2, 1, 0]]);
    }

    #[test]
    fn directed_path_is_rigid() {
        // In 0 -> 1 -> 2 every vertex has a distinct in/out degree profile.
        let mut graph = DenseGraph::new(3, true);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        assert!(collect_automorphisms(&graph, &[0; 3]).is_empty());
    }

    #[test]
    fn empty_graph() {
        let graph = DenseGraph::new(0, false);
        assert!(collect_automorphisms(&graph, &[]).is_empty());
    }
}
