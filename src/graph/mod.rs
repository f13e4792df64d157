//! Vertex-colored architecture graphs and automorphism extraction.
//!
//! The wrapper builds a dense (possibly directed) graph with an ordered edge
//! list and an ordered vertex partition, runs the automorphism engine, and
//! translates its 0-based generator callbacks into one-based permutations of
//! degree `n_reduced`. Vertices past `n_reduced` are auxiliary: they exist
//! only to encode colors or edge directions and must be fixed by every
//! automorphism. The engine is re-entrant with per-call state, so invocations
//! need no serialization and there is no prior state to clear.
use crate::error::{Error, Result};
use crate::perm::{Perm, PermSet};
use itertools::Itertools;
use std::collections::BTreeMap;

pub mod dense;

pub use dense::DenseGraph;

#[derive(Clone, Debug)]
pub struct ColoredGraph {
    n: usize,
    n_reduced: usize,
    directed: bool,
    dense: DenseGraph,
    edges: Vec<(usize, usize)>,
    partition: Vec<Vec<usize>>,
}

impl ColoredGraph {
    pub fn new(n: usize, directed: bool) -> Self {
        Self::with_reduced(n, n, directed)
    }

    /// Graph whose automorphisms are reported on the vertex prefix
    /// `[0, n_reduced)` only.
    pub fn with_reduced(n: usize, n_reduced: usize, directed: bool) -> Self {
        assert!(n_reduced <= n);
        Self {
            n,
            n_reduced,
            directed,
            dense: DenseGraph::new(n, directed),
            edges: vec![],
            partition: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Number of non-auxiliary vertices, the degree of reported generators.
    pub fn reduced_len(&self) -> usize {
        self.n_reduced
    }

    /// Adds the arc (from, to) when directed, the edge {from, to} otherwise.
    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<()> {
        for v in [from, to] {
            if v >= self.n {
                return Err(Error::Domain { point: v, degree: self.n });
            }
        }
        self.dense.add_edge(from, to);
        self.edges.push((from, to));
        Ok(())
    }

    /// Bulk insertion from an ordered adjacency mapping.
    pub fn add_edges(&mut self, adjacency: &BTreeMap<usize, Vec<usize>>) -> Result<()> {
        for (&from, neighbors) in adjacency {
            for &to in neighbors {
                self.add_edge(from, to)?;
            }
        }
        Ok(())
    }

    /// Color refinement: `cells` partitions the vertex set, one color per cell.
    pub fn set_partition(&mut self, cells: Vec<Vec<usize>>) -> Result<()> {
        for &v in cells.iter().flatten() {
            if v >= self.n {
                return Err(Error::Domain { point: v, degree: self.n });
            }
        }
        self.partition = cells;
        Ok(())
    }

    /// Generators of the graph's automorphism group as one-based permutations
    /// of degree `n_reduced`. Empty for an edgeless graph.
    pub fn automorphism_generators(&self) -> Result<PermSet> {
        if self.edges.is_empty() {
            return Ok(PermSet::new());
        }

        let colors = self.vertex_colors();
        let mut generators = PermSet::new();
        let mut failure = None;
        dense::automorphisms(&self.dense, &colors, |image| {
            if failure.is_some() {
                return;
            }
            match self.reduce_image(image) {
                Ok(perm) => {
                    generators.insert(perm);
                }
                Err(error) => failure = Some(error),
            }
        });

        match failure {
            Some(error) => Err(error),
            None => Ok(generators)
        }
    }

    /// GAP expression computing the same reduced automorphism group.
    pub fn to_gap(&self) -> String {
        let edges = self
            .edges
            .iter()
            .filter(|(s, t)| s != t)
            .flat_map(|&(s, t)| {
                let mut pairs = vec![format!("[{},{}]", s + 1, t + 1)];
                if !self.directed {
                    pairs.push(format!("[{},{}]", t + 1, s + 1));
                }
                pairs
            })
            .join(",");

        let partition = self
            .partition
            .iter()
            .map(|cell| format!("[{}]", cell.iter().map(|v| v + 1).join(",")))
            .join(",");

        format!(
            "ReduceGroup(GraphAutoms([{}],[{}],{}),{})",
            edges, partition, self.n, self.n_reduced
        )
    }

    fn vertex_colors(&self) -> Vec<usize> {
        let mut colors = vec![0; self.n];
        for (cell, vertices) in self.partition.iter().enumerate() {
            for &v in vertices {
                colors[v] = cell;
            }
        }
        colors
    }

    /// Translates a 0-based image of length n into a one-based permutation of
    /// degree `n_reduced`, rejecting images that touch the auxiliary tail.
    fn reduce_image(&self, image: &[usize]) -> Result<Perm> {
        for v in self.n_reduced..self.n {
            if image[v] != v {
                return Err(Error::OracleFailure("automorphism moves an auxiliary vertex"));
            }
        }
        let mut reduced = Vec::with_capacity(self.n_reduced);
        for &w in &image[..self.n_reduced] {
            if w >= self.n_reduced {
                return Err(Error::OracleFailure("real vertex mapped into the auxiliary tail"));
            }
            reduced.push(w + 1);
        }
        Perm::from_image(reduced)
    }
}
