//! Dense adjacency-matrix graph values

use crate::error::EncodeError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// An undirected graph without self-loops or multi-edges, stored as a flat
/// `n×n` adjacency matrix with optionally colored vertices.
///
/// Vertices are addressed by index `0..n-1`, colors are 1-based. Degrees and
/// the edge count are cached at construction; a `Graph` is immutable once
/// built, and every transform returns a fresh value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    n: usize,
    adj: Vec<bool>,
    degrees: Vec<usize>,
    colors: Vec<u32>,
    num_colors: u32,
    num_edges: usize,
}

impl Graph {
    /// Whether vertices `u` and `v` are connected by an edge.
    #[inline]
    pub fn adjacent(&self, u: usize, v: usize) -> bool {
        self.adj[u * self.n + v]
    }

    /// Number of edges incident to `v`.
    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.degrees[v]
    }

    /// Color of `v` (all vertices share color 1 unless a coloring was applied).
    #[inline]
    pub fn color(&self, v: usize) -> u32 {
        self.colors[v]
    }

    pub fn num_vertices(&self) -> usize {
        self.n
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn num_colors(&self) -> u32 {
        self.num_colors
    }

    /// Degree sequence sorted ascending; two isomorphic graphs always agree
    /// on this.
    pub fn sorted_degree_sequence(&self) -> Vec<usize> {
        let mut degrees = self.degrees.clone();
        degrees.sort_unstable();
        degrees
    }

    /// Builds a graph from a square boolean adjacency matrix.
    ///
    /// Diagonal entries are ignored and the matrix is symmetrized, so a
    /// one-sided entry still yields an undirected edge. All vertices get the
    /// same color.
    pub fn from_adjacency_matrix(rows: &[Vec<bool>]) -> Result<Graph, EncodeError> {
        let n = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(EncodeError::malformed(format!(
                    "adjacency matrix is not square: {} rows, but row {} has {} columns",
                    n,
                    i,
                    row.len()
                )));
            }
        }
        let mut builder = GraphBuilder::new(n);
        for (i, row) in rows.iter().enumerate() {
            for (j, &edge) in row.iter().enumerate() {
                if edge {
                    builder.add_edge(i, j);
                }
            }
        }
        Ok(builder.finish())
    }

    /// Samples a random undirected graph with `n` vertices where each vertex
    /// pair is connected with probability `p`.
    pub fn random<R: Rng>(n: usize, p: f64, rng: &mut R) -> Graph {
        let n = n.max(1);
        let p = if p <= 0.0 || p > 1.0 { 0.03 } else { p };
        let mut builder = GraphBuilder::new(n);
        for i in 0..n {
            for j in 0..i {
                if rng.random_bool(p) {
                    builder.add_edge(i, j);
                }
            }
        }
        builder.finish()
    }

    /// Returns a copy with colors reassigned at random, each color covering
    /// at most `per_color` vertices.
    ///
    /// The resulting `num_colors` is the number of groups actually used.
    pub fn with_random_coloring<R: Rng>(&self, per_color: usize, rng: &mut R) -> Graph {
        let per_color = per_color.max(1);
        let mut order: Vec<usize> = (0..self.n).collect();
        order.shuffle(rng);

        let mut colors = vec![1u32; self.n];
        let mut num_colors = 0u32;
        for (group, chunk) in order.chunks(per_color).enumerate() {
            num_colors = group as u32 + 1;
            for &v in chunk {
                colors[v] = num_colors;
            }
        }

        Graph {
            n: self.n,
            adj: self.adj.clone(),
            degrees: self.degrees.clone(),
            colors,
            num_colors: num_colors.max(1),
            num_edges: self.num_edges,
        }
    }

    /// Relabels vertices so that vertex `v` becomes `perm[v]`, carrying
    /// adjacency, degrees and colors along consistently.
    pub fn permuted(&self, perm: &[usize]) -> Result<Graph, EncodeError> {
        if perm.len() != self.n {
            return Err(EncodeError::malformed(format!(
                "permutation has {} entries for a graph with {} vertices",
                perm.len(),
                self.n
            )));
        }
        let mut seen = vec![false; self.n];
        for &target in perm {
            if target >= self.n || seen[target] {
                return Err(EncodeError::malformed(
                    "vertex relabeling is not a permutation",
                ));
            }
            seen[target] = true;
        }
        Ok(self.permuted_unchecked(perm))
    }

    fn permuted_unchecked(&self, perm: &[usize]) -> Graph {
        let n = self.n;
        let mut adj = vec![false; n * n];
        let mut degrees = vec![0usize; n];
        let mut colors = vec![1u32; n];
        for i in 0..n {
            degrees[perm[i]] = self.degrees[i];
            colors[perm[i]] = self.colors[i];
            for j in 0..n {
                adj[perm[i] * n + perm[j]] = self.adjacent(i, j);
            }
        }
        Graph {
            n,
            adj,
            degrees,
            colors,
            num_colors: self.num_colors,
            num_edges: self.num_edges,
        }
    }

    /// Returns a graph isomorphic to `self` under a uniformly random vertex
    /// relabeling, colors included.
    pub fn isomorphic_copy<R: Rng>(&self, rng: &mut R) -> Graph {
        self.permuted_unchecked(&random_permutation(self.n, rng))
    }

    /// Returns a near-miss variation: one extra vertex wired to `n/10`
    /// distinct random vertices of the original. Colors are left at their
    /// default for the new vertex.
    pub fn perturbed_copy<R: Rng>(&self, rng: &mut R) -> Graph {
        let n = self.n;
        let mut builder = GraphBuilder::new(n + 1);
        for i in 0..n {
            builder.set_color(i, self.colors[i]);
            for j in 0..i {
                if self.adjacent(i, j) {
                    builder.add_edge(i, j);
                }
            }
        }
        let extra_edges = (n / 10).min(n);
        let mut added = 0;
        while added < extra_edges {
            let target = rng.random_range(0..n);
            if !builder.has_edge(n, target) {
                builder.add_edge(n, target);
                added += 1;
            }
        }
        builder.finish()
    }

    pub(crate) fn from_parts(adj: Vec<bool>, colors: Vec<u32>, n: usize) -> Graph {
        debug_assert_eq!(adj.len(), n * n);
        debug_assert_eq!(colors.len(), n);
        let mut degrees = vec![0usize; n];
        let mut twice_edges = 0usize;
        for i in 0..n {
            let mut degree = 0;
            for j in 0..n {
                if adj[i * n + j] {
                    degree += 1;
                }
            }
            degrees[i] = degree;
            twice_edges += degree;
        }
        let num_colors = colors.iter().copied().max().unwrap_or(1);
        Graph {
            n,
            adj,
            degrees,
            colors,
            num_colors,
            num_edges: twice_edges / 2,
        }
    }
}

/// Draws a uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm
}

impl fmt::Display for Graph {
    /// DIMACS-edge rendering (`p edge n m` then `e u v` lines, 1-based).
    /// Colors are not part of this format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p edge {} {}", self.n, self.num_edges)?;
        for i in 0..self.n {
            for j in i..self.n {
                if self.adjacent(i, j) {
                    writeln!(f, "e {} {}", i + 1, j + 1)?;
                }
            }
        }
        Ok(())
    }
}

/// Incremental constructor used by the generators and converters.
///
/// Edges may be added in any order and repeatedly; `finish` computes the
/// cached degrees and edge count so the resulting `Graph` invariants hold by
/// construction.
#[derive(Debug)]
pub struct GraphBuilder {
    n: usize,
    adj: Vec<bool>,
    colors: Vec<u32>,
}

impl GraphBuilder {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            adj: vec![false; n * n],
            colors: vec![1; n],
        }
    }

    /// Connects `u` and `v` in both directions. Self-loop requests are
    /// ignored; repeated requests are no-ops.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        if u == v {
            return;
        }
        self.adj[u * self.n + v] = true;
        self.adj[v * self.n + u] = true;
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adj[u * self.n + v]
    }

    pub fn set_color(&mut self, v: usize, color: u32) {
        self.colors[v] = color;
    }

    pub fn finish(self) -> Graph {
        let n = self.n;
        Graph::from_parts(self.adj, self.colors, n)
    }
}
