//! Variable pruning via graph invariants
//!
//! A cell (i, j) of the candidate-mapping table can be discarded when vertex
//! i of graph 1 provably cannot map onto vertex j of graph 2: mismatched
//! degree, mismatched iterated neighbor-degree sums at any depth, or
//! mismatched color. This is a sound but incomplete filter; surviving cells
//! still need the SAT solver.

use crate::graph::Graph;

/// Iterated neighbor-degree sums per vertex.
///
/// `sums[v][0]` is the sum of the degrees of v's neighbors; `sums[v][d]` is
/// the sum over v's neighbors u of `sums[u][d-1]`. Wrapping arithmetic keeps
/// the values comparable between graphs even when deep sums overflow.
pub fn neighbor_degree_sums(graph: &Graph, depth: usize) -> Vec<Vec<u64>> {
    let n = graph.num_vertices();
    let mut sums = vec![vec![0u64; depth]; n];
    if depth == 0 {
        return sums;
    }
    for i in 0..n {
        for j in 0..i {
            if graph.adjacent(i, j) {
                sums[i][0] = sums[i][0].wrapping_add(graph.degree(j) as u64);
                sums[j][0] = sums[j][0].wrapping_add(graph.degree(i) as u64);
            }
        }
    }
    for d in 1..depth {
        for i in 0..n {
            for j in 0..i {
                if graph.adjacent(i, j) {
                    let from_j = sums[j][d - 1];
                    let from_i = sums[i][d - 1];
                    sums[i][d] = sums[i][d].wrapping_add(from_j);
                    sums[j][d] = sums[j][d].wrapping_add(from_i);
                }
            }
        }
    }
    sums
}

/// The pruning predicate over the `n×n` candidate-mapping table.
#[derive(Debug, Clone)]
pub struct PruneMatrix {
    n: usize,
    pruned: Vec<bool>,
    pruned_count: usize,
}

impl PruneMatrix {
    /// A matrix that prunes nothing, used when simplification is off.
    pub fn keep_all(n: usize) -> Self {
        Self {
            n,
            pruned: vec![false; n * n],
            pruned_count: 0,
        }
    }

    /// Computes the full predicate: degrees, neighbor-degree sums up to
    /// `depth`, then colors. Both graphs must have `n` vertices.
    pub fn compute(g1: &Graph, g2: &Graph, depth: usize) -> Self {
        let n = g1.num_vertices();
        let sums1 = neighbor_degree_sums(g1, depth);
        let sums2 = neighbor_degree_sums(g2, depth);

        let mut pruned = vec![false; n * n];
        let mut pruned_count = 0;
        for i in 0..n {
            for j in 0..n {
                let cell = &mut pruned[i * n + j];
                if g1.degree(i) != g2.degree(j) {
                    *cell = true;
                } else if (0..depth).any(|d| sums1[i][d] != sums2[j][d]) {
                    *cell = true;
                } else if g1.color(i) != g2.color(j) {
                    *cell = true;
                }
                if *cell {
                    pruned_count += 1;
                }
            }
        }
        Self {
            n,
            pruned,
            pruned_count,
        }
    }

    #[inline]
    pub fn is_pruned(&self, i: usize, j: usize) -> bool {
        self.pruned[i * self.n + j]
    }

    pub fn num_vertices(&self) -> usize {
        self.n
    }

    pub fn pruned_count(&self) -> usize {
        self.pruned_count
    }
}
