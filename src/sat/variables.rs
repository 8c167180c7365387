//! Variable allocation for the isomorphism encoding

use super::pruning::PruneMatrix;

/// The `n×n` table mapping vertex pairs to SAT variables.
///
/// Cell (i, j) holds the variable asserting "vertex i of graph 1 maps to
/// vertex j of graph 2", or `None` when pruning proved the pair impossible.
/// Ids are assigned in row-major order over the surviving cells, so the
/// allocated set is exactly `1..=n²-pruned` with no gaps.
#[derive(Debug, Clone)]
pub struct VarMap {
    n: usize,
    ids: Vec<Option<i32>>,
    num_vars: usize,
}

impl VarMap {
    pub(crate) fn allocate(prune: &PruneMatrix) -> Self {
        let n = prune.num_vertices();
        let mut ids = vec![None; n * n];
        let mut next_id = 1i32;
        for i in 0..n {
            for j in 0..n {
                if !prune.is_pruned(i, j) {
                    ids[i * n + j] = Some(next_id);
                    next_id += 1;
                }
            }
        }
        Self {
            n,
            ids,
            num_vars: (next_id - 1) as usize,
        }
    }

    /// The variable for cell (i, j), or `None` if the cell was pruned.
    #[inline]
    pub fn var(&self, i: usize, j: usize) -> Option<i32> {
        self.ids[i * self.n + j]
    }

    pub fn num_vertices(&self) -> usize {
        self.n
    }

    /// Number of allocated variables (`n² - pruned`).
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn num_pruned(&self) -> usize {
        self.n * self.n - self.num_vars
    }

    /// All allocated cells as `(varId, i, j)`, in ascending id order.
    pub fn entries(&self) -> impl Iterator<Item = (i32, usize, usize)> + '_ {
        let n = self.n;
        self.ids
            .iter()
            .enumerate()
            .filter_map(move |(cell, id)| id.map(|id| (id, cell / n, cell % n)))
    }
}
