//! CNF encoding of graph-isomorphism instances
//!
//! Given two graphs of equal size, produces a CNF clause stream over the
//! variables "vertex i of graph 1 maps to vertex j of graph 2". Three clause
//! families make a satisfying assignment exactly an edge-preserving
//! bijection:
//!
//! * totality — every source vertex maps somewhere,
//! * injectivity — no two source vertices share an image,
//! * edge preservation — no edge of graph 1 maps onto a non-edge of graph 2.
//!
//! When simplification is on, candidate pairs are pruned through the
//! invariants in [`super::pruning`] before variables are even allocated;
//! any clause that would mention a pruned pair is either satisfied trivially
//! (the negated families) or shrinks (totality), never emitted with a
//! missing term.

use super::instance::Clause;
use super::pruning::PruneMatrix;
use super::variables::VarMap;
use crate::error::{EncodeError, SizeQuantity};
use crate::graph::Graph;
use serde::Serialize;

/// Knobs for the isomorphism encoder.
#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    /// Prune candidate pairs through degree, neighbor-degree-sum and color
    /// invariants before allocating variables.
    ///
    /// Colors participate only as part of this pruning; with `simplify` off
    /// the encoding is over the adjacency relation alone and colors are not
    /// enforced.
    pub simplify: bool,
    /// Depth of the iterated neighbor-degree-sum invariant. Depth 0 keeps
    /// only the plain degree and color checks.
    pub invariant_depth: usize,
}

pub const DEFAULT_INVARIANT_DEPTH: usize = 5;

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            simplify: true,
            invariant_depth: DEFAULT_INVARIANT_DEPTH,
        }
    }
}

/// Encoder for ordered graph pairs.
pub struct GiSatEncoder {
    options: EncodeOptions,
}

impl GiSatEncoder {
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    /// Encodes the pair, returning the variable map and a lazily produced
    /// clause stream.
    ///
    /// Fails with `SizeMismatch` when the vertex or edge counts differ, and
    /// with `EmptyClause` when simplification leaves some source vertex
    /// without any candidate image; both certify that the graphs are not
    /// isomorphic, and both occur before a single clause is produced, so a
    /// caller never has partial output to clean up.
    pub fn encode<'a>(&self, g1: &'a Graph, g2: &'a Graph) -> Result<GiEncoding<'a>, EncodeError> {
        if g1.num_vertices() != g2.num_vertices() {
            return Err(EncodeError::SizeMismatch {
                quantity: SizeQuantity::Vertices,
                left: g1.num_vertices(),
                right: g2.num_vertices(),
            });
        }
        if g1.num_edges() != g2.num_edges() {
            return Err(EncodeError::SizeMismatch {
                quantity: SizeQuantity::Edges,
                left: g1.num_edges(),
                right: g2.num_edges(),
            });
        }
        let n = g1.num_vertices();

        let prune = if self.options.simplify {
            PruneMatrix::compute(g1, g2, self.options.invariant_depth)
        } else {
            PruneMatrix::keep_all(n)
        };
        let var_map = VarMap::allocate(&prune);

        // Totality rows must be non-empty before anything is emitted.
        for i in 0..n {
            if (0..n).all(|j| var_map.var(i, j).is_none()) {
                return Err(EncodeError::EmptyClause {
                    vertex: i,
                    depth: self.options.invariant_depth,
                });
            }
        }

        let counts = count_clauses(g1, g2, &prune);
        Ok(GiEncoding {
            g1,
            g2,
            var_map,
            counts,
            options: self.options,
        })
    }
}

/// A finished encoding: variable map, clause counts, and the clause stream.
///
/// All state derived from one `encode` call lives here; nothing is shared
/// across calls.
pub struct GiEncoding<'a> {
    g1: &'a Graph,
    g2: &'a Graph,
    var_map: VarMap,
    counts: ClauseCounts,
    options: EncodeOptions,
}

impl<'a> GiEncoding<'a> {
    pub fn var_map(&self) -> &VarMap {
        &self.var_map
    }

    pub fn num_vars(&self) -> usize {
        self.var_map.num_vars()
    }

    /// Total clause count, computed by the independent counting pass. Always
    /// equals `self.clauses().count()`.
    pub fn num_clauses(&self) -> usize {
        self.counts.total()
    }

    pub fn clause_counts(&self) -> ClauseCounts {
        self.counts
    }

    /// The clause stream, produced lazily: totality, then injectivity, then
    /// edge preservation. Worst-case clause counts grow as O(n⁴), so callers
    /// should write clauses out as they are yielded.
    pub fn clauses(&self) -> impl Iterator<Item = Clause> + '_ {
        self.totality_clauses()
            .chain(self.injectivity_clauses())
            .chain(self.edge_preservation_clauses())
    }

    /// One clause per source vertex: the disjunction of its surviving
    /// candidates. Never empty; `encode` has already certified that.
    fn totality_clauses(&self) -> impl Iterator<Item = Clause> + '_ {
        let n = self.var_map.num_vertices();
        (0..n).map(move |i| {
            Clause::new((0..n).filter_map(|j| self.var_map.var(i, j)).collect())
        })
    }

    /// At most one source vertex per image: ¬x(i,k) ∨ ¬x(j,k) for i < j.
    /// Clauses touching a pruned cell are satisfied trivially and skipped.
    fn injectivity_clauses(&self) -> impl Iterator<Item = Clause> + '_ {
        let n = self.var_map.num_vertices();
        (0..n).flat_map(move |j| {
            (0..n).flat_map(move |k| {
                let x_jk = self.var_map.var(j, k);
                (0..j).filter_map(move |i| {
                    let x_jk = x_jk?;
                    let x_ik = self.var_map.var(i, k)?;
                    Some(Clause::binary(-x_ik, -x_jk))
                })
            })
        })
    }

    /// Edges of graph 1 never map onto non-edges of graph 2:
    /// ¬x(i,k) ∨ ¬x(j,l) for every edge (i,j), i < j, and every (k,l) with
    /// k ≠ l that is not an edge.
    fn edge_preservation_clauses(&self) -> impl Iterator<Item = Clause> + '_ {
        let n = self.var_map.num_vertices();
        (0..n).flat_map(move |j| {
            (0..j)
                .filter(move |&i| self.g1.adjacent(i, j))
                .flat_map(move |i| {
                    (0..n).flat_map(move |k| {
                        let x_ik = self.var_map.var(i, k);
                        (0..n).filter_map(move |l| {
                            let x_ik = x_ik?;
                            if k == l || self.g2.adjacent(k, l) {
                                return None;
                            }
                            let x_jl = self.var_map.var(j, l)?;
                            Some(Clause::binary(-x_ik, -x_jl))
                        })
                    })
                })
        })
    }

    pub fn statistics(&self) -> EncodingStatistics {
        EncodingStatistics {
            num_vertices: self.g1.num_vertices(),
            num_edges: self.g1.num_edges(),
            num_vars: self.var_map.num_vars(),
            pruned_vars: self.var_map.num_pruned(),
            counts: self.counts,
            simplify: self.options.simplify,
            invariant_depth: self.options.invariant_depth,
        }
    }
}

/// Per-family clause counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClauseCounts {
    pub totality: usize,
    pub injectivity: usize,
    pub edge_preservation: usize,
}

impl ClauseCounts {
    pub fn total(&self) -> usize {
        self.totality + self.injectivity + self.edge_preservation
    }
}

/// Counts the clauses the generator will emit, written as its own pass over
/// the same pruning predicate. The DIMACS header needs this number before
/// the stream starts; the equality of the two passes is enforced by tests.
fn count_clauses(g1: &Graph, g2: &Graph, prune: &PruneMatrix) -> ClauseCounts {
    let n = g1.num_vertices();

    let totality = n;

    let mut injectivity = 0usize;
    for j in 0..n {
        for k in 0..n {
            if prune.is_pruned(j, k) {
                continue;
            }
            for i in 0..j {
                if prune.is_pruned(i, k) {
                    continue;
                }
                injectivity += 1;
            }
        }
    }

    let mut edge_preservation = 0usize;
    for j in 0..n {
        for i in 0..j {
            if !g1.adjacent(i, j) {
                continue;
            }
            for k in 0..n {
                if prune.is_pruned(i, k) {
                    continue;
                }
                for l in 0..n {
                    if k == l || g2.adjacent(k, l) || prune.is_pruned(j, l) {
                        continue;
                    }
                    edge_preservation += 1;
                }
            }
        }
    }

    ClauseCounts {
        totality,
        injectivity,
        edge_preservation,
    }
}

/// Statistics about one encoding run.
#[derive(Debug, Clone, Serialize)]
pub struct EncodingStatistics {
    pub num_vertices: usize,
    pub num_edges: usize,
    pub num_vars: usize,
    pub pruned_vars: usize,
    pub counts: ClauseCounts,
    pub simplify: bool,
    pub invariant_depth: usize,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Encoding Statistics:")?;
        writeln!(f, "  Graph size: {} vertices, {} edges", self.num_vertices, self.num_edges)?;
        writeln!(
            f,
            "  Variables: {} (down from {}, {} pruned)",
            self.num_vars,
            self.num_vertices * self.num_vertices,
            self.pruned_vars
        )?;
        writeln!(f, "  Totality clauses: {}", self.counts.totality)?;
        writeln!(f, "  Injectivity clauses: {}", self.counts.injectivity)?;
        writeln!(f, "  Edge preservation clauses: {}", self.counts.edge_preservation)?;
        writeln!(f, "  Total clauses: {}", self.counts.total())?;
        writeln!(
            f,
            "  Simplification: {} (invariant depth {})",
            if self.simplify { "on" } else { "off" },
            self.invariant_depth
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn cycle_graph(n: usize) -> Graph {
        let mut builder = GraphBuilder::new(n);
        for v in 0..n {
            builder.add_edge(v, (v + 1) % n);
        }
        builder.finish()
    }

    fn encode_pair<'a>(
        g1: &'a Graph,
        g2: &'a Graph,
        simplify: bool,
    ) -> Result<GiEncoding<'a>, EncodeError> {
        GiSatEncoder::new(EncodeOptions {
            simplify,
            invariant_depth: DEFAULT_INVARIANT_DEPTH,
        })
        .encode(g1, g2)
    }

    /// Evaluates the clause stream under the assignment induced by a vertex
    /// permutation: x(i,j) is true iff perm maps i to j.
    fn satisfied_by_permutation(encoding: &GiEncoding<'_>, perm: &[usize]) -> bool {
        let map = encoding.var_map();
        let mut truth = vec![false; map.num_vars() + 1];
        for (id, i, j) in map.entries() {
            truth[id as usize] = perm[i] == j;
        }
        encoding.clauses().all(|clause| {
            clause.literals.iter().any(|&lit| {
                let value = truth[lit.unsigned_abs() as usize];
                if lit > 0 {
                    value
                } else {
                    !value
                }
            })
        })
    }

    #[test]
    fn test_size_mismatch_is_rejected() {
        let g1 = cycle_graph(4);
        let g2 = cycle_graph(5);
        assert!(matches!(
            encode_pair(&g1, &g2, false),
            Err(EncodeError::SizeMismatch { .. })
        ));

        let mut builder = GraphBuilder::new(4);
        builder.add_edge(0, 1);
        let sparse = builder.finish();
        assert!(matches!(
            encode_pair(&g1, &sparse, false),
            Err(EncodeError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_unsimplified_clause_counts_match_closed_form() {
        // Without pruning: n totality, n·n(n-1)/2 injectivity and
        // 2·m·(n(n-1)/2 − m) edge preservation clauses.
        let g1 = cycle_graph(4);
        let g2 = cycle_graph(4);
        let encoding = encode_pair(&g1, &g2, false).unwrap();

        assert_eq!(encoding.num_vars(), 16);
        let counts = encoding.clause_counts();
        assert_eq!(counts.totality, 4);
        assert_eq!(counts.injectivity, 4 * 6);
        assert_eq!(counts.edge_preservation, 2 * 4 * (6 - 4));
        assert_eq!(encoding.num_clauses(), 4 + 24 + 16);
    }

    #[test]
    fn test_count_matches_stream_for_random_pairs() {
        let mut rng = XorShiftRng::seed_from_u64(17);
        for round in 0..6 {
            let g1 = Graph::random(8 + round, 0.35, &mut rng);
            let g2 = g1.isomorphic_copy(&mut rng);
            for simplify in [false, true] {
                let encoding = encode_pair(&g1, &g2, simplify).unwrap();
                assert_eq!(
                    encoding.clauses().count(),
                    encoding.num_clauses(),
                    "count/stream divergence (round {}, simplify {})",
                    round,
                    simplify
                );
            }
        }
    }

    #[test]
    fn test_all_clauses_are_non_empty_and_totality_row_sized() {
        let mut rng = XorShiftRng::seed_from_u64(23);
        let g1 = Graph::random(9, 0.4, &mut rng);
        let g2 = g1.isomorphic_copy(&mut rng);
        let encoding = encode_pair(&g1, &g2, true).unwrap();

        let n = g1.num_vertices();
        let map = encoding.var_map();
        for (i, clause) in encoding.clauses().take(n).enumerate() {
            let pruned_in_row = (0..n).filter(|&j| map.var(i, j).is_none()).count();
            assert_eq!(clause.len(), n - pruned_in_row);
        }
        assert!(encoding.clauses().all(|clause| !clause.is_empty()));
    }

    #[test]
    fn test_isomorphic_pair_is_satisfiable_under_known_permutation() {
        let mut rng = XorShiftRng::seed_from_u64(29);
        let g1 = Graph::random(10, 0.3, &mut rng);
        let perm = crate::graph::random_permutation(10, &mut rng);
        let g2 = g1.permuted(&perm).unwrap();

        for simplify in [false, true] {
            let encoding = encode_pair(&g1, &g2, simplify).unwrap();
            assert!(
                satisfied_by_permutation(&encoding, &perm),
                "induced assignment must satisfy the encoding (simplify {})",
                simplify
            );
        }
    }

    #[test]
    fn test_four_cycle_relabeling_end_to_end() {
        // G2 is the 4-cycle relabeled by (0,2,1,3); exactly the relabelings
        // of the cycle satisfy the encoding.
        let g1 = cycle_graph(4);
        let perm = vec![0, 2, 1, 3];
        let g2 = g1.permuted(&perm).unwrap();
        let encoding = encode_pair(&g1, &g2, false).unwrap();

        assert!(satisfied_by_permutation(&encoding, &perm));
        // A non-isomorphism assignment must violate some clause: mapping the
        // cycle identity onto the relabeled graph breaks edge preservation.
        assert!(!satisfied_by_permutation(&encoding, &[0, 1, 2, 3]));
    }

    #[test]
    fn test_empty_clause_certifies_non_isomorphism() {
        // Same vertex and edge counts, but g1 has a degree-3 vertex and g2
        // is 2-regular, so simplification empties that vertex's row.
        let mut builder = GraphBuilder::new(6);
        builder.add_edge(0, 1);
        builder.add_edge(0, 2);
        builder.add_edge(0, 3);
        builder.add_edge(4, 5);
        builder.add_edge(3, 4);
        builder.add_edge(1, 2);
        let g1 = builder.finish();
        let g2 = cycle_graph(6);
        assert_eq!(g1.num_edges(), g2.num_edges());

        match encode_pair(&g1, &g2, true) {
            Err(EncodeError::EmptyClause { vertex, depth }) => {
                assert_eq!(vertex, 0);
                assert_eq!(depth, DEFAULT_INVARIANT_DEPTH);
            }
            other => panic!("expected EmptyClause, got {:?}", other.map(|e| e.num_clauses())),
        }

        // Without simplification the same pair encodes fine (and is simply
        // unsatisfiable for the solver downstream).
        assert!(encode_pair(&g1, &g2, false).is_ok());
    }

    #[test]
    fn test_simplified_adversarial_pair_still_encodes() {
        // A and B of a triple agree on every invariant the pruner checks,
        // so simplification must not produce an empty row.
        let mut rng = XorShiftRng::seed_from_u64(31);
        let g = cycle_graph(4);
        let triple = crate::adversarial::build_triple(&g, &mut rng).unwrap();
        let encoding = encode_pair(&triple.a, &triple.b, true).unwrap();
        assert!(encoding.num_vars() > 0);
        assert_eq!(encoding.clauses().count(), encoding.num_clauses());
    }
}
