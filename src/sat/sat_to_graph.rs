//! Encoding a SAT instance as a graph
//!
//! The resulting graph captures the clause structure of the instance, so two
//! SAT instances that are mere variable relabelings of one another encode to
//! isomorphic graphs — which is what lets structural equivalence of SAT
//! instances be tested through the GI pipeline.

use super::instance::SatInstance;
use crate::graph::{Graph, GraphBuilder};
use itertools::Itertools;

/// Encodes `sat` as a single undirected graph with `3 * numVars` vertices.
///
/// Layout: vertices `[0, m)` stand for positive literals, `[m, 2m)` for
/// negated literals, `[2m, 3m)` are connector vertices tying each variable's
/// two literal vertices together (a binary-choice gadget per variable). For
/// every clause, every unordered pair of literals over distinct variables is
/// joined at its literal vertices; pairs over the same variable are skipped,
/// and repeated pairs collapse into the single adjacency bit.
pub fn encode_sat_as_graph(sat: &SatInstance) -> Graph {
    let m = sat.num_vars();
    let mut builder = GraphBuilder::new(3 * m);

    for i in 0..m {
        builder.add_edge(i, 2 * m + i);
        builder.add_edge(m + i, 2 * m + i);
    }

    for clause in sat.clauses() {
        for (&l1, &l2) in clause.literals.iter().tuple_combinations() {
            if l1.unsigned_abs() == l2.unsigned_abs() {
                continue;
            }
            builder.add_edge(literal_vertex(l1, m), literal_vertex(l2, m));
        }
    }

    builder.finish()
}

/// Graph vertex for a signed literal: variable index, offset by `m` when
/// negated.
#[inline]
fn literal_vertex(literal: i32, m: usize) -> usize {
    let index = literal.unsigned_abs() as usize - 1;
    if literal < 0 {
        index + m
    } else {
        index
    }
}
