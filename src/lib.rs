//! Graph Isomorphism / SAT Conversion Toolkit
//!
//! This library converts graph isomorphism questions into CNF formulas and
//! back: a pair of graphs becomes a SAT instance that is satisfiable exactly
//! when the graphs are isomorphic, and a CNF formula becomes a graph that
//! mirrors its clause structure. It also builds adversarial graph triples
//! from CFI degree gadgets for benchmarking isomorphism solvers.

pub mod adversarial;
pub mod config;
pub mod error;
pub mod graph;
pub mod sat;
pub mod utils;

pub use config::Settings;
pub use error::EncodeError;
pub use graph::Graph;
pub use sat::{EncodeOptions, GiEncoding, GiSatEncoder, SatInstance};

/// Encode a pair of graphs as a SAT instance.
///
/// Returns an error when the graphs are provably non-isomorphic before any
/// clause is generated, either from mismatched sizes or from a vertex the
/// invariant pruning leaves with no candidate image.
pub fn encode_graph_pair<'a>(
    g1: &'a Graph,
    g2: &'a Graph,
    options: EncodeOptions,
) -> Result<GiEncoding<'a>, EncodeError> {
    GiSatEncoder::new(options).encode(g1, g2)
}
