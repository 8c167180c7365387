//! SAT encodings in both directions
//!
//! [`encoder`] turns a pair of graphs into a CNF formula that is satisfiable
//! exactly when the graphs are isomorphic. [`sat_to_graph`] goes the other
//! way, embedding a CNF formula into a graph whose structure mirrors the
//! clause/variable incidences.

pub mod encoder;
pub mod instance;
pub mod io;
pub mod pruning;
pub mod sat_to_graph;
pub mod variables;

pub use encoder::{
    ClauseCounts, EncodeOptions, EncodingStatistics, GiEncoding, GiSatEncoder,
    DEFAULT_INVARIANT_DEPTH,
};
pub use instance::{Clause, SatInstance};
pub use io::{load_sat_from_file, parse_dimacs_cnf, save_encoding_to_files};
pub use pruning::PruneMatrix;
pub use sat_to_graph::encode_sat_as_graph;
pub use variables::VarMap;
