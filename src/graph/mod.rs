//! Graph model and graph file I/O

pub mod graph;
pub mod io;

pub use graph::{random_permutation, Graph, GraphBuilder};
pub use io::{load_graph_from_file, save_graph_to_file, GraphFormat};
