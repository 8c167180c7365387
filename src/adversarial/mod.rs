//! Adversarial benchmark graph generation

pub mod builder;
pub mod gadget;

pub use builder::{build_triple, GraphTriple};
pub use gadget::{build_gadget, gadget_size};
