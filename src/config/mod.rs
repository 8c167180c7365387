//! Configuration management for the graph isomorphism encoder

pub mod settings;

pub use settings::{
    AdversarialConfig, CliOverrides, EncodingConfig, InputConfig, OutputConfig, Settings,
};
