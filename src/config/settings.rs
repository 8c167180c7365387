//! Configuration settings for the graph isomorphism encoder

use crate::graph::GraphFormat;
use crate::sat::DEFAULT_INVARIANT_DEPTH;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub input: InputConfig,
    pub encoding: EncodingConfig,
    pub adversarial: AdversarialConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub graph1_file: PathBuf,
    pub graph2_file: PathBuf,
    pub format: GraphFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// Prune infeasible mapping variables before clause generation
    pub simplify: bool,
    /// Iteration depth for the neighbor-degree-sum invariant
    pub invariant_depth: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdversarialConfig {
    /// Fixed RNG seed; omit for a fresh seed per run
    pub seed: Option<u64>,
    /// Group size for random vertex coloring of the base graph
    pub colors_per_group: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub cnf_file: PathBuf,
    pub var_map_file: PathBuf,
    pub output_directory: PathBuf,
    pub save_statistics: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: InputConfig {
                graph1_file: PathBuf::from("input/graphs/example_a.col"),
                graph2_file: PathBuf::from("input/graphs/example_b.col"),
                format: GraphFormat::DimacsEdge,
            },
            encoding: EncodingConfig {
                simplify: true,
                invariant_depth: DEFAULT_INVARIANT_DEPTH,
            },
            adversarial: AdversarialConfig {
                seed: None,
                colors_per_group: None,
            },
            output: OutputConfig {
                cnf_file: PathBuf::from("output/instance.cnf"),
                var_map_file: PathBuf::from("output/instance.map"),
                output_directory: PathBuf::from("output"),
                save_statistics: false,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if let Some(colors_per_group) = self.adversarial.colors_per_group {
            if colors_per_group == 0 {
                anyhow::bail!("colors_per_group must be positive");
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(simplify) = cli_overrides.simplify {
            self.encoding.simplify = simplify;
        }
        if let Some(depth) = cli_overrides.invariant_depth {
            self.encoding.invariant_depth = depth;
        }
        if let Some(seed) = cli_overrides.seed {
            self.adversarial.seed = Some(seed);
        }
        if let Some(format) = cli_overrides.format {
            self.input.format = format;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub simplify: Option<bool>,
    pub invariant_depth: Option<usize>,
    pub seed: Option<u64>,
    pub format: Option<GraphFormat>,
    pub output_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let mut settings = Settings::default();
        settings.encoding.invariant_depth = 3;
        settings.adversarial.seed = Some(42);
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.encoding.invariant_depth, 3);
        assert_eq!(loaded.adversarial.seed, Some(42));
    }

    #[test]
    fn test_rejects_zero_color_group() {
        let mut settings = Settings::default();
        settings.adversarial.colors_per_group = Some(0);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            simplify: Some(false),
            invariant_depth: Some(2),
            seed: Some(7),
            format: Some(GraphFormat::Colored),
            output_dir: Some(PathBuf::from("elsewhere")),
        };
        settings.merge_with_cli(&overrides);
        assert!(!settings.encoding.simplify);
        assert_eq!(settings.encoding.invariant_depth, 2);
        assert_eq!(settings.adversarial.seed, Some(7));
        assert_eq!(settings.input.format, GraphFormat::Colored);
        assert_eq!(settings.output.output_directory, PathBuf::from("elsewhere"));
    }
}
