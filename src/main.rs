//! Main CLI application for the graph isomorphism / SAT converter

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use graph_iso_sat::{
    adversarial::build_triple,
    config::{CliOverrides, Settings},
    error::EncodeError,
    graph::{load_graph_from_file, save_graph_to_file, Graph, GraphFormat},
    sat::{encode_sat_as_graph, load_sat_from_file, save_encoding_to_files, EncodeOptions, GiSatEncoder},
    utils::{ColorOutput, GraphFormatter},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "graph_iso_sat")]
#[command(about = "Graph Isomorphism / SAT Conversion Toolkit")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a graph isomorphism question as a CNF formula
    Encode {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// First graph file (overrides config)
        #[arg(long)]
        graph1: Option<PathBuf>,

        /// Second graph file (overrides config)
        #[arg(long)]
        graph2: Option<PathBuf>,

        /// Graph file format: dimacs or colored (overrides config)
        #[arg(short, long)]
        format: Option<GraphFormat>,

        /// Skip the invariant-based variable pruning
        #[arg(long)]
        no_simplify: bool,

        /// Iteration depth of the pruning invariant (overrides config)
        #[arg(short, long)]
        depth: Option<usize>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Convert a CNF formula into a graph mirroring its clause structure
    Sat2graph {
        /// DIMACS CNF input file
        #[arg(short, long)]
        input: PathBuf,

        /// Graph output file
        #[arg(short, long)]
        output: PathBuf,

        /// Graph file format: dimacs or colored
        #[arg(short, long, default_value = "dimacs")]
        format: GraphFormat,
    },

    /// Build an adversarial graph triple {A, A', B} from a base graph
    Triple {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Base graph file
        #[arg(short, long)]
        graph: PathBuf,

        /// Graph file format: dimacs or colored (overrides config)
        #[arg(short, long)]
        format: Option<GraphFormat>,

        /// RNG seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create example configuration and input files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            config,
            graph1,
            graph2,
            format,
            no_simplify,
            depth,
            output,
            verbose,
        } => encode_command(config, graph1, graph2, format, no_simplify, depth, output, verbose),
        Commands::Sat2graph { input, output, format } => sat2graph_command(input, output, format),
        Commands::Triple {
            config,
            graph,
            format,
            seed,
            output,
        } => triple_command(config, graph, format, seed, output),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn encode_command(
    config_path: PathBuf,
    graph1: Option<PathBuf>,
    graph2: Option<PathBuf>,
    format: Option<GraphFormat>,
    no_simplify: bool,
    depth: Option<usize>,
    output_dir: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("Encoding graph isomorphism as SAT"));

    let mut settings = load_settings(&config_path)?;
    let cli_overrides = CliOverrides {
        simplify: if no_simplify { Some(false) } else { None },
        invariant_depth: depth,
        seed: None,
        format,
        output_dir: output_dir.clone(),
    };
    settings.merge_with_cli(&cli_overrides);
    if let Some(path) = graph1 {
        settings.input.graph1_file = path;
    }
    if let Some(path) = graph2 {
        settings.input.graph2_file = path;
    }
    settings.validate().context("Configuration validation failed")?;

    let g1 = load_graph_from_file(&settings.input.graph1_file, settings.input.format)?;
    let g2 = load_graph_from_file(&settings.input.graph2_file, settings.input.format)?;

    if verbose {
        println!("{}", GraphFormatter::format_summary("G1", &g1));
        println!("{}", GraphFormatter::format_summary("G2", &g2));
        println!();
    }

    let options = EncodeOptions {
        simplify: settings.encoding.simplify,
        invariant_depth: settings.encoding.invariant_depth,
    };
    let start_time = Instant::now();
    let encoding = match GiSatEncoder::new(options).encode(&g1, &g2) {
        Ok(encoding) => encoding,
        Err(err @ (EncodeError::SizeMismatch { .. } | EncodeError::EmptyClause { .. })) => {
            println!("{}", ColorOutput::success(&format!("Graphs are not isomorphic: {}", err)));
            println!("No CNF file was written.");
            return Ok(());
        }
        Err(err) => return Err(err).context("Failed to encode graph pair"),
    };

    let cnf_path = settings.output.output_directory.join(
        settings
            .output
            .cnf_file
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("instance.cnf")),
    );
    let map_path = settings.output.output_directory.join(
        settings
            .output
            .var_map_file
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("instance.map")),
    );
    save_encoding_to_files(&encoding, &cnf_path, &map_path)?;

    let statistics = encoding.statistics();
    println!(
        "{}",
        ColorOutput::success(&format!(
            "Encoded {} variables and {} clauses in {:.3}s",
            encoding.num_vars(),
            encoding.num_clauses(),
            start_time.elapsed().as_secs_f64()
        ))
    );
    println!("CNF written to {}", cnf_path.display());
    println!("Variable map written to {}", map_path.display());

    if verbose {
        println!("\n{}", statistics);
    }
    if settings.output.save_statistics {
        let stats_path = settings.output.output_directory.join("statistics.json");
        let json = serde_json::to_string_pretty(&statistics)
            .context("Failed to serialize encoding statistics")?;
        std::fs::write(&stats_path, json)
            .with_context(|| format!("Failed to write statistics file: {}", stats_path.display()))?;
        println!("Statistics written to {}", stats_path.display());
    }

    Ok(())
}

fn sat2graph_command(input: PathBuf, output: PathBuf, format: GraphFormat) -> Result<()> {
    println!("{}", ColorOutput::info("Converting CNF formula to graph"));

    let sat = load_sat_from_file(&input)?;
    println!(
        "Loaded {} variables, {} clauses from {}",
        sat.num_vars(),
        sat.num_clauses(),
        input.display()
    );

    let graph = encode_sat_as_graph(&sat);
    save_graph_to_file(&graph, &output, format)?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Wrote {} ({})",
            output.display(),
            GraphFormatter::format_summary("graph", &graph)
        ))
    );
    Ok(())
}

fn triple_command(
    config_path: PathBuf,
    graph_path: PathBuf,
    format: Option<GraphFormat>,
    seed: Option<u64>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    println!("{}", ColorOutput::info("Building adversarial graph triple"));

    let mut settings = load_settings(&config_path)?;
    let cli_overrides = CliOverrides {
        simplify: None,
        invariant_depth: None,
        seed,
        format,
        output_dir,
    };
    settings.merge_with_cli(&cli_overrides);
    settings.validate().context("Configuration validation failed")?;

    let mut base = load_graph_from_file(&graph_path, settings.input.format)?;
    let mut rng = match settings.adversarial.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    if let Some(colors_per_group) = settings.adversarial.colors_per_group {
        base = base.with_random_coloring(colors_per_group, &mut rng);
    }

    let start_time = Instant::now();
    let triple = build_triple(&base, &mut rng).context("Failed to build adversarial triple")?;

    let dir = &settings.output.output_directory;
    let format = settings.input.format;
    save_graph_to_file(&triple.a, dir.join("triple_a.col"), format)?;
    save_graph_to_file(&triple.a_prime, dir.join("triple_a_prime.col"), format)?;
    save_graph_to_file(&triple.b, dir.join("triple_b.col"), format)?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Built triple in {:.3}s",
            start_time.elapsed().as_secs_f64()
        ))
    );
    println!("{}", GraphFormatter::format_triple_summary(&triple));
    println!("Files written to {}", dir.display());
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/graphs");
    let output_dir = directory.join("output");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    // Default configuration
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    // Demo graphs: a base graph, an isomorphic copy, and a near-miss copy
    // with one extra vertex, so both answers of the encoder can be exercised.
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let base = Graph::random(8, 0.4, &mut rng);
    let copy = base.isomorphic_copy(&mut rng);
    let near_miss = base.perturbed_copy(&mut rng);

    save_graph_to_file(&base, input_dir.join("example_a.col"), GraphFormat::DimacsEdge)?;
    save_graph_to_file(&copy, input_dir.join("example_b.col"), GraphFormat::DimacsEdge)?;
    save_graph_to_file(&near_miss, input_dir.join("example_c.col"), GraphFormat::DimacsEdge)?;
    println!("Created example graphs in: {}", input_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- encode --config config/default.yaml --verbose");
    println!("3. Run: cargo run -- triple --graph input/graphs/example_a.col --seed 1");

    Ok(())
}
