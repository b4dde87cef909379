//! saidman-pool CLI - generate synthetic kidney-exchange pools.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use saidman_pool_core::{get_pool_data_synthetic, GeneratorConfig};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "saidman-pool")]
#[command(version)]
#[command(about = "Synthetic kidney-exchange pools from the Saidman model")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a pool and its compatibility matrices as JSON
    Generate {
        /// Number of incompatible patient-donor pairs
        #[arg(short, long)]
        pairs: Option<usize>,

        /// Number of altruist donors
        #[arg(short, long)]
        altruists: Option<usize>,

        /// RNG seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON configuration file; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print the default configuration
    ExampleConfig,
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")
}

fn load_config(path: Option<&PathBuf>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))
        }
        None => Ok(GeneratorConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Generate {
            pairs,
            altruists,
            seed,
            config,
            output,
            pretty,
        } => {
            let mut config = load_config(config.as_ref())?;
            if let Some(pairs) = pairs {
                config.num_pairs = pairs;
            }
            if let Some(altruists) = altruists {
                config.num_altruists = altruists;
            }
            if let Some(seed) = seed {
                config.seed = seed;
            }

            let data = get_pool_data_synthetic(&config).context("Pool generation failed")?;
            let digest = data.digest()?;
            info!(
                participants = data.num_participants(),
                edges = data.edges.count_edges(),
                %digest,
                "Generated pool"
            );

            let document = serde_json::json!({
                "config": config,
                "digest": digest,
                "data": data,
            });
            let json = if pretty {
                serde_json::to_string_pretty(&document)?
            } else {
                serde_json::to_string(&document)?
            };

            match output {
                Some(path) => fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => writeln!(std::io::stdout(), "{}", json)?,
            }
        }
        Commands::ExampleConfig => {
            let json = serde_json::to_string_pretty(&GeneratorConfig::default())?;
            writeln!(std::io::stdout(), "{}", json)?;
        }
    }

    Ok(())
}
