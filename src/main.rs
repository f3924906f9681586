use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moviegraph::config::Config;

mod commands;

use commands::{create, load, CreateParams};

#[derive(Parser)]
#[command(
    name = "moviegraph",
    version,
    about = "Builds entity-resolution benchmark triples from IMDB tabular dumps",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); defaults to the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Configuration file (TOML); environment variables are used otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate attribute and relationship triples from the IMDB tables
    Create {
        /// Directory holding the *.tsv tables
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory (repeatable)
        #[arg(short, long)]
        output: Vec<PathBuf>,

        /// Run the record handlers concurrently
        #[arg(long, default_value = "false")]
        parallel: bool,

        /// Regenerate even if the triple files already exist
        #[arg(long, default_value = "false")]
        force: bool,

        /// Print a JSON run report
        #[arg(long, default_value = "false")]
        stats: bool,
    },

    /// Load a benchmark pair and summarize it
    Load {
        /// Pair to load (imdb-tmdb, imdb-tvdb, tmdb-tvdb)
        #[arg(short, long, default_value = "imdb-tmdb")]
        pair: String,

        /// Benchmark data root
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    // Initialize tracing/logging
    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&log_format, &config.logging.level, cli.verbose)?;

    tracing::info!("moviegraph starting");

    match cli.command {
        Commands::Create {
            input,
            output,
            parallel,
            force,
            stats,
        } => {
            tracing::info!(
                input = ?input,
                output = ?output,
                parallel = %parallel,
                force = %force,
                "Starting create command"
            );
            let params = CreateParams {
                input,
                output,
                parallel,
                force,
                stats,
            };
            create(config, params).await?;
        }

        Commands::Load {
            pair,
            data_dir,
            json,
        } => {
            tracing::info!(pair = %pair, data_dir = ?data_dir, "Starting load command");
            load(config, pair, data_dir, json).await?;
        }
    }

    tracing::info!("moviegraph completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("moviegraph=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("moviegraph={level},warn"))?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
