use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use moviegraph::config::Config;
use moviegraph::graph::{is_written, write_graph, FilterPolicy, GraphAssembler, GraphStats};

/// Parameters for the create command
#[derive(Debug, Clone)]
pub struct CreateParams {
    pub input: Option<PathBuf>,
    pub output: Vec<PathBuf>,
    pub parallel: bool,
    pub force: bool,
    pub stats: bool,
}

/// JSON run report printed with `--stats`
#[derive(Debug, Serialize)]
struct RunReport<'a> {
    generated_at: String,
    input_dir: &'a PathBuf,
    output_dirs: &'a [PathBuf],
    parallel: bool,
    stats: &'a GraphStats,
}

pub async fn create(mut config: Config, params: CreateParams) -> Result<()> {
    if let Some(input) = params.input {
        config.paths.imdb_dir = input;
    }
    if !params.output.is_empty() {
        config.paths.output_dirs = params.output;
    }
    config.engine.parallel |= params.parallel;
    config.validate()?;

    let output_dirs = &config.paths.output_dirs;
    if !params.force && output_dirs.iter().all(|dir| is_written(dir)) {
        tracing::info!(dirs = ?output_dirs, "Triple files already present, skipping");
        println!("Triples already written; pass --force to regenerate.");
        return Ok(());
    }

    println!("Creating benchmark triples");
    println!("==========================");
    println!("  Input:    {}", config.paths.imdb_dir.display());

    let filter = FilterPolicy::from_files(&config.paths.allowed_file, &config.paths.excluded_file)
        .context("Failed to load filter sets")?;

    let assembler = GraphAssembler::new(config.vocabulary.clone(), filter);
    let graph = if config.engine.parallel {
        assembler.assemble_parallel(&config.paths.imdb_dir).await?
    } else {
        assembler.assemble(&config.paths.imdb_dir)?
    };

    for dir in output_dirs {
        write_graph(&graph, dir)
            .with_context(|| format!("Failed to write triples to {}", dir.display()))?;
        println!("  Output:   {}", dir.display());
    }

    println!();
    println!("  Attribute triples:    {}", graph.attributes.len());
    println!("  Relationship triples: {}", graph.relationships.len());
    println!("  Orphans pruned:       {}", graph.stats.orphan_attributes);
    println!("  Duration:             {} ms", graph.stats.duration_ms);

    if params.stats {
        let report = RunReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            input_dir: &config.paths.imdb_dir,
            output_dirs,
            parallel: config.engine.parallel,
            stats: &graph.stats,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
