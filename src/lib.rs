//! moviegraph - Entity-resolution benchmark triples from IMDB dumps
//!
//! Converts the raw IMDB tab-separated tables into attribute and
//! relationship triples, filtered to an allow-listed entity subset, and
//! reads finished benchmark pairs back for evaluation.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`graph`] - Triple construction, record handlers and graph assembly
//! - [`loading`] - Benchmark pair, link and fold loading
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```no_run
//! use moviegraph::config::Config;
//! use moviegraph::graph::{write_graph, FilterPolicy, GraphAssembler};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let filter = FilterPolicy::from_files(
//!         &config.paths.allowed_file,
//!         &config.paths.excluded_file,
//!     )?;
//!     let assembler = GraphAssembler::new(config.vocabulary.clone(), filter);
//!     let graph = assembler.assemble_parallel(&config.paths.imdb_dir).await?;
//!     for dir in &config.paths.output_dirs {
//!         write_graph(&graph, dir)?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod loading;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, MovieGraphErrorTrait, Result};
    pub use crate::graph::{
        AssembledGraph, FilterPolicy, GraphAssembler, GraphError, GraphStats, Triple, Vocabulary,
    };
    pub use crate::loading::{load_data, DatasetPair, ErData};
}

// Direct re-exports for convenience
pub use graph::{GraphAssembler, Triple};
