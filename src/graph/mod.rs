//! Triple generation from IMDB-style tabular dumps
//!
//! This module turns the raw `*.tsv` tables into the two triple collections
//! of the benchmark: attribute triples (entity to literal) and relationship
//! triples (entity to entity or type).
//!
//! # Submodules
//!
//! - [`identifier`] - Person/title identifier recognition and the `\N` marker
//! - [`vocabulary`] - Closed predicate set, type classes, datatype tags, URIs
//! - [`filter`] - Allow set, exclude set and the write decision
//! - [`normalize`] - Year widening, datatype tagging, list expansion
//! - [`builder`] - Field-to-triples construction
//! - [`table`] - Tab-separated table reading
//! - [`handlers`] - Per-table transformation rules
//! - [`assembler`] - Whole-run driver with dedup and orphan pruning
//! - [`writer`] - Triple file output
//! - [`stats`] - Run statistics
//! - [`error`] - Custom error types for graph operations
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use moviegraph::graph::{write_graph, FilterPolicy, GraphAssembler, Vocabulary};
//!
//! # fn main() -> Result<(), moviegraph::graph::GraphError> {
//! let filter = FilterPolicy::from_files(
//!     Path::new("data/imdb/allowed"),
//!     Path::new("data/imdb/exclude"),
//! )?;
//! let assembler = GraphAssembler::new(Vocabulary::default(), filter);
//! let graph = assembler.assemble(Path::new("data/imdb"))?;
//! write_graph(&graph, Path::new("data/imdb-tmdb"))?;
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod builder;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod identifier;
pub mod normalize;
pub mod stats;
pub mod table;
pub mod triple;
pub mod vocabulary;
pub mod writer;

pub use assembler::{dedup, finalize, AssembledGraph, GraphAssembler};
pub use builder::{resolve_predicate, FieldTriples, PredicateResolution, SkipReason, TripleBuilder};
pub use error::{GraphError, GraphResult};
pub use filter::{AllowSet, ExcludeSet, FilterPolicy};
pub use handlers::{
    default_handlers, process_rows, run_handler, EpisodeHandler, HandlerOutput, PersonHandler,
    PrincipalsHandler, RecordHandler, TitleHandler,
};
pub use identifier::{classify, is_identifier, is_null_marker, IdentifierKind, NULL_MARKER};
pub use stats::{GraphStats, HandlerStats};
pub use table::{RawRow, TableReader};
pub use triple::Triple;
pub use vocabulary::{Datatype, Predicate, TypeClass, UnknownPredicate, Vocabulary};
pub use writer::{is_written, write_files, write_graph, ATTR_TRIPLES_FILE, REL_TRIPLES_FILE};
