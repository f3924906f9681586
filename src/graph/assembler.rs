//! Whole-graph assembly
//!
//! Runs every record handler over its table, then finalizes once:
//! deduplicate both collections (first occurrence wins) and drop attribute
//! triples whose subject never shows up in a relationship triple.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use futures::future::try_join_all;

use super::builder::TripleBuilder;
use super::error::{GraphError, GraphResult};
use super::filter::FilterPolicy;
use super::handlers::{default_handlers, run_handler, HandlerOutput, RecordHandler};
use super::stats::GraphStats;
use super::triple::Triple;
use super::vocabulary::Vocabulary;

/// Finalized output of a run
#[derive(Debug, Clone, Default)]
pub struct AssembledGraph {
    /// Entity-to-literal triples
    pub attributes: Vec<Triple>,

    /// Entity-to-entity (and entity-to-type) triples
    pub relationships: Vec<Triple>,

    pub stats: GraphStats,
}

/// Drives the record handlers over an input directory
pub struct GraphAssembler {
    vocab: Arc<Vocabulary>,
    filter: Arc<FilterPolicy>,
    handlers: Vec<Arc<dyn RecordHandler>>,
}

impl GraphAssembler {
    /// Assembler with the standard handler set
    pub fn new(vocab: Vocabulary, filter: FilterPolicy) -> Self {
        Self::with_handlers(vocab, filter, default_handlers())
    }

    pub fn with_handlers(
        vocab: Vocabulary,
        filter: FilterPolicy,
        handlers: Vec<Arc<dyn RecordHandler>>,
    ) -> Self {
        Self {
            vocab: Arc::new(vocab),
            filter: Arc::new(filter),
            handlers,
        }
    }

    pub fn handlers(&self) -> &[Arc<dyn RecordHandler>] {
        &self.handlers
    }

    /// Input paths, one per handler, in run order
    pub fn input_paths(&self, input_dir: &Path) -> Vec<PathBuf> {
        self.handlers
            .iter()
            .map(|h| input_dir.join(h.file_name()))
            .collect()
    }

    /// Run all handlers one after another
    pub fn assemble(&self, input_dir: &Path) -> GraphResult<AssembledGraph> {
        let start = Instant::now();
        let builder = TripleBuilder::new(&self.vocab, &self.filter);

        let mut outputs = Vec::with_capacity(self.handlers.len());
        for handler in &self.handlers {
            let path = input_dir.join(handler.file_name());
            outputs.push(run_handler(handler.as_ref(), &path, &builder)?);
        }

        Ok(self.finish(outputs, start))
    }

    /// Run all handlers concurrently on the blocking pool
    ///
    /// Outputs are merged in handler order, so the result is identical to
    /// [`GraphAssembler::assemble`].
    pub async fn assemble_parallel(&self, input_dir: &Path) -> GraphResult<AssembledGraph> {
        let start = Instant::now();

        let tasks = self.handlers.iter().map(|handler| {
            let handler = Arc::clone(handler);
            let vocab = Arc::clone(&self.vocab);
            let filter = Arc::clone(&self.filter);
            let path = input_dir.join(handler.file_name());
            async move {
                tokio::task::spawn_blocking(move || {
                    let builder = TripleBuilder::new(&vocab, &filter);
                    run_handler(handler.as_ref(), &path, &builder)
                })
                .await
                .map_err(|e| GraphError::Other {
                    context: "Handler task failed".to_string(),
                    source: Some(Box::new(e)),
                })?
            }
        });

        let outputs = try_join_all(tasks).await?;
        Ok(self.finish(outputs, start))
    }

    fn finish(&self, outputs: Vec<HandlerOutput>, start: Instant) -> AssembledGraph {
        let mut stats = GraphStats::default();
        let mut attributes = Vec::new();
        let mut relationships = Vec::new();

        for (handler, output) in self.handlers.iter().zip(outputs) {
            attributes.extend(output.attributes);
            relationships.extend(output.relationships);
            stats.handlers.push((handler.name().to_string(), output.stats));
        }

        let totals = stats.totals();
        for (name, count) in &totals.unknown_predicates {
            tracing::warn!(predicate = %name, count, "Skipped fields with unrecognized predicate");
        }

        let (attributes, relationships) = finalize(attributes, relationships, &mut stats);
        stats.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            attributes = attributes.len(),
            relationships = relationships.len(),
            orphans = stats.orphan_attributes,
            duration_ms = stats.duration_ms,
            "Graph assembled"
        );

        AssembledGraph {
            attributes,
            relationships,
            stats,
        }
    }
}

/// Deduplicate both collections and prune orphan attribute triples
pub fn finalize(
    attributes: Vec<Triple>,
    relationships: Vec<Triple>,
    stats: &mut GraphStats,
) -> (Vec<Triple>, Vec<Triple>) {
    let before = relationships.len();
    let relationships = dedup(relationships);
    stats.duplicate_relationships = before - relationships.len();

    let before = attributes.len();
    let attributes = dedup(attributes);
    stats.duplicate_attributes = before - attributes.len();

    let linked: HashSet<&str> = relationships
        .iter()
        .flat_map(|t| [t.subject.as_str(), t.object.as_str()])
        .collect();

    let before = attributes.len();
    let attributes: Vec<Triple> = attributes
        .into_iter()
        .filter(|t| linked.contains(t.subject.as_str()))
        .collect();
    stats.orphan_attributes = before - attributes.len();

    stats.attribute_triples = attributes.len();
    stats.relationship_triples = relationships.len();

    (attributes, relationships)
}

/// Remove exact duplicates, keeping the first occurrence
pub fn dedup(triples: Vec<Triple>) -> Vec<Triple> {
    let mut seen = HashSet::with_capacity(triples.len());
    triples
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
