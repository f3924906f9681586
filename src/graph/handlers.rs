//! Per-table record handlers
//!
//! Each handler knows one table layout: its file name, its header token,
//! which column gates a row against the allow set, and which fields become
//! attribute or relationship triples. Reading, gating and bookkeeping are
//! shared in [`process_rows`].
//!
//! | handler      | table                  | gate column          |
//! |--------------|------------------------|----------------------|
//! | `person`     | `name.basics.tsv`      | 0 (`nconst`)         |
//! | `title`      | `title.basics.tsv`     | 0 (`tconst`)         |
//! | `episode`    | `title.episode.tsv`    | 1 (`parentTconst`)   |
//! | `principals` | `title.principals.tsv` | 0 (`tconst`)         |
//!
//! The episode gate is the parent show: an episode row is admitted only when
//! its show is in the allow set.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use super::builder::{FieldTriples, SkipReason, TripleBuilder, TITLE_TYPE};
use super::error::GraphResult;
use super::stats::HandlerStats;
use super::table::{RawRow, TableReader};
use super::triple::Triple;
use super::vocabulary::{Datatype, Predicate, TypeClass};

/// Header token shared by all title-keyed tables
const TCONST_HEADER: &str = "tconst\t";

/// Triples and counters produced by one handler
#[derive(Debug, Clone, Default)]
pub struct HandlerOutput {
    pub attributes: Vec<Triple>,
    pub relationships: Vec<Triple>,
    pub stats: HandlerStats,
}

impl HandlerOutput {
    /// Record a field whose triples are attributes
    pub fn attribute(&mut self, field: Result<FieldTriples, SkipReason>) {
        if let Some(triples) = self.record(field) {
            self.stats.attribute_triples += triples.len();
            self.attributes.extend(triples);
        }
    }

    /// Record a field whose triples are relationships
    pub fn relationship(&mut self, field: Result<FieldTriples, SkipReason>) {
        if let Some(triples) = self.record(field) {
            self.stats.relationship_triples += triples.len();
            self.relationships.extend(triples);
        }
    }

    fn record(&mut self, field: Result<FieldTriples, SkipReason>) -> Option<Vec<Triple>> {
        match field {
            Ok(field) => {
                self.stats.filtered_candidates += field.filtered;
                self.stats.empty_list_entries += field.empty_entries;
                Some(field.triples)
            }
            Err(reason) => {
                self.stats.record_skip(&reason);
                None
            }
        }
    }
}

/// Transformation rules for one source table
pub trait RecordHandler: Send + Sync {
    /// Short name used in logs and statistics
    fn name(&self) -> &'static str;

    /// Table file name inside the input directory
    fn file_name(&self) -> &'static str;

    /// Lines starting with this token are headers
    fn header_token(&self) -> &'static str;

    /// Column whose allow-set membership admits the row
    fn gate_column(&self) -> usize {
        0
    }

    /// Turn one admitted row into triples
    fn handle_row(&self, row: &RawRow, builder: &TripleBuilder<'_>, out: &mut HandlerOutput);
}

/// Gate and transform an already-opened row sequence
pub fn process_rows<H, I>(
    handler: &H,
    rows: I,
    builder: &TripleBuilder<'_>,
) -> GraphResult<HandlerOutput>
where
    H: RecordHandler + ?Sized,
    I: IntoIterator<Item = GraphResult<RawRow>>,
{
    let mut out = HandlerOutput::default();
    let gate = handler.gate_column();

    for row in rows {
        let row = row?;
        out.stats.rows_read += 1;
        if !builder.filter().is_allowed(row.field(gate)) {
            continue;
        }
        out.stats.rows_accepted += 1;
        handler.handle_row(&row, builder, &mut out);
    }

    Ok(out)
}

/// Run `handler` over the table at `path`
pub fn run_handler<H>(handler: &H, path: &Path, builder: &TripleBuilder<'_>) -> GraphResult<HandlerOutput>
where
    H: RecordHandler + ?Sized,
{
    let start = Instant::now();
    let reader = TableReader::open(path, handler.header_token())?;
    let out = process_rows(handler, reader, builder)?;

    tracing::info!(
        handler = handler.name(),
        path = %path.display(),
        rows = out.stats.rows_read,
        accepted = out.stats.rows_accepted,
        attributes = out.attributes.len(),
        relationships = out.relationships.len(),
        skipped_fields = out.stats.skipped_fields(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Handler finished"
    );

    Ok(out)
}

/// The standard handler set, in run order
pub fn default_handlers() -> Vec<Arc<dyn RecordHandler>> {
    vec![
        Arc::new(PersonHandler),
        Arc::new(TitleHandler),
        Arc::new(EpisodeHandler),
        Arc::new(PrincipalsHandler),
    ]
}

// ============================================================================
// Person
// ============================================================================

/// `name.basics.tsv`: nconst, primaryName, birthYear, deathYear,
/// primaryProfession, knownForTitles
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonHandler;

impl RecordHandler for PersonHandler {
    fn name(&self) -> &'static str {
        "person"
    }

    fn file_name(&self) -> &'static str {
        "name.basics.tsv"
    }

    fn header_token(&self) -> &'static str {
        "nconst\t"
    }

    fn handle_row(&self, row: &RawRow, builder: &TripleBuilder<'_>, out: &mut HandlerOutput) {
        let id = row.field(0);

        for (predicate, column, multiple, datatype) in [
            (Predicate::PrimaryName, 1, false, None),
            (Predicate::BirthYear, 2, false, Some(Datatype::Date)),
            (Predicate::DeathYear, 3, false, Some(Datatype::Date)),
            (Predicate::PrimaryProfession, 4, true, None),
        ] {
            out.attribute(builder.build(id, predicate.name(), row.field(column), multiple, datatype));
        }

        out.relationship(builder.build(
            id,
            Predicate::KnownForTitles.name(),
            row.field(5),
            true,
            None,
        ));
        out.relationship(Ok(builder.classify(id, TypeClass::Person)));
    }
}

// ============================================================================
// Title
// ============================================================================

/// `title.basics.tsv`: tconst, titleType, primaryTitle, originalTitle,
/// isAdult, startYear, endYear, runtimeMinutes, genres
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleHandler;

impl RecordHandler for TitleHandler {
    fn name(&self) -> &'static str {
        "title"
    }

    fn file_name(&self) -> &'static str {
        "title.basics.tsv"
    }

    fn header_token(&self) -> &'static str {
        TCONST_HEADER
    }

    fn handle_row(&self, row: &RawRow, builder: &TripleBuilder<'_>, out: &mut HandlerOutput) {
        let id = row.field(0);

        out.relationship(builder.build(id, TITLE_TYPE, row.field(1), false, None));

        // genres stays one comma-joined literal
        for (predicate, column, datatype) in [
            (Predicate::PrimaryTitle, 2, None),
            (Predicate::OriginalTitle, 3, None),
            (Predicate::IsAdult, 4, None),
            (Predicate::StartYear, 5, Some(Datatype::Date)),
            (Predicate::EndYear, 6, Some(Datatype::Date)),
            (Predicate::RuntimeMinutes, 7, None),
            (Predicate::Genres, 8, None),
        ] {
            out.attribute(builder.build(id, predicate.name(), row.field(column), false, datatype));
        }
    }
}

// ============================================================================
// Episode
// ============================================================================

/// `title.episode.tsv`: tconst, parentTconst, seasonNumber, episodeNumber
#[derive(Debug, Clone, Copy, Default)]
pub struct EpisodeHandler;

impl RecordHandler for EpisodeHandler {
    fn name(&self) -> &'static str {
        "episode"
    }

    fn file_name(&self) -> &'static str {
        "title.episode.tsv"
    }

    fn header_token(&self) -> &'static str {
        TCONST_HEADER
    }

    fn gate_column(&self) -> usize {
        1
    }

    fn handle_row(&self, row: &RawRow, builder: &TripleBuilder<'_>, out: &mut HandlerOutput) {
        let id = row.field(0);

        out.relationship(builder.build(
            id,
            Predicate::EpisodeOf.name(),
            row.field(1),
            false,
            None,
        ));
        out.relationship(Ok(builder.classify(id, TypeClass::TelevisionEpisode)));

        for (predicate, column) in [(Predicate::SeasonNumber, 2), (Predicate::EpisodeNumber, 3)] {
            out.attribute(builder.build(
                id,
                predicate.name(),
                row.field(column),
                false,
                Some(Datatype::NonNegativeInteger),
            ));
        }
    }
}

// ============================================================================
// Principals
// ============================================================================

/// `title.principals.tsv`: tconst, ordering, nconst, category, job,
/// characters
#[derive(Debug, Clone, Copy, Default)]
pub struct PrincipalsHandler;

impl RecordHandler for PrincipalsHandler {
    fn name(&self) -> &'static str {
        "principals"
    }

    fn file_name(&self) -> &'static str {
        "title.principals.tsv"
    }

    fn header_token(&self) -> &'static str {
        TCONST_HEADER
    }

    fn handle_row(&self, row: &RawRow, builder: &TripleBuilder<'_>, out: &mut HandlerOutput) {
        // person participates in title: reversed relative to column order
        out.relationship(builder.build(
            row.field(2),
            Predicate::ParticipatedIn.name(),
            row.field(0),
            false,
            None,
        ));
    }
}
