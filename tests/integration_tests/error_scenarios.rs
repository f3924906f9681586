//! Error scenario integration tests
//!
//! Tests the failure modes of a run:
//! 1. Missing input tables and filter files (fatal)
//! 2. Malformed filter files (fatal)
//! 3. Malformed fields, lists and predicates (skipped and counted)

use std::fs;
use std::sync::Arc;

use moviegraph::error::{Error, ErrorCategory, MovieGraphErrorTrait};
use moviegraph::graph::{
    FilterPolicy, GraphAssembler, GraphError, HandlerOutput, PersonHandler, RawRow,
    RecordHandler, TripleBuilder, Vocabulary,
};

use crate::common::ImdbFixture;

// ============================================================================
// Fatal Errors
// ============================================================================

#[test]
fn test_missing_table_is_fatal() {
    let fixture = ImdbFixture::new();
    fs::remove_file(fixture.imdb_dir().join("title.basics.tsv")).unwrap();

    let err = fixture
        .assembler()
        .assemble(&fixture.imdb_dir())
        .unwrap_err();

    match err {
        GraphError::InputNotFound { path } => assert!(path.ends_with("title.basics.tsv")),
        other => panic!("expected InputNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_table_is_fatal_in_parallel() {
    let fixture = ImdbFixture::new();
    fs::remove_file(fixture.imdb_dir().join("title.principals.tsv")).unwrap();

    let err = fixture
        .assembler()
        .assemble_parallel(&fixture.imdb_dir())
        .await
        .unwrap_err();

    assert!(matches!(err, GraphError::InputNotFound { .. }));
}

#[test]
fn test_missing_allowed_file_is_fatal() {
    let fixture = ImdbFixture::new();
    fs::remove_file(fixture.allowed_file()).unwrap();

    let err = FilterPolicy::from_files(&fixture.allowed_file(), &fixture.excluded_file())
        .unwrap_err();
    assert!(err.is_input_error());

    let unified: Error = err.into();
    assert_eq!(unified.category(), ErrorCategory::Input);
    assert!(!unified.is_recoverable());
}

#[test]
fn test_malformed_exclude_line_is_fatal() {
    let fixture = ImdbFixture::new();
    fs::write(fixture.excluded_file(), "nm1\ttt1\nnm2 tt2\n").unwrap();

    let err = FilterPolicy::from_files(&fixture.allowed_file(), &fixture.excluded_file())
        .unwrap_err();
    assert!(matches!(err, GraphError::MalformedRecord { line: 2, .. }));
}

// ============================================================================
// Counted Skips
// ============================================================================

#[test]
fn test_malformed_list_is_counted() {
    let fixture = ImdbFixture::new();
    fixture
        .person_rows(&["nm1\tJohn\t\\N\t\\N\t\\N\t[tt1, 'tt2"])
        .allowed(&["nm1", "tt1", "tt2"]);

    let graph = fixture.assembler().assemble(&fixture.imdb_dir()).unwrap();

    let person = graph.stats.handler("person").unwrap();
    assert_eq!(person.malformed_lists, 1);
    // the name and the type triple survive
    assert_eq!(graph.attributes.len(), 1);
    assert_eq!(graph.relationships.len(), 1);
}

#[test]
fn test_short_row_fields_are_malformed() {
    let fixture = ImdbFixture::new();
    fixture.person_rows(&["nm1\tJohn"]).allowed(&["nm1"]);

    let graph = fixture.assembler().assemble(&fixture.imdb_dir()).unwrap();

    let person = graph.stats.handler("person").unwrap();
    assert_eq!(person.malformed_fields, 4);
    assert_eq!(graph.attributes.len(), 1);
}

/// Emits a field under a predicate name the engine does not know
struct LegacyHandler;

impl RecordHandler for LegacyHandler {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn file_name(&self) -> &'static str {
        "name.basics.tsv"
    }

    fn header_token(&self) -> &'static str {
        "nconst\t"
    }

    fn handle_row(&self, row: &RawRow, builder: &TripleBuilder<'_>, out: &mut HandlerOutput) {
        out.attribute(builder.build(row.field(0), "nickName", row.field(1), false, None));
    }
}

#[test]
fn test_unknown_predicate_is_counted_not_fatal() {
    let fixture = ImdbFixture::new();
    fixture
        .person_rows(&["nm1\tJohn\t\\N\t\\N\t\\N\t\\N", "nm2\tJane\t\\N\t\\N\t\\N\t\\N"])
        .allowed(&["nm1", "nm2"]);

    let assembler = GraphAssembler::with_handlers(
        Vocabulary::default(),
        fixture.filter(),
        vec![Arc::new(PersonHandler), Arc::new(LegacyHandler)],
    );
    let graph = assembler.assemble(&fixture.imdb_dir()).unwrap();

    let legacy = graph.stats.handler("legacy").unwrap();
    assert_eq!(legacy.unknown_predicates.get("nickName"), Some(&2));
    assert_eq!(graph.stats.totals().skipped_fields(), legacy.skipped_fields() + 8);
}
