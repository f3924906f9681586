//! End-to-end graph construction tests
//!
//! Each test lays out a small IMDB dump in a temp dir, runs the assembler
//! and checks the finalized triple collections.

use moviegraph::graph::{write_graph, Triple, Vocabulary};
use moviegraph::loading::read_triples;

use crate::common::{res, ImdbFixture};

fn date(value: &str) -> String {
    format!("\"{value}\"^^<http://www.w3.org/2001/XMLSchema#date>")
}

fn non_negative(value: &str) -> String {
    format!("\"{value}\"^^<http://www.w3.org/2001/XMLSchema#nonNegativeInteger>")
}

// ============================================================================
// Person Table
// ============================================================================

#[test]
fn test_person_row_end_to_end() {
    let fixture = ImdbFixture::new();
    fixture
        .person_rows(&["nm1\tJohn\t1950\t\\N\tactor\t[tt1]"])
        .allowed(&["nm1", "tt1"]);

    let vocab = Vocabulary::default();
    let graph = fixture.assembler().assemble(&fixture.imdb_dir()).unwrap();

    assert_eq!(
        graph.attributes,
        vec![
            Triple::new(res("nm1"), &vocab.predicates.primary_name, "John"),
            Triple::new(res("nm1"), &vocab.predicates.birth_year, date("1950-01-01")),
            Triple::new(res("nm1"), &vocab.predicates.primary_profession, "actor"),
        ]
    );
    assert_eq!(
        graph.relationships,
        vec![
            Triple::new(res("nm1"), &vocab.predicates.known_for_titles, res("tt1")),
            Triple::new(res("nm1"), &vocab.predicates.rdf_type, &vocab.types.person),
        ]
    );

    let person = graph.stats.handler("person").unwrap();
    assert_eq!(person.rows_read, 1);
    assert_eq!(person.rows_accepted, 1);
    assert_eq!(person.null_fields, 1);
}

#[test]
fn test_unbracketed_profession_is_single_value() {
    let fixture = ImdbFixture::new();
    fixture
        .person_rows(&["nm1\tJohn\t\\N\t\\N\tactor,director\t\\N"])
        .allowed(&["nm1"]);

    let vocab = Vocabulary::default();
    let graph = fixture.assembler().assemble(&fixture.imdb_dir()).unwrap();

    let professions: Vec<&Triple> = graph
        .attributes
        .iter()
        .filter(|t| t.predicate == vocab.predicates.primary_profession)
        .collect();
    assert_eq!(professions.len(), 1);
    assert_eq!(professions[0].object, "actor,director");
}

#[test]
fn test_known_for_list_respects_allow_set() {
    let fixture = ImdbFixture::new();
    fixture
        .person_rows(&["nm1\tJohn\t\\N\t\\N\t\\N\t['tt1', 'tt2', 'tt3']"])
        .allowed(&["nm1", "tt1", "tt3"]);

    let vocab = Vocabulary::default();
    let graph = fixture.assembler().assemble(&fixture.imdb_dir()).unwrap();

    let titles: Vec<&str> = graph
        .relationships
        .iter()
        .filter(|t| t.predicate == vocab.predicates.known_for_titles)
        .map(|t| t.object.as_str())
        .collect();
    assert_eq!(titles, vec![res("tt1"), res("tt3")]);
    assert_eq!(graph.stats.handler("person").unwrap().filtered_candidates, 1);
}

#[test]
fn test_empty_and_null_list_entries_never_emitted() {
    let fixture = ImdbFixture::new();
    fixture
        .person_rows(&["nm1\tJohn\t\\N\t\\N\t['actor', '']\t[tt1, \\N]"])
        .allowed(&["nm1", "tt1"]);

    let vocab = Vocabulary::default();
    let graph = fixture.assembler().assemble(&fixture.imdb_dir()).unwrap();

    for triple in graph.attributes.iter().chain(&graph.relationships) {
        assert!(!triple.object.is_empty(), "empty object in {triple}");
        assert_ne!(triple.object, "\\N");
    }
    assert!(graph
        .attributes
        .contains(&Triple::new(res("nm1"), &vocab.predicates.primary_profession, "actor")));
    assert!(graph
        .relationships
        .contains(&Triple::new(res("nm1"), &vocab.predicates.known_for_titles, res("tt1"))));
    assert_eq!(graph.stats.handler("person").unwrap().empty_list_entries, 2);
}

#[test]
fn test_rows_outside_allow_set_are_ignored() {
    let fixture = ImdbFixture::new();
    fixture
        .person_rows(&[
            "nm1\tJohn\t\\N\t\\N\t\\N\t\\N",
            "nm2\tJane\t1960\t\\N\t\\N\t\\N",
        ])
        .allowed(&["nm1"]);

    let graph = fixture.assembler().assemble(&fixture.imdb_dir()).unwrap();

    assert!(graph.attributes.iter().all(|t| t.subject == res("nm1")));
    assert!(graph.relationships.iter().all(|t| t.subject == res("nm1")));
    let person = graph.stats.handler("person").unwrap();
    assert_eq!(person.rows_read, 2);
    assert_eq!(person.rows_accepted, 1);
}

// ============================================================================
// Title Table
// ============================================================================

#[test]
fn test_title_row_end_to_end() {
    let fixture = ImdbFixture::new();
    fixture
        .title_rows(&["tt1\tmovie\tHeat\tHeat\t0\t1995\t\\N\t170\tCrime,Drama"])
        .allowed(&["tt1"]);

    let vocab = Vocabulary::default();
    let graph = fixture.assembler().assemble(&fixture.imdb_dir()).unwrap();

    assert_eq!(
        graph.relationships,
        vec![Triple::new(res("tt1"), &vocab.predicates.rdf_type, &vocab.types.film)]
    );
    assert_eq!(
        graph.attributes,
        vec![
            Triple::new(res("tt1"), &vocab.predicates.primary_title, "Heat"),
            Triple::new(res("tt1"), &vocab.predicates.original_title, "Heat"),
            Triple::new(res("tt1"), &vocab.predicates.is_adult, "0"),
            Triple::new(res("tt1"), &vocab.predicates.start_year, date("1995-01-01")),
            Triple::new(res("tt1"), &vocab.predicates.runtime_minutes, "170"),
            Triple::new(res("tt1"), &vocab.predicates.genres, "Crime,Drama"),
        ]
    );
    assert_eq!(graph.stats.handler("title").unwrap().null_fields, 1);
}

#[test]
fn test_title_type_classification() {
    let fixture = ImdbFixture::new();
    fixture
        .title_rows(&[
            "tt1\tvideoGame\tA\tA\t0\t\\N\t\\N\t\\N\t\\N",
            "tt2\ttvEpisode\tB\tB\t0\t\\N\t\\N\t\\N\t\\N",
            "tt3\ttvSeries\tC\tC\t0\t\\N\t\\N\t\\N\t\\N",
            "tt4\ttvShort\tD\tD\t0\t\\N\t\\N\t\\N\t\\N",
        ])
        .allowed(&["tt1", "tt2", "tt3", "tt4"]);

    let vocab = Vocabulary::default();
    let graph = fixture.assembler().assemble(&fixture.imdb_dir()).unwrap();

    let type_of = |id: &str| {
        graph
            .relationships
            .iter()
            .find(|t| t.subject == res(id) && t.predicate == vocab.predicates.rdf_type)
            .map(|t| t.object.clone())
    };
    assert_eq!(type_of("tt1"), Some(vocab.types.film.clone()));
    assert_eq!(type_of("tt2"), Some(vocab.types.television_episode.clone()));
    assert_eq!(type_of("tt3"), Some(vocab.types.television_show.clone()));
    assert_eq!(type_of("tt4"), Some(vocab.types.film.clone()));
}

// ============================================================================
// Episode Table
// ============================================================================

#[test]
fn test_episode_row_end_to_end() {
    let fixture = ImdbFixture::new();
    fixture
        .episode_rows(&["tt2\ttt1\t1\t3"])
        .allowed(&["tt1", "tt2"]);

    let vocab = Vocabulary::default();
    let graph = fixture.assembler().assemble(&fixture.imdb_dir()).unwrap();

    assert_eq!(
        graph.relationships,
        vec![
            Triple::new(res("tt2"), &vocab.predicates.episode_of, res("tt1")),
            Triple::new(
                res("tt2"),
                &vocab.predicates.rdf_type,
                &vocab.types.television_episode
            ),
        ]
    );
    assert_eq!(
        graph.attributes,
        vec![
            Triple::new(res("tt2"), &vocab.predicates.season_number, non_negative("1")),
            Triple::new(res("tt2"), &vocab.predicates.episode_number, non_negative("3")),
        ]
    );
}

#[test]
fn test_episode_gated_on_parent() {
    let fixture = ImdbFixture::new();
    fixture
        .episode_rows(&["tt2\ttt9\t1\t3"])
        .allowed(&["tt2"]);

    let graph = fixture.assembler().assemble(&fixture.imdb_dir()).unwrap();

    assert!(graph.attributes.is_empty());
    assert!(graph.relationships.is_empty());
    let episode = graph.stats.handler("episode").unwrap();
    assert_eq!(episode.rows_read, 1);
    assert_eq!(episode.rows_accepted, 0);
}

#[test]
fn test_episode_with_allowed_parent_but_unknown_self() {
    let fixture = ImdbFixture::new();
    fixture
        .episode_rows(&["tt3\ttt1\t1\t2"])
        .allowed(&["tt1"]);

    let graph = fixture.assembler().assemble(&fixture.imdb_dir()).unwrap();

    // admitted by the parent, then every candidate fails the subject check
    assert_eq!(graph.stats.handler("episode").unwrap().rows_accepted, 1);
    assert!(graph.relationships.is_empty());
    assert!(graph.attributes.is_empty());
}

// ============================================================================
// Principals Table and Cross-Handler Behaviour
// ============================================================================

#[test]
fn test_principals_respect_exclusions() {
    let fixture = ImdbFixture::new();
    fixture
        .principals_rows(&[
            "tt1\t1\tnm1\tactor\t\\N\t[\"Neil\"]",
            "tt2\t1\tnm1\tactor\t\\N\t\\N",
        ])
        .allowed(&["nm1", "tt1", "tt2"])
        .excluded(&[("nm1", "tt2")]);

    let vocab = Vocabulary::default();
    let graph = fixture.assembler().assemble(&fixture.imdb_dir()).unwrap();

    assert_eq!(
        graph.relationships,
        vec![Triple::new(res("nm1"), &vocab.predicates.participated_in, res("tt1"))]
    );
}

#[test]
fn test_duplicates_across_handlers_collapse() {
    let fixture = ImdbFixture::new();
    fixture
        .person_rows(&["nm1\tJohn\t\\N\t\\N\t\\N\t[tt1]"])
        .principals_rows(&["tt1\t1\tnm1\tactor\t\\N\t\\N"])
        .allowed(&["nm1", "tt1"]);

    let vocab = Vocabulary::default();
    let graph = fixture.assembler().assemble(&fixture.imdb_dir()).unwrap();

    let participations = graph
        .relationships
        .iter()
        .filter(|t| t.predicate == vocab.predicates.participated_in)
        .count();
    assert_eq!(participations, 1);
    assert_eq!(graph.stats.duplicate_relationships, 1);
}

#[test]
fn test_orphan_attributes_pruned() {
    let fixture = ImdbFixture::new();
    fixture
        .title_rows(&[
            "tt1\tmovie\tKept\tKept\t0\t\\N\t\\N\t\\N\t\\N",
            "tt5\t\\N\tOrphan\tOrphan\t0\t\\N\t\\N\t\\N\t\\N",
        ])
        .allowed(&["tt1", "tt5"]);

    let graph = fixture.assembler().assemble(&fixture.imdb_dir()).unwrap();

    assert!(graph.attributes.iter().all(|t| t.subject == res("tt1")));
    assert_eq!(graph.attributes.len(), 3);
    assert_eq!(graph.stats.orphan_attributes, 3);
    assert_eq!(graph.stats.attribute_triples, 3);
}

#[test]
fn test_every_attribute_subject_is_linked() {
    let fixture = ImdbFixture::new();
    fixture
        .person_rows(&[
            "nm1\tJohn\t1950\t\\N\tactor\t[tt1]",
            "nm2\tJane\t1960\t2010\tdirector\t\\N",
        ])
        .title_rows(&[
            "tt1\tmovie\tHeat\tHeat\t0\t1995\t\\N\t170\tCrime",
            "tt2\t\\N\tLost\tLost\t0\t\\N\t\\N\t\\N\t\\N",
        ])
        .episode_rows(&["tt3\ttt1\t1\t1"])
        .principals_rows(&["tt1\t2\tnm2\tdirector\t\\N\t\\N"])
        .allowed(&["nm1", "nm2", "tt1", "tt2", "tt3"]);

    let graph = fixture.assembler().assemble(&fixture.imdb_dir()).unwrap();

    for attribute in &graph.attributes {
        assert!(
            graph
                .relationships
                .iter()
                .any(|r| r.subject == attribute.subject || r.object == attribute.subject),
            "orphan attribute {attribute}"
        );
    }
}

#[tokio::test]
async fn test_parallel_matches_sequential() {
    let fixture = ImdbFixture::new();
    fixture
        .person_rows(&[
            "nm1\tJohn\t1950\t\\N\tactor\t[tt1,tt2]",
            "nm2\tJane\t1960\t2010\t[director, writer]\t[tt2]",
        ])
        .title_rows(&[
            "tt1\tmovie\tHeat\tHeat\t0\t1995\t\\N\t170\tCrime",
            "tt2\ttvSeries\tShow\tShow\t0\t2001\t2004\t45\tDrama",
        ])
        .episode_rows(&["tt3\ttt2\t1\t1", "tt4\ttt2\t1\t2"])
        .principals_rows(&["tt1\t1\tnm1\tactor\t\\N\t\\N", "tt2\t1\tnm2\tdirector\t\\N\t\\N"])
        .allowed(&["nm1", "nm2", "tt1", "tt2", "tt3"])
        .excluded(&[("nm1", "tt2")]);

    let assembler = fixture.assembler();
    let sequential = assembler.assemble(&fixture.imdb_dir()).unwrap();
    let parallel = assembler.assemble_parallel(&fixture.imdb_dir()).await.unwrap();

    assert_eq!(sequential.attributes, parallel.attributes);
    assert_eq!(sequential.relationships, parallel.relationships);
    assert_eq!(sequential.stats.handlers, parallel.stats.handlers);
}

#[test]
fn test_written_graph_reads_back() {
    let fixture = ImdbFixture::new();
    fixture
        .person_rows(&["nm1\tJohn\t1950\t\\N\tactor\t[tt1]"])
        .title_rows(&["tt1\tshort\tTiny\tTiny\t0\t1999\t\\N\t5\t\\N"])
        .allowed(&["nm1", "tt1"]);

    let graph = fixture.assembler().assemble(&fixture.imdb_dir()).unwrap();
    let out_dir = fixture.data_dir().join("imdb-tmdb");
    write_graph(&graph, &out_dir).unwrap();

    assert_eq!(read_triples(&out_dir.join("attr_triples_1")).unwrap(), graph.attributes);
    assert_eq!(read_triples(&out_dir.join("rel_triples_1")).unwrap(), graph.relationships);
}
