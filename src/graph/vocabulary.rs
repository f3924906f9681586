//! Output vocabulary
//!
//! The set of predicate names understood by the engine is closed: every
//! input column the record handlers know about maps to exactly one
//! [`Predicate`]. The URIs those predicates (and the type classes and
//! datatype tags) are written as live in a [`Vocabulary`], which is loaded
//! once from configuration and passed explicitly to the builder.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Predicate name that is not part of the closed vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPredicate(pub String);

impl fmt::Display for UnknownPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized predicate '{}'", self.0)
    }
}

impl std::error::Error for UnknownPredicate {}

/// Closed set of source predicate names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Predicate {
    BirthYear,
    DeathYear,
    EpisodeNumber,
    SeasonNumber,
    EndYear,
    Genres,
    IsAdult,
    PrimaryName,
    OriginalTitle,
    PrimaryProfession,
    RuntimeMinutes,
    StartYear,
    PrimaryTitle,
    EpisodeOf,
    ParticipatedIn,
    KnownForTitles,
    Type,
}

impl Predicate {
    /// All predicates, in declaration order
    pub const ALL: [Predicate; 17] = [
        Predicate::BirthYear,
        Predicate::DeathYear,
        Predicate::EpisodeNumber,
        Predicate::SeasonNumber,
        Predicate::EndYear,
        Predicate::Genres,
        Predicate::IsAdult,
        Predicate::PrimaryName,
        Predicate::OriginalTitle,
        Predicate::PrimaryProfession,
        Predicate::RuntimeMinutes,
        Predicate::StartYear,
        Predicate::PrimaryTitle,
        Predicate::EpisodeOf,
        Predicate::ParticipatedIn,
        Predicate::KnownForTitles,
        Predicate::Type,
    ];

    /// Source column name, as it appears in the dumps' headers
    pub fn name(&self) -> &'static str {
        match self {
            Predicate::BirthYear => "birthYear",
            Predicate::DeathYear => "deathYear",
            Predicate::EpisodeNumber => "episodeNumber",
            Predicate::SeasonNumber => "seasonNumber",
            Predicate::EndYear => "endYear",
            Predicate::Genres => "genres",
            Predicate::IsAdult => "isAdult",
            Predicate::PrimaryName => "primaryName",
            Predicate::OriginalTitle => "originalTitle",
            Predicate::PrimaryProfession => "primaryProfession",
            Predicate::RuntimeMinutes => "runtimeMinutes",
            Predicate::StartYear => "startYear",
            Predicate::PrimaryTitle => "primaryTitle",
            Predicate::EpisodeOf => "episodeOf",
            Predicate::ParticipatedIn => "participatedIn",
            Predicate::KnownForTitles => "knownForTitles",
            Predicate::Type => "type",
        }
    }

    /// Output URI for this predicate under `vocab`
    pub fn uri<'a>(&self, vocab: &'a Vocabulary) -> &'a str {
        let p = &vocab.predicates;
        match self {
            Predicate::BirthYear => &p.birth_year,
            Predicate::DeathYear => &p.death_year,
            Predicate::EpisodeNumber => &p.episode_number,
            Predicate::SeasonNumber => &p.season_number,
            Predicate::EndYear => &p.end_year,
            Predicate::Genres => &p.genres,
            Predicate::IsAdult => &p.is_adult,
            Predicate::PrimaryName => &p.primary_name,
            Predicate::OriginalTitle => &p.original_title,
            Predicate::PrimaryProfession => &p.primary_profession,
            Predicate::RuntimeMinutes => &p.runtime_minutes,
            Predicate::StartYear => &p.start_year,
            Predicate::PrimaryTitle => &p.primary_title,
            Predicate::EpisodeOf => &p.episode_of,
            Predicate::ParticipatedIn => &p.participated_in,
            Predicate::KnownForTitles => &p.known_for_titles,
            Predicate::Type => &p.rdf_type,
        }
    }
}

impl FromStr for Predicate {
    type Err = UnknownPredicate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Predicate::ALL
            .iter()
            .find(|p| p.name() == s)
            .copied()
            .ok_or_else(|| UnknownPredicate(s.to_string()))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Entity classes emitted as `rdf:type` objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeClass {
    Film,
    TelevisionEpisode,
    TelevisionShow,
    Person,
}

impl TypeClass {
    /// Classify a raw `titleType` category
    ///
    /// Film-like categories (including anything mentioning "video") become
    /// films, `tvEpisode` becomes an episode, everything else is a show.
    pub fn from_title_type(raw: &str) -> Self {
        match raw {
            "movie" | "short" | "tvMovie" | "tvShort" => TypeClass::Film,
            _ if raw.contains("video") => TypeClass::Film,
            "tvEpisode" => TypeClass::TelevisionEpisode,
            _ => TypeClass::TelevisionShow,
        }
    }

    /// Output URI for this class under `vocab`
    pub fn uri<'a>(&self, vocab: &'a Vocabulary) -> &'a str {
        match self {
            TypeClass::Film => &vocab.types.film,
            TypeClass::TelevisionEpisode => &vocab.types.television_episode,
            TypeClass::TelevisionShow => &vocab.types.television_show,
            TypeClass::Person => &vocab.types.person,
        }
    }
}

/// Literal datatype tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Datatype {
    Date,
    NonNegativeInteger,
}

impl Datatype {
    /// Output URI for this datatype under `vocab`
    pub fn uri<'a>(&self, vocab: &'a Vocabulary) -> &'a str {
        match self {
            Datatype::Date => &vocab.datatypes.date,
            Datatype::NonNegativeInteger => &vocab.datatypes.non_negative_integer,
        }
    }
}

/// Namespaces, identifier prefixes and URIs used when writing triples
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Namespace prepended to person and title identifiers
    pub resource_namespace: String,

    /// Prefix recognizing person identifiers
    pub person_prefix: String,

    /// Prefix recognizing title identifiers
    pub title_prefix: String,

    /// Predicate URIs
    pub predicates: PredicateUris,

    /// `rdf:type` object URIs
    pub types: TypeUris,

    /// Datatype URIs
    pub datatypes: DatatypeUris,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            resource_namespace: "https://www.scads.de/movieBenchmark/resource/IMDB/".to_string(),
            person_prefix: "nm".to_string(),
            title_prefix: "tt".to_string(),
            predicates: PredicateUris::default(),
            types: TypeUris::default(),
            datatypes: DatatypeUris::default(),
        }
    }
}

/// Predicate URIs, one per [`Predicate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredicateUris {
    pub birth_year: String,
    pub death_year: String,
    pub episode_number: String,
    pub season_number: String,
    pub end_year: String,
    pub genres: String,
    pub is_adult: String,
    pub primary_name: String,
    pub original_title: String,
    pub primary_profession: String,
    pub runtime_minutes: String,
    pub start_year: String,
    pub primary_title: String,
    pub episode_of: String,
    pub participated_in: String,
    pub known_for_titles: String,
    pub rdf_type: String,
}

const DBPEDIA_ONTOLOGY: &str = "http://dbpedia.org/ontology/";
const BENCHMARK_ONTOLOGY: &str = "https://www.scads.de/movieBenchmark/ontology/";

impl Default for PredicateUris {
    fn default() -> Self {
        let dbo = |local: &str| format!("{DBPEDIA_ONTOLOGY}{local}");
        let mb = |local: &str| format!("{BENCHMARK_ONTOLOGY}{local}");
        Self {
            birth_year: dbo("birthYear"),
            death_year: dbo("deathYear"),
            episode_number: dbo("episodeNumber"),
            season_number: dbo("seasonNumber"),
            end_year: mb("endYear"),
            genres: mb("genre_list"),
            is_adult: mb("isAdult"),
            primary_name: mb("name"),
            original_title: mb("originalTitle"),
            primary_profession: mb("primaryProfessions"),
            runtime_minutes: mb("runtimeMinutes"),
            start_year: mb("startYear"),
            primary_title: mb("title"),
            episode_of: mb("is_episode_of"),
            participated_in: mb("participated_in"),
            // knownForTitles shares the participation URI
            known_for_titles: mb("participated_in"),
            rdf_type: "http://www.w3.org/1999/02/22-rdf-syntax-ns#type".to_string(),
        }
    }
}

/// `rdf:type` object URIs, one per [`TypeClass`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeUris {
    pub film: String,
    pub television_episode: String,
    pub television_show: String,
    pub person: String,
}

impl Default for TypeUris {
    fn default() -> Self {
        Self {
            film: format!("{DBPEDIA_ONTOLOGY}Film"),
            television_episode: format!("{DBPEDIA_ONTOLOGY}TelevisionEpisode"),
            television_show: format!("{DBPEDIA_ONTOLOGY}TelevisionShow"),
            person: "http://xmlns.com/foaf/0.1/Person".to_string(),
        }
    }
}

/// Datatype URIs, one per [`Datatype`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatatypeUris {
    pub date: String,
    pub non_negative_integer: String,
}

impl Default for DatatypeUris {
    fn default() -> Self {
        Self {
            date: "http://www.w3.org/2001/XMLSchema#date".to_string(),
            non_negative_integer: "http://www.w3.org/2001/XMLSchema#nonNegativeInteger"
                .to_string(),
        }
    }
}

impl Vocabulary {
    /// Validate the vocabulary
    pub fn validate(&self) -> Result<(), super::error::GraphError> {
        if self.person_prefix.is_empty() {
            return Err(super::error::GraphError::invalid_config(
                "vocabulary.person_prefix",
                "",
                "Prefix cannot be empty",
            ));
        }
        if self.title_prefix.is_empty() {
            return Err(super::error::GraphError::invalid_config(
                "vocabulary.title_prefix",
                "",
                "Prefix cannot be empty",
            ));
        }
        if let Some(p) = Predicate::ALL.iter().find(|p| p.uri(self).is_empty()) {
            return Err(super::error::GraphError::invalid_config(
                format!("vocabulary.predicates.{}", p.name()),
                "",
                "Predicate URI cannot be empty",
            ));
        }
        Ok(())
    }

    /// Rewrite an identifier into the resource namespace
    pub fn resource(&self, id: &str) -> String {
        format!("{}{id}", self.resource_namespace)
    }
}
