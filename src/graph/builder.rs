//! Triple construction
//!
//! [`TripleBuilder::build`] turns one logical field of a source row into
//! zero or more finished triples:
//!
//! 1. empty subject, predicate name or object: skip
//! 2. predicate resolution: the `titleType` rule first, then the closed
//!    [`Predicate`] lookup; unknown names are skipped
//! 3. `\N` on either side: skip
//! 4. year columns widened to dates
//! 5. bracketed multi-value expansion
//! 6. per candidate object: filter policy, namespace rewrite, datatype tag
//!
//! Nothing in here fails; every field either yields triples or a
//! [`SkipReason`].

use std::fmt;

use super::filter::FilterPolicy;
use super::identifier::{is_identifier, is_null_marker};
use super::normalize::{add_datatype, expand_values, normalize_year, ListParseError};
use super::triple::Triple;
use super::vocabulary::{Datatype, Predicate, TypeClass, UnknownPredicate, Vocabulary};

/// Source column name that is classified instead of looked up
pub const TITLE_TYPE: &str = "titleType";

/// Why a field produced no triples
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Subject, predicate name or object was empty
    Malformed,
    /// Subject or object was the `\N` null marker
    NullMarker,
    /// Predicate name is not part of the vocabulary
    UnknownPredicate(String),
    /// Bracketed multi-value field could not be parsed
    MalformedList(ListParseError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Malformed => write!(f, "empty field"),
            SkipReason::NullMarker => write!(f, "null marker"),
            SkipReason::UnknownPredicate(name) => write!(f, "unrecognized predicate '{name}'"),
            SkipReason::MalformedList(e) => write!(f, "{e}"),
        }
    }
}

impl From<UnknownPredicate> for SkipReason {
    fn from(err: UnknownPredicate) -> Self {
        SkipReason::UnknownPredicate(err.0)
    }
}

/// Outcome of predicate-name resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateResolution {
    /// `titleType`: object is a category to classify, predicate is `rdf:type`
    TitleType,
    /// Plain vocabulary predicate
    Mapped(Predicate),
}

/// Resolve a source predicate name
///
/// The `titleType` rule takes priority over the vocabulary lookup.
pub fn resolve_predicate(name: &str) -> Result<PredicateResolution, UnknownPredicate> {
    if name == TITLE_TYPE {
        return Ok(PredicateResolution::TitleType);
    }
    name.parse().map(PredicateResolution::Mapped)
}

/// Triples built from one field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTriples {
    /// Accepted triples
    pub triples: Vec<Triple>,

    /// Candidates rejected by the filter policy
    pub filtered: usize,

    /// List entries dropped for being empty or the null marker
    pub empty_entries: usize,
}

/// Builds triples against a fixed vocabulary and filter policy
#[derive(Debug, Clone, Copy)]
pub struct TripleBuilder<'a> {
    vocab: &'a Vocabulary,
    filter: &'a FilterPolicy,
}

impl<'a> TripleBuilder<'a> {
    pub fn new(vocab: &'a Vocabulary, filter: &'a FilterPolicy) -> Self {
        Self { vocab, filter }
    }

    pub fn vocabulary(&self) -> &'a Vocabulary {
        self.vocab
    }

    pub fn filter(&self) -> &'a FilterPolicy {
        self.filter
    }

    /// Build triples for one field, dropping the skip reason
    pub fn create_triples(
        &self,
        subject: &str,
        predicate_name: &str,
        object_raw: &str,
        multiple_possible: bool,
        datatype: Option<Datatype>,
    ) -> Vec<Triple> {
        self.build(subject, predicate_name, object_raw, multiple_possible, datatype)
            .map(|field| field.triples)
            .unwrap_or_default()
    }

    /// Build triples for one field
    pub fn build(
        &self,
        subject: &str,
        predicate_name: &str,
        object_raw: &str,
        multiple_possible: bool,
        datatype: Option<Datatype>,
    ) -> Result<FieldTriples, SkipReason> {
        if subject.is_empty() || predicate_name.is_empty() || object_raw.is_empty() {
            return Err(SkipReason::Malformed);
        }

        let resolution = resolve_predicate(predicate_name).inspect_err(|_| {
            tracing::debug!(
                subject,
                predicate = predicate_name,
                object = object_raw,
                "Unrecognized predicate, skipping field"
            );
        })?;

        if is_null_marker(subject) || is_null_marker(object_raw) {
            return Err(SkipReason::NullMarker);
        }

        match resolution {
            PredicateResolution::TitleType => {
                Ok(self.classify(subject, TypeClass::from_title_type(object_raw)))
            }
            PredicateResolution::Mapped(predicate) => {
                self.build_mapped(subject, predicate, object_raw, multiple_possible, datatype)
            }
        }
    }

    /// Build the `rdf:type` triple placing `subject` in `class`
    pub fn classify(&self, subject: &str, class: TypeClass) -> FieldTriples {
        let type_uri = class.uri(self.vocab);
        let mut field = FieldTriples::default();
        if self.filter.should_write(subject, type_uri, self.vocab) {
            field.triples.push(Triple::new(
                self.rewrite(subject),
                Predicate::Type.uri(self.vocab),
                type_uri,
            ));
        } else {
            field.filtered += 1;
        }
        field
    }

    fn build_mapped(
        &self,
        subject: &str,
        predicate: Predicate,
        object_raw: &str,
        multiple_possible: bool,
        datatype: Option<Datatype>,
    ) -> Result<FieldTriples, SkipReason> {
        let predicate_uri = predicate.uri(self.vocab);

        let object = if predicate_uri.contains("Year") {
            normalize_year(object_raw)
        } else {
            object_raw.to_string()
        };

        let candidates = expand_values(&object, multiple_possible).map_err(|e| {
            tracing::debug!(subject, predicate = %predicate, error = %e, "Skipping malformed list");
            SkipReason::MalformedList(e)
        })?;

        let mut field = FieldTriples::default();
        for candidate in candidates {
            if candidate.is_empty() || is_null_marker(&candidate) {
                field.empty_entries += 1;
                continue;
            }
            if self.filter.should_write(subject, &candidate, self.vocab) {
                field.triples.push(Triple::new(
                    self.rewrite(subject),
                    predicate_uri,
                    self.object_term(&candidate, datatype),
                ));
            } else {
                field.filtered += 1;
            }
        }
        Ok(field)
    }

    fn rewrite(&self, value: &str) -> String {
        if is_identifier(value, self.vocab) {
            self.vocab.resource(value)
        } else {
            value.to_string()
        }
    }

    fn object_term(&self, value: &str, datatype: Option<Datatype>) -> String {
        if is_identifier(value, self.vocab) {
            self.vocab.resource(value)
        } else {
            add_datatype(value, datatype.map(|d| d.uri(self.vocab)))
        }
    }
}
