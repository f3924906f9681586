//! Identifier recognition
//!
//! Entity references in the dumps are plain strings distinguished only by
//! their prefix. Anything else is an opaque literal.

use serde::{Deserialize, Serialize};

use super::vocabulary::Vocabulary;

/// Reserved value marking an absent field in the dumps
pub const NULL_MARKER: &str = "\\N";

/// What kind of value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierKind {
    /// Person identifier (`nm...`)
    Person,
    /// Title identifier (`tt...`)
    Title,
    /// Any other value
    Literal,
}

impl IdentifierKind {
    pub fn is_identifier(&self) -> bool {
        !matches!(self, IdentifierKind::Literal)
    }
}

/// Classify `value` against the prefixes configured in `vocab`
pub fn classify(value: &str, vocab: &Vocabulary) -> IdentifierKind {
    if value.starts_with(vocab.person_prefix.as_str()) {
        IdentifierKind::Person
    } else if value.starts_with(vocab.title_prefix.as_str()) {
        IdentifierKind::Title
    } else {
        IdentifierKind::Literal
    }
}

/// Shorthand for `classify(value, vocab).is_identifier()`
pub fn is_identifier(value: &str, vocab: &Vocabulary) -> bool {
    classify(value, vocab).is_identifier()
}

pub fn is_null_marker(value: &str) -> bool {
    value == NULL_MARKER
}
