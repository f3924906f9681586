//! Triple (Subject-Predicate-Object) record

use serde::{Deserialize, Serialize};
use std::fmt;

/// A finished output triple
///
/// Identifier endpoints are already rewritten into the resource namespace
/// and typed literals already carry their `^^<datatype>` suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Format as one line of a triple file (without the newline)
    pub fn to_tsv(&self) -> String {
        format!("{}\t{}\t{}", self.subject, self.predicate, self.object)
    }

    /// Parse one line of a triple file
    pub fn from_tsv(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut fields = line.splitn(3, '\t');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(s), Some(p), Some(o)) => Some(Self::new(s, p, o)),
            _ => None,
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.subject, self.predicate, self.object)
    }
}
