//! Inclusion and pairwise-exclusion filtering
//!
//! The allow set is the primary gate: no identifier outside it ever reaches
//! the output. The exclude set removes specific ordered (subject, object)
//! identifier pairs on top of that.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::error::{GraphError, GraphResult};
use super::identifier::is_identifier;
use super::vocabulary::Vocabulary;

/// Identifiers eligible for inclusion in the output
#[derive(Debug, Clone, Default)]
pub struct AllowSet {
    ids: HashSet<String>,
}

impl AllowSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a newline-delimited identifier file
    pub fn from_file(path: &Path) -> GraphResult<Self> {
        let file = File::open(path).map_err(|e| GraphError::open_failed(path, e))?;
        let mut ids = HashSet::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| GraphError::io_error("read", Some(path.into()), e))?;
            let id = line.trim();
            if !id.is_empty() {
                ids.insert(id.to_string());
            }
        }
        tracing::debug!(path = %path.display(), count = ids.len(), "Loaded allow set");
        Ok(Self { ids })
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AllowSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered identifier pairs that must never form a triple
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    // subject -> objects; avoids allocating a tuple per lookup
    pairs: HashMap<String, HashSet<String>>,
    len: usize,
}

impl ExcludeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a file of `subject<TAB>object` lines
    pub fn from_file(path: &Path) -> GraphResult<Self> {
        let file = File::open(path).map_err(|e| GraphError::open_failed(path, e))?;
        let mut set = Self::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| GraphError::io_error("read", Some(path.into()), e))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            match (fields.next(), fields.next()) {
                (Some(s), Some(o)) if !s.is_empty() && !o.is_empty() => {
                    set.insert(s, o);
                }
                _ => {
                    return Err(GraphError::malformed_record(
                        path,
                        idx + 1,
                        "expected two tab-separated identifiers",
                    ));
                }
            }
        }
        tracing::debug!(path = %path.display(), count = set.len(), "Loaded exclude set");
        Ok(set)
    }

    pub fn insert(&mut self, subject: impl Into<String>, object: impl Into<String>) -> bool {
        let added = self
            .pairs
            .entry(subject.into())
            .or_default()
            .insert(object.into());
        if added {
            self.len += 1;
        }
        added
    }

    pub fn contains(&self, subject: &str, object: &str) -> bool {
        self.pairs
            .get(subject)
            .is_some_and(|objects| objects.contains(object))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<S: Into<String>, O: Into<String>> FromIterator<(S, O)> for ExcludeSet {
    fn from_iter<I: IntoIterator<Item = (S, O)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (s, o) in iter {
            set.insert(s, o);
        }
        set
    }
}

/// Decides whether a candidate (subject, object) pair may be written
#[derive(Debug, Clone, Default)]
pub struct FilterPolicy {
    pub allow: AllowSet,
    pub exclude: ExcludeSet,
}

impl FilterPolicy {
    pub fn new(allow: AllowSet, exclude: ExcludeSet) -> Self {
        Self { allow, exclude }
    }

    /// Load both sets from disk
    pub fn from_files(allowed: &Path, excluded: &Path) -> GraphResult<Self> {
        Ok(Self::new(
            AllowSet::from_file(allowed)?,
            ExcludeSet::from_file(excluded)?,
        ))
    }

    /// Whether a row gated on `id` should be processed at all
    pub fn is_allowed(&self, id: &str) -> bool {
        self.allow.contains(id)
    }

    /// Decide whether the pair may be emitted
    ///
    /// - both identifiers: excluded pairs are rejected, otherwise both must
    ///   be allowed
    /// - one identifier: it must be allowed
    /// - no identifier: rejected, a literal-to-literal triple carries no
    ///   entity
    pub fn should_write(&self, subject: &str, object: &str, vocab: &Vocabulary) -> bool {
        match (is_identifier(subject, vocab), is_identifier(object, vocab)) {
            (true, true) => {
                !self.exclude.contains(subject, object)
                    && self.allow.contains(subject)
                    && self.allow.contains(object)
            }
            (true, false) => self.allow.contains(subject),
            (false, true) => self.allow.contains(object),
            (false, false) => false,
        }
    }
}
