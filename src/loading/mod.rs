//! Benchmark dataset loading
//!
//! Reads a produced benchmark directory back into memory: the triple files
//! of both sources of a pair, the gold entity links, the five
//! train/test/valid folds and, when present, the intra-source links.
//!
//! ```text
//! <data_dir>/
//!   imdb_intra_ent_links
//!   <pair>/
//!     attr_triples_1  attr_triples_2
//!     rel_triples_1   rel_triples_2
//!     ent_links
//!     721_5fold/<1..5>/{train,test,valid}_links
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::graph::error::{GraphError, GraphResult};
use crate::graph::Triple;

/// Fold directory name (70/20/10 split, five folds)
pub const FOLD_DIR: &str = "721_5fold";

/// Number of folds
pub const FOLD_COUNT: usize = 5;

/// Source pairs shipped with the benchmark
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetPair {
    #[default]
    ImdbTmdb,
    ImdbTvdb,
    TmdbTvdb,
}

impl DatasetPair {
    pub const ALL: [DatasetPair; 3] = [
        DatasetPair::ImdbTmdb,
        DatasetPair::ImdbTvdb,
        DatasetPair::TmdbTvdb,
    ];

    /// Directory name of the pair
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetPair::ImdbTmdb => "imdb-tmdb",
            DatasetPair::ImdbTvdb => "imdb-tvdb",
            DatasetPair::TmdbTvdb => "tmdb-tvdb",
        }
    }

    /// Left and right source names
    pub fn sources(&self) -> (&'static str, &'static str) {
        match self {
            DatasetPair::ImdbTmdb => ("imdb", "tmdb"),
            DatasetPair::ImdbTvdb => ("imdb", "tvdb"),
            DatasetPair::TmdbTvdb => ("tmdb", "tvdb"),
        }
    }
}

impl FromStr for DatasetPair {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatasetPair::ALL
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| GraphError::UnknownPair {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for DatasetPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gold link between two entity URIs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityLink {
    pub left: String,
    pub right: String,
}

/// One train/test/valid split of the gold links
#[derive(Debug, Clone, Default)]
pub struct Fold {
    pub train_links: Vec<EntityLink>,
    pub test_links: Vec<EntityLink>,
    pub valid_links: Vec<EntityLink>,
}

/// Entity-resolution task data for one pair
#[derive(Debug, Clone, Default)]
pub struct ErData {
    pub attr_triples_1: Vec<Triple>,
    pub attr_triples_2: Vec<Triple>,
    pub rel_triples_1: Vec<Triple>,
    pub rel_triples_2: Vec<Triple>,
    pub ent_links: Vec<EntityLink>,
    pub folds: Vec<Fold>,
    /// Duplicate links inside the left and right source
    pub intra_ent_links: Option<(Vec<EntityLink>, Vec<EntityLink>)>,
}

/// Line counts of a loaded pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub pair: String,
    pub attr_triples_1: usize,
    pub attr_triples_2: usize,
    pub rel_triples_1: usize,
    pub rel_triples_2: usize,
    pub ent_links: usize,
    /// (train, test, valid) per fold
    pub folds: Vec<(usize, usize, usize)>,
    pub intra_ent_links: Option<(usize, usize)>,
}

impl ErData {
    pub fn summary(&self, pair: DatasetPair) -> DatasetSummary {
        DatasetSummary {
            pair: pair.to_string(),
            attr_triples_1: self.attr_triples_1.len(),
            attr_triples_2: self.attr_triples_2.len(),
            rel_triples_1: self.rel_triples_1.len(),
            rel_triples_2: self.rel_triples_2.len(),
            ent_links: self.ent_links.len(),
            folds: self
                .folds
                .iter()
                .map(|f| (f.train_links.len(), f.test_links.len(), f.valid_links.len()))
                .collect(),
            intra_ent_links: self
                .intra_ent_links
                .as_ref()
                .map(|(left, right)| (left.len(), right.len())),
        }
    }
}

/// Load the task data of `pair` from `data_dir`
pub fn load_data(data_dir: &Path, pair: DatasetPair) -> GraphResult<ErData> {
    let pair_dir = data_dir.join(pair.as_str());
    tracing::info!(path = %pair_dir.display(), "Loading benchmark pair");

    let folds = (1..=FOLD_COUNT)
        .map(|n| {
            let fold_dir = pair_dir.join(FOLD_DIR).join(n.to_string());
            Ok(Fold {
                train_links: read_links(&fold_dir.join("train_links"))?,
                test_links: read_links(&fold_dir.join("test_links"))?,
                valid_links: read_links(&fold_dir.join("valid_links"))?,
            })
        })
        .collect::<GraphResult<Vec<_>>>()?;

    let (left, right) = pair.sources();
    let left_intra = data_dir.join(format!("{left}_intra_ent_links"));
    let right_intra = data_dir.join(format!("{right}_intra_ent_links"));
    let intra_ent_links = if left_intra.is_file() && right_intra.is_file() {
        Some((read_links(&left_intra)?, read_links(&right_intra)?))
    } else {
        tracing::debug!(pair = %pair, "No intra-source links present");
        None
    };

    Ok(ErData {
        attr_triples_1: read_triples(&pair_dir.join("attr_triples_1"))?,
        attr_triples_2: read_triples(&pair_dir.join("attr_triples_2"))?,
        rel_triples_1: read_triples(&pair_dir.join("rel_triples_1"))?,
        rel_triples_2: read_triples(&pair_dir.join("rel_triples_2"))?,
        ent_links: read_links(&pair_dir.join("ent_links"))?,
        folds,
        intra_ent_links,
    })
}

/// Read a tab-separated triple file
pub fn read_triples(path: &Path) -> GraphResult<Vec<Triple>> {
    read_records(path, Triple::from_tsv, "expected three tab-separated fields")
}

/// Read a tab-separated link file
pub fn read_links(path: &Path) -> GraphResult<Vec<EntityLink>> {
    read_records(
        path,
        |line| {
            let mut fields = line.split('\t');
            match (fields.next(), fields.next(), fields.next()) {
                (Some(left), Some(right), None) => Some(EntityLink {
                    left: left.to_string(),
                    right: right.to_string(),
                }),
                _ => None,
            }
        },
        "expected two tab-separated fields",
    )
}

fn read_records<T>(
    path: &Path,
    parse: impl Fn(&str) -> Option<T>,
    expected: &str,
) -> GraphResult<Vec<T>> {
    let file = File::open(path).map_err(|e| GraphError::open_failed(path, e))?;
    let mut records = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| GraphError::io_error("read", Some(path.into()), e))?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        let record = parse(line).ok_or_else(|| GraphError::malformed_record(path, idx + 1, expected))?;
        records.push(record);
    }
    Ok(records)
}
