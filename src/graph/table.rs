//! Tab-separated input tables

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use super::error::{GraphError, GraphResult};

/// One record of an input table; columns are positional
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<String>,
}

impl RawRow {
    /// Split a line on tabs after trimming surrounding whitespace
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        Self {
            fields: line.split('\t').map(str::to_string).collect(),
        }
    }

    /// Column `index`, or an empty field if the row is short
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for RawRow {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Streams the data rows of one table, skipping header lines
pub struct TableReader {
    path: PathBuf,
    header_token: String,
    lines: Lines<BufReader<File>>,
}

impl TableReader {
    /// Open `path`; lines starting with `header_token` are skipped
    pub fn open(path: &Path, header_token: &str) -> GraphResult<Self> {
        let file = File::open(path).map_err(|e| GraphError::open_failed(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            header_token: header_token.to_string(),
            lines: BufReader::new(file).lines(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for TableReader {
    type Item = GraphResult<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    return Some(Err(GraphError::io_error(
                        "read",
                        Some(self.path.clone()),
                        e,
                    )))
                }
            };
            if line.is_empty() || line.starts_with(&self.header_token) {
                continue;
            }
            return Some(Ok(RawRow::parse(&line)));
        }
    }
}
