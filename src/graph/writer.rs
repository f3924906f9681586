//! Triple file output
//!
//! Each target directory receives `attr_triples_1` and `rel_triples_1`,
//! one tab-separated triple per line.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::assembler::AssembledGraph;
use super::error::{GraphError, GraphResult};
use super::triple::Triple;

/// Attribute triple file name
pub const ATTR_TRIPLES_FILE: &str = "attr_triples_1";

/// Relationship triple file name
pub const REL_TRIPLES_FILE: &str = "rel_triples_1";

/// Write both triple files into `out_dir`, creating it if needed
pub fn write_graph(graph: &AssembledGraph, out_dir: &Path) -> GraphResult<()> {
    write_files(&graph.attributes, &graph.relationships, out_dir)
}

/// Write attribute and relationship triples into `out_dir`
pub fn write_files(attributes: &[Triple], relationships: &[Triple], out_dir: &Path) -> GraphResult<()> {
    fs::create_dir_all(out_dir).map_err(|e| GraphError::OutputDirectoryCreationFailed {
        path: out_dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    write_triples(attributes, &out_dir.join(ATTR_TRIPLES_FILE))?;
    write_triples(relationships, &out_dir.join(REL_TRIPLES_FILE))?;

    tracing::info!(
        dir = %out_dir.display(),
        attributes = attributes.len(),
        relationships = relationships.len(),
        "Wrote triple files"
    );
    Ok(())
}

fn write_triples(triples: &[Triple], path: &Path) -> GraphResult<()> {
    let io_err = |e| GraphError::io_error("write", Some(path.to_path_buf()), e);

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    for triple in triples {
        writeln!(writer, "{}", triple.to_tsv()).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;
    Ok(())
}

/// Whether `out_dir` already holds a relationship triple file
pub fn is_written(out_dir: &Path) -> bool {
    out_dir.join(REL_TRIPLES_FILE).is_file()
}

/// Paths of both triple files inside `out_dir`
pub fn triple_paths(out_dir: &Path) -> (PathBuf, PathBuf) {
    (out_dir.join(ATTR_TRIPLES_FILE), out_dir.join(REL_TRIPLES_FILE))
}
