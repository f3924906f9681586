//! Configuration management for moviegraph
//!
//! This module handles loading and validating configuration from environment
//! variables, TOML files, and command-line arguments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::graph::Vocabulary;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input and output locations
    pub paths: PathsConfig,

    /// Engine behaviour
    pub engine: EngineConfig,

    /// Namespaces and URIs written into the triples
    pub vocabulary: Vocabulary,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Input and output locations
///
/// Paths left unset in a config file are derived from `data_dir` (and the
/// filter files from `imdb_dir`), following [`PathsConfig::from_data_dir`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "PathsFile")]
pub struct PathsConfig {
    /// Benchmark data root
    pub data_dir: PathBuf,

    /// Directory holding the raw `*.tsv` tables
    pub imdb_dir: PathBuf,

    /// Newline-delimited allow set
    pub allowed_file: PathBuf,

    /// Tab-separated exclude pairs
    pub excluded_file: PathBuf,

    /// Directories receiving the triple files
    pub output_dirs: Vec<PathBuf>,
}

impl PathsConfig {
    /// Standard layout below `data_dir`
    pub fn from_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let imdb_dir = data_dir.join("imdb");
        Self {
            allowed_file: imdb_dir.join("allowed"),
            excluded_file: imdb_dir.join("exclude"),
            output_dirs: vec![data_dir.join("imdb-tmdb"), data_dir.join("imdb-tvdb")],
            imdb_dir,
            data_dir,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self::from_data_dir("data")
    }
}

/// `[paths]` as written in a config file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PathsFile {
    data_dir: Option<PathBuf>,
    imdb_dir: Option<PathBuf>,
    allowed_file: Option<PathBuf>,
    excluded_file: Option<PathBuf>,
    output_dirs: Option<Vec<PathBuf>>,
}

impl From<PathsFile> for PathsConfig {
    fn from(file: PathsFile) -> Self {
        let mut paths = Self::from_data_dir(file.data_dir.unwrap_or_else(|| PathBuf::from("data")));
        if let Some(imdb_dir) = file.imdb_dir {
            paths.allowed_file = imdb_dir.join("allowed");
            paths.excluded_file = imdb_dir.join("exclude");
            paths.imdb_dir = imdb_dir;
        }
        if let Some(allowed_file) = file.allowed_file {
            paths.allowed_file = allowed_file;
        }
        if let Some(excluded_file) = file.excluded_file {
            paths.excluded_file = excluded_file;
        }
        if let Some(output_dirs) = file.output_dirs {
            paths.output_dirs = output_dirs;
        }
        paths
    }
}

/// Engine behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Run the record handlers concurrently
    pub parallel: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let data_dir = std::env::var("MOVIEGRAPH_DATA_DIR").unwrap_or_else(|_| String::from("data"));
        let mut paths = PathsConfig::from_data_dir(data_dir);

        if let Ok(dir) = std::env::var("MOVIEGRAPH_IMDB_DIR") {
            let imdb_dir = PathBuf::from(dir);
            paths.allowed_file = imdb_dir.join("allowed");
            paths.excluded_file = imdb_dir.join("exclude");
            paths.imdb_dir = imdb_dir;
        }
        if let Ok(file) = std::env::var("MOVIEGRAPH_ALLOWED_FILE") {
            paths.allowed_file = file.into();
        }
        if let Ok(file) = std::env::var("MOVIEGRAPH_EXCLUDED_FILE") {
            paths.excluded_file = file.into();
        }
        if let Ok(dirs) = std::env::var("MOVIEGRAPH_OUTPUT_DIRS") {
            paths.output_dirs = dirs
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(PathBuf::from)
                .collect();
        }

        let parallel = std::env::var("MOVIEGRAPH_PARALLEL")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        let level = std::env::var("MOVIEGRAPH_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));
        let format = std::env::var("MOVIEGRAPH_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            paths,
            engine: EngineConfig { parallel },
            vocabulary: Vocabulary::default(),
            logging: LoggingConfig { level, format },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.paths.output_dirs.is_empty() {
            anyhow::bail!("paths.output_dirs must name at least one directory");
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!(
                "logging.format must be 'text' or 'json', got '{}'",
                self.logging.format
            );
        }

        self.vocabulary
            .validate()
            .context("Invalid vocabulary configuration")?;

        Ok(())
    }
}
