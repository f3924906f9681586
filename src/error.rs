//! Unified error handling for the moviegraph crate
//!
//! This module provides a unified error type that wraps the domain-specific
//! [`GraphError`] together with the few foreign errors that cross module
//! boundaries.
//!
//! # Architecture
//!
//! - [`MovieGraphErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use moviegraph::error::{Error, ErrorCategory, MovieGraphErrorTrait};
//!
//! fn report(err: &Error) {
//!     match err.category() {
//!         ErrorCategory::Input => eprintln!("Fix the input data and rerun: {err}"),
//!         _ => eprintln!("Fatal error: {err}"),
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

pub use crate::graph::error::GraphError;

/// Common trait for all moviegraph error types
pub trait MovieGraphErrorTrait: std::error::Error {
    /// Check if this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Missing or malformed input tables and filter files
    Input,
    /// Output and other I/O errors
    Storage,
    /// Serialization errors
    Serialization,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Get a short description for the category
    pub fn description(&self) -> &'static str {
        match self {
            Self::Input => "input error",
            Self::Storage => "storage error",
            Self::Serialization => "serialization error",
            Self::Config => "configuration error",
            Self::Other => "other error",
        }
    }
}

/// Unified error type for the moviegraph crate
#[derive(Error, Debug)]
pub enum Error {
    /// Graph construction and loading errors
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl MovieGraphErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Graph(e) => e.is_recoverable(),
            Self::Io(_) => false,
            Self::Json(_) => false,
            Self::Toml(_) => false,
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Graph(e) => match e {
                GraphError::InputNotFound { .. } | GraphError::MalformedRecord { .. } => {
                    ErrorCategory::Input
                }
                GraphError::OutputDirectoryCreationFailed { .. } | GraphError::IoError { .. } => {
                    ErrorCategory::Storage
                }
                GraphError::InvalidConfig { .. } | GraphError::UnknownPair { .. } => {
                    ErrorCategory::Config
                }
                GraphError::Other { .. } => ErrorCategory::Other,
            },
            Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) => ErrorCategory::Serialization,
            Self::Toml(_) | Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Conversion from anyhow::Error
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            context: err.to_string(),
            source: None,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
