//! Custom error types for graph construction
//!
//! Only a handful of conditions are fatal for a run: missing inputs,
//! unreadable files and broken filter files. Everything that concerns a
//! single field (empty values, null markers, unknown predicates) is handled
//! by skipping and counting, see [`super::builder::SkipReason`].

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Custom error type for graph operations
#[derive(Debug)]
pub enum GraphError {
    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Input table or filter file does not exist
    InputNotFound { path: PathBuf },

    /// A line in an input file could not be split into the expected fields
    MalformedRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    // =========================================================================
    // Output Errors
    // =========================================================================
    /// Failed to create the output directory
    OutputDirectoryCreationFailed { path: PathBuf, reason: String },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    /// Unknown benchmark dataset pair
    UnknownPair { value: String },

    // =========================================================================
    // I/O Errors
    // =========================================================================
    /// File I/O error
    IoError {
        operation: String,
        path: Option<PathBuf>,
        source: io::Error,
    },

    // =========================================================================
    // Generic Errors
    // =========================================================================
    /// Generic error with context
    Other {
        context: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Input
            GraphError::InputNotFound { path } => {
                write!(f, "Input file not found: {path:?}")
            }
            GraphError::MalformedRecord { path, line, reason } => {
                write!(f, "Malformed record at {path:?}:{line}: {reason}")
            }

            // Output
            GraphError::OutputDirectoryCreationFailed { path, reason } => {
                write!(f, "Failed to create output directory {path:?}: {reason}")
            }

            // Configuration
            GraphError::InvalidConfig {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid config '{field}' = '{value}': {reason}")
            }
            GraphError::UnknownPair { value } => {
                write!(f, "Unknown dataset pair: '{value}'")
            }

            // I/O
            GraphError::IoError {
                operation,
                path,
                source,
            } => {
                if let Some(p) = path {
                    write!(f, "I/O error during {operation} on {p:?}: {source}")
                } else {
                    write!(f, "I/O error during {operation}: {source}")
                }
            }

            // Generic
            GraphError::Other { context, source } => {
                if let Some(src) = source {
                    write!(f, "{context}: {src}")
                } else {
                    write!(f, "{context}")
                }
            }
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GraphError::IoError { source, .. } => Some(source),
            GraphError::Other {
                source: Some(src), ..
            } => Some(src.as_ref()),
            _ => None,
        }
    }
}

// ============================================================================
// Conversion implementations
// ============================================================================

impl From<io::Error> for GraphError {
    fn from(err: io::Error) -> Self {
        GraphError::IoError {
            operation: "unknown".to_string(),
            path: None,
            source: err,
        }
    }
}

// ============================================================================
// Helper constructors
// ============================================================================

impl GraphError {
    /// Create a missing-input error
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        GraphError::InputNotFound { path: path.into() }
    }

    /// Create a malformed-record error
    pub fn malformed_record(
        path: impl Into<PathBuf>,
        line: usize,
        reason: impl Into<String>,
    ) -> Self {
        GraphError::MalformedRecord {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io_error(
        operation: impl Into<String>,
        path: Option<PathBuf>,
        source: io::Error,
    ) -> Self {
        GraphError::IoError {
            operation: operation.into(),
            path,
            source,
        }
    }

    /// Create an I/O error for opening `path`, mapping `NotFound` to
    /// [`GraphError::InputNotFound`]
    pub fn open_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            GraphError::InputNotFound { path }
        } else {
            GraphError::io_error("open", Some(path), source)
        }
    }

    /// Create a config validation error
    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        GraphError::InvalidConfig {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        GraphError::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Check if this error is recoverable
    ///
    /// A run is a bounded batch job; the only recovery is rerunning it once
    /// the input problem is fixed, so nothing here is retried in-process.
    pub fn is_recoverable(&self) -> bool {
        false
    }

    /// Check if this error was caused by bad input data rather than the
    /// environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            GraphError::InputNotFound { .. } | GraphError::MalformedRecord { .. }
        )
    }
}
