//! Error types for the factsheet-core library.
//!
//! Extraction itself never fails: a document without recognizable fields
//! yields a record of nulls. These errors cover the edges only, i.e.
//! configuration and reading documents from disk.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the factsheet library.
#[derive(Error, Debug)]
pub enum FactsheetError {
    /// Invalid extraction configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A document source could not be listed or read.
    #[error("failed to read documents from {path}: {reason}")]
    Source { path: PathBuf, reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the factsheet library.
pub type Result<T> = std::result::Result<T, FactsheetError>;
