//! Error types for resultprintlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or rendering a result set.
///
/// Individual cells never produce an error: missing values render empty and
/// values that don't match their column's type fall back to plain text.
#[derive(Error, Debug)]
pub enum ResultPrintError {
    /// A row's value count disagrees with the column schema
    #[error("row {row} has {found} values but the schema declares {expected} columns")]
    SchemaLengthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Failed to read an input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Input is valid JSON but not a result document
    #[error("invalid result document: {0}")]
    InvalidDocument(String),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
