//! Error types for level data loading.

use thiserror::Error;

/// Errors that can occur when loading a level definition.
#[derive(Debug, Error)]
pub enum LevelLoadError {
    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// Parsed fine but describes a level that cannot be played.
    #[error("Invalid level '{path}': {reason}")]
    InvalidLevel { path: String, reason: String },
}
