//! Error types for emoji database operations.
//!
//! Input problems (unreadable files, malformed JSON or YAML) are fatal to the
//! operation that hit them. Lookup misses are never errors; codec failures
//! are kept separate because they point at corrupted stored data.

use emojiscript_core::CodecError;
use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A stored codepoint token could not be decoded.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The raw dataset is valid JSON but not an array of records.
    #[error("raw emoji data must be a JSON array")]
    NotAnArray,

    /// All configured loader sources failed.
    #[error("no emoji sources available")]
    NoSourcesAvailable,
}

/// Convenience alias for results with [`DatabaseError`].
pub type Result<T> = std::result::Result<T, DatabaseError>;
