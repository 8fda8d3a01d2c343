use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a level document and building a [`crate::World`].
#[derive(Debug, Error)]
pub enum WorldError {
    /// The level file could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The level file is not valid LDtk JSON.
    #[error("failed to parse level document {path}: {source}")]
    Json {
        /// File that failed to parse (`<memory>` for string input).
        path: PathBuf,
        /// Underlying serde failure.
        #[source]
        source: serde_json::Error,
    },
    /// Only `.ldtk` and `.json` documents are accepted.
    #[error("unsupported level file format: {0}")]
    UnsupportedFormat(String),
    /// The document is well-formed JSON but structurally unusable.
    #[error("invalid level document: {0}")]
    InvalidWorld(String),
    /// A known entity kind is missing one of its fields.
    #[error("{entity} in level '{level}' is missing field '{field}'")]
    MissingField {
        /// Entity identifier, e.g. `Monster`.
        entity: String,
        /// Level the entity was placed in.
        level: String,
        /// Field identifier that was expected.
        field: &'static str,
    },
    /// A known entity kind carries a field of the wrong type.
    #[error("{entity} in level '{level}': field '{field}' should be {expected}")]
    FieldType {
        /// Entity identifier, e.g. `DepthChange`.
        entity: String,
        /// Level the entity was placed in.
        level: String,
        /// Field identifier that was mistyped.
        field: &'static str,
        /// Human readable expected type.
        expected: &'static str,
    },
}

/// Result alias used throughout the world loader.
pub type Result<T> = std::result::Result<T, WorldError>;
