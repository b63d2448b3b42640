//! Error types of the documentation index

use std::path::PathBuf;
use thiserror::Error;

use crate::symbol::SymbolId;

/// Errors surfaced by the index engine.
///
/// Query misses (unknown id, unknown path, no matches) are not errors; they
/// come back as `None` or an empty list.
#[derive(Error, Debug)]
pub enum IndexError {
    /// The documentation tree could not be loaded
    #[error("Failed to load documentation tree: {0}")]
    Load(#[from] LoadError),

    /// A query was issued before any successful load
    #[error("Documentation index is not loaded")]
    NotLoaded,
}

/// Reasons a load attempt fails
#[derive(Error, Debug)]
pub enum LoadError {
    /// The document source produced no root value
    #[error("root value is missing")]
    MissingRoot,

    /// The root value does not have the shape of a symbol tree.
    ///
    /// This also covers nodes lacking an `id` or `name` and unknown kind tags.
    #[error("malformed symbol tree: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two nodes in the tree carry the same id
    #[error("duplicate symbol id {id} (first '{first}', then '{second}')")]
    DuplicateId {
        id: SymbolId,
        first: String,
        second: String,
    },

    /// Two nodes resolved to the same path while collisions are rejected
    #[error("path '{path}' is claimed by both symbol {existing} and symbol {incoming}")]
    PathCollision {
        path: String,
        existing: SymbolId,
        incoming: SymbolId,
    },

    /// The document source failed
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Errors from a document source
#[derive(Error, Debug)]
pub enum SourceError {
    /// Reading the export file failed
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export file is not valid JSON
    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = IndexError> = std::result::Result<T, E>;
