//! Document sources that supply the raw documentation tree.
//!
//! The index never performs I/O itself; it asks a source for the whole tree
//! in one blocking call.

use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::SourceError;

/// Supplier of a serialized documentation tree.
pub trait DocumentSource: Send + Sync {
    /// Produce the root value of the tree.
    ///
    /// A `Value::Null` result means the source has no root.
    fn fetch(&self) -> Result<Value, SourceError>;

    /// Short description for log messages
    fn describe(&self) -> String;
}

/// Parse JSON text with no nesting limit.
///
/// Deeply nested exports grow the stack on the heap instead of hitting
/// `serde_json`'s default recursion limit.
pub(crate) fn parse_json(text: &str) -> Result<Value, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();

    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// Reads the tree from a JSON export on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for JsonFileSource {
    fn fetch(&self) -> Result<Value, SourceError> {
        debug!("Reading documentation export from {}", self.path.display());

        let content = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;

        parse_json(&content).map_err(|source| SourceError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A tree that is already in memory
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    root: Value,
}

impl StaticSource {
    pub fn new(root: Value) -> Self {
        Self { root }
    }
}

impl DocumentSource for StaticSource {
    fn fetch(&self) -> Result<Value, SourceError> {
        Ok(self.root.clone())
    }

    fn describe(&self) -> String {
        "in-memory document".to_string()
    }
}
