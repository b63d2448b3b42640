//! Typed query requests for callers outside the engine

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use super::engine::DocEngine;
use super::index::{MatchMode, ProjectStats, SymbolEntry, Suggestion};
use super::kind::{ReflectionKind, UnknownKind};
use super::node::SymbolId;
use crate::error::IndexError;

/// A named operation against the documentation index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum QueryRequest {
    /// Look up one symbol by id
    GetSymbol { id: SymbolId },
    /// Find symbols by name
    FindByName {
        name: String,
        /// 'exact' (default), 'partial' or 'prefix'
        #[serde(default)]
        mode: MatchMode,
        /// Maximum number of results (default: all)
        #[serde(default)]
        limit: Option<usize>,
    },
    /// Find the symbol at a dot-joined path such as `Lib.Widget.render`
    FindByPath { path: String },
    /// Find every symbol of one kind, by label, name or numeric tag
    FindByKind { kind: String },
    /// Symbol counts for the loaded project
    Stats,
    /// Find symbols whose comment carries a tag such as `@deprecated`
    Tagged {
        tag: String,
        #[serde(default)]
        limit: Option<usize>,
    },
    /// Names close to a misspelled query
    Suggest {
        name: String,
        #[serde(default)]
        max_distance: Option<usize>,
    },
}

impl QueryRequest {
    /// JSON schema of the request format
    pub fn schema() -> schemars::Schema {
        schemars::schema_for!(QueryRequest)
    }
}

/// Result of a query request
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", content = "data", rename_all = "snake_case")]
pub enum QueryResponse {
    Symbol(Option<SymbolEntry>),
    Symbols(Vec<SymbolEntry>),
    Stats(ProjectStats),
    Suggestions(Vec<Suggestion>),
}

/// Errors from executing a query request
#[derive(Error, Debug)]
pub enum QueryError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    UnknownKind(#[from] UnknownKind),
}

/// Maps query requests onto a loaded engine
pub struct SymbolSearcher {
    engine: Arc<DocEngine>,
    max_distance: usize,
}

impl SymbolSearcher {
    /// Create a searcher; `max_distance` is the default for suggestions
    pub fn new(engine: Arc<DocEngine>, max_distance: usize) -> Self {
        Self {
            engine,
            max_distance,
        }
    }

    /// Run one request
    pub fn execute(&self, request: QueryRequest) -> Result<QueryResponse, QueryError> {
        debug!("Executing {:?}", request);

        let response = match request {
            QueryRequest::GetSymbol { id } => QueryResponse::Symbol(self.engine.resolve(id)?),
            QueryRequest::FindByName { name, mode, limit } => {
                let mut symbols = self.engine.find_by_name(&name, mode)?;
                if let Some(limit) = limit {
                    symbols.truncate(limit);
                }
                QueryResponse::Symbols(symbols)
            }
            QueryRequest::FindByPath { path } => {
                QueryResponse::Symbol(self.engine.find_by_path(&path)?)
            }
            QueryRequest::FindByKind { kind } => {
                let kind: ReflectionKind = kind.parse()?;
                QueryResponse::Symbols(self.engine.find_by_kind(kind)?)
            }
            QueryRequest::Stats => QueryResponse::Stats(self.engine.stats()?),
            QueryRequest::Tagged { tag, limit } => {
                let entries = self.engine.entries_tagged(&tag)?;
                QueryResponse::Symbols(entries.take(limit.unwrap_or(usize::MAX)).collect())
            }
            QueryRequest::Suggest { name, max_distance } => QueryResponse::Suggestions(
                self.engine
                    .suggest(&name, max_distance.unwrap_or(self.max_distance))?,
            ),
        };

        Ok(response)
    }
}
