use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::source::JsonFileSource;
use crate::symbol::{DocEngine, QueryRequest, QueryResponse, SymbolSearcher};
use crate::Config;

/// Load the documentation export and build an engine over it
pub fn open_engine(config: &Config, source_path: &Path) -> Result<DocEngine> {
    let source = JsonFileSource::new(source_path);
    let mut engine = DocEngine::with_collision_policy(config.index.path_collisions);

    engine
        .load_from(&source)
        .with_context(|| format!("Failed to load {}", source_path.display()))?;

    info!("Loaded {} symbols from {}", engine.len(), source_path.display());
    Ok(engine)
}

/// Run one query against the export and return the response
pub fn execute(config: &Config, source_path: &Path, request: QueryRequest) -> Result<QueryResponse> {
    let engine = open_engine(config, source_path)?;
    let searcher = SymbolSearcher::new(Arc::new(engine), config.query.max_distance);

    searcher.execute(request).context("Query failed")
}

/// Run the query command, printing the response as JSON
pub fn run(config: &Config, source_path: &Path, request: QueryRequest) -> Result<()> {
    let response = execute(config, source_path, request)?;

    let output =
        serde_json::to_string_pretty(&response).context("Failed to serialize query response")?;
    println!("{}", output);

    Ok(())
}
