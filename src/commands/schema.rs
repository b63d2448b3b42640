use anyhow::{Context, Result};

use crate::symbol::QueryRequest;

/// Print the JSON schema of query requests
pub fn run() -> Result<()> {
    let schema = serde_json::to_string_pretty(&QueryRequest::schema())
        .context("Failed to serialize request schema")?;
    println!("{}", schema);
    Ok(())
}
