use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::symbol::{MatchMode, QueryRequest, SymbolId};

#[derive(Parser)]
#[command(name = "docscope")]
#[command(author, version, about = "Index and query documentation symbol trees")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Documentation export to load (overrides [source] path in the config)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show symbol counts per kind
    Stats,

    /// Look up a symbol by id
    Get {
        id: SymbolId,
    },

    /// Find symbols by name
    Find {
        name: String,

        /// Match mode
        #[arg(short, long, value_enum, default_value_t = MatchMode::Exact)]
        mode: MatchMode,

        /// Maximum number of results to return
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Find the symbol at a dot-joined path
    Path {
        path: String,
    },

    /// List symbols of one kind (label, name or numeric tag)
    Kind {
        kind: String,
    },

    /// List symbols whose comment carries a tag, e.g. @deprecated
    Tagged {
        tag: String,

        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Suggest names close to a misspelled one
    Suggest {
        name: String,

        /// Maximum edit distance (defaults to [query] max_distance)
        #[arg(short, long)]
        distance: Option<usize>,
    },

    /// Print the JSON schema of query requests
    Schema,
}

impl Commands {
    /// The query request this command runs, if it runs one
    pub fn to_request(&self) -> Option<QueryRequest> {
        let request = match self {
            Commands::Stats => QueryRequest::Stats,
            Commands::Get { id } => QueryRequest::GetSymbol { id: *id },
            Commands::Find { name, mode, limit } => QueryRequest::FindByName {
                name: name.clone(),
                mode: *mode,
                limit: *limit,
            },
            Commands::Path { path } => QueryRequest::FindByPath { path: path.clone() },
            Commands::Kind { kind } => QueryRequest::FindByKind { kind: kind.clone() },
            Commands::Tagged { tag, limit } => QueryRequest::Tagged {
                tag: tag.clone(),
                limit: *limit,
            },
            Commands::Suggest { name, distance } => QueryRequest::Suggest {
                name: name.clone(),
                max_distance: *distance,
            },
            Commands::Schema => return None,
        };
        Some(request)
    }
}
