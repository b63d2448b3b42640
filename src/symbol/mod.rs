//! Documentation symbol indexing and lookup
//!
//! This module loads a serialized documentation tree (modules, classes,
//! functions and their signatures), builds id, name, path and kind indices
//! over it in one traversal, and answers lookups against them.

pub mod engine;
pub mod index;
pub mod kind;
pub mod node;
pub mod search;

pub use engine::DocEngine;
pub use index::{CollisionPolicy, MatchMode, ProjectStats, SymbolEntry, SymbolIndex, Suggestion};
pub use kind::{ReflectionKind, UnknownKind};
pub use node::{BlockTag, Comment, CommentPart, SymbolId, SymbolNode};
pub use search::{QueryError, QueryRequest, QueryResponse, SymbolSearcher};
