pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod source;
pub mod symbol;

pub use config::Config;
pub use error::{IndexError, LoadError, SourceError};
pub use source::{DocumentSource, JsonFileSource, StaticSource};
pub use symbol::{DocEngine, MatchMode, ReflectionKind, SymbolEntry, SymbolNode};
