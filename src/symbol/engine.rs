//! Query engine over a loaded documentation tree.
//!
//! The engine is loaded once and then only read. Loading takes `&mut self`,
//! so once it is shared behind an `Arc` no further load can race with readers.

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use super::index::{
    CollisionPolicy, MatchMode, ProjectStats, SymbolEntry, SymbolIndex, Suggestion,
};
use super::kind::ReflectionKind;
use super::node::{SymbolId, SymbolNode};
use crate::error::{IndexError, LoadError, Result};
use crate::source::{parse_json, DocumentSource};

/// Loads a documentation tree and answers lookups against it
#[derive(Default)]
pub struct DocEngine {
    policy: CollisionPolicy,
    index: Option<SymbolIndex>,
}

impl DocEngine {
    /// Create an unloaded engine with the default collision policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unloaded engine with an explicit collision policy
    pub fn with_collision_policy(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            index: None,
        }
    }

    /// Build the indices from a typed root node.
    ///
    /// Any previous load is discarded first; if this load fails the engine
    /// stays unloaded.
    pub fn load(&mut self, root: SymbolNode) -> Result<()> {
        self.index = None;

        let root_id = root.id;
        let index = SymbolIndex::build(Arc::new(root), self.policy)?;

        info!(
            "Indexed {} symbols under {} paths from root {} ({} path collisions)",
            index.len(),
            index.path_count(),
            root_id,
            index.collisions()
        );

        self.index = Some(index);
        Ok(())
    }

    /// Build the indices from a raw JSON value
    pub fn load_value(&mut self, root: Value) -> Result<()> {
        self.index = None;

        if root.is_null() {
            return Err(LoadError::MissingRoot.into());
        }

        let root = SymbolNode::deserialize(serde_stacker::Deserializer::new(root))
            .map_err(LoadError::Malformed)?;
        self.load(root)
    }

    /// Build the indices from JSON text; nesting depth is not limited
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        self.index = None;

        let root = parse_json(json).map_err(LoadError::Malformed)?;
        self.load_value(root)
    }

    /// Fetch the tree from a document source and build the indices
    pub fn load_from<S: DocumentSource + ?Sized>(&mut self, source: &S) -> Result<()> {
        self.index = None;

        debug!("Loading documentation tree from {}", source.describe());
        let root = source.fetch().map_err(LoadError::Source)?;
        self.load_value(root)
    }

    /// Whether a load has succeeded
    pub fn is_loaded(&self) -> bool {
        self.index.is_some()
    }

    /// Number of indexed nodes; 0 when nothing is loaded
    pub fn len(&self) -> usize {
        self.index.as_ref().map_or(0, SymbolIndex::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn loaded(&self) -> Result<&SymbolIndex> {
        self.index.as_ref().ok_or(IndexError::NotLoaded)
    }

    /// The exact node indexed under `id`
    pub fn get(&self, id: SymbolId) -> Result<Option<Arc<SymbolNode>>> {
        Ok(self.loaded()?.get(id).cloned())
    }

    /// The resolved entry for `id`
    pub fn resolve(&self, id: SymbolId) -> Result<Option<SymbolEntry>> {
        Ok(self.loaded()?.entry(id))
    }

    pub fn find_by_name(&self, name: &str, mode: MatchMode) -> Result<Vec<SymbolEntry>> {
        let index = self.loaded()?;
        let results = index.find_by_name(name, mode);
        debug!("find_by_name '{}' ({:?}): {} results", name, mode, results.len());
        Ok(results)
    }

    /// The node registered at `path`.
    ///
    /// When several nodes computed the same path, only the one visited last
    /// can be found here.
    pub fn find_by_path(&self, path: &str) -> Result<Option<SymbolEntry>> {
        let index = self.loaded()?;
        let result = index.find_by_path(path);
        debug!("find_by_path '{}': found={}", path, result.is_some());
        Ok(result)
    }

    pub fn find_by_kind(&self, kind: ReflectionKind) -> Result<Vec<SymbolEntry>> {
        let index = self.loaded()?;
        let results = index.find_by_kind(kind);
        debug!("find_by_kind {}: {} results", kind, results.len());
        Ok(results)
    }

    pub fn stats(&self) -> Result<ProjectStats> {
        Ok(self.loaded()?.stats())
    }

    pub fn kinds(&self) -> Result<Vec<(ReflectionKind, usize)>> {
        Ok(self.loaded()?.kinds())
    }

    /// Path under which `node` was indexed
    pub fn path_of(&self, node: &SymbolNode) -> Result<Option<&str>> {
        self.path_of_id(node.id)
    }

    pub fn path_of_id(&self, id: SymbolId) -> Result<Option<&str>> {
        Ok(self.loaded()?.path_of(id))
    }

    pub fn parent_of(&self, id: SymbolId) -> Result<Option<SymbolEntry>> {
        Ok(self.loaded()?.parent_of(id))
    }

    pub fn children_of(&self, id: SymbolId) -> Result<Option<Vec<SymbolEntry>>> {
        Ok(self.loaded()?.children_of(id))
    }

    pub fn suggest(&self, name: &str, max_distance: usize) -> Result<Vec<Suggestion>> {
        Ok(self.loaded()?.suggest(name, max_distance))
    }

    /// Lazy, restartable sequence of every entry in discovery order
    pub fn entries(&self) -> Result<impl Iterator<Item = SymbolEntry> + Clone + '_> {
        Ok(self.loaded()?.entries())
    }

    /// Lazy sequence of the entries whose node satisfies `predicate`
    pub fn entries_where<'a, P>(
        &'a self,
        predicate: P,
    ) -> Result<impl Iterator<Item = SymbolEntry> + Clone + 'a>
    where
        P: Fn(&SymbolNode) -> bool + Clone + 'a,
    {
        Ok(self.loaded()?.entries_where(predicate))
    }

    /// Entries whose own comment carries `tag` (`@deprecated`, `beta`, ...)
    pub fn entries_tagged<'a>(
        &'a self,
        tag: &'a str,
    ) -> Result<impl Iterator<Item = SymbolEntry> + Clone + 'a> {
        self.entries_where(move |node: &SymbolNode| node.has_tag(tag))
    }
}
