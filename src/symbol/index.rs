//! In-memory documentation index built in a single traversal

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use super::kind::ReflectionKind;
use super::node::{Comment, SymbolId, SymbolNode};
use crate::error::LoadError;

/// What to do when two nodes resolve to the same path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// The later-visited node replaces the earlier one
    #[default]
    Overwrite,
    /// Same as `Overwrite`, but every collision is logged as a warning
    Warn,
    /// Collisions abort the load
    Reject,
}

/// How a name query matches against indexed names
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Names equal to the query
    #[default]
    Exact,
    /// Names containing the query, ignoring case
    Partial,
    /// Names starting with the query, ignoring case
    Prefix,
}

/// A resolved index entry
#[derive(Debug, Clone, Serialize)]
pub struct SymbolEntry {
    pub id: SymbolId,
    pub name: String,
    pub kind: Option<ReflectionKind>,
    pub kind_label: &'static str,
    /// Dot-joined path computed at load time
    pub path: String,
    /// The indexed node itself, shared with the index.
    ///
    /// Serialized without its `children` and `signatures` subtrees.
    #[serde(serialize_with = "serialize_node_payload")]
    pub node: Arc<SymbolNode>,
}

/// Documentation payload of a node, minus its subtrees
#[derive(Serialize)]
struct NodePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a Comment>,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

fn serialize_node_payload<S>(node: &Arc<SymbolNode>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    NodePayload {
        comment: node.comment.as_ref(),
        extra: &node.extra,
    }
    .serialize(serializer)
}

/// Per-kind symbol counts for the loaded document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    pub modules: usize,
    pub classes: usize,
    pub interfaces: usize,
    pub functions: usize,
    pub variables: usize,
    pub type_aliases: usize,
    pub enums: usize,
    pub total: usize,
}

/// A "did you mean" candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub name: String,
    pub distance: usize,
    pub occurrences: usize,
}

/// Indices over one loaded documentation tree
pub struct SymbolIndex {
    /// Nodes by id, in discovery order
    by_id: IndexMap<SymbolId, Arc<SymbolNode>>,
    /// Ids by name, buckets in first-seen order
    by_name: IndexMap<String, Vec<SymbolId>>,
    /// Id by dot-joined path; later nodes replace earlier ones
    by_path: HashMap<String, SymbolId>,
    /// Ids by kind, buckets in first-seen order
    by_kind: IndexMap<ReflectionKind, Vec<SymbolId>>,
    /// Path computed for each id (reverse of `by_path`, never overwritten)
    paths: HashMap<SymbolId, String>,
    parents: HashMap<SymbolId, SymbolId>,
    collisions: usize,
}

impl SymbolIndex {
    fn empty() -> Self {
        Self {
            by_id: IndexMap::new(),
            by_name: IndexMap::new(),
            by_path: HashMap::new(),
            by_kind: IndexMap::new(),
            paths: HashMap::new(),
            parents: HashMap::new(),
            collisions: 0,
        }
    }

    /// Build all indices from a root node.
    ///
    /// Nodes are visited depth-first in pre-order: a node, then each child
    /// subtree in order, then each signature subtree in order. Signatures get
    /// a path segment of their own name under their owner, like children.
    pub fn build(root: Arc<SymbolNode>, policy: CollisionPolicy) -> Result<Self, LoadError> {
        let mut index = Self::empty();
        let mut stack: Vec<(Arc<SymbolNode>, Option<SymbolId>)> = vec![(root, None)];

        while let Some((node, parent)) = stack.pop() {
            let id = node.id;

            if let Some(existing) = index.by_id.get(&id) {
                return Err(LoadError::DuplicateId {
                    id,
                    first: existing.name.clone(),
                    second: node.name.clone(),
                });
            }

            let parent_path = parent
                .and_then(|p| index.paths.get(&p))
                .map(String::as_str)
                .unwrap_or("");
            let path = if parent_path.is_empty() {
                node.name.clone()
            } else {
                format!("{}.{}", parent_path, node.name)
            };

            if let Some(existing) = index.by_path.insert(path.clone(), id) {
                index.collisions += 1;
                match policy {
                    CollisionPolicy::Overwrite => {
                        debug!("Path '{}' now points to symbol {} (was {})", path, id, existing)
                    }
                    CollisionPolicy::Warn => {
                        warn!("Path '{}' now points to symbol {} (was {})", path, id, existing)
                    }
                    CollisionPolicy::Reject => {
                        return Err(LoadError::PathCollision {
                            path,
                            existing,
                            incoming: id,
                        });
                    }
                }
            }

            index
                .by_name
                .entry(node.name.clone())
                .or_default()
                .push(id);

            if let Some(kind) = node.kind {
                index.by_kind.entry(kind).or_default().push(id);
            }

            if let Some(parent) = parent {
                index.parents.insert(id, parent);
            }
            index.paths.insert(id, path);

            // Reversed so that children pop first and in order
            for signature in node.signatures.iter().rev() {
                stack.push((Arc::clone(signature), Some(id)));
            }
            for child in node.children.iter().rev() {
                stack.push((Arc::clone(child), Some(id)));
            }

            index.by_id.insert(id, node);
        }

        Ok(index)
    }

    /// Total number of indexed nodes
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Number of distinct paths (smaller than `len` when paths collided)
    pub fn path_count(&self) -> usize {
        self.by_path.len()
    }

    /// Number of path collisions seen during the build
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Node by id
    pub fn get(&self, id: SymbolId) -> Option<&Arc<SymbolNode>> {
        self.by_id.get(&id)
    }

    /// Resolved entry by id
    pub fn entry(&self, id: SymbolId) -> Option<SymbolEntry> {
        self.by_id.get(&id).map(|node| self.entry_for(node))
    }

    fn entry_for(&self, node: &Arc<SymbolNode>) -> SymbolEntry {
        SymbolEntry {
            id: node.id,
            name: node.name.clone(),
            kind: node.kind,
            kind_label: node.kind.map_or("Unknown", ReflectionKind::label),
            path: self.paths.get(&node.id).cloned().unwrap_or_default(),
            node: Arc::clone(node),
        }
    }

    fn entries_for<'a>(&'a self, ids: &'a [SymbolId]) -> impl Iterator<Item = SymbolEntry> + 'a {
        ids.iter().filter_map(move |id| self.entry(*id))
    }

    /// Find symbols by name
    pub fn find_by_name(&self, name: &str, mode: MatchMode) -> Vec<SymbolEntry> {
        match mode {
            MatchMode::Exact => self
                .by_name
                .get(name)
                .map(|ids| self.entries_for(ids).collect())
                .unwrap_or_default(),
            MatchMode::Partial => {
                let query = name.to_lowercase();
                self.collect_buckets(|key| key.contains(&query))
            }
            MatchMode::Prefix => {
                let query = name.to_lowercase();
                self.collect_buckets(|key| key.starts_with(&query))
            }
        }
    }

    fn collect_buckets(&self, matches: impl Fn(&str) -> bool) -> Vec<SymbolEntry> {
        let mut results = Vec::new();

        for (name, ids) in &self.by_name {
            if matches(name.to_lowercase().as_str()) {
                results.extend(self.entries_for(ids));
            }
        }

        results
    }

    /// Symbol registered at a dot-joined path
    pub fn find_by_path(&self, path: &str) -> Option<SymbolEntry> {
        self.by_path.get(path).and_then(|id| self.entry(*id))
    }

    /// All symbols of exactly one kind
    pub fn find_by_kind(&self, kind: ReflectionKind) -> Vec<SymbolEntry> {
        self.by_kind
            .get(&kind)
            .map(|ids| self.entries_for(ids).collect())
            .unwrap_or_default()
    }

    fn count_kind(&self, kind: ReflectionKind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    /// Kind counts derived from the kind index
    pub fn stats(&self) -> ProjectStats {
        ProjectStats {
            modules: self.count_kind(ReflectionKind::Module),
            classes: self.count_kind(ReflectionKind::Class),
            interfaces: self.count_kind(ReflectionKind::Interface),
            functions: self.count_kind(ReflectionKind::Function),
            variables: self.count_kind(ReflectionKind::Variable),
            type_aliases: self.count_kind(ReflectionKind::TypeAlias),
            enums: self.count_kind(ReflectionKind::Enum),
            total: self.by_id.len(),
        }
    }

    /// Every kind present, with its node count, in first-seen order
    pub fn kinds(&self) -> Vec<(ReflectionKind, usize)> {
        self.by_kind
            .iter()
            .map(|(kind, ids)| (*kind, ids.len()))
            .collect()
    }

    /// Path computed for a node at load time
    pub fn path_of(&self, id: SymbolId) -> Option<&str> {
        self.paths.get(&id).map(String::as_str)
    }

    /// Entry of the node that owns `id` as a child or signature
    pub fn parent_of(&self, id: SymbolId) -> Option<SymbolEntry> {
        self.parents.get(&id).and_then(|parent| self.entry(*parent))
    }

    /// Entries of the direct children, then the signatures, of `id`
    pub fn children_of(&self, id: SymbolId) -> Option<Vec<SymbolEntry>> {
        let node = self.by_id.get(&id)?;
        Some(
            node.children
                .iter()
                .chain(node.signatures.iter())
                .map(|child| self.entry_for(child))
                .collect(),
        )
    }

    /// Lazy sequence of every entry in discovery order.
    ///
    /// The iterator is `Clone`, so a caller can restart it cheaply.
    pub fn entries(&self) -> impl Iterator<Item = SymbolEntry> + Clone + '_ {
        self.by_id.values().map(move |node| self.entry_for(node))
    }

    /// Lazy sequence of the entries whose node satisfies `predicate`
    pub fn entries_where<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = SymbolEntry> + Clone + 'a
    where
        P: Fn(&SymbolNode) -> bool + Clone + 'a,
    {
        self.by_id
            .values()
            .filter(move |node| {
                let node: &SymbolNode = node;
                predicate(node)
            })
            .map(move |node| self.entry_for(node))
    }

    /// Names within `max_distance` edits of `query`, closest first
    pub fn suggest(&self, query: &str, max_distance: usize) -> Vec<Suggestion> {
        let query_lower = query.to_lowercase();
        let mut results = Vec::new();

        for (name, ids) in &self.by_name {
            let distance = levenshtein_distance(&query_lower, &name.to_lowercase());

            if distance <= max_distance {
                results.push(Suggestion {
                    name: name.clone(),
                    distance,
                    occurrences: ids.len(),
                });
            }
        }

        results.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.name.cmp(&b.name)));
        results
    }
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Single rolling row instead of the full matrix
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, a_char) in a_chars.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;

        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            let substitution = diagonal + cost;
            diagonal = row[j + 1];
            row[j + 1] = (row[j + 1] + 1).min(row[j] + 1).min(substitution);
        }
    }

    row[b_chars.len()]
}
