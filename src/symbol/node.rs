//! Documentation tree nodes as read from the JSON export

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::kind::ReflectionKind;

/// Identifier of a node within one loaded document
pub type SymbolId = u64;

/// A node of the documentation tree.
///
/// Only the fields the index needs are typed. Everything else the generator
/// emits (sources, flags, types, groups, ...) is kept verbatim in `extra` and
/// written back unchanged on serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolNode {
    pub id: SymbolId,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ReflectionKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Arc<SymbolNode>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signatures: Vec<Arc<SymbolNode>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SymbolNode {
    /// Create a bare node with no documentation payload
    pub fn new(id: SymbolId, name: impl Into<String>, kind: Option<ReflectionKind>) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            comment: None,
            children: Vec::new(),
            signatures: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = SymbolNode>) -> Self {
        self.children.extend(children.into_iter().map(Arc::new));
        self
    }

    pub fn with_signatures(mut self, signatures: impl IntoIterator<Item = SymbolNode>) -> Self {
        self.signatures.extend(signatures.into_iter().map(Arc::new));
        self
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Check whether the node's own comment carries a block or modifier tag.
    ///
    /// The leading `@` is optional: `deprecated` and `@deprecated` are the same tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.comment.as_ref().is_some_and(|c| c.has_tag(tag))
    }
}

/// Parsed documentation comment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub summary: Vec<CommentPart>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub block_tags: Vec<BlockTag>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifier_tags: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Comment {
    /// Plain text of the summary, parts concatenated
    pub fn summary_text(&self) -> String {
        self.summary.iter().map(|part| part.text.as_str()).collect()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.trim_start_matches('@');
        self.modifier_tags
            .iter()
            .chain(self.block_tags.iter().map(|block| &block.tag))
            .any(|t| t.trim_start_matches('@') == wanted)
    }
}

/// One run of comment text (plain text, code, inline tag)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentPart {
    pub kind: String,

    #[serde(default)]
    pub text: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A block tag such as `@returns` or `@deprecated` with its content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTag {
    pub tag: String,

    #[serde(default)]
    pub content: Vec<CommentPart>,
}
