//! Reflection kinds of documentation nodes.
//!
//! The numeric values are bit-flag shaped, as emitted by the documentation
//! generator, but every value is a discrete kind. Kinds are never combined.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Syntactic role of a documentation node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ReflectionKind {
    Project,
    Module,
    Namespace,
    Enum,
    EnumMember,
    Variable,
    Function,
    Class,
    Interface,
    Constructor,
    Property,
    Method,
    CallSignature,
    IndexSignature,
    ConstructorSignature,
    Parameter,
    TypeLiteral,
    TypeParameter,
    Accessor,
    GetSignature,
    SetSignature,
    TypeAlias,
    Reference,
    Document,
}

impl ReflectionKind {
    /// Every known kind, in ascending tag order
    pub const ALL: [ReflectionKind; 24] = [
        Self::Project,
        Self::Module,
        Self::Namespace,
        Self::Enum,
        Self::EnumMember,
        Self::Variable,
        Self::Function,
        Self::Class,
        Self::Interface,
        Self::Constructor,
        Self::Property,
        Self::Method,
        Self::CallSignature,
        Self::IndexSignature,
        Self::ConstructorSignature,
        Self::Parameter,
        Self::TypeLiteral,
        Self::TypeParameter,
        Self::Accessor,
        Self::GetSignature,
        Self::SetSignature,
        Self::TypeAlias,
        Self::Reference,
        Self::Document,
    ];

    /// Numeric tag as it appears in the serialized tree
    pub fn tag(self) -> u32 {
        match self {
            Self::Project => 0x1,
            Self::Module => 0x2,
            Self::Namespace => 0x4,
            Self::Enum => 0x8,
            Self::EnumMember => 0x10,
            Self::Variable => 0x20,
            Self::Function => 0x40,
            Self::Class => 0x80,
            Self::Interface => 0x100,
            Self::Constructor => 0x200,
            Self::Property => 0x400,
            Self::Method => 0x800,
            Self::CallSignature => 0x1000,
            Self::IndexSignature => 0x2000,
            Self::ConstructorSignature => 0x4000,
            Self::Parameter => 0x8000,
            Self::TypeLiteral => 0x10000,
            Self::TypeParameter => 0x20000,
            Self::Accessor => 0x40000,
            Self::GetSignature => 0x80000,
            Self::SetSignature => 0x100000,
            Self::TypeAlias => 0x200000,
            Self::Reference => 0x400000,
            Self::Document => 0x800000,
        }
    }

    /// Look up a kind by its exact numeric tag
    pub fn from_tag(tag: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.tag() == tag)
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::Module => "Module",
            Self::Namespace => "Namespace",
            Self::Enum => "Enumeration",
            Self::EnumMember => "Enumeration Member",
            Self::Variable => "Variable",
            Self::Function => "Function",
            Self::Class => "Class",
            Self::Interface => "Interface",
            Self::Constructor => "Constructor",
            Self::Property => "Property",
            Self::Method => "Method",
            Self::CallSignature => "Call Signature",
            Self::IndexSignature => "Index Signature",
            Self::ConstructorSignature => "Constructor Signature",
            Self::Parameter => "Parameter",
            Self::TypeLiteral => "Type Literal",
            Self::TypeParameter => "Type Parameter",
            Self::Accessor => "Accessor",
            Self::GetSignature => "Get Signature",
            Self::SetSignature => "Set Signature",
            Self::TypeAlias => "Type Alias",
            Self::Reference => "Reference",
            Self::Document => "Document",
        }
    }

    fn variant_name(self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::Module => "Module",
            Self::Namespace => "Namespace",
            Self::Enum => "Enum",
            Self::EnumMember => "EnumMember",
            Self::Variable => "Variable",
            Self::Function => "Function",
            Self::Class => "Class",
            Self::Interface => "Interface",
            Self::Constructor => "Constructor",
            Self::Property => "Property",
            Self::Method => "Method",
            Self::CallSignature => "CallSignature",
            Self::IndexSignature => "IndexSignature",
            Self::ConstructorSignature => "ConstructorSignature",
            Self::Parameter => "Parameter",
            Self::TypeLiteral => "TypeLiteral",
            Self::TypeParameter => "TypeParameter",
            Self::Accessor => "Accessor",
            Self::GetSignature => "GetSignature",
            Self::SetSignature => "SetSignature",
            Self::TypeAlias => "TypeAlias",
            Self::Reference => "Reference",
            Self::Document => "Document",
        }
    }
}

impl fmt::Display for ReflectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Error for tags or names that do not denote a known kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reflection kind '{0}'")]
pub struct UnknownKind(pub String);

impl TryFrom<u32> for ReflectionKind {
    type Error = UnknownKind;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        Self::from_tag(tag).ok_or_else(|| UnknownKind(tag.to_string()))
    }
}

impl From<ReflectionKind> for u32 {
    fn from(kind: ReflectionKind) -> Self {
        kind.tag()
    }
}

impl FromStr for ReflectionKind {
    type Err = UnknownKind;

    /// Accepts the numeric tag, the variant name or the label, ignoring case,
    /// spaces, dashes and underscores (`type_alias`, `Type Alias`, `2097152`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(tag) = trimmed.parse::<u32>() {
            return Self::try_from(tag);
        }

        let wanted = normalize(trimmed);
        Self::ALL
            .iter()
            .copied()
            .find(|kind| normalize(kind.variant_name()) == wanted || normalize(kind.label()) == wanted)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
