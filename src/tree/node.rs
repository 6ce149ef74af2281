//! Abstract document tree.
//!
//! Every supported input is read into this shape before filtering: records are
//! ordered lists of named nodes, sequences hold unnamed elements, and scalars
//! are the leaves.

use crate::filter::FieldPath;

/// Leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    /// Only for values above `i64::MAX`
    UInt(u64),
    Float(f64),
    String(String),
}

/// A named member of a record
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub content: Content,
}

/// Body of a node, or the document root
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Scalar(Scalar),
    /// Named members in document order
    Record(Vec<Node>),
    /// Elements share the path of the sequence itself
    Sequence(Vec<Content>),
}

impl Node {
    pub fn new(name: impl Into<String>, content: impl Into<Content>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

impl Content {
    /// Build a record from `(name, content)` pairs
    pub fn record<I, K, V>(members: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Content>,
    {
        Content::Record(
            members
                .into_iter()
                .map(|(name, content)| Node::new(name, content))
                .collect(),
        )
    }

    pub fn sequence<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Content>,
    {
        Content::Sequence(items.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn null() -> Self {
        Content::Scalar(Scalar::Null)
    }

    /// Whether there is anything below this content
    #[must_use]
    pub fn has_children(&self) -> bool {
        match self {
            Content::Scalar(_) => false,
            Content::Record(members) => !members.is_empty(),
            Content::Sequence(items) => !items.is_empty(),
        }
    }

    /// Member of a record by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Content> {
        match self {
            Content::Record(members) => members
                .iter()
                .find(|node| node.name == name)
                .map(|node| &node.content),
            _ => None,
        }
    }

    /// Follow a `/`-delimited path through nested records
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&Content> {
        FieldPath::parse(path)
            .segments()
            .iter()
            .try_fold(self, |content, name| content.get(name))
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Content::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Content::Scalar(Scalar::String(value)) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Content::Scalar(Scalar::Int(value)) => Some(*value),
            _ => None,
        }
    }

    /// Member names of a record, in order
    #[must_use]
    pub fn member_names(&self) -> Vec<&str> {
        match self {
            Content::Record(members) => members.iter().map(|node| node.name.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// Number of named nodes anywhere below this content
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Content::Scalar(_) => 0,
            Content::Record(members) => {
                members.iter().map(|node| 1 + node.content.node_count()).sum()
            }
            Content::Sequence(items) => items.iter().map(Content::node_count).sum(),
        }
    }
}

impl From<Scalar> for Content {
    fn from(scalar: Scalar) -> Self {
        Content::Scalar(scalar)
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Content::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::Scalar(Scalar::String(value))
    }
}

impl From<i64> for Content {
    fn from(value: i64) -> Self {
        Content::Scalar(Scalar::Int(value))
    }
}

impl From<bool> for Content {
    fn from(value: bool) -> Self {
        Content::Scalar(Scalar::Bool(value))
    }
}

impl From<f64> for Content {
    fn from(value: f64) -> Self {
        Content::Scalar(Scalar::Float(value))
    }
}
