//! Filter expression parsing.
//!
//! Expressions come in two forms:
//!
//! - simple paths: `Property1`, `SubObject/Property2`, `SubObject/*`
//! - sub-selections: `SubObject(Property1,Property2)`, `a/b/c(d,e)`
//!
//! Every expression is flattened into one or more [`Filter`] records. Blank
//! entries select nothing and are skipped.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::path::FieldPath;
use crate::error::{Error, Result};

/// Leaf token selecting every child of a parent
pub const WILDCARD: &str = "*";

lazy_static! {
    static ref SIMPLE_PATH: Regex = Regex::new(r"^(?:[A-Za-z0-9_]+|\*)(?:/(?:[A-Za-z0-9_]+|\*))*$")
        .expect("simple path grammar is a valid regex");
    static ref SUBSELECT: Regex = Regex::new(concat!(
        r"^(?P<node>[A-Za-z0-9_]+(?:/[A-Za-z0-9_]+)*)",
        r"\((?P<leaves>[A-Za-z0-9_]+(?:,[A-Za-z0-9_]+)*)\)$"
    ))
    .expect("sub-selection grammar is a valid regex");
}

/// How a filter was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOrigin {
    /// Written directly, e.g. `a/b` or `*`
    Standalone,
    /// Expanded from a grouped sub-selection, e.g. the `c` of `a/b(c,d)`
    SubselectMember,
}

/// One normalized filter target: a parent path plus a leaf name or `*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filter {
    parent: FieldPath,
    leaf: String,
    origin: FilterOrigin,
}

impl Filter {
    fn new(parent: FieldPath, leaf: String, origin: FilterOrigin) -> Self {
        debug_assert!(!leaf.is_empty());
        Self {
            parent,
            leaf,
            origin,
        }
    }

    #[must_use]
    pub fn parent(&self) -> &FieldPath {
        &self.parent
    }

    #[must_use]
    pub fn leaf(&self) -> &str {
        &self.leaf
    }

    #[must_use]
    pub fn origin(&self) -> FilterOrigin {
        self.origin
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.leaf == WILDCARD
    }

    /// Full path this filter points at (`parent/leaf`)
    #[must_use]
    pub fn target(&self) -> FieldPath {
        self.parent.join(&self.leaf)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.target())
    }
}

/// A raw filter expression as supplied by a caller.
///
/// Implemented for string types and for `Option`s of them, so absent entries
/// (`None`) can sit next to real expressions and are skipped like blank ones.
pub trait FilterEntry {
    fn expression(&self) -> Option<&str>;
}

impl FilterEntry for str {
    fn expression(&self) -> Option<&str> {
        Some(self)
    }
}

impl FilterEntry for String {
    fn expression(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: FilterEntry> FilterEntry for Option<T> {
    fn expression(&self) -> Option<&str> {
        self.as_ref().and_then(FilterEntry::expression)
    }
}

impl<T: FilterEntry + ?Sized> FilterEntry for &T {
    fn expression(&self) -> Option<&str> {
        (**self).expression()
    }
}

/// What to do when no usable expression remains after skipping blank entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyPolicy {
    /// Fail with [`Error::EmptyFilterSet`]
    #[default]
    Reject,
    /// Accept the empty set; pruning then removes everything below the root
    MatchNothing,
}

/// Flattened, order-irrelevant collection of filters for one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    /// Parse every entry; blank and absent entries are skipped.
    ///
    /// Fails on the first malformed expression, in which case no set is built.
    pub fn parse<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: FilterEntry,
    {
        let mut filters = Vec::new();

        for entry in entries {
            let Some(expression) = entry.expression() else {
                continue;
            };
            let expression = expression.trim();
            if expression.is_empty() {
                continue;
            }
            filters.extend(parse_expression(expression)?);
        }

        Ok(Self { filters })
    }

    /// Parse a caller-supplied collection, enforcing the argument checks:
    /// a missing collection is an error, and so is an empty result under
    /// [`EmptyPolicy::Reject`].
    pub fn from_collection<I>(entries: Option<I>, policy: EmptyPolicy) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: FilterEntry,
    {
        let entries = entries.ok_or(Error::NullFilterCollection)?;
        let set = Self::parse(entries)?;

        if set.is_empty() && policy == EmptyPolicy::Reject {
            return Err(Error::EmptyFilterSet);
        }

        Ok(set)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.filters.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

/// Parse one trimmed, non-empty expression.
fn parse_expression(expression: &str) -> Result<Vec<Filter>> {
    if let Some(captures) = SUBSELECT.captures(expression) {
        let node = FieldPath::parse(&captures["node"]);
        let filters = captures["leaves"]
            .split(',')
            .map(|leaf| Filter::new(node.clone(), leaf.to_string(), FilterOrigin::SubselectMember))
            .collect();
        return Ok(filters);
    }

    if SIMPLE_PATH.is_match(expression) {
        let path = FieldPath::parse(expression);
        if let Some((leaf, parent)) = path.segments().split_last() {
            let parent = FieldPath::from_segments(parent.iter().cloned());
            return Ok(vec![Filter::new(parent, leaf.clone(), FilterOrigin::Standalone)]);
        }
    }

    Err(Error::syntax(expression, diagnose(expression)))
}

/// Best guess at why an expression failed both grammars.
fn diagnose(expression: &str) -> &'static str {
    let opens = expression.matches('(').count();
    let closes = expression.matches(')').count();

    if opens != closes {
        return "unbalanced parentheses";
    }
    if expression.contains("()") {
        return "empty sub-selection";
    }
    if expression.contains(",,") || expression.contains("(,") || expression.contains(",)") {
        return "empty leaf in sub-selection";
    }
    if opens > 0 {
        return "malformed sub-selection";
    }
    if expression.split('/').any(str::is_empty) {
        return "empty path segment";
    }
    "invalid character in field name"
}
