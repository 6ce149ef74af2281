//! Filter matching against node paths.
//!
//! Each filter classifies a node path into a [`MatchType`]; the set of
//! classifications from every filter is then folded into one
//! [`MatchDecision`] with the fixed precedence
//! `Exact > Partial > Override > All`.

use std::fmt;

use super::parser::{Filter, FilterOrigin, FilterSet};
use super::path::FieldPath;

/// How a single filter relates to a node path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    /// Unrelated
    None,
    /// The node is the selected field
    Exact,
    /// The node is an ancestor of a selected field, or a sibling of a plain filter
    Partial,
    /// A wildcard at the node's parent selects it
    All,
    /// A sub-selection at the node's parent does not list it
    Override,
}

/// What the pruner does with a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchDecision {
    /// Keep the node and everything below it, without looking further
    KeepSubtree,
    /// Visit the children; the node survives only if something below it does
    Traverse,
    /// Remove the node and everything below it
    ExcludeSubtree,
}

impl MatchDecision {
    /// Fold per-filter match types into a decision. `None` entries are ignored.
    pub fn from_matches<I>(matches: I) -> Self
    where
        I: IntoIterator<Item = MatchType>,
    {
        let mut partial = false;
        let mut overridden = false;
        let mut any = false;

        for match_type in matches {
            match match_type {
                MatchType::None => continue,
                MatchType::Exact => return MatchDecision::KeepSubtree,
                MatchType::Partial => partial = true,
                MatchType::Override => overridden = true,
                MatchType::All => {}
            }
            any = true;
        }

        if !any || partial {
            MatchDecision::Traverse
        } else if overridden {
            MatchDecision::ExcludeSubtree
        } else {
            MatchDecision::KeepSubtree
        }
    }
}

impl fmt::Display for MatchDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchDecision::KeepSubtree => "keep-subtree",
            MatchDecision::Traverse => "traverse",
            MatchDecision::ExcludeSubtree => "exclude-subtree",
        })
    }
}

impl Filter {
    /// Classify `path` against this filter.
    #[must_use]
    pub fn match_path(&self, path: &FieldPath) -> MatchType {
        let node_parent = path.parent();
        let parent = self.parent().segments();

        if self.is_wildcard() && parent == node_parent {
            return MatchType::All;
        }

        if parent == node_parent && path.leaf() == Some(self.leaf()) {
            return MatchType::Exact;
        }

        if parent == path.segments() {
            return MatchType::Partial;
        }

        if parent == node_parent {
            return match self.origin() {
                FilterOrigin::SubselectMember => MatchType::Override,
                FilterOrigin::Standalone => MatchType::Partial,
            };
        }

        MatchType::None
    }
}

impl FilterSet {
    /// Decide what happens to the node at `path`, consulting every filter once.
    #[must_use]
    pub fn decide(&self, path: &FieldPath) -> MatchDecision {
        let matches = self.iter().map(|filter| filter.match_path(path));
        let decision = MatchDecision::from_matches(matches);
        tracing::trace!("{} -> {:?}", path, decision);
        decision
    }
}
