//! Tree pruning
//!
//! A single depth-first pass over a [`Content`] tree. Every named node gets
//! one [`MatchDecision`](crate::MatchDecision) from the filter set:
//!
//! - `KeepSubtree` keeps the node without looking below it
//! - `ExcludeSubtree` drops the node without looking below it
//! - `Traverse` recurses; the node survives only if one of its children does
//!
//! A node's child list is compacted only after every child has been decided,
//! so a parent emptied by pruning is itself removed from its own parent.
//!
//! Sequence elements are not named and share the path of the sequence; each
//! element is traversed the same way.

use crate::filter::{FieldPath, FilterSet, MatchDecision};
use crate::tree::{Content, Node};

/// Decision taken for one named node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneEvent {
    pub path: FieldPath,
    pub decision: MatchDecision,
    /// Whether the node is still in the tree after its subtree was resolved
    pub retained: bool,
}

/// Counters for one prune run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneStats {
    /// Named nodes that received a decision
    pub visited: usize,
    /// Named nodes detached from their parent (descendants not counted)
    pub removed: usize,
}

impl PruneStats {
    #[must_use]
    pub fn retained(&self) -> usize {
        self.visited - self.removed
    }
}

/// Applies a parsed [`FilterSet`] to document trees.
///
/// Holds no state between runs; the same pruner can be used on any number of
/// trees, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct Pruner<'a> {
    filters: &'a FilterSet,
}

impl<'a> Pruner<'a> {
    #[must_use]
    pub fn new(filters: &'a FilterSet) -> Self {
        Self { filters }
    }

    /// Prune `root` in place. The root itself is never matched or removed.
    pub fn prune(&self, root: &mut Content) -> PruneStats {
        self.run(root, None)
    }

    /// Prune `root` in place and record one event per visited node, in
    /// document order (parents before their children).
    pub fn prune_traced(&self, root: &mut Content, events: &mut Vec<PruneEvent>) -> PruneStats {
        self.run(root, Some(events))
    }

    fn run(&self, root: &mut Content, events: Option<&mut Vec<PruneEvent>>) -> PruneStats {
        let mut walk = Walk {
            filters: self.filters,
            stats: PruneStats::default(),
            events,
        };
        walk.root(root);

        tracing::debug!(
            "Pruned document with {} filters: {} nodes visited, {} removed",
            self.filters.len(),
            walk.stats.visited,
            walk.stats.removed
        );
        walk.stats
    }
}

struct Walk<'a, 'e> {
    filters: &'a FilterSet,
    stats: PruneStats,
    events: Option<&'e mut Vec<PruneEvent>>,
}

impl Walk<'_, '_> {
    fn root(&mut self, root: &mut Content) {
        match root {
            Content::Record(members) => self.prune_members(&FieldPath::root(), members),
            // every element of a root sequence is a root of its own
            Content::Sequence(items) => items.iter_mut().for_each(|item| self.root(item)),
            Content::Scalar(_) => {}
        }
    }

    /// Decide every member, then drop the ones not retained.
    fn prune_members(&mut self, parent: &FieldPath, members: &mut Vec<Node>) {
        members.retain_mut(|node| {
            let path = parent.join(&node.name);
            self.visit(&path, &mut node.content)
        });
    }

    /// Returns whether the node at `path` stays in its parent.
    fn visit(&mut self, path: &FieldPath, content: &mut Content) -> bool {
        let decision = self.filters.decide(path);
        self.stats.visited += 1;

        let slot = self.events.as_deref_mut().map(|events| {
            events.push(PruneEvent {
                path: path.clone(),
                decision,
                retained: false,
            });
            events.len() - 1
        });

        let retained = match decision {
            MatchDecision::KeepSubtree => true,
            MatchDecision::ExcludeSubtree => false,
            MatchDecision::Traverse => self.traverse(path, content),
        };

        if !retained {
            self.stats.removed += 1;
        }
        if let (Some(events), Some(slot)) = (self.events.as_deref_mut(), slot) {
            events[slot].retained = retained;
        }

        retained
    }

    /// Recurse below a `Traverse` node; false when nothing below survives.
    fn traverse(&mut self, path: &FieldPath, content: &mut Content) -> bool {
        match content {
            // a leaf nothing selected
            Content::Scalar(_) => false,
            Content::Record(members) => {
                self.prune_members(path, members);
                !members.is_empty()
            }
            Content::Sequence(items) => {
                items.retain_mut(|item| self.traverse(path, item));
                !items.is_empty()
            }
        }
    }
}
