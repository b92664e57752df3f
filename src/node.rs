//! Tree nodes and the recursive descent behind insert, remove and lookup.
//!
//! A node owns its children keyed by edge label. Labels are never empty and
//! siblings never share a first byte, so at most one child can continue any
//! query. Non-root nodes are either terminal or branch into at least two
//! children; removal keeps it that way by pruning empty nodes and joining
//! single-child pass-through nodes into their parent edge.

use std::collections::HashMap;

use smallvec::SmallVec;
use tracing::trace;

use crate::config::SearchStrategy;

/// Edge label. Short labels stay inline.
pub(crate) type Label = SmallVec<[u8; 16]>;

/// A node of the tree.
///
/// The string a node spells is the concatenation of labels on the path from
/// the root. `count` is that string's multiplicity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub(crate) children: HashMap<Label, Node>,
    pub(crate) count: usize,
}

/// Outcome of [`RadixSet::remove`](crate::RadixSet::remove).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    /// The key had multiplicity zero; nothing changed.
    Missing,
    /// One occurrence was removed; the key's node still had a count or
    /// children left.
    Decremented,
    /// The last occurrence was removed and the now empty node was detached.
    Pruned,
}

impl Removal {
    /// Whether an occurrence was actually removed.
    #[inline]
    pub fn is_removed(self) -> bool {
        !matches!(self, Removal::Missing)
    }
}

/// Where a query continues below a node.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Edge {
    /// `key[..n]` is exactly a child label.
    Full(usize),
    /// A child label shares `common` bytes with the key, then diverges or
    /// runs past the end of the key.
    Partial { label: Label, common: usize },
    /// No child shares a first byte with the key.
    Missing,
}

/// Length of the longest common prefix of `a` and `b`.
#[inline]
pub(crate) fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

impl Node {
    #[inline]
    pub(crate) fn leaf() -> Self {
        Self {
            children: HashMap::new(),
            count: 1,
        }
    }

    /// Multiplicity of the string this node spells.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.count > 0
    }

    /// No count and no children. Only the root may be observed in this state.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0 && self.children.is_empty()
    }

    /// Number of child edges.
    #[inline]
    pub fn fanout(&self) -> usize {
        self.children.len()
    }

    /// The child reached through exactly `label`.
    pub fn child(&self, label: impl AsRef<[u8]>) -> Option<&Node> {
        self.children.get(label.as_ref())
    }

    /// This node's own edges, in unspecified order.
    pub fn edges(&self) -> impl Iterator<Item = (&[u8], &Node)> + '_ {
        self.children
            .iter()
            .map(|(label, child)| (label.as_slice(), child))
    }

    /// Non-terminal with a single child: the edge above it could absorb it.
    #[inline]
    fn is_redundant(&self) -> bool {
        self.count == 0 && self.children.len() == 1
    }

    // =========================================================================
    // Child lookup
    // =========================================================================

    /// Linear scan for the child sharing a prefix with `key`.
    pub(crate) fn scan(&self, key: &[u8]) -> Edge {
        for label in self.children.keys() {
            let common = common_prefix_len(label, key);
            if common == 0 {
                continue;
            }
            // Sibling labels have distinct first bytes, so this is the only
            // candidate.
            return if common == label.len() {
                Edge::Full(common)
            } else {
                Edge::Partial {
                    label: label.clone(),
                    common,
                }
            };
        }
        Edge::Missing
    }

    /// Probe the prefixes of `key`, longest first, as exact labels.
    ///
    /// Never reports a partial match.
    pub(crate) fn probe(&self, key: &[u8]) -> Edge {
        (1..=key.len())
            .rev()
            .find(|&i| self.children.contains_key(&key[..i]))
            .map_or(Edge::Missing, Edge::Full)
    }

    #[inline]
    pub(crate) fn locate(&self, key: &[u8], strategy: SearchStrategy) -> Edge {
        if strategy.probes(key.len(), self.children.len()) {
            self.probe(key)
        } else {
            self.scan(key)
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// The node spelling exactly `key` below this one.
    pub(crate) fn find(&self, key: &[u8], strategy: SearchStrategy) -> Option<&Node> {
        if key.is_empty() {
            return Some(self);
        }
        match self.locate(key, strategy) {
            Edge::Full(n) => self.children.get(&key[..n])?.find(&key[n..], strategy),
            Edge::Partial { .. } | Edge::Missing => None,
        }
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Add one occurrence of `key` below this node and return its node.
    pub(crate) fn insert(&mut self, key: &[u8], strategy: SearchStrategy) -> &mut Node {
        if key.is_empty() {
            self.count += 1;
            return self;
        }

        let edge = match self.locate(key, strategy) {
            Edge::Missing if strategy.probes(key.len(), self.children.len()) => self.scan(key),
            edge => edge,
        };

        let consumed = match edge {
            Edge::Full(n) => n,
            Edge::Partial { label, common } => {
                self.split(&label, common);
                common
            }
            Edge::Missing => {
                return self
                    .children
                    .entry(Label::from_slice(key))
                    .or_insert_with(Node::leaf);
            }
        };

        self.children
            .entry(Label::from_slice(&key[..consumed]))
            .or_default()
            .insert(&key[consumed..], strategy)
    }

    /// Subdivide the edge `label` after `at` bytes.
    ///
    /// The old child moves under a fresh intermediate node reached through
    /// `label[..at]`, keyed by `label[at..]`.
    pub(crate) fn split(&mut self, label: &[u8], at: usize) {
        debug_assert!(0 < at && at < label.len());
        let Some(child) = self.children.remove(label) else {
            return;
        };
        let mut mid = Node::default();
        mid.children.insert(Label::from_slice(&label[at..]), child);
        self.children.insert(Label::from_slice(&label[..at]), mid);
        trace!(
            label = %String::from_utf8_lossy(label),
            at,
            "split edge"
        );
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Remove one occurrence of `key` below this node.
    ///
    /// The caller owns the edge to this node and is responsible for pruning
    /// or joining it once this returns.
    pub(crate) fn remove(&mut self, key: &[u8], strategy: SearchStrategy) -> Removal {
        if key.is_empty() {
            if self.count == 0 {
                return Removal::Missing;
            }
            self.count -= 1;
            return if self.is_empty() {
                Removal::Pruned
            } else {
                Removal::Decremented
            };
        }

        let n = match self.locate(key, strategy) {
            Edge::Full(n) => n,
            Edge::Partial { .. } | Edge::Missing => return Removal::Missing,
        };
        let label = &key[..n];
        let Some(child) = self.children.get_mut(label) else {
            return Removal::Missing;
        };

        let outcome = child.remove(&key[n..], strategy);
        if outcome.is_removed() {
            self.repair(label);
        }
        outcome
    }

    /// Restore the compression invariants for the edge `label` after its
    /// subtree shrank.
    fn repair(&mut self, label: &[u8]) {
        let Some(child) = self.children.get(label) else {
            return;
        };
        if child.is_empty() {
            self.children.remove(label);
            trace!(label = %String::from_utf8_lossy(label), "pruned edge");
        } else if child.is_redundant() {
            self.join(label);
        }
    }

    /// Replace the edge `label` and its single-child node with one edge
    /// spelling both labels.
    fn join(&mut self, label: &[u8]) {
        let Some(node) = self.children.remove(label) else {
            return;
        };
        for (suffix, grandchild) in node.children {
            let mut joined = Label::from_slice(label);
            joined.extend_from_slice(&suffix);
            trace!(
                label = %String::from_utf8_lossy(&joined),
                "joined edge"
            );
            self.children.insert(joined, grandchild);
        }
    }
}
