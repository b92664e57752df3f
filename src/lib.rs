//! # radix-set
//!
//! A multiset of byte strings stored in a compressed prefix tree.
//!
//! Edges carry whole substrings rather than single bytes, and every node
//! below the root is either the end of a stored string or a branching
//! point, so the tree has at most one node per distinct branching point.
//! Each node keeps the multiplicity of the string it spells.
//!
//! ## Example
//!
//! ```rust
//! use radix_set::RadixSet;
//!
//! let mut set = RadixSet::new();
//! set.insert("car");
//! set.insert("cat");
//! set.insert("cat");
//!
//! assert!(set.contains("car"));
//! assert!(!set.contains("ca"));
//! assert!(set.contains_at_least("cat", 2));
//!
//! set.remove("cat");
//! assert_eq!(set.multiplicity("cat"), 1);
//! ```

mod config;
mod debug;
mod merge;
mod node;
mod stats;

pub use config::{Config, ConfigError, SearchStrategy, SEARCH_ENV};
pub use node::{Node, Removal};
pub use stats::TreeStats;

use tracing::debug;

/// A multiset of byte strings backed by a radix tree.
///
/// Keys are compared byte-wise; anything that is `AsRef<[u8]>` works,
/// including the empty string, which is counted at the root.
///
/// The set is an ordinary owned value. Mutation needs `&mut self`; share it
/// across threads behind a lock of your choosing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RadixSet {
    pub(crate) root: Node,
    pub(crate) len: usize,
    config: Config,
}

impl RadixSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            root: Node::default(),
            len: 0,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Total multiplicity: every occurrence of every stored string.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Multiplicity of the empty string, held by the root.
    #[inline]
    pub fn count(&self) -> usize {
        self.root.count
    }

    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn clear(&mut self) {
        self.root = Node::default();
        self.len = 0;
    }

    /// Add one occurrence of `key` and return the node that counts it.
    pub fn insert(&mut self, key: impl AsRef<[u8]>) -> &Node {
        self.len += 1;
        self.root.insert(key.as_ref(), self.config.search)
    }

    /// Remove one occurrence of `key`.
    ///
    /// Removing a key that is not present is a no-op and reports
    /// [`Removal::Missing`].
    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> Removal {
        let outcome = self.root.remove(key.as_ref(), self.config.search);
        if outcome.is_removed() {
            self.len -= 1;
        }
        outcome
    }

    /// The node spelling exactly `key`, terminal or not.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Node> {
        self.root.find(key.as_ref(), self.config.search)
    }

    /// Number of outstanding insertions of `key`.
    pub fn multiplicity(&self, key: impl AsRef<[u8]>) -> usize {
        self.get(key).map_or(0, Node::count)
    }

    #[inline]
    pub fn contains(&self, key: impl AsRef<[u8]>) -> bool {
        self.contains_at_least(key, 1)
    }

    /// Whether `key` has been inserted at least `n` more times than removed.
    pub fn contains_at_least(&self, key: impl AsRef<[u8]>, n: usize) -> bool {
        self.multiplicity(key) >= n
    }

    /// Move every occurrence in `other` into this set.
    ///
    /// Afterwards the set holds each string with the sum of both
    /// multiplicities, regardless of how either tree happened to cut its
    /// edges.
    pub fn merge(&mut self, other: RadixSet) {
        if other.is_empty() {
            return;
        }
        let moved = other.len;
        self.root.absorb(other.root);
        self.len += moved;
        debug!(moved, len = self.len, "merged radix sets");
    }
}

impl<K: AsRef<[u8]>> Extend<K> for RadixSet {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: AsRef<[u8]>> FromIterator<K> for RadixSet {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}


#[cfg(test)]
mod proptests;
