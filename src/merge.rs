//! Union of two trees.
//!
//! Subtrees of the donor are moved, not copied. Where the two trees cut
//! the same strings at different edge boundaries, the receiving edge is
//! split first so the donor subtree lands on a node spelling exactly its
//! path.

use crate::node::{Edge, Label, Node};

impl Node {
    /// Add every multiplicity of `other` (spelling the same string as
    /// `self`) into `self`.
    pub(crate) fn absorb(&mut self, other: Node) {
        self.count += other.count;
        for (label, child) in other.children {
            self.graft(&label, child);
        }
    }

    /// Attach `subtree` at `self` + `label`, reconciling edge boundaries.
    fn graft(&mut self, label: &[u8], subtree: Node) {
        if label.is_empty() {
            self.absorb(subtree);
            return;
        }

        // Probing cannot see partial matches, so always scan.
        let consumed = match self.scan(label) {
            Edge::Missing => {
                self.children.insert(Label::from_slice(label), subtree);
                return;
            }
            Edge::Full(n) => n,
            Edge::Partial {
                label: existing,
                common,
            } => {
                self.split(&existing, common);
                common
            }
        };

        self.children
            .entry(Label::from_slice(&label[..consumed]))
            .or_default()
            .graft(&label[consumed..], subtree);
    }
}
