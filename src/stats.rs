//! Shape and memory statistics.

use std::mem::size_of;

use crate::node::{Label, Node};
use crate::RadixSet;

/// Shape statistics for a [`RadixSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Nodes including the root
    pub nodes: usize,
    /// Nodes with a positive count
    pub terminals: usize,
    /// Parent-child edges (always `nodes - 1`)
    pub edges: usize,
    /// Total bytes across all edge labels
    pub label_bytes: usize,
    /// Edges on the longest root-to-leaf path
    pub max_depth: usize,
    /// Sum of all counts
    pub multiplicity: usize,
}

impl TreeStats {
    fn visit(&mut self, node: &Node, depth: usize) {
        self.nodes += 1;
        self.multiplicity += node.count;
        if node.is_terminal() {
            self.terminals += 1;
        }
        self.max_depth = self.max_depth.max(depth);
        for (label, child) in &node.children {
            self.edges += 1;
            self.label_bytes += label.len();
            self.visit(child, depth + 1);
        }
    }
}

/// Approximate heap bytes owned by `node` and its subtree.
fn heap_bytes(node: &Node) -> usize {
    let entry = size_of::<Label>() + size_of::<Node>() + size_of::<u64>();
    let mut total = node.children.capacity() * entry;
    for (label, child) in &node.children {
        if label.spilled() {
            total += label.capacity();
        }
        total += heap_bytes(child);
    }
    total
}

impl RadixSet {
    /// Walk the tree and collect shape statistics.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        stats.visit(&self.root, 0);
        stats
    }

    /// Approximate memory used by the set, in bytes.
    pub fn memory_usage(&self) -> usize {
        size_of::<Self>() + heap_bytes(&self.root)
    }
}
