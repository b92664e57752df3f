//! Integrity checks for troubleshooting and tests.

use std::collections::HashSet;

use super::{Node, RadixSet};

impl RadixSet {
    /// Verify tree integrity - returns list of issues found.
    ///
    /// Checks that labels are non-empty, that siblings never share a first
    /// byte, that no non-root node is empty or a single-child pass-through,
    /// and that [`RadixSet::len`] matches the counts stored in the tree.
    pub fn verify_integrity(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let total = Self::verify_node(&self.root, &mut issues, Vec::new());
        if total != self.len {
            issues.push(format!(
                "len() is {} but node counts sum to {}",
                self.len, total
            ));
        }
        issues
    }

    /// Returns the sum of counts in the subtree.
    fn verify_node(node: &Node, issues: &mut Vec<String>, path: Vec<u8>) -> usize {
        let is_root = path.is_empty();
        if !is_root {
            if node.is_empty() {
                issues.push(format!(
                    "empty node at {:?}",
                    String::from_utf8_lossy(&path)
                ));
            } else if node.count == 0 && node.children.len() == 1 {
                issues.push(format!(
                    "non-terminal node with a single child at {:?}",
                    String::from_utf8_lossy(&path)
                ));
            }
        }

        let mut first_bytes = HashSet::new();
        let mut total = node.count;
        for (label, child) in &node.children {
            let Some(&first) = label.first() else {
                issues.push(format!(
                    "empty label under {:?}",
                    String::from_utf8_lossy(&path)
                ));
                continue;
            };
            if !first_bytes.insert(first) {
                issues.push(format!(
                    "siblings under {:?} share first byte {:#04x}",
                    String::from_utf8_lossy(&path),
                    first
                ));
            }
            let mut child_path = path.clone();
            child_path.extend_from_slice(label);
            total += Self::verify_node(child, issues, child_path);
        }
        total
    }
}
