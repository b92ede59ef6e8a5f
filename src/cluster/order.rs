//! Leaf order extraction from a merge tree.
//!
//! Walking the dendrogram from the root, visiting each merge's left child
//! subtree before its right, yields a crossing-free left-to-right leaf
//! arrangement. The walk is an explicit stack over the merge arena rather
//! than recursion, so deep trees from large observation counts cannot
//! overflow the call stack.

use super::linkage::MergeTree;
use crate::color::{Color, ALMOST_BLACK};

/// Leaf visitation order plus per-branch colors for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafOrder {
    order: Vec<usize>,
    branch_colors: Vec<Color>,
}

impl LeafOrder {
    /// Extract the leaf order, painting every branch [`ALMOST_BLACK`].
    pub fn extract(tree: &MergeTree) -> Self {
        Self::extract_with(tree, |_| ALMOST_BLACK)
    }

    /// Extract the leaf order, coloring each branch through `color_fn`.
    ///
    /// `color_fn` receives the original observation ids under the branch,
    /// one call per merge record, in merge-creation order.
    pub fn extract_with<F>(tree: &MergeTree, color_fn: F) -> Self
    where
        F: Fn(&[usize]) -> Color,
    {
        let n = tree.n_items();
        if n <= 1 {
            // Trivial tree, nothing to walk.
            return Self {
                order: (0..n).collect(),
                branch_colors: Vec::new(),
            };
        }

        let mut order = Vec::with_capacity(n);
        let mut stack = Vec::with_capacity(n);
        stack.push(tree.root());
        while let Some(id) = stack.pop() {
            if id < n {
                order.push(id);
            } else {
                let merge = tree.merges()[id - n];
                // Right pushed first so the left subtree is visited first.
                stack.push(merge.right);
                stack.push(merge.left);
            }
        }

        // Accumulate each branch's member set bottom-up over the arena.
        let mut members: Vec<Vec<usize>> = Vec::with_capacity(tree.n_merges());
        for merge in tree.merges() {
            let mut leaves = Vec::with_capacity(merge.size);
            for child in [merge.left, merge.right] {
                if child < n {
                    leaves.push(child);
                } else {
                    leaves.extend_from_slice(&members[child - n]);
                }
            }
            members.push(leaves);
        }
        let branch_colors = members.iter().map(|m| color_fn(m)).collect();

        Self {
            order,
            branch_colors,
        }
    }

    /// The permutation of `0..n-1` in leaf visitation order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Color of the branch created by merge `i`.
    pub fn branch_colors(&self) -> &[Color] {
        &self.branch_colors
    }

    /// Consume into the bare permutation.
    pub fn into_order(self) -> Vec<usize> {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HIGHLIGHT;

    fn three_leaf_tree() -> MergeTree {
        // leaves 0,1 merge into node 3; node 3 and leaf 2 merge at the root
        let mut tree = MergeTree::new(3);
        tree.add_merge(0, 1, 1.0, 2);
        tree.add_merge(2, 3, 4.0, 3);
        tree
    }

    #[test]
    fn test_left_subtree_visited_first() {
        let order = LeafOrder::extract(&three_leaf_tree());
        assert_eq!(order.order(), &[2, 0, 1]);
    }

    #[test]
    fn test_order_is_permutation() {
        let mut tree = MergeTree::new(5);
        tree.add_merge(3, 4, 0.5, 2);
        tree.add_merge(0, 1, 0.7, 2);
        tree.add_merge(2, 6, 1.1, 3);
        tree.add_merge(5, 7, 2.0, 5);
        let mut order = LeafOrder::extract(&tree).into_order();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_single_leaf_skips_walk() {
        let order = LeafOrder::extract(&MergeTree::new(1));
        assert_eq!(order.order(), &[0]);
        assert!(order.branch_colors().is_empty());
    }

    #[test]
    fn test_default_branch_color_is_neutral() {
        let order = LeafOrder::extract(&three_leaf_tree());
        assert_eq!(order.branch_colors(), &[ALMOST_BLACK, ALMOST_BLACK]);
    }

    #[test]
    fn test_branch_color_fn_sees_member_leaves() {
        let order = LeafOrder::extract_with(&three_leaf_tree(), |leaves| {
            if leaves.contains(&2) {
                HIGHLIGHT
            } else {
                ALMOST_BLACK
            }
        });
        // merge 0 holds {0,1}; the root holds {2,0,1}
        assert_eq!(order.branch_colors(), &[ALMOST_BLACK, HIGHLIGHT]);
    }
}
