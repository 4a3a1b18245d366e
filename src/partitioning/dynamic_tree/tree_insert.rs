use super::{DynamicTree, NULL_NODE};
use crate::bounding_volume::BoundingVolume;
use crate::math::Real;

impl<T> DynamicTree<T> {
    /// Inserts the detached leaf `leaf` into the non-empty tree.
    ///
    /// Descends from the root toward the child whose fat box grows the least when merged with
    /// the leaf's fat box (ties go to the left child), then splits the leaf reached at the
    /// bottom into a new branch holding both leaves.
    pub(super) fn insert(&mut self, leaf: u32) {
        debug_assert!(self.root != NULL_NODE);
        debug_assert!(self.nodes[leaf as usize].is_leaf());

        let leaf_fat = self.nodes[leaf as usize].fat;
        let mut target = self.root;

        while !self.nodes[target as usize].is_leaf() {
            let node = &self.nodes[target as usize];
            let left = &self.nodes[node.left as usize].fat;
            let right = &self.nodes[node.right as usize].fat;
            let left_cost: Real = left.merged_area(&leaf_fat) - left.area();
            let right_cost: Real = right.merged_area(&leaf_fat) - right.area();

            target = if left_cost <= right_cost {
                node.left
            } else {
                node.right
            };
        }

        // Target is a leaf, split it.
        let branch = self.alloc();
        let grandparent = self.nodes[target as usize].parent;

        {
            let node = &mut self.nodes[branch as usize];
            node.parent = grandparent;
            node.left = leaf;
            node.right = target;
        }
        self.nodes[leaf as usize].parent = branch;
        self.nodes[target as usize].parent = branch;

        if grandparent == NULL_NODE {
            self.root = branch;
        } else {
            self.replace_child(grandparent, target, branch);
        }

        self.refit_ancestors(branch);
    }

    /// Makes `new_child` take the place of `old_child` among the children of `parent`.
    pub(super) fn replace_child(&mut self, parent: u32, old_child: u32, new_child: u32) {
        let parent = &mut self.nodes[parent as usize];

        if parent.left == old_child {
            parent.left = new_child;
        } else {
            debug_assert_eq!(parent.right, old_child);
            parent.right = new_child;
        }
    }

    /// Recomputes the tight and fat boxes of the branch `id` from its two children.
    #[inline]
    pub(super) fn refit_branch(&mut self, id: u32) {
        let node = &self.nodes[id as usize];
        let left = &self.nodes[node.left as usize];
        let right = &self.nodes[node.right as usize];
        let tight = left.tight.merged(&right.tight);
        let fat = left.fat.merged(&right.fat);

        let node = &mut self.nodes[id as usize];
        node.tight = tight;
        node.fat = fat;
    }

    /// Refits the branch `id` and all its ancestors, up to the root.
    pub(super) fn refit_ancestors(&mut self, mut id: u32) {
        while id != NULL_NODE {
            self.refit_branch(id);
            id = self.nodes[id as usize].parent;
        }
    }
}
