use super::{DynamicTree, NULL_NODE};
use alloc::vec::Vec;
use smallvec::SmallVec;

const TRAVERSAL_STACK_SIZE: usize = 32;

impl<T> DynamicTree<T> {
    /// Detaches the leaf `leaf` from the tree without releasing its slot.
    ///
    /// The former parent branch is released and the leaf's sibling takes its place (becoming
    /// the root if there is no grandparent). The ancestors are refitted afterward.
    ///
    /// # Panics
    ///
    /// Panics if `leaf` isn't a leaf.
    pub(super) fn pull(&mut self, leaf: u32) {
        assert!(
            self.nodes[leaf as usize].is_leaf(),
            "Only leaves can be pulled out of the tree."
        );

        if leaf == self.root {
            self.root = NULL_NODE;
            return;
        }

        let parent = self.nodes[leaf as usize].parent;
        let parent_node = &self.nodes[parent as usize];
        let sibling = if parent_node.left == leaf {
            parent_node.right
        } else {
            parent_node.left
        };
        let grandparent = parent_node.parent;

        self.nodes[sibling as usize].parent = grandparent;

        if grandparent == NULL_NODE {
            self.root = sibling;
        } else {
            self.replace_child(grandparent, parent, sibling);
            self.refit_ancestors(grandparent);
        }

        self.free(parent);
        self.nodes[leaf as usize].parent = NULL_NODE;
    }

    /// Refits the tree after the tight boxes of some leaves were modified through
    /// [`Self::tight_aabb_mut`].
    ///
    /// Every leaf whose tight box escaped its fat box is detached, re-fattened, and reinserted
    /// from the root. Leaves that moved less than the margin are left where they are. Returns
    /// the number of reinserted leaves.
    ///
    /// If the tree contains a single leaf, its fat box is simply recomputed from its tight box.
    pub fn update(&mut self) -> usize {
        if self.root == NULL_NODE {
            return 0;
        }

        let margin = self.margin;

        if self.nodes[self.root as usize].is_leaf() {
            self.nodes[self.root as usize].refatten(margin);
            return 0;
        }

        // Collect first: reinsertion restructures the tree we are walking.
        let invalid = self.collect_invalid_leaves();

        for &leaf in &invalid {
            self.pull(leaf);
            self.nodes[leaf as usize].refatten(margin);
            self.insert(leaf);
        }

        // Leaves that moved within their margin still changed their tight box.
        self.refit_all();

        log::trace!(
            "Dynamic tree update: {} of {} leaves reinserted.",
            invalid.len(),
            self.leaf_count
        );

        invalid.len()
    }

    /// Lists every leaf whose fat box no longer contains its tight box.
    fn collect_invalid_leaves(&self) -> Vec<u32> {
        let mut invalid = Vec::new();
        let mut stack: SmallVec<[u32; TRAVERSAL_STACK_SIZE]> = SmallVec::new();
        stack.push(self.root);

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];

            if node.is_leaf() {
                if !node.is_valid() {
                    invalid.push(id);
                }
            } else {
                stack.push(node.right);
                stack.push(node.left);
            }
        }

        invalid
    }

    /// Recomputes the boxes of every branch from the leaves up.
    fn refit_all(&mut self) {
        if self.root == NULL_NODE || self.nodes[self.root as usize].is_leaf() {
            return;
        }

        // A pre-order listing of the branches visits every parent before its children, so
        // walking it backward refits children first.
        let mut branches = Vec::with_capacity(self.leaf_count.saturating_sub(1));
        let mut stack: SmallVec<[u32; TRAVERSAL_STACK_SIZE]> = SmallVec::new();
        stack.push(self.root);

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];

            if !node.is_leaf() {
                branches.push(id);
                stack.push(node.right);
                stack.push(node.left);
            }
        }

        for &id in branches.iter().rev() {
            self.refit_branch(id);
        }
    }
}
