use super::{DynamicTree, DynamicTreeError, LeafHandle, TreeNode, NULL_NODE};
use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::utils::SortedPair;
use alloc::vec::Vec;
use smallvec::SmallVec;

const TRAVERSAL_STACK_SIZE: usize = 32;

/// Iterator through the leaves of a [`DynamicTree`], in depth-first order.
///
/// Created by [`DynamicTree::leaves`].
pub struct Leaves<'a, T, Check: Fn(&TreeNode<T>) -> bool> {
    tree: &'a DynamicTree<T>,
    stack: SmallVec<[u32; TRAVERSAL_STACK_SIZE]>,
    check: Check,
}

impl<'a, T, Check: Fn(&TreeNode<T>) -> bool> Leaves<'a, T, Check> {
    fn new(tree: &'a DynamicTree<T>, check: Check) -> Self {
        let mut stack = SmallVec::new();

        if tree.root != NULL_NODE {
            stack.push(tree.root);
        }

        Leaves { tree, stack, check }
    }
}

impl<T, Check: Fn(&TreeNode<T>) -> bool> Iterator for Leaves<'_, T, Check> {
    type Item = LeafHandle;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.stack.pop()?;
            let node = &self.tree.nodes[id as usize];

            if !(self.check)(node) {
                continue;
            }

            if node.is_leaf() {
                return Some(self.tree.handle_unchecked(id));
            }

            self.stack.push(node.right);
            self.stack.push(node.left);
        }
    }
}

/// Controls the execution flow of [`DynamicTree::traverse`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraversalAction {
    /// The traversal will continue on the children of the tested node.
    Continue,
    /// The traversal will skip all descendants of the tested node.
    Prune,
    /// The traversal will exit immediately.
    EarlyExit,
}

impl<T> DynamicTree<T> {
    #[inline(always)]
    pub(super) fn handle_unchecked(&self, id: u32) -> LeafHandle {
        LeafHandle {
            index: id,
            generation: self.nodes[id as usize].generation,
        }
    }

    /// Lists the owners of every leaf whose fat box intersects the fat box of `handle`'s leaf.
    ///
    /// The queried leaf itself is never part of the result. The result is not sorted in any
    /// particular way but contains each owner at most once. Since fat boxes are compared,
    /// the result may contain owners whose tight boxes don't actually overlap: these candidates
    /// are meant to be filtered by an exact narrow-phase test.
    pub fn query(&self, handle: LeafHandle) -> Result<Vec<T>, DynamicTreeError>
    where
        T: Clone,
    {
        let mut result = Vec::new();
        self.query_with(handle, |_, owner| result.push(owner.clone()))?;
        Ok(result)
    }

    /// Calls `f` with the handle and owner of every leaf whose fat box intersects the fat box
    /// of `handle`'s leaf.
    ///
    /// This is the allocation-free version of [`Self::query`].
    pub fn query_with(
        &self,
        handle: LeafHandle,
        mut f: impl FnMut(LeafHandle, &T),
    ) -> Result<(), DynamicTreeError> {
        let query = self.resolve(handle)?;
        let query_fat = self.nodes[query as usize].fat;

        let mut stack: SmallVec<[u32; TRAVERSAL_STACK_SIZE]> = SmallVec::new();
        stack.push(self.root);

        while let Some(id) = stack.pop() {
            if id == NULL_NODE {
                continue;
            }

            let node = &self.nodes[id as usize];

            if !node.fat.intersects(&query_fat) {
                continue;
            }

            if node.is_leaf() {
                // Can't interact with itself.
                if id != query {
                    if let Some(owner) = &node.owner {
                        f(self.handle_unchecked(id), owner);
                    }
                }
            } else {
                stack.push(node.left);
                stack.push(node.right);
            }
        }

        Ok(())
    }

    /// Iterates through the leaves, in depth-first order.
    ///
    /// The `check_node` closure is called on every traversed node. If it returns `false` then the
    /// node and all its descendants won't be iterated on. This is useful for pruning whole
    /// sub-trees based on a geometric predicate on the node's fat box.
    pub fn leaves<F: Fn(&TreeNode<T>) -> bool>(&self, check_node: F) -> Leaves<'_, T, F> {
        Leaves::new(self, check_node)
    }

    /// Iterates through all the leaves with a fat box intersecting the given `aabb`.
    pub fn intersect_aabb<'a>(&'a self, aabb: &'a Aabb) -> impl Iterator<Item = LeafHandle> + 'a {
        self.leaves(move |node: &TreeNode<T>| node.fat.intersects(aabb))
    }

    /// Iterates through every leaf handle together with its owner, in depth-first order.
    pub fn iter(&self) -> impl Iterator<Item = (LeafHandle, &T)> + '_ {
        self.leaves(|_| true).filter_map(|handle| {
            self.nodes[handle.index as usize]
                .owner
                .as_ref()
                .map(|owner| (handle, owner))
        })
    }

    /// Traverses the tree in depth-first order with full control over traversal.
    ///
    /// The closure receives the arena index and the node being visited, and decides whether
    /// to visit its children ([`TraversalAction::Continue`]), to skip them
    /// ([`TraversalAction::Prune`]), or to stop right away ([`TraversalAction::EarlyExit`]).
    pub fn traverse(&self, mut check_node: impl FnMut(u32, &TreeNode<T>) -> TraversalAction) {
        let mut stack: SmallVec<[u32; TRAVERSAL_STACK_SIZE]> = SmallVec::new();

        if self.root != NULL_NODE {
            stack.push(self.root);
        }

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];

            match check_node(id, node) {
                TraversalAction::EarlyExit => return,
                TraversalAction::Prune => {}
                TraversalAction::Continue => {
                    if !node.is_leaf() {
                        stack.push(node.right);
                        stack.push(node.left);
                    }
                }
            }
        }
    }

    /// Calls `f` on every pair of distinct leaves with intersecting fat boxes.
    ///
    /// Every unordered pair is reported exactly once. This traverses the tree against itself:
    /// for every branch, the subtree of its left child is tested against the subtree of its
    /// right child, descending into the bigger side of each intersecting pair.
    pub fn traverse_overlapping_pairs(&self, mut f: impl FnMut(LeafHandle, LeafHandle)) {
        if self.root == NULL_NODE || self.nodes[self.root as usize].is_leaf() {
            // Not enough nodes for any overlap.
            return;
        }

        let mut branches: SmallVec<[u32; TRAVERSAL_STACK_SIZE]> = SmallVec::new();
        let mut pairs: SmallVec<[(u32, u32); TRAVERSAL_STACK_SIZE]> = SmallVec::new();
        branches.push(self.root);

        while let Some(id) = branches.pop() {
            let node = &self.nodes[id as usize];

            for child in [node.left, node.right] {
                if !self.nodes[child as usize].is_leaf() {
                    branches.push(child);
                }
            }

            pairs.push((node.left, node.right));

            while let Some((a, b)) = pairs.pop() {
                let node_a = &self.nodes[a as usize];
                let node_b = &self.nodes[b as usize];

                if !node_a.fat.intersects(&node_b.fat) {
                    continue;
                }

                match (node_a.is_leaf(), node_b.is_leaf()) {
                    (true, true) => f(self.handle_unchecked(a), self.handle_unchecked(b)),
                    (true, false) => {
                        pairs.push((a, node_b.left));
                        pairs.push((a, node_b.right));
                    }
                    (false, true) => {
                        pairs.push((node_a.left, b));
                        pairs.push((node_a.right, b));
                    }
                    (false, false) => {
                        if node_a.fat.area() >= node_b.fat.area() {
                            pairs.push((node_a.left, b));
                            pairs.push((node_a.right, b));
                        } else {
                            pairs.push((a, node_b.left));
                            pairs.push((a, node_b.right));
                        }
                    }
                }
            }
        }
    }

    /// Collects every pair of distinct leaves with intersecting fat boxes.
    ///
    /// See [`Self::traverse_overlapping_pairs`].
    pub fn overlapping_pairs(&self) -> Vec<SortedPair<LeafHandle>> {
        let mut result = Vec::new();
        self.traverse_overlapping_pairs(|a, b| result.push(SortedPair::new(a, b)));
        result
    }
}
