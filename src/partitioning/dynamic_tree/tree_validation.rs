use super::{DynamicTree, NULL_NODE};
use crate::bounding_volume::BoundingVolume;
use crate::utils::hashset::HashSet;
use alloc::vec;

impl<T> DynamicTree<T> {
    /// Counts the number of leaves that can be reached from the node at index `id`.
    ///
    /// This is mostly a utility for debugging.
    pub fn reachable_leaf_count(&self, id: u32) -> usize {
        if id == NULL_NODE {
            return 0;
        }

        let mut count = 0;
        let mut stack = vec![id];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];

            if node.is_leaf() {
                count += 1;
            } else {
                stack.push(node.left);
                stack.push(node.right);
            }
        }

        count
    }

    /// The depth of the tree: 0 if empty, 1 for a single leaf.
    pub fn depth(&self) -> u32 {
        if self.root == NULL_NODE {
            return 0;
        }

        let mut max_depth = 0;
        let mut stack = vec![(self.root, 1)];

        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id as usize];
            max_depth = max_depth.max(depth);

            if !node.is_leaf() {
                stack.push((node.left, depth + 1));
                stack.push((node.right, depth + 1));
            }
        }

        max_depth
    }

    /// Panics if the tree isn't well-formed.
    ///
    /// The tree is well-formed if:
    /// - it is topologically correct: no loops, parent links agree with child links, every
    ///   branch has exactly two children;
    /// - it is geometrically correct: every branch's tight and fat boxes are the union of its
    ///   children's, and every leaf's fat box contains its tight box;
    /// - the free list and the reachable nodes partition the node pool exactly.
    pub fn assert_well_formed(&self) {
        let mut reachable = HashSet::default();
        let mut leaves = 0;

        if self.root != NULL_NODE {
            assert_eq!(
                self.nodes[self.root as usize].parent,
                NULL_NODE,
                "The root node has a parent."
            );

            let mut stack = vec![self.root];

            while let Some(id) = stack.pop() {
                if !reachable.insert(id) {
                    panic!("Detected loop. Node {} visited twice.", id);
                }

                let node = &self.nodes[id as usize];
                assert_eq!(node.next, NULL_NODE, "Node {} is still in the free list.", id);

                if node.is_leaf() {
                    assert_eq!(node.right, NULL_NODE, "Leaf {} has a right child.", id);
                    assert!(node.owner.is_some(), "Leaf {} has no owner.", id);
                    assert!(
                        node.is_valid(),
                        "Leaf {} has a fat box not containing its tight box.",
                        id
                    );
                    leaves += 1;
                } else {
                    assert_ne!(node.right, NULL_NODE, "Branch {} has a single child.", id);
                    assert!(node.owner.is_none(), "Branch {} has an owner.", id);

                    let left = &self.nodes[node.left as usize];
                    let right = &self.nodes[node.right as usize];
                    assert_eq!(left.parent, id, "Bad parent link for node {}.", node.left);
                    assert_eq!(right.parent, id, "Bad parent link for node {}.", node.right);
                    assert_eq!(
                        node.tight,
                        left.tight.merged(&right.tight),
                        "Branch {} tight box isn't the union of its children's.",
                        id
                    );
                    assert_eq!(
                        node.fat,
                        left.fat.merged(&right.fat),
                        "Branch {} fat box isn't the union of its children's.",
                        id
                    );

                    stack.push(node.left);
                    stack.push(node.right);
                }
            }
        }

        assert_eq!(reachable.len(), self.count, "Allocated nodes are unreachable.");
        assert_eq!(leaves, self.leaf_count, "Leaf count mismatch.");

        let mut free = 0;
        let mut next = self.free_head;

        while next != NULL_NODE {
            assert!(
                !reachable.contains(&next),
                "Node {} is both in the tree and in the free list.",
                next
            );
            assert!(
                self.nodes[next as usize].owner.is_none(),
                "Free node {} has an owner.",
                next
            );
            free += 1;
            assert!(free <= self.nodes.len(), "Detected loop in the free list.");
            next = self.nodes[next as usize].next;
        }

        assert_eq!(
            free + self.count,
            self.nodes.len(),
            "The free list and the allocated nodes don't partition the node pool."
        );
    }
}
