use super::{DynamicTree, TreeNode, NULL_NODE};

impl<T> DynamicTree<T> {
    /// Takes a slot from the free list, doubling the pool first if it is exhausted.
    ///
    /// The returned slot has no parent and no children.
    pub(super) fn alloc(&mut self) -> u32 {
        if self.free_head == NULL_NODE {
            // There are no free nodes only when the pool is full.
            assert_eq!(
                self.count,
                self.nodes.len(),
                "Node pool bookkeeping mismatch: empty free list but unallocated slots."
            );

            let old_capacity = self.nodes.len() as u32;
            let new_capacity = old_capacity
                .checked_mul(2)
                .filter(|cap| *cap < NULL_NODE)
                .unwrap_or_else(|| panic!("The node pool cannot grow beyond {} slots.", NULL_NODE));

            log::debug!(
                "Growing the dynamic tree node pool from {} to {} slots.",
                old_capacity,
                new_capacity
            );

            // Continue the free list through the new slots.
            self.nodes.extend((old_capacity..new_capacity).map(|i| {
                let next = if i + 1 == new_capacity {
                    NULL_NODE
                } else {
                    i + 1
                };
                TreeNode::free_slot(next)
            }));
            self.free_head = old_capacity;
        }

        let id = self.free_head;
        let node = &mut self.nodes[id as usize];
        self.free_head = node.next;
        node.next = NULL_NODE;
        node.parent = NULL_NODE;
        node.left = NULL_NODE;
        node.right = NULL_NODE;
        self.count += 1;

        id
    }

    /// Pushes a slot back onto the free list.
    ///
    /// The slot must not be referenced by any other node anymore. Its generation is bumped so
    /// handles to the leaf it held become stale.
    pub(super) fn free(&mut self, id: u32) {
        assert!((id as usize) < self.nodes.len(), "Freed an out-of-bounds node.");
        assert!(self.count > 0, "Freed a node from an empty pool.");

        let node = &mut self.nodes[id as usize];
        node.owner = None;
        node.parent = NULL_NODE;
        node.left = NULL_NODE;
        node.right = NULL_NODE;
        node.generation = node.generation.wrapping_add(1);
        node.next = self.free_head;
        self.free_head = id;
        self.count -= 1;
    }
}
