use super::{DynamicTreeError, LeafHandle, TreeNode, NULL_NODE};
use crate::bounding_volume::Aabb;
use crate::math::Real;
use alloc::vec::Vec;

/// The number of node slots allocated by [`DynamicTree::with_margin`] and
/// [`DynamicTree::default`].
pub const DEFAULT_CAPACITY: usize = 16;

/// The fattening margin used by [`DynamicTree::default`].
pub const DEFAULT_MARGIN: Real = 0.1;

/// A dynamic bounding-volume hierarchy of 2D axis-aligned boxes.
///
/// Each leaf stores an opaque `owner` (typically an entity handle), the exact (*tight*) box
/// of that object, and a *fat* box: the tight box enlarged by the tree's margin on every
/// side. Branches always have exactly two children and bound both the tight and fat boxes
/// of their descendants.
///
/// The tree is meant to be driven once per simulation tick:
/// 1. the caller writes the new box of every moved object through
///    [`DynamicTree::tight_aabb_mut`],
/// 2. [`DynamicTree::update`] re-inserts only the leaves that escaped their fat box,
/// 3. [`DynamicTree::query`] lists the candidate overlaps of each moved object.
///
/// Objects that move less than the margin between two updates never cause any structural
/// change of the tree. Nodes live in a contiguous pool that grows by doubling and never
/// shrinks; released slots are recycled by subsequent insertions.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use dyntree2d::bounding_volume::Aabb;
/// use dyntree2d::partitioning::DynamicTree;
/// use nalgebra::Point2;
///
/// let mut tree = DynamicTree::new(1.0, 8);
/// let a = tree.add("a", Aabb::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)));
/// let b = tree.add("b", Aabb::new(Point2::new(0.5, 0.5), Point2::new(1.5, 1.5)));
/// let _c = tree.add("c", Aabb::new(Point2::new(50.0, 50.0), Point2::new(51.0, 51.0)));
///
/// assert_eq!(tree.query(a).unwrap(), vec!["b"]);
///
/// // Move `b` far away, then refit the tree.
/// *tree.tight_aabb_mut(b).unwrap() = Aabb::new(Point2::new(20.0, 20.0), Point2::new(21.0, 21.0));
/// assert_eq!(tree.update(), 1);
/// assert!(tree.query(a).unwrap().is_empty());
/// # }
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct DynamicTree<T> {
    pub(super) nodes: Vec<TreeNode<T>>,
    pub(super) root: u32,
    pub(super) margin: Real,
    pub(super) count: usize,
    pub(super) leaf_count: usize,
    pub(super) free_head: u32,
}

impl<T> Default for DynamicTree<T> {
    fn default() -> Self {
        Self::new(DEFAULT_MARGIN, DEFAULT_CAPACITY)
    }
}

impl<T> DynamicTree<T> {
    /// Creates an empty tree.
    ///
    /// The `margin` is added to each side of every leaf's box to form its fat box. Larger
    /// margins mean fewer re-insertions for moving objects at the cost of more false-positive
    /// candidates returned by queries. `capacity` is the initial number of node slots (a tree
    /// with `n` leaves uses `2n - 1` slots); it is clamped to at least one.
    ///
    /// # Panics
    ///
    /// Panics if `margin` is negative or not finite.
    pub fn new(margin: Real, capacity: usize) -> Self {
        assert!(
            margin >= 0.0 && margin.is_finite(),
            "The fattening margin must be finite and positive."
        );

        let capacity = capacity.max(1);
        assert!(
            capacity < NULL_NODE as usize,
            "The node pool capacity must be smaller than {}.",
            NULL_NODE
        );

        let nodes = (0..capacity as u32)
            .map(|i| {
                let next = if i + 1 == capacity as u32 {
                    NULL_NODE
                } else {
                    i + 1
                };
                TreeNode::free_slot(next)
            })
            .collect();

        Self {
            nodes,
            root: NULL_NODE,
            margin,
            count: 0,
            leaf_count: 0,
            free_head: 0,
        }
    }

    /// Creates an empty tree with the given margin and [`DEFAULT_CAPACITY`] node slots.
    pub fn with_margin(margin: Real) -> Self {
        Self::new(margin, DEFAULT_CAPACITY)
    }

    /// Registers a new object with its bounding box and returns the handle of its leaf.
    ///
    /// This is `O(log n)` for reasonably balanced trees.
    pub fn add(&mut self, owner: T, aabb: Aabb) -> LeafHandle {
        debug_assert!(aabb.is_valid(), "Inserted an AABB with mins > maxs.");

        let id = self.alloc();
        let margin = self.margin;
        let node = &mut self.nodes[id as usize];
        node.owner = Some(owner);
        node.tight = aabb;
        node.refatten(margin);
        let handle = LeafHandle {
            index: id,
            generation: node.generation,
        };

        self.leaf_count += 1;

        if self.root == NULL_NODE {
            self.root = id;
        } else {
            self.insert(id);
        }

        handle
    }

    /// Unregisters the object associated to `handle` and returns its owner.
    ///
    /// The handle, and any copy of it, becomes stale: every subsequent use is rejected with
    /// [`DynamicTreeError::StaleHandle`] even if the slot gets recycled.
    pub fn remove(&mut self, handle: LeafHandle) -> Result<T, DynamicTreeError> {
        let id = self.resolve(handle)?;
        let owner = self.nodes[id as usize]
            .owner
            .take()
            .ok_or(DynamicTreeError::StaleHandle(handle))?;

        if id == self.root {
            self.root = NULL_NODE;
        } else {
            // Also releases the former parent.
            self.pull(id);
        }

        self.free(id);
        self.leaf_count -= 1;
        Ok(owner)
    }

    /// Removes every leaf from this tree.
    ///
    /// The node pool keeps its capacity. Every handle issued so far becomes stale.
    pub fn clear(&mut self) {
        let capacity = self.nodes.len() as u32;

        for (i, node) in self.nodes.iter_mut().enumerate() {
            let i = i as u32;
            let generation = node.generation.wrapping_add(1);
            *node = TreeNode::free_slot(if i + 1 == capacity { NULL_NODE } else { i + 1 });
            node.generation = generation;
        }

        self.root = NULL_NODE;
        self.count = 0;
        self.leaf_count = 0;
        self.free_head = 0;
    }

    /// The number of allocated nodes (leaves and branches).
    #[inline]
    pub fn size(&self) -> usize {
        self.count
    }

    /// The number of node slots currently available in the pool, allocated or not.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// The number of leaves, i.e., of registered objects.
    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Does this tree not contain any leaf?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root == NULL_NODE
    }

    /// The margin added around each leaf's tight box to form its fat box.
    #[inline]
    pub fn margin(&self) -> Real {
        self.margin
    }

    /// The index of the root node, if the tree isn't empty.
    #[inline]
    pub fn root_index(&self) -> Option<u32> {
        (self.root != NULL_NODE).then_some(self.root)
    }

    /// The fat AABB bounding everything contained by this tree.
    pub fn root_aabb(&self) -> Option<Aabb> {
        self.root_index().map(|root| self.nodes[root as usize].fat)
    }

    /// The raw node pool, including free slots.
    ///
    /// Node indices from [`TreeNode::parent`] and [`TreeNode::children`] index this slice.
    #[inline]
    pub fn raw_nodes(&self) -> &[TreeNode<T>] {
        &self.nodes
    }

    /// Does `handle` refer to a leaf currently registered in this tree?
    #[inline]
    pub fn contains(&self, handle: LeafHandle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// The handle of the leaf stored at the given arena slot, if it is a live leaf.
    pub fn leaf_handle(&self, index: u32) -> Option<LeafHandle> {
        let node = self.nodes.get(index as usize)?;
        node.is_live_leaf().then_some(LeafHandle {
            index,
            generation: node.generation,
        })
    }

    /// The owner of the leaf referred to by `handle`.
    pub fn owner(&self, handle: LeafHandle) -> Result<&T, DynamicTreeError> {
        let id = self.resolve(handle)?;
        self.nodes[id as usize]
            .owner
            .as_ref()
            .ok_or(DynamicTreeError::StaleHandle(handle))
    }

    /// A mutable reference to the owner of the leaf referred to by `handle`.
    pub fn owner_mut(&mut self, handle: LeafHandle) -> Result<&mut T, DynamicTreeError> {
        let id = self.resolve(handle)?;
        self.nodes[id as usize]
            .owner
            .as_mut()
            .ok_or(DynamicTreeError::StaleHandle(handle))
    }

    /// The exact box of the leaf referred to by `handle`.
    pub fn tight_aabb(&self, handle: LeafHandle) -> Result<&Aabb, DynamicTreeError> {
        let id = self.resolve(handle)?;
        Ok(&self.nodes[id as usize].tight)
    }

    /// The fat box of the leaf referred to by `handle`.
    pub fn fat_aabb(&self, handle: LeafHandle) -> Result<&Aabb, DynamicTreeError> {
        let id = self.resolve(handle)?;
        Ok(&self.nodes[id as usize].fat)
    }

    /// A mutable reference to the exact box of the leaf referred to by `handle`.
    ///
    /// This is how moving objects are reported to the tree: overwrite the tight box, then call
    /// [`Self::update`] once all the objects moved during this step were written. Until then,
    /// the tree structure and the fat boxes still reflect the previous positions.
    pub fn tight_aabb_mut(&mut self, handle: LeafHandle) -> Result<&mut Aabb, DynamicTreeError> {
        let id = self.resolve(handle)?;
        Ok(&mut self.nodes[id as usize].tight)
    }

    /// Maps a handle to the arena index of its leaf, checking it is still live.
    pub(super) fn resolve(&self, handle: LeafHandle) -> Result<u32, DynamicTreeError> {
        let node = self
            .nodes
            .get(handle.index as usize)
            .ok_or(DynamicTreeError::UnknownHandle(handle))?;

        if node.generation == handle.generation && node.is_live_leaf() {
            Ok(handle.index)
        } else {
            Err(DynamicTreeError::StaleHandle(handle))
        }
    }
}
