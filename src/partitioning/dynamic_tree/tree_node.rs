use crate::bounding_volume::{Aabb, BoundingVolume};

/// Sentinel index meaning "no node".
pub const NULL_NODE: u32 = u32::MAX;

/// A stable reference to a leaf of a [`DynamicTree`](super::DynamicTree).
///
/// The handle pairs the arena slot of the leaf with the generation of that slot at the time
/// the leaf was created. Slots are recycled after removal; the generation is bumped every
/// time a slot is released so a handle that outlived its leaf is detected and rejected
/// instead of silently referring to whatever now occupies the slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct LeafHandle {
    pub(super) index: u32,
    pub(super) generation: u32,
}

impl LeafHandle {
    /// The index of the arena slot this handle refers to.
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }

    /// The generation of the arena slot at the time this handle was issued.
    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// A slot of the node arena of a [`DynamicTree`](super::DynamicTree).
///
/// A slot is either free (linked into the free list through `next`), a leaf (no children,
/// carries an owner), or a branch (exactly two children).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TreeNode<T> {
    pub(super) owner: Option<T>,
    pub(super) tight: Aabb,
    pub(super) fat: Aabb,
    pub(super) parent: u32,
    pub(super) left: u32,
    pub(super) right: u32,
    pub(super) next: u32,
    pub(super) generation: u32,
}

impl<T> TreeNode<T> {
    pub(super) fn free_slot(next: u32) -> Self {
        Self {
            owner: None,
            tight: Aabb::new_invalid(),
            fat: Aabb::new_invalid(),
            parent: NULL_NODE,
            left: NULL_NODE,
            right: NULL_NODE,
            next,
            generation: 0,
        }
    }

    /// Is this node a leaf?
    ///
    /// Free slots also have no children, use [`Self::is_live_leaf`] to exclude them.
    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        self.left == NULL_NODE
    }

    /// Is this node a leaf currently registered in the tree?
    #[inline(always)]
    pub fn is_live_leaf(&self) -> bool {
        self.is_leaf() && self.owner.is_some()
    }

    /// Is this leaf's fat box still containing its tight box?
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.fat.contains(&self.tight)
    }

    /// The owner attached to this node, if it is a leaf.
    #[inline]
    pub fn owner(&self) -> Option<&T> {
        self.owner.as_ref()
    }

    /// The exact bounding box of this leaf, or the union of the children's exact boxes.
    #[inline]
    pub fn tight_aabb(&self) -> &Aabb {
        &self.tight
    }

    /// The enlarged bounding box of this leaf, or the union of the children's enlarged boxes.
    #[inline]
    pub fn fat_aabb(&self) -> &Aabb {
        &self.fat
    }

    /// Index of the parent node, or [`NULL_NODE`] for the root.
    #[inline]
    pub fn parent(&self) -> u32 {
        self.parent
    }

    /// Indices of the two children, or `None` if this node is a leaf.
    #[inline]
    pub fn children(&self) -> Option<[u32; 2]> {
        (!self.is_leaf()).then_some([self.left, self.right])
    }

    /// Recomputes the fat box of a leaf from its tight box.
    #[inline]
    pub(super) fn refatten(&mut self, margin: crate::math::Real) {
        self.fat = self.tight.loosened(margin);
    }
}
