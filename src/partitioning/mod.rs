//! Spatial partitioning tools.

pub use self::dynamic_tree::{
    DynamicTree, DynamicTreeError, LeafHandle, Leaves, TraversalAction, TreeNode,
    DEFAULT_CAPACITY, DEFAULT_MARGIN, NULL_NODE,
};

mod dynamic_tree;
