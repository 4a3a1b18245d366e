pub use tree::{DynamicTree, DEFAULT_CAPACITY, DEFAULT_MARGIN};
pub use tree_error::DynamicTreeError;
pub use tree_node::{LeafHandle, TreeNode, NULL_NODE};
pub use tree_queries::{Leaves, TraversalAction};

mod tree;
mod tree_error;
mod tree_insert;
mod tree_node;
mod tree_pool;
mod tree_queries;
mod tree_update;
mod tree_validation;
