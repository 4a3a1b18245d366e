use super::LeafHandle;

/// Error returned when a [`LeafHandle`] cannot be resolved by a
/// [`DynamicTree`](super::DynamicTree).
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum DynamicTreeError {
    /// The handle refers to a leaf that was removed. Its slot may since have been reused.
    #[error("the leaf handle {0:?} refers to a leaf that no longer exists.")]
    StaleHandle(LeafHandle),
    /// The handle refers to a slot outside of the tree's node pool. It was most likely issued
    /// by another tree.
    #[error("the leaf handle {0:?} does not belong to this tree.")]
    UnknownHandle(LeafHandle),
}
