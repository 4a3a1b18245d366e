//! A hash-set used for bookkeeping that must also work without `std`.

/// Hash-set using [`hashbrown::HashSet`] with its default hasher.
pub type HashSet<K> = hashbrown::HashSet<K, hashbrown::DefaultHashBuilder>;
