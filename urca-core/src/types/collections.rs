//! Hash collections used across the workspace.

/// FxHasher-backed HashMap (fast, not DoS-resistant — fine for trusted input).
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// FxHasher-backed HashSet.
pub type FxHashSet<T> = rustc_hash::FxHashSet<T>;
