//! Fast hash collections.

pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;
