//! Hashing collections used across the engine. FxHash keeps id-keyed map
//! lookups cheap on the hot path; the maps live on every state transition.

pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
pub type HashSet<T> = rustc_hash::FxHashSet<T>;
