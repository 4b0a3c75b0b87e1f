//! Generic typed-collection traits the facade is assembled from.
//!
//! Collections hand out owned values: the facade is a staging view, and
//! callers mutate a copy and write it back through [`WriteStore`].

use crate::error::LedgerResult;

/// Read access to a keyed collection.
pub trait ReadStore<K, V> {
    /// Fetches a value, `None` when absent.
    fn try_get(&self, key: &K) -> Option<V>;

    /// Fetches a value, erroring when absent.
    fn get(&self, key: &K) -> LedgerResult<V>;
}

/// Read access plus full enumeration.
pub trait ReadAllStore<K, V>: ReadStore<K, V> {
    /// Every value in the collection. Ordering is collection-specific but
    /// deterministic for a given state.
    fn all(&self) -> Vec<V>;
}

/// Read access plus prefix scans.
pub trait FindStore<K, P, V>: ReadStore<K, V> {
    /// Every entry whose key matches `prefix`, with its full key.
    fn find(&self, prefix: &P) -> Vec<(K, V)>;
}

/// Write access to a keyed collection.
pub trait WriteStore<K, V>: ReadStore<K, V> {
    /// Inserts a new entry; errors if the key is present.
    fn add(&mut self, key: K, value: V) -> LedgerResult<()>;

    /// Replaces an existing entry; errors if the key is absent.
    fn update(&mut self, key: K, value: V) -> LedgerResult<()>;

    /// Inserts or replaces unconditionally.
    fn upsert(&mut self, key: K, value: V) -> LedgerResult<()>;

    /// Removes an entry if present.
    fn delete(&mut self, key: &K) -> LedgerResult<()>;
}
