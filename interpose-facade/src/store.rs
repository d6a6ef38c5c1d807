//! Insertion-ordered backing store.
//!
//! Removal leaves a hole in the slot vector so that `remove` stays O(1);
//! holes are compacted away once they outnumber live entries.

use interpose_types::Key;
use std::collections::HashMap;

const COMPACT_MIN_HOLES: usize = 16;

/// A key-value map that enumerates keys in first-insertion order.
///
/// Overwriting a key keeps its position. Removing and re-inserting a key
/// moves it to the end.
#[derive(Debug, Clone)]
pub struct BackingStore<V> {
    slots: Vec<Option<(Key, V)>>,
    index: HashMap<Key, usize>,
}

impl<V> Default for BackingStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> BackingStore<V> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.slots[slot].as_ref().map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut(&mut self, key: &Key) -> Option<&mut V> {
        let slot = *self.index.get(key)?;
        self.slots[slot].as_mut().map(|(_, v)| v)
    }

    /// Inserts or overwrites `key`, returning the previous value.
    pub fn set(&mut self, key: impl Into<Key>, value: V) -> Option<V> {
        let key = key.into();
        if let Some(&slot) = self.index.get(&key) {
            if let Some((_, existing)) = self.slots[slot].as_mut() {
                return Some(std::mem::replace(existing, value));
            }
        }
        self.index.insert(key.clone(), self.slots.len());
        self.slots.push(Some((key, value)));
        None
    }

    /// Removes `key`, returning its value. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: &Key) -> Option<V> {
        let slot = self.index.remove(key)?;
        let removed = self.slots[slot].take().map(|(_, v)| v);
        self.maybe_compact();
        removed
    }

    /// Returns true if `key` is present, even with a null value.
    #[must_use]
    pub fn has_key(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.iter().map(|(k, _)| k)
    }

    /// Values in key insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &V)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref().map(|(k, v)| (k, v)))
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }

    fn maybe_compact(&mut self) {
        let holes = self.slots.len() - self.index.len();
        if holes < COMPACT_MIN_HOLES || holes <= self.index.len() {
            return;
        }
        self.slots.retain(Option::is_some);
        for (slot, entry) in self.slots.iter().enumerate() {
            if let Some((key, _)) = entry {
                self.index.insert(key.clone(), slot);
            }
        }
    }
}

impl<K: Into<Key>, V> FromIterator<(K, V)> for BackingStore<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl<K: Into<Key>, V> Extend<(K, V)> for BackingStore<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}
