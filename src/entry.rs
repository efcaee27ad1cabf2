use core::fmt;

/// Integer key type used by the map.
pub type Key = i64;

/// Immutable key/value pair held by one slot of the map.
///
/// Entries are moved, never cloned, when the map grows.
#[derive(Clone, PartialEq, Eq)]
pub struct Entry<V> {
    key: Key,
    value: V,
}

impl<V> Entry<V> {
    pub(crate) fn new(key: Key, value: V) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_parts(self) -> (Key, V) {
        (self.key, self.value)
    }
}

impl<V: fmt::Debug> fmt::Debug for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entry")
            .field(&self.key)
            .field(&self.value)
            .finish()
    }
}
