//! ClosedHashMap: integer-keyed open addressing with quadratic probing.

use crate::entry::{Entry, Key};
use crate::error::CapacityError;
use crate::prime::{is_prime, next_capacity};
use crate::probe::ProbeSeq;
use core::fmt;
use core::iter::FusedIterator;
use log::{debug, trace};

/// Capacity used by [`ClosedHashMap::new`]. Prime and congruent to 3 mod 4.
pub const DEFAULT_CAPACITY: usize = 23;

/// Fraction of occupied slots above which the table grows.
pub const RESIZE_THRESHOLD: f64 = 0.8;

type Slot<V> = Option<Entry<V>>;

/// Map from [`Key`] to `V` stored inline in a prime-sized slot array.
///
/// `put` never overwrites: inserting a key that is already present returns
/// the stored value and leaves the map untouched.
pub struct ClosedHashMap<V> {
    slots: Box<[Slot<V>]>,
    len: usize,
}

/// Outcome of walking a probe sequence for one key.
enum Probe {
    Found(usize),
    /// Free slot, reached after `collisions` occupied candidates.
    Vacant { idx: usize, collisions: usize },
    Exhausted,
}

fn alloc_slots<V>(capacity: usize) -> Box<[Slot<V>]> {
    (0..capacity).map(|_| None).collect()
}

/// Place `entry` in the first free slot of its probe sequence. Returns the
/// entry back if every candidate is occupied.
fn place<V>(slots: &mut [Slot<V>], entry: Entry<V>) -> Result<usize, Entry<V>> {
    let capacity = slots.len();
    for idx in ProbeSeq::new(entry.key(), capacity) {
        let slot = &mut slots[idx];
        if slot.is_none() {
            *slot = Some(entry);
            return Ok(idx);
        }
    }
    Err(entry)
}

impl<V> ClosedHashMap<V> {
    /// Create an empty map with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self {
            slots: alloc_slots(DEFAULT_CAPACITY),
            len: 0,
        }
    }

    /// Create a map with exactly `capacity` slots. The capacity must be a
    /// prime congruent to 3 mod 4.
    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        if capacity < 1 {
            return Err(CapacityError::Zero);
        }
        if !is_prime(capacity) {
            return Err(CapacityError::NotPrime(capacity));
        }
        if capacity % 4 != 3 {
            return Err(CapacityError::WrongResidue(capacity));
        }
        Ok(Self {
            slots: alloc_slots(capacity),
            len: 0,
        })
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Occupied slots divided by capacity.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    fn probe(&self, key: Key) -> Probe {
        for (collisions, idx) in ProbeSeq::new(key, self.capacity()).enumerate() {
            // Empty ends the search: no insertion ever skips a free slot.
            match &self.slots[idx] {
                None => return Probe::Vacant { idx, collisions },
                Some(e) if e.key() == key => return Probe::Found(idx),
                Some(_) => {}
            }
        }
        Probe::Exhausted
    }

    /// Value stored for `key`. A missing key is `None`, not an error.
    pub fn get(&self, key: Key) -> Option<&V> {
        match self.probe(key) {
            Probe::Found(idx) => self.slots[idx].as_ref().map(Entry::value),
            Probe::Vacant { .. } | Probe::Exhausted => None,
        }
    }

    /// Same as `get(key).is_some()`.
    pub fn contains_key(&self, key: Key) -> bool {
        self.get(key).is_some()
    }

    /// Insert `key -> value` if `key` is absent and return `None`.
    ///
    /// If `key` is already present the stored value is returned unchanged and
    /// `value` is dropped. Unlike `std::collections::HashMap::insert`, this
    /// never replaces an existing value.
    ///
    /// May grow the table, which relocates every entry.
    pub fn put(&mut self, key: Key, value: V) -> Option<&V> {
        self.put_with(key, || value)
    }

    /// Like [`put`](Self::put) but only runs `default` when the key is
    /// actually inserted.
    pub fn put_with<F>(&mut self, key: Key, default: F) -> Option<&V>
    where
        F: FnOnce() -> V,
    {
        let (idx, collisions) = match self.probe(key) {
            Probe::Found(idx) => return self.slots[idx].as_ref().map(Entry::value),
            Probe::Vacant { idx, collisions } => (idx, collisions),
            Probe::Exhausted => panic!(
                "no free slot for key {} (len {}, capacity {})",
                key,
                self.len,
                self.capacity()
            ),
        };
        trace!(
            "put key {} at slot {} after {} collisions",
            key,
            idx,
            collisions
        );
        self.slots[idx] = Some(Entry::new(key, default()));
        self.len += 1;

        if self.load_factor() > RESIZE_THRESHOLD {
            self.grow();
        }
        None
    }

    /// Move every entry into a table of the next valid capacity.
    fn grow(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = next_capacity(old_capacity);
        debug!(
            "growing from {} to {} slots ({} entries)",
            old_capacity, new_capacity, self.len
        );

        let old = core::mem::replace(&mut self.slots, alloc_slots(new_capacity));
        for entry in old.into_vec().into_iter().flatten() {
            let key = entry.key();
            if place(&mut self.slots, entry).is_err() {
                panic!(
                    "rehash found no free slot for key {} (len {}, capacity {})",
                    key, self.len, new_capacity
                );
            }
        }
    }

    /// Iterate occupied entries in increasing slot order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            it: self.slots.iter(),
            remaining: self.len,
        }
    }

    /// Keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.iter().map(Entry::key)
    }

    /// Values in slot order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(Entry::value)
    }
}

impl<V> Default for ClosedHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for ClosedHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|e| (e.key(), e.value())))
            .finish()
    }
}

/// Iterator over occupied entries of a `ClosedHashMap`.
///
/// Borrows the slot array, so the map cannot grow while it is alive.
pub struct Iter<'a, V> {
    it: core::slice::Iter<'a, Slot<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Entry<V>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.it.by_ref().find_map(Option::as_ref)?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}

/// Owning iterator over entries in slot order.
pub struct IntoIter<V> {
    it: std::vec::IntoIter<Slot<V>>,
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = Entry<V>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.it.by_ref().flatten().next()?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
impl<V> FusedIterator for IntoIter<V> {}

impl<'a, V> IntoIterator for &'a ClosedHashMap<V> {
    type Item = &'a Entry<V>;
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V> IntoIterator for ClosedHashMap<V> {
    type Item = Entry<V>;
    type IntoIter = IntoIter<V>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            it: self.slots.into_vec().into_iter(),
            remaining: self.len,
        }
    }
}

impl<V> Extend<(Key, V)> for ClosedHashMap<V> {
    fn extend<I: IntoIterator<Item = (Key, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            let _ = self.put(k, v);
        }
    }
}

impl<V> FromIterator<(Key, V)> for ClosedHashMap<V> {
    fn from_iter<I: IntoIterator<Item = (Key, V)>>(iter: I) -> Self {
        let mut m = Self::new();
        m.extend(iter);
        m
    }
}
