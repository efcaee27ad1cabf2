//! Alternating quadratic probe sequence.
//!
//! For a home slot `h` and capacity `n` the i-th candidate is
//! `h + (-1)^(i-1) * i^2 (mod n)`, i.e. offsets `0, +1, -4, +9, -16, ...`.
//! When `n` is a prime congruent to 3 mod 4 the first `n` candidates are a
//! permutation of `0..n`, so a probe that yields no free slot means the
//! table is genuinely full.

use crate::entry::Key;

/// Home slot of `key` in a table of `capacity` slots. Negative keys map to
/// the non-negative residue.
#[inline]
pub(crate) fn home_slot(key: Key, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (key as i128).rem_euclid(capacity as i128) as usize
}

/// Iterator over the `capacity` candidate slots for one key.
#[derive(Debug, Clone)]
pub(crate) struct ProbeSeq {
    home: usize,
    capacity: usize,
    step: usize,
}

impl ProbeSeq {
    pub(crate) fn new(key: Key, capacity: usize) -> Self {
        Self {
            home: home_slot(key, capacity),
            capacity,
            step: 0,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.step >= self.capacity {
            return None;
        }
        let i = self.step as u128;
        let n = self.capacity as u128;
        let home = self.home as u128;
        let offset = (i * i) % n;
        let idx = if i % 2 == 1 {
            (home + offset) % n
        } else {
            (home + n - offset) % n
        };
        self.step += 1;
        Some(idx as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.capacity - self.step;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for ProbeSeq {}
