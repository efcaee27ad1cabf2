//! closed-hashmap: an integer-keyed map using closed hashing (open
//! addressing) with quadratic probing and prime table sizes.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, inspectable open-addressing table whose probe
//!   sequence provably covers every slot, so "no free slot" can only
//!   mean "full".
//! - Layers:
//!   - `probe`: the alternating quadratic sequence
//!     `h, h+1, h-4, h+9, h-16, ...` taken mod the capacity.
//!   - `prime`: primality and the growth-target search.
//!   - `ClosedHashMap<V>`: slot array of `Option<Entry<V>>`, put/get,
//!     growth and iteration.
//!
//! Constraints
//! - Capacity is always a prime congruent to 3 mod 4. For such `n` the
//!   first `n` probe candidates are a permutation of `0..n`.
//! - Keys are `i64`; the home slot is the Euclidean residue, so negative
//!   keys and negative probe offsets stay in range.
//! - No deletion. An empty slot therefore always terminates a lookup.
//! - Load factor after any completed `put` is at most 0.8.
//!
//! Insert semantics
//! - `put` never overwrites. A duplicate key returns the stored value and
//!   leaves the map unchanged; the offered value is dropped.
//!
//! Growth
//! - Once `len / capacity > 0.8` the table moves to the smallest prime
//!   `>= 2 * capacity` that is congruent to 3 mod 4 (23 -> 47 -> 103 ...).
//!   Entries are moved into the new slice and the old one is dropped; no
//!   entry is cloned.
//!
//! Iteration
//! - `iter()` walks slots in index order. It borrows the map, so a `put`
//!   (and hence growth) cannot happen while an iterator is alive.
//!
//! Notes and non-goals
//! - Single-threaded; callers needing shared mutation provide their own
//!   lock.
//! - No removal, no generic keys, no serialization.
//! - Running out of slots despite the load-factor guard is an internal
//!   invariant violation and panics.

mod closed_hash_map;
mod closed_hash_map_proptest;
mod entry;
mod error;
pub mod prime;
mod probe;

// Public surface
pub use closed_hash_map::{ClosedHashMap, IntoIter, Iter, DEFAULT_CAPACITY, RESIZE_THRESHOLD};
pub use entry::{Entry, Key};
pub use error::CapacityError;
