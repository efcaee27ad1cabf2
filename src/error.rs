//! Construction errors.

use thiserror::Error;

/// Reasons a requested capacity is rejected by
/// [`ClosedHashMap::with_capacity`](crate::ClosedHashMap::with_capacity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    #[error("capacity must be greater than 0")]
    Zero,
    #[error("capacity {0} is not prime")]
    NotPrime(usize),
    #[error("capacity {0} is not congruent to 3 mod 4")]
    WrongResidue(usize),
}
