//! Capacity arithmetic: primality and the growth target.

/// True when `p` has no divisor in `2..p`.
///
/// Only divisors up to `sqrt(p)` are tried, which gives the same answer as
/// trying all of `2..p`. That range is empty for 0 and 1, so both count as
/// prime here; capacity validation rejects them separately.
pub fn is_prime(p: usize) -> bool {
    if p < 4 {
        return true;
    }
    if p % 2 == 0 {
        return false;
    }
    let mut d = 3;
    while d <= p / d {
        if p % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// True when `capacity` is usable as a table size: a prime congruent to
/// 3 mod 4.
#[inline]
pub fn is_valid_capacity(capacity: usize) -> bool {
    capacity % 4 == 3 && is_prime(capacity)
}

/// Smallest capacity `c >= 2 * current` with `c` prime and `c % 4 == 3`.
///
/// Panics if no such value fits in `usize`.
pub fn next_capacity(current: usize) -> usize {
    let start = current
        .checked_mul(2)
        .expect("capacity overflow while growing");
    // First candidate congruent to 3 mod 4, then step by 4.
    let mut c = start
        .checked_add((7 - start % 4) % 4)
        .expect("capacity overflow while growing");
    while !is_prime(c) {
        c = c.checked_add(4).expect("capacity overflow while growing");
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(p: usize) -> bool {
        (2..p).all(|d| p % d != 0)
    }

    /// Invariant: the sqrt-bounded test agrees with full trial division,
    /// including 0 and 1, which have no divisor in `2..p`.
    #[test]
    fn matches_full_trial_division() {
        for p in 0..2_000 {
            assert_eq!(is_prime(p), naive(p), "p = {}", p);
        }
        assert!(is_prime(0));
        assert!(is_prime(1));
        assert!(is_prime(2));
        assert!(!is_prime(4));
    }

    #[test]
    fn capacity_validation() {
        for ok in [3, 7, 11, 19, 23, 31, 43, 47] {
            assert!(is_valid_capacity(ok), "{} should be valid", ok);
        }
        for bad in [0, 1, 2, 4, 5, 8, 13, 15, 24, 27] {
            assert!(!is_valid_capacity(bad), "{} should be invalid", bad);
        }
    }

    /// Invariant: growth target is the smallest prime ≡ 3 mod 4 at or above 2n.
    #[test]
    fn growth_chain_from_default() {
        let mut n = 23;
        let mut chain = vec![n];
        for _ in 0..6 {
            n = next_capacity(n);
            chain.push(n);
        }
        assert_eq!(chain, vec![23, 47, 103, 211, 431, 863, 1747]);
        assert_eq!(next_capacity(3), 7);
        assert_eq!(next_capacity(7), 19);
        assert_eq!(next_capacity(11), 23);
    }

    #[test]
    fn growth_target_is_minimal() {
        for n in (3..500usize).filter(|&n| is_valid_capacity(n)) {
            let next = next_capacity(n);
            assert!(next >= 2 * n);
            assert!(is_valid_capacity(next));
            assert!((2 * n..next).all(|c| !is_valid_capacity(c)));
        }
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn growth_overflow_panics() {
        let _ = next_capacity(usize::MAX / 2 + 1);
    }
}
