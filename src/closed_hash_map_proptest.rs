#![cfg(test)]

// Property tests for ClosedHashMap kept inside the crate so they can reach
// the capacity helpers directly.

use crate::closed_hash_map::{ClosedHashMap, RESIZE_THRESHOLD};
use crate::entry::Key;
use crate::prime::is_valid_capacity;
use proptest::prelude::*;
use std::cell::Cell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    PutWith(usize, i32),
    Get(usize),
    Contains(Key),
    Iterate,
}

fn arb_scenario(
    pool: impl Strategy<Value = Vec<Key>>,
) -> impl Strategy<Value = (Vec<Key>, Vec<OpI>)> {
    pool.prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::PutWith(i, v)),
            2 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![contains_pool, any::<Key>()].prop_map(OpI::Contains),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn spread_pool() -> impl Strategy<Value = Vec<Key>> {
    proptest::collection::vec(any::<Key>(), 1..=64)
}

// Every key is a multiple of 7 * 19 * 43, so all keys share a home slot for
// the first three capacities reached from 7.
fn colliding_pool() -> impl Strategy<Value = Vec<Key>> {
    proptest::collection::vec(-40i64..40, 1..=48)
        .prop_map(|v| v.into_iter().map(|k| k * 7 * 19 * 43).collect())
}

fn run_state_machine(
    mut sut: ClosedHashMap<i32>,
    pool: Vec<Key>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Key, i32> = HashMap::new();
    let default_calls = Rc::new(Cell::new(0));

    for op in ops {
        let capacity_before = sut.capacity();
        match op {
            OpI::Put(i, v) => {
                let k = pool[i];
                let prev = sut.put(k, v).copied();
                prop_assert_eq!(prev, model.get(&k).copied(), "put returns stored value");
                model.entry(k).or_insert(v);
            }
            OpI::PutWith(i, v) => {
                let k = pool[i];
                let counter = default_calls.clone();
                let before = counter.get();
                let prev = sut
                    .put_with(k, move || {
                        counter.set(counter.get() + 1);
                        v
                    })
                    .copied();
                match model.get(&k) {
                    Some(&mv) => {
                        prop_assert_eq!(prev, Some(mv));
                        prop_assert_eq!(default_calls.get(), before, "default must not run on duplicate");
                    }
                    None => {
                        prop_assert_eq!(prev, None);
                        prop_assert_eq!(default_calls.get(), before + 1, "default must run exactly once");
                        model.insert(k, v);
                    }
                }
            }
            OpI::Get(i) => {
                let k = pool[i];
                prop_assert_eq!(sut.get(k), model.get(&k));
            }
            OpI::Contains(k) => {
                prop_assert_eq!(sut.contains_key(k), model.contains_key(&k));
            }
            OpI::Iterate => {
                let it = sut.iter();
                prop_assert_eq!(it.len(), model.len());
                let s_keys: Vec<Key> = it.map(|e| e.key()).collect();
                let unique: BTreeSet<Key> = s_keys.iter().copied().collect();
                prop_assert_eq!(unique.len(), s_keys.len(), "iteration yields unique keys");
                let m_keys: BTreeSet<Key> = model.keys().copied().collect();
                prop_assert_eq!(unique, m_keys);
            }
        }

        // Post-conditions after each op
        prop_assert!(sut.load_factor() <= RESIZE_THRESHOLD);
        prop_assert!(is_valid_capacity(sut.capacity()));
        if sut.capacity() != capacity_before {
            prop_assert!(sut.capacity() >= 2 * capacity_before);
            prop_assert!((2 * capacity_before..sut.capacity()).all(|c| !is_valid_capacity(c)));
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }

    // Every inserted key survives all growths.
    for (k, v) in &model {
        prop_assert_eq!(sut.get(*k), Some(v));
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap with
// first-write-wins semantics.
// Invariants exercised across random operation sequences:
// - `put`/`put_with` return the stored value on duplicates and never update it.
// - `put_with` runs its constructor exactly when inserting.
// - `get`/`contains_key` parity with the model.
// - `iter` yields each entry exactly once; its length is exact.
// - Load factor stays at or below the threshold; growth lands on the smallest
//   valid capacity at or above twice the previous one.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(spread_pool())) {
        run_state_machine(ClosedHashMap::new(), pool, ops)?;
    }
}

// Property: same invariants when every key lands on the same home slot,
// starting from a small table so growth happens repeatedly under collisions.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario(colliding_pool())) {
        let sut = ClosedHashMap::with_capacity(7).expect("7 is a valid capacity");
        run_state_machine(sut, pool, ops)?;
    }
}
