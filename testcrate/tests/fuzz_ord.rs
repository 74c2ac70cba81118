use std::collections::BTreeMap;

use rand_xoshiro::{
    rand_core::{RngCore, SeedableRng},
    Xoshiro128StarStar,
};
use splay_arena::{Natural, Ptr, SplayForest};
use testcrate::{range_count, P0};

macro_rules! next_inx {
    ($rng:ident, $len:ident) => {
        $rng.next_u32() as usize % $len
    };
}

/// Runs every keyed operation against a `BTreeMap` model
#[test]
fn fuzz_ord() {
    let mut rng = Xoshiro128StarStar::seed_from_u64(0);

    // make sure we get duplicate insertion attempts
    const MAX_KEY: u64 = 128;

    let mut f: SplayForest<P0, u64, Natural> = SplayForest::new();
    let mut t = f.new_tree();
    // the model, key to the pointer the forest returned for it
    let mut b: BTreeMap<u64, P0> = BTreeMap::new();
    // for picking random contained keys
    let mut list: Vec<u64> = vec![];

    assert!(f.remove(&mut t, P0::invalid()).is_none());
    assert!(f.find(&mut t, &0).is_none());
    assert!(f.select(&mut t, 0).is_none());
    assert!(f.rank(P0::invalid()).is_none());

    let mut max_len = 0;
    for _ in 0..300_000 {
        assert_eq!(f.len(), b.len());
        assert_eq!(f.size(&t), b.len());
        assert_eq!(f.is_empty(), b.is_empty());
        if let Err(e) = SplayForest::_check_invariants(&f, &[&t]) {
            panic!("{e}");
        }
        if let Err(e) = SplayForest::_check_key_order(&f, &t) {
            panic!("{e}");
        }
        let len = list.len();
        max_len = max_len.max(len);
        match rng.next_u32() % 1000 {
            // more inserts than removes so the tree spends time large, the
            // key cap keeps duplicate rejections common
            0..=349 => {
                // insert
                let k = rng.next_u64() % MAX_KEY;
                match f.insert(&mut t, k) {
                    Ok(p) => {
                        assert!(b.insert(k, p).is_none());
                        list.push(k);
                        // the fresh node is the root
                        assert_eq!(f.root(&t), Some(p));
                    }
                    Err(returned) => {
                        assert_eq!(returned, k);
                        assert!(b.contains_key(&k));
                    }
                }
            }
            350..=449 => {
                // remove through find
                if len != 0 {
                    let k = list.swap_remove(next_inx!(rng, len));
                    let p = f.find(&mut t, &k).unwrap();
                    assert_eq!(b.remove(&k), Some(p));
                    let (v, right) = f.remove(&mut t, p).unwrap();
                    assert_eq!(v, k);
                    match right {
                        Some(right) => assert!(*f.get(right).unwrap() > k),
                        None => assert!(b.range(k..).next().is_none()),
                    }
                    assert!(f.get(p).is_none());
                }
            }
            450..=599 => {
                // find hits and misses
                let k = rng.next_u64() % MAX_KEY;
                match f.find(&mut t, &k) {
                    Some(p) => {
                        assert_eq!(b.get(&k), Some(&p));
                        assert_eq!(f.get(p), Some(&k));
                        assert_eq!(f.root(&t), Some(p));
                    }
                    None => assert!(!b.contains_key(&k)),
                }
            }
            600..=699 => {
                // bound queries
                let k = rng.next_u64() % MAX_KEY;
                let lb = f.lower_bound(&mut t, &k).map(|p| *f.get(p).unwrap());
                assert_eq!(lb, b.range(k..).next().map(|(k, _)| *k));
                let ub = f.upper_bound(&mut t, &k).map(|p| *f.get(p).unwrap());
                assert_eq!(ub, b.range((k + 1)..).next().map(|(k, _)| *k));
            }
            700..=799 => {
                // select and rank
                if len != 0 {
                    let n = rng.next_u32() as usize % b.len();
                    let p = f.select(&mut t, n).unwrap();
                    let expected = *b.keys().nth(n).unwrap();
                    assert_eq!(f.get(p), Some(&expected));
                    assert_eq!(f.rank(p), Some(n));
                    assert_eq!(f.root(&t), Some(p));
                }
                assert!(f.select(&mut t, b.len()).is_none());
            }
            800..=899 => {
                // range count
                let lo = rng.next_u64() % MAX_KEY;
                let hi = rng.next_u64() % MAX_KEY;
                let expected = if lo <= hi {
                    b.range(lo..=hi).count()
                } else {
                    0
                };
                assert_eq!(range_count(&mut f, &mut t, &lo, &hi), expected);
            }
            900..=949 => {
                // split all keys not less than a pivot into another tree,
                // then merge back
                let k = rng.next_u64() % MAX_KEY;
                if let Some(p) = f.lower_bound(&mut t, &k) {
                    let rest = f.split_right(&mut t, p).unwrap();
                    assert_eq!(f.size(&rest), b.range(k..).count());
                    assert_eq!(f.size(&t) + f.size(&rest), b.len());
                    assert!(f.ordered_before(&t, &rest));
                    if let Err(e) = SplayForest::_check_invariants(&f, &[&t, &rest]) {
                        panic!("{e}");
                    }
                    f.merge(&mut t, rest);
                }
            }
            950..=969 => {
                // split after a contained key, the key stays left
                if len != 0 {
                    let k = list[next_inx!(rng, len)];
                    let p = f.find(&mut t, &k).unwrap();
                    let rest = f.split_left(&mut t, p).unwrap();
                    assert_eq!(f.size(&rest), b.range((k + 1)..).count());
                    assert!(f.ordered_before(&t, &rest));
                    f.merge(&mut t, rest);
                }
            }
            970..=979 => {
                // snapshot the whole tree and throw the snapshot away
                let snap = f.clone_tree(&t);
                assert_eq!(f.size(&snap), b.len());
                assert_eq!(f.len(), 2 * b.len());
                if let Err(e) = SplayForest::_check_invariants(&f, &[&t, &snap]) {
                    panic!("{e}");
                }
                f.clear_tree(snap);
            }
            _ => {
                // remove the maximum through `last`
                if len != 0 {
                    let p = f.last(&t).unwrap();
                    let k = *f.get(p).unwrap();
                    assert_eq!(b.keys().next_back(), Some(&k));
                    b.remove(&k).unwrap();
                    let i = list.iter().position(|x| *x == k).unwrap();
                    list.swap_remove(i);
                    let (v, right) = f.remove(&mut t, p).unwrap();
                    assert_eq!(v, k);
                    assert!(right.is_none());
                }
            }
        }
    }
    assert!(max_len > 64);
    f.clear_tree(t);
    assert!(f.is_empty());
}
