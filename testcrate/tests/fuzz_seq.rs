use std::mem;

use rand_xoshiro::{
    rand_core::{RngCore, SeedableRng},
    Xoshiro128StarStar,
};
use splay_arena::SplayForest;
use testcrate::P0;

macro_rules! next_inx {
    ($rng:ident, $len:ident) => {
        $rng.next_u32() as usize % $len
    };
}

/// Runs every sequence operation against a `Vec` model
#[test]
fn fuzz_seq() {
    let mut rng = Xoshiro128StarStar::seed_from_u64(0);

    let mut f: SplayForest<P0, u64> = SplayForest::new();
    let mut t = f.new_tree();
    // the model, values in order with the pointers the forest returned
    let mut v: Vec<(u64, P0)> = vec![];
    // unique id for checking that the correct elements are returned
    let mut counter = 0u64;

    let mut max_len = 0;
    for _ in 0..300_000 {
        assert_eq!(f.size(&t), v.len());
        assert_eq!(f.len(), v.len());
        if let Err(e) = SplayForest::_check_invariants(&f, &[&t]) {
            panic!("{e}");
        }
        let len = v.len();
        max_len = max_len.max(len);
        match rng.next_u32() % 1000 {
            0..=299 => {
                // push
                counter += 1;
                let p = f.push(&mut t, counter);
                v.push((counter, p));
                assert_eq!(f.last(&t), Some(p));
            }
            300..=599 => {
                // remove at a random position
                if len != 0 {
                    let i = next_inx!(rng, len);
                    let (val, p) = v.remove(i);
                    let (got, right) = f.remove(&mut t, p).unwrap();
                    assert_eq!(got, val);
                    // everything after position `i` was in the right subtree
                    assert_eq!(right.is_none(), i == len - 1);
                    if let Some(right) = right {
                        let r_val = *f.get(right).unwrap();
                        assert!(v[i..].iter().any(|(val, _)| *val == r_val));
                    }
                    assert!(f.get(p).is_none());
                }
            }
            600..=699 => {
                // select
                if len != 0 {
                    let n = next_inx!(rng, len);
                    let p = f.select(&mut t, n).unwrap();
                    assert_eq!(p, v[n].1);
                    assert_eq!(f.get(p), Some(&v[n].0));
                    assert_eq!(f.root(&t), Some(p));
                } else {
                    assert!(f.select(&mut t, 0).is_none());
                }
                assert!(f.select(&mut t, len).is_none());
            }
            700..=749 => {
                // rank
                if len != 0 {
                    let n = next_inx!(rng, len);
                    assert_eq!(f.rank(v[n].1), Some(n));
                }
            }
            750..=849 => {
                // rotate the sequence with a split and an append
                if len != 0 {
                    let n = next_inx!(rng, len);
                    let mut rest = f.split_right(&mut t, v[n].1).unwrap();
                    assert_eq!(f.size(&t), n);
                    assert_eq!(f.size(&rest), len - n);
                    if let Err(e) = SplayForest::_check_invariants(&f, &[&t, &rest]) {
                        panic!("{e}");
                    }
                    f.append(&mut rest, mem::take(&mut t));
                    t = rest;
                    v.rotate_left(n);
                }
            }
            850..=899 => {
                // split after a node, the node stays in the front piece
                if len != 0 {
                    let n = next_inx!(rng, len);
                    let rest = f.split_left(&mut t, v[n].1).unwrap();
                    assert_eq!(f.size(&t), n + 1);
                    assert_eq!(f.last(&t), Some(v[n].1));
                    f.append(&mut t, rest);
                }
            }
            900..=929 => {
                // order neighbors
                if len != 0 {
                    assert_eq!(f.first(&t), Some(v[0].1));
                    assert_eq!(f.last(&t), Some(v[len - 1].1));
                    let n = next_inx!(rng, len);
                    assert_eq!(f.next(v[n].1), v.get(n + 1).map(|x| x.1));
                    assert_eq!(
                        f.prev(v[n].1),
                        if n == 0 { None } else { Some(v[n - 1].1) }
                    );
                }
            }
            930..=949 => {
                // snapshot and discard
                let snap = f.clone_tree(&t);
                assert_eq!(f.size(&snap), len);
                if let Err(e) = SplayForest::_check_invariants(&f, &[&t, &snap]) {
                    panic!("{e}");
                }
                f.clear_tree(snap);
                assert_eq!(f.len(), len);
            }
            _ => {
                // splaying an arbitrary node changes the root and nothing else
                if len != 0 {
                    let n = next_inx!(rng, len);
                    f.splay(&mut t, v[n].1).unwrap();
                    assert_eq!(f.root(&t), Some(v[n].1));
                    assert_eq!(f.rank(v[n].1), Some(n));
                }
            }
        }
    }
    assert!(max_len > 128);
    f.clear_tree(t);
    assert!(f.is_empty());
}
