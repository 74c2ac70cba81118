use splay_arena::{Natural, SplayForest};
use testcrate::{range_count, P0};

#[test]
fn range_count_small() {
    let mut f: SplayForest<P0, i64, Natural> = SplayForest::new();
    let mut t = f.new_tree();
    for x in 1..=5 {
        f.insert(&mut t, x).unwrap();
    }
    assert_eq!(range_count(&mut f, &mut t, &2, &4), 3);
    assert_eq!(range_count(&mut f, &mut t, &0, &10), 5);
    assert_eq!(range_count(&mut f, &mut t, &6, &9), 0);
    assert_eq!(range_count(&mut f, &mut t, &-3, &0), 0);
    assert_eq!(range_count(&mut f, &mut t, &3, &3), 1);
    // inverted bounds count nothing
    assert_eq!(range_count(&mut f, &mut t, &4, &2), 0);
    let mut empty = f.new_tree();
    assert_eq!(range_count(&mut f, &mut empty, &2, &4), 0);
}

#[test]
fn range_count_matches_filtering() {
    let keys = [
        -90i64, -71, -45, -13, -2, 0, 3, 8, 19, 21, 34, 55, 58, 72, 88, 101,
    ];
    let mut f: SplayForest<P0, i64, Natural> = SplayForest::new();
    let mut t = f.new_tree();
    for k in keys {
        f.insert(&mut t, k).unwrap();
    }
    for lo in (-100..110).step_by(7) {
        for width in [0, 1, 5, 23, 77, 200] {
            let hi = lo + width;
            let expected = keys.iter().filter(|&&k| (lo..=hi).contains(&k)).count();
            assert_eq!(range_count(&mut f, &mut t, &lo, &hi), expected);
        }
    }
    SplayForest::_check_key_order(&f, &t).unwrap();
}

#[test]
fn range_count_reassembles_the_tree() {
    let mut f: SplayForest<P0, i64, Natural> = SplayForest::new();
    let mut t = f.new_tree();
    f.insert_iter(&mut t, 0..20);
    let ps: Vec<P0> = (0..20).map(|k| f.find(&mut t, &k).unwrap()).collect();
    for (lo, hi) in [(3, 11), (11, 3), (-5, 40), (7, 7), (25, 30)] {
        let _ = range_count(&mut f, &mut t, &lo, &hi);
        // both cuts were merged back, the tree is whole again
        assert_eq!(f.size(&t), 20);
        SplayForest::_check_invariants(&f, &[&t]).unwrap();
        SplayForest::_check_key_order(&f, &t).unwrap();
    }
    // no node was removed or reallocated along the way
    for (k, p) in ps.iter().enumerate() {
        assert_eq!(f.get(*p), Some(&(k as i64)));
        assert_eq!(f.rank(*p), Some(k));
    }
}
