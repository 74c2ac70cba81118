use std::mem;

use splay_arena::{SplayForest, SplayTree};
use testcrate::P0;

type SeqForest = SplayForest<P0, u64>;

fn in_order(f: &mut SeqForest, t: &mut SplayTree<P0>) -> Vec<u64> {
    let mut res = vec![];
    for n in 0..f.size(t) {
        let p = f.select(t, n).unwrap();
        res.push(*f.get(p).unwrap());
    }
    res
}

#[test]
fn push_keeps_insertion_order() {
    let mut f = SeqForest::new();
    let mut t = f.new_tree();
    let p10 = f.push(&mut t, 10);
    let p20 = f.push(&mut t, 20);
    let p30 = f.push(&mut t, 30);
    assert_eq!(f.size(&t), 3);
    // appending splays the old last node, the new node hangs under it
    assert_eq!(f.root(&t), Some(p20));
    assert_eq!(in_order(&mut f, &mut t), [10, 20, 30]);
    assert_eq!(f.rank(p10), Some(0));
    assert_eq!(f.rank(p30), Some(2));
    // values repeat freely, position is the only identity
    f.push(&mut t, 10);
    assert_eq!(in_order(&mut f, &mut t), [10, 20, 30, 10]);
    SplayForest::_check_invariants(&f, &[&t]).unwrap();
}

#[test]
fn push_iter_builds_from_a_sequence() {
    let mut f = SeqForest::new();
    let mut t = f.new_tree();
    f.push_iter(&mut t, [5, 5, 2, 9]);
    assert_eq!(f.size(&t), 4);
    assert_eq!(in_order(&mut f, &mut t), [5, 5, 2, 9]);
    // extending an existing sequence appends at the back
    f.push_iter(&mut t, 0..2);
    assert_eq!(in_order(&mut f, &mut t), [5, 5, 2, 9, 0, 1]);
    SplayForest::_check_invariants(&f, &[&t]).unwrap();
}

#[test]
fn neighbors() {
    let mut f = SeqForest::new();
    let mut t = f.new_tree();
    let ps: Vec<P0> = (0..5).map(|x| f.push(&mut t, x)).collect();
    assert_eq!(f.first(&t), Some(ps[0]));
    assert_eq!(f.last(&t), Some(ps[4]));
    for i in 0..5 {
        assert_eq!(f.next(ps[i]), ps.get(i + 1).copied());
        assert_eq!(f.prev(ps[i]), if i == 0 { None } else { Some(ps[i - 1]) });
    }
    let empty = f.new_tree();
    assert!(f.first(&empty).is_none());
    assert!(f.last(&empty).is_none());
}

#[test]
fn remove_from_the_middle() {
    let mut f = SeqForest::new();
    let mut t = f.new_tree();
    let ps: Vec<P0> = (0..5).map(|x| f.push(&mut t, x)).collect();
    let (v, right) = f.remove(&mut t, ps[2]).unwrap();
    assert_eq!(v, 2);
    // the node was splayed before removal, so the right subtree root is some
    // later element
    let right = right.unwrap();
    assert!(*f.get(right).unwrap() > 2);
    assert_eq!(in_order(&mut f, &mut t), [0, 1, 3, 4]);
    assert_eq!(f.rank(ps[3]), Some(2));
    SplayForest::_check_invariants(&f, &[&t]).unwrap();
}

#[test]
fn split_and_append_rotates() {
    let mut f = SeqForest::new();
    let mut t = f.new_tree();
    let ps: Vec<P0> = (0..6).map(|x| f.push(&mut t, x)).collect();

    // move the first two elements to the back
    let mut rest = f.split_right(&mut t, ps[2]).unwrap();
    assert_eq!(f.size(&t), 2);
    assert_eq!(f.size(&rest), 4);
    SplayForest::_check_invariants(&f, &[&t, &rest]).unwrap();
    f.append(&mut rest, mem::take(&mut t));
    let mut t = rest;
    assert_eq!(in_order(&mut f, &mut t), [2, 3, 4, 5, 0, 1]);

    // split_left keeps the node in the front piece
    let p = f.select(&mut t, 3).unwrap();
    let rest = f.split_left(&mut t, p).unwrap();
    assert_eq!(in_order(&mut f, &mut t), [2, 3, 4, 5]);
    f.append(&mut t, rest);
    assert_eq!(in_order(&mut f, &mut t), [2, 3, 4, 5, 0, 1]);
}

#[test]
fn clone_and_clear_trees() {
    let mut f = SeqForest::new();
    let mut t = f.new_tree();
    let ps: Vec<P0> = (0..8).map(|x| f.push(&mut t, x)).collect();
    let mut snap = f.clone_tree(&t);
    assert_eq!(f.len(), 16);
    assert_eq!(f.size(&snap), 8);
    assert_eq!(in_order(&mut f, &mut snap), in_order(&mut f, &mut t));
    SplayForest::_check_invariants(&f, &[&t, &snap]).unwrap();

    // mutating the copy leaves the original alone
    let p = f.select(&mut snap, 0).unwrap();
    f.remove(&mut snap, p).unwrap();
    assert_eq!(f.size(&snap), 7);
    assert_eq!(f.size(&t), 8);

    f.clear_tree(snap);
    assert_eq!(f.len(), 8);
    // pointers into the original survive
    assert_eq!(f.get(ps[3]), Some(&3));
    SplayForest::_check_invariants(&f, &[&t]).unwrap();

    f.clear();
    assert!(f.is_empty());
    assert!(f.get(ps[3]).is_none());
}

#[test]
fn tree_structure_display() {
    let mut f = SeqForest::new();
    let mut t = f.new_tree();
    assert_eq!(format!("{}", f.debug_tree(&t)), "()");
    f.push(&mut t, 7);
    assert_eq!(format!("{}", f.debug_tree(&t)), "(()[v=7, s=1]())");
    f.push(&mut t, 8);
    assert_eq!(format!("{}", f.debug_tree(&t)), "(()[v=7, s=2](()[v=8, s=1]()))");
}
