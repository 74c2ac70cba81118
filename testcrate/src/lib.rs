use splay_arena::{ptr_struct, KeyOrder, Ptr, SplayForest, SplayTree};

ptr_struct!(P0; P1);

/// Number of keys of `tree` in the inclusive range `[lo, hi]`. The range is
/// cut out of `tree` with two splits, measured, and merged back, so the tree
/// ends up restructured but with the same contents.
pub fn range_count<P: Ptr, V, O: KeyOrder<V>>(
    forest: &mut SplayForest<P, V, O>,
    tree: &mut SplayTree<P>,
    lo: &O::Key,
    hi: &O::Key,
) -> usize {
    // everything `>= lo` goes into `mid`
    let mut mid = match forest.lower_bound(tree, lo) {
        Some(p) => forest.split_right(tree, p).unwrap(),
        None => return 0,
    };
    // everything `> hi` goes into `high`
    let high = match forest.upper_bound(&mut mid, hi) {
        Some(p) => forest.split_right(&mut mid, p).unwrap(),
        None => SplayTree::new(),
    };
    let res = forest.size(&mid);
    forest.merge(&mut mid, high);
    forest.merge(tree, mid);
    res
}
