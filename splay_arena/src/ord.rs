//! Ordering policies for [SplayForest](crate::SplayForest)

use core::cmp::Ordering;

use crate::{
    forest::{Node, SplayTree},
    Ptr, SplayForest,
};

/// A keying policy for a [SplayForest](crate::SplayForest). The policy
/// extracts a key out of each stored value and compares keys, turning the
/// forest into a keyed container with no duplicate keys. Stateful policies
/// are possible through [SplayForest::with_order](crate::SplayForest::with_order).
pub trait KeyOrder<V> {
    /// The key type borrowed from a stored value
    type Key: ?Sized;

    /// Borrows the key out of `v`
    fn key<'a>(&self, v: &'a V) -> &'a Self::Key;

    /// Total ordering on keys
    fn cmp_keys(&self, lhs: &Self::Key, rhs: &Self::Key) -> Ordering;
}

/// The [KeyOrder] that uses the whole value as its own key through the `Ord`
/// implementation of the value type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<V: Ord> KeyOrder<V> for Natural {
    type Key = V;

    fn key<'a>(&self, v: &'a V) -> &'a V {
        v
    }

    fn cmp_keys(&self, lhs: &V, rhs: &V) -> Ordering {
        lhs.cmp(rhs)
    }
}

/// The policy for sequence forests ordered by in-order position only. This
/// intentionally does not implement [KeyOrder], so that the keyed operations
/// do not exist on positional forests and the positional append and
/// unconditional merge operations exist only on them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Positional;

/// Keyed operations, usable with any [KeyOrder] policy
impl<P: Ptr, V, O: KeyOrder<V>> SplayForest<P, V, O> {
    /// Inserts `v` into `tree` at its position in key order and splays its
    /// new node to the root. If a node with an equal key already exists,
    /// nothing is changed and `v` is returned back in the error variant.
    pub fn insert(&mut self, tree: &mut SplayTree<P>, v: V) -> Result<P, V> {
        let mut inx = match tree.root {
            Some(root) => root,
            None => {
                let p = self.a.insert(Node {
                    v,
                    size: 1,
                    p_back: None,
                    p_tree0: None,
                    p_tree1: None,
                });
                tree.root = Some(p.inx());
                return Ok(p)
            }
        };
        let (parent, go_left) = loop {
            let ord = {
                let node = self.a.get_inx_unwrap(inx);
                self.order.cmp_keys(self.order.key(&v), self.order.key(&node.v))
            };
            match ord {
                Ordering::Less => match self.a.get_inx_unwrap(inx).p_tree0 {
                    Some(left) => inx = left,
                    None => break (inx, true),
                },
                Ordering::Greater => match self.a.get_inx_unwrap(inx).p_tree1 {
                    Some(right) => inx = right,
                    None => break (inx, false),
                },
                Ordering::Equal => return Err(v),
            }
        };
        let p = self.a.insert(Node {
            v,
            size: 1,
            p_back: Some(parent),
            p_tree0: None,
            p_tree1: None,
        });
        if go_left {
            self.a.get_inx_mut_unwrap(parent).p_tree0 = Some(p.inx());
        } else {
            self.a.get_inx_mut_unwrap(parent).p_tree1 = Some(p.inx());
        }
        // the new leaf adds one to every subtree it is under
        let mut up = Some(parent);
        while let Some(i) = up {
            self.a.get_inx_mut_unwrap(i).size += 1;
            up = self.a.get_inx_unwrap(i).p_back;
        }
        self.splay_inx(tree, p.inx());
        Ok(p)
    }

    /// Inserts every value of `iter` into `tree` in iteration order. Values
    /// whose key is already present in `tree` are dropped. Equivalent to
    /// calling [SplayForest::insert] in a loop and discarding the results.
    pub fn insert_iter<I: IntoIterator<Item = V>>(&mut self, tree: &mut SplayTree<P>, iter: I) {
        for v in iter {
            let _ = self.insert(tree, v);
        }
    }

    /// Returns a `Ptr` to the node of `tree` whose key compares deepest
    /// along the search path for `k`, which is the node with key `k` when it
    /// exists and otherwise the last node visited. Returns `None` only if
    /// the tree is empty. Performs no splaying.
    #[must_use]
    pub fn find_candidate(&self, tree: &SplayTree<P>, k: &O::Key) -> Option<P> {
        let mut inx = tree.root?;
        loop {
            let node = self.a.get_inx_unwrap(inx);
            let next = match self.order.cmp_keys(k, self.order.key(&node.v)) {
                Ordering::Less => node.p_tree0,
                Ordering::Greater => node.p_tree1,
                Ordering::Equal => break,
            };
            match next {
                Some(next) => inx = next,
                None => break,
            }
        }
        Some(self.ptr_at_inx(inx))
    }

    /// Returns a `Ptr` to the node of `tree` with key equal to `k`, or
    /// `None` if there is none. The closest node visited is splayed to the
    /// root even when the lookup misses.
    #[must_use]
    pub fn find(&mut self, tree: &mut SplayTree<P>, k: &O::Key) -> Option<P> {
        let p = self.find_candidate(tree, k)?;
        self.splay_inx(tree, p.inx());
        let node = self.a.get_inx_unwrap(p.inx());
        if self.order.cmp_keys(k, self.order.key(&node.v)) == Ordering::Equal {
            Some(p)
        } else {
            None
        }
    }

    /// Returns a `Ptr` to the first node of `tree` whose key is not less
    /// than `k`, splaying it to the root, or `None` if every key is less
    /// than `k`.
    #[must_use]
    pub fn lower_bound(&mut self, tree: &mut SplayTree<P>, k: &O::Key) -> Option<P> {
        let mut inx = tree.root;
        let mut bound = None;
        while let Some(i) = inx {
            let node = self.a.get_inx_unwrap(i);
            if self.order.cmp_keys(self.order.key(&node.v), k) == Ordering::Less {
                inx = node.p_tree1;
            } else {
                bound = Some(i);
                inx = node.p_tree0;
            }
        }
        let bound = bound?;
        let res = self.ptr_at_inx(bound);
        self.splay_inx(tree, bound);
        Some(res)
    }

    /// Returns a `Ptr` to the first node of `tree` whose key is greater
    /// than `k`, splaying it to the root, or `None` if there is none.
    #[must_use]
    pub fn upper_bound(&mut self, tree: &mut SplayTree<P>, k: &O::Key) -> Option<P> {
        let mut inx = tree.root;
        let mut bound = None;
        while let Some(i) = inx {
            let node = self.a.get_inx_unwrap(i);
            if self.order.cmp_keys(k, self.order.key(&node.v)) == Ordering::Less {
                bound = Some(i);
                inx = node.p_tree0;
            } else {
                inx = node.p_tree1;
            }
        }
        let bound = bound?;
        let res = self.ptr_at_inx(bound);
        self.splay_inx(tree, bound);
        Some(res)
    }

    /// Returns if every key of `lhs` is strictly less than every key of
    /// `rhs`, which is vacuously true when either tree is empty. Only the
    /// rightmost key of `lhs` and the leftmost key of `rhs` are compared.
    pub fn ordered_before(&self, lhs: &SplayTree<P>, rhs: &SplayTree<P>) -> bool {
        let (lhs_root, rhs_root) = match (lhs.root, rhs.root) {
            (Some(lhs_root), Some(rhs_root)) => (lhs_root, rhs_root),
            _ => return true,
        };
        let max_lhs = &self.a.get_inx_unwrap(self.rightmost_inx(lhs_root)).v;
        let min_rhs = &self.a.get_inx_unwrap(self.leftmost_inx(rhs_root)).v;
        self.order
            .cmp_keys(self.order.key(max_lhs), self.order.key(min_rhs))
            == Ordering::Less
    }

    /// Moves every node of `rhs` into `lhs`, consuming the `rhs` handle.
    /// Every key of `lhs` must be strictly less than every key of `rhs`,
    /// which is checked with a debug assertion only, key order in `lhs` is
    /// silently broken otherwise.
    pub fn merge(&mut self, lhs: &mut SplayTree<P>, rhs: SplayTree<P>) {
        debug_assert!(self.ordered_before(lhs, &rhs));
        lhs.root = self.concat_inx(lhs.root, rhs.root);
    }
}
