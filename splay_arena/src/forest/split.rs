//! Structural surgery on whole trees. Splits and concatenations move
//! subtrees by relinking a handful of nodes, so their cost is the cost of
//! the splay that precedes them.

use crate::{
    forest::{Node, SplayTree},
    ord::Positional,
    Ptr, SplayForest,
};

impl<P: Ptr, V, O> SplayForest<P, V, O> {
    /// Concatenates the trees rooted at `lhs` and `rhs` with every node of
    /// `lhs` ordered before every node of `rhs`, and returns the new root.
    /// The rightmost node of `lhs` is splayed to the top and `rhs` becomes
    /// its right subtree.
    pub(crate) fn concat_inx(
        &mut self,
        lhs: Option<P::Inx>,
        rhs: Option<P::Inx>,
    ) -> Option<P::Inx> {
        let lhs = match lhs {
            Some(lhs) => lhs,
            None => return rhs,
        };
        let rhs = match rhs {
            Some(rhs) => rhs,
            None => return Some(lhs),
        };
        let max_lhs = self.rightmost_inx(lhs);
        let mut tmp = SplayTree { root: Some(lhs) };
        self.splay_inx(&mut tmp, max_lhs);
        // the rightmost node has no right child after the splay
        self.a.get_inx_mut_unwrap(max_lhs).p_tree1 = Some(rhs);
        self.a.get_inx_mut_unwrap(rhs).p_back = Some(max_lhs);
        let rhs_size = self.a.get_inx_unwrap(rhs).size;
        self.a.get_inx_mut_unwrap(max_lhs).size += rhs_size;
        Some(max_lhs)
    }

    /// Removes the node pointed to by `p` from `tree` and the forest,
    /// returning its value together with a `Ptr` to the node that was the
    /// root of its former right subtree, if there was one. The left and
    /// right subtrees of the removed node are concatenated back into `tree`.
    /// Returns `None` if `p` is invalid. `p` must be a node of `tree`, which
    /// is checked with a debug assertion only.
    #[must_use]
    pub fn remove(&mut self, tree: &mut SplayTree<P>, p: P) -> Option<(V, Option<P>)> {
        if !self.a.contains(p) {
            return None
        }
        let inx = p.inx();
        self.splay_inx(tree, inx);
        let (left, right) = {
            let node = self.a.get_inx_unwrap(inx);
            (node.p_tree0, node.p_tree1)
        };
        if let Some(left) = left {
            self.a.get_inx_mut_unwrap(left).p_back = None;
        }
        if let Some(right) = right {
            self.a.get_inx_mut_unwrap(right).p_back = None;
        }
        let right_ptr = right.map(|right| self.ptr_at_inx(right));
        let node = self.a.remove(p)?;
        tree.root = self.concat_inx(left, right);
        Some((node.v, right_ptr))
    }

    /// Splits `tree` after the node pointed to by `p`. The node and
    /// everything ordered before it stay in `tree`, everything ordered after
    /// it is moved into the returned tree, which is empty if `p` was the
    /// last node. Returns `None` and leaves `tree` unchanged if `p` is
    /// invalid. `p` must be a node of `tree`, which is checked with a debug
    /// assertion only.
    #[must_use]
    pub fn split_left(&mut self, tree: &mut SplayTree<P>, p: P) -> Option<SplayTree<P>> {
        if !self.a.contains(p) {
            return None
        }
        let inx = p.inx();
        self.splay_inx(tree, inx);
        let right = self.a.get_inx_unwrap(inx).p_tree1;
        self.a.get_inx_mut_unwrap(inx).p_tree1 = None;
        if let Some(right) = right {
            self.a.get_inx_mut_unwrap(right).p_back = None;
            let right_size = self.a.get_inx_unwrap(right).size;
            self.a.get_inx_mut_unwrap(inx).size -= right_size;
        }
        Some(SplayTree { root: right })
    }

    /// Splits `tree` before the node pointed to by `p`. Everything ordered
    /// before the node stays in `tree`, the node and everything ordered
    /// after it are moved into the returned tree. `tree` is left empty if
    /// `p` was the first node. Returns `None` and leaves `tree` unchanged if
    /// `p` is invalid. `p` must be a node of `tree`, which is checked with a
    /// debug assertion only.
    #[must_use]
    pub fn split_right(&mut self, tree: &mut SplayTree<P>, p: P) -> Option<SplayTree<P>> {
        if !self.a.contains(p) {
            return None
        }
        let inx = p.inx();
        self.splay_inx(tree, inx);
        let left = self.a.get_inx_unwrap(inx).p_tree0;
        self.a.get_inx_mut_unwrap(inx).p_tree0 = None;
        if let Some(left) = left {
            self.a.get_inx_mut_unwrap(left).p_back = None;
            let left_size = self.a.get_inx_unwrap(left).size;
            self.a.get_inx_mut_unwrap(inx).size -= left_size;
        }
        tree.root = left;
        Some(SplayTree { root: Some(inx) })
    }
}

/// Sequence operations, only usable with the [Positional] policy
impl<P: Ptr, V> SplayForest<P, V, Positional> {
    /// Appends `v` at the end of `tree` and returns a `Ptr` to its node. The
    /// new node becomes the right child of the splayed previous last node,
    /// not the root.
    pub fn push(&mut self, tree: &mut SplayTree<P>, v: V) -> P {
        let p = self.a.insert(Node {
            v,
            size: 1,
            p_back: None,
            p_tree0: None,
            p_tree1: None,
        });
        tree.root = self.concat_inx(tree.root, Some(p.inx()));
        p
    }

    /// Appends every value of `iter` at the end of `tree` in iteration
    /// order, as if by calling [SplayForest::push] in a loop
    pub fn push_iter<I: IntoIterator<Item = V>>(&mut self, tree: &mut SplayTree<P>, iter: I) {
        for v in iter {
            let _ = self.push(tree, v);
        }
    }

    /// Appends every node of `rhs` after the nodes of `lhs`, consuming the
    /// `rhs` handle. `lhs` ends up with all the nodes of both trees in
    /// order, no relation between the values is required.
    pub fn append(&mut self, lhs: &mut SplayTree<P>, rhs: SplayTree<P>) {
        lhs.root = self.concat_inx(lhs.root, rhs.root);
    }
}
