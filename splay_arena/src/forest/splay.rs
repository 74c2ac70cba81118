//! The self-adjusting core. Everything here is expressed through
//! `rotate_up`, which does one local rotation and repairs subtree sizes, and
//! `splay_inx`, which repeats rotations until the target is the root.

use crate::{forest::SplayTree, Ptr, SplayForest};

impl<P: Ptr, V, O> SplayForest<P, V, O> {
    /// Recomputes the subtree size of the node at `inx` from its children
    pub(crate) fn update_size(&mut self, inx: P::Inx) {
        let (p_tree0, p_tree1) = {
            let node = self.a.get_inx_unwrap(inx);
            (node.p_tree0, node.p_tree1)
        };
        let mut size = 1;
        if let Some(child) = p_tree0 {
            size += self.a.get_inx_unwrap(child).size;
        }
        if let Some(child) = p_tree1 {
            size += self.a.get_inx_unwrap(child).size;
        }
        self.a.get_inx_mut_unwrap(inx).size = size;
    }

    /// Rotates the node at `inx` one level up, taking the place of its
    /// parent. Must not be called on a root node. Subtree sizes of the old
    /// parent and then of the node are repaired, sizes above are unchanged
    /// because the subtree as a whole keeps its node set.
    pub(crate) fn rotate_up(&mut self, inx: P::Inx) {
        let parent = match self.a.get_inx_unwrap(inx).p_back {
            Some(parent) => parent,
            None => unreachable!(),
        };
        let grandparent = self.a.get_inx_unwrap(parent).p_back;
        let node_is_left = self.a.get_inx_unwrap(parent).p_tree0 == Some(inx);
        if node_is_left {
            // the node's right subtree moves over to the parent
            let mid = self.a.get_inx_unwrap(inx).p_tree1;
            self.a.get_inx_mut_unwrap(parent).p_tree0 = mid;
            if let Some(mid) = mid {
                self.a.get_inx_mut_unwrap(mid).p_back = Some(parent);
            }
            self.a.get_inx_mut_unwrap(inx).p_tree1 = Some(parent);
        } else {
            let mid = self.a.get_inx_unwrap(inx).p_tree0;
            self.a.get_inx_mut_unwrap(parent).p_tree1 = mid;
            if let Some(mid) = mid {
                self.a.get_inx_mut_unwrap(mid).p_back = Some(parent);
            }
            self.a.get_inx_mut_unwrap(inx).p_tree0 = Some(parent);
        }
        self.a.get_inx_mut_unwrap(parent).p_back = Some(inx);
        self.a.get_inx_mut_unwrap(inx).p_back = grandparent;
        if let Some(grandparent) = grandparent {
            if self.a.get_inx_unwrap(grandparent).p_tree0 == Some(parent) {
                self.a.get_inx_mut_unwrap(grandparent).p_tree0 = Some(inx);
            } else {
                self.a.get_inx_mut_unwrap(grandparent).p_tree1 = Some(inx);
            }
        }
        // the old parent is now below the node
        self.update_size(parent);
        self.update_size(inx);
    }

    /// Walks parent links from `inx` to the root of its tree
    pub(crate) fn find_root(&self, mut inx: P::Inx) -> P::Inx {
        while let Some(p_back) = self.a.get_inx_unwrap(inx).p_back {
            inx = p_back;
        }
        inx
    }

    /// Splays the node at `inx` to the root of `tree` and records it as the
    /// new root. `inx` must be a node of `tree`.
    pub(crate) fn splay_inx(&mut self, tree: &mut SplayTree<P>, inx: P::Inx) {
        debug_assert_eq!(Some(self.find_root(inx)), tree.root);
        loop {
            let parent = match self.a.get_inx_unwrap(inx).p_back {
                Some(parent) => parent,
                None => break,
            };
            match self.a.get_inx_unwrap(parent).p_back {
                None => {
                    // zig
                    self.rotate_up(inx);
                }
                Some(grandparent) => {
                    let node_is_left = self.a.get_inx_unwrap(parent).p_tree0 == Some(inx);
                    let parent_is_left =
                        self.a.get_inx_unwrap(grandparent).p_tree0 == Some(parent);
                    if node_is_left == parent_is_left {
                        // zig-zig, rotate the parent first
                        self.rotate_up(parent);
                        self.rotate_up(inx);
                    } else {
                        // zig-zag
                        self.rotate_up(inx);
                        self.rotate_up(inx);
                    }
                }
            }
        }
        tree.root = Some(inx);
    }

    /// Splays the node pointed to by `p` to the root of `tree`. Returns
    /// `None` if `p` is invalid. `p` must be a node of `tree`, which is
    /// checked with a debug assertion only.
    pub fn splay(&mut self, tree: &mut SplayTree<P>, p: P) -> Option<()> {
        if !self.a.contains(p) {
            return None
        }
        self.splay_inx(tree, p.inx());
        Some(())
    }

    /// Returns a `Ptr` to the node at in-order position `n` of `tree`,
    /// counting from zero, and splays it to the root. Returns `None` if
    /// `n >= self.size(tree)`. Runs in `O(log n)` amortized time by steering
    /// on subtree sizes.
    #[must_use]
    pub fn select(&mut self, tree: &mut SplayTree<P>, mut n: usize) -> Option<P> {
        let mut inx = tree.root?;
        if n >= self.a.get_inx_unwrap(inx).size {
            return None
        }
        loop {
            let node = self.a.get_inx_unwrap(inx);
            let left_size = match node.p_tree0 {
                Some(left) => self.a.get_inx_unwrap(left).size,
                None => 0,
            };
            if n < left_size {
                inx = match node.p_tree0 {
                    Some(left) => left,
                    None => unreachable!(),
                };
            } else if n == left_size {
                break
            } else {
                n -= left_size.wrapping_add(1);
                inx = match node.p_tree1 {
                    Some(right) => right,
                    None => unreachable!(),
                };
            }
        }
        let res = self.ptr_at_inx(inx);
        self.splay_inx(tree, inx);
        Some(res)
    }

    /// Returns the in-order position of the node pointed to by `p` within
    /// its tree, counting from zero. Returns `None` if `p` is invalid.
    /// Nothing is splayed, so the cost is proportional to the depth of the
    /// node.
    #[must_use]
    pub fn rank(&self, p: P) -> Option<usize> {
        if !self.a.contains(p) {
            return None
        }
        let mut inx = p.inx();
        let mut res = match self.a.get_inx_unwrap(inx).p_tree0 {
            Some(left) => self.a.get_inx_unwrap(left).size,
            None => 0,
        };
        // every time we come up from a right child, the parent and its left
        // subtree precede us
        while let Some(p_back) = self.a.get_inx_unwrap(inx).p_back {
            if self.a.get_inx_unwrap(p_back).p_tree1 == Some(inx) {
                res += 1;
                if let Some(left) = self.a.get_inx_unwrap(p_back).p_tree0 {
                    res += self.a.get_inx_unwrap(left).size;
                }
            }
            inx = p_back;
        }
        Some(res)
    }

    pub(crate) fn ptr_at_inx(&self, inx: P::Inx) -> P {
        match self.a.get_ignore_gen(inx) {
            Some((gen, _)) => P::_from_raw(inx, gen),
            None => unreachable!(),
        }
    }
}
