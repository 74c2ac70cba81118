use alloc::vec::Vec;

use crate::{arena::Arena, forest::SplayTree, KeyOrder, Ptr, SplayForest};

impl<P: Ptr, V, O> SplayForest<P, V, O> {
    /// Used by tests. `trees` must contain a handle to every tree of the
    /// forest, so that node coverage can be checked.
    #[doc(hidden)]
    pub fn _check_invariants(
        this: &Self,
        trees: &[&SplayTree<P>],
    ) -> Result<(), &'static str> {
        Arena::_check_invariants(&this.a)?;
        let mut n_reached = 0;
        for tree in trees {
            let root = match tree.root {
                Some(root) => root,
                None => continue,
            };
            if this.a.get_ignore_gen(root).is_none() {
                return Err("tree root is unallocated")
            }
            if this.a.get_inx_unwrap(root).p_back.is_some() {
                return Err("tree root has a parent")
            }
            let mut stack: Vec<P::Inx> = Vec::new();
            stack.push(root);
            while let Some(inx) = stack.pop() {
                n_reached += 1;
                if n_reached > this.a.len() {
                    // more steps than nodes, some node was reached twice
                    return Err("link cycle or shared node")
                }
                let node = this.a.get_inx_unwrap(inx);
                let mut expected_size = 1;
                for child in [node.p_tree0, node.p_tree1] {
                    let child = match child {
                        Some(child) => child,
                        None => continue,
                    };
                    if this.a.get_ignore_gen(child).is_none() {
                        return Err("child is unallocated")
                    }
                    let child_node = this.a.get_inx_unwrap(child);
                    if child_node.p_back != Some(inx) {
                        return Err("broken backlink")
                    }
                    expected_size += child_node.size;
                    stack.push(child);
                }
                if node.p_tree0.is_some() && (node.p_tree0 == node.p_tree1) {
                    return Err("children are the same node")
                }
                if node.size != expected_size {
                    return Err("bad subtree size")
                }
            }
        }
        if n_reached != this.a.len() {
            return Err("node not reachable from any tree")
        }
        Ok(())
    }
}

impl<P: Ptr, V, O: KeyOrder<V>> SplayForest<P, V, O> {
    /// Used by tests. Checks that an in-order walk of `tree` visits strictly
    /// increasing keys.
    #[doc(hidden)]
    pub fn _check_key_order(this: &Self, tree: &SplayTree<P>) -> Result<(), &'static str> {
        let mut p = match this.first(tree) {
            Some(p) => p,
            None => return Ok(()),
        };
        while let Some(next) = this.next(p) {
            let prev_v = match this.get(p) {
                Some(v) => v,
                None => return Err("invalid node"),
            };
            let next_v = match this.get(next) {
                Some(v) => v,
                None => return Err("invalid node"),
            };
            if this
                .order
                .cmp_keys(this.order.key(prev_v), this.order.key(next_v))
                != core::cmp::Ordering::Less
            {
                return Err("keys out of order")
            }
            p = next;
        }
        Ok(())
    }
}
