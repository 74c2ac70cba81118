mod check;
mod splay;
mod split;

use alloc::vec::Vec;
use core::fmt;

use crate::{arena::Arena, ord::Positional, Ptr};

/// Internal node of a [SplayForest]
pub(crate) struct Node<P: Ptr, V> {
    pub v: V,
    /// Number of nodes in the subtree rooted here, including this node
    pub size: usize,
    pub p_back: Option<P::Inx>,
    pub p_tree0: Option<P::Inx>,
    pub p_tree1: Option<P::Inx>,
}

impl<P: Ptr, V: Clone> Clone for Node<P, V> {
    fn clone(&self) -> Self {
        Self {
            v: self.v.clone(),
            size: self.size,
            p_back: self.p_back,
            p_tree0: self.p_tree0,
            p_tree1: self.p_tree1,
        }
    }
}

/// A handle to one tree of a [SplayForest]. The handle is move-only and does
/// not implement `Clone`, which is what lets split and merge operations
/// transfer whole subtrees in `O(log n)` time: every node in the forest is
/// reachable from exactly one `SplayTree` at a time.
///
/// Operations on the forest take the handle by reference and fix up the
/// recorded root as the tree is restructured. Using a handle with a forest
/// other than the one it was grown in, or after [SplayForest::clear], is a
/// logic error that the `_check_invariants` function and debug assertions can
/// catch but release builds will not.
pub struct SplayTree<P: Ptr> {
    pub(crate) root: Option<P::Inx>,
}

impl<P: Ptr> SplayTree<P> {
    /// Returns a new empty tree. Trees start empty and acquire nodes through
    /// insertion or merging.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Returns if this tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

impl<P: Ptr> Default for SplayTree<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Ptr> fmt::Debug for SplayTree<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplayTree").field("root", &self.root).finish()
    }
}

/// An arena of splay tree nodes supporting multiple trees at once.
///
/// All nodes live in one generation-counted arena, and individual trees are
/// addressed through move-only [SplayTree] handles. Self-adjusting rotations
/// bring recently accessed nodes to the root, and every node carries its
/// subtree size so that rank and select queries run in `O(log n)`. Keeping
/// every tree in the same arena is what makes [SplayForest::split_left] and
/// the merge operations cheap: they only exchange a few links instead of
/// moving elements.
///
/// The ordering policy `O` selects between the two container flavors:
///
/// - The default [Positional](crate::Positional) policy gives a sequence
///   container with append-only insertion, indexing by in-order position, and
///   unconditional concatenation.
/// - Any [KeyOrder](crate::KeyOrder) policy (such as
///   [Natural](crate::Natural)) gives a keyed container with sorted
///   insertion, lookup, and bound queries, where merging requires the operand
///   key ranges to not overlap.
///
/// ```
/// use splay_arena::{ptr_struct, Natural, SplayForest};
///
/// ptr_struct!(P0);
///
/// let mut f: SplayForest<P0, i64, Natural> = SplayForest::new();
/// let mut t = f.new_tree();
/// for x in [1, 2, 4, 3] {
///     f.insert(&mut t, x).unwrap();
/// }
/// // the last inserted value was splayed to the root
/// assert_eq!(f.get(f.root(&t).unwrap()), Some(&3));
/// assert_eq!(f.size(&t), 4);
/// let p = f.find(&mut t, &2).unwrap();
/// assert_eq!(f.get(p), Some(&2));
/// ```
pub struct SplayForest<P: Ptr, V, O = Positional> {
    pub(crate) a: Arena<P, Node<P, V>>,
    pub(crate) order: O,
}

/// Operations independent of the ordering policy
impl<P: Ptr, V, O> SplayForest<P, V, O> {
    /// Returns a new forest with no nodes
    pub fn new() -> Self
    where
        O: Default,
    {
        Self {
            a: Arena::new(),
            order: O::default(),
        }
    }

    /// Returns a new forest using `order` for all key comparisons
    pub fn with_order(order: O) -> Self {
        Self {
            a: Arena::new(),
            order,
        }
    }

    /// Returns a new empty tree handle. Purely a convenience, the handle is
    /// not bound to `self` until nodes are inserted through it.
    pub fn new_tree(&self) -> SplayTree<P> {
        SplayTree::new()
    }

    /// Returns the total number of nodes in the forest across all trees
    pub fn len(&self) -> usize {
        self.a.len()
    }

    /// Returns if the forest has no nodes at all
    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    /// Returns the capacity of the underlying arena
    pub fn capacity(&self) -> usize {
        self.a.capacity()
    }

    /// Returns the generation counter of the underlying arena
    pub fn gen(&self) -> P::Gen {
        self.a.gen()
    }

    /// Reserves capacity for at least `additional` more nodes
    pub fn reserve(&mut self, additional: usize) {
        self.a.reserve(additional)
    }

    /// Returns the number of nodes in `tree` in `O(1)` time
    pub fn size(&self, tree: &SplayTree<P>) -> usize {
        match tree.root {
            Some(root) => self.a.get_inx_unwrap(root).size,
            None => 0,
        }
    }

    /// Returns a `Ptr` to the current root node of `tree`, or `None` if the
    /// tree is empty. Which node is at the root changes with almost every
    /// operation, since accessed nodes are rotated up.
    #[must_use]
    pub fn root(&self, tree: &SplayTree<P>) -> Option<P> {
        let root = tree.root?;
        let (gen, _) = self.a.get_ignore_gen(root)?;
        Some(P::_from_raw(root, gen))
    }

    /// Returns if `p` points to a live node of this forest
    pub fn contains(&self, p: P) -> bool {
        self.a.contains(p)
    }

    /// Returns a reference to the value of the node pointed to by `p`.
    /// Returns `None` if `p` is invalid.
    #[must_use]
    pub fn get(&self, p: P) -> Option<&V> {
        self.a.get(p).map(|node| &node.v)
    }

    /// Returns a mutable reference to the value of the node pointed to by
    /// `p`. Returns `None` if `p` is invalid. In a keyed forest the value
    /// must not be mutated in a way that changes its key relative to its
    /// neighbors.
    #[must_use]
    pub fn get_mut(&mut self, p: P) -> Option<&mut V> {
        self.a.get_mut(p).map(|node| &mut node.v)
    }

    /// Returns the number of nodes in the subtree rooted at `p`, including
    /// `p` itself. Returns `None` if `p` is invalid.
    #[must_use]
    pub fn subtree_size(&self, p: P) -> Option<usize> {
        self.a.get(p).map(|node| node.size)
    }

    pub(crate) fn leftmost_inx(&self, mut inx: P::Inx) -> P::Inx {
        while let Some(next) = self.a.get_inx_unwrap(inx).p_tree0 {
            inx = next;
        }
        inx
    }

    pub(crate) fn rightmost_inx(&self, mut inx: P::Inx) -> P::Inx {
        while let Some(next) = self.a.get_inx_unwrap(inx).p_tree1 {
            inx = next;
        }
        inx
    }

    /// Returns a `Ptr` to the node with the smallest in-order position in
    /// the subtree rooted at `p`, without splaying anything. Returns `None`
    /// if `p` is invalid.
    #[must_use]
    pub fn leftmost(&self, p: P) -> Option<P> {
        if !self.a.contains(p) {
            return None
        }
        Some(self.ptr_at_inx(self.leftmost_inx(p.inx())))
    }

    /// Returns a `Ptr` to the node with the greatest in-order position in
    /// the subtree rooted at `p`, without splaying anything. Returns `None`
    /// if `p` is invalid.
    #[must_use]
    pub fn rightmost(&self, p: P) -> Option<P> {
        if !self.a.contains(p) {
            return None
        }
        Some(self.ptr_at_inx(self.rightmost_inx(p.inx())))
    }

    /// Returns a `Ptr` to the node with the smallest in-order position in
    /// `tree`, without splaying anything. Returns `None` if the tree is
    /// empty.
    #[must_use]
    pub fn first(&self, tree: &SplayTree<P>) -> Option<P> {
        let root = tree.root?;
        Some(self.ptr_at_inx(self.leftmost_inx(root)))
    }

    /// Returns a `Ptr` to the node with the greatest in-order position in
    /// `tree`, without splaying anything. Returns `None` if the tree is
    /// empty.
    #[must_use]
    pub fn last(&self, tree: &SplayTree<P>) -> Option<P> {
        let root = tree.root?;
        Some(self.ptr_at_inx(self.rightmost_inx(root)))
    }

    /// Returns a `Ptr` to the in-order successor of the node pointed to by
    /// `p`, without splaying anything. Returns `None` if `p` is invalid or
    /// points to the last node of its tree.
    #[must_use]
    pub fn next(&self, p: P) -> Option<P> {
        if !self.a.contains(p) {
            return None
        }
        let node = self.a.get_inx_unwrap(p.inx());
        if let Some(right) = node.p_tree1 {
            return Some(self.ptr_at_inx(self.leftmost_inx(right)))
        }
        // walk up until we came from a left child
        let mut inx = p.inx();
        loop {
            let p_back = self.a.get_inx_unwrap(inx).p_back?;
            if self.a.get_inx_unwrap(p_back).p_tree0 == Some(inx) {
                return Some(self.ptr_at_inx(p_back))
            }
            inx = p_back;
        }
    }

    /// Returns a `Ptr` to the in-order predecessor of the node pointed to by
    /// `p`, without splaying anything. Returns `None` if `p` is invalid or
    /// points to the first node of its tree.
    #[must_use]
    pub fn prev(&self, p: P) -> Option<P> {
        if !self.a.contains(p) {
            return None
        }
        let node = self.a.get_inx_unwrap(p.inx());
        if let Some(left) = node.p_tree0 {
            return Some(self.ptr_at_inx(self.rightmost_inx(left)))
        }
        let mut inx = p.inx();
        loop {
            let p_back = self.a.get_inx_unwrap(inx).p_back?;
            if self.a.get_inx_unwrap(p_back).p_tree1 == Some(inx) {
                return Some(self.ptr_at_inx(p_back))
            }
            inx = p_back;
        }
    }

    /// Clones the whole of `tree` into a new tree in the same forest,
    /// preserving structure and subtree sizes, and returns a handle to the
    /// copy. Old `Ptr`s continue to point into the original tree only.
    pub fn clone_tree(&mut self, tree: &SplayTree<P>) -> SplayTree<P>
    where
        V: Clone,
    {
        let src_root = match tree.root {
            Some(root) => root,
            None => return SplayTree::new(),
        };
        let dst_root = self.clone_node(src_root, None);
        // pairs of (source, copy) whose children still need copying
        let mut stack: Vec<(P::Inx, P::Inx)> = Vec::new();
        stack.push((src_root, dst_root));
        while let Some((src, dst)) = stack.pop() {
            let p_tree0 = self.a.get_inx_unwrap(src).p_tree0;
            let p_tree1 = self.a.get_inx_unwrap(src).p_tree1;
            if let Some(child) = p_tree0 {
                let copy = self.clone_node(child, Some(dst));
                self.a.get_inx_mut_unwrap(dst).p_tree0 = Some(copy);
                stack.push((child, copy));
            }
            if let Some(child) = p_tree1 {
                let copy = self.clone_node(child, Some(dst));
                self.a.get_inx_mut_unwrap(dst).p_tree1 = Some(copy);
                stack.push((child, copy));
            }
        }
        SplayTree {
            root: Some(dst_root),
        }
    }

    fn clone_node(&mut self, src: P::Inx, p_back: Option<P::Inx>) -> P::Inx
    where
        V: Clone,
    {
        let node = self.a.get_inx_unwrap(src);
        let copy = Node {
            v: node.v.clone(),
            size: node.size,
            p_back,
            p_tree0: None,
            p_tree1: None,
        };
        self.a.insert(copy).inx()
    }

    /// Removes every node of `tree` from the forest, consuming the handle.
    /// All `Ptr`s into the tree are invalidated. Other trees of the forest
    /// are unaffected.
    pub fn clear_tree(&mut self, tree: SplayTree<P>) {
        let mut stack: Vec<P::Inx> = Vec::new();
        if let Some(root) = tree.root {
            stack.push(root);
        }
        while let Some(inx) = stack.pop() {
            let node = self.a.get_inx_unwrap(inx);
            if let Some(child) = node.p_tree0 {
                stack.push(child);
            }
            if let Some(child) = node.p_tree1 {
                stack.push(child);
            }
            let _ = self.a.remove_inx(inx);
        }
    }

    /// Removes every node of the forest and invalidates all `Ptr`s. All
    /// outstanding tree handles are orphaned and must be dropped, any further
    /// use of them is a logic error.
    pub fn clear(&mut self) {
        self.a.clear()
    }

    /// Returns a displayable rendering of the structure of `tree`, showing
    /// each node in-order as `[v=.., s=..]` with its subtrees in surrounding
    /// parentheses and `()` for empty subtrees.
    pub fn debug_tree<'a>(&'a self, tree: &'a SplayTree<P>) -> TreeDump<'a, P, V, O> {
        TreeDump { forest: self, tree }
    }
}

impl<P: Ptr, V, O: Default> Default for SplayForest<P, V, O> {
    fn default() -> Self {
        Self::new()
    }
}

/// Implemented if `V: Clone` and `O: Clone`.
impl<P: Ptr, V: Clone, O: Clone> Clone for SplayForest<P, V, O> {
    /// Tree handles valid for the original forest are valid for the
    /// corresponding trees of the cloned forest.
    fn clone(&self) -> Self {
        Self {
            a: self.a.clone(),
            order: self.order.clone(),
        }
    }
}

/// Helper struct returned from [SplayForest::debug_tree]
pub struct TreeDump<'a, P: Ptr, V, O> {
    forest: &'a SplayForest<P, V, O>,
    tree: &'a SplayTree<P>,
}

impl<'a, P: Ptr, V: fmt::Display, O> fmt::Display for TreeDump<'a, P, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Step<I> {
            Subtree(Option<I>),
            Emit(I),
            Close,
        }
        let mut stack: Vec<Step<P::Inx>> = Vec::new();
        stack.push(Step::Subtree(self.tree.root));
        while let Some(step) = stack.pop() {
            match step {
                Step::Subtree(None) => write!(f, "()")?,
                Step::Subtree(Some(inx)) => {
                    write!(f, "(")?;
                    let node = self.forest.a.get_inx_unwrap(inx);
                    stack.push(Step::Close);
                    stack.push(Step::Subtree(node.p_tree1));
                    stack.push(Step::Emit(inx));
                    stack.push(Step::Subtree(node.p_tree0));
                }
                Step::Emit(inx) => {
                    let node = self.forest.a.get_inx_unwrap(inx);
                    write!(f, "[v={}, s={}]", node.v, node.size)?;
                }
                Step::Close => write!(f, ")")?,
            }
        }
        Ok(())
    }
}
