use alloc::vec::Vec;
use core::mem;

use crate::{
    entry::InternalEntry::{self, *},
    Ptr, PtrGen, PtrInx,
};

/// The node store shared by every tree of a forest. Entries are kept in a
/// `Vec` with an internal freelist, so removals return slots for future
/// insertions to reuse and indexes stay stable across all other operations.
///
/// # Invariants
///
/// - The generation value starts at 2 in a new arena, so that the
///   `Ptr::invalid` function works
/// - If there are free entries, all `Free` entries have their freelist nodes
///   in a single linked list with the start being pointed to by
///   `freelist_root` and the end pointing to itself
/// - If there are no free entries, `freelist_root` is `None`
/// - During an invalidation operation, the arena `gen` is incremented _and_
///   the allocation in question is turned into a `Free`. Newer allocations
///   must use the new `gen` value.
pub(crate) struct Arena<P: Ptr, T> {
    m: Vec<InternalEntry<P, T>>,
    /// Number of `T` currently contained in the arena
    len: usize,
    /// Points to the root of the chain of freelist nodes
    freelist_root: Option<P::Inx>,
    gen: P::Gen,
}

impl<P: Ptr, T> Arena<P, T> {
    pub fn new() -> Self {
        Arena {
            m: Vec::new(),
            len: 0,
            freelist_root: None,
            gen: PtrGen::two(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.m.len()
    }

    /// Returns the arena generation counter (unless `P::Gen` is `()` in which
    /// case there is no generation counting), which is equal to the number of
    /// invalidation operations performed on this arena plus 2
    #[inline]
    pub fn gen(&self) -> P::Gen {
        self.gen
    }

    #[inline]
    fn inc_gen(&mut self) {
        self.gen = PtrGen::increment(self.gen);
    }

    /// Reserves capacity for at least `additional` more `T`, capped so that
    /// the total capacity never exceeds `P::Inx::max() + 1`.
    pub fn reserve(&mut self, additional: usize) {
        let end = self.m.len();
        let target = end
            .checked_add(additional)
            .unwrap_or(usize::MAX)
            .clamp(0, <P::Inx as PtrInx>::max().checked_add(1).unwrap_or(usize::MAX));
        let remaining = target.saturating_sub(end);
        if remaining > 0 {
            self.m.reserve(remaining);
            let old_root = self.freelist_root;
            // the new root goes at the start of the extension
            self.freelist_root = Some(P::Inx::new(end));
            // initialize the freelist with each entry pointing to the next
            for i in 1..remaining {
                self.m.push(Free(P::Inx::new(end.wrapping_add(i))));
            }
            match old_root {
                Some(old_root) => {
                    // the last `Free` points to the old root
                    self.m.push(Free(old_root));
                }
                None => {
                    // the last `Free` points to itself
                    self.m.push(Free(P::Inx::new(target.wrapping_sub(1))));
                }
            }
        }
    }

    #[must_use]
    fn m_get(&self, inx: P::Inx) -> Option<&InternalEntry<P, T>> {
        self.m.get(P::Inx::get(inx))
    }

    #[must_use]
    fn m_get_mut(&mut self, inx: P::Inx) -> Option<&mut InternalEntry<P, T>> {
        self.m.get_mut(P::Inx::get(inx))
    }

    /// Panics if index `inx` does not point to a `Free` entry.
    #[inline]
    fn unwrap_replace_free(&mut self, inx: P::Inx, gen: P::Gen, t: T) {
        let next = self
            .m_get_mut(inx)
            .unwrap()
            .replace_free_with_allocated(gen, t)
            .unwrap();
        if next == inx {
            // end of freelist
            self.freelist_root = None;
        } else {
            // move to next node in the freelist
            self.freelist_root = Some(next);
        }
    }

    /// Inserts `t` into the arena and returns a `Ptr` to it, allocating if
    /// capacity runs out. Panics if the arena is at maximum length.
    pub fn insert(&mut self, t: T) -> P {
        let inx = if let Some(inx) = self.freelist_root {
            inx
        } else {
            // double the allocation size
            let mut additional = self.m.len();
            if additional == 0 {
                // need at least one
                additional = 1;
            }
            self.reserve(additional);
            match self.freelist_root {
                Some(inx) => inx,
                None => panic!("inserted into an arena with maximum length `P::Inx::max() + 1`"),
            }
        };
        self.unwrap_replace_free(inx, self.gen(), t);
        self.len += 1;
        Ptr::_from_raw(inx, self.gen())
    }

    /// Returns if `p` is a valid `Ptr`
    pub fn contains(&self, p: P) -> bool {
        match self.m_get(p.inx()) {
            Some(Allocated(gen, _)) => *gen == p.gen(),
            _ => false,
        }
    }

    /// Returns a reference to the `T` pointed to by `p`. Returns `None` if
    /// `p` is invalid.
    #[must_use]
    pub fn get(&self, p: P) -> Option<&T> {
        match self.m_get(p.inx()) {
            Some(Allocated(gen, t)) => {
                if *gen == p.gen() {
                    Some(t)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Returns a mutable reference to the `T` pointed to by `p`. Returns
    /// `None` if `p` is invalid.
    #[must_use]
    pub fn get_mut(&mut self, p: P) -> Option<&mut T> {
        match self.m_get_mut(p.inx()) {
            Some(Allocated(gen, t)) => {
                if *gen == p.gen() {
                    Some(t)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Like `get`, except generation counters are ignored and the existing
    /// generation is returned.
    #[must_use]
    pub fn get_ignore_gen(&self, inx: P::Inx) -> Option<(P::Gen, &T)> {
        match self.m_get(inx) {
            Some(Allocated(gen, t)) => Some((*gen, t)),
            _ => None,
        }
    }

    /// Like `get`, except generation counters are ignored and the result is
    /// unwrapped internally
    #[track_caller]
    pub fn get_inx_unwrap(&self, inx: P::Inx) -> &T {
        match self.m_get(inx) {
            Some(Allocated(_, t)) => t,
            _ => panic!("get_inx_unwrap on unallocated entry"),
        }
    }

    /// Like `get_mut`, except generation counters are ignored and the result
    /// is unwrapped internally
    #[track_caller]
    pub fn get_inx_mut_unwrap(&mut self, inx: P::Inx) -> &mut T {
        match self.m_get_mut(inx) {
            Some(Allocated(_, t)) => t,
            _ => panic!("get_inx_mut_unwrap on unallocated entry"),
        }
    }

    /// `remove` but with optional generation counter increment and no
    /// generation check on the incoming index
    #[must_use]
    fn remove_internal(&mut self, inx: P::Inx, gen: Option<P::Gen>, inc_gen: bool) -> Option<T> {
        let freelist_ptr = if let Some(free) = self.freelist_root {
            // points to previous root
            free
        } else {
            // points to itself
            inx
        };
        let allocation = self.m_get_mut(inx)?;
        let old = mem::replace(allocation, Free(freelist_ptr));
        match old {
            Free(old_free) => {
                // undo
                *allocation = Free(old_free);
                None
            }
            Allocated(old_gen, old_t) => {
                if let Some(gen) = gen {
                    if gen != old_gen {
                        // undo
                        *allocation = Allocated(old_gen, old_t);
                        return None
                    }
                }
                // in both cases the new root is the entry we just removed
                self.freelist_root = Some(inx);
                self.len -= 1;
                if inc_gen {
                    self.inc_gen();
                }
                Some(old_t)
            }
        }
    }

    /// Removes the `T` pointed to by `p`, returns the `T`, and invalidates
    /// old `Ptr`s to the `T`. Does no invalidation and returns `None` if `p`
    /// is invalid.
    #[must_use]
    pub fn remove(&mut self, p: P) -> Option<T> {
        self.remove_internal(p.inx(), Some(p.gen()), true)
    }

    /// Removes by raw index, ignoring generations. Used for bulk teardown
    /// where only interior links are known; the generation counter is still
    /// incremented so stale `Ptr`s are invalidated.
    #[must_use]
    pub fn remove_inx(&mut self, inx: P::Inx) -> Option<T> {
        self.remove_internal(inx, None, true)
    }

    /// Drops all `T` from the arena and invalidates all pointers previously
    /// created from it. This has no effect on allocated capacity.
    pub fn clear(&mut self) {
        // drop all `T` and recreate the freelist
        for i in 1..self.m.len() {
            *self.m.get_mut(i.wrapping_sub(1)).unwrap() = Free(P::Inx::new(i));
        }
        if !self.m.is_empty() {
            // the last freelist node points to itself
            let last = self.m.len().wrapping_sub(1);
            *self.m.get_mut(last).unwrap() = Free(P::Inx::new(last));
            self.freelist_root = Some(P::Inx::new(0));
        } else {
            self.freelist_root = None;
        }
        self.inc_gen();
        self.len = 0;
    }

    /// Used by tests
    #[doc(hidden)]
    pub fn _check_invariants(this: &Self) -> Result<(), &'static str> {
        if this.gen() < PtrGen::two() {
            return Err("bad generation")
        }
        let mut n_allocated = 0;
        for entry in &this.m {
            n_allocated += matches!(entry, Allocated(..)) as usize;
        }
        let n_free = this.m.len() - n_allocated;
        if this.len() != n_allocated {
            return Err("len != n_allocated")
        }
        // checking freelist integrity
        let mut freelist_len = 0;
        if let Some(root) = this.freelist_root {
            let mut tmp_inx = root;
            for i in 0.. {
                let entry = match this.m.get(P::Inx::get(tmp_inx)) {
                    Some(entry) => entry,
                    None => return Err("freelist node out of bounds"),
                };
                if let Free(inx) = entry {
                    freelist_len += 1;
                    if *inx == tmp_inx {
                        // last one
                        break
                    }
                    tmp_inx = *inx;
                } else {
                    return Err("bad freelist node")
                }
                if i > this.m.len() {
                    return Err("endless loop")
                }
            }
        }
        if freelist_len != n_free {
            return Err("freelist discontinuous")
        }
        Ok(())
    }
}

impl<P: Ptr, T> Default for Arena<P, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Implemented if `T: Clone`.
impl<P: Ptr, T: Clone> Clone for Arena<P, T> {
    /// When an `Arena<P, T>` is cloned, the `P`s to an original `T` will be
    /// valid for the corresponding `T` in the cloned arena. Invalidations
    /// continue independently afterwards.
    fn clone(&self) -> Self {
        Self {
            m: self.m.clone(),
            len: self.len,
            freelist_root: self.freelist_root,
            gen: self.gen,
        }
    }
}
