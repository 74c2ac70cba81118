//! A self-adjusting ordered container engine built on an arena of splay tree
//! nodes. One [SplayForest] holds any number of trees in a single allocation
//! pool, addressed through move-only [SplayTree] handles, and every node
//! carries its subtree size for `O(log n)` rank and select queries.
//!
//! The ordering policy generic chooses the container flavor without
//! duplicating the engine. [Natural] (or any other [KeyOrder]
//! implementation) gives a keyed container with sorted insertion, lookup,
//! and bound queries; the default [Positional] policy gives a sequence
//! container with append, indexing by position, and unconditional
//! concatenation. Both flavors share splaying, removal, splitting, and
//! merging.
//!
//! `P` is a struct implementing [Ptr], made with the [ptr_struct] macro,
//! which has associated types for what the node indexes and generation
//! counters should be. When using multiple forests, use different `P` so the
//! type system guards against mistakenly using pointers from one forest in
//! another. Generation counters catch use of pointers to removed nodes.
//!
//! ```
//! use splay_arena::{ptr_struct, SplayForest};
//!
//! ptr_struct!(P0);
//!
//! // the default policy orders by position only
//! let mut f: SplayForest<P0, &'static str> = SplayForest::new();
//! let mut t = f.new_tree();
//! f.push(&mut t, "a");
//! f.push(&mut t, "b");
//! let c = f.push(&mut t, "c");
//!
//! let b = f.select(&mut t, 1).unwrap();
//! assert_eq!(f.get(b), Some(&"b"));
//! assert_eq!(f.rank(c), Some(2));
//!
//! // split off everything after position 0 into its own tree
//! let first = f.select(&mut t, 0).unwrap();
//! let mut rest = f.split_left(&mut t, first).unwrap();
//! assert_eq!(f.size(&t), 1);
//! assert_eq!(f.size(&rest), 2);
//!
//! // and put it back
//! f.append(&mut t, rest);
//! assert_eq!(f.size(&t), 3);
//! ```
#![no_std]
// node links are plain indexes into the arena, no unsafe needed anywhere
#![deny(unsafe_code)]

mod arena;
mod entry;
mod forest;
mod ord;
mod ptr;
pub use forest::{SplayForest, SplayTree, TreeDump};
pub use ord::{KeyOrder, Natural, Positional};
pub use ptr::{Ptr, PtrGen, PtrInx};

extern crate alloc;
