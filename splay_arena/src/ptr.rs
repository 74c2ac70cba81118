use core::{
    fmt::Debug,
    hash::Hash,
    num::{NonZeroU128, NonZeroU32, NonZeroU64},
};

/// Pointer generation information type
///
/// Users should never have to implement this, it is implemented only for the
/// larger `NonZeroU...` types and for `()`.
pub trait PtrGen:
    Debug + Hash + Clone + Copy + PartialEq + Eq + PartialOrd + Ord + Send + Sync + Unpin
{
    /// Returns the first element after 0, which is special because arenas with
    /// generation counters always start at generation 2, which means invalid
    /// pointers can use generation 1 and be guaranteed to always be invalid.
    fn one() -> Self;
    /// The value of 2
    fn two() -> Self;
    /// Returns `this` incremented by one, panicking on overflow.
    fn increment(this: Self) -> Self;
}

// Aggressive inlining even on trivial functions because there may otherwise be
// problems if the inlining is happening across compilation units.

macro_rules! impl_gen {
    ($($x: ident)*) => {
        $(
            impl PtrGen for $x {
                #[inline]
                fn one() -> Self {
                    Self::new(1).unwrap()
                }

                #[inline]
                fn two() -> Self {
                    Self::new(2).unwrap()
                }

                #[inline]
                fn increment(this: Self) -> Self {
                    match Self::new(this.get().wrapping_add(1)) {
                        Some(x) => x,
                        None => panic!("generation overflow"),
                    }
                }
            }
        )*
    };
}

impl_gen!(NonZeroU32 NonZeroU64 NonZeroU128);

impl PtrGen for () {
    #[inline]
    fn one() -> Self {}

    #[inline]
    fn two() -> Self {}

    #[inline]
    fn increment(_this: Self) -> Self {}
}

/// This is a trait for the index type used by the arena.
///
/// Users should never have to implement this, it is implemented only for
/// `u32` and `usize`.
pub trait PtrInx:
    Debug + Hash + Clone + Copy + PartialEq + Eq + PartialOrd + Ord + Send + Sync + Unpin
{
    /// Note: this should be a truncating cast, higher level functions should
    /// handle fallible cases
    fn new(inx: usize) -> Self;
    /// Note: this should be a zero extending cast
    fn get(this: Self) -> usize;
    /// The maximum representable value, truncated down to `usize::MAX` if
    /// necessary
    fn max() -> usize;
}

macro_rules! impl_ptr_inx {
    ($($x:ident)*) => {
        $(
            impl PtrInx for $x {
                #[inline]
                fn new(inx: usize) -> Self {
                    inx as $x
                }

                #[inline]
                fn get(this: Self) -> usize {
                    this as usize
                }

                #[inline]
                fn max() -> usize {
                    $x::MAX as usize
                }
            }
        )*
    };
}

impl_ptr_inx!(u32 usize);

/// A trait containing index and generation information for the node handles
/// of a [SplayForest](crate::SplayForest).
///
/// Users should never have to manually implement this, use the
/// [ptr_struct](crate::ptr_struct) macro for automatically implementing
/// structs with this trait.
///
/// This trait has many bounds on it, so that users do not regularly encounter
/// friction with using `Ptr`s in data structures. The `Inx` and `Gen` types
/// should only be the types implemented by this crate. The `PartialEq`/`Eq`
/// implementation differentiates between pointers at the same index but
/// different generation. `Default` should use the `invalid` function.
pub trait Ptr:
    Debug + Hash + Clone + Copy + PartialEq + Eq + PartialOrd + Ord + Send + Sync + Unpin
{
    /// The recommended general purpose type for this is `usize`
    type Inx: PtrInx;

    /// The recommended general purpose type for this is `NonZeroU64` if
    /// generation tracking is wanted, otherwise `()`.
    type Gen: PtrGen;

    /// Returns a new `Ptr` with a generation value `PtrGen::one()`. Because
    /// forests start with generation 2, this is guaranteed invalid when
    /// generation counters are used. The raw index is also set to
    /// `Inx::max()` which should also cause failures in the generationless
    /// case, but be aware this can be reached practically with small `Inx`
    /// types.
    fn invalid() -> Self;

    /// Returns the raw `Inx`. This can be useful when getting a unique id for
    /// every entry. Do not rely on this if the `Ptr` is invalidated.
    fn inx(self) -> Self::Inx;

    /// Returns the generation of this `Ptr`.
    fn gen(self) -> Self::Gen;

    /// Do not use this unless you are manually managing internal details
    fn _from_raw(inx: Self::Inx, gen: Self::Gen) -> Self;
}

/// Convenience macro for quickly making new structs that implement
/// [Ptr](crate::Ptr). By default, `usize` is used for the index type and
/// `NonZeroU64` is used for the generation type. The struct name can be
/// followed by square brackets containing `u32` or `usize` for the index
/// type. After the optional square brackets, optional parenthesis can be
/// added which contain a `NonZeroU32` through `NonZeroU128` generation type.
/// The parenthesis can also be empty, in which case no generation counting is
/// used. This all can be followed by a comma separated list of attributes.
///
/// ```
/// use core::num::NonZeroU32;
///
/// use splay_arena::{ptr_struct, SplayForest};
///
/// // create struct `P0` implementing a default `Ptr` and having a doc comment
/// ptr_struct!(P0 doc="An example struct `P0` that implements `Ptr`");
/// let _: SplayForest<P0, u64>;
///
/// // `P1` will have a smaller `u32` index type
/// ptr_struct!(P1[u32]);
///
/// // a smaller `NonZeroU32` generation type
/// ptr_struct!(P2(NonZeroU32));
///
/// // both the index and generation type are custom
/// ptr_struct!(P3[u32](NonZeroU32));
///
/// // no generation counter
/// ptr_struct!(P4());
///
/// // a single macro can have multiple structs of the same matching kind with
/// // semicolon separators
/// ptr_struct!(Q0(); Q1(); R0());
/// ```
#[macro_export]
macro_rules! ptr_struct {
    ($($struct_name:ident[$inx_type:path]($gen_type:path) $($attributes:meta),*);*) => {
        $(
            $(#[$attributes])*
            #[derive(
                core::hash::Hash,
                core::clone::Clone,
                core::marker::Copy,
                core::cmp::PartialEq,
                core::cmp::Eq,
                core::cmp::PartialOrd,
                core::cmp::Ord
            )]
            pub struct $struct_name {
                // note: in this order `PartialOrd` will order primarily off of
                // `_internal_inx`
                #[doc(hidden)]
                _internal_inx: $inx_type,
                #[doc(hidden)]
                _internal_gen: $gen_type,
            }

            impl $crate::Ptr for $struct_name {
                type Inx = $inx_type;
                type Gen = $gen_type;

                #[inline]
                fn invalid() -> Self {
                    Self {
                        _internal_inx: $crate::PtrInx::new(
                            <Self::Inx as $crate::PtrInx>::max()
                        ),
                        _internal_gen: $crate::PtrGen::one()
                    }
                }

                #[inline]
                fn inx(self) -> Self::Inx {
                    self._internal_inx
                }

                #[inline]
                fn gen(self) -> Self::Gen {
                    self._internal_gen
                }

                #[inline]
                #[doc(hidden)]
                fn _from_raw(_internal_inx: Self::Inx, _internal_gen: Self::Gen) -> Self {
                    Self {
                        _internal_inx,
                        _internal_gen,
                    }
                }
            }

            impl core::default::Default for $struct_name {
                #[inline]
                fn default() -> Self {
                    $crate::Ptr::invalid()
                }
            }

            // Manually implemented so that it is inline and has no newlines,
            // which makes `Debug` output on containers look much nicer.
            impl core::fmt::Debug for $struct_name {
                fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                    f.write_fmt(format_args!(
                        "{}[{:?}]({:?})",
                        stringify!($struct_name),
                        $crate::Ptr::inx(*self),
                        $crate::Ptr::gen(*self),
                    ))
                }
            }

            impl core::fmt::Display for $struct_name {
                fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                    core::fmt::Debug::fmt(self, f)
                }
            }
        )*
    };
    ($($struct_name:ident[$inx_type:path]() $($attributes:meta),*);*) => {
        $(
            $(#[$attributes])*
            #[derive(
                core::hash::Hash,
                core::clone::Clone,
                core::marker::Copy,
                core::cmp::PartialEq,
                core::cmp::Eq,
                core::cmp::PartialOrd,
                core::cmp::Ord
            )]
            pub struct $struct_name {
                #[doc(hidden)]
                _internal_inx: $inx_type,
                #[doc(hidden)]
                _internal_gen: (),
            }

            impl $crate::Ptr for $struct_name {
                type Inx = $inx_type;
                type Gen = ();

                #[inline]
                fn invalid() -> Self {
                    Self {
                        _internal_inx: $crate::PtrInx::new(
                            <Self::Inx as $crate::PtrInx>::max()
                        ),
                        _internal_gen: $crate::PtrGen::one()
                    }
                }

                #[inline]
                fn inx(self) -> Self::Inx {
                    self._internal_inx
                }

                #[inline]
                fn gen(self) -> Self::Gen {
                    self._internal_gen
                }

                #[inline]
                #[doc(hidden)]
                fn _from_raw(_internal_inx: Self::Inx, _internal_gen: Self::Gen) -> Self {
                    Self {
                        _internal_inx,
                        _internal_gen,
                    }
                }
            }

            impl core::default::Default for $struct_name {
                #[inline]
                fn default() -> Self {
                    $crate::Ptr::invalid()
                }
            }

            impl core::fmt::Debug for $struct_name {
                fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                    f.write_fmt(format_args!(
                        "{}[{:?}]",
                        stringify!($struct_name),
                        $crate::Ptr::inx(*self),
                    ))
                }
            }

            impl core::fmt::Display for $struct_name {
                fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                    core::fmt::Debug::fmt(self, f)
                }
            }
        )*
    };
    ($($struct_name:ident[$inx_type:path] $($attributes:meta),*);*) => {
        $(
            $crate::ptr_struct!(
                $struct_name[$inx_type](core::num::NonZeroU64)
                $($attributes),*
            );
        )*
    };
    ($($struct_name:ident($gen_type:path) $($attributes:meta),*);*) => {
        $(
            $crate::ptr_struct!(
                $struct_name[usize]($gen_type)
                $($attributes),*
            );
        )*
    };
    ($($struct_name:ident() $($attributes:meta),*);*) => {
        $(
            $crate::ptr_struct!(
                $struct_name[usize]()
                $($attributes),*
            );
        )*
    };
    ($($struct_name:ident $($attributes:meta),*);*) => {
        $(
            $crate::ptr_struct!(
                $struct_name[usize](core::num::NonZeroU64)
                $($attributes),*
            );
        )*
    };
}
