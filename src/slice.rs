//! Slice specifiers: what [`submdspan()`] does to each dimension.
//!
//! There is one slice specifier per dimension of the source view:
//!
//! - A `usize` or a [`Const`] collapses its dimension to a single index. The
//!   dimension does not appear in the result.
//! - [`FULL`] or `..` keeps the whole dimension.
//! - A pair `(begin, end)` or a [`Range`] keeps the half-open range
//!   `begin..end`.
//! - A [`StridedSlice`] keeps every `stride`-th index of `extent` indices
//!   starting at `offset`.
//!
//! You can define your own slice specifiers by implementing [`Slice`] and
//! [`SliceSpecifier`].
//!
//! [`submdspan()`]: super::submdspan()
//! [`Range`]: std::ops::Range

use std::fmt::{Debug};
use std::ops::{Range, RangeFull};

use super::{Dim, Dyn, Const, IndexLike, Runtime, RangeDim, StrideDim, ceil_div};
use super::{Extents, Error, Contribution, Unflatten, State};

/// The types that classify slice specifiers for the purpose of choosing the
/// [`Layout`] of a sub-view. See [`State`].
///
/// [`Layout`]: super::Layout
pub mod kind {
    /// Collapses the dimension.
    #[derive(Debug)]
    pub enum Index {}

    /// Keeps the whole dimension.
    #[derive(Debug)]
    pub enum Full {}

    /// Keeps a contiguous part of the dimension.
    #[derive(Debug)]
    pub enum Range {}

    /// Keeps a part of the dimension that need not be contiguous.
    #[derive(Debug)]
    pub enum Strided {}
}

/// Implemented by the types in [`kind`].
///
/// Advances a [`State`] past one slice specifier.
pub trait SliceKind: 'static {
    type Next<St: State>: State;
}

impl SliceKind for kind::Index {
    type Next<St: State> = St::Index;
}

impl SliceKind for kind::Full {
    type Next<St: State> = St::Full;
}

impl SliceKind for kind::Range {
    type Next<St: State> = St::Range;
}

impl SliceKind for kind::Strided {
    type Next<St: State> = St::Strided;
}

// ----------------------------------------------------------------------------

/// The run-time content of a slice specifier.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Canonical {
    /// Collapse the dimension at `index`.
    Index(usize),

    /// Keep every `stride`-th index in `first..end`.
    Keep { first: usize, end: usize, stride: usize },
}

impl Canonical {
    /// The index that the first element of the sub-view comes from.
    pub fn first(self) -> usize {
        match self {
            Canonical::Index(index) => index,
            Canonical::Keep {first, ..} => first,
        }
    }

    /// The extent contributed to the sub-view, or `None` if the dimension is
    /// collapsed.
    pub fn extent(self) -> Option<usize> {
        match self {
            Canonical::Index(_) => None,
            Canonical::Keep {first, end, stride} => Some(ceil_div(end.wrapping_sub(first), stride)),
        }
    }

    /// Checks `self` against dimension `dim`, of size `extent`.
    pub fn check(self, dim: usize, extent: usize) -> Result<(), Error> {
        match self {
            Canonical::Index(index) => {
                if index >= extent { return Err(Error::IndexOutOfBounds {dim, index, extent}); }
            },
            Canonical::Keep {first, end, stride} => {
                if first > end || end > extent {
                    return Err(Error::RangeOutOfBounds {dim, first, end, extent});
                }
                if stride == 0 && first < end { return Err(Error::ZeroStride {dim}); }
            },
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------

/// Implemented by slice specifiers, independently of the [`Dim`] they slice.
pub trait Slice: Debug {
    /// How `Self` affects the [`Layout`] of the sub-view.
    ///
    /// [`Layout`]: super::Layout
    type Kind: SliceKind;

    /// `extent` is the size of the sliced dimension.
    fn canonical(&self, extent: usize) -> Canonical;
}

/// Implemented by slice specifiers that can slice a dimension of type `D`.
pub trait SliceSpecifier<D: Dim>: Slice {
    /// `()` if `Self` collapses the dimension, otherwise `(R,)` where `R` is
    /// the [`Dim`] of the resulting dimension.
    type Out: Contribution;

    fn sub_dim(&self, dim: D) -> Self::Out;
}

impl Slice for usize {
    type Kind = kind::Index;
    fn canonical(&self, _: usize) -> Canonical { Canonical::Index(*self) }
}

impl<D: Dim> SliceSpecifier<D> for usize {
    type Out = ();
    fn sub_dim(&self, _: D) {}
}

impl<const N: usize> Slice for Const<N> {
    type Kind = kind::Index;
    fn canonical(&self, _: usize) -> Canonical { Canonical::Index(N) }
}

impl<D: Dim, const N: usize> SliceSpecifier<D> for Const<N> {
    type Out = ();
    fn sub_dim(&self, _: D) {}
}

// ----------------------------------------------------------------------------

/// The slice specifier that keeps a whole dimension. `..` does the same.
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
pub struct FullExtent;

/// The value of [`FullExtent`].
pub const FULL: FullExtent = FullExtent;

impl Slice for FullExtent {
    type Kind = kind::Full;
    fn canonical(&self, extent: usize) -> Canonical { Canonical::Keep {first: 0, end: extent, stride: 1} }
}

impl<D: Dim> SliceSpecifier<D> for FullExtent {
    type Out = (D,);
    fn sub_dim(&self, dim: D) -> (D,) { (dim,) }
}

impl Slice for RangeFull {
    type Kind = kind::Full;
    fn canonical(&self, extent: usize) -> Canonical { FullExtent.canonical(extent) }
}

impl<D: Dim> SliceSpecifier<D> for RangeFull {
    type Out = (D,);
    fn sub_dim(&self, dim: D) -> (D,) { (dim,) }
}

// ----------------------------------------------------------------------------

impl<B: RangeDim<E>, E: IndexLike> Slice for (B, E) {
    type Kind = kind::Range;
    fn canonical(&self, _: usize) -> Canonical {
        Canonical::Keep {first: self.0.value(), end: self.1.value(), stride: 1}
    }
}

impl<D: Dim, B: RangeDim<E>, E: IndexLike> SliceSpecifier<D> for (B, E) {
    type Out = (B::Dim,);
    fn sub_dim(&self, _: D) -> Self::Out { (self.0.dim(self.1),) }
}

impl<I: Runtime> Slice for Range<I> {
    type Kind = kind::Range;
    fn canonical(&self, _: usize) -> Canonical {
        Canonical::Keep {first: self.start.value(), end: self.end.value(), stride: 1}
    }
}

impl<D: Dim, I: Runtime> SliceSpecifier<D> for Range<I> {
    type Out = (Dyn,);
    fn sub_dim(&self, _: D) -> (Dyn,) { (Dyn(self.end.value().wrapping_sub(self.start.value())),) }
}

// ----------------------------------------------------------------------------

/// Keeps every `stride`-th index of the `extent` indices starting at `offset`.
///
/// The resulting dimension has `extent / stride` indices, rounded up. If both
/// `extent` and `stride` are [`Const`]s, that size is static.
///
/// ```
/// use submdspan::{Extents, Mdspan, Dyn, StridedSlice, submdspan};
/// let data: Vec<usize> = (0..200).collect();
/// let m = Mdspan::from_extents(&data, <(Dyn, Dyn)>::from_sizes([10, 20]).unwrap()).unwrap();
/// let sub = submdspan!(m; StridedSlice {offset: 1, extent: 3, stride: 2}, 5);
/// assert_eq!(sub.extent(0), 2);
/// assert_eq!(sub[[1]], 65);
/// ```
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
pub struct StridedSlice<O, X, S> {
    pub offset: O,
    pub extent: X,
    pub stride: S,
}

impl<O: IndexLike, X: StrideDim<S>, S: IndexLike> Slice for StridedSlice<O, X, S> {
    type Kind = kind::Strided;
    fn canonical(&self, _: usize) -> Canonical {
        let first = self.offset.value();
        Canonical::Keep {first, end: first.wrapping_add(self.extent.value()), stride: self.stride.value()}
    }
}

impl<D: Dim, O: IndexLike, X: StrideDim<S>, S: IndexLike> SliceSpecifier<D> for StridedSlice<O, X, S> {
    type Out = (X::Dim,);
    fn sub_dim(&self, _: D) -> Self::Out { (self.extent.dim(self.stride),) }
}

// ----------------------------------------------------------------------------

/// A tuple of one slice specifier per dimension of `E`.
///
/// Implemented for tuples of the same length as `E`; any other length is a
/// compile-time error.
pub trait SliceTuple<E: Extents>: Debug {
    /// The shape of the sub-view.
    type SubExtents: Extents;

    /// The [`State`] reached by walking the kinds of the slice specifiers,
    /// from left to right, starting at `St`.
    type Walk<St: State>: State;

    fn sub_extents(&self, extents: &E) -> Self::SubExtents;

    /// Calls `f` with the [`Canonical`] form of each slice specifier in turn.
    fn each_canonical(&self, extents: &E, f: impl FnMut(Canonical));

    /// Checks every slice specifier against its dimension.
    fn check(&self, extents: &E) -> Result<(), Error> {
        let mut result = Ok(());
        let mut dim = 0;
        self.each_canonical(extents, |c| {
            if result.is_ok() { result = c.check(dim, extents.extent(dim)); }
            dim += 1;
        });
        result
    }
}

/// The [`Flat`] list of the contributions `$out` of a tuple of slice
/// specifiers, appended to `$acc`.
///
/// [`Flat`]: super::Flat
macro_rules! gathered {
    ($acc:ty;) => { $acc };
    ($acc:ty; $out:ty $(, $rest:ty)*) => {
        gathered!(<$out as Contribution>::Push<$acc>; $($rest),*)
    };
}

/// The [`State`] reached from `$st` by the slice kinds `$kind`.
macro_rules! walked {
    ($st:ty;) => { $st };
    ($st:ty; $kind:ty $(, $rest:ty)*) => {
        walked!(<$kind as SliceKind>::Next<$st>; $($rest),*)
    };
}

macro_rules! impl_slice_tuple {
    ($($i:tt $d:ident $s:ident),*) => {
        impl<$($d: Dim, $s: SliceSpecifier<$d>),*> SliceTuple<($($d,)*)> for ($($s,)*) where
            gathered!((); $(<$s as SliceSpecifier<$d>>::Out),*): Unflatten,
        {
            type SubExtents = <gathered!((); $(<$s as SliceSpecifier<$d>>::Out),*) as Unflatten>::Tuple;

            type Walk<St: State> = walked!(St; $(<$s as Slice>::Kind),*);

            #[allow(unused_variables)]
            fn sub_extents(&self, extents: &($($d,)*)) -> Self::SubExtents {
                let acc = ();
                $( let acc = self.$i.sub_dim(extents.$i).push(acc); )*
                acc.unflatten()
            }

            #[allow(unused_variables, unused_mut)]
            fn each_canonical(&self, extents: &($($d,)*), mut f: impl FnMut(Canonical)) {
                $( f(self.$i.canonical(extents.$i.size())); )*
            }
        }
    };
}

impl_slice_tuple!();
impl_slice_tuple!(0 A SA);
impl_slice_tuple!(0 A SA, 1 B SB);
impl_slice_tuple!(0 A SA, 1 B SB, 2 C SC);
impl_slice_tuple!(0 A SA, 1 B SB, 2 C SC, 3 D SD);
impl_slice_tuple!(0 A SA, 1 B SB, 2 C SC, 3 D SD, 4 E SE);
impl_slice_tuple!(0 A SA, 1 B SB, 2 C SC, 3 D SD, 4 E SE, 5 F SF);

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::{Static, Diff, CeilDiv};

    #[test]
    fn canonical() {
        assert_eq!(Slice::canonical(&3, 10), Canonical::Index(3));
        assert_eq!(Slice::canonical(&Const::<4>, 10), Canonical::Index(4));
        assert_eq!(FULL.canonical(10), Canonical::Keep {first: 0, end: 10, stride: 1});
        assert_eq!((..).canonical(7), Canonical::Keep {first: 0, end: 7, stride: 1});
        assert_eq!((1, 3).canonical(10), Canonical::Keep {first: 1, end: 3, stride: 1});
        assert_eq!((1usize..4).canonical(10), Canonical::Keep {first: 1, end: 4, stride: 1});
        let s = StridedSlice {offset: 1, extent: 3, stride: 2};
        assert_eq!(s.canonical(10), Canonical::Keep {first: 1, end: 4, stride: 2});
        assert_eq!(s.canonical(10).extent(), Some(2));
    }

    #[test]
    fn check() {
        assert!(Canonical::Index(9).check(0, 10).is_ok());
        assert!(matches!(
            Canonical::Index(10).check(2, 10),
            Err(Error::IndexOutOfBounds {dim: 2, index: 10, extent: 10}),
        ));
        assert!(Canonical::Keep {first: 10, end: 10, stride: 1}.check(0, 10).is_ok());
        assert!(matches!(
            Canonical::Keep {first: 3, end: 2, stride: 1}.check(0, 10),
            Err(Error::RangeOutOfBounds {..}),
        ));
        assert!(matches!(
            Canonical::Keep {first: 3, end: 11, stride: 1}.check(0, 10),
            Err(Error::RangeOutOfBounds {..}),
        ));
        assert!(Canonical::Keep {first: 1, end: 1, stride: 0}.check(0, 10).is_ok());
        assert!(matches!(
            Canonical::Keep {first: 1, end: 2, stride: 0}.check(1, 10),
            Err(Error::ZeroStride {dim: 1}),
        ));
    }

    #[test]
    fn sub_extents() {
        let e = (Dyn(10), Static::<20>, Dyn(30));
        let s = (1, .., (2usize, 5usize));
        let sub: (Static<20>, Dyn) = s.sub_extents(&e);
        assert_eq!(sub, (Static, Dyn(3)));
    }

    #[test]
    fn static_sub_extents() {
        let e = (Dyn(10), Dyn(20));
        let s = ((Const::<2>, Const::<5>), StridedSlice {offset: 1, extent: Const::<7>, stride: Const::<3>});
        let sub: (Diff<2, 5>, CeilDiv<7, 3>) = s.sub_extents(&e);
        assert_eq!(sub.to_indices(), [3, 3]);
        let e = (Dyn(10),);
        let s = (StridedSlice {offset: 1, extent: Const::<0>, stride: Const::<0>},);
        let sub: (CeilDiv<0, 0>,) = s.sub_extents(&e);
        assert_eq!(sub.to_indices(), [0]);
    }

    #[test]
    fn check_tuple() {
        let e = (Dyn(10), Dyn(20));
        assert!((9, ..).check(&e).is_ok());
        assert!(matches!((9, (0, 21)).check(&e), Err(Error::RangeOutOfBounds {dim: 1, ..})));
        assert!(matches!((10, 25).check(&e), Err(Error::IndexOutOfBounds {dim: 0, ..})));
    }
}
