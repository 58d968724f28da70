//! The size of one dimension, known either at compile time or at run time.
//!
//! [`Dyn`] is a run-time size. [`Static`] is a compile-time size. [`Diff`]
//! and [`CeilDiv`] are compile-time sizes computed by [`submdspan()`] when
//! a slice specifier is built from [`Const`]s.
//!
//! [`submdspan()`]: super::submdspan()

use std::fmt::{Debug};

use super::{NonTuple};

/// The extent of one dimension.
pub trait Dim: 'static + Debug + Copy + PartialEq + NonTuple {
    /// `Some(size)` if the size is a compile-time constant.
    const STATIC: Option<usize>;

    /// The number of indices along this dimension.
    fn size(self) -> usize;

    /// Returns `None` if `size` contradicts [`Self::STATIC`].
    fn from_size(size: usize) -> Option<Self>;
}

// ----------------------------------------------------------------------------

/// A [`Dim`] whose size is only known at run time.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Dyn(pub usize);

impl NonTuple for Dyn {}

impl Dim for Dyn {
    const STATIC: Option<usize> = None;
    #[inline(always)]
    fn size(self) -> usize { self.0 }
    fn from_size(size: usize) -> Option<Self> { Some(Dyn(size)) }
}

// ----------------------------------------------------------------------------

macro_rules! impl_static_dim {
    ($d:ident<$(const $p:ident: usize),*> = $size:expr) => {
        impl<$(const $p: usize),*> NonTuple for $d<$($p),*> {}

        impl<$(const $p: usize),*> Dim for $d<$($p),*> {
            const STATIC: Option<usize> = Some($size);

            #[inline(always)] // Want the caller to see this as constant.
            fn size(self) -> usize { $size }

            fn from_size(size: usize) -> Option<Self> {
                if size == $size { Some($d) } else { None }
            }
        }
    };
}

/// A [`Dim`] of size `N`.
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Static<const N: usize>;

impl_static_dim!(Static<const N: usize> = N);

/// The compile-time size `END - BEGIN` of the range `[BEGIN, END)`.
///
/// Using it with `END < BEGIN` is a compile-time error.
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Diff<const BEGIN: usize, const END: usize>;

impl_static_dim!(Diff<const BEGIN: usize, const END: usize> = END - BEGIN);

/// The compile-time number of elements of a strided range that covers
/// `EXTENT` elements with step `STRIDE`.
///
/// An `EXTENT` of `0` gives `0` whatever the `STRIDE`.
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
pub struct CeilDiv<const EXTENT: usize, const STRIDE: usize>;

impl_static_dim!(CeilDiv<const EXTENT: usize, const STRIDE: usize> = ceil_div(EXTENT, STRIDE));

/// `extent / stride` rounded up, where an `extent` of `0` gives `0`.
pub const fn ceil_div(extent: usize, stride: usize) -> usize {
    if extent == 0 { 0 } else { 1 + (extent - 1) / stride }
}

// ----------------------------------------------------------------------------

/// An integral constant, usable wherever a slice specifier expects an index.
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Const<const N: usize>;

/// Implemented by the types that can carry an index or a length inside a
/// slice specifier: `usize` and [`Const`].
///
/// Other integer types are not accepted, so that an unsuffixed literal is a
/// `usize`. Convert them first, for example with `usize::try_from()`, which
/// rejects negative values. A negative literal does not compile:
///
/// ```compile_fail
/// use submdspan::{Extents, Mdspan, Dyn, StridedSlice, FULL};
/// let data = [0; 200];
/// let m = Mdspan::from_extents(&data, <(Dyn, Dyn)>::from_sizes([10, 20]).unwrap()).unwrap();
/// let _ = m.try_submdspan((StridedSlice {offset: 1, extent: 3, stride: -1}, FULL));
/// ```
pub trait IndexLike: Debug + Copy {
    fn value(self) -> usize;
}

/// [`IndexLike`] types whose value is only known at run time.
pub trait Runtime: IndexLike {}

impl<const N: usize> IndexLike for Const<N> {
    #[inline(always)]
    fn value(self) -> usize { N }
}

impl IndexLike for usize {
    #[inline(always)]
    fn value(self) -> usize { self }
}

impl Runtime for usize {}

// ----------------------------------------------------------------------------

/// Chooses the [`Dim`] of a half-open range `[Self, E)`.
///
/// The result is static only if both ends are [`Const`]s.
pub trait RangeDim<E: IndexLike>: IndexLike {
    type Dim: Dim;
    fn dim(self, end: E) -> Self::Dim;
}

impl<B: Runtime, E: Runtime> RangeDim<E> for B {
    type Dim = Dyn;
    fn dim(self, end: E) -> Dyn { Dyn(end.value().wrapping_sub(self.value())) }
}

impl<B: Runtime, const END: usize> RangeDim<Const<END>> for B {
    type Dim = Dyn;
    fn dim(self, _: Const<END>) -> Dyn { Dyn(END.wrapping_sub(self.value())) }
}

impl<const BEGIN: usize, E: Runtime> RangeDim<E> for Const<BEGIN> {
    type Dim = Dyn;
    fn dim(self, end: E) -> Dyn { Dyn(end.value().wrapping_sub(BEGIN)) }
}

impl<const BEGIN: usize, const END: usize> RangeDim<Const<END>> for Const<BEGIN> {
    type Dim = Diff<BEGIN, END>;
    fn dim(self, _: Const<END>) -> Self::Dim { Diff }
}

/// Chooses the [`Dim`] of a strided range covering `Self` elements with step
/// `S`.
///
/// The result is static only if both are [`Const`]s.
pub trait StrideDim<S: IndexLike>: IndexLike {
    type Dim: Dim;
    fn dim(self, stride: S) -> Self::Dim;
}

impl<X: Runtime, S: Runtime> StrideDim<S> for X {
    type Dim = Dyn;
    fn dim(self, stride: S) -> Dyn { Dyn(ceil_div(self.value(), stride.value())) }
}

impl<X: Runtime, const STRIDE: usize> StrideDim<Const<STRIDE>> for X {
    type Dim = Dyn;
    fn dim(self, _: Const<STRIDE>) -> Dyn { Dyn(ceil_div(self.value(), STRIDE)) }
}

impl<const EXTENT: usize, S: Runtime> StrideDim<S> for Const<EXTENT> {
    type Dim = Dyn;
    fn dim(self, stride: S) -> Dyn { Dyn(ceil_div(EXTENT, stride.value())) }
}

impl<const EXTENT: usize, const STRIDE: usize> StrideDim<Const<STRIDE>> for Const<EXTENT> {
    type Dim = CeilDiv<EXTENT, STRIDE>;
    fn dim(self, _: Const<STRIDE>) -> Self::Dim { CeilDiv }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_sizes() {
        assert_eq!(<Static<4>>::STATIC, Some(4));
        assert_eq!(<Diff<1, 3>>::STATIC, Some(2));
        assert_eq!(<CeilDiv<3, 2>>::STATIC, Some(2));
        assert_eq!(<CeilDiv<0, 0>>::STATIC, Some(0));
        assert_eq!(Dyn::STATIC, None);
    }

    #[test]
    fn from_size() {
        assert_eq!(Static::<4>::from_size(4), Some(Static));
        assert_eq!(Static::<4>::from_size(5), None);
        assert_eq!(Dyn::from_size(5), Some(Dyn(5)));
    }

    #[test]
    fn ceil() {
        assert_eq!(ceil_div(0, 0), 0);
        assert_eq!(ceil_div(3, 2), 2);
        assert_eq!(ceil_div(4, 2), 2);
        assert_eq!(ceil_div(1, 5), 1);
    }

    #[test]
    fn range_dims() {
        assert_eq!(RangeDim::dim(1usize, 3usize), Dyn(2));
        assert_eq!(RangeDim::dim(Const::<1>, 3), Dyn(2));
        assert_eq!(RangeDim::dim(Const::<1>, Const::<3>).size(), 2);
    }

    #[test]
    fn stride_dims() {
        assert_eq!(StrideDim::dim(3, 2), Dyn(2));
        assert_eq!(StrideDim::dim(Const::<0>, Const::<0>).size(), 0);
    }
}
