//! The sub-view builder.
//!
//! [`submdspan()`] derives a view of part of another view. The two views
//! share storage; only the [`Mapping`] and the start of the storage differ.
//!
//! The [`Layout`] of the result is chosen at compile time by walking the
//! [`SliceKind`]s of the slice specifiers from left to right through a
//! [`State`] machine:
//!
//! - A [`LayoutRight`] view stays `LayoutRight` if the slice specifiers are
//!   some indices, then at most one full extent or range, then full extents.
//! - A [`LayoutLeft`] view stays `LayoutLeft` if the slice specifiers are
//!   some full extents, then at most one range or index, then indices.
//! - Otherwise, and always if there is a [`StridedSlice`], the result is a
//!   [`LayoutStride`] view.
//!
//! A custom [`Mapping`] takes part by implementing [`SubmdspanMapping`]. It
//! can reuse the machinery here by defining its own `State`s and calling
//! [`strided_sub_mapping()`].
//!
//! [`StridedSlice`]: super::StridedSlice

use super::{Extents, Error, Mdspan, SliceTuple, Canonical};
use super::{Mapping, FromStrides, Layout, LayoutRight, LayoutLeft, LayoutStride};
use super::{RightMapping, LeftMapping, StrideMapping};

/// A state of the layout-preservation machine.
///
/// Each associated state is the successor after a slice specifier of the
/// corresponding [`kind`](super::kind). `Self::Layout` is the [`Layout`] of
/// the sub-view if there are no more slice specifiers.
pub trait State: 'static {
    type Index: State;
    type Full: State;
    type Range: State;
    type Strided: State;
    type Layout: Layout;
}

/// A [`LayoutRight`] view before any full extent or range.
#[derive(Debug)]
pub enum RightLeading {}

/// A [`LayoutRight`] view after a full extent or range.
#[derive(Debug)]
pub enum RightTrailing {}

/// A [`LayoutLeft`] view before any index or range.
#[derive(Debug)]
pub enum LeftLeading {}

/// A [`LayoutLeft`] view after an index or range.
#[derive(Debug)]
pub enum LeftTrailing {}

/// The layout can no longer be preserved.
#[derive(Debug)]
pub enum Degraded {}

impl State for RightLeading {
    type Index = RightLeading;
    type Full = RightTrailing;
    type Range = RightTrailing;
    type Strided = Degraded;
    type Layout = LayoutRight;
}

impl State for RightTrailing {
    type Index = Degraded;
    type Full = RightTrailing;
    type Range = Degraded;
    type Strided = Degraded;
    type Layout = LayoutRight;
}

impl State for LeftLeading {
    type Index = LeftTrailing;
    type Full = LeftLeading;
    type Range = LeftTrailing;
    type Strided = Degraded;
    type Layout = LayoutLeft;
}

impl State for LeftTrailing {
    type Index = LeftTrailing;
    type Full = Degraded;
    type Range = Degraded;
    type Strided = Degraded;
    type Layout = LayoutLeft;
}

impl State for Degraded {
    type Index = Degraded;
    type Full = Degraded;
    type Range = Degraded;
    type Strided = Degraded;
    type Layout = LayoutStride;
}

/// The [`Layout`] chosen for slicing a `St` view with `S`.
pub type LayoutOf<S, E, St> = <<S as SliceTuple<E>>::Walk<St> as State>::Layout;

// ----------------------------------------------------------------------------

/// The result of [`SubmdspanMapping::submdspan_mapping()`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SubMapping<M> {
    /// The mapping of the sub-view.
    pub mapping: M,

    /// The offset in the source storage of the first element of the sub-view.
    pub offset: usize,
}

/// Implemented by [`Mapping`]s that can be sliced by `S`.
///
/// This is the hook by which custom layouts take part in [`submdspan()`].
pub trait SubmdspanMapping<S>: Mapping {
    /// The mapping of the sub-view.
    type Output: Mapping;

    fn submdspan_mapping(&self, slices: &S) -> SubMapping<Self::Output>;
}

impl<E: Extents, S: SliceTuple<E>> SubmdspanMapping<S> for RightMapping<E> {
    type Output = <LayoutOf<S, E, RightLeading> as Layout>::Mapping<S::SubExtents>;

    fn submdspan_mapping(&self, slices: &S) -> SubMapping<Self::Output> {
        strided_sub_mapping(self, slices)
    }
}

impl<E: Extents, S: SliceTuple<E>> SubmdspanMapping<S> for LeftMapping<E> {
    type Output = <LayoutOf<S, E, LeftLeading> as Layout>::Mapping<S::SubExtents>;

    fn submdspan_mapping(&self, slices: &S) -> SubMapping<Self::Output> {
        strided_sub_mapping(self, slices)
    }
}

impl<E: Extents, S: SliceTuple<E>> SubmdspanMapping<S> for StrideMapping<E> {
    type Output = StrideMapping<S::SubExtents>;

    fn submdspan_mapping(&self, slices: &S) -> SubMapping<Self::Output> {
        strided_sub_mapping(self, slices)
    }
}

/// Slices any strided `mapping`, producing an `N`.
///
/// The strides of the result are those of `mapping` multiplied by the
/// strides of the slice specifiers, except where a slice specifier's stride
/// is not less than the length of its range. That dimension has at most one
/// index and keeps the stride of `mapping`. The offset is `mapping` applied
/// to the first index of each slice specifier, except that if any first
/// index is past the end of its dimension the offset is
/// `mapping.required_span_size()`.
pub fn strided_sub_mapping<M, S, N>(mapping: &M, slices: &S) -> SubMapping<N> where
    M: Mapping,
    S: SliceTuple<M::Extents>,
    N: FromStrides<Extents=S::SubExtents>,
{
    let extents = mapping.extents();
    let mut firsts = <M::Extents as Extents>::Indices::default();
    let mut strides = <S::SubExtents as Extents>::Indices::default();
    let mut past_end = false;
    let mut r = 0;
    let mut k = 0;
    slices.each_canonical(extents, |c| {
        let first = c.first();
        firsts.as_mut()[r] = first;
        past_end |= first >= extents.extent(r);
        if let Canonical::Keep {first, end, stride} = c {
            let len = end.wrapping_sub(first);
            strides.as_mut()[k] = if stride < len { mapping.stride(r) * stride } else { mapping.stride(r) };
            k += 1;
        }
        r += 1;
    });
    let offset = if past_end { mapping.required_span_size() } else { mapping.index(firsts) };
    SubMapping {mapping: N::from_strides(slices.sub_extents(extents), strides), offset}
}

// ----------------------------------------------------------------------------

pub(crate) fn debug_assert_slices<E: Extents, S: SliceTuple<E>>(extents: &E, slices: &S) {
    if cfg!(debug_assertions) {
        if let Err(e) = slices.check(extents) {
            panic!("Cannot take sub-view {:?} of {:?}: {}", slices, extents, e);
        }
    }
}

/// Returns the part of `view` selected by `slices`, one slice specifier per
/// dimension.
///
/// If debug assertions are enabled, panics if a slice specifier is out of
/// bounds. See also [`try_submdspan()`].
///
/// ```
/// use submdspan::{Extents, Mdspan, Static, FULL, submdspan};
/// let data: Vec<i32> = (0..24).collect();
/// let e = <(Static<2>, Static<3>, Static<4>)>::from_sizes([2, 3, 4]).unwrap();
/// let m = Mdspan::from_extents(&data, e).unwrap();
/// let row = submdspan(&m, (1, 1, FULL));
/// assert_eq!(row.extent(0), 4);
/// assert_eq!(row[[0]], 16);
/// assert_eq!(row[[3]], 19);
/// ```
pub fn submdspan<'a, T, M, S>(view: &Mdspan<'a, T, M>, slices: S) -> Mdspan<'a, T, M::Output> where
    M: SubmdspanMapping<S>,
    S: SliceTuple<M::Extents>,
{
    debug_assert_slices(view.extents(), &slices);
    let SubMapping {mapping, offset} = view.mapping().submdspan_mapping(&slices);
    Mdspan::from_parts(&view.as_slice()[offset..], mapping)
}

/// Like [`submdspan()`] but always checks `slices` and returns an [`Error`]
/// if any are out of bounds.
pub fn try_submdspan<'a, T, M, S>(view: &Mdspan<'a, T, M>, slices: S) -> Result<Mdspan<'a, T, M::Output>, Error> where
    M: SubmdspanMapping<S>,
    S: SliceTuple<M::Extents>,
{
    slices.check(view.extents())?;
    let SubMapping {mapping, offset} = view.mapping().submdspan_mapping(&slices);
    Mdspan::new(&view.as_slice()[offset..], mapping)
}

// ----------------------------------------------------------------------------
