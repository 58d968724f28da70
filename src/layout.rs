//! Layout mappings: functions from multi-indices to offsets into storage.
//!
//! A [`Layout`] is a family of [`Mapping`]s, one for each [`Extents`] type.
//! Three families are provided:
//!
//! - [`LayoutRight`]: row-major. The last index varies fastest.
//! - [`LayoutLeft`]: column-major. The first index varies fastest.
//! - [`LayoutStride`]: every dimension has its own stride.
//!
//! You can define your own `Mapping`s. To take part in [`submdspan()`] a
//! mapping must also implement [`SubmdspanMapping`].
//!
//! [`submdspan()`]: super::submdspan()
//! [`SubmdspanMapping`]: super::SubmdspanMapping

use std::fmt::{Debug};

use super::{Extents};

/// A function from the multi-indices of [`Self::Extents`] to offsets.
pub trait Mapping: Debug + Copy {
    /// The shape of the index space.
    type Extents: Extents;

    /// No two multi-indices map to the same offset, for every `Self`.
    const ALWAYS_UNIQUE: bool;

    /// Every offset in `0..required_span_size()` is the image of some
    /// multi-index, for every `Self`.
    const ALWAYS_EXHAUSTIVE: bool;

    /// The offset is `Σ index[r] * stride(r)`, for every `Self`.
    const ALWAYS_STRIDED: bool;

    fn extents(&self) -> &Self::Extents;

    /// Returns the offset of `index`.
    ///
    /// `index` must be in bounds; this is checked if debug assertions are
    /// enabled.
    fn index(&self, index: <Self::Extents as Extents>::Indices) -> usize;

    /// The distance between consecutive indices along dimension `r`.
    fn stride(&self, r: usize) -> usize;

    /// One more than the largest offset, or `0` if there are no indices.
    fn required_span_size(&self) -> usize;

    fn is_unique(&self) -> bool { Self::ALWAYS_UNIQUE }

    fn is_exhaustive(&self) -> bool { Self::ALWAYS_EXHAUSTIVE }

    fn is_strided(&self) -> bool { Self::ALWAYS_STRIDED }
}

/// A [`Mapping`] that can be reconstructed from its extents and strides.
///
/// Every mapping that [`submdspan()`] may produce implements this.
///
/// [`submdspan()`]: super::submdspan()
pub trait FromStrides: Mapping {
    /// `strides` must be consistent with the family of `Self`.
    fn from_strides(extents: Self::Extents, strides: <Self::Extents as Extents>::Indices) -> Self;
}

/// A family of [`Mapping`]s.
pub trait Layout: 'static {
    type Mapping<E: Extents>: FromStrides<Extents=E>;
}

fn debug_assert_in_bounds<E: Extents>(extents: &E, index: E::Indices) {
    debug_assert!(
        extents.contains(index),
        "Index {:?} is out of bounds for extents {:?}", index.as_ref(), extents.to_indices().as_ref(),
    );
}

fn debug_assert_strides<M: Mapping>(mapping: &M, strides: <M::Extents as Extents>::Indices) {
    let extents = mapping.extents();
    for (r, &stride) in strides.as_ref().iter().enumerate() {
        debug_assert!(
            extents.extent(r) <= 1 || stride == mapping.stride(r),
            "Stride {} of dimension {} is inconsistent with {:?}", stride, r, mapping,
        );
    }
}

// ----------------------------------------------------------------------------

/// The row-major [`Layout`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LayoutRight {}

impl Layout for LayoutRight {
    type Mapping<E: Extents> = RightMapping<E>;
}

/// The [`Mapping`] of [`LayoutRight`].
///
/// ```
/// use submdspan::{Extents, Mapping, RightMapping, Static};
/// let m = RightMapping::new(<(Static<2>, Static<3>, Static<4>)>::from_sizes([2, 3, 4]).unwrap());
/// assert_eq!(m.index([1, 1, 1]), 17);
/// assert_eq!(m.stride(0), 12);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RightMapping<E: Extents> {
    extents: E,
}

impl<E: Extents> RightMapping<E> {
    pub fn new(extents: E) -> Self { Self {extents} }
}

impl<E: Extents> From<E> for RightMapping<E> {
    fn from(extents: E) -> Self { Self::new(extents) }
}

impl<E: Extents> Mapping for RightMapping<E> {
    type Extents = E;
    const ALWAYS_UNIQUE: bool = true;
    const ALWAYS_EXHAUSTIVE: bool = true;
    const ALWAYS_STRIDED: bool = true;

    fn extents(&self) -> &E { &self.extents }

    fn index(&self, index: E::Indices) -> usize {
        debug_assert_in_bounds(&self.extents, index);
        let sizes = self.extents.to_indices();
        let mut offset = 0;
        for (&i, &n) in index.as_ref().iter().zip(sizes.as_ref()) {
            offset = offset * n + i;
        }
        offset
    }

    fn stride(&self, r: usize) -> usize {
        self.extents.to_indices().as_ref()[r + 1..].iter().product()
    }

    fn required_span_size(&self) -> usize { self.extents.size() }
}

impl<E: Extents> FromStrides for RightMapping<E> {
    fn from_strides(extents: E, strides: E::Indices) -> Self {
        let mapping = Self::new(extents);
        debug_assert_strides(&mapping, strides);
        mapping
    }
}

// ----------------------------------------------------------------------------

/// The column-major [`Layout`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LayoutLeft {}

impl Layout for LayoutLeft {
    type Mapping<E: Extents> = LeftMapping<E>;
}

/// The [`Mapping`] of [`LayoutLeft`].
///
/// ```
/// use submdspan::{Extents, Mapping, LeftMapping, Dyn};
/// let m = LeftMapping::new(<(Dyn, Dyn, Dyn)>::from_sizes([2, 3, 4]).unwrap());
/// assert_eq!(m.index([1, 1, 1]), 9);
/// assert_eq!(m.stride(2), 6);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LeftMapping<E: Extents> {
    extents: E,
}

impl<E: Extents> LeftMapping<E> {
    pub fn new(extents: E) -> Self { Self {extents} }
}

impl<E: Extents> From<E> for LeftMapping<E> {
    fn from(extents: E) -> Self { Self::new(extents) }
}

impl<E: Extents> Mapping for LeftMapping<E> {
    type Extents = E;
    const ALWAYS_UNIQUE: bool = true;
    const ALWAYS_EXHAUSTIVE: bool = true;
    const ALWAYS_STRIDED: bool = true;

    fn extents(&self) -> &E { &self.extents }

    fn index(&self, index: E::Indices) -> usize {
        debug_assert_in_bounds(&self.extents, index);
        let sizes = self.extents.to_indices();
        let mut offset = 0;
        for (&i, &n) in index.as_ref().iter().zip(sizes.as_ref()).rev() {
            offset = offset * n + i;
        }
        offset
    }

    fn stride(&self, r: usize) -> usize {
        self.extents.to_indices().as_ref()[..r].iter().product()
    }

    fn required_span_size(&self) -> usize { self.extents.size() }
}

impl<E: Extents> FromStrides for LeftMapping<E> {
    fn from_strides(extents: E, strides: E::Indices) -> Self {
        let mapping = Self::new(extents);
        debug_assert_strides(&mapping, strides);
        mapping
    }
}

// ----------------------------------------------------------------------------

/// The [`Layout`] with an explicit stride for every dimension.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LayoutStride {}

impl Layout for LayoutStride {
    type Mapping<E: Extents> = StrideMapping<E>;
}

/// The [`Mapping`] of [`LayoutStride`].
///
/// Distinct multi-indices must have distinct offsets, as
/// [`Mapping::ALWAYS_UNIQUE`] promises. Nothing checks this.
///
/// ```
/// use submdspan::{Extents, Mapping, StrideMapping, Dyn};
/// let m = StrideMapping::new(<(Dyn, Dyn)>::from_sizes([2, 3]).unwrap(), [1, 4]);
/// assert_eq!(m.index([1, 2]), 9);
/// assert_eq!(m.required_span_size(), 10);
/// assert!(!m.is_exhaustive());
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StrideMapping<E: Extents> {
    extents: E,
    strides: E::Indices,
}

impl<E: Extents> StrideMapping<E> {
    /// `strides` must map distinct multi-indices of `extents` to distinct
    /// offsets.
    pub fn new(extents: E, strides: E::Indices) -> Self { Self {extents, strides} }

    pub fn strides(&self) -> E::Indices { self.strides }
}

impl<E: Extents> Mapping for StrideMapping<E> {
    type Extents = E;
    const ALWAYS_UNIQUE: bool = true;
    const ALWAYS_EXHAUSTIVE: bool = false;
    const ALWAYS_STRIDED: bool = true;

    fn extents(&self) -> &E { &self.extents }

    fn index(&self, index: E::Indices) -> usize {
        debug_assert_in_bounds(&self.extents, index);
        index.as_ref().iter().zip(self.strides.as_ref()).map(|(&i, &s)| i * s).sum()
    }

    fn stride(&self, r: usize) -> usize { self.strides.as_ref()[r] }

    fn required_span_size(&self) -> usize {
        let sizes = self.extents.to_indices();
        if sizes.as_ref().contains(&0) { return 0; }
        1 + sizes.as_ref().iter().zip(self.strides.as_ref()).map(|(&n, &s)| (n - 1) * s).sum::<usize>()
    }

    fn is_exhaustive(&self) -> bool { self.required_span_size() == self.extents.size() }
}

impl<E: Extents> FromStrides for StrideMapping<E> {
    fn from_strides(extents: E, strides: E::Indices) -> Self { Self::new(extents, strides) }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::{Dyn, Static};

    type E234 = (Static<2>, Static<3>, Static<4>);

    fn e234() -> E234 { E234::from_sizes([2, 3, 4]).unwrap() }

    #[test]
    fn right() {
        let m = RightMapping::new(e234());
        assert_eq!(m.index([0, 0, 0]), 0);
        assert_eq!(m.index([0, 0, 3]), 3);
        assert_eq!(m.index([1, 2, 3]), 23);
        assert_eq!([m.stride(0), m.stride(1), m.stride(2)], [12, 4, 1]);
        assert_eq!(m.required_span_size(), 24);
        assert!(m.is_unique() && m.is_exhaustive() && m.is_strided());
    }

    #[test]
    fn left() {
        let m = LeftMapping::new(e234());
        assert_eq!(m.index([1, 0, 0]), 1);
        assert_eq!(m.index([1, 2, 3]), 23);
        assert_eq!([m.stride(0), m.stride(1), m.stride(2)], [1, 2, 6]);
        assert_eq!(m.required_span_size(), 24);
    }

    #[test]
    fn stride() {
        let m = StrideMapping::new(<(Dyn, Dyn)>::from_sizes([3, 2]).unwrap(), [2, 10]);
        assert_eq!(m.index([2, 1]), 14);
        assert_eq!(m.required_span_size(), 15);
        assert!(!m.is_exhaustive());
        let dense = StrideMapping::new(<(Dyn, Dyn)>::from_sizes([3, 2]).unwrap(), [2, 1]);
        assert!(dense.is_exhaustive());
    }

    #[test]
    fn empty() {
        let m = StrideMapping::new(<(Dyn, Dyn)>::from_sizes([3, 0]).unwrap(), [2, 10]);
        assert_eq!(m.required_span_size(), 0);
        let m = RightMapping::new(<(Dyn, Dyn)>::from_sizes([3, 0]).unwrap());
        assert_eq!(m.required_span_size(), 0);
    }

    #[test]
    fn scalar() {
        let m = RightMapping::new(());
        assert_eq!(m.index([]), 0);
        assert_eq!(m.required_span_size(), 1);
        let m = StrideMapping::new((), []);
        assert_eq!(m.required_span_size(), 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds() {
        RightMapping::new(e234()).index([2, 0, 0]);
    }
}
