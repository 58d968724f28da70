use std::ops::{Index, IndexMut};

use super::{Extents, Error, Mapping, RightMapping, SliceTuple, SubmdspanMapping, SubMapping};
use super::submdspan::{submdspan, try_submdspan, debug_assert_slices};

/// A multi-dimensional view of borrowed storage.
///
/// The element at a multi-index `i` is `data[mapping.index(i)]`. The view
/// never owns its storage, and copying it is cheap.
///
/// ```
/// use submdspan::{Extents, Mdspan, Dyn};
/// let data = [1, 2, 3, 4, 5, 6];
/// let m = Mdspan::from_extents(&data, <(Dyn, Dyn)>::from_sizes([2, 3]).unwrap()).unwrap();
/// assert_eq!(m[[1, 0]], 4);
/// assert_eq!(m.get([2, 0]), None);
/// ```
#[derive(Debug)]
pub struct Mdspan<'a, T, M: Mapping> {
    data: &'a [T],
    mapping: M,
}

impl<'a, T, M: Mapping> Clone for Mdspan<'a, T, M> {
    fn clone(&self) -> Self { *self }
}

impl<'a, T, M: Mapping> Copy for Mdspan<'a, T, M> {}

impl<'a, T, M: Mapping> Mdspan<'a, T, M> {
    /// Fails if `data` is shorter than `mapping.required_span_size()`.
    pub fn new(data: &'a [T], mapping: M) -> Result<Self, Error> {
        check_span(data.len(), &mapping)?;
        Ok(Self {data, mapping})
    }

    /// The caller promises that `data` is long enough for `mapping` unless
    /// `mapping` has no elements.
    pub(crate) fn from_parts(data: &'a [T], mapping: M) -> Self { Self {data, mapping} }

    pub fn mapping(&self) -> &M { &self.mapping }

    pub fn extents(&self) -> &M::Extents { self.mapping.extents() }

    /// The size of dimension `r`.
    pub fn extent(&self, r: usize) -> usize { self.extents().extent(r) }

    /// The number of dimensions.
    pub fn rank(&self) -> usize { <M::Extents as Extents>::RANK }

    /// The number of elements.
    pub fn size(&self) -> usize { self.extents().size() }

    /// The storage, starting at the element with multi-index zero.
    pub fn as_slice(&self) -> &'a [T] { self.data }

    /// Returns the element at `index`, or `None` if `index` is out of bounds.
    pub fn get(&self, index: <M::Extents as Extents>::Indices) -> Option<&'a T> {
        if !self.extents().contains(index) { return None; }
        self.data.get(self.mapping.index(index))
    }

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn at(&self, index: <M::Extents as Extents>::Indices) -> &'a T {
        match self.get(index) {
            Some(t) => t,
            None => panic!("Index {:?} is out of bounds for {:?}", index.as_ref(), self.extents()),
        }
    }

    /// Returns the part of `self` selected by `slices`. See [`submdspan()`].
    pub fn submdspan<S>(&self, slices: S) -> Mdspan<'a, T, M::Output> where
        M: SubmdspanMapping<S>,
        S: SliceTuple<M::Extents>,
    {
        submdspan(self, slices)
    }

    /// Returns the part of `self` selected by `slices`. See
    /// [`try_submdspan()`].
    pub fn try_submdspan<S>(&self, slices: S) -> Result<Mdspan<'a, T, M::Output>, Error> where
        M: SubmdspanMapping<S>,
        S: SliceTuple<M::Extents>,
    {
        try_submdspan(self, slices)
    }
}

impl<'a, T, E: Extents> Mdspan<'a, T, RightMapping<E>> {
    /// A row-major view of `data`.
    pub fn from_extents(data: &'a [T], extents: E) -> Result<Self, Error> {
        Self::new(data, RightMapping::new(extents))
    }
}

impl<'a, T, M: Mapping> Index<<M::Extents as Extents>::Indices> for Mdspan<'a, T, M> {
    type Output = T;

    fn index(&self, index: <M::Extents as Extents>::Indices) -> &T { self.at(index) }
}

fn check_span<M: Mapping>(len: usize, mapping: &M) -> Result<(), Error> {
    let required = mapping.required_span_size();
    if len < required { return Err(Error::SpanTooSmall {required, len}); }
    Ok(())
}

// ----------------------------------------------------------------------------

/// A multi-dimensional view of mutably borrowed storage.
///
/// Sub-views of an `MdspanMut` borrow it mutably, so at most one of them is
/// usable at a time.
///
/// ```
/// use submdspan::{Extents, MdspanMut, Dyn, FULL};
/// let mut data = [0; 6];
/// let mut m = MdspanMut::from_extents(&mut data, <(Dyn, Dyn)>::from_sizes([2, 3]).unwrap()).unwrap();
/// let mut column = m.submdspan((FULL, 1));
/// column[[1]] = 7;
/// assert_eq!(data, [0, 0, 0, 0, 7, 0]);
/// ```
#[derive(Debug)]
pub struct MdspanMut<'a, T, M: Mapping> {
    data: &'a mut [T],
    mapping: M,
}

impl<'a, T, M: Mapping> MdspanMut<'a, T, M> {
    /// Fails if `data` is shorter than `mapping.required_span_size()`.
    pub fn new(data: &'a mut [T], mapping: M) -> Result<Self, Error> {
        check_span(data.len(), &mapping)?;
        Ok(Self {data, mapping})
    }

    pub fn mapping(&self) -> &M { &self.mapping }

    pub fn extents(&self) -> &M::Extents { self.mapping.extents() }

    /// The size of dimension `r`.
    pub fn extent(&self, r: usize) -> usize { self.extents().extent(r) }

    /// A shared view of the same elements.
    pub fn as_mdspan(&self) -> Mdspan<'_, T, M> { Mdspan::from_parts(self.data, self.mapping) }

    pub fn get_mut(&mut self, index: <M::Extents as Extents>::Indices) -> Option<&mut T> {
        if !self.extents().contains(index) { return None; }
        self.data.get_mut(self.mapping.index(index))
    }

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn at_mut(&mut self, index: <M::Extents as Extents>::Indices) -> &mut T {
        let extents = *self.extents();
        match self.get_mut(index) {
            Some(t) => t,
            None => panic!("Index {:?} is out of bounds for {:?}", index.as_ref(), extents),
        }
    }

    /// Returns the part of `self` selected by `slices`. See [`submdspan()`].
    pub fn submdspan<S>(&mut self, slices: S) -> MdspanMut<'_, T, M::Output> where
        M: SubmdspanMapping<S>,
        S: SliceTuple<M::Extents>,
    {
        debug_assert_slices(self.extents(), &slices);
        let SubMapping {mapping, offset} = self.mapping.submdspan_mapping(&slices);
        MdspanMut {data: &mut self.data[offset..], mapping}
    }

    /// Returns the part of `self` selected by `slices`. See
    /// [`try_submdspan()`].
    pub fn try_submdspan<S>(&mut self, slices: S) -> Result<MdspanMut<'_, T, M::Output>, Error> where
        M: SubmdspanMapping<S>,
        S: SliceTuple<M::Extents>,
    {
        slices.check(self.extents())?;
        let SubMapping {mapping, offset} = self.mapping.submdspan_mapping(&slices);
        MdspanMut::new(&mut self.data[offset..], mapping)
    }

    /// Like [`Self::submdspan()`] but consumes `self`.
    pub fn into_submdspan<S>(self, slices: S) -> MdspanMut<'a, T, M::Output> where
        M: SubmdspanMapping<S>,
        S: SliceTuple<M::Extents>,
    {
        debug_assert_slices(self.extents(), &slices);
        let SubMapping {mapping, offset} = self.mapping.submdspan_mapping(&slices);
        let data = self.data;
        MdspanMut {data: &mut data[offset..], mapping}
    }
}

impl<'a, T, E: Extents> MdspanMut<'a, T, RightMapping<E>> {
    /// A row-major view of `data`.
    pub fn from_extents(data: &'a mut [T], extents: E) -> Result<Self, Error> {
        Self::new(data, RightMapping::new(extents))
    }
}

impl<'a, T, M: Mapping> Index<<M::Extents as Extents>::Indices> for MdspanMut<'a, T, M> {
    type Output = T;

    fn index(&self, index: <M::Extents as Extents>::Indices) -> &T { self.as_mdspan().at(index) }
}

impl<'a, T, M: Mapping> IndexMut<<M::Extents as Extents>::Indices> for MdspanMut<'a, T, M> {
    fn index_mut(&mut self, index: <M::Extents as Extents>::Indices) -> &mut T { self.at_mut(index) }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::{Dyn, Static, FULL, StridedSlice, LeftMapping, StrideMapping};

    fn assert_send_sync<X: Send + Sync>(_: &X) {}

    #[test]
    fn too_small() {
        let data = [0u8; 5];
        let e = <(Dyn, Dyn)>::from_sizes([2, 3]).unwrap();
        assert!(matches!(Mdspan::from_extents(&data, e), Err(Error::SpanTooSmall {required: 6, len: 5})));
        assert!(matches!(
            Mdspan::new(&data, StrideMapping::new(e, [4, 1])),
            Err(Error::SpanTooSmall {required: 7, len: 5}),
        ));
        let data = [0u8; 7];
        let m = Mdspan::new(&data, StrideMapping::new(e, [4, 1])).unwrap();
        assert_eq!(m.size(), 6);
        assert!(m.mapping().is_unique() && !m.mapping().is_exhaustive());
        assert_send_sync(&m);
    }

    #[test]
    fn access() {
        let data: Vec<u32> = (0..12).collect();
        let m = Mdspan::new(&data, LeftMapping::new(<(Static<3>, Dyn)>::from_sizes([3, 4]).unwrap())).unwrap();
        assert_eq!(m.rank(), 2);
        assert_eq!(m.extent(1), 4);
        assert_eq!(m[[2, 1]], 5);
        assert_eq!(m.get([2, 3]), Some(&11));
        assert_eq!(m.get([3, 0]), None);
        let copy = m;
        assert_eq!(copy.at([1, 1]), m.at([1, 1]));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn at_out_of_bounds() {
        let data = [0; 4];
        let m = Mdspan::from_extents(&data, (Dyn(2), Dyn(2))).unwrap();
        m.at([0, 2]);
    }

    #[test]
    fn write_through_sub_views() {
        let mut data = vec![0; 24];
        let mut m = MdspanMut::from_extents(&mut data, <(Dyn, Dyn, Dyn)>::from_sizes([2, 3, 4]).unwrap()).unwrap();
        {
            let mut row = m.submdspan((1, 2, FULL));
            for k in 0..4 { row[[k]] = 100 + k; }
        }
        {
            let mut evens = m.submdspan((0, FULL, StridedSlice {offset: 0, extent: 4, stride: 2}));
            assert_eq!(evens.extents().to_indices(), [3, 2]);
            *evens.at_mut([2, 1]) = 7;
        }
        assert!(matches!(m.try_submdspan((2, FULL, FULL)), Err(Error::IndexOutOfBounds {dim: 0, ..})));
        assert_eq!(m.as_mdspan()[[1, 2, 3]], 103);
        let corner = m.into_submdspan(((0, 1), (2, 3), (2, 3)));
        assert_eq!(corner[[0, 0, 0]], 7);
        assert_eq!(&data[20..], [100, 101, 102, 103]);
    }

    #[test]
    fn get_mut() {
        let mut data = [1, 2, 3];
        let mut m = MdspanMut::from_extents(&mut data, (Dyn(3),)).unwrap();
        assert!(m.get_mut([3]).is_none());
        if let Some(x) = m.get_mut([0]) { *x = 9; }
        assert_eq!(data, [9, 2, 3]);
    }
}
