use std::fmt::{Debug};

use super::{Dim, Error};

/// The shape of a view: one [`Dim`] per dimension.
///
/// Implemented for tuples of up to six `Dim`s. The rank is the length of the
/// tuple, and may be zero.
///
/// ```
/// use submdspan::{Extents, Dyn, Static};
/// let e = <(Static<2>, Dyn, Static<4>)>::from_sizes([2, 3, 4]).unwrap();
/// assert_eq!(<(Static<2>, Dyn, Static<4>)>::RANK, 3);
/// assert_eq!(<(Static<2>, Dyn, Static<4>)>::RANK_DYNAMIC, 1);
/// assert_eq!(e.extent(1), 3);
/// assert_eq!(e.size(), 24);
/// ```
pub trait Extents: 'static + Debug + Copy + PartialEq {
    /// The number of dimensions.
    const RANK: usize;

    /// The number of dimensions whose size is not a compile-time constant.
    const RANK_DYNAMIC: usize;

    /// A multi-index into a view of this shape: `[usize; RANK]`.
    type Indices: Debug + Copy + Default + PartialEq + AsRef<[usize]> + AsMut<[usize]>;

    /// Returns the compile-time size of dimension `r`, if any.
    ///
    /// Panics if `r >= RANK`.
    fn static_extent(r: usize) -> Option<usize>;

    /// Returns the sizes of all dimensions.
    fn to_indices(&self) -> Self::Indices;

    /// Constructs `Self` from the sizes of all dimensions.
    ///
    /// Fails if a size contradicts a static [`Dim`].
    fn from_sizes(sizes: Self::Indices) -> Result<Self, Error>;

    /// Returns the size of dimension `r`.
    ///
    /// Panics if `r >= RANK`.
    fn extent(&self, r: usize) -> usize { self.to_indices().as_ref()[r] }

    /// The number of elements in a view of this shape.
    fn size(&self) -> usize { self.to_indices().as_ref().iter().product() }

    /// Returns `true` if `index` is in bounds in every dimension.
    fn contains(&self, index: Self::Indices) -> bool {
        index.as_ref().iter().zip(self.to_indices().as_ref()).all(|(&i, &n)| i < n)
    }
}

macro_rules! impl_extents {
    ($rank:literal; $($i:tt $d:ident),*) => {
        impl<$($d: Dim),*> Extents for ($($d,)*) {
            const RANK: usize = $rank;
            const RANK_DYNAMIC: usize = 0 $(+ $d::STATIC.is_none() as usize)*;

            type Indices = [usize; $rank];

            fn static_extent(r: usize) -> Option<usize> {
                let statics: [Option<usize>; $rank] = [$($d::STATIC),*];
                statics[r]
            }

            fn to_indices(&self) -> Self::Indices { [$(self.$i.size()),*] }

            #[allow(unused_variables)]
            fn from_sizes(sizes: Self::Indices) -> Result<Self, Error> {
                Ok(($(
                    $d::from_size(sizes[$i]).ok_or(Error::StaticExtentMismatch {
                        dim: $i,
                        expected: $d::STATIC.unwrap_or(sizes[$i]),
                        got: sizes[$i],
                    })?,
                )*))
            }
        }
    };
}

impl_extents!(0;);
impl_extents!(1; 0 A);
impl_extents!(2; 0 A, 1 B);
impl_extents!(3; 0 A, 1 B, 2 C);
impl_extents!(4; 0 A, 1 B, 2 C, 3 D);
impl_extents!(5; 0 A, 1 B, 2 C, 3 D, 4 E);
impl_extents!(6; 0 A, 1 B, 2 C, 3 D, 4 E, 5 F);

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::{Dyn, Static};

    #[test]
    fn ranks() {
        assert_eq!(<()>::RANK, 0);
        assert_eq!(<()>::RANK_DYNAMIC, 0);
        assert_eq!(<(Dyn, Static<3>)>::RANK, 2);
        assert_eq!(<(Dyn, Static<3>)>::RANK_DYNAMIC, 1);
        assert_eq!(<(Dyn, Static<3>)>::static_extent(0), None);
        assert_eq!(<(Dyn, Static<3>)>::static_extent(1), Some(3));
    }

    #[test]
    fn from_sizes() {
        let e = <(Dyn, Static<3>)>::from_sizes([7, 3]).unwrap();
        assert_eq!(e, (Dyn(7), Static));
        assert_eq!(e.to_indices(), [7, 3]);
        assert_eq!(e.size(), 21);
        assert!(matches!(
            <(Dyn, Static<3>)>::from_sizes([7, 4]),
            Err(Error::StaticExtentMismatch { dim: 1, expected: 3, got: 4 }),
        ));
    }

    #[test]
    fn scalar() {
        let e = <()>::from_sizes([]).unwrap();
        assert_eq!(e.size(), 1);
        assert!(e.contains([]));
    }

    #[test]
    fn contains() {
        let e = <(Dyn, Dyn)>::from_sizes([2, 3]).unwrap();
        assert!(e.contains([1, 2]));
        assert!(!e.contains([2, 0]));
        assert!(!e.contains([0, 3]));
    }
}
