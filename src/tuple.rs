//! Type-level lists used to compute the [`Extents`] of a sub-view.
//!
//! Each slice specifier contributes either nothing (it collapses its
//! dimension) or exactly one [`Dim`] to the result. The contributions are
//! accumulated into a canonical form, e.g. `((((), A), B), C)`, which is then
//! converted back into the ordinary tuple `(A, B, C)`.
//!
//! Canonical forms implement trait [`Flat`]. Contributions implement trait
//! [`Contribution`]. Canonical forms that correspond to an [`Extents`] type
//! implement trait [`Unflatten`].
//!
//! [`Extents`]: super::Extents
//! [`Dim`]: super::Dim

use super::{Dim};

/// Implemented by types that have no tuple-like structure.
///
/// Only `NonTuple` types can be elements of a [`Flat`] list.
pub trait NonTuple: Sized {}

// ----------------------------------------------------------------------------

/// Implemented by types that are of the form `((((), A), B), ... )`.
pub trait Flat: Sized {}

impl Flat for () {}

impl<A: Flat, B: NonTuple> Flat for (A, B) {}

// ----------------------------------------------------------------------------

/// What one slice specifier adds to the extents of a sub-view.
///
/// `()` adds nothing. `(D,)` appends `D`.
pub trait Contribution: Copy {
    /// The result of appending `Self` to `F`.
    type Push<F: Flat>: Flat;

    fn push<F: Flat>(self, f: F) -> Self::Push<F>;
}

impl Contribution for () {
    type Push<F: Flat> = F;

    #[inline(always)]
    fn push<F: Flat>(self, f: F) -> F { f }
}

impl<D: Dim> Contribution for (D,) {
    type Push<F: Flat> = (F, D);

    #[inline(always)]
    fn push<F: Flat>(self, f: F) -> (F, D) { (f, self.0) }
}

// ----------------------------------------------------------------------------

/// Converts a [`Flat`] list of [`Dim`]s back into a tuple.
///
/// Implemented for lists of length 0 to 6.
pub trait Unflatten: Flat {
    type Tuple: super::Extents;

    fn unflatten(self) -> Self::Tuple;
}

impl Unflatten for () {
    type Tuple = ();
    fn unflatten(self) -> () { () }
}

impl<A: Dim> Unflatten for ((), A) {
    type Tuple = (A,);
    fn unflatten(self) -> Self::Tuple { (self.1,) }
}

impl<A: Dim, B: Dim> Unflatten for (((), A), B) {
    type Tuple = (A, B);
    fn unflatten(self) -> Self::Tuple {
        let (((), a), b) = self;
        (a, b)
    }
}

impl<A: Dim, B: Dim, C: Dim> Unflatten for ((((), A), B), C) {
    type Tuple = (A, B, C);
    fn unflatten(self) -> Self::Tuple {
        let ((((), a), b), c) = self;
        (a, b, c)
    }
}

impl<A: Dim, B: Dim, C: Dim, D: Dim> Unflatten for (((((), A), B), C), D) {
    type Tuple = (A, B, C, D);
    fn unflatten(self) -> Self::Tuple {
        let (((((), a), b), c), d) = self;
        (a, b, c, d)
    }
}

impl<A: Dim, B: Dim, C: Dim, D: Dim, E: Dim> Unflatten for ((((((), A), B), C), D), E) {
    type Tuple = (A, B, C, D, E);
    fn unflatten(self) -> Self::Tuple {
        let ((((((), a), b), c), d), e) = self;
        (a, b, c, d, e)
    }
}

impl<A: Dim, B: Dim, C: Dim, D: Dim, E: Dim, F: Dim> Unflatten for (((((((), A), B), C), D), E), F) {
    type Tuple = (A, B, C, D, E, F);
    fn unflatten(self) -> Self::Tuple {
        let (((((((), a), b), c), d), e), f) = self;
        (a, b, c, d, e, f)
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::{Dyn, Static};

    #[test]
    fn push_skips_unit() {
        let f = ((), Dyn(3));
        assert_eq!(().push(f), f);
        assert_eq!((Dyn(4),).push(f), (f, Dyn(4)));
    }

    #[test]
    fn unflatten() {
        assert_eq!(().unflatten(), ());
        assert_eq!(((), Dyn(7)).unflatten(), (Dyn(7),));
        let f = ((), Dyn(1));
        let f = (Static::<2>,).push(f);
        let f = ().push(f);
        let f = (Dyn(3),).push(f);
        assert_eq!(f.unflatten(), (Dyn(1), Static::<2>, Dyn(3)));
    }
}
