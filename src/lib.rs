//! Non-owning multi-dimensional views and their sub-views.
//!
//! [`Mdspan<T, M>`] is a view of a `&[T]` as a multi-dimensional array. The
//! [`Mapping`] `M` converts multi-indices to offsets in the slice, and knows
//! the shape of the view, which is an [`Extents`]. The size of each dimension
//! is a [`Dim`], which may be known at compile time ([`Static`]) or only at
//! run time ([`Dyn`]).
//!
//! [`submdspan()`] is the main operation. It takes one slice specifier per
//! dimension and returns a view of part of the original view, sharing its
//! storage. The rank, the static extents and the [`Layout`] of the result are
//! all computed at compile time from the types of the slice specifiers; only
//! the offsets and sizes are computed at run time:
//!
//! ```
//! use submdspan::{Extents, Mdspan, MdspanMut, Dyn, Static, FULL, RightMapping, submdspan};
//! let mut data: Vec<i32> = (0..24).collect();
//! let e = <(Static<2>, Dyn, Static<4>)>::from_sizes([2, 3, 4]).unwrap();
//! let m = Mdspan::from_extents(&data, e).unwrap();
//!
//! // An index removes a dimension. A full extent keeps it, including its
//! // static size, and a row-major view stays row-major.
//! let row: Mdspan<i32, RightMapping<(Static<4>,)>> = submdspan!(m; 1, 1, FULL);
//! assert_eq!(row[[1]], 17);
//!
//! // Views of mutable storage can be written through.
//! let mut w = MdspanMut::from_extents(&mut data, e).unwrap();
//! let mut column = w.submdspan((0, .., 2));
//! column[[2]] = -1;
//! assert_eq!(data[10], -1);
//! ```
//!
//! The three provided layouts are [`LayoutRight`], [`LayoutLeft`] and
//! [`LayoutStride`]. You can add your own by implementing [`Mapping`] and
//! [`SubmdspanMapping`]. Likewise, you can add your own slice specifiers by
//! implementing [`SliceSpecifier`].
//!
//! Module [`dispatch`] can run code that builds and uses views on a separate
//! execution context.

pub mod tuple;
pub use tuple::{NonTuple, Flat, Contribution, Unflatten};

mod dim;
pub use dim::{Dim, Dyn, Static, Diff, CeilDiv, ceil_div, Const, IndexLike, Runtime, RangeDim, StrideDim};

mod extents;
pub use extents::{Extents};

mod error;
pub use error::{Error};

mod layout;
pub use layout::{Mapping, FromStrides, Layout};
pub use layout::{LayoutRight, RightMapping, LayoutLeft, LeftMapping, LayoutStride, StrideMapping};

mod slice;
pub use slice::{kind, SliceKind, Canonical, Slice, SliceSpecifier, SliceTuple};
pub use slice::{FullExtent, FULL, StridedSlice};

mod submdspan;
pub use submdspan::{State, RightLeading, RightTrailing, LeftLeading, LeftTrailing, Degraded, LayoutOf};
pub use submdspan::{SubMapping, SubmdspanMapping, strided_sub_mapping, submdspan, try_submdspan};

mod view;
pub use view::{Mdspan, MdspanMut};

pub mod dispatch;

/// Calls `submdspan()` on a view with one slice specifier per argument.
///
/// `submdspan!(v; a, b, c)` means `v.submdspan((a, b, c))`.
#[macro_export]
macro_rules! submdspan {
    ($view:expr; $($slice:expr),* $(,)?) => {
        ($view).submdspan(($($slice,)*))
    };
}
