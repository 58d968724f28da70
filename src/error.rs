/// The type of error for view construction and sub-view validation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("storage holds {len} elements but the mapping requires {required}")]
    SpanTooSmall { required: usize, len: usize },

    #[error("dimension {dim} has static extent {expected}, got {got}")]
    StaticExtentMismatch { dim: usize, expected: usize, got: usize },

    #[error("index {index} out of bounds for dimension {dim} of extent {extent}")]
    IndexOutOfBounds { dim: usize, index: usize, extent: usize },

    #[error("range {first}..{end} out of bounds for dimension {dim} of extent {extent}")]
    RangeOutOfBounds { dim: usize, first: usize, end: usize, extent: usize },

    #[error("zero stride on non-empty strided slice of dimension {dim}")]
    ZeroStride { dim: usize },

    #[error("unknown dispatch target {0:?}")]
    UnknownTarget(String),
}
