use crate::pixel::PixelKind;
use crate::stride::BadStrideError;

/// Errors of grid construction and access.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GridError {
    /// The grid has a region but no pixel buffer yet.
    #[error("pixel buffer has not been allocated")]
    Unallocated,
    /// A component count that the pixel kind can not hold.
    #[error("{kind} pixels can not have {channels} components")]
    ChannelCount { kind: PixelKind, channels: usize },
    /// A buffer that is shorter than its layout.
    #[error("buffer holds {available} components but the layout needs {required}")]
    BufferTooSmall { required: usize, available: usize },
    /// Two grids that were expected to cover the same extents.
    #[error("grid extents {left:?} differ from {right:?}")]
    ExtentMismatch { left: Vec<usize>, right: Vec<usize> },
    /// Typed pixel access with a pixel type not matching the grid.
    #[error("{requested} pixels requested from a grid of {actual} pixels")]
    PixelMismatch {
        requested: PixelKind,
        actual: PixelKind,
    },
    #[error(transparent)]
    Stride(#[from] BadStrideError),
}
