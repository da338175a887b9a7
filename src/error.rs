use core::fmt;

use image_grid::{BadStrideError, ComponentKind, GridError, PixelKind};

/// Errors of exporting grids to arrays and importing arrays as grids.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BridgeError {
    /// The array shape does not fit the pixel kind or the channel flag.
    #[error("array of shape {shape:?} can not hold {kind} pixels: {reason}")]
    ShapeMismatch {
        shape: Vec<usize>,
        kind: PixelKind,
        reason: ShapeReason,
    },
    /// The grid to export has no pixel buffer.
    #[error("the source grid has no allocated pixel buffer")]
    UnallocatedSource,
    /// The array element type is not the component type of the grid.
    #[error("array elements are {found} but the grid stores {expected}")]
    TypeMismatch {
        expected: ComponentKind,
        found: ComponentKind,
    },
    /// The array memory can not be aliased by a grid.
    #[error("array strides {strides:?} do not describe a dense buffer with non-negative strides")]
    UnsupportedStrides { strides: Vec<isize> },
    /// The array library rejected the layout of a view.
    #[error(transparent)]
    Array(#[from] ndarray::ShapeError),
    #[error(transparent)]
    Grid(GridError),
}

/// Why an array shape was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeReason {
    /// The multi-channel flag disagrees with the pixel kind.
    ChannelFlag,
    /// The array has the wrong number of axes.
    AxisCount { expected: usize, found: usize },
    /// An axis has no elements.
    EmptyAxis,
    /// The channel axis has a length the pixel kind can not hold.
    ChannelCount(usize),
}

impl fmt::Display for ShapeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeReason::ChannelFlag => {
                f.write_str("the multi-channel flag disagrees with the pixel kind")
            }
            ShapeReason::AxisCount { expected, found } => {
                write!(f, "expected {} axes, found {}", expected, found)
            }
            ShapeReason::EmptyAxis => f.write_str("every axis must have a positive length"),
            ShapeReason::ChannelCount(n) => write!(f, "{} components per pixel", n),
        }
    }
}

impl From<GridError> for BridgeError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::Unallocated => BridgeError::UnallocatedSource,
            other => BridgeError::Grid(other),
        }
    }
}

impl From<BadStrideError> for BridgeError {
    fn from(err: BadStrideError) -> Self {
        BridgeError::Grid(err.into())
    }
}
