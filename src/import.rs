//! Viewing arrays as grids.
use image_grid::{Component, GridRef, Pixel, PixelKind, StrideSpec, StridedLayout};
use log::{debug, trace};
use ndarray::{ArrayView, Dimension};

use crate::dynamic::{DynArrayView, Element};
use crate::error::{BridgeError, ShapeReason};

/// View an array as a grid of pixels, without copying.
///
/// This is the mirror image of [`export`](crate::export): the grid axes are the array axes in
/// reverse order, and with `multi_channel` set the last array axis holds the components of each
/// pixel. The flag must agree with `kind`. It is an explicit contract and the array shape is never
/// used to guess it.
///
/// The array is read through its strides, so a transposed or otherwise permuted array is accepted
/// as is. The resulting grid follows the strides: transposing a `[20, 30]` array into `[30, 20]`
/// yields a grid of extents `[20, 30]`.
///
/// # Errors
///
/// - [`BridgeError::ShapeMismatch`] when the flag disagrees with `kind`, the array does not have
///   `D` axes (plus the channel axis), an axis is empty, or the channel count does not fit `kind`.
/// - [`BridgeError::UnsupportedStrides`] when a stride is negative or the elements are not dense
///   in memory in any axis order.
pub fn import<'a, C, Sh, const D: usize>(
    array: ArrayView<'a, C, Sh>,
    kind: PixelKind,
    multi_channel: bool,
) -> Result<GridRef<'a, C, D>, BridgeError>
where
    C: Component,
    Sh: Dimension,
{
    let array = array.into_dyn();
    let shape = array.shape().to_vec();
    let mismatch = |reason| BridgeError::ShapeMismatch {
        shape: shape.clone(),
        kind,
        reason,
    };

    if multi_channel != kind.is_multi_component() {
        return Err(mismatch(ShapeReason::ChannelFlag));
    }

    let expected = D + usize::from(multi_channel);
    if shape.len() != expected {
        return Err(mismatch(ShapeReason::AxisCount {
            expected,
            found: shape.len(),
        }));
    }

    if shape.contains(&0) {
        return Err(mismatch(ShapeReason::EmptyAxis));
    }

    let channels = if multi_channel { shape[D] } else { 1 };
    let kind = kind
        .accepts(channels)
        .ok_or_else(|| mismatch(ShapeReason::ChannelCount(channels)))?;

    let unsupported = || BridgeError::UnsupportedStrides {
        strides: array.strides().to_vec(),
    };

    let strides = array
        .strides()
        .iter()
        .map(|&stride| usize::try_from(stride))
        .collect::<Result<Vec<usize>, _>>()
        .map_err(|_| unsupported())?;

    // With non-negative strides the first element has the lowest address, so the dense memory
    // starts exactly at the array origin.
    let data = array.to_slice_memory_order().ok_or_else(unsupported)?;

    let spec = StrideSpec {
        extents: core::array::from_fn(|axis| shape[D - 1 - axis]),
        strides: core::array::from_fn(|axis| strides[D - 1 - axis]),
        channels,
        component_stride: if multi_channel { strides[D] } else { 1 },
        offset: 0,
    };

    trace!("importing array with strides {:?} as {:?}", strides, spec);
    let layout = StridedLayout::new(spec)?;
    let grid = GridRef::new(kind, layout, data)?;

    debug!(
        "imported array of shape {:?} as {} grid of extents {:?}",
        shape,
        kind,
        grid.extents()
    );
    Ok(grid)
}

/// View an array as a grid of statically typed pixels.
///
/// The pixel kind is that of `P`. Pixels of variable length have no static type; use [`import`]
/// with [`PixelKind::VariableLength`] for them.
pub fn import_pixels<'a, P, Sh, const D: usize>(
    array: ArrayView<'a, P::Component, Sh>,
    multi_channel: bool,
) -> Result<GridRef<'a, P::Component, D>, BridgeError>
where
    P: Pixel,
    Sh: Dimension,
{
    import(array, P::KIND, multi_channel)
}

/// View an array of runtime element type as a grid.
///
/// Fails with [`BridgeError::TypeMismatch`] if the array elements are not of type `C`, and
/// otherwise behaves like [`import`].
pub fn import_dyn<'a, C, const D: usize>(
    array: DynArrayView<'a>,
    kind: PixelKind,
    multi_channel: bool,
) -> Result<GridRef<'a, C, D>, BridgeError>
where
    C: Element,
{
    let array = array.downcast::<C>()?;
    import(array, kind, multi_channel)
}
