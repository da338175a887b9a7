//! Viewing grids as arrays.
use image_grid::{Component, GridRef, PixelGrid, PixelKind, StrideSpec};
use log::debug;
use ndarray::{ArrayView, ArrayViewD, ArrayViewMut, ArrayViewMutD, IxDyn, ShapeBuilder};

use crate::error::BridgeError;

/// View the pixels of a grid as an array, without copying.
///
/// The array has the axes of the grid in reverse order, so that the last array axis is the fastest
/// varying axis `0` of the grid. For multi-component pixels there is one more, trailing axis with
/// one entry per channel. A 30×20 grid of RGB pixels thus becomes an array of shape `[20, 30, 3]`.
///
/// Fails with [`BridgeError::UnallocatedSource`] if the grid has no buffer.
pub fn export<C: Component, const D: usize>(
    grid: &PixelGrid<C, D>,
) -> Result<ArrayViewD<'_, C>, BridgeError> {
    export_view(grid.view()?)
}

/// View the pixels of a grid as a mutable array, without copying.
///
/// Writes to the array are writes to the grid. The shape is the same as for [`export`].
pub fn export_mut<C: Component, const D: usize>(
    grid: &mut PixelGrid<C, D>,
) -> Result<ArrayViewMutD<'_, C>, BridgeError> {
    let layout = grid.layout()?;
    let kind = grid.kind();
    let data = grid.as_mut_slice().ok_or(BridgeError::UnallocatedSource)?;

    let (shape, strides) = array_shape(kind, &layout.spec());
    debug!("exporting {} grid mutably as array of shape {:?}", kind, shape);
    Ok(ArrayViewMut::from_shape(
        IxDyn(&shape).strides(IxDyn(&strides)),
        data,
    )?)
}

/// View any strided grid as an array, without copying.
///
/// The array strides follow the strides of the view, so a view created from a transposed array
/// exports as that same transposed array.
pub fn export_view<'a, C: Component, const D: usize>(
    view: GridRef<'a, C, D>,
) -> Result<ArrayViewD<'a, C>, BridgeError> {
    let spec = view.spec();
    let (shape, strides) = array_shape(view.kind(), &spec);

    debug!(
        "exporting {} grid as array of shape {:?} and strides {:?}",
        view.kind(),
        shape,
        strides
    );

    let data = &view.as_slice()[spec.offset..];
    Ok(ArrayView::from_shape(
        IxDyn(&shape).strides(IxDyn(&strides)),
        data,
    )?)
}

fn array_shape<const D: usize>(kind: PixelKind, spec: &StrideSpec<D>) -> (Vec<usize>, Vec<usize>) {
    let mut shape: Vec<usize> = spec.extents.iter().rev().copied().collect();
    let mut strides: Vec<usize> = spec.strides.iter().rev().copied().collect();

    if kind.is_multi_component() {
        shape.push(spec.channels);
        strides.push(spec.component_stride);
    }

    (shape, strides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_grid::{Region, Rgba};

    #[test]
    fn reversed_axes() -> Result<(), BridgeError> {
        let mut grid = PixelGrid::<u8, 3>::new(PixelKind::Scalar, Region::with_size([30, 20, 10]));
        grid.allocate()?;

        let array = export(&grid)?;
        assert_eq!(array.shape(), &[10, 20, 30]);
        assert_eq!(array.strides(), &[600, 30, 1]);
        assert!(array.is_standard_layout());
        Ok(())
    }

    #[test]
    fn channel_axis_last() -> Result<(), BridgeError> {
        let mut grid = PixelGrid::<u16, 2>::with_pixel::<Rgba<u16>>(Region::with_size([5, 4]));
        grid.allocate()?;
        grid.shade(|[x, y], rgba| rgba.copy_from_slice(&[x as u16, y as u16, 0, 1]))?;

        let array = export(&grid)?;
        assert_eq!(array.shape(), &[4, 5, 4]);
        assert_eq!(array[[3, 2, 0]], 2);
        assert_eq!(array[[3, 2, 1]], 3);
        assert_eq!(array[[3, 2, 3]], 1);
        Ok(())
    }

    #[test]
    fn unallocated_source() {
        let grid = PixelGrid::<f64, 2>::new(PixelKind::Scalar, Region::with_size([2, 2]));
        assert!(matches!(export(&grid), Err(BridgeError::UnallocatedSource)));

        let mut grid = grid;
        assert!(matches!(export_mut(&mut grid), Err(BridgeError::UnallocatedSource)));
    }

    #[test]
    fn writes_alias_the_grid() -> Result<(), BridgeError> {
        let mut grid = PixelGrid::<i32, 2>::new(PixelKind::Vector(2), Region::with_size([3, 2]));
        grid.allocate()?;

        let mut array = export_mut(&mut grid)?;
        assert_eq!(array.shape(), &[2, 3, 2]);
        array[[1, 2, 1]] = -7;
        array.slice_mut(ndarray::s![0, .., 0]).fill(4);

        assert_eq!(grid.pixel([2, 1]), Some(&[0, -7][..]));
        assert_eq!(grid.component([0, 0], 0), Some(4));
        assert_eq!(grid.component([2, 0], 0), Some(4));
        assert_eq!(grid.component([2, 0], 1), Some(0));
        Ok(())
    }
}
