use grid_ndarray::{export, export_view, import, BridgeError};
use image_grid::{PixelGrid, PixelKind, Region};

fn plane() -> PixelGrid<u8, 2> {
    let mut grid = PixelGrid::new(PixelKind::Scalar, Region::with_size([30, 20]));
    grid.allocate().expect("Scalar pixels");
    grid.shade(|[x, y], pixel| pixel[0] = (x + 30 * y) as u8)
        .expect("Allocated");
    grid
}

#[test]
fn transposed_scalar_image() -> Result<(), BridgeError> {
    let grid = plane();
    let array = export(&grid)?;
    assert_eq!(array.shape(), &[20, 30]);

    let converted = import::<_, _, 2>(array.t(), PixelKind::Scalar, false)?;
    assert_eq!(converted.extents(), [20, 30]);

    for [x, y] in converted.positions() {
        assert_eq!(converted.component([x, y], 0), grid.component([y, x], 0));
    }

    Ok(())
}

#[test]
fn transpose_reads_strides() -> Result<(), BridgeError> {
    let grid = plane();
    let converted = import::<_, _, 2>(export(&grid)?.reversed_axes(), PixelKind::Scalar, false)?;

    let spec = converted.spec();
    assert_eq!(spec.strides, [30, 1]);
    assert!(!converted.layout().is_packed());
    assert_eq!(converted.as_ptr(), grid.as_slice().unwrap().as_ptr());

    // A copy takes on the packed layout while keeping the swapped axes.
    let packed = converted.to_grid()?;
    assert_eq!(packed.extents(), [20, 30]);
    assert_eq!(packed.component([3, 7], 0), grid.component([7, 3], 0));
    Ok(())
}

#[test]
fn double_transpose_is_identity() -> Result<(), BridgeError> {
    let grid = plane();
    let swapped = import::<_, _, 2>(export(&grid)?.reversed_axes(), PixelKind::Scalar, false)?;
    let back = export_view(swapped)?.reversed_axes();
    let converted = import::<_, _, 2>(back, PixelKind::Scalar, false)?;

    assert_eq!(converted.extents(), [30, 20]);
    assert!(converted.layout().is_packed());
    Ok(())
}

#[test]
fn permuted_color_volume() -> Result<(), BridgeError> {
    let mut grid = PixelGrid::<u8, 3>::new(PixelKind::Rgb, Region::with_size([4, 3, 2]));
    grid.allocate()?;
    grid.shade(|[x, y, z], rgb| rgb.copy_from_slice(&[x as u8, y as u8, z as u8]))?;

    // Swap the two outer axes, keep the channel axis last.
    let array = export(&grid)?.permuted_axes(vec![1, 0, 2, 3]);
    assert_eq!(array.shape(), &[3, 2, 4, 3]);

    let converted = import::<_, _, 3>(array, PixelKind::Rgb, true)?;
    assert_eq!(converted.extents(), [4, 2, 3]);
    for [x, z, y] in converted.positions() {
        let rgb: Vec<u8> = converted.pixel([x, z, y]).unwrap().collect();
        assert_eq!(rgb, [x as u8, y as u8, z as u8]);
    }

    Ok(())
}
