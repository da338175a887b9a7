use grid_ndarray::{export, export_view, import, import_pixels, BridgeError};
use image_grid::{
    compare, Component, ComparisonOptions, PixelGrid, PixelKind, Region, Rgb, Rgba,
};

fn volume() -> Region<3> {
    let mut region = Region::default();
    region.set_size(0, 30);
    region.set_size(1, 20);
    region.set_size(2, 10);
    region
}

fn patterned<C: Component>(kind: PixelKind, cast: impl Fn(usize) -> C) -> PixelGrid<C, 3> {
    let mut grid = PixelGrid::new(kind, volume());
    grid.allocate().expect("Valid pixel kind");
    grid.shade(|[x, y, z], pixel| {
        for (c, component) in pixel.iter_mut().enumerate() {
            *component = cast((x + 2 * y + 5 * z + 11 * c) % 251);
        }
    })
    .expect("Allocated");
    grid
}

fn assert_round_trip<C: Component>(grid: &PixelGrid<C, 3>) -> Result<(), BridgeError> {
    let multi_channel = grid.kind().is_multi_component();
    let array = export(grid)?;
    let converted = import::<_, _, 3>(array, grid.kind(), multi_channel)?;

    assert_eq!(converted.extents(), grid.extents());
    assert_eq!(converted.kind(), grid.kind());
    assert_eq!(converted.as_ptr(), grid.as_slice().unwrap().as_ptr(), "Not a copy");

    let result = compare(&grid.view()?, &converted, ComparisonOptions::default())?;
    assert_eq!(result.total_difference, 0.0);
    assert_eq!(result.differing_pixels, 0);
    Ok(())
}

#[test]
fn scalar_image() -> Result<(), BridgeError> {
    let grid = patterned(PixelKind::Scalar, |v| v as u8);
    let array = export(&grid)?;
    assert_eq!(array.shape(), &[10, 20, 30]);

    assert_round_trip(&grid)
}

#[test]
fn vector_image() -> Result<(), BridgeError> {
    let grid = patterned(PixelKind::VariableLength(3), |v| v as u8);
    let array = export(&grid)?;
    assert_eq!(array.shape(), &[10, 20, 30, 3]);

    assert_round_trip(&grid)
}

#[test]
fn rgb_image() -> Result<(), BridgeError> {
    let grid = patterned(PixelKind::Rgb, |v| v as u8);
    assert_round_trip(&grid)?;

    let array = export(&grid)?;
    let typed = import_pixels::<Rgb<u8>, _, 3>(array, true)?;
    assert_eq!(typed.kind(), PixelKind::Rgb);
    assert_eq!(typed.component([4, 3, 2], 1), grid.component([4, 3, 2], 1));
    Ok(())
}

#[test]
fn rgba_image() -> Result<(), BridgeError> {
    let grid = patterned(PixelKind::Rgba, |v| v as u8);
    let array = export(&grid)?;
    assert_eq!(array.shape(), &[10, 20, 30, 4]);

    let typed = import_pixels::<Rgba<u8>, _, 3>(array, true)?;
    assert_eq!(typed.channels(), 4);
    assert_round_trip(&grid)
}

#[test]
fn vector_pixel_image() -> Result<(), BridgeError> {
    let grid = patterned(PixelKind::Vector(3), |v| v as f32 * 0.25);
    let array = export(&grid)?;
    assert_eq!(array.shape(), &[10, 20, 30, 3]);

    let typed = import_pixels::<[f32; 3], _, 3>(array, true)?;
    assert_eq!(typed.kind(), PixelKind::Vector(3));
    assert_round_trip(&grid)
}

#[test]
fn multi_channel_shape_law() -> Result<(), BridgeError> {
    for channels in 1..=6 {
        let mut grid = PixelGrid::<i16, 2>::new(
            PixelKind::VariableLength(channels),
            Region::with_size([7, 5]),
        );
        grid.allocate()?;

        let array = export(&grid)?;
        assert_eq!(array.ndim(), 3);
        assert_eq!(array.shape()[2], channels);
        assert_eq!(array.len(), 7 * 5 * channels);
    }

    Ok(())
}

#[test]
fn reexport_of_imported_view() -> Result<(), BridgeError> {
    let grid = patterned(PixelKind::Rgb, |v| v as u16);
    let original = export(&grid)?;
    let strides = original.strides().to_vec();

    let view = import::<_, _, 3>(original, PixelKind::Rgb, true)?;
    let again = export_view(view)?;

    assert_eq!(again.shape(), &[10, 20, 30, 3]);
    assert_eq!(again.strides(), &strides[..]);
    assert_eq!(again, export(&grid)?);
    Ok(())
}
