// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! Defines the owned [`PixelGrid`] container.
use core::fmt;

use log::debug;

use crate::component::Component;
use crate::error::GridError;
use crate::pixel::{Pixel, PixelKind};
use crate::region::Region;
use crate::stride::StridedLayout;
use crate::view::GridRef;

/// An owned, D-dimensional grid of pixels with components of type `C`.
///
/// The grid is set up in two steps, mirroring how imaging toolkits handle allocation. First the
/// region and pixel kind are chosen, which is free and can not fail. Then [`Self::allocate`]
/// reserves the packed buffer for them. Until then the grid is *unallocated*: it has a size, but
/// any attempt to look at its pixels fails with [`GridError::Unallocated`].
///
/// The buffer layout is always packed: the components of a pixel are contiguous, and pixels are
/// ordered with axis `0` varying fastest. Views with other layouts are [`GridRef`]s.
///
/// ## Usage
///
/// ```
/// use image_grid::{PixelGrid, Region, Rgb};
///
/// let mut grid = PixelGrid::<u8, 2>::with_pixel::<Rgb<u8>>(Region::with_size([4, 4]));
/// grid.allocate().unwrap();
///
/// // Draw a red diagonal.
/// grid.shade(|[x, y], rgb| {
///     if x == y {
///         rgb.copy_from_slice(&[0xff, 0, 0]);
///     }
/// })
/// .unwrap();
///
/// let pixels = grid.pixels::<Rgb<u8>>().unwrap();
/// assert_eq!(pixels[5], Rgb([0xff, 0, 0]));
/// assert_eq!(pixels[1], Rgb([0, 0, 0]));
/// ```
#[derive(Clone, PartialEq)]
pub struct PixelGrid<C, const D: usize> {
    region: Region<D>,
    kind: PixelKind,
    data: Option<Vec<C>>,
}

impl<C: Component, const D: usize> PixelGrid<C, D> {
    /// Describe an unallocated grid.
    pub fn new(kind: PixelKind, region: Region<D>) -> Self {
        PixelGrid {
            region,
            kind,
            data: None,
        }
    }

    /// Describe an unallocated grid of statically typed pixels.
    pub fn with_pixel<P: Pixel<Component = C>>(region: Region<D>) -> Self {
        Self::new(P::KIND, region)
    }

    /// Take ownership of a packed buffer.
    ///
    /// The buffer must hold at least all components of the region; excess components are dropped.
    pub fn from_vec(
        kind: PixelKind,
        region: Region<D>,
        mut data: Vec<C>,
    ) -> Result<Self, GridError> {
        let mut grid = PixelGrid::new(kind, region);
        let layout = grid.layout()?;

        if data.len() < layout.span() {
            return Err(GridError::BufferTooSmall {
                required: layout.span(),
                available: data.len(),
            });
        }

        data.truncate(layout.span());
        grid.data = Some(data);
        Ok(grid)
    }

    /// Reserve a zeroed, packed buffer for the region.
    ///
    /// Any previous buffer is released first.
    ///
    /// # Panics
    /// When allocation of memory fails.
    pub fn allocate(&mut self) -> Result<(), GridError> {
        let layout = self.layout()?;
        self.data = None;
        self.data = Some(vec![C::default(); layout.span()]);

        debug!(
            "allocated {} grid of {} with extents {:?}",
            self.kind,
            C::KIND,
            self.region.size()
        );
        Ok(())
    }

    /// Change the region. The buffer is released unless the size stays the same.
    pub fn set_region(&mut self, region: Region<D>) {
        if region.size() != self.region.size() {
            self.data = None;
        }
        self.region = region;
    }

    /// Change the pixel kind. The buffer is released unless the channel count stays the same.
    ///
    /// This is also how the number of components of variable length pixels is chosen.
    pub fn set_kind(&mut self, kind: PixelKind) {
        if kind.channels() != self.kind.channels() {
            self.data = None;
        }
        self.kind = kind;
    }

    pub fn is_allocated(&self) -> bool {
        self.data.is_some()
    }

    pub fn region(&self) -> Region<D> {
        self.region
    }

    pub fn extents(&self) -> [usize; D] {
        self.region.size()
    }

    pub fn kind(&self) -> PixelKind {
        self.kind
    }

    pub fn channels(&self) -> usize {
        self.kind.channels()
    }

    /// The packed layout of the grid's buffer.
    pub fn layout(&self) -> Result<StridedLayout<D>, GridError> {
        let channels = self.kind.channels();
        if self.kind.accepts(channels).is_none() {
            return Err(GridError::ChannelCount {
                kind: self.kind,
                channels,
            });
        }

        Ok(StridedLayout::with_region(&self.region, channels)?)
    }

    pub fn as_slice(&self) -> Option<&[C]> {
        self.data.as_deref()
    }

    pub fn as_mut_slice(&mut self) -> Option<&mut [C]> {
        self.data.as_deref_mut()
    }

    /// Borrow the grid as a strided view.
    pub fn view(&self) -> Result<GridRef<'_, C, D>, GridError> {
        let layout = self.layout()?;
        let data = self.data.as_deref().ok_or(GridError::Unallocated)?;
        Ok(GridRef::new(self.kind, layout, data)?.with_index(self.region.index()))
    }

    /// View the buffer as statically typed pixels.
    pub fn pixels<P: Pixel<Component = C>>(&self) -> Result<&[P], GridError> {
        self.check_pixel::<P>()?;
        let data = self.data.as_deref().ok_or(GridError::Unallocated)?;
        Ok(bytemuck::cast_slice(data))
    }

    /// Mutably view the buffer as statically typed pixels.
    pub fn pixels_mut<P: Pixel<Component = C>>(&mut self) -> Result<&mut [P], GridError> {
        self.check_pixel::<P>()?;
        let data = self.data.as_deref_mut().ok_or(GridError::Unallocated)?;
        Ok(bytemuck::cast_slice_mut(data))
    }

    /// Read one component of a pixel.
    pub fn component(&self, index: [usize; D], channel: usize) -> Option<C> {
        let at = self.layout().ok()?.component_index(index, channel)?;
        self.data.as_ref()?.get(at).copied()
    }

    /// The components of one pixel.
    pub fn pixel(&self, index: [usize; D]) -> Option<&[C]> {
        let start = self.layout().ok()?.pixel_start(index)?;
        self.data.as_ref()?.get(start..start + self.channels())
    }

    /// Mutably borrow the components of one pixel.
    pub fn pixel_mut(&mut self, index: [usize; D]) -> Option<&mut [C]> {
        let start = self.layout().ok()?.pixel_start(index)?;
        let channels = self.channels();
        self.data.as_mut()?.get_mut(start..start + channels)
    }

    /// Set every pixel to the same components.
    pub fn fill(&mut self, components: &[C]) -> Result<(), GridError> {
        if components.len() != self.channels() {
            return Err(GridError::ChannelCount {
                kind: self.kind,
                channels: components.len(),
            });
        }

        self.data
            .as_mut()
            .ok_or(GridError::Unallocated)?
            .chunks_exact_mut(components.len())
            .for_each(|pixel| pixel.copy_from_slice(components));
        Ok(())
    }

    /// Compute each pixel from its index.
    pub fn shade(&mut self, mut f: impl FnMut([usize; D], &mut [C])) -> Result<(), GridError> {
        let layout = self.layout()?;
        let channels = layout.channels();
        let data = self.data.as_mut().ok_or(GridError::Unallocated)?;

        for (index, pixel) in layout.positions().zip(data.chunks_exact_mut(channels)) {
            f(index, pixel);
        }

        Ok(())
    }

    /// Release the buffer, if any.
    pub fn into_vec(self) -> Option<Vec<C>> {
        self.data
    }

    fn check_pixel<P: Pixel<Component = C>>(&self) -> Result<(), GridError> {
        if self.kind.is_compatible::<P>() {
            Ok(())
        } else {
            Err(GridError::PixelMismatch {
                requested: P::KIND,
                actual: self.kind,
            })
        }
    }
}

impl<C, const D: usize> fmt::Debug for PixelGrid<C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelGrid")
            .field("region", &self.region)
            .field("kind", &self.kind)
            .field("allocated", &self.data.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{Rgb, Rgba};

    #[test]
    fn unallocated_access() {
        let grid = PixelGrid::<u8, 3>::new(PixelKind::Scalar, Region::with_size([30, 20, 10]));
        assert!(!grid.is_allocated());
        assert!(matches!(grid.view(), Err(GridError::Unallocated)));
        assert!(matches!(grid.pixels::<u8>(), Err(GridError::Unallocated)));
        assert_eq!(grid.component([0, 0, 0], 0), None);
    }

    #[test]
    fn allocate_zeroed() -> Result<(), GridError> {
        let mut grid = PixelGrid::<u8, 3>::new(PixelKind::Scalar, Region::with_size([30, 20, 10]));
        grid.allocate()?;

        assert_eq!(grid.as_slice().map(<[u8]>::len), Some(6000));
        assert!(grid.as_slice().unwrap().iter().all(|&c| c == 0));
        Ok(())
    }

    #[test]
    fn variable_length_needs_components() {
        let mut grid = PixelGrid::<u8, 2>::new(
            PixelKind::VariableLength(0),
            Region::with_size([4, 4]),
        );
        assert!(matches!(
            grid.allocate(),
            Err(GridError::ChannelCount { channels: 0, .. })
        ));

        grid.set_kind(PixelKind::VariableLength(3));
        grid.allocate().expect("Three components per pixel");
        assert_eq!(grid.as_slice().map(<[u8]>::len), Some(48));
        assert!(grid.pixels::<[u8; 3]>().is_ok());
    }

    #[test]
    fn typed_pixels() -> Result<(), GridError> {
        let mut grid = PixelGrid::<u16, 2>::with_pixel::<Rgba<u16>>(Region::with_size([3, 2]));
        grid.allocate()?;
        grid.fill(&[1, 2, 3, 4])?;

        assert_eq!(grid.pixels::<Rgba<u16>>()?, &[Rgba([1, 2, 3, 4]); 6]);
        assert!(matches!(
            grid.pixels::<Rgb<u16>>(),
            Err(GridError::PixelMismatch { .. })
        ));

        grid.pixels_mut::<Rgba<u16>>()?[4] = Rgba([9, 9, 9, 9]);
        assert_eq!(grid.pixel([1, 1]), Some(&[9u16, 9, 9, 9][..]));
        assert_eq!(grid.component([1, 1], 3), Some(9));
        Ok(())
    }

    #[test]
    fn shading_order() -> Result<(), GridError> {
        let mut grid = PixelGrid::<u32, 2>::new(PixelKind::Scalar, Region::with_size([3, 2]));
        grid.allocate()?;
        grid.shade(|[x, y], pixel| pixel[0] = (10 * y + x) as u32)?;

        assert_eq!(grid.as_slice(), Some(&[0u32, 1, 2, 10, 11, 12][..]));
        Ok(())
    }

    #[test]
    fn buffer_reuse() {
        let region = Region::with_size([2, 2]);
        assert!(matches!(
            PixelGrid::<f32, 2>::from_vec(PixelKind::Vector(2), region, vec![0.0; 7]),
            Err(GridError::BufferTooSmall {
                required: 8,
                available: 7
            })
        ));

        let grid = PixelGrid::<f32, 2>::from_vec(PixelKind::Vector(2), region, vec![0.5; 10])
            .expect("Large enough");
        assert_eq!(grid.into_vec().map(|data| data.len()), Some(8));
    }

    #[test]
    fn region_change_releases() -> Result<(), GridError> {
        let mut grid = PixelGrid::<u8, 1>::new(PixelKind::Scalar, Region::with_size([4]));
        grid.allocate()?;

        grid.set_region(Region::new([5], [4]));
        assert!(grid.is_allocated(), "Same size keeps the buffer");
        assert_eq!(grid.view()?.region().index(), [5]);

        grid.set_region(Region::with_size([5]));
        assert!(!grid.is_allocated());
        Ok(())
    }
}
